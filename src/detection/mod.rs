pub mod preprocessing;
pub mod morphology;
pub mod contours;
pub mod selection;
pub mod circles;

use anyhow::Result;
use log::debug;
use crate::config::DetectorConfig;
use crate::models::{Detection, Frame, FrameAnalysis, Mask, Region};
use morphology::StructuringElement;

/// Per-frame red ball detector.
///
/// Holds only the validated configuration and the structuring element built from it;
/// nothing carries over from one frame to the next.
pub struct DetectionPipeline {
    config: DetectorConfig,
    element: StructuringElement,
}

impl DetectionPipeline {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        let element = StructuringElement::ellipse(config.kernel_size);
        Ok(Self { config, element })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run the full detection pipeline on one frame
    pub fn detect(&self, frame: &Frame) -> Detection {
        self.analyze(frame).detection
    }

    /// Same as `detect`, but keeps every intermediate result
    pub fn analyze(&self, frame: &Frame) -> FrameAnalysis {
        let mask = self.segment(frame);
        let cleaned = self.clean(&mask);
        let regions = self.find_regions(&cleaned);
        let selected = selection::select_dominant(&regions);

        let detection = match selected {
            Some(idx) => circles::classify(&regions[idx], self.config.min_radius, frame.dimensions()),
            None => Detection::NoRegion,
        };

        debug!(
            "Found {} regions, selected {:?} -> {:?}",
            regions.len(),
            selected,
            detection
        );

        FrameAnalysis {
            mask,
            cleaned,
            regions,
            selected,
            detection,
        }
    }

    /// Binary mask of pixels inside the configured color bands
    pub fn segment(&self, frame: &Frame) -> Mask {
        preprocessing::segment(frame, &self.config.bands)
    }

    /// Opening followed by closing with the configured element
    pub fn clean(&self, mask: &Mask) -> Mask {
        morphology::clean(mask, &self.element)
    }

    /// External contours of the cleaned mask
    pub fn find_regions(&self, cleaned: &Mask) -> Vec<Region> {
        contours::find_regions(cleaned)
    }
}
