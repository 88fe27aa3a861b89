use anyhow::Result;
use log::{debug, info};
use std::path::PathBuf;
use crate::detection::DetectionPipeline;
use crate::models::{Detection, Frame, FrameAnalysis};
use crate::presenter::render_overlay;

/// Supplies frames until the stream runs dry
pub trait FrameSource {
    /// `Ok(None)` marks the end of the stream
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// What the presenter wants the loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterControl {
    Continue,
    Stop,
}

/// Consumes one detection per frame (drawing, status text, key handling)
pub trait Presenter {
    fn present(&mut self, frame: &Frame, detection: &Detection) -> Result<PresenterControl>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    StopRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    EndOfStream,
    StopRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped(StopReason),
}

impl LoopState {
    /// Stopped is final: later events do not change the reason
    pub fn on_event(self, event: LoopEvent) -> LoopState {
        match (self, event) {
            (LoopState::Stopped(reason), _) => LoopState::Stopped(reason),
            (LoopState::Running, LoopEvent::EndOfStream) => LoopState::Stopped(StopReason::EndOfStream),
            (LoopState::Running, LoopEvent::StopRequested) => LoopState::Stopped(StopReason::StopRequested),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, LoopState::Running)
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Context available to the frame loop
#[derive(Clone, Debug, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

/// Counts of what the loop saw before it stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: u64,
    pub valid: u64,
    pub noise: u64,
    pub no_region: u64,
    pub stop_reason: StopReason,
}

/// Pulls frames, detects, hands results on, until the source ends or the presenter stops it
pub struct FrameLoop {
    pipeline: DetectionPipeline,
    context: PipelineContext,
}

impl FrameLoop {
    pub fn new(pipeline: DetectionPipeline) -> Self {
        Self {
            pipeline,
            context: PipelineContext::default(),
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig { output_dir });

        Ok(self)
    }

    pub fn pipeline(&self) -> &DetectionPipeline {
        &self.pipeline
    }

    pub fn run(&self, source: &mut dyn FrameSource, presenter: &mut dyn Presenter) -> Result<LoopSummary> {
        let mut state = LoopState::Running;
        let mut frames = 0u64;
        let (mut valid, mut noise, mut no_region) = (0u64, 0u64, 0u64);

        info!("Frame loop started");

        let stop_reason = loop {
            if let LoopState::Stopped(reason) = state {
                break reason;
            }

            let Some(frame) = source.next_frame()? else {
                state = state.on_event(LoopEvent::EndOfStream);
                continue;
            };

            let analysis = self.pipeline.analyze(&frame);
            self.save_debug_output(frames, &frame, &analysis)?;

            match analysis.detection {
                Detection::Valid { .. } => valid += 1,
                Detection::Noise { .. } => noise += 1,
                Detection::NoRegion => no_region += 1,
            }
            frames += 1;

            debug!("Frame {}: {:?}", frames, analysis.detection);

            if presenter.present(&frame, &analysis.detection)? == PresenterControl::Stop {
                state = state.on_event(LoopEvent::StopRequested);
            }
        };

        info!("Frame loop stopped after {} frames ({:?})", frames, stop_reason);

        Ok(LoopSummary {
            frames,
            valid,
            noise,
            no_region,
            stop_reason,
        })
    }

    /// Save the raw and cleaned masks plus the overlay if debug mode is enabled
    fn save_debug_output(&self, index: u64, frame: &Frame, analysis: &FrameAnalysis) -> Result<()> {
        let Some(debug_config) = &self.context.debug else {
            return Ok(());
        };
        let path_for = |suffix: &str| debug_config.output_dir.join(format!("{:06}_{}.png", index, suffix));

        for (suffix, mask) in [("mask", &analysis.mask), ("cleaned", &analysis.cleaned)] {
            mask.save(path_for(suffix))
                .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
        }
        render_overlay(frame, &analysis.detection)
            .save(path_for("overlay"))
            .map_err(|e| anyhow::anyhow!("Failed to save debug overlay: {}", e))?;

        debug!("Debug: saved masks and overlay for frame {:06}", index);

        Ok(())
    }
}
