use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest hue on the 8-bit half-degree scale (0..=179)
pub const MAX_HUE: u8 = 179;

/// Inclusive hue/saturation/value range a pixel must fall into to count as foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvBand {
    pub hue: (u8, u8),
    pub saturation: (u8, u8),
    pub value: (u8, u8),
}

impl HsvBand {
    pub const fn new(hue: (u8, u8), saturation: (u8, u8), value: (u8, u8)) -> Self {
        Self { hue, saturation, value }
    }

    /// Check whether an HSV triple lies inside the band
    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        (self.hue.0..=self.hue.1).contains(&h)
            && (self.saturation.0..=self.saturation.1).contains(&s)
            && (self.value.0..=self.value.1).contains(&v)
    }

    fn validate(&self) -> Result<()> {
        if self.hue.0 > self.hue.1 || self.saturation.0 > self.saturation.1 || self.value.0 > self.value.1 {
            return Err(anyhow::anyhow!("Inverted range in color band {:?}", self));
        }
        if self.hue.1 > MAX_HUE {
            return Err(anyhow::anyhow!(
                "Hue {} is outside 0..={} in color band {:?}",
                self.hue.1, MAX_HUE, self
            ));
        }
        Ok(())
    }
}

/// Red sits on both ends of the hue circle, so it takes two bands
pub const RED_LOW: HsvBand = HsvBand::new((0, 10), (100, 255), (100, 255));
pub const RED_HIGH: HsvBand = HsvBand::new((160, 179), (100, 255), (100, 255));

/// Detector parameters, fixed once the pipeline is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Color bands OR-ed together by the segmenter
    pub bands: Vec<HsvBand>,

    /// Side of the elliptical structuring element (odd, in pixels)
    pub kernel_size: u32,

    /// Enclosing circles smaller than this are reported as noise
    pub min_radius: f32,
}

impl DetectorConfig {
    pub fn new() -> Self {
        Self {
            bands: vec![RED_LOW, RED_HIGH],
            kernel_size: 5,
            min_radius: 20.0,
        }
    }

    pub fn with_bands(mut self, bands: Vec<HsvBand>) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_kernel_size(mut self, kernel_size: u32) -> Self {
        self.kernel_size = kernel_size;
        self
    }

    pub fn with_min_radius(mut self, min_radius: f32) -> Self {
        self.min_radius = min_radius;
        self
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bands.is_empty() {
            return Err(anyhow::anyhow!("At least one color band is required"));
        }
        for band in &self.bands {
            band.validate()?;
        }
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 || self.kernel_size > 255 {
            return Err(anyhow::anyhow!(
                "Kernel size must be odd and between 1 and 255, got {}",
                self.kernel_size
            ));
        }
        if !self.min_radius.is_finite() || self.min_radius < 0.0 {
            return Err(anyhow::anyhow!("Invalid minimum radius: {}", self.min_radius));
        }
        Ok(())
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new()
    }
}
