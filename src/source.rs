use anyhow::Result;
use image::{ImageFormat, ImageReader};
use log::{info, warn};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use crate::models::Frame;
use crate::pipeline::FrameSource;

/// Frames read from still images, in order (a recorded stream dumped frame by frame)
pub struct ImageSequenceSource {
    /// First frame, decoded while opening
    first: Option<Frame>,
    pending: VecDeque<PathBuf>,
    dimensions: Option<(u32, u32)>,
    remaining: Option<u64>,
}

impl ImageSequenceSource {
    /// Open a source from image files and/or directories.
    /// Directory entries are taken in file name order; non-image files are skipped.
    /// Fails if nothing playable is found or the first frame cannot be decoded.
    pub fn open(inputs: &[PathBuf]) -> Result<Self> {
        let mut pending = VecDeque::new();

        for input in inputs {
            if input.is_dir() {
                let mut entries: Vec<PathBuf> = std::fs::read_dir(input)
                    .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", input.display(), e))?
                    .collect::<std::io::Result<Vec<_>>>()?
                    .into_iter()
                    .map(|entry| entry.path())
                    .filter(|path| path.is_file())
                    .collect();
                entries.sort();

                for path in entries {
                    if is_image(&path) {
                        pending.push_back(path);
                    } else {
                        warn!("Skipping non-image file {}", path.display());
                    }
                }
            } else if input.is_file() {
                pending.push_back(input.clone());
            } else {
                return Err(anyhow::anyhow!("Could not open video source: {}", input.display()));
            }
        }

        let Some(first_path) = pending.pop_front() else {
            return Err(anyhow::anyhow!("Could not open video source: no frames found"));
        };
        let first = decode_frame(&first_path)?;
        let (width, height) = first.dimensions();

        info!(
            "Opened image sequence with {} frames of {}x{}",
            pending.len() + 1,
            width,
            height
        );

        Ok(Self {
            first: Some(first),
            pending,
            dimensions: Some((width, height)),
            remaining: None,
        })
    }

    /// Stop after at most `max_frames` frames
    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.remaining = max_frames;
        self
    }

    /// Frames not yet handed out
    pub fn len(&self) -> usize {
        self.pending.len() + usize::from(self.first.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

fn decode_frame(path: &Path) -> Result<Frame> {
    let frame = ImageReader::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open frame {}: {}", path.display(), e))?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode frame {}: {}", path.display(), e))?
        .to_rgb8();
    Ok(frame)
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.remaining == Some(0) {
            return Ok(None);
        }

        let frame = match self.first.take() {
            Some(frame) => frame,
            None => {
                let Some(path) = self.pending.pop_front() else {
                    return Ok(None);
                };
                let frame = decode_frame(&path)?;
                let dims = frame.dimensions();
                match self.dimensions {
                    Some(expected) if expected != dims => {
                        return Err(anyhow::anyhow!(
                            "Frame {} is {}x{}, expected {}x{}",
                            path.display(), dims.0, dims.1, expected.0, expected.1
                        ));
                    }
                    _ => self.dimensions = Some(dims),
                }
                frame
            }
        };

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }

        Ok(Some(frame))
    }
}
