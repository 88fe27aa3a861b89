use anyhow::Result;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};
use std::io::Write;
use std::path::PathBuf;
use crate::models::{Detection, Frame};
use crate::pipeline::{Presenter, PresenterControl};

const OUTLINE: Rgb<u8> = Rgb([0, 255, 0]);
const CENTER_MARK: Rgb<u8> = Rgb([255, 0, 0]);
const CENTER_MARK_RADIUS: i32 = 3;
const STATUS_WIDTH: usize = 40;

/// Human-readable status for one frame
pub fn status_line(detection: &Detection) -> String {
    match detection {
        Detection::Valid { center, radius } => format!(
            "Ball @ ({}, {}), r={}",
            center.0 as i32, center.1 as i32, *radius as i32
        ),
        Detection::Noise { radius } => format!("Noise detected (r={})", *radius as i32),
        Detection::NoRegion => "No red region found".to_string(),
    }
}

/// Copy of the frame with a 2px outline at the fitted circle and a dot at its center.
/// Frames without a valid detection are returned unchanged.
pub fn render_overlay(frame: &Frame, detection: &Detection) -> RgbImage {
    let mut canvas = frame.clone();

    if let Detection::Valid { center, radius } = detection {
        let c = (center.0.round() as i32, center.1.round() as i32);
        let r = *radius as i32;
        draw_hollow_circle_mut(&mut canvas, c, r, OUTLINE);
        if r > 0 {
            draw_hollow_circle_mut(&mut canvas, c, r - 1, OUTLINE);
        }
        draw_filled_circle_mut(&mut canvas, c, CENTER_MARK_RADIUS, CENTER_MARK);
    }

    canvas
}

/// Prints a status line per frame and optionally saves overlay images
pub struct ConsolePresenter<W: Write> {
    out: W,
    line_mode: bool,
    overlay_dir: Option<PathBuf>,
    stop_after: Option<u64>,
    presented: u64,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line_mode: false,
            overlay_dir: None,
            stop_after: None,
            presented: 0,
        }
    }

    /// End each status with a newline instead of rewriting the same line
    pub fn with_line_mode(mut self, line_mode: bool) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Save an overlay PNG per frame into `dir` (created if missing)
    pub fn with_overlay_dir(mut self, dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = &dir {
            std::fs::create_dir_all(dir)?;
        }
        self.overlay_dir = dir;
        Ok(self)
    }

    /// Request a stop once this many frames have been shown
    pub fn with_stop_after(mut self, frames: Option<u64>) -> Self {
        self.stop_after = frames;
        self
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn present(&mut self, frame: &Frame, detection: &Detection) -> Result<PresenterControl> {
        let status = status_line(detection);
        if self.line_mode {
            writeln!(self.out, "{}", status)?;
        } else {
            write!(self.out, "{:<width$}\r", status, width = STATUS_WIDTH)?;
        }
        self.out.flush()?;

        if let Some(dir) = &self.overlay_dir {
            let path = dir.join(format!("{:06}.png", self.presented));
            render_overlay(frame, detection)
                .save(&path)
                .map_err(|e| anyhow::anyhow!("Failed to save overlay {}: {}", path.display(), e))?;
        }

        self.presented += 1;

        match self.stop_after {
            Some(limit) if self.presented >= limit => Ok(PresenterControl::Stop),
            _ => Ok(PresenterControl::Continue),
        }
    }
}
