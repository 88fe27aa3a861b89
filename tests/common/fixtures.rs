use image::{Luma, Rgb, RgbImage};
use imageproc::point::Point;
use redball::models::{Detection, Frame, Mask};
use redball::pipeline::{FrameSource, Presenter, PresenterControl};
use std::collections::VecDeque;

/// Color constants for tests
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

/// Creates a frame filled with one color
pub fn solid_frame(width: u32, height: u32, color: Rgb<u8>) -> Frame {
    RgbImage::from_pixel(width, height, color)
}

/// Paints every pixel within `radius` of `center` (pixel centers, inclusive)
pub fn paint_disk(frame: &mut Frame, center: (i64, i64), radius: i64, color: Rgb<u8>) {
    for (x, y, pixel) in frame.enumerate_pixels_mut() {
        let dx = x as i64 - center.0;
        let dy = y as i64 - center.1;
        if dx * dx + dy * dy <= radius * radius {
            *pixel = color;
        }
    }
}

/// 640x480 blue frame with red disks
pub fn red_disks_on_blue(disks: &[((i64, i64), i64)]) -> Frame {
    let mut frame = solid_frame(640, 480, BLUE);
    for &(center, radius) in disks {
        paint_disk(&mut frame, center, radius, RED);
    }
    frame
}

/// Creates an all-background mask
pub fn empty_mask(width: u32, height: u32) -> Mask {
    Mask::new(width, height)
}

/// Sets a filled axis-aligned block of foreground pixels
pub fn fill_block(mask: &mut Mask, x: u32, y: u32, w: u32, h: u32, value: u8) {
    for yy in y..y + h {
        for xx in x..x + w {
            mask.put_pixel(xx, yy, Luma([value]));
        }
    }
}

pub fn foreground_count(mask: &Mask) -> usize {
    mask.pixels().filter(|p| p[0] > 0).count()
}

/// Closed square polygon with its top-left corner at `origin`
pub fn square_region(origin: (i32, i32), side: i32) -> redball::Region {
    let (x, y) = origin;
    redball::Region::new(vec![
        Point::new(x, y),
        Point::new(x + side, y),
        Point::new(x + side, y + side),
        Point::new(x, y + side),
    ])
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual, tolerance, expected
    );
}

/// In-memory frame source
pub struct VecSource {
    frames: VecDeque<Frame>,
    pub pulled: usize,
}

impl VecSource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
            pulled: 0,
        }
    }
}

impl FrameSource for VecSource {
    fn next_frame(&mut self) -> anyhow::Result<Option<Frame>> {
        let frame = self.frames.pop_front();
        if frame.is_some() {
            self.pulled += 1;
        }
        Ok(frame)
    }
}

/// Presenter that records detections and can ask to stop after N frames
pub struct RecordingPresenter {
    pub seen: Vec<Detection>,
    pub stop_after: Option<usize>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self {
            seen: Vec::new(),
            stop_after: None,
        }
    }

    pub fn stopping_after(frames: usize) -> Self {
        Self {
            seen: Vec::new(),
            stop_after: Some(frames),
        }
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, _frame: &Frame, detection: &Detection) -> anyhow::Result<PresenterControl> {
        self.seen.push(*detection);
        match self.stop_after {
            Some(limit) if self.seen.len() >= limit => Ok(PresenterControl::Stop),
            _ => Ok(PresenterControl::Continue),
        }
    }
}
