use image::{Luma, Rgb};
use crate::config::HsvBand;
use crate::models::{BACKGROUND, FOREGROUND, Frame, Mask};

/// Convert an RGB pixel to 8-bit HSV: hue in half degrees (0..=179), saturation and value in 0..=255
pub fn rgb_to_hsv(pixel: &Rgb<u8>) -> (u8, u8, u8) {
    let [r, g, b] = pixel.0.map(i32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v == 0 {
        0
    } else {
        round_half_up(diff as f32 * 255.0 / v as f32)
    };

    if diff == 0 {
        return (0, s as u8, v as u8);
    }

    // Sector offsets are in units of `diff`; one unit is 30 half-degrees
    let sector = if v == r {
        g - b
    } else if v == g {
        b - r + 2 * diff
    } else {
        r - g + 4 * diff
    };
    let mut h = round_half_up(sector as f32 * 30.0 / diff as f32);
    if h < 0 {
        h += 180;
    }
    if h >= 180 {
        h -= 180;
    }

    (h as u8, s as u8, v as u8)
}

fn round_half_up(x: f32) -> i32 {
    (x + 0.5).floor() as i32
}

/// Mark pixels whose HSV color falls into any of the bands
pub fn segment(frame: &Frame, bands: &[HsvBand]) -> Mask {
    let (width, height) = frame.dimensions();
    let mut mask = Mask::new(width, height);

    for (x, y, pixel) in frame.enumerate_pixels() {
        let (h, s, v) = rgb_to_hsv(pixel);
        let hit = bands.iter().any(|band| band.contains(h, s, v));
        mask.put_pixel(x, y, Luma([if hit { FOREGROUND } else { BACKGROUND }]));
    }

    mask
}
