use image::{GrayImage, Luma};
use imageproc::morphology::{self, grayscale_close, grayscale_open};
use crate::models::{FOREGROUND, Mask};

/// Elliptical structuring element inscribed in a `size`×`size` square
pub struct StructuringElement {
    shape: GrayImage,
    kernel: morphology::Mask,
}

impl StructuringElement {
    /// `size` must be odd and at most 255
    pub fn ellipse(size: u32) -> Self {
        let shape = ellipse_shape(size);
        let center = (size / 2) as u8;
        let kernel = morphology::Mask::from_image(&shape, center, center);
        Self { shape, kernel }
    }

    /// Kernel as an image, 255 where the element is set
    pub fn shape(&self) -> &GrayImage {
        &self.shape
    }

    pub fn size(&self) -> u32 {
        self.shape.width()
    }
}

/// Each row spans the ellipse chord at that height, rounded to the nearest column
fn ellipse_shape(size: u32) -> GrayImage {
    let mut shape = GrayImage::new(size, size);
    let r = (size / 2) as f64;
    let c = (size / 2) as i64;

    for row in 0..size {
        let dy = row as f64 - r;
        if dy.abs() > r {
            continue;
        }
        let dx = if r > 0.0 {
            (c as f64 * ((r * r - dy * dy) / (r * r)).sqrt()).round() as i64
        } else {
            0
        };
        let start = (c - dx).max(0);
        let end = (c + dx + 1).min(size as i64);
        for col in start..end {
            shape.put_pixel(col as u32, row, Luma([FOREGROUND]));
        }
    }

    shape
}

/// Opening (erode, dilate) to drop specks, then closing (dilate, erode) to fill pinholes
pub fn clean(mask: &Mask, element: &StructuringElement) -> Mask {
    let opened = grayscale_open(mask, &element.kernel);
    grayscale_close(&opened, &element.kernel)
}
