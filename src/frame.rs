//! Fixed-size RGB frame buffer
//!
//! Samples are stored row-major with the channel innermost:
//! index = (y * width + x) * 3 + channel. The effect pipeline flattens and
//! reshapes frames through [`FrameBuffer::samples`] and
//! [`FrameBuffer::from_samples`], which both use exactly this order, so a
//! frame survives the trip through a one-dimensional signal unchanged.

use crate::error::{NoteFrameError, Result};
use image::RgbaImage;

/// Number of channels per pixel
pub const CHANNELS: usize = 3;

/// H x W x 3 array of 8-bit samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Create a frame filled with a single colour
    pub fn new(width: usize, height: usize, fill: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for _ in 0..width * height {
            data.extend_from_slice(&fill);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Reshape a flat sample sequence back into `width` x `height` x 3
    pub fn from_samples(width: usize, height: usize, samples: Vec<u8>) -> Result<Self> {
        let expected = width * height * CHANNELS;
        if samples.len() != expected {
            return Err(NoteFrameError::FrameGeometry {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data: samples,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the frame holds no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat view of every sample in traversal order
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgb);
    }

    /// Overwrite every pixel with one colour
    pub fn fill(&mut self, rgb: [u8; 3]) {
        for px in self.data.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&rgb);
        }
    }

    /// Alpha-blend an RGBA image with its top-left corner at (`left`, `top`)
    ///
    /// Parts of the image outside the frame are clipped.
    pub fn blit(&mut self, image: &RgbaImage, left: i64, top: i64) {
        let (img_w, img_h) = image.dimensions();
        let x_start = left.max(0);
        let y_start = top.max(0);
        let x_end = (left + img_w as i64).min(self.width as i64);
        let y_end = (top + img_h as i64).min(self.height as i64);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let src = image.get_pixel((x - left) as u32, (y - top) as u32).0;
                let alpha = src[3] as u32;
                if alpha == 0 {
                    continue;
                }
                let i = self.offset(x as usize, y as usize);
                for c in 0..CHANNELS {
                    let dst = self.data[i + c] as u32;
                    let blended = (src[c] as u32 * alpha + dst * (255 - alpha) + 127) / 255;
                    self.data[i + c] = blended as u8;
                }
            }
        }
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y * self.width + x) * CHANNELS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: usize, height: usize) -> FrameBuffer {
        let mut frame = FrameBuffer::new(width, height, [0, 0, 0]);
        for y in 0..height {
            for x in 0..width {
                frame.set_pixel(x, y, [(x * 7) as u8, (y * 13) as u8, (x + y) as u8]);
            }
        }
        frame
    }

    #[test]
    fn test_traversal_order_is_row_major_channel_innermost() {
        let mut frame = FrameBuffer::new(3, 2, [0, 0, 0]);
        frame.set_pixel(1, 0, [1, 2, 3]);
        frame.set_pixel(0, 1, [4, 5, 6]);

        let samples = frame.samples();
        assert_eq!(&samples[3..6], &[1, 2, 3]);
        // Second row starts after width * 3 samples
        assert_eq!(&samples[9..12], &[4, 5, 6]);
    }

    #[test]
    fn test_flatten_reshape_round_trip() {
        let frame = gradient(17, 11);
        let flat = frame.samples().to_vec();
        let rebuilt = FrameBuffer::from_samples(17, 11, flat).unwrap();
        assert_eq!(rebuilt, frame);
    }

    #[test]
    fn test_from_samples_rejects_wrong_length() {
        let err = FrameBuffer::from_samples(4, 4, vec![0; 47]).unwrap_err();
        assert!(matches!(
            err,
            NoteFrameError::FrameGeometry {
                expected: 48,
                actual: 47
            }
        ));
    }

    #[test]
    fn test_empty_frame() {
        let frame = FrameBuffer::new(0, 10, [1, 2, 3]);
        assert!(frame.is_empty());
        assert_eq!(frame.samples().len(), 0);
    }

    #[test]
    fn test_blit_opaque_and_clipped() {
        let mut frame = FrameBuffer::new(4, 4, [0, 0, 0]);
        let image = RgbaImage::from_pixel(3, 3, Rgba([200, 100, 50, 255]));

        frame.blit(&image, 2, -1);

        assert_eq!(frame.pixel(2, 0), [200, 100, 50]);
        assert_eq!(frame.pixel(3, 1), [200, 100, 50]);
        assert_eq!(frame.pixel(1, 0), [0, 0, 0]);
        assert_eq!(frame.pixel(2, 2), [0, 0, 0]);
    }

    #[test]
    fn test_blit_alpha_blends_over_background() {
        let mut frame = FrameBuffer::new(1, 1, [100, 100, 100]);
        let transparent = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 0]));
        frame.blit(&transparent, 0, 0);
        assert_eq!(frame.pixel(0, 0), [100, 100, 100]);

        let half = RgbaImage::from_pixel(1, 1, Rgba([200, 0, 100, 128]));
        frame.blit(&half, 0, 0);
        // 200*128 + 100*127 = 38300 -> 150; 0 + 12700 -> 50; 100*128 + 12700 -> 100
        assert_eq!(frame.pixel(0, 0), [150, 50, 100]);
    }

    #[test]
    fn test_fill() {
        let mut frame = gradient(5, 5);
        frame.fill([9, 8, 7]);
        assert!(frame.samples().chunks(3).all(|px| px == [9, 8, 7]));
    }
}
