//! Thin wrapper over an RGB pixel buffer, read from and written to disk via
//! the [`image`] crate.
use std::path::Path;

use crate::error::{Error, Result};
use crate::key_schedule::Channel;

/// An image held in memory as 8-bit RGB, with no alpha.
///
/// LSB steganography only ever touches the least significant bit of a
/// channel, so all other bits of every pixel are left bit-for-bit identical
/// between the cover image and the stego image.
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(Error::from)?;
        Ok(Self::from_dynamic(img))
    }

    /// Decodes an image held in memory, e.g. bytes just read from disk.
    pub fn open_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).map_err(Error::from)?;
        Ok(Self::from_dynamic(img))
    }

    fn from_dynamic(img: image::DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb.pixels().map(|p| p.0).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Grayscale intensity of a pixel, `(R + G + B) / 3`, used by the edge
    /// mask. `index` is the flattened `y * width + x` pixel index.
    pub fn gray(&self, index: usize) -> u8 {
        let [r, g, b] = self.pixels[index];
        ((r as u16 + g as u16 + b as u16) / 3) as u8
    }

    pub fn x_y(&self, index: usize) -> (u32, u32) {
        (
            (index % self.width as usize) as u32,
            (index / self.width as usize) as u32,
        )
    }

    pub fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Reads the least significant bit of `channel` at the given pixel.
    pub fn get_bit(&self, index: usize, channel: Channel) -> u8 {
        self.pixels[index][channel.index()] & 1
    }

    /// Overwrites the least significant bit of `channel` at the given pixel,
    /// leaving the remaining seven bits untouched.
    pub fn set_bit(&mut self, index: usize, channel: Channel, bit: u8) {
        let component = &mut self.pixels[index][channel.index()];
        *component = (*component & !1) | (bit & 1);
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut buf = image::RgbImage::new(self.width, self.height);
        for (i, pixel) in self.pixels.iter().enumerate() {
            let (x, y) = self.x_y(i);
            buf.put_pixel(x, y, image::Rgb(*pixel));
        }
        buf.save(path.as_ref()).map_err(Error::from)
    }
}
