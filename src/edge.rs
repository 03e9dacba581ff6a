//! Sobel edge detection, used in `-s` mode to steer the site selector away
//! from flat regions where an LSB flip would be most visible to statistical
//! steganalysis.
use crate::image_buffer::ImageBuffer;

const GX: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const GY: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];
const THRESHOLD: i32 = 160;

/// Per-pixel edge/non-edge classification, computed once per loaded image
/// and reused for every candidate site tested in Sobel mode.
pub struct EdgeMask {
    width: u32,
    height: u32,
    is_edge: Vec<bool>,
}

impl EdgeMask {
    pub fn compute(img: &ImageBuffer) -> Self {
        let width = img.width();
        let height = img.height();
        let is_edge = (0..img.pixel_count())
            .map(|i| {
                let (x, y) = img.x_y(i);
                is_edge_at(img, x, y)
            })
            .collect();
        Self {
            width,
            height,
            is_edge,
        }
    }

    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        self.is_edge[(y * self.width + x) as usize]
    }

    /// Writes a black/white visualization of the mask, for inspection. Not
    /// part of the normal embed/extract path.
    pub fn write_debug_png(&self, path: impl AsRef<std::path::Path>) -> crate::error::Result<()> {
        let mut buf = image::GrayImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let v = if self.is_edge(x, y) { 255 } else { 0 };
                buf.put_pixel(x, y, image::Luma([v]));
            }
        }
        buf.save(path.as_ref()).map_err(crate::error::Error::from)
    }

    /// Whether flipping the LSB of `channel` at pixel `index` would change
    /// this pixel's own Sobel classification, or that of any of its 3x3
    /// neighbors. Border pixels (no full 3x3 neighborhood) are never edges
    /// and never reclassify, so they always return `false`.
    pub fn changes_sobel(
        &self,
        img: &mut ImageBuffer,
        index: usize,
        channel: crate::key_schedule::Channel,
    ) -> bool {
        let (x, y) = img.x_y(index);
        let original = img.get_bit(index, channel);
        let flipped = original ^ 1;

        img.set_bit(index, channel, flipped);
        let changed = neighborhood(x, y, img.width(), img.height())
            .into_iter()
            .any(|(nx, ny)| is_edge_at(img, nx, ny) != self.is_edge(nx, ny));
        img.set_bit(index, channel, original);

        changed
    }
}

fn is_edge_at(img: &ImageBuffer, x: u32, y: u32) -> bool {
    if x == 0 || y == 0 || x + 1 >= img.width() || y + 1 >= img.height() {
        return false;
    }

    let mut sx = 0i32;
    let mut sy = 0i32;
    for (j, row) in [-1i64, 0, 1].iter().enumerate() {
        for (i, col) in [-1i64, 0, 1].iter().enumerate() {
            let sample = img.gray(img.index((x as i64 + col) as u32, (y as i64 + row) as u32)) as i32;
            sx += GX[j][i] * sample;
            sy += GY[j][i] * sample;
        }
    }
    sx.abs() + sy.abs() > THRESHOLD
}

/// The 3x3 neighborhood of `(x, y)` that's in bounds, including `(x, y)`
/// itself.
fn neighborhood(x: u32, y: u32, width: u32, height: u32) -> Vec<(u32, u32)> {
    let mut out = Vec::with_capacity(9);
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx >= 0 && ny >= 0 && (nx as u32) < width && (ny as u32) < height {
                out.push((nx as u32, ny as u32));
            }
        }
    }
    out
}
