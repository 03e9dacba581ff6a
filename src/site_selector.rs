//! Decides, bit by bit, which pixel a payload bit is written to (or read
//! from), once the channel has already been drawn for that bit.
//!
//! The candidate list is built once per run: every pixel in normal mode, or
//! only pixels the cached [`EdgeMask`] classifies as edges in Sobel mode. It
//! is then shuffled by the key schedule's permutation stream before any bits
//! are placed. Two quirks of the reference implementation are preserved
//! bit-for-bit, since embed and extract must walk the exact same sequence of
//! draws to stay in sync:
//!
//! - The cursor into the shuffled candidate list is incremented *before* it's
//!   read, so the list's first entry is never visited.
//! - In Sobel mode, every candidate examined is recorded as "chosen" for the
//!   5x5-neighborhood exclusion check, whether or not it passes the Sobel
//!   test — a site can still block a later one even after being rejected
//!   itself.
use std::collections::HashSet;

use crate::edge::EdgeMask;
use crate::error::{Error, Result};
use crate::image_buffer::ImageBuffer;
use crate::key_schedule::{Channel, KeySchedule};

pub struct SiteSelector<'a> {
    edge_mask: Option<&'a EdgeMask>,
    candidates: Vec<usize>,
    position: usize,
    chosen: HashSet<usize>,
}

impl<'a> SiteSelector<'a> {
    /// Builds the candidate list for `img` and shuffles it via `schedule`.
    /// `edge_mask` being `Some` both enables Sobel filtering and restricts
    /// candidates to pixels it classifies as edges.
    pub fn new(img: &ImageBuffer, schedule: &mut KeySchedule, edge_mask: Option<&'a EdgeMask>) -> Self {
        let mut candidates: Vec<usize> = match edge_mask {
            None => (0..img.pixel_count()).collect(),
            Some(mask) => (0..img.pixel_count())
                .filter(|&i| {
                    let (x, y) = img.x_y(i);
                    mask.is_edge(x, y)
                })
                .collect(),
        };
        schedule.shuffle(&mut candidates);
        Self {
            edge_mask,
            candidates,
            position: 0,
            chosen: HashSet::new(),
        }
    }

    /// Returns the pixel index to use for a bit already assigned `channel`,
    /// or [`Error::CapacityExhausted`] if the candidate list runs out first.
    pub fn next_site(&mut self, img: &mut ImageBuffer, channel: Channel) -> Result<usize> {
        loop {
            let pixel = self.next_candidate()?;

            let Some(mask) = self.edge_mask else {
                return Ok(pixel);
            };

            let mut valid = !mask.changes_sobel(img, pixel, channel);
            if valid {
                let (x, y) = img.x_y(pixel);
                valid = !self.conflicts_with_chosen(img, x, y);
            }
            self.chosen.insert(pixel);

            if valid {
                return Ok(pixel);
            }
        }
    }

    fn next_candidate(&mut self) -> Result<usize> {
        self.position += 1;
        self.candidates
            .get(self.position)
            .copied()
            .ok_or(Error::CapacityExhausted)
    }

    fn conflicts_with_chosen(&self, img: &ImageBuffer, x: u32, y: u32) -> bool {
        for dy in -2i64..=2 {
            for dx in -2i64..=2 {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if img.in_bounds(nx, ny) {
                    let idx = img.index(nx as u32, ny as u32);
                    if self.chosen.contains(&idx) {
                        return true;
                    }
                }
            }
        }
        false
    }
}
