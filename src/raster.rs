// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A row-major grid of 16-bit grayscale samples.  The backing buffer
//! is allocated once and never resized, so handing out disjoint row
//! slices to workers is safe for the whole render.

use planes::Pixel;
use std::slice::ChunksMut;

/// Width x height intensity samples, stored row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    samples: Vec<u16>,
}

impl Raster {
    /// A black raster of the given size.
    pub fn new(width: usize, height: usize) -> Raster {
        Raster {
            width,
            height,
            samples: vec![0 as u16; width * height],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All samples, row-major.
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// The sample at a pixel, or None if the pixel is off the grid.
    pub fn get(&self, pixel: &Pixel) -> Option<u16> {
        if pixel.0 >= self.width || pixel.1 >= self.height {
            return None;
        }
        Some(self.samples[pixel.1 * self.width + pixel.0])
    }

    pub(crate) fn set(&mut self, pixel: &Pixel, value: u16) {
        let offset = pixel.1 * self.width + pixel.0;
        self.samples[offset] = value;
    }

    /// One mutable slice per row, top to bottom.  Each slice is the
    /// exclusive write authority for that row.
    pub fn rows_mut(&mut self) -> ChunksMut<u16> {
        self.samples.chunks_mut(self.width.max(1))
    }

    /// The samples as big-endian bytes, which is what 16-bit PNG
    /// expects.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.samples.len() * 2);
        for sample in &self.samples {
            bytes.extend_from_slice(&sample.to_be_bytes());
        }
        bytes
    }
}
