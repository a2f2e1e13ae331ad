#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which `z = z^2 + c`, iterated from `z = 0`, stays bounded.
//! The escape-time rendering takes every pixel of an image, maps it to
//! a point on the plane, and counts how many iterations that point
//! survives before `|z|` reaches 2.  That count, scaled to the
//! iteration cap, is the pixel's gray level: the black heart of the
//! set comes out white, and the fast-escaping outside comes out dark.
//!
//! Every pixel is independent of every other, so the image is
//! rendered by a pool of worker threads, each claiming whole rows of
//! the raster, and written out as a 16-bit grayscale PNG once all of
//! them have finished.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;
extern crate tempfile;

pub mod config;
pub mod errors;
pub mod escape;
pub mod output;
pub mod planes;
pub mod raster;
pub mod render;

pub use config::Config;
pub use errors::MandelbrotError;
pub use output::write_png;
pub use planes::{Pixel, PlaneMapper};
pub use raster::Raster;
pub use render::MandelbrotRenderer;

/// Render the image a configuration describes and write it to its
/// output path.  Nothing is written unless the whole raster rendered.
pub fn run(config: &Config) -> Result<std::path::PathBuf, MandelbrotError> {
    let renderer = MandelbrotRenderer::new(config)?;
    let raster = renderer.render(config.threads)?;
    let path = config.output_path();
    write_png(&path, &raster)?;
    Ok(path)
}
