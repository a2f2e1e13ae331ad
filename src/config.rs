// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The run configuration.  Built once at startup and only ever read
//! afterwards; every worker sees it through a shared reference.

use errors::MandelbrotError;
use num_cpus;
use std::path::PathBuf;

/// Default image width.
pub const DEFAULT_WIDTH: usize = 1920;
/// Default image height.
pub const DEFAULT_HEIGHT: usize = 1080;
/// Default iteration cap per pixel.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
/// Default output name, without extension.
pub const DEFAULT_FILE_NAME: &str = "Mandelbrot";

/// Everything a render needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Iteration cap; points that survive this long are in the set.
    pub max_iterations: usize,
    /// Base name of the output file.  `.png` is appended.
    pub file_name: String,
    /// Size of the worker pool.
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            file_name: DEFAULT_FILE_NAME.to_string(),
            threads: num_cpus::get(),
        }
    }
}

impl Config {
    /// Reject anything that cannot produce a well-defined image.  A
    /// zero iteration cap is allowed and renders solid black; the pool
    /// size is checked by the renderer that consumes it.
    pub fn validate(&self) -> Result<(), MandelbrotError> {
        if self.width < 2 || self.height < 2 {
            return Err(MandelbrotError::config(format!(
                "image must be at least 2x2 pixels, got {}x{}",
                self.width, self.height
            )));
        }
        if self.file_name.is_empty() {
            return Err(MandelbrotError::config("output file name is empty"));
        }
        Ok(())
    }

    /// Where the image ends up.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.png", self.file_name))
    }
}
