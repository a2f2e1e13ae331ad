// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.  Everything here is a pure function of
//! its arguments, so it can be called from any number of workers at
//! once.

use errors::MandelbrotError;
use num::Complex;
use planes::{Pixel, PlaneMapper};

/// Once `|z|^2` reaches this, the orbit is known to diverge.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// The brightest sample a 16-bit grayscale raster can hold.
pub const MAX_INTENSITY: u16 = ::std::u16::MAX;

/// Iterate `z = z^2 + c` from `z = 0`, returning the number of steps
/// taken before `z` escapes, or `max_iterations` if it never does.
pub fn escape_time(c: Complex<f64>, max_iterations: usize) -> usize {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    let mut iteration = 0;
    while iteration < max_iterations && z.norm_sqr() < ESCAPE_RADIUS_SQUARED {
        z = z * z + c;
        iteration += 1;
    }
    iteration
}

/// Linear map of an iteration count onto `0..=MAX_INTENSITY`, scaled
/// to the configured iteration cap so any cap uses the whole range.
pub fn intensity(iterations: usize, max_iterations: usize) -> u16 {
    if max_iterations == 0 {
        return 0;
    }
    let iterations = iterations.min(max_iterations) as u128;
    (iterations * u128::from(MAX_INTENSITY) / max_iterations as u128) as u16
}

/// Scale the pixel into the plane's window, run the escape-time loop
/// and return the gray level for that pixel.
pub fn evaluate(
    plane: &PlaneMapper,
    pixel: &Pixel,
    max_iterations: usize,
) -> Result<u16, MandelbrotError> {
    let c = plane.pixel_to_point(pixel);
    if !(c.re.is_finite() && c.im.is_finite()) {
        return Err(MandelbrotError::Computation(pixel.0, pixel.1));
    }
    Ok(intensity(escape_time(c, max_iterations), max_iterations))
}
