// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane with an arbitrary pair of
//! corners defining the leftlower and rightupper corners.
//!
//! Unlike an orbit plotter, the escape-time renderer only ever maps
//! pixels to points, and it wants the last pixel of each axis to land
//! exactly on the far edge of the window.  The integral plane is
//! therefore treated as `W - 1` by `H - 1` intervals, which makes a
//! one-pixel-wide axis meaningless.
use errors::MandelbrotError;
use num::Complex;

/// Left-lower corner of the classic Mandelbrot window.
pub const LEFT_LOWER: Complex<f64> = Complex { re: -2.5, im: -1.0 };

/// Right-upper corner of the classic Mandelbrot window.
pub const RIGHT_UPPER: Complex<f64> = Complex { re: 1.0, im: 1.0 };

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the lower-left corner and upper-right corner of the
/// Complex plane, treating the real part of each value as the
/// x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// Column and row of a pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of an integral cartesian plane onto a window of the
/// complex plane.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// Width and height of the integral plane.
    pub integral_plane: IntegralPlane,
    /// Left-lower and right-upper corners of the complex window.
    pub complex_plane: ComplexPlane,
    // Width and height of the complex window.
    spans: (f64, f64),
    // Number of pixel intervals along each axis.
    intervals: (f64, f64),
}

impl PlaneMapper {
    /// Takes the size of the integral plane and two points describing
    /// the complex window.  Both axes need at least two pixels, and the
    /// corners must be ordered.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper, MandelbrotError> {
        if width < 2 {
            return Err(MandelbrotError::config(format!(
                "width must be at least 2 pixels, got {}",
                width
            )));
        }

        if height < 2 {
            return Err(MandelbrotError::config(format!(
                "height must be at least 2 pixels, got {}",
                height
            )));
        }

        if !(rightupper.re > leftlower.re) {
            return Err(MandelbrotError::config(
                "the left lower corner is not to the left of the right upper corner",
            ));
        }

        if !(rightupper.im > leftlower.im) {
            return Err(MandelbrotError::config(
                "the left lower corner is not lower than the right upper corner",
            ));
        }

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(leftlower, rightupper),
            spans: (rightupper.re - leftlower.re, rightupper.im - leftlower.im),
            intervals: ((width - 1) as f64, (height - 1) as f64),
        })
    }

    /// The plane over the classic window, `[-2.5, 1.0] x [-1.0, 1.0]`.
    pub fn mandelbrot(width: usize, height: usize) -> Result<PlaneMapper, MandelbrotError> {
        PlaneMapper::new(width, height, LEFT_LOWER, RIGHT_UPPER)
    }

    /// Given a pixel on the integral cartesian plane, return the point
    /// of the complex window it samples.  Pixel `W - 1` lands exactly
    /// on the right edge and row `H - 1` exactly on the top edge.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.spans.0 * (pixel.0 as f64) / self.intervals.0 + self.complex_plane.0.re,
            self.spans.1 * (pixel.1 as f64) / self.intervals.1 + self.complex_plane.0.im,
        )
    }
}
