// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The grid scheduler.
//!
//! Every pixel of the escape-time image is independent of every other
//! pixel, so the render is a parallel map over the grid.  Rather than
//! start one thread per pixel, a fixed pool of scoped workers pulls
//! whole rows off a shared queue.  The queue hands each row out exactly
//! once, and a row slice is a `&mut` borrow of its own part of the
//! raster, so no two workers can ever write the same sample and no
//! per-pixel locking is needed.  Leaving the crossbeam scope joins
//! every worker, after which the raster is whole and readable again.

extern crate crossbeam;

use config::Config;
use errors::MandelbrotError;
use escape::evaluate;
use itertools::iproduct;
use planes::{Pixel, PlaneMapper};
use raster::Raster;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// Holds the plane and iteration cap for one render.  Once built it is
/// never mutated, and workers only ever see it by shared reference.
#[derive(Debug, Clone)]
pub struct MandelbrotRenderer {
    plane: PlaneMapper,
    max_iterations: usize,
}

impl MandelbrotRenderer {
    /// Validates the configuration and builds the plane over the
    /// classic Mandelbrot window.
    pub fn new(config: &Config) -> Result<Self, MandelbrotError> {
        config.validate()?;
        let plane = PlaneMapper::mandelbrot(config.width, config.height)?;
        Ok(MandelbrotRenderer {
            plane,
            max_iterations: config.max_iterations,
        })
    }

    /// The plane this renderer samples.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The single-threaded render.  Slow, but it is the reference the
    /// pooled render must agree with.
    pub fn render_single(&self) -> Result<Raster, MandelbrotError> {
        let (width, height) = (self.plane.integral_plane.0, self.plane.integral_plane.1);
        let mut raster = Raster::new(width, height);
        for (row, column) in iproduct!(0..height, 0..width) {
            let pixel = Pixel(column, row);
            let value = evaluate(&self.plane, &pixel, self.max_iterations)?;
            raster.set(&pixel, value);
        }
        Ok(raster)
    }

    /// Render with a pool of `threads` workers.
    pub fn render(&self, threads: usize) -> Result<Raster, MandelbrotError> {
        let start = Instant::now();
        info!(
            "Rendering {}x{} at {} iterations on {} threads",
            self.plane.integral_plane.0, self.plane.integral_plane.1, self.max_iterations, threads
        );
        let raster = self.render_with(threads, |pixel| {
            evaluate(&self.plane, pixel, self.max_iterations)
        })?;
        let elapsed = start.elapsed();
        info!(
            "It took {}.{:03} seconds",
            elapsed.as_secs(),
            elapsed.subsec_millis()
        );
        Ok(raster)
    }

    /// Runs `compute` once for every pixel of the plane on a pool of
    /// `threads` scoped workers and collects the results into a raster.
    /// The first error stops the pool from claiming more rows and is
    /// returned in place of the raster.
    fn render_with<F>(&self, threads: usize, compute: F) -> Result<Raster, MandelbrotError>
    where
        F: Fn(&Pixel) -> Result<u16, MandelbrotError> + Sync,
    {
        if threads == 0 {
            return Err(MandelbrotError::config("thread count must be positive"));
        }

        let mut raster = Raster::new(self.plane.integral_plane.0, self.plane.integral_plane.1);
        let failure: Mutex<Option<MandelbrotError>> = Mutex::new(None);
        let aborted = AtomicBool::new(false);
        {
            let rows = Mutex::new(raster.rows_mut().enumerate());
            let (rows, compute, failure, aborted) = (&rows, &compute, &failure, &aborted);
            crossbeam::scope(|spawner| {
                for worker in 0..threads {
                    spawner.spawn(move |_| loop {
                        if aborted.load(Ordering::SeqCst) {
                            break;
                        }
                        let next = match rows.lock() {
                            Ok(mut rows) => rows.next(),
                            Err(_) => break,
                        };
                        let (row, samples) = match next {
                            Some(next) => next,
                            None => break,
                        };
                        for (column, sample) in samples.iter_mut().enumerate() {
                            match compute(&Pixel(column, row)) {
                                Ok(value) => *sample = value,
                                Err(e) => {
                                    debug!("worker {} failed on row {}: {}", worker, row, e);
                                    aborted.store(true, Ordering::SeqCst);
                                    if let Ok(mut first) = failure.lock() {
                                        if first.is_none() {
                                            *first = Some(e);
                                        }
                                    }
                                    return;
                                }
                            }
                        }
                    });
                }
            })
            .map_err(|_| MandelbrotError::WorkerPanicked)?;
        }

        match failure.into_inner() {
            Ok(None) => Ok(raster),
            Ok(Some(e)) => Err(e),
            Err(_) => Err(MandelbrotError::WorkerPanicked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape::MAX_INTENSITY;
    use std::sync::atomic::AtomicUsize;

    fn config(width: usize, height: usize, max_iterations: usize) -> Config {
        Config {
            width,
            height,
            max_iterations,
            threads: 4,
            ..Config::default()
        }
    }

    #[test]
    fn every_cell_is_written_exactly_once() {
        let renderer = MandelbrotRenderer::new(&config(37, 23, 50)).unwrap();
        for &threads in &[1, 2, 3, 8, 64] {
            let writes: Vec<AtomicUsize> = (0..37 * 23).map(|_| AtomicUsize::new(0)).collect();
            let raster = renderer
                .render_with(threads, |pixel| {
                    writes[pixel.1 * 37 + pixel.0].fetch_add(1, Ordering::SeqCst);
                    Ok(1)
                })
                .unwrap();
            assert!(writes.iter().all(|w| w.load(Ordering::SeqCst) == 1));
            assert!(raster.samples().iter().all(|&s| s == 1));
        }
    }

    #[test]
    fn pooled_render_matches_single_render() {
        let renderer = MandelbrotRenderer::new(&config(64, 40, 200)).unwrap();
        let single = renderer.render_single().unwrap();
        for &threads in &[1, 3, 7] {
            assert_eq!(renderer.render(threads).unwrap(), single);
        }
    }

    #[test]
    fn renders_are_bit_identical() {
        let renderer = MandelbrotRenderer::new(&config(50, 30, 300)).unwrap();
        assert_eq!(renderer.render(4).unwrap(), renderer.render(4).unwrap());
    }

    #[test]
    fn four_by_four_end_to_end() {
        let renderer = MandelbrotRenderer::new(&config(4, 4, 10)).unwrap();
        assert_eq!(
            renderer.plane().pixel_to_point(&Pixel(0, 0)),
            ::num::Complex::new(-2.5, -1.0)
        );
        let raster = renderer.render(2).unwrap();
        assert_eq!((raster.width(), raster.height()), (4, 4));
        // c = (-2.5, -1.0) escapes on the first step.
        assert_eq!(raster.get(&Pixel(0, 0)), Some(6553));
        // Pixel (2, 1) samples c = (-0.1667, -0.3333), inside the cardioid.
        assert_eq!(raster.get(&Pixel(2, 1)), Some(MAX_INTENSITY));
    }

    #[test]
    fn a_zero_iteration_cap_renders_black() {
        let renderer = MandelbrotRenderer::new(&config(4, 4, 0)).unwrap();
        let raster = renderer.render(2).unwrap();
        assert_eq!(raster.samples(), &[0u16; 16][..]);
        assert_eq!(renderer.render_single().unwrap(), raster);
    }

    #[test]
    fn degenerate_planes_never_reach_the_pool() {
        assert!(MandelbrotRenderer::new(&config(1, 10, 10)).is_err());
        assert!(MandelbrotRenderer::new(&config(10, 1, 10)).is_err());
    }

    #[test]
    fn an_empty_pool_is_rejected_by_the_render() {
        let empty = Config {
            threads: 0,
            ..config(4, 4, 10)
        };
        let renderer = MandelbrotRenderer::new(&empty).unwrap();
        match renderer.render(empty.threads) {
            Err(MandelbrotError::Config(msg)) => assert!(msg.contains("thread count")),
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn a_failing_pixel_fails_the_whole_render() {
        let renderer = MandelbrotRenderer::new(&config(16, 16, 10)).unwrap();
        let result = renderer.render_with(4, |pixel| {
            if *pixel == Pixel(5, 9) {
                Err(MandelbrotError::Computation(pixel.0, pixel.1))
            } else {
                Ok(0)
            }
        });
        match result {
            Err(MandelbrotError::Computation(5, 9)) => (),
            other => panic!("expected the pixel fault, got {:?}", other),
        }
    }

    #[test]
    fn a_panicking_worker_fails_the_whole_render() {
        let renderer = MandelbrotRenderer::new(&config(8, 8, 10)).unwrap();
        let result = renderer.render_with(2, |pixel| {
            if pixel.1 == 3 {
                panic!("boom");
            }
            Ok(0)
        });
        match result {
            Err(MandelbrotError::WorkerPanicked) => (),
            other => panic!("expected a worker panic, got {:?}", other),
        }
    }
}
