// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Every way a render can fail.  None of these are recoverable: the
//! computation is deterministic, so a retry would fail the same way.

use std::io;

/// The error type shared by the whole renderer.
#[derive(Debug, Fail)]
pub enum MandelbrotError {
    /// The requested image or pool cannot be rendered at all.  Raised
    /// before any work is dispatched.
    #[fail(display = "invalid configuration: {}", _0)]
    Config(String),

    /// A pixel produced a non-finite sample point or some other
    /// numeric fault.
    #[fail(display = "numeric fault while computing pixel ({}, {})", _0, _1)]
    Computation(usize, usize),

    /// A worker thread panicked before the pool was joined.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// The finished image could not be written.
    #[fail(display = "could not write {}: {}", path, cause)]
    Output {
        /// Destination we were trying to write.
        path: String,
        /// What the filesystem or encoder said.
        #[cause]
        cause: io::Error,
    },
}

impl MandelbrotError {
    pub(crate) fn config<S: Into<String>>(message: S) -> Self {
        MandelbrotError::Config(message.into())
    }

    pub(crate) fn output<P: AsRef<::std::path::Path>>(path: P, cause: io::Error) -> Self {
        MandelbrotError::Output {
            path: path.as_ref().display().to_string(),
            cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let e = MandelbrotError::config("width must be at least 2, got 1");
        assert_eq!(
            e.to_string(),
            "invalid configuration: width must be at least 2, got 1"
        );
        let e = MandelbrotError::Computation(3, 4);
        assert_eq!(e.to_string(), "numeric fault while computing pixel (3, 4)");
    }

    #[test]
    fn output_errors_keep_their_cause() {
        use failure::Fail;
        let e = MandelbrotError::output(
            "out/Mandelbrot.png",
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );
        assert!(e.to_string().starts_with("could not write out/Mandelbrot.png"));
        assert!(e.cause().is_some());
    }
}
