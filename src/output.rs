// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes a finished raster as a 16-bit grayscale PNG.  The image is
//! encoded in memory and persisted through a temporary file in the
//! destination directory, so a failed write never leaves a truncated
//! image behind.

use errors::MandelbrotError;
use image::png::PNGEncoder;
use image::ColorType;
use raster::Raster;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Encode the raster as a lossless 16-bit grayscale PNG.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, ::std::io::Error> {
    let mut encoded = Vec::new();
    PNGEncoder::new(&mut encoded).encode(
        &raster.to_be_bytes(),
        raster.width() as u32,
        raster.height() as u32,
        ColorType::Gray(16),
    )?;
    Ok(encoded)
}

/// Encode the raster and atomically replace `path` with it.
pub fn write_png<P: AsRef<Path>>(path: P, raster: &Raster) -> Result<(), MandelbrotError> {
    let path = path.as_ref();
    let encoded = encode_png(raster).map_err(|e| MandelbrotError::output(path, e))?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(directory).map_err(|e| MandelbrotError::output(path, e))?;
    staged
        .write_all(&encoded)
        .map_err(|e| MandelbrotError::output(path, e))?;
    staged
        .persist(path)
        .map_err(|e| MandelbrotError::output(path, e.error))?;
    info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn ramp() -> Raster {
        let mut raster = Raster::new(4, 2);
        for (row, samples) in raster.rows_mut().enumerate() {
            for (column, sample) in samples.iter_mut().enumerate() {
                *sample = ((row * 4 + column) * 8000) as u16;
            }
        }
        raster
    }

    #[test]
    fn encodes_a_16_bit_grayscale_png() {
        let encoded = encode_png(&ramp()).unwrap();
        assert_eq!(&encoded[..8], b"\x89PNG\r\n\x1a\n");
        // IHDR: width, height, bit depth, color type.
        assert_eq!(&encoded[12..16], b"IHDR");
        assert_eq!(&encoded[16..24], &[0, 0, 0, 4, 0, 0, 0, 2]);
        assert_eq!(encoded[24], 16);
        assert_eq!(encoded[25], 0);
    }

    #[test]
    fn writes_replace_the_destination_and_leave_nothing_else() {
        let dir = ::tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        fs::write(&path, b"stale").unwrap();
        write_png(&path, &ramp()).unwrap();

        assert_eq!(fs::read(&path).unwrap(), encode_png(&ramp()).unwrap());
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn missing_directories_are_output_errors() {
        let dir = ::tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.png");
        match write_png(&path, &ramp()) {
            Err(MandelbrotError::Output { .. }) => (),
            other => panic!("expected an output error, got {:?}", other),
        }
        assert!(!path.exists());
    }
}
