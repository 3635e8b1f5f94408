//! Binary PGM (`P5`) codec.
//!
//! Decoding reads a three-line text header followed by exactly
//! `width * height` one-byte samples; anything after the body is ignored.
//! Encoding always writes the canonical header `P5\n{w} {h}\n{max}\n`.

mod header;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use hough_core::{RasterBuffer, RasterError, Sample};

pub use header::{read_header, PgmHeader};

#[derive(thiserror::Error, Debug)]
pub enum PgmError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("missing PGM header line ({0})")]
    MissingLine(&'static str),

    #[error("bad magic number (expected P5, got {0:?})")]
    BadMagic(String),

    #[error("malformed image size line {0:?}")]
    MalformedDimensions(String),

    #[error("malformed maximum value line {0:?}")]
    MalformedMaxValue(String),

    #[error("maximum value {0} is outside 1..=255")]
    MaxValueOutOfRange(i64),

    #[error("truncated pixel data (expected {expected} bytes, got {got})")]
    TruncatedBody { expected: usize, got: usize },

    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Decode one `P5` image.
pub fn read_pgm<R: std::io::BufRead>(reader: &mut R) -> Result<RasterBuffer, PgmError> {
    let header = read_header(reader)?;
    let expected = header.body_len();

    let mut body = Vec::new();
    body.try_reserve_exact(expected)
        .map_err(|_| RasterError::Allocation {
            width: header.width,
            height: header.height,
        })?;
    reader.take(expected as u64).read_to_end(&mut body)?;
    if body.len() != expected {
        return Err(PgmError::TruncatedBody {
            expected,
            got: body.len(),
        });
    }

    let mut img = RasterBuffer::new(header.width, header.height, header.max_value)?;
    for (dst, &src) in img.samples_mut().iter_mut().zip(&body) {
        *dst = src as Sample;
    }
    log::debug!(
        "decoded {}x{} PGM (max value {})",
        header.width,
        header.height,
        header.max_value
    );
    Ok(img)
}

/// Encode `img` as `P5`. Samples are clamped to `0..=255`.
pub fn write_pgm<W: Write>(writer: &mut W, img: &RasterBuffer) -> Result<(), PgmError> {
    write!(
        writer,
        "P5\n{} {}\n{}\n",
        img.width(),
        img.height(),
        img.max_value()
    )?;
    let body: Vec<u8> = img
        .samples()
        .iter()
        .map(|&v| v.clamp(0, 255) as u8)
        .collect();
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

pub fn read_pgm_file(path: impl AsRef<Path>) -> Result<RasterBuffer, PgmError> {
    let mut reader = BufReader::new(File::open(path)?);
    read_pgm(&mut reader)
}

pub fn write_pgm_file(path: impl AsRef<Path>, img: &RasterBuffer) -> Result<(), PgmError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_pgm(&mut writer, img)
}
