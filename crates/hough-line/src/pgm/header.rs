//! Line-oriented PGM header parser.

use std::io::BufRead;

use hough_core::Sample;

use super::PgmError;

/// Typed `P5` header fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PgmHeader {
    pub width: usize,
    pub height: usize,
    pub max_value: Sample,
}

impl PgmHeader {
    /// Number of body bytes following the header.
    pub fn body_len(&self) -> usize {
        self.width * self.height
    }
}

const MAGIC: &[u8] = b"P5";
const COMMENT: u8 = b'#';

/// Reads header lines, skipping `#` comment lines.
struct FieldLines<'a, R> {
    reader: &'a mut R,
    line: Vec<u8>,
}

impl<'a, R: BufRead> FieldLines<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            line: Vec::new(),
        }
    }

    fn next_field(&mut self, field: &'static str) -> Result<&[u8], PgmError> {
        loop {
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Err(PgmError::MissingLine(field));
            }
            if self.line.first() != Some(&COMMENT) {
                return Ok(&self.line);
            }
        }
    }
}

fn text(line: &[u8]) -> String {
    String::from_utf8_lossy(line).trim_end().to_string()
}

fn parse_dimensions(line: &[u8]) -> Option<(usize, usize)> {
    let s = std::str::from_utf8(line).ok()?;
    let mut tokens = s.split_whitespace();
    let width: usize = tokens.next()?.parse().ok()?;
    let height: usize = tokens.next()?.parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    width.checked_mul(height)?;
    Some((width, height))
}

fn parse_max_value(line: &[u8]) -> Result<Sample, PgmError> {
    let token = std::str::from_utf8(line)
        .ok()
        .and_then(|s| s.split_whitespace().next())
        .ok_or_else(|| PgmError::MalformedMaxValue(text(line)))?;
    let value: i64 = token
        .parse()
        .map_err(|_| PgmError::MalformedMaxValue(text(line)))?;
    if !(1..=255).contains(&value) {
        return Err(PgmError::MaxValueOutOfRange(value));
    }
    Ok(value as Sample)
}

/// Parse the magic, dimensions and max-value lines.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<PgmHeader, PgmError> {
    let mut lines = FieldLines::new(reader);

    let magic = lines.next_field("magic number")?;
    if !magic.starts_with(MAGIC) {
        return Err(PgmError::BadMagic(text(magic)));
    }

    let dims = lines.next_field("image size")?;
    let (width, height) =
        parse_dimensions(dims).ok_or_else(|| PgmError::MalformedDimensions(text(dims)))?;

    let max_value = parse_max_value(lines.next_field("maximum value")?)?;

    Ok(PgmHeader {
        width,
        height,
        max_value,
    })
}
