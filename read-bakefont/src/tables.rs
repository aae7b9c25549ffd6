//! The per-mode glyph metrics and kerning sections

pub mod kerning;
pub mod metrics;

use alloc::vec::Vec;

use types::Tag;

use crate::font_data::FontData;
use crate::read::{Marker, ReadError};
use crate::source::{read_exact_at, ByteSource};

/// The size of the marker at the start of each section.
const SECTION_TAG_LEN: u32 = 4;

/// Read a whole section and check its marker.
fn load_section<S: ByteSource + ?Sized>(
    source: &mut S,
    offset: u32,
    size: u32,
    tag: Tag,
    marker: Marker,
) -> Result<Vec<u8>, ReadError> {
    if size < SECTION_TAG_LEN {
        return Err(ReadError::SizeTooSmall {
            size,
            min: SECTION_TAG_LEN,
        });
    }
    let data = read_exact_at(source, offset as u64, size as usize)?;
    FontData::new(&data).expect_tag(0, tag, marker)?;
    Ok(data)
}

/// The number of whole records of `record_len` bytes following the marker.
///
/// Trailing bytes that do not form a whole record are ignored.
fn record_count(section_len: usize, record_len: usize) -> usize {
    section_len.saturating_sub(SECTION_TAG_LEN as usize) / record_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_size_below_marker() {
        let mut src: &[u8] = b"GSET";
        assert_eq!(
            load_section(&mut src, 0, 3, types::METRICS_TAG, Marker::Metrics),
            Err(ReadError::SizeTooSmall { size: 3, min: 4 })
        );
        assert_eq!(
            load_section(&mut src, 0, 4, types::METRICS_TAG, Marker::Metrics).map(|d| d.len()),
            Ok(4)
        );
    }

    #[test]
    fn section_past_end_of_source() {
        let mut src: &[u8] = b"xxGSET\0\0";
        assert_eq!(
            load_section(&mut src, 2, 40, types::METRICS_TAG, Marker::Metrics),
            Err(ReadError::Truncated {
                expected: 40,
                actual: 6
            })
        );
    }

    #[test]
    fn wrong_marker() {
        let mut src: &[u8] = b"GSET";
        assert_eq!(
            load_section(&mut src, 0, 4, types::KERNING_TAG, Marker::Kerning),
            Err(ReadError::BadMagic(Marker::Kerning))
        );
    }

    #[test]
    fn partial_records_are_ignored() {
        assert_eq!(record_count(4, 36), 0);
        assert_eq!(record_count(40, 36), 1);
        assert_eq!(record_count(75, 36), 1);
        assert_eq!(record_count(76, 36), 2);
    }
}
