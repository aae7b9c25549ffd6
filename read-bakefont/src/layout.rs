//! Offsets of the sections in the header block.
//!
//! The header block is a sequence of variable length sections whose
//! positions depend on the record counts that precede them. Every offset
//! used by the reader is computed here.

use core::ops::Range;

use crate::read::ReadError;

/// The number of bytes needed to validate the revision tag and learn the
/// header size.
pub const PREFIX_LEN: usize = 20;
/// Offset of the declared header size.
pub const HEADER_SIZE_OFFSET: usize = 18;
/// Offset of the atlas dimensions (width, height, depth).
pub const DIMENSIONS_OFFSET: usize = 12;
/// Offset of the `FONT` marker.
pub const FONT_MARKER_OFFSET: usize = 24;

/// Size of a marker plus the record count that follows it.
pub const SECTION_HEADER_LEN: usize = 8;
/// Offset of the record count relative to its marker.
pub const COUNT_OFFSET: usize = 4;

pub const FONT_RECORD_LEN: usize = 48;
pub const MODE_RECORD_LEN: usize = 32;
pub const TABLE_RECORD_LEN: usize = 40;

/// The positions of the record arrays in the header block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderLayout {
    font_count: u16,
    mode_count: u16,
    table_count: u16,
    fonts: Range<usize>,
    modes: Range<usize>,
    tables: Range<usize>,
}

impl HeaderLayout {
    /// Offset of the `MODE` marker, given the number of fonts.
    pub const fn mode_marker_offset(font_count: u16) -> usize {
        FONT_MARKER_OFFSET + SECTION_HEADER_LEN + FONT_RECORD_LEN * font_count as usize
    }

    /// Offset of the `GTBL` marker, given the number of fonts and modes.
    pub const fn table_marker_offset(font_count: u16, mode_count: u16) -> usize {
        Self::mode_marker_offset(font_count)
            + SECTION_HEADER_LEN
            + MODE_RECORD_LEN * mode_count as usize
    }

    pub fn new(font_count: u16, mode_count: u16, table_count: u16) -> Self {
        let fonts_start = FONT_MARKER_OFFSET + SECTION_HEADER_LEN;
        let modes_start = Self::mode_marker_offset(font_count) + SECTION_HEADER_LEN;
        let tables_start = Self::table_marker_offset(font_count, mode_count) + SECTION_HEADER_LEN;
        HeaderLayout {
            font_count,
            mode_count,
            table_count,
            fonts: fonts_start..modes_start - SECTION_HEADER_LEN,
            modes: modes_start..tables_start - SECTION_HEADER_LEN,
            tables: tables_start..tables_start + TABLE_RECORD_LEN * table_count as usize,
        }
    }

    /// The number of bytes the header block occupies.
    pub fn end(&self) -> usize {
        self.tables.end
    }

    pub fn font_count(&self) -> u16 {
        self.font_count
    }

    pub fn mode_count(&self) -> u16 {
        self.mode_count
    }

    pub fn table_count(&self) -> u16 {
        self.table_count
    }

    /// The byte range of the font records.
    pub fn fonts(&self) -> Range<usize> {
        self.fonts.clone()
    }

    /// The byte range of the mode records.
    pub fn modes(&self) -> Range<usize> {
        self.modes.clone()
    }

    /// The byte range of the glyph-set table records.
    pub fn tables(&self) -> Range<usize> {
        self.tables.clone()
    }

    pub fn font_record_offset(&self, index: u16) -> Result<usize, ReadError> {
        record_offset(&self.fonts, FONT_RECORD_LEN, self.font_count, index)
    }

    pub fn mode_record_offset(&self, index: u16) -> Result<usize, ReadError> {
        record_offset(&self.modes, MODE_RECORD_LEN, self.mode_count, index)
    }

    pub fn table_record_offset(&self, index: u16) -> Result<usize, ReadError> {
        record_offset(&self.tables, TABLE_RECORD_LEN, self.table_count, index)
    }
}

fn record_offset(
    section: &Range<usize>,
    record_len: usize,
    count: u16,
    index: u16,
) -> Result<usize, ReadError> {
    if index >= count {
        return Err(ReadError::IndexOutOfRange { index, count });
    }
    Ok(section.start + record_len * index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_header() {
        let layout = HeaderLayout::new(0, 0, 0);
        assert_eq!(HeaderLayout::mode_marker_offset(0), 32);
        assert_eq!(HeaderLayout::table_marker_offset(0, 0), 40);
        assert_eq!(layout.fonts(), 32..32);
        assert_eq!(layout.modes(), 40..40);
        assert_eq!(layout.tables(), 48..48);
        assert_eq!(layout.end(), 48);
    }

    #[test]
    fn sections_follow_counts() {
        let layout = HeaderLayout::new(2, 3, 4);
        assert_eq!(layout.fonts(), 32..128);
        assert_eq!(HeaderLayout::mode_marker_offset(2), 128);
        assert_eq!(layout.modes(), 136..232);
        assert_eq!(HeaderLayout::table_marker_offset(2, 3), 232);
        assert_eq!(layout.tables(), 240..400);
        assert_eq!(layout.end(), 400);
    }

    #[test]
    fn record_offsets() {
        let layout = HeaderLayout::new(2, 3, 4);
        assert_eq!(layout.font_record_offset(1), Ok(80));
        assert_eq!(layout.mode_record_offset(2), Ok(200));
        assert_eq!(layout.table_record_offset(3), Ok(360));
        assert_eq!(
            layout.font_record_offset(2),
            Err(ReadError::IndexOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(
            HeaderLayout::new(0, 0, 0).table_record_offset(0),
            Err(ReadError::IndexOutOfRange { index: 0, count: 0 })
        );
    }

    #[test]
    fn largest_counts_do_not_overflow() {
        let layout = HeaderLayout::new(u16::MAX, u16::MAX, u16::MAX);
        let expected = 32 + 48 * 65535 + 8 + 32 * 65535 + 8 + 40 * 65535;
        assert_eq!(layout.end(), expected);
    }
}
