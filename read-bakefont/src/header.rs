//! The header block: atlas dimensions, fonts, modes and glyph-set tables

use alloc::vec::Vec;

use types::{F26Dot6, Magic, FONT_TAG, GLYPHSET_TABLE_TAG, MAGIC, MODE_TAG};

use crate::font_data::FontData;
use crate::layout::{
    HeaderLayout, COUNT_OFFSET, DIMENSIONS_OFFSET, FONT_MARKER_OFFSET, HEADER_SIZE_OFFSET,
    PREFIX_LEN,
};
use crate::read::{Marker, ReadError};
use crate::records::{self, FontRecord, GlyphsetTableRecord, ModeRecord};
use crate::source::{read_exact_at, ByteSource};

/// Summary information about an atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtlasInfo {
    pub width: u16,
    pub height: u16,
    /// The number of channels in the atlas texture.
    pub depth: u16,
    pub font_count: u16,
    pub mode_count: u16,
    pub table_count: u16,
}

/// The pixel format implied by an atlas depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Depth {
    Greyscale,
    Rgb,
    Rgba,
}

impl Depth {
    pub fn channels(self) -> u16 {
        match self {
            Depth::Greyscale => 1,
            Depth::Rgb => 3,
            Depth::Rgba => 4,
        }
    }
}

impl AtlasInfo {
    /// The pixel format, or `None` if `depth` is not 1, 3 or 4.
    pub fn depth_kind(&self) -> Option<Depth> {
        match self.depth {
            1 => Some(Depth::Greyscale),
            3 => Some(Depth::Rgb),
            4 => Some(Depth::Rgba),
            _ => None,
        }
    }
}

/// Check the revision tag and return the size of the header block.
///
/// Only the first 20 bytes of `source` are read.
pub fn peek<S: ByteSource + ?Sized>(source: &mut S) -> Result<usize, ReadError> {
    let mut prefix = [0u8; PREFIX_LEN];
    let actual = source.read_at(0, &mut prefix);
    if actual < PREFIX_LEN {
        return Err(ReadError::Truncated {
            expected: PREFIX_LEN,
            actual,
        });
    }
    parse_prefix(FontData::new(&prefix))
}

fn parse_prefix(data: FontData) -> Result<usize, ReadError> {
    if data.len() < PREFIX_LEN {
        return Err(ReadError::Truncated {
            expected: PREFIX_LEN,
            actual: data.len(),
        });
    }
    if data.read_at::<Magic>(0)? != MAGIC {
        return Err(ReadError::BadMagic(Marker::Magic));
    }
    Ok(data.read_at::<u16>(HEADER_SIZE_OFFSET)? as usize)
}

/// Read a value from the header block, reporting a short block as truncated.
fn read_header<T: types::Scalar + types::FixedSize>(
    data: FontData,
    offset: usize,
) -> Result<T, ReadError> {
    data.read_at(offset).map_err(|_| ReadError::Truncated {
        expected: offset + T::RAW_BYTE_LEN,
        actual: data.len(),
    })
}

fn expect_marker(
    data: FontData,
    offset: usize,
    tag: types::Tag,
    marker: Marker,
) -> Result<(), ReadError> {
    if read_header::<types::Tag>(data, offset)? != tag {
        return Err(ReadError::BadMagic(marker));
    }
    Ok(())
}

/// Validate a header block, returning the atlas summary and section layout.
fn parse(data: FontData) -> Result<(AtlasInfo, HeaderLayout), ReadError> {
    let declared = parse_prefix(data)?;
    // nothing past the declared size is part of the header block
    let data = data.slice(..declared).ok_or(ReadError::Truncated {
        expected: declared,
        actual: data.len(),
    })?;

    let width = read_header(data, DIMENSIONS_OFFSET)?;
    let height = read_header(data, DIMENSIONS_OFFSET + 2)?;
    let depth = read_header(data, DIMENSIONS_OFFSET + 4)?;

    expect_marker(data, FONT_MARKER_OFFSET, FONT_TAG, Marker::Fonts)?;
    let font_count = read_header(data, FONT_MARKER_OFFSET + COUNT_OFFSET)?;

    let mode_marker = HeaderLayout::mode_marker_offset(font_count);
    expect_marker(data, mode_marker, MODE_TAG, Marker::Modes)?;
    let mode_count = read_header(data, mode_marker + COUNT_OFFSET)?;

    let table_marker = HeaderLayout::table_marker_offset(font_count, mode_count);
    expect_marker(
        data,
        table_marker,
        GLYPHSET_TABLE_TAG,
        Marker::GlyphsetTables,
    )?;
    let table_count = read_header(data, table_marker + COUNT_OFFSET)?;

    let layout = HeaderLayout::new(font_count, mode_count, table_count);
    if layout.end() > declared {
        return Err(ReadError::Truncated {
            expected: layout.end(),
            actual: declared,
        });
    }

    let info = AtlasInfo {
        width,
        height,
        depth,
        font_count,
        mode_count,
        table_count,
    };
    Ok((info, layout))
}

/// A parsed header block.
///
/// This owns the raw bytes of the block; records are decoded from them on
/// demand.
#[derive(Clone, Debug)]
pub struct Header {
    data: Vec<u8>,
    info: AtlasInfo,
    layout: HeaderLayout,
}

impl Header {
    /// Read and parse `header_size` bytes from the start of `source`.
    ///
    /// `header_size` is normally the value returned by [`peek`].
    pub fn load<S: ByteSource + ?Sized>(
        source: &mut S,
        header_size: usize,
    ) -> Result<Header, ReadError> {
        let data = read_exact_at(source, 0, header_size)
            .inspect_err(|e| log::warn!("failed to read header block: {e}"))?;
        Self::from_bytes(data)
    }

    /// Peek at the header size, then load the whole header block.
    pub fn read<S: ByteSource + ?Sized>(source: &mut S) -> Result<Header, ReadError> {
        let header_size = peek(source)?;
        Self::load(source, header_size)
    }

    /// Parse a header block that is already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Header, ReadError> {
        let (info, layout) =
            parse(FontData::new(&data)).inspect_err(|e| log::warn!("header rejected: {e}"))?;
        log::debug!(
            "atlas {}x{}x{}: {} fonts, {} modes, {} tables",
            info.width,
            info.height,
            info.depth,
            info.font_count,
            info.mode_count,
            info.table_count
        );
        Ok(Header { data, info, layout })
    }

    pub fn info(&self) -> &AtlasInfo {
        &self.info
    }

    pub fn layout(&self) -> &HeaderLayout {
        &self.layout
    }

    /// The raw bytes of the header block.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn font_data(&self) -> FontData<'_> {
        FontData::new(&self.data)
    }

    pub fn font(&self, index: u16) -> Result<FontRecord<'_>, ReadError> {
        records::font_at(self.font_data(), &self.layout, index)
    }

    pub fn mode(&self, index: u16) -> Result<ModeRecord, ReadError> {
        records::mode_at(self.font_data(), &self.layout, index)
    }

    pub fn table(&self, index: u16) -> Result<GlyphsetTableRecord<'_>, ReadError> {
        records::table_at(self.font_data(), &self.layout, index)
    }

    pub fn fonts(&self) -> impl Iterator<Item = FontRecord<'_>> + '_ {
        (0..self.info.font_count).filter_map(|i| self.font(i).ok())
    }

    pub fn modes(&self) -> impl Iterator<Item = ModeRecord> + '_ {
        (0..self.info.mode_count).filter_map(|i| self.mode(i).ok())
    }

    pub fn tables(&self) -> impl Iterator<Item = GlyphsetTableRecord<'_>> + '_ {
        (0..self.info.table_count).filter_map(|i| self.table(i).ok())
    }

    /// The first font with this name.
    pub fn font_by_name(&self, name: &str) -> Option<FontRecord<'_>> {
        self.fonts().find(|font| font.name == name)
    }

    /// The first mode of `font_id` with this size and antialiasing.
    pub fn find_mode(&self, font_id: u16, size: F26Dot6, antialias: bool) -> Option<ModeRecord> {
        self.modes().find(|mode| {
            mode.font_id == font_id && mode.size == size && mode.antialias == antialias
        })
    }

    /// The first glyph-set table for `mode_id` with this name.
    pub fn find_table(&self, mode_id: u16, name: &str) -> Option<GlyphsetTableRecord<'_>> {
        self.tables()
            .find(|table| table.mode_id == mode_id && table.name == name)
    }

    /// The font a mode renders.
    pub fn font_for_mode(&self, mode: &ModeRecord) -> Result<FontRecord<'_>, ReadError> {
        self.font(mode.font_id)
    }
}
