//! Fixed-size records in the header block

use core::fmt::{Debug, Display, Formatter};

use types::{F26Dot6, FixedSize, LittleEndian};

use crate::font_data::FontData;
use crate::layout::{HeaderLayout, FONT_RECORD_LEN, MODE_RECORD_LEN, TABLE_RECORD_LEN};
use crate::read::ReadError;

#[derive(Copy, Clone, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
struct RawFontRecord {
    horizontal: u8,
    vertical: u8,
    _reserved: [u8; 2],
    name: [u8; 44],
}

#[derive(Copy, Clone, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
struct RawModeRecord {
    font_id: LittleEndian<u16>,
    antialias: u8,
    _reserved: u8,
    size: LittleEndian<F26Dot6>,
    lineheight: LittleEndian<F26Dot6>,
    underline_position: LittleEndian<F26Dot6>,
    underline_thickness: LittleEndian<F26Dot6>,
    _padding: [u8; 12],
}

#[derive(Copy, Clone, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
struct RawTableRecord {
    mode_id: LittleEndian<u16>,
    _reserved: [u8; 2],
    metrics_offset: LittleEndian<u32>,
    metrics_size: LittleEndian<u32>,
    kerning_offset: LittleEndian<u32>,
    kerning_size: LittleEndian<u32>,
    name: [u8; 20],
}

impl FixedSize for RawFontRecord {
    const RAW_BYTE_LEN: usize = core::mem::size_of::<Self>();
}

impl FixedSize for RawModeRecord {
    const RAW_BYTE_LEN: usize = core::mem::size_of::<Self>();
}

impl FixedSize for RawTableRecord {
    const RAW_BYTE_LEN: usize = core::mem::size_of::<Self>();
}

const _: () = assert!(RawFontRecord::RAW_BYTE_LEN == FONT_RECORD_LEN);
const _: () = assert!(RawModeRecord::RAW_BYTE_LEN == MODE_RECORD_LEN);
const _: () = assert!(RawTableRecord::RAW_BYTE_LEN == TABLE_RECORD_LEN);

/// A font face that contributed glyphs to the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FontRecord<'a> {
    pub font_id: u16,
    /// The face has horizontal layout metrics.
    pub horizontal: bool,
    /// The face has vertical layout metrics.
    pub vertical: bool,
    pub name: NameString<'a>,
}

/// One rendering configuration of a font: a size plus antialiasing choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeRecord {
    pub mode_id: u16,
    pub font_id: u16,
    pub antialias: bool,
    pub size: F26Dot6,
    pub lineheight: F26Dot6,
    pub underline_position: F26Dot6,
    pub underline_thickness: F26Dot6,
}

/// The location of one mode's metrics and kerning sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GlyphsetTableRecord<'a> {
    pub table_id: u16,
    pub mode_id: u16,
    pub metrics_offset: u32,
    pub metrics_size: u32,
    pub kerning_offset: u32,
    pub kerning_size: u32,
    pub name: NameString<'a>,
}

/// Decode the font record at `index`.
pub fn font_at<'a>(
    data: FontData<'a>,
    layout: &HeaderLayout,
    index: u16,
) -> Result<FontRecord<'a>, ReadError> {
    let offset = layout.font_record_offset(index)?;
    let raw: &'a RawFontRecord = data.read_ref_at(offset)?;
    Ok(FontRecord {
        font_id: index,
        horizontal: raw.horizontal == b'H',
        vertical: raw.vertical == b'V',
        name: NameString::new(&raw.name),
    })
}

/// Decode the mode record at `index`.
pub fn mode_at(
    data: FontData<'_>,
    layout: &HeaderLayout,
    index: u16,
) -> Result<ModeRecord, ReadError> {
    let offset = layout.mode_record_offset(index)?;
    let raw: &RawModeRecord = data.read_ref_at(offset)?;
    Ok(ModeRecord {
        mode_id: index,
        font_id: raw.font_id.get(),
        antialias: raw.antialias == b'A',
        size: raw.size.get(),
        lineheight: raw.lineheight.get(),
        underline_position: raw.underline_position.get(),
        underline_thickness: raw.underline_thickness.get(),
    })
}

/// Decode the glyph-set table record at `index`.
pub fn table_at<'a>(
    data: FontData<'a>,
    layout: &HeaderLayout,
    index: u16,
) -> Result<GlyphsetTableRecord<'a>, ReadError> {
    let offset = layout.table_record_offset(index)?;
    let raw: &'a RawTableRecord = data.read_ref_at(offset)?;
    Ok(GlyphsetTableRecord {
        table_id: index,
        mode_id: raw.mode_id.get(),
        metrics_offset: raw.metrics_offset.get(),
        metrics_size: raw.metrics_size.get(),
        kerning_offset: raw.kerning_offset.get(),
        kerning_size: raw.kerning_size.get(),
        name: NameString::new(&raw.name),
    })
}

/// A name stored in a fixed-width field.
///
/// Names are Latin-1 and end at the first NUL; a name that fills its field
/// has no terminator.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameString<'a> {
    data: &'a [u8],
}

impl<'a> NameString<'a> {
    pub fn new(field: &'a [u8]) -> Self {
        let len = field.iter().position(|b| *b == 0).unwrap_or(field.len());
        NameString {
            data: &field[..len],
        }
    }

    /// The raw Latin-1 bytes, without any terminator.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// The length of the name, in bytes (and in chars)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn chars(&self) -> CharIter<'a> {
        CharIter {
            bytes: self.data.iter(),
        }
    }
}

/// An iterator over the chars of a [`NameString`].
#[derive(Clone)]
pub struct CharIter<'a> {
    bytes: core::slice::Iter<'a, u8>,
}

impl Iterator for CharIter<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        // every Latin-1 byte is the Unicode scalar of the same value
        self.bytes.next().map(|b| char::from(*b))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.bytes.size_hint()
    }
}

impl ExactSizeIterator for CharIter<'_> {}

impl PartialEq<str> for NameString<'_> {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl PartialEq<&str> for NameString<'_> {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Display for NameString<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for c in self.chars() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl Debug for NameString<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NameString<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
