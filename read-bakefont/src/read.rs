//! Errors produced while reading a container

/// A structural boundary in a container.
///
/// Each boundary begins with a marker (the 12-byte revision tag for the file
/// header, a 4-byte tag for everything else) that is checked before any data
/// behind it is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// The `BAKEFONTv3r1` revision tag at the start of the file.
    Magic,
    /// The `FONT` section of the header block.
    Fonts,
    /// The `MODE` section of the header block.
    Modes,
    /// The `GTBL` section of the header block.
    GlyphsetTables,
    /// A `GSET` glyph metrics section.
    Metrics,
    /// A `KERN` kerning section.
    Kerning,
}

impl Marker {
    fn name(self) -> &'static str {
        match self {
            Marker::Magic => "file header",
            Marker::Fonts => "font table",
            Marker::Modes => "mode table",
            Marker::GlyphsetTables => "glyph-set table",
            Marker::Metrics => "metrics section",
            Marker::Kerning => "kerning section",
        }
    }
}

/// An error that occurs when reading a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// Fewer bytes were available than the format requires.
    Truncated { expected: usize, actual: usize },
    /// A marker did not match the expected tag.
    BadMagic(Marker),
    /// A declared section size is below its minimum framing size.
    SizeTooSmall { size: u32, min: u32 },
    /// A record index was not less than the declared record count.
    IndexOutOfRange { index: u16, count: u16 },
    /// An offset or range fell outside the available data.
    OutOfBounds,
    /// The record at `index` does not sort strictly after its predecessor.
    Unsorted { index: usize },
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadError::Truncated { expected, actual } => {
                write!(f, "Truncated input: needed {expected} bytes, got {actual}")
            }
            ReadError::BadMagic(marker) => write!(f, "Bad magic in {}", marker.name()),
            ReadError::SizeTooSmall { size, min } => {
                write!(f, "Section size {size} is smaller than the minimum {min}")
            }
            ReadError::IndexOutOfRange { index, count } => {
                write!(f, "Index {index} out of range for {count} records")
            }
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::Unsorted { index } => write!(f, "Record {index} is out of order"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReadError {}
