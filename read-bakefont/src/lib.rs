//! Reading bakefont3 atlas containers
//!
//! A container holds a pre-rendered glyph texture atlas along with everything
//! needed to lay out text with it: the fonts and sizes ("modes") that were
//! rendered, and for each glyph set, the texture location and metrics of each
//! codepoint plus a table of kerning pairs.
//!
//! Reading happens in stages. [`peek`] checks the revision tag and reports
//! how large the header block is; [`Header::load`] reads and validates that
//! block; the records it describes are then decoded on demand. Metrics and
//! kerning for a glyph set are loaded separately, with
//! [`MetricTable::load`] and [`KerningTable::load`], from the offsets in its
//! [`GlyphsetTableRecord`].
//!
//! All data is read through a [`ByteSource`], which is implemented for byte
//! slices and vectors and, with the `std` feature, for any seekable reader
//! via [`IoSource`].
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use read_bakefont::{Header, IoSource, KerningTable, MetricTable};
//!
//! let file = std::fs::File::open("atlas.bf3")?;
//! let mut source = IoSource::new(file);
//! let header = Header::read(&mut source)?;
//! let table = header.tables().next().ok_or("no glyph sets")?;
//! let metrics = MetricTable::load(&mut source, &table)?;
//! let kerning = KerningTable::load(&mut source, &table)?;
//!
//! if let Some(glyph) = metrics.lookup('A' as u32) {
//!     println!("'A' is at {},{} advancing {}", glyph.tex_x, glyph.tex_y, glyph.hadvance);
//! }
//! if let Some(pair) = kerning.lookup('A' as u32, 'V' as u32) {
//!     println!("kern AV by {}", pair.x);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

extern crate alloc;

mod font_data;
mod header;
pub mod layout;
mod read;
mod records;
mod search;
mod source;
pub mod tables;

pub use font_data::FontData;
pub use header::{peek, AtlasInfo, Depth, Header};
pub use read::{Marker, ReadError};
pub use records::{
    font_at, mode_at, table_at, CharIter, FontRecord, GlyphsetTableRecord, ModeRecord, NameString,
};
pub use source::ByteSource;
#[cfg(feature = "std")]
pub use source::IoSource;
pub use tables::kerning::{KerningPair, KerningTable};
pub use tables::metrics::{Channel, GlyphMetric, MetricTable};

/// Public re-export of the bakefont-types crate.
pub extern crate bakefont_types as types;
