//! Common scalar data types used in bakefont3 atlas containers.
//!
//! All multi-byte numbers in a container are little-endian. Metric values are
//! stored as signed 26.6 fixed-point numbers, the same encoding FreeType uses
//! for its glyph metrics.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

mod fixed;
mod raw;
mod tag;


pub use fixed::F26Dot6;
pub use raw::{FixedSize, LittleEndian, Scalar};
pub use tag::{Magic, Tag};

/// The 12-byte revision tag at the start of every container this crate
/// understands: version 3, revision 1.
pub const MAGIC: Magic = Magic::new(b"BAKEFONTv3r1");

/// Marker preceding the font records.
pub const FONT_TAG: Tag = Tag::new(b"FONT");
/// Marker preceding the mode records.
pub const MODE_TAG: Tag = Tag::new(b"MODE");
/// Marker preceding the glyph-set table records.
pub const GLYPHSET_TABLE_TAG: Tag = Tag::new(b"GTBL");
/// Marker at the start of a glyph metrics section.
pub const METRICS_TAG: Tag = Tag::new(b"GSET");
/// Marker at the start of a kerning section.
pub const KERNING_TAG: Tag = Tag::new(b"KERN");
