//! Glyph metrics: the `GSET` section

use alloc::vec::Vec;

use types::{F26Dot6, FixedSize, LittleEndian, METRICS_TAG};

use super::{load_section, record_count, SECTION_TAG_LEN};
use crate::font_data::FontData;
use crate::read::{Marker, ReadError};
use crate::records::GlyphsetTableRecord;
use crate::search::{self, SortedRecord};
use crate::source::ByteSource;

#[derive(Copy, Clone, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
struct RawGlyphMetric {
    codepoint: LittleEndian<u32>,
    tex_x: LittleEndian<u16>,
    tex_y: LittleEndian<u16>,
    tex_z: u8,
    tex_w: u8,
    tex_h: u8,
    tex_d: u8,
    hbx: LittleEndian<F26Dot6>,
    hby: LittleEndian<F26Dot6>,
    hadvance: LittleEndian<F26Dot6>,
    vbx: LittleEndian<F26Dot6>,
    vby: LittleEndian<F26Dot6>,
    vadvance: LittleEndian<F26Dot6>,
}

impl FixedSize for RawGlyphMetric {
    const RAW_BYTE_LEN: usize = core::mem::size_of::<Self>();
}

const _: () = assert!(RawGlyphMetric::RAW_BYTE_LEN == 36);

impl SortedRecord for RawGlyphMetric {
    type Key = u32;

    fn key(&self) -> u32 {
        self.codepoint.get()
    }
}

impl RawGlyphMetric {
    fn decode(&self) -> GlyphMetric {
        GlyphMetric {
            codepoint: self.codepoint.get(),
            tex_x: self.tex_x.get(),
            tex_y: self.tex_y.get(),
            tex_z: self.tex_z,
            tex_w: self.tex_w,
            tex_h: self.tex_h,
            tex_d: self.tex_d,
            hbx: self.hbx.get(),
            hby: self.hby.get(),
            hadvance: self.hadvance.get(),
            vbx: self.vbx.get(),
            vby: self.vby.get(),
            vadvance: self.vadvance.get(),
        }
    }
}

/// The texture location and layout metrics of one glyph.
///
/// The bitmap occupies `tex_w * tex_h` pixels at (`tex_x`, `tex_y`) in
/// channel `tex_z` of the atlas, and spans `tex_d` channels. Bearings and
/// advances are in pixels, for horizontal (`h*`) and vertical (`v*`) layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphMetric {
    pub codepoint: u32,
    pub tex_x: u16,
    pub tex_y: u16,
    pub tex_z: u8,
    pub tex_w: u8,
    pub tex_h: u8,
    pub tex_d: u8,
    pub hbx: F26Dot6,
    pub hby: F26Dot6,
    pub hadvance: F26Dot6,
    pub vbx: F26Dot6,
    pub vby: F26Dot6,
    pub vadvance: F26Dot6,
}

/// The atlas channel a glyph bitmap starts in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl GlyphMetric {
    /// `false` for glyphs that have metrics but nothing to draw, such as space.
    pub fn has_bitmap(&self) -> bool {
        self.tex_d != 0
    }

    pub fn channel(&self) -> Option<Channel> {
        match self.tex_z {
            0 => Some(Channel::Red),
            1 => Some(Channel::Green),
            2 => Some(Channel::Blue),
            3 => Some(Channel::Alpha),
            _ => None,
        }
    }
}

/// The glyph metrics of one glyph-set table, sorted by codepoint.
#[derive(Clone, Debug)]
pub struct MetricTable {
    data: Vec<u8>,
    len: usize,
}

impl MetricTable {
    /// Read the metrics section described by `table` from `source`.
    pub fn load<S: ByteSource + ?Sized>(
        source: &mut S,
        table: &GlyphsetTableRecord,
    ) -> Result<Self, ReadError> {
        let data = load_section(
            source,
            table.metrics_offset,
            table.metrics_size,
            METRICS_TAG,
            Marker::Metrics,
        )
        .inspect_err(|e| log::warn!("metrics for table {} rejected: {e}", table.table_id))?;
        let result = Self::from_section(data);
        log::debug!("table {}: {} glyph metrics", table.table_id, result.len());
        Ok(result)
    }

    /// Parse a metrics section that is already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, ReadError> {
        let size = u32::try_from(data.len()).unwrap_or(u32::MAX);
        if size < SECTION_TAG_LEN {
            return Err(ReadError::SizeTooSmall {
                size,
                min: SECTION_TAG_LEN,
            });
        }
        FontData::new(&data).expect_tag(0, METRICS_TAG, Marker::Metrics)?;
        Ok(Self::from_section(data))
    }

    fn from_section(data: Vec<u8>) -> Self {
        let len = record_count(data.len(), RawGlyphMetric::RAW_BYTE_LEN);
        MetricTable { data, len }
    }

    fn records(&self) -> &[RawGlyphMetric] {
        let start = SECTION_TAG_LEN as usize;
        FontData::new(&self.data)
            .read_array(start..start + self.len * RawGlyphMetric::RAW_BYTE_LEN)
            .unwrap_or_default()
    }

    /// The number of glyphs in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Find the metrics for `codepoint`.
    ///
    /// This is a binary search, and assumes the records are sorted; see
    /// [`validate`](Self::validate).
    pub fn lookup(&self, codepoint: u32) -> Option<GlyphMetric> {
        search::find(self.records(), codepoint).map(RawGlyphMetric::decode)
    }

    /// Iterate over all glyphs, in the order they are stored.
    pub fn iter(&self) -> impl Iterator<Item = GlyphMetric> + '_ {
        self.records().iter().map(RawGlyphMetric::decode)
    }

    /// Check that codepoints are strictly ascending.
    pub fn validate(&self) -> Result<(), ReadError> {
        match search::first_unsorted(self.records()) {
            Some(index) => Err(ReadError::Unsorted { index }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use bakefont_test_data::{ContainerBuilder, FontDef, GlyphDef, ModeDef, TableDef};
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    use super::*;
    use crate::header::Header;

    fn build(table: TableDef) -> Vec<u8> {
        ContainerBuilder::new(256, 256, 4)
            .font(FontDef::new("Sans").horizontal(true))
            .mode(ModeDef::new(0, 12.0))
            .table(table)
            .build()
    }

    fn load(bytes: &[u8]) -> Result<MetricTable, ReadError> {
        let mut source = bytes;
        let header = Header::read(&mut source)?;
        let table = header.table(0)?;
        MetricTable::load(&mut source, &table)
    }

    #[test]
    fn lookup_decodes_every_field() {
        let bytes = build(
            TableDef::new(0, "a")
                .glyph(GlyphDef::new(0x20).horizontal(0.0, 0.0, 3.5))
                .glyph(
                    GlyphDef::new(0x41)
                        .texture(300, 17, 2)
                        .size(8, 11, 1)
                        .horizontal(0.5, 11.0, 8.25)
                        .vertical(-4.0, 1.5, 13.0),
                ),
        );
        let table = load(&bytes).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup(0x41),
            Some(GlyphMetric {
                codepoint: 0x41,
                tex_x: 300,
                tex_y: 17,
                tex_z: 2,
                tex_w: 8,
                tex_h: 11,
                tex_d: 1,
                hbx: F26Dot6::from_f32(0.5),
                hby: F26Dot6::from_f32(11.0),
                hadvance: F26Dot6::from_f32(8.25),
                vbx: F26Dot6::from_f32(-4.0),
                vby: F26Dot6::from_f32(1.5),
                vadvance: F26Dot6::from_f32(13.0),
            })
        );
        let space = table.lookup(0x20).unwrap();
        assert!(!space.has_bitmap());
        assert_eq!(space.hadvance.to_f32(), 3.5);
        assert_eq!(table.lookup(0x41).unwrap().channel(), Some(Channel::Blue));
        assert_eq!(table.lookup(0x42), None);
    }

    #[test]
    fn empty_section() {
        let table = load(&build(TableDef::new(0, "empty"))).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.lookup(0), None);
        assert_eq!(table.lookup(u32::MAX), None);
        assert_eq!(table.iter().count(), 0);
        assert_eq!(table.validate(), Ok(()));
    }

    #[test]
    fn single_record() {
        let table = load(&build(TableDef::new(0, "one").glyph(GlyphDef::new(7)))).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(7).map(|g| g.codepoint), Some(7));
        assert_eq!(table.lookup(6), None);
        assert_eq!(table.lookup(8), None);
    }

    #[test]
    fn every_stored_codepoint_is_found() {
        let mut rng = StdRng::seed_from_u64(0xba4e);
        let mut codepoints: Vec<u32> = (0..100).map(|_| rng.gen_range(0..0x11_0000)).collect();
        codepoints.sort_unstable();
        codepoints.dedup();
        let mut table = TableDef::new(0, "random");
        for cp in &codepoints {
            table = table.glyph(GlyphDef::new(*cp).texture((*cp % 1000) as u16, 0, 0));
        }
        let table = load(&build(table)).unwrap();
        assert_eq!(table.len(), codepoints.len());
        assert_eq!(table.validate(), Ok(()));
        for cp in &codepoints {
            let glyph = table.lookup(*cp).unwrap();
            assert_eq!(glyph.codepoint, *cp);
            assert_eq!(glyph.tex_x, (*cp % 1000) as u16);
        }
        for _ in 0..100 {
            let cp = rng.gen_range(0..0x11_0000);
            assert_eq!(
                table.lookup(cp).is_some(),
                codepoints.binary_search(&cp).is_ok()
            );
        }
    }

    #[test]
    fn unsorted_records_are_reported() {
        let mut codepoints: Vec<u32> = (1..=20).collect();
        codepoints.shuffle(&mut StdRng::seed_from_u64(7));
        let mut table = TableDef::new(0, "shuffled");
        for cp in &codepoints {
            table = table.glyph(GlyphDef::new(*cp));
        }
        let table = load(&build(table)).unwrap();
        assert!(matches!(table.validate(), Err(ReadError::Unsorted { .. })));
        // lookups on unsorted data may miss, but never panic
        for cp in 0..=21 {
            let _ = table.lookup(cp);
        }

        let dupes = TableDef::new(0, "dupes")
            .glyph(GlyphDef::new(1))
            .glyph(GlyphDef::new(1));
        let table = load(&build(dupes)).unwrap();
        assert_eq!(table.validate(), Err(ReadError::Unsorted { index: 1 }));
    }

    #[test]
    fn size_below_marker() {
        let bytes = build(TableDef::new(0, "bad").metrics_size(3));
        assert_eq!(
            load(&bytes).unwrap_err(),
            ReadError::SizeTooSmall { size: 3, min: 4 }
        );
    }

    #[test]
    fn size_past_end_of_file() {
        let bytes = build(
            TableDef::new(0, "bad")
                .glyph(GlyphDef::new(1))
                .metrics_size(1000),
        );
        assert!(matches!(
            load(&bytes),
            Err(ReadError::Truncated { expected: 1000, .. })
        ));
    }

    #[test]
    fn bad_marker() {
        let mut bytes = build(TableDef::new(0, "a").glyph(GlyphDef::new(1)));
        let header_len = bytes.len() - 40 - 4;
        bytes[header_len..header_len + 4].copy_from_slice(b"GSEX");
        assert_eq!(
            load(&bytes).unwrap_err(),
            ReadError::BadMagic(Marker::Metrics)
        );
    }

    #[test]
    fn trailing_partial_record() {
        let mut section = METRICS_TAG.into_bytes().to_vec();
        section.extend([0u8; 36 + 20]);
        let table = MetricTable::from_bytes(section).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(0).map(|g| g.codepoint), Some(0));
    }

    #[test]
    fn from_bytes_checks_framing() {
        assert_eq!(
            MetricTable::from_bytes(b"GS".to_vec()).unwrap_err(),
            ReadError::SizeTooSmall { size: 2, min: 4 }
        );
        assert_eq!(
            MetricTable::from_bytes(b"KERN".to_vec()).unwrap_err(),
            ReadError::BadMagic(Marker::Metrics)
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn glyph_metric_json() {
        let glyph = GlyphMetric {
            codepoint: 0x263a,
            tex_x: 12,
            tex_w: 9,
            tex_d: 1,
            hadvance: F26Dot6::from_f32(10.25),
            ..Default::default()
        };
        let json = serde_json::to_string(&glyph).unwrap();
        assert!(json.contains(r#""hadvance":656"#), "{json}");
        let back: GlyphMetric = serde_json::from_str(&json).unwrap();
        assert_eq!(back, glyph);
    }
}
