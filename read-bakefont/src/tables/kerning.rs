//! Kerning pairs: the `KERN` section

use alloc::vec::Vec;

use types::{F26Dot6, FixedSize, LittleEndian, KERNING_TAG};

use super::{load_section, record_count, SECTION_TAG_LEN};
use crate::font_data::FontData;
use crate::read::{Marker, ReadError};
use crate::records::GlyphsetTableRecord;
use crate::search::{self, SortedRecord};
use crate::source::ByteSource;

#[derive(Copy, Clone, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
struct RawKerningPair {
    left: LittleEndian<u32>,
    right: LittleEndian<u32>,
    x: LittleEndian<i32>,
    xf: LittleEndian<F26Dot6>,
}

impl FixedSize for RawKerningPair {
    const RAW_BYTE_LEN: usize = core::mem::size_of::<Self>();
}

const _: () = assert!(RawKerningPair::RAW_BYTE_LEN == 16);

impl SortedRecord for RawKerningPair {
    type Key = (u32, u32);

    fn key(&self) -> (u32, u32) {
        (self.left.get(), self.right.get())
    }
}

/// The horizontal adjustment between two adjacent codepoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KerningPair {
    pub left: u32,
    pub right: u32,
    /// The adjustment fitted to whole pixels.
    pub x: i32,
    /// The unfitted adjustment.
    pub xf: F26Dot6,
}

impl KerningPair {
    /// The unfitted adjustment, rounded to the nearest pixel.
    pub fn xf_nearest(&self) -> i32 {
        self.xf.round_to_i32()
    }
}

impl RawKerningPair {
    fn decode(&self) -> KerningPair {
        KerningPair {
            left: self.left.get(),
            right: self.right.get(),
            x: self.x.get(),
            xf: self.xf.get(),
        }
    }
}

/// The kerning pairs of one glyph-set table, sorted by `(left, right)`.
#[derive(Clone, Debug)]
pub struct KerningTable {
    data: Vec<u8>,
    len: usize,
}

impl KerningTable {
    /// Read the kerning section described by `table` from `source`.
    pub fn load<S: ByteSource + ?Sized>(
        source: &mut S,
        table: &GlyphsetTableRecord,
    ) -> Result<Self, ReadError> {
        let data = load_section(
            source,
            table.kerning_offset,
            table.kerning_size,
            KERNING_TAG,
            Marker::Kerning,
        )
        .inspect_err(|e| log::warn!("kerning for table {} rejected: {e}", table.table_id))?;
        let result = Self::from_section(data);
        log::debug!("table {}: {} kerning pairs", table.table_id, result.len());
        Ok(result)
    }

    /// Parse a kerning section that is already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, ReadError> {
        let size = u32::try_from(data.len()).unwrap_or(u32::MAX);
        if size < SECTION_TAG_LEN {
            return Err(ReadError::SizeTooSmall {
                size,
                min: SECTION_TAG_LEN,
            });
        }
        FontData::new(&data).expect_tag(0, KERNING_TAG, Marker::Kerning)?;
        Ok(Self::from_section(data))
    }

    fn from_section(data: Vec<u8>) -> Self {
        let len = record_count(data.len(), RawKerningPair::RAW_BYTE_LEN);
        KerningTable { data, len }
    }

    fn records(&self) -> &[RawKerningPair] {
        let start = SECTION_TAG_LEN as usize;
        FontData::new(&self.data)
            .read_array(start..start + self.len * RawKerningPair::RAW_BYTE_LEN)
            .unwrap_or_default()
    }

    /// The number of pairs in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Find the adjustment to apply between `left` and `right`.
    pub fn lookup(&self, left: u32, right: u32) -> Option<KerningPair> {
        search::find(self.records(), (left, right)).map(RawKerningPair::decode)
    }

    pub fn iter(&self) -> impl Iterator<Item = KerningPair> + '_ {
        self.records().iter().map(RawKerningPair::decode)
    }

    /// Check that pairs are strictly ascending by `left`, then `right`.
    pub fn validate(&self) -> Result<(), ReadError> {
        match search::first_unsorted(self.records()) {
            Some(index) => Err(ReadError::Unsorted { index }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use bakefont_test_data::{ContainerBuilder, FontDef, ModeDef, TableDef};
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::header::Header;

    fn load(table: TableDef) -> Result<KerningTable, ReadError> {
        let bytes = ContainerBuilder::new(64, 64, 1)
            .font(FontDef::new("Sans"))
            .mode(ModeDef::new(0, 9.0))
            .table(table)
            .build();
        let mut source = bytes.as_slice();
        let header = Header::read(&mut source)?;
        KerningTable::load(&mut source, &header.table(0)?)
    }

    #[test]
    fn two_key_lookup() {
        let table = load(
            TableDef::new(0, "k")
                .kern(10, 5, -1.25)
                .kern(10, 20, 0.5)
                .kern(30, 1, -3.0),
        )
        .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.validate(), Ok(()));
        assert_eq!(
            table.lookup(10, 20),
            Some(KerningPair {
                left: 10,
                right: 20,
                x: 1,
                xf: F26Dot6::from_f32(0.5),
            })
        );
        let pair = table.lookup(10, 5).unwrap();
        assert_eq!(pair.x, -1);
        assert_eq!(pair.xf_nearest(), -1);
        assert_eq!(pair.xf.to_f32(), -1.25);
        assert_eq!(table.lookup(30, 1).map(|p| p.x), Some(-3));
        assert_eq!(table.lookup(10, 6), None);
        assert_eq!(table.lookup(20, 5), None);
        assert_eq!(table.lookup(5, 10), None);
    }

    #[test]
    fn empty_section() {
        let table = load(TableDef::new(0, "none")).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.lookup(0, 0), None);
        assert_eq!(table.iter().next(), None);
    }

    #[test]
    fn random_pairs() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pairs: Vec<(u32, u32)> = (0..100)
            .map(|_| (rng.gen_range(32..64), rng.gen_range(32..128)))
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        let mut table = TableDef::new(0, "r");
        for (left, right) in &pairs {
            table = table.kern(*left, *right, (*left as f32 - *right as f32) / 16.0);
        }
        let table = load(table).unwrap();
        assert_eq!(table.len(), pairs.len());
        assert_eq!(table.validate(), Ok(()));
        for (left, right) in &pairs {
            let pair = table.lookup(*left, *right).unwrap();
            assert_eq!((pair.left, pair.right), (*left, *right));
        }
        for left in 32..64 {
            for right in 32..128 {
                assert_eq!(
                    table.lookup(left, right).is_some(),
                    pairs.binary_search(&(left, right)).is_ok()
                );
            }
        }
    }

    #[test]
    fn order_is_left_then_right() {
        let table = load(TableDef::new(0, "k").kern(10, 20, 1.0).kern(11, 5, 1.0)).unwrap();
        assert_eq!(table.validate(), Ok(()));

        let table = load(TableDef::new(0, "k").kern(11, 5, 1.0).kern(10, 20, 1.0)).unwrap();
        assert_eq!(table.validate(), Err(ReadError::Unsorted { index: 1 }));
    }

    #[test]
    fn framing_errors() {
        assert_eq!(
            load(TableDef::new(0, "k").kerning_size(0)).unwrap_err(),
            ReadError::SizeTooSmall { size: 0, min: 4 }
        );
        assert_eq!(
            load(TableDef::new(0, "k").kern(1, 2, 1.0).kerning_size(64)).unwrap_err(),
            ReadError::Truncated {
                expected: 64,
                actual: 20
            }
        );
        assert_eq!(
            KerningTable::from_bytes(b"GSET".to_vec()).unwrap_err(),
            ReadError::BadMagic(Marker::Kerning)
        );
    }
}
