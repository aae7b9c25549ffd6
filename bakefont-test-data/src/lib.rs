//! test data shared between the bakefont crates.

mod container;
mod le_buffer;

pub use container::{ContainerBuilder, FontDef, GlyphDef, ModeDef, TableDef};
pub use le_buffer::LeBuffer;

/// A container with two fonts, three modes and three glyph-set tables.
///
/// The 'Sans' font has a 16px antialiased mode with ascii digits and kerning,
/// and a 16px aliased mode with the same digits. 'Serif' has a 10.5px mode
/// with a single glyph and no kerning.
pub fn small_atlas() -> Vec<u8> {
    let mut sans_aa = TableDef::new(0, "digits");
    let mut sans = TableDef::new(1, "digits");
    for (i, cp) in ('0'..='9').enumerate() {
        let glyph = GlyphDef::new(cp as u32)
            .texture(i as u16 * 10, 0, 0)
            .size(9, 12, 1)
            .horizontal(0.5, 12.0, 9.0);
        sans_aa = sans_aa.glyph(glyph.clone());
        sans = sans.glyph(glyph);
    }
    sans_aa = sans_aa
        .kern('1' as u32, '1' as u32, -1.5)
        .kern('1' as u32, '7' as u32, -0.75)
        .kern('7' as u32, '4' as u32, -2.0);
    let ampersand = GlyphDef::new('&' as u32)
        .texture(100, 20, 0)
        .size(7, 10, 1)
        .horizontal(0.25, 10.0, 7.5)
        .vertical(-3.5, 1.0, 12.25);

    ContainerBuilder::new(128, 64, 1)
        .font(FontDef::new("Sans").horizontal(true))
        .font(FontDef::new("Serif").horizontal(true).vertical(true))
        .mode(ModeDef::new(0, 16.0).antialias(true).lineheight(19.0))
        .mode(ModeDef::new(0, 16.0).lineheight(19.0))
        .mode(ModeDef::new(1, 10.5).antialias(true).lineheight(12.25))
        .table(sans_aa)
        .table(sans)
        .table(TableDef::new(2, "ampersand").glyph(ampersand))
        .build()
}
