//! Building synthetic containers

use bakefont_types::{
    F26Dot6, Magic, FONT_TAG, GLYPHSET_TABLE_TAG, KERNING_TAG, MAGIC, METRICS_TAG, MODE_TAG,
};

use crate::LeBuffer;

const FONT_NAME_LEN: usize = 44;
const TABLE_NAME_LEN: usize = 20;
const GLYPH_RECORD_LEN: u32 = 36;
const KERNING_RECORD_LEN: u32 = 16;

/// Encode a string as Latin-1, replacing anything outside that range.
fn latin1(s: &str) -> Vec<u8> {
    s.chars().map(|c| u8::try_from(c).unwrap_or(b'?')).collect()
}

#[derive(Clone, Debug)]
pub struct FontDef {
    name: Vec<u8>,
    horizontal: bool,
    vertical: bool,
}

impl FontDef {
    pub fn new(name: &str) -> Self {
        Self::from_raw_name(&latin1(name))
    }

    /// Use these exact bytes for the name field.
    pub fn from_raw_name(name: &[u8]) -> Self {
        FontDef {
            name: name.to_vec(),
            horizontal: false,
            vertical: false,
        }
    }

    pub fn horizontal(mut self, flag: bool) -> Self {
        self.horizontal = flag;
        self
    }

    pub fn vertical(mut self, flag: bool) -> Self {
        self.vertical = flag;
        self
    }
}

#[derive(Clone, Debug)]
pub struct ModeDef {
    font_id: u16,
    antialias: bool,
    size: F26Dot6,
    lineheight: F26Dot6,
    underline_position: F26Dot6,
    underline_thickness: F26Dot6,
}

impl ModeDef {
    pub fn new(font_id: u16, size: f32) -> Self {
        ModeDef {
            font_id,
            antialias: false,
            size: F26Dot6::from_f32(size),
            lineheight: F26Dot6::ZERO,
            underline_position: F26Dot6::ZERO,
            underline_thickness: F26Dot6::ZERO,
        }
    }

    pub fn antialias(mut self, flag: bool) -> Self {
        self.antialias = flag;
        self
    }

    pub fn lineheight(mut self, value: f32) -> Self {
        self.lineheight = F26Dot6::from_f32(value);
        self
    }

    pub fn underline(mut self, position: f32, thickness: f32) -> Self {
        self.underline_position = F26Dot6::from_f32(position);
        self.underline_thickness = F26Dot6::from_f32(thickness);
        self
    }
}

/// One glyph metric record.
#[derive(Clone, Debug, Default)]
pub struct GlyphDef {
    codepoint: u32,
    tex_x: u16,
    tex_y: u16,
    tex_z: u8,
    tex_w: u8,
    tex_h: u8,
    tex_d: u8,
    hbx: F26Dot6,
    hby: F26Dot6,
    hadvance: F26Dot6,
    vbx: F26Dot6,
    vby: F26Dot6,
    vadvance: F26Dot6,
}

impl GlyphDef {
    pub fn new(codepoint: u32) -> Self {
        GlyphDef {
            codepoint,
            ..Default::default()
        }
    }

    pub fn texture(mut self, x: u16, y: u16, z: u8) -> Self {
        self.tex_x = x;
        self.tex_y = y;
        self.tex_z = z;
        self
    }

    pub fn size(mut self, w: u8, h: u8, d: u8) -> Self {
        self.tex_w = w;
        self.tex_h = h;
        self.tex_d = d;
        self
    }

    pub fn horizontal(mut self, bearing_x: f32, bearing_y: f32, advance: f32) -> Self {
        self.hbx = F26Dot6::from_f32(bearing_x);
        self.hby = F26Dot6::from_f32(bearing_y);
        self.hadvance = F26Dot6::from_f32(advance);
        self
    }

    pub fn vertical(mut self, bearing_x: f32, bearing_y: f32, advance: f32) -> Self {
        self.vbx = F26Dot6::from_f32(bearing_x);
        self.vby = F26Dot6::from_f32(bearing_y);
        self.vadvance = F26Dot6::from_f32(advance);
        self
    }

    fn write(&self, buf: LeBuffer) -> LeBuffer {
        buf.push(self.codepoint)
            .push(self.tex_x)
            .push(self.tex_y)
            .extend([self.tex_z, self.tex_w, self.tex_h, self.tex_d])
            .extend([self.hbx, self.hby, self.hadvance])
            .extend([self.vbx, self.vby, self.vadvance])
    }
}

/// A glyph-set table and the contents of its two sections.
///
/// Records are written in the order they are added, so unsorted sections can
/// be produced on purpose.
#[derive(Clone, Debug)]
pub struct TableDef {
    mode_id: u16,
    name: Vec<u8>,
    glyphs: Vec<GlyphDef>,
    kerning: Vec<(u32, u32, F26Dot6)>,
    metrics_size: Option<u32>,
    kerning_size: Option<u32>,
}

impl TableDef {
    pub fn new(mode_id: u16, name: &str) -> Self {
        TableDef {
            mode_id,
            name: latin1(name),
            glyphs: Vec::new(),
            kerning: Vec::new(),
            metrics_size: None,
            kerning_size: None,
        }
    }

    pub fn glyph(mut self, glyph: GlyphDef) -> Self {
        self.glyphs.push(glyph);
        self
    }

    pub fn kern(mut self, left: u32, right: u32, x: f32) -> Self {
        self.kerning.push((left, right, F26Dot6::from_f32(x)));
        self
    }

    /// Declare a metrics section size that differs from the data written.
    pub fn metrics_size(mut self, size: u32) -> Self {
        self.metrics_size = Some(size);
        self
    }

    /// Declare a kerning section size that differs from the data written.
    pub fn kerning_size(mut self, size: u32) -> Self {
        self.kerning_size = Some(size);
        self
    }

    fn metrics_len(&self) -> u32 {
        4 + GLYPH_RECORD_LEN * self.glyphs.len() as u32
    }

    fn kerning_len(&self) -> u32 {
        4 + KERNING_RECORD_LEN * self.kerning.len() as u32
    }
}

/// Builds a complete container: the header block followed by the metrics and
/// kerning sections of each table, in table order.
#[derive(Clone, Debug)]
pub struct ContainerBuilder {
    magic: Magic,
    width: u16,
    height: u16,
    depth: u16,
    header_size: Option<u16>,
    fonts: Vec<FontDef>,
    modes: Vec<ModeDef>,
    tables: Vec<TableDef>,
}

impl ContainerBuilder {
    pub fn new(width: u16, height: u16, depth: u16) -> Self {
        ContainerBuilder {
            magic: MAGIC,
            width,
            height,
            depth,
            header_size: None,
            fonts: Vec::new(),
            modes: Vec::new(),
            tables: Vec::new(),
        }
    }

    pub fn magic(mut self, magic: Magic) -> Self {
        self.magic = magic;
        self
    }

    /// Declare a header size other than the computed one.
    pub fn header_size(mut self, size: u16) -> Self {
        self.header_size = Some(size);
        self
    }

    pub fn font(mut self, font: FontDef) -> Self {
        self.fonts.push(font);
        self
    }

    pub fn mode(mut self, mode: ModeDef) -> Self {
        self.modes.push(mode);
        self
    }

    pub fn table(mut self, table: TableDef) -> Self {
        self.tables.push(table);
        self
    }

    /// The length of the header block.
    pub fn header_len(&self) -> usize {
        32 + 48 * self.fonts.len() + 8 + 32 * self.modes.len() + 8 + 40 * self.tables.len()
    }

    /// The offsets of the metrics and kerning sections of each table.
    pub fn section_offsets(&self) -> Vec<(u32, u32)> {
        let mut pos = self.header_len() as u32;
        self.tables
            .iter()
            .map(|table| {
                let metrics = pos;
                let kerning = metrics + table.metrics_len();
                pos = kerning + table.kerning_len();
                (metrics, kerning)
            })
            .collect()
    }

    /// Only the header block.
    pub fn build_header(&self) -> Vec<u8> {
        let mut bytes = self.build();
        bytes.truncate(self.header_len());
        bytes
    }

    pub fn build(&self) -> Vec<u8> {
        let header_size = self.header_size.unwrap_or(self.header_len() as u16);
        let mut buf = LeBuffer::new()
            .push(self.magic)
            .extend([self.width, self.height, self.depth, header_size])
            .extend([0u8; 4])
            .push(FONT_TAG)
            .push(self.fonts.len() as u16)
            .extend([0u8; 2]);
        for font in &self.fonts {
            buf = buf
                .push(if font.horizontal { b'H' } else { 0 })
                .push(if font.vertical { b'V' } else { 0 })
                .extend([0u8; 2])
                .push_field(&font.name, FONT_NAME_LEN);
        }

        buf = buf
            .push(MODE_TAG)
            .push(self.modes.len() as u16)
            .extend([0u8; 2]);
        for mode in &self.modes {
            buf = buf
                .push(mode.font_id)
                .push(if mode.antialias { b'A' } else { 0 })
                .push(0u8)
                .extend([
                    mode.size,
                    mode.lineheight,
                    mode.underline_position,
                    mode.underline_thickness,
                ])
                .extend([0u8; 12]);
        }

        buf = buf
            .push(GLYPHSET_TABLE_TAG)
            .push(self.tables.len() as u16)
            .extend([0u8; 2]);
        let offsets = self.section_offsets();
        for (table, (metrics_offset, kerning_offset)) in self.tables.iter().zip(&offsets) {
            buf = buf
                .push(table.mode_id)
                .extend([0u8; 2])
                .push(*metrics_offset)
                .push(table.metrics_size.unwrap_or(table.metrics_len()))
                .push(*kerning_offset)
                .push(table.kerning_size.unwrap_or(table.kerning_len()))
                .push_field(&table.name, TABLE_NAME_LEN);
        }
        assert_eq!(buf.len(), self.header_len());

        for table in &self.tables {
            buf = buf.push(METRICS_TAG);
            for glyph in &table.glyphs {
                buf = glyph.write(buf);
            }
            buf = buf.push(KERNING_TAG);
            for (left, right, x) in &table.kerning {
                buf = buf.push(*left).push(*right).push(x.round_to_i32()).push(*x);
            }
        }
        buf.into_vec()
    }
}
