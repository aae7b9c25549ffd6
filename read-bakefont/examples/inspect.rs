//! Print the contents of a bakefont3 container.
//!
//! With no options this lists the fonts, modes and glyph-set tables in the
//! header. Passing `--text` lays out a string with one glyph set and prints
//! the position and texture location of each glyph.

use std::fs::File;

use read_bakefont::{
    types::F26Dot6, Header, IoSource, KerningTable, MetricTable, ModeRecord, ReadError,
};

fn main() -> Result<(), Error> {
    let args = match flags::Args::from_env() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let file = File::open(&args.input)
        .map_err(|e| Error(format!("could not open {}: {e}", args.input.display())))?;
    let mut source = IoSource::new(file);
    let header = Header::read(&mut source)?;
    print_header(&header);

    if let Some(text) = &args.text {
        let mode = choose_mode(&header, &args)?;
        let table_name = args.table.as_deref().unwrap_or("ALL");
        let table = header
            .find_table(mode.mode_id, table_name)
            .ok_or_else(|| Error(format!("no table '{table_name}' for mode {}", mode.mode_id)))?;
        let metrics = MetricTable::load(&mut source, &table)?;
        let kerning = KerningTable::load(&mut source, &table)?;
        if let Err(e) = metrics.validate().and_then(|_| kerning.validate()) {
            eprintln!("warning: {e}, lookups may be unreliable");
        }
        print_layout(&mode, &metrics, &kerning, text);
    }
    Ok(())
}

fn print_header(header: &Header) {
    let info = header.info();
    println!(
        "atlas {}x{}x{} ({} byte header)",
        info.width,
        info.height,
        info.depth,
        header.as_bytes().len()
    );
    for font in header.fonts() {
        let layouts = match (font.horizontal, font.vertical) {
            (true, true) => "horizontal, vertical",
            (true, false) => "horizontal",
            (false, true) => "vertical",
            (false, false) => "none",
        };
        println!("font {}: '{}' ({layouts})", font.font_id, font.name);
    }
    for mode in header.modes() {
        println!(
            "mode {}: font {} size {:.2}{} lineheight {:.2} underline {:.2}/{:.2}",
            mode.mode_id,
            mode.font_id,
            mode.size.to_f32(),
            if mode.antialias { " AA" } else { "" },
            mode.lineheight.to_f32(),
            mode.underline_position.to_f32(),
            mode.underline_thickness.to_f32(),
        );
    }
    for table in header.tables() {
        println!(
            "table {}: mode {} '{}' metrics {}+{} kerning {}+{}",
            table.table_id,
            table.mode_id,
            table.name,
            table.metrics_offset,
            table.metrics_size,
            table.kerning_offset,
            table.kerning_size,
        );
    }
}

fn choose_mode(header: &Header, args: &flags::Args) -> Result<ModeRecord, Error> {
    let font_name = args.font.as_deref().unwrap_or("Sans");
    let font = header
        .font_by_name(font_name)
        .ok_or_else(|| Error(format!("no font named '{font_name}'")))?;
    let size = F26Dot6::from_f32(args.size.unwrap_or(16.0));
    header
        .find_mode(font.font_id, size, !args.no_antialias)
        .ok_or_else(|| Error(format!("no mode for '{font_name}' at size {size}")))
}

fn print_layout(mode: &ModeRecord, metrics: &MetricTable, kerning: &KerningTable, text: &str) {
    let tolerance = F26Dot6::from_f32(0.1);
    let mut pen_x = 0;
    let mut previous = None;
    for c in text.chars() {
        let codepoint = c as u32;
        if let Some(pair) = previous.and_then(|left| kerning.lookup(left, codepoint)) {
            pen_x += pair.x;
        }
        previous = Some(codepoint);
        let Some(glyph) = metrics.lookup(codepoint) else {
            println!("{c:?}: missing");
            continue;
        };
        if glyph.has_bitmap() {
            println!(
                "{c:?}: draw at ({}, {}) from {:?} {}x{} at ({}, {})",
                pen_x + glyph.hbx.floor_to_i32(),
                mode.lineheight.round_to_i32() - glyph.hby.ceil_with_tolerance(tolerance),
                glyph.channel(),
                glyph.tex_w,
                glyph.tex_h,
                glyph.tex_x,
                glyph.tex_y,
            );
        } else {
            println!("{c:?}: blank");
        }
        pen_x += glyph.hadvance.round_to_i32();
    }
    println!("total advance {pen_x}px");
}

#[derive(Debug, Clone)]
struct Error(String);

impl From<ReadError> for Error {
    fn from(e: ReadError) -> Self {
        Self(e.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {}

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Print the fonts, modes and glyph sets in a container
        cmd args {
            /// The container to read
            required input: PathBuf
            /// Lay out this text and print each glyph
            optional --text text: String
            /// Font name to lay out with (default 'Sans')
            optional --font font: String
            /// Size in pixels (default 16)
            optional --size size: f32
            /// Glyph set name (default 'ALL')
            optional --table table: String
            /// Use the aliased mode instead of the antialiased one
            optional --no-antialias
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::Path;

    use super::*;

    fn parse(args: &[&str]) -> xflags::Result<flags::Args> {
        flags::Args::from_vec(args.iter().map(OsString::from).collect())
    }

    #[test]
    fn input_path_is_positional() {
        let args = parse(&["atlas.bf3"]).unwrap();
        assert_eq!(args.input, Path::new("atlas.bf3"));
        assert_eq!(args.text, None);
        assert!(!args.no_antialias);
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn layout_options() {
        let args = parse(&[
            "--font",
            "Serif",
            "atlas.bf3",
            "--size",
            "10.5",
            "--text",
            "&",
        ])
        .unwrap();
        assert_eq!(args.input, Path::new("atlas.bf3"));
        assert_eq!(args.text.as_deref(), Some("&"));
        assert_eq!(args.size, Some(10.5));

        let header = Header::from_bytes(bakefont_test_data::small_atlas()).unwrap();
        assert_eq!(choose_mode(&header, &args).unwrap().mode_id, 2);

        let aliased = parse(&["atlas.bf3", "--no-antialias"]).unwrap();
        assert_eq!(choose_mode(&header, &aliased).unwrap().mode_id, 1);
    }
}
