#![no_main]
use libfuzzer_sys::fuzz_target;

use read_bakefont::{Header, KerningTable, MetricTable};

fuzz_target!(|data: &[u8]| {
    let mut source = data;
    let Ok(header) = Header::read(&mut source) else {
        return;
    };
    let _ = header.fonts().count();
    let _ = header.modes().count();
    for table in header.tables() {
        if let Ok(metrics) = MetricTable::load(&mut source, &table) {
            let _ = metrics.validate();
            for glyph in metrics.iter().take(16) {
                let _ = metrics.lookup(glyph.codepoint);
            }
        }
        if let Ok(kerning) = KerningTable::load(&mut source, &table) {
            let _ = kerning.validate();
            for pair in kerning.iter().take(16) {
                let _ = kerning.lookup(pair.left, pair.right);
            }
        }
    }
});
