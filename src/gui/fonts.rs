// src/gui/fonts.rs
//
// egui ships no CJK glyphs. Borrow one from the system if we can find it.

use std::{fs, sync::Arc};

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

const CJK_FONT_CANDIDATES: &[&str] = &[
    // Windows
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
    "C:\\Windows\\Fonts\\simsun.ttc",
    // macOS
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Medium.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    // Linux
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
];

/// Install the first readable CJK font as a fallback for both families.
/// Returns the path used, if any.
pub fn install_cjk_font(ctx: &egui::Context) -> Option<&'static str> {
    let (path, bytes) = CJK_FONT_CANDIDATES
        .iter()
        .find_map(|p| fs::read(p).ok().map(|b| (*p, b)))?;

    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert(s!("cjk"), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push(s!("cjk"));
    }
    ctx.set_fonts(fonts);

    logf!("Fonts: CJK fallback from {}", path);
    Some(path)
}
