//! Welcome banner for the terminal client: figlet title shaded from Richting
//! blue towards white, followed by a dimmed line with the upstream settings.

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Richting blue (#2563eb).
const RICHTING_BLUE: (u8, u8, u8) = (0x25, 0x63, 0xeb);
/// Share of white mixed into the last title row.
const MAX_TINT: f64 = 0.6;

/// Upstream settings shown under the title.
pub struct BannerInfo<'a> {
    pub model: &'a str,
    pub region: &'a str,
}

/// Colour of title row `row` out of `rows`: pure blue on top, tinted towards white below.
fn row_shade(row: usize, rows: usize) -> Color {
    let tint = if rows <= 1 {
        0.0
    } else {
        MAX_TINT * row as f64 / (rows - 1) as f64
    };
    let mix = |c: u8| (f64::from(c) + (255.0 - f64::from(c)) * tint).round() as u8;
    Color::Rgb {
        r: mix(RICHTING_BLUE.0),
        g: mix(RICHTING_BLUE.1),
        b: mix(RICHTING_BLUE.2),
    }
}

fn subtitle(info: &BannerInfo<'_>) -> String {
    format!(
        "Sales Analyse Tool v{} · model {} · regio {}",
        env!("CARGO_PKG_VERSION"),
        info.model,
        info.region
    )
}

/// Prints the banner in one flush. Falls back to a plain title if the figlet font cannot be loaded.
pub fn print_welcome(info: &BannerInfo<'_>) {
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("RICHTING").map(|f| f.to_string()))
        .unwrap_or_else(|| "RICHTING".to_string());
    let rows: Vec<&str> = art.lines().filter(|l| !l.trim().is_empty()).collect();

    let mut out = stdout().lock();
    for (i, row) in rows.iter().enumerate() {
        let _ = queue!(out, SetForegroundColor(row_shade(i, rows.len())), Print(row), Print("\n"));
    }
    let _ = queue!(
        out,
        ResetColor,
        SetAttribute(Attribute::Dim),
        Print(subtitle(info)),
        Print("\n\n"),
        SetAttribute(Attribute::Reset)
    );
    let _ = out.flush();
}
