//! Label chip colors: pick a readable foreground for an arbitrary
//! background using the YIQ brightness formula.

/// Fallback chip color for labels with a malformed hex color.
pub const FALLBACK_BACKGROUND: &str = "#d4d4d4";

const DARK_TEXT: &str = "#111";
const LIGHT_TEXT: &str = "white";

/// Resolved chip colors: `(background, foreground)`, both CSS-ready.
pub fn chip_colors(hex: &str) -> (String, &'static str) {
    match parse_hex(hex) {
        Some((r, g, b)) => {
            let foreground = if yiq(r, g, b) >= 128.0 { DARK_TEXT } else { LIGHT_TEXT };
            (format!("#{}", hex.trim_start_matches('#').to_lowercase()), foreground)
        }
        None => (FALLBACK_BACKGROUND.to_string(), DARK_TEXT),
    }
}

/// Perceived brightness, 0..=255.
fn yiq(r: u8, g: u8, b: u8) -> f64 {
    (f64::from(r) * 299.0 + f64::from(g) * 587.0 + f64::from(b) * 114.0) / 1000.0
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
