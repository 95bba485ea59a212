/// Swatch palette and hex color parsing
///
/// The palette is the fixed set of wall colors offered to the user. The hex
/// strings are sent to the backend verbatim; parsing them into `iced::Color`
/// is only needed to paint the swatch buttons.

use iced::Color;

/// The selectable wall colors, in display order.
pub const PALETTE: [&str; 10] = [
    "#1E90FF",
    "#FF6347",
    "#32CD32",
    "#FFD700",
    "#FF69B4",
    "#8A2BE2",
    "#7FFF00",
    "#DC143C",
    "#00CED1",
    "#FF4500",
];

/// Parse a `#RRGGBB` hex string into an iced color.
///
/// Returns `None` for anything that is not exactly `#` followed by six hex
/// digits.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;

    Some(Color::from_rgb8(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_hex() {
        let color = parse_hex("#1E90FF").expect("dodger blue should parse");
        assert!((color.r - 0x1E as f32 / 255.0).abs() < 1e-6);
        assert!((color.g - 0x90 as f32 / 255.0).abs() < 1e-6);
        assert!((color.b - 0xFF as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_hex("1E90FF").is_none());
        assert!(parse_hex("#1E90F").is_none());
        assert!(parse_hex("#1E90FF00").is_none());
        assert!(parse_hex("#GGGGGG").is_none());
        assert!(parse_hex("").is_none());
    }

    #[test]
    fn test_palette_entries_all_parse() {
        assert_eq!(PALETTE.len(), 10);
        for hex in PALETTE {
            assert!(parse_hex(hex).is_some(), "palette entry {} must parse", hex);
        }
    }
}
