//! Color utility functions shared across the editor.
//!
//! Groups store colors as `[r, g, b]` bytes while dialogs and config files
//! speak `#rrggbb`. This module converts between the two and holds the
//! palette offered when creating a group.

/// Default color offered for a new group (`#3b82f6`).
pub const DEFAULT_GROUP_COLOR: [u8; 3] = [0x3b, 0x82, 0xf6];

/// Preset swatches offered by the group creation dialog.
pub const PRESET_COLORS: [[u8; 3]; 12] = [
    [0xef, 0x44, 0x44],
    [0xf9, 0x73, 0x16],
    [0xea, 0xb3, 0x08],
    [0x22, 0xc5, 0x5e],
    [0x14, 0xb8, 0xa6],
    [0x3b, 0x82, 0xf6],
    [0x8b, 0x5c, 0xf6],
    [0xec, 0x48, 0x99],
    [0x64, 0x74, 0x8b],
    [0x0e, 0xa5, 0xe9],
    [0xa8, 0x55, 0xf7],
    [0x10, 0xb9, 0x81],
];

/// Parse a `#rrggbb` (or `rrggbb`) string into RGB bytes.
///
/// Returns None for anything that is not exactly six hex digits.
pub fn hex_to_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some([
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    ])
}

/// Format RGB bytes as a lowercase `#rrggbb` string.
pub fn rgb_to_hex(color: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Pick a preset color by index, wrapping around the palette.
pub fn preset_color(index: usize) -> [u8; 3] {
    PRESET_COLORS[index % PRESET_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#3b82f6"), Some([59, 130, 246]));
        assert_eq!(hex_to_rgb("EF4444"), Some([239, 68, 68]));
    }

    #[test]
    fn test_hex_to_rgb_rejects_garbage() {
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
        assert_eq!(hex_to_rgb(""), None);
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex([59, 130, 246]), "#3b82f6");
        assert_eq!(rgb_to_hex([0, 0, 0]), "#000000");
        assert_eq!(hex_to_rgb(&rgb_to_hex(DEFAULT_GROUP_COLOR)), Some(DEFAULT_GROUP_COLOR));
    }

    #[test]
    fn test_preset_color_wraps() {
        assert_eq!(preset_color(0), PRESET_COLORS[0]);
        assert_eq!(preset_color(12), PRESET_COLORS[0]);
        assert_eq!(preset_color(5), DEFAULT_GROUP_COLOR);
    }
}
