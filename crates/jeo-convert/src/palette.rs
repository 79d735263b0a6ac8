//! The 255-entry exchange-format color palette.
//!
//! Indices 1..=9 are the classic primaries and 250..=255 the gray ramp;
//! 10..=249 are generated from a hue wheel (24 hues stepped 15 degrees
//! apart, five brightness levels, each in a full and a muted saturation
//! column). Several palette entries share an RGB value, so the reverse
//! lookup returns the lowest index with that value.

use jeo_format::Color;

use crate::ConvertError;

const PRIMARIES: [[u8; 3]; 9] = [
    [255, 0, 0],
    [255, 255, 0],
    [0, 255, 0],
    [0, 255, 255],
    [0, 0, 255],
    [255, 0, 255],
    [255, 255, 255],
    [128, 128, 128],
    [192, 192, 192],
];

const GRAYS: [[u8; 3]; 6] = [
    [51, 51, 51],
    [91, 91, 91],
    [132, 132, 132],
    [172, 172, 172],
    [213, 213, 213],
    [255, 255, 255],
];

/// Resolve a palette index to its RGB triple.
///
/// Fails with [`ConvertError::UnsupportedColor`] for indices outside
/// `1..=255` (0 means "inherit" in the exchange format and is not a color).
pub fn rgb_for_index(index: i64) -> Result<Color, ConvertError> {
    if !(1..=255).contains(&index) {
        return Err(ConvertError::UnsupportedColor(index));
    }
    Ok(Color::from(palette_rgb(index as u8)))
}

/// Find the lowest palette index whose RGB triple equals `color`, if any.
pub fn index_for_rgb(color: Color) -> Option<u8> {
    (1..=255).find(|&index| Color::from(palette_rgb(index)) == color)
}

fn palette_rgb(index: u8) -> [u8; 3] {
    match index {
        1..=9 => PRIMARIES[(index - 1) as usize],
        250..=255 => GRAYS[(index - 250) as usize],
        _ => {
            let offset = index - 10;
            let hue = f64::from(offset / 10) * 15.0;
            let shade = offset % 10;
            let value = [1.0, 0.65, 0.5, 0.35, 0.175][(shade / 2) as usize];
            let saturation = if shade % 2 == 1 { 0.5 } else { 1.0 };
            hsv_to_rgb(hue, saturation, value)
        }
    }
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [u8; 3] {
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let offset = value - chroma;
    let channel = |v: f64| ((v + offset) * 255.0).round() as u8;
    [channel(r), channel(g), channel(b)]
}
