//! CSS-style colour strings used in tool options.

use bevy::color::{Color, Srgba};

use crate::constants::CONTRAST_LUMINANCE_THRESHOLD;

/// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
/// `rgba(r, g, b, a)` and a handful of names into a colour.
pub fn parse_color(input: &str) -> Option<Color> {
    let input = input.trim();

    if input.starts_with('#') {
        return Srgba::hex(input).ok().map(Color::from);
    }

    let lower = input.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args);
    }

    match lower.as_str() {
        "transparent" => Some(Color::NONE),
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "red" => Some(Color::srgb_u8(255, 0, 0)),
        "green" => Some(Color::srgb_u8(0, 128, 0)),
        "blue" => Some(Color::srgb_u8(0, 0, 255)),
        _ => None,
    }
}

/// Parse a colour option, falling back when the string is malformed.
pub fn color_or(input: &str, fallback: Color) -> Color {
    parse_color(input).unwrap_or(fallback)
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |s: &str| -> Option<f32> {
        let v: f32 = s.parse().ok()?;
        Some(v.clamp(0.0, 255.0) / 255.0)
    };
    let alpha = match parts.get(3) {
        Some(a) => a.parse::<f32>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };
    Some(Color::srgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

/// Perceived luminance of a colour on a 0-255 scale
pub fn luminance(color: Color) -> f32 {
    let c = color.to_srgba();
    (0.299 * c.red + 0.587 * c.green + 0.114 * c.blue) * 255.0
}

/// Black on light backgrounds, white on dark ones.
pub fn contrast_color(background: Color) -> Color {
    if luminance(background) > CONTRAST_LUMINANCE_THRESHOLD {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// Format a colour back into the `rgba()` form used in exports
pub fn to_css(color: Color) -> String {
    let c = color.to_srgba();
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        byte(c.red),
        byte(c.green),
        byte(c.blue),
        (c.alpha * 100.0).round() / 100.0
    )
}
