use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::math::Vector3;

/// A color reference: either a name from the renderer's fixed color table,
/// or an explicit RGB triple with components nominally in [0.0, 1.0].
///
/// Wire form: `"white"`, `"sky_blue"`, ... or `{"rgb": [r, g, b]}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Black,
    White,
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
    Azure,
    Orange,
    Gray,
    Brightorange,
    DarkGreen,
    SkyBlue,
    Brown,
    DarkBrown,
    CornflowerBlue,
    Rgb(Vector3),
}

impl Color {
    /// Every named color, in table order.
    pub const NAMED: [Color; 17] = [
        Color::Black,
        Color::White,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Cyan,
        Color::Magenta,
        Color::Yellow,
        Color::Azure,
        Color::Orange,
        Color::Gray,
        Color::Brightorange,
        Color::DarkGreen,
        Color::SkyBlue,
        Color::Brown,
        Color::DarkBrown,
        Color::CornflowerBlue,
    ];

    /// Create an explicit RGB color.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color::Rgb(Vector3::new(r, g, b))
    }

    /// Resolve the color to its RGB components.
    pub fn to_rgb(&self) -> Vector3 {
        match *self {
            Color::Black => Vector3::new(0.0, 0.0, 0.0),
            Color::White => Vector3::new(1.0, 1.0, 1.0),
            Color::Red => Vector3::new(1.0, 0.0, 0.0),
            Color::Green => Vector3::new(0.0, 1.0, 0.0),
            Color::Blue => Vector3::new(0.0, 0.0, 1.0),
            Color::Cyan => Vector3::new(0.0, 1.0, 1.0),
            Color::Magenta => Vector3::new(1.0, 0.0, 1.0),
            Color::Yellow => Vector3::new(1.0, 1.0, 0.0),
            Color::Azure => Vector3::new(0.0, 0.5, 1.0),
            Color::Orange => Vector3::new(1.0, 0.5, 0.0),
            Color::Gray => Vector3::new(0.5, 0.5, 0.5),
            Color::Brightorange => Vector3::new(1.0, 0.8, 0.0),
            Color::DarkGreen => Vector3::new(0.0, 0.5, 0.0),
            Color::SkyBlue => Vector3::new(0.530, 0.808, 0.922),
            Color::Brown => Vector3::new(0.596, 0.463, 0.329),
            Color::DarkBrown => Vector3::new(0.396, 0.263, 0.129),
            Color::CornflowerBlue => Vector3::new(0.392, 0.584, 0.929),
            Color::Rgb(v) => v,
        }
    }

    /// Convert to an 8-bit RGB triple, rounding and clamping each channel.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let v = self.to_rgb();
        let channel = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(v.x), channel(v.y), channel(v.z)]
    }

    pub fn is_named(&self) -> bool {
        !matches!(self, Color::Rgb(_))
    }

    pub fn is_finite(&self) -> bool {
        self.to_rgb().is_finite()
    }

    /// The wire name of a named color. `None` for explicit RGB.
    pub fn name(&self) -> Option<&'static str> {
        Some(match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Cyan => "cyan",
            Color::Magenta => "magenta",
            Color::Yellow => "yellow",
            Color::Azure => "azure",
            Color::Orange => "orange",
            Color::Gray => "gray",
            Color::Brightorange => "brightorange",
            Color::DarkGreen => "dark_green",
            Color::SkyBlue => "sky_blue",
            Color::Brown => "brown",
            Color::DarkBrown => "dark_brown",
            Color::CornflowerBlue => "cornflower_blue",
            Color::Rgb(_) => return None,
        })
    }

    /// Parse a hex string (`"#FF8800"` or `"FF8800"`) into an explicit RGB color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorError::InvalidHex);
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map(|c| c as f64 / 255.0)
                .map_err(|_| ColorError::InvalidHex)
        };
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Accepts table names case-insensitively (`"SkyBlue"`, `"sky-blue"`,
    /// `"sky_blue"`) and `#RRGGBB` hex strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return Color::from_hex(s);
        }
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        Color::NAMED
            .iter()
            .copied()
            .find(|c| c.name().map(|n| n.replace('_', "")) == Some(key.clone()))
            .ok_or_else(|| ColorError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => {
                let [r, g, b] = self.to_rgb8();
                write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color string")]
    InvalidHex,
    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_wire_form() {
        assert_eq!(serde_json::to_string(&Color::White).unwrap(), "\"white\"");
        assert_eq!(
            serde_json::to_string(&Color::CornflowerBlue).unwrap(),
            "\"cornflower_blue\""
        );
        let c: Color = serde_json::from_str("\"dark_green\"").unwrap();
        assert_eq!(c, Color::DarkGreen);
    }

    #[test]
    fn test_rgb_wire_form() {
        let json = serde_json::to_string(&Color::rgb(0.25, 0.5, 1.0)).unwrap();
        assert_eq!(json, r#"{"rgb":[0.25,0.5,1.0]}"#);
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(0.25, 0.5, 1.0));
    }

    #[test]
    fn test_unknown_name_rejected_on_wire() {
        assert!(serde_json::from_str::<Color>("\"chartreuse\"").is_err());
        assert!(serde_json::from_str::<Color>("\"White\"").is_err());
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!("SkyBlue".parse::<Color>().unwrap(), Color::SkyBlue);
        assert_eq!("sky-blue".parse::<Color>().unwrap(), Color::SkyBlue);
        assert_eq!("GRAY".parse::<Color>().unwrap(), Color::Gray);
        assert!("chartreuse".parse::<Color>().is_err());
    }

    #[test]
    fn test_from_hex() {
        let c: Color = "#FF8000".parse().unwrap();
        assert_eq!(c.to_rgb8(), [255, 128, 0]);
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("#FFF").is_err());
    }

    #[test]
    fn test_table_resolution() {
        assert_eq!(Color::Gray.to_rgb(), Vector3::new(0.5, 0.5, 0.5));
        assert_eq!(Color::White.to_rgb8(), [255, 255, 255]);
        assert_eq!(Color::default(), Color::Black);
    }

    #[test]
    fn test_display_round_trips_names() {
        for c in Color::NAMED {
            assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
        }
        assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_string(), "#FF0000");
    }
}
