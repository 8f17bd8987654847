//! Terminal colors.
//!
//! A [`Color`] is parsed from a definition (`"red"`, `"#ff8000"`,
//! `"rgb(10,20,30)"`, `"196"`, `"default"`) and knows which [`ColorSystem`]
//! it natively belongs to. Before emission it is downgraded to whatever the
//! output sink supports:
//!
//! - TrueColor → 256 colors: gray ramp for neutral colors, 6x6x6 cube otherwise
//! - anything → 16 colors: nearest entry in the target palette
//!
//! Parsing and downgrading are pure, so both are memoized in bounded caches.

mod error;
mod palette;
mod triplet;

pub use error::ColorParseError;
pub use palette::{Palette, EIGHT_BIT_PALETTE, STANDARD_PALETTE, WINDOWS_PALETTE};
pub use triplet::{blend_rgb, ColorTriplet};

use std::fmt;

use crate::cache::SharedCache;

static PARSE_CACHE: SharedCache<String, Result<Color, ColorParseError>> = SharedCache::new(1024);
static DOWNGRADE_CACHE: SharedCache<(Color, ColorSystem), Color> = SharedCache::new(1024);

/// The set of colors a terminal can display, ordered by capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorSystem {
    /// Legacy Windows console: 16 colors with their own palette.
    Windows,
    /// 16 ANSI colors.
    Standard,
    /// xterm 256 colors.
    EightBit,
    /// 24-bit RGB.
    TrueColor,
}

impl ColorSystem {
    /// Look up a color system by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "truecolor" => Some(Self::TrueColor),
            "256" | "eight_bit" => Some(Self::EightBit),
            "standard" => Some(Self::Standard),
            "windows" => Some(Self::Windows),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Standard => "standard",
            Self::EightBit => "256",
            Self::TrueColor => "truecolor",
        }
    }
}

/// How a color is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorType {
    /// The terminal's own default foreground or background.
    Default,
    /// One of the 16 ANSI colors.
    Standard(u8),
    /// An index into the 256-color palette.
    EightBit(u8),
    TrueColor(ColorTriplet),
    /// One of the 16 legacy Windows console colors.
    Windows(u8),
}

/// A terminal color together with the definition it was created from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    name: String,
    kind: ColorType,
}

const NAMED_COLORS: [(&str, u8); 18] = [
    ("black", 0),
    ("red", 1),
    ("green", 2),
    ("yellow", 3),
    ("blue", 4),
    ("magenta", 5),
    ("cyan", 6),
    ("white", 7),
    ("bright_black", 8),
    ("grey", 8),
    ("gray", 8),
    ("bright_red", 9),
    ("bright_green", 10),
    ("bright_yellow", 11),
    ("bright_blue", 12),
    ("bright_magenta", 13),
    ("bright_cyan", 14),
    ("bright_white", 15),
];

impl Color {
    pub fn new(name: impl Into<String>, kind: ColorType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The terminal's default color.
    pub fn default_color() -> Self {
        Self::new("default", ColorType::Default)
    }

    /// A color from its 0-255 terminal number.
    ///
    /// Numbers below 16 are standard colors; the rest index the 256-color palette.
    pub fn from_ansi(number: u8) -> Self {
        let kind = if number < 16 {
            ColorType::Standard(number)
        } else {
            ColorType::EightBit(number)
        };
        Self::new(format!("color({})", number), kind)
    }

    pub fn from_triplet(triplet: ColorTriplet) -> Self {
        Self::new(triplet.hex(), ColorType::TrueColor(triplet))
    }

    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_triplet(ColorTriplet::new(red, green, blue))
    }

    /// Parse a color definition.
    ///
    /// Accepts named colors, `#rrggbb`, `rgb(r,g,b)`, `color(n)`, a bare
    /// palette index `0..=255` and `default`. Case and surrounding
    /// whitespace are ignored. Out-of-range components are an error, never
    /// clamped.
    pub fn parse(definition: &str) -> Result<Self, ColorParseError> {
        PARSE_CACHE.get_or_insert_with(definition.to_string(), |d| parse_uncached(d))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColorType {
        self.kind
    }

    /// Palette number for standard, 256-color and Windows colors.
    pub fn number(&self) -> Option<u8> {
        match self.kind {
            ColorType::Standard(n) | ColorType::EightBit(n) | ColorType::Windows(n) => Some(n),
            ColorType::Default | ColorType::TrueColor(_) => None,
        }
    }

    pub fn triplet(&self) -> Option<ColorTriplet> {
        match self.kind {
            ColorType::TrueColor(triplet) => Some(triplet),
            _ => None,
        }
    }

    pub fn is_default(&self) -> bool {
        self.kind == ColorType::Default
    }

    /// Check if the terminal theme decides how this color looks.
    pub fn is_system_defined(&self) -> bool {
        matches!(self.kind, ColorType::Standard(_) | ColorType::Windows(_))
    }

    /// The color system this color natively belongs to.
    pub fn system(&self) -> ColorSystem {
        match self.kind {
            ColorType::Default | ColorType::Standard(_) => ColorSystem::Standard,
            ColorType::EightBit(_) => ColorSystem::EightBit,
            ColorType::TrueColor(_) => ColorSystem::TrueColor,
            ColorType::Windows(_) => ColorSystem::Windows,
        }
    }

    /// Resolve the color to RGB.
    ///
    /// The default color resolves to white in the foreground and black in the
    /// background.
    pub fn get_truecolor(&self, foreground: bool) -> ColorTriplet {
        let from_palette = |palette: Palette, n: u8| palette.get(usize::from(n)).unwrap_or_default();
        match self.kind {
            ColorType::TrueColor(triplet) => triplet,
            ColorType::EightBit(n) => from_palette(EIGHT_BIT_PALETTE, n),
            ColorType::Standard(n) => from_palette(STANDARD_PALETTE, n),
            ColorType::Windows(n) => from_palette(WINDOWS_PALETTE, n),
            ColorType::Default if foreground => ColorTriplet::new(255, 255, 255),
            ColorType::Default => ColorTriplet::new(0, 0, 0),
        }
    }

    /// SGR parameters selecting this color.
    pub fn get_ansi_codes(&self, foreground: bool) -> Vec<String> {
        match self.kind {
            ColorType::Default => vec![if foreground { "39" } else { "49" }.to_string()],
            ColorType::Standard(n) | ColorType::Windows(n) => {
                let n = u16::from(n);
                let code = match (n < 8, foreground) {
                    (true, true) => 30 + n,
                    (true, false) => 40 + n,
                    (false, true) => 90 + (n - 8),
                    (false, false) => 100 + (n - 8),
                };
                vec![code.to_string()]
            }
            ColorType::EightBit(n) => vec![
                if foreground { "38" } else { "48" }.to_string(),
                "5".to_string(),
                n.to_string(),
            ],
            ColorType::TrueColor(t) => vec![
                if foreground { "38" } else { "48" }.to_string(),
                "2".to_string(),
                t.red.to_string(),
                t.green.to_string(),
                t.blue.to_string(),
            ],
        }
    }

    /// Convert to a color the given system can display.
    ///
    /// Returns an unchanged copy when `system` is at least as capable as the
    /// color's own system.
    pub fn downgrade(&self, system: ColorSystem) -> Color {
        if self.is_default() || system >= self.system() {
            return self.clone();
        }
        DOWNGRADE_CACHE.get_or_insert_with((self.clone(), system), |(color, system)| {
            color.downgrade_uncached(*system)
        })
    }

    fn downgrade_uncached(&self, system: ColorSystem) -> Color {
        match system {
            ColorSystem::EightBit => match self.kind {
                ColorType::TrueColor(triplet) => {
                    Color::new(self.name.clone(), ColorType::EightBit(eight_bit_number(triplet)))
                }
                _ => self.clone(),
            },
            ColorSystem::Standard => {
                let number = match self.kind {
                    ColorType::TrueColor(triplet) => STANDARD_PALETTE.closest(triplet) as u8,
                    ColorType::EightBit(n) if n < 16 => n,
                    ColorType::EightBit(n) => {
                        STANDARD_PALETTE.closest(self.palette_triplet(n)) as u8
                    }
                    _ => return self.clone(),
                };
                Color::new(self.name.clone(), ColorType::Standard(number))
            }
            ColorSystem::Windows => {
                let number = match self.kind {
                    ColorType::TrueColor(triplet) => WINDOWS_PALETTE.closest(triplet) as u8,
                    ColorType::Standard(n) => n,
                    ColorType::EightBit(n) if n < 16 => n,
                    ColorType::EightBit(n) => WINDOWS_PALETTE.closest(self.palette_triplet(n)) as u8,
                    _ => return self.clone(),
                };
                Color::new(self.name.clone(), ColorType::Windows(number))
            }
            ColorSystem::TrueColor => self.clone(),
        }
    }

    fn palette_triplet(&self, n: u8) -> ColorTriplet {
        EIGHT_BIT_PALETTE.get(usize::from(n)).unwrap_or_default()
    }
}

/// Map an RGB triplet onto the 256-color palette.
///
/// Neutral grays use the 24-step ramp (232-255) with the extremes snapped to
/// cube black (16) and white (231); everything else maps each channel onto
/// the 6x6x6 cube.
fn eight_bit_number(triplet: ColorTriplet) -> u8 {
    let ColorTriplet { red, green, blue } = triplet;
    if red == green && green == blue {
        let gray = (f64::from(red) / 255.0 * 25.0).round() as u8;
        return match gray {
            0 => 16,
            25 => 231,
            _ => 231 + gray,
        };
    }
    let level = |channel: u8| (f64::from(channel) / 255.0 * 5.0).round() as u8;
    16 + 36 * level(red) + 6 * level(green) + level(blue)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

fn parse_uncached(definition: &str) -> Result<Color, ColorParseError> {
    let color = definition.trim().to_lowercase();
    if color.is_empty() {
        return Err(ColorParseError::new(definition, "empty color definition"));
    }

    if color == "default" {
        return Ok(Color::new(color, ColorType::Default));
    }

    if let Some((_, number)) = NAMED_COLORS.iter().find(|(name, _)| *name == color) {
        return Ok(Color::new(color.clone(), ColorType::Standard(*number)));
    }

    if let Some(hex) = color.strip_prefix('#') {
        let triplet = parse_hex(hex).ok_or_else(|| {
            ColorParseError::new(definition, "expected six hex digits after '#'")
        })?;
        return Ok(Color::new(color.clone(), ColorType::TrueColor(triplet)));
    }

    if let Some(inner) = color.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let components: Vec<&str> = inner.split(',').collect();
        if components.len() != 3 {
            return Err(ColorParseError::new(definition, "expected three components"));
        }
        let mut values = [0u8; 3];
        for (slot, component) in values.iter_mut().zip(components) {
            *slot = parse_component(component.trim()).map_err(|reason| {
                ColorParseError::new(definition, reason)
            })?;
        }
        let triplet = ColorTriplet::new(values[0], values[1], values[2]);
        return Ok(Color::new(color.clone(), ColorType::TrueColor(triplet)));
    }

    let number_text = color
        .strip_prefix("color(")
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(color.as_str());
    if !number_text.is_empty() && number_text.len() <= 3 && number_text.bytes().all(|b| b.is_ascii_digit()) {
        let number = parse_component(number_text)
            .map_err(|_| ColorParseError::new(definition, "palette index must be <= 255"))?;
        let kind = if number < 16 {
            ColorType::Standard(number)
        } else {
            ColorType::EightBit(number)
        };
        return Ok(Color::new(color.clone(), kind));
    }

    Err(ColorParseError::new(definition, "not a known color"))
}

fn parse_hex(hex: &str) -> Option<ColorTriplet> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(ColorTriplet::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn parse_component(text: &str) -> Result<u8, String> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{:?} is not a number", text));
    }
    let value: u32 = text
        .parse()
        .map_err(|_| format!("{:?} is out of range", text))?;
    u8::try_from(value).map_err(|_| format!("component {} must be <= 255", value))
}
