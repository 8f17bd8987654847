//! Text styles: colors, attributes and hyperlinks.
//!
//! Each attribute is tri-valued (unset, on, off) and stored as two parallel
//! bitsets: `set_attributes` records which attributes have a value and
//! `attributes` holds that value. This makes [`Style::combine`] a pair of bit
//! operations: set bits in the overlay replace the base, unset bits pass the
//! base through.

mod ansi;
mod error;
mod parse;
mod stack;

pub use ansi::{make_ansi_codes, push_attribute_codes, push_color_codes};
pub use error::{StyleStackError, StyleSyntaxError};
pub use parse::parse_style;
pub use stack::StyleStack;

use std::fmt;
use std::ops::Add;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::color::{Color, ColorSystem};

static LINK_COUNTER: AtomicU64 = AtomicU64::new(1);

/// A boolean text attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    /// Fast blink.
    Blink2,
    Reverse,
    Conceal,
    Strike,
    /// Double underline.
    Underline2,
    Frame,
    Encircle,
    Overline,
}

impl Attribute {
    pub const ALL: [Attribute; 13] = [
        Attribute::Bold,
        Attribute::Dim,
        Attribute::Italic,
        Attribute::Underline,
        Attribute::Blink,
        Attribute::Blink2,
        Attribute::Reverse,
        Attribute::Conceal,
        Attribute::Strike,
        Attribute::Underline2,
        Attribute::Frame,
        Attribute::Encircle,
        Attribute::Overline,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Canonical name used in style definitions.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Dim => "dim",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Blink => "blink",
            Self::Blink2 => "blink2",
            Self::Reverse => "reverse",
            Self::Conceal => "conceal",
            Self::Strike => "strike",
            Self::Underline2 => "underline2",
            Self::Frame => "frame",
            Self::Encircle => "encircle",
            Self::Overline => "overline",
        }
    }

    /// Look up an attribute by name or short alias.
    pub fn from_name(name: &str) -> Option<Self> {
        let attribute = match name {
            "bold" | "b" => Self::Bold,
            "dim" | "d" => Self::Dim,
            "italic" | "i" => Self::Italic,
            "underline" | "u" => Self::Underline,
            "blink" => Self::Blink,
            "blink2" => Self::Blink2,
            "reverse" | "r" => Self::Reverse,
            "conceal" | "c" => Self::Conceal,
            "strike" | "s" => Self::Strike,
            "underline2" | "uu" => Self::Underline2,
            "frame" => Self::Frame,
            "encircle" => Self::Encircle,
            "overline" | "o" => Self::Overline,
            _ => return None,
        };
        Some(attribute)
    }

    /// SGR parameter that turns the attribute on.
    pub fn sgr_on(self) -> &'static str {
        match self {
            Self::Bold => "1",
            Self::Dim => "2",
            Self::Italic => "3",
            Self::Underline => "4",
            Self::Blink => "5",
            Self::Blink2 => "6",
            Self::Reverse => "7",
            Self::Conceal => "8",
            Self::Strike => "9",
            Self::Underline2 => "21",
            Self::Frame => "51",
            Self::Encircle => "52",
            Self::Overline => "53",
        }
    }

    /// SGR parameter that turns the attribute off.
    pub fn sgr_off(self) -> &'static str {
        match self {
            Self::Bold | Self::Dim => "22",
            Self::Italic => "23",
            Self::Underline | Self::Underline2 => "24",
            Self::Blink | Self::Blink2 => "25",
            Self::Reverse => "27",
            Self::Conceal => "28",
            Self::Strike => "29",
            Self::Frame | Self::Encircle => "54",
            Self::Overline => "55",
        }
    }
}

/// A hyperlink target with a session-unique id.
///
/// Terminals use the id to group the cells of one link that was split across
/// several escape sequences.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub url: String,
    pub id: String,
}

impl Link {
    pub fn new(url: impl Into<String>) -> Self {
        let id = LINK_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            url: url.into(),
            id: id.to_string(),
        }
    }
}

/// An immutable set of text attributes, colors and an optional hyperlink.
///
/// Styles never change in place; every modifier returns a new style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Style {
    color: Option<Color>,
    bgcolor: Option<Color>,
    attributes: u16,
    set_attributes: u16,
    link: Option<Link>,
}

impl Style {
    /// The empty style, which changes nothing when combined or rendered.
    pub fn null() -> Self {
        Self::default()
    }

    /// A style with only a foreground color.
    pub fn from_color(color: Color) -> Self {
        Self::null().fg(color)
    }

    /// Parse a style definition such as `"bold red on blue"`.
    pub fn parse(definition: &str) -> Result<Self, StyleSyntaxError> {
        parse::parse_style(definition)
    }

    /// Parse and re-serialize a definition, leaving invalid input untouched.
    pub fn normalize(definition: &str) -> String {
        match Self::parse(definition) {
            Ok(style) => style.to_string(),
            Err(_) => definition.trim().to_lowercase(),
        }
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self
    }

    /// Set an attribute on or off.
    pub fn attr(mut self, attribute: Attribute, on: bool) -> Self {
        let bit = attribute.bit();
        self.set_attributes |= bit;
        if on {
            self.attributes |= bit;
        } else {
            self.attributes &= !bit;
        }
        self
    }

    pub fn bold(self, on: bool) -> Self {
        self.attr(Attribute::Bold, on)
    }

    pub fn dim(self, on: bool) -> Self {
        self.attr(Attribute::Dim, on)
    }

    pub fn italic(self, on: bool) -> Self {
        self.attr(Attribute::Italic, on)
    }

    pub fn underline(self, on: bool) -> Self {
        self.attr(Attribute::Underline, on)
    }

    pub fn reverse(self, on: bool) -> Self {
        self.attr(Attribute::Reverse, on)
    }

    pub fn strike(self, on: bool) -> Self {
        self.attr(Attribute::Strike, on)
    }

    /// Attach a hyperlink. Each call allocates a fresh link id.
    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(Link::new(url));
        self
    }

    /// Value of an attribute: `None` when unset.
    pub fn get(&self, attribute: Attribute) -> Option<bool> {
        let bit = attribute.bit();
        if self.set_attributes & bit == 0 {
            None
        } else {
            Some(self.attributes & bit != 0)
        }
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn bgcolor(&self) -> Option<&Color> {
        self.bgcolor.as_ref()
    }

    pub fn get_link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    /// Check if the style has nothing set.
    pub fn is_null(&self) -> bool {
        self.color.is_none()
            && self.bgcolor.is_none()
            && self.set_attributes == 0
            && self.link.is_none()
    }

    /// Layer `overlay` on top of this style.
    ///
    /// Attributes the overlay sets (on or off) replace ours, unset ones keep
    /// ours. Colors and link are taken from the overlay when present.
    pub fn combine(&self, overlay: &Style) -> Style {
        if overlay.is_null() {
            return self.clone();
        }
        if self.is_null() {
            return overlay.clone();
        }
        Style {
            color: overlay.color.clone().or_else(|| self.color.clone()),
            bgcolor: overlay.bgcolor.clone().or_else(|| self.bgcolor.clone()),
            attributes: (self.attributes & !overlay.set_attributes)
                | (overlay.attributes & overlay.set_attributes),
            set_attributes: self.set_attributes | overlay.set_attributes,
            link: overlay.link.clone().or_else(|| self.link.clone()),
        }
    }

    /// Combine styles left to right.
    pub fn combine_all<'a>(styles: impl IntoIterator<Item = &'a Style>) -> Style {
        styles
            .into_iter()
            .fold(Style::null(), |acc, style| acc.combine(style))
    }

    /// Combine owned styles left to right.
    pub fn chain(styles: impl IntoIterator<Item = Style>) -> Style {
        styles
            .into_iter()
            .fold(Style::null(), |acc, style| acc.combine(&style))
    }

    /// A copy with foreground and background colors removed.
    pub fn without_color(&self) -> Style {
        Style {
            color: None,
            bgcolor: None,
            ..self.clone()
        }
    }

    /// A style with only this style's background color.
    pub fn background_style(&self) -> Style {
        Style {
            bgcolor: self.bgcolor.clone(),
            ..Style::null()
        }
    }

    /// A copy without the hyperlink.
    pub fn without_link(&self) -> Style {
        Style {
            link: None,
            ..self.clone()
        }
    }

    /// Wrap `text` in the escape sequences for this style.
    ///
    /// With no color system the text is returned as-is. An empty style
    /// adds no bytes.
    pub fn render(&self, text: &str, color_system: Option<ColorSystem>) -> String {
        let Some(system) = color_system else {
            return text.to_string();
        };
        if text.is_empty() {
            return String::new();
        }
        let codes = make_ansi_codes(self, system);
        let mut rendered = if codes.is_empty() {
            text.to_string()
        } else {
            format!("\x1b[{}m{}\x1b[0m", codes, text)
        };
        if let Some(link) = &self.link {
            rendered = format!(
                "\x1b]8;id={};{}\x1b\\{}\x1b]8;;\x1b\\",
                link.id, link.url, rendered
            );
        }
        rendered
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<String> = Vec::new();
        for attribute in Attribute::ALL {
            match self.get(attribute) {
                Some(true) => words.push(attribute.name().to_string()),
                Some(false) => words.push(format!("not {}", attribute.name())),
                None => {}
            }
        }
        if let Some(color) = &self.color {
            words.push(color.name().to_string());
        }
        if let Some(bgcolor) = &self.bgcolor {
            words.push(format!("on {}", bgcolor.name()));
        }
        if let Some(link) = &self.link {
            words.push(format!("link {}", link.url));
        }
        if words.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&words.join(" "))
        }
    }
}

impl std::str::FromStr for Style {
    type Err = StyleSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::parse(s)
    }
}

impl Add for Style {
    type Output = Style;

    fn add(self, rhs: Style) -> Style {
        self.combine(&rhs)
    }
}

impl Add<&Style> for &Style {
    type Output = Style;

    fn add(self, rhs: &Style) -> Style {
        self.combine(rhs)
    }
}

impl Add<Option<&Style>> for Style {
    type Output = Style;

    fn add(self, rhs: Option<&Style>) -> Style {
        match rhs {
            Some(style) => self.combine(style),
            None => self,
        }
    }
}
