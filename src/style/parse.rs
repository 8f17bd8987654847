//! The style mini-language.
//!
//! A definition is a whitespace-separated list of words:
//!
//! - an attribute name (`bold`, `i`, `underline2`, ...) turns it on
//! - `not <attribute>` turns it off
//! - a color sets the foreground
//! - `on <color>` sets the background
//! - `link <url>` attaches a hyperlink
//!
//! `none` and the empty string are the null style. Parsed styles are cached,
//! so the same definition always yields the same link id.

use super::{Attribute, Style, StyleSyntaxError};
use crate::cache::SharedCache;
use crate::color::Color;

static STYLE_CACHE: SharedCache<String, Result<Style, StyleSyntaxError>> = SharedCache::new(1024);

/// Parse a style definition such as `"bold red on blue"`.
pub fn parse_style(definition: &str) -> Result<Style, StyleSyntaxError> {
    STYLE_CACHE.get_or_insert_with(definition.to_string(), |d| parse_uncached(d))
}

fn parse_uncached(definition: &str) -> Result<Style, StyleSyntaxError> {
    let trimmed = definition.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(Style::null());
    }

    let mut style = Style::null();
    let mut words = trimmed.split_whitespace();
    while let Some(original) = words.next() {
        let word = original.to_lowercase();
        match word.as_str() {
            "on" => {
                let operand = words.next().ok_or_else(|| {
                    StyleSyntaxError::new(definition, original, "color expected after 'on'")
                })?;
                let color = Color::parse(operand).map_err(|e| {
                    StyleSyntaxError::new(
                        definition,
                        operand,
                        format!("unable to parse as background color; {}", e.reason),
                    )
                })?;
                style = style.bg(color);
            }
            "not" => {
                let operand = words.next().ok_or_else(|| {
                    StyleSyntaxError::new(definition, original, "attribute expected after 'not'")
                })?;
                let attribute = Attribute::from_name(&operand.to_lowercase()).ok_or_else(|| {
                    StyleSyntaxError::new(
                        definition,
                        operand,
                        "expected style attribute after 'not'",
                    )
                })?;
                style = style.attr(attribute, false);
            }
            "link" => {
                let url = words.next().ok_or_else(|| {
                    StyleSyntaxError::new(definition, original, "URL expected after 'link'")
                })?;
                style = style.link(url);
            }
            _ => {
                if let Some(attribute) = Attribute::from_name(&word) {
                    style = style.attr(attribute, true);
                } else {
                    let color = Color::parse(&word).map_err(|e| {
                        StyleSyntaxError::new(
                            definition,
                            original,
                            format!("unable to parse as color; {}", e.reason),
                        )
                    })?;
                    style = style.fg(color);
                }
            }
        }
    }
    Ok(style)
}
