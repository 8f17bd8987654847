//! ANSI escape code conversion utilities.
//!
//! Converts styles to the parameter list of an SGR (`CSI ... m`) sequence.

use super::{Attribute, Style};
use crate::color::{Color, ColorSystem};

/// Append SGR parameters for a color, downgraded to `system`.
///
/// # Arguments
/// * `color` - The color to convert
/// * `foreground` - Select the foreground (`true`) or background parameters
/// * `system` - The color system of the output sink
/// * `buf` - The output buffer to append to, `;`-separated
///
/// # Returns
/// `true` if parameters were appended
pub fn push_color_codes(color: &Color, foreground: bool, system: ColorSystem, buf: &mut String) -> bool {
    let codes = color.downgrade(system).get_ansi_codes(foreground);
    for code in &codes {
        if !buf.is_empty() {
            buf.push(';');
        }
        buf.push_str(code);
    }
    !codes.is_empty()
}

/// Append SGR parameters for every attribute the style sets.
///
/// Attributes set on emit their enabling code, attributes set off emit their
/// disabling code, and unset attributes emit nothing.
///
/// # Arguments
/// * `style` - The style to convert
/// * `buf` - The output buffer to append to, `;`-separated
pub fn push_attribute_codes(style: &Style, buf: &mut String) {
    for attribute in Attribute::ALL {
        let code = match style.get(attribute) {
            Some(true) => attribute.sgr_on(),
            Some(false) => attribute.sgr_off(),
            None => continue,
        };
        if !buf.is_empty() {
            buf.push(';');
        }
        buf.push_str(code);
    }
}

/// Build the `;`-separated SGR parameters for a style.
///
/// Returns an empty string for a style that sets nothing.
pub fn make_ansi_codes(style: &Style, system: ColorSystem) -> String {
    let mut buf = String::new();
    push_attribute_codes(style, &mut buf);
    if let Some(color) = style.color() {
        push_color_codes(color, true, system, &mut buf);
    }
    if let Some(bgcolor) = style.bgcolor() {
        push_color_codes(bgcolor, false, system, &mut buf);
    }
    buf
}
