//! Console markup: `[bold red]text[/bold red]`.
//!
//! A tag opens a style that stays in effect until a matching `[/name]` or an
//! implicit `[/]` closes it. Tags left open at the end of the markup close
//! there. A backslash before a tag makes it literal text.

mod error;

pub use error::MarkupError;

use std::fmt;

use crate::render::{Measurement, RenderOptions, Renderable, Segments};
use crate::style::Style;
use crate::text::Text;

/// A parsed `[name]` or `[name=parameters]` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub parameters: Option<String>,
}

impl Tag {
    fn parse(content: &str) -> Self {
        match content.split_once('=') {
            Some((name, parameters)) => Self {
                name: name.trim().to_string(),
                parameters: Some(parameters.trim().to_string()),
            },
            None => Self {
                name: content.trim().to_string(),
                parameters: None,
            },
        }
    }

    /// The tag as it would be written in markup.
    pub fn markup(&self) -> String {
        match &self.parameters {
            Some(parameters) => format!("[{}={}]", self.name, parameters),
            None => format!("[{}]", self.name),
        }
    }
}

impl fmt::Display for Tag {
    /// The style definition the tag stands for.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameters {
            Some(parameters) => write!(f, "{} {}", self.name, parameters),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Tag(Tag),
}

/// Byte length of the tag at the start of `text`, brackets included.
///
/// A tag starts with `[` followed by a lowercase letter, `#`, `/` or `@`,
/// and ends at the first `]` with no `[` in between.
fn tag_length(text: &str) -> Option<usize> {
    let mut chars = text.char_indices().skip(1);
    match chars.next() {
        Some((_, c)) if c.is_ascii_lowercase() || matches!(c, '#' | '/' | '@') => {}
        _ => return None,
    }
    for (index, c) in chars {
        match c {
            ']' => return Some(index + 1),
            '[' => return None,
            _ => {}
        }
    }
    None
}

/// Split markup into text and tags, each with its byte position.
fn tokenize(markup: &str) -> Vec<(usize, Piece)> {
    let mut pieces = Vec::new();
    let mut position = 0;
    let mut search = 0;
    let mut pending = String::new();
    let mut pending_start = 0;

    while let Some(found) = markup[search..].find('[') {
        let open = search + found;
        let Some(length) = tag_length(&markup[open..]) else {
            search = open + 1;
            continue;
        };
        let close = open + length;
        let backslashes = markup[position..open]
            .bytes()
            .rev()
            .take_while(|b| *b == b'\\')
            .count();
        pending.push_str(&markup[position..open - backslashes]);
        pending.extend(std::iter::repeat('\\').take(backslashes / 2));
        if backslashes % 2 == 1 {
            pending.push_str(&markup[open..close]);
        } else {
            if !pending.is_empty() {
                pieces.push((pending_start, Piece::Text(std::mem::take(&mut pending))));
            }
            pieces.push((open, Piece::Tag(Tag::parse(&markup[open + 1..close - 1]))));
            pending_start = close;
        }
        position = close;
        search = close;
    }
    pending.push_str(&markup[position..]);
    if !pending.is_empty() {
        pieces.push((pending_start, Piece::Text(pending)));
    }
    pieces
}

struct OpenTag {
    start: usize,
    order: usize,
    position: usize,
    tag: Tag,
}

/// Render markup into styled [`Text`].
///
/// # Errors
/// Returns [`MarkupError`] when a closing tag matches no open tag, or when a
/// tag is not a valid style definition.
pub fn parse_markup(markup: &str) -> Result<Text, MarkupError> {
    if !markup.contains('[') {
        return Ok(Text::new(markup));
    }

    let mut text = Text::new("");
    let mut stack: Vec<OpenTag> = Vec::new();
    let mut closed: Vec<(OpenTag, usize)> = Vec::new();
    let mut order = 0;

    for (position, piece) in tokenize(markup) {
        match piece {
            Piece::Text(plain) => text.append(&plain, None),
            Piece::Tag(tag) => match tag.name.strip_prefix('/') {
                Some(name) => {
                    let name = name.trim();
                    let open = if name.is_empty() {
                        stack.pop().ok_or_else(|| {
                            MarkupError::new(position, &tag.markup(), "closing tag has nothing to close")
                        })?
                    } else {
                        let normalized = Style::normalize(name);
                        let index = stack
                            .iter()
                            .rposition(|open| open.tag.name == normalized)
                            .ok_or_else(|| {
                                MarkupError::new(
                                    position,
                                    &tag.markup(),
                                    "closing tag doesn't match any open tag",
                                )
                            })?;
                        stack.remove(index)
                    };
                    closed.push((open, text.len()));
                }
                None => {
                    stack.push(OpenTag {
                        start: text.len(),
                        order,
                        position,
                        tag: Tag {
                            name: Style::normalize(&tag.name),
                            parameters: tag.parameters,
                        },
                    });
                    order += 1;
                }
            },
        }
    }

    let end = text.len();
    closed.extend(stack.into_iter().map(|open| (open, end)));
    closed.sort_by_key(|(open, _)| (open.start, open.order));

    for (open, end) in closed {
        let style = Style::parse(&open.tag.to_string()).map_err(|err| {
            MarkupError::new(open.position, &open.tag.markup(), format!("invalid style: {err}"))
        })?;
        text.stylize(style, open.start, end);
    }
    Ok(text)
}

/// Parsed markup, ready to place in a render tree.
///
/// Parsing happens up front so bad tags are reported to the caller instead of
/// surfacing halfway through a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    text: Text,
}

impl Markup {
    pub fn parse(markup: &str) -> Result<Self, MarkupError> {
        Ok(Self {
            text: parse_markup(markup)?,
        })
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn into_text(self) -> Text {
        self.text
    }
}

impl Renderable for Markup {
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a> {
        self.text.render(options)
    }

    fn measure(&self, options: &RenderOptions) -> Measurement {
        self.text.measure(options)
    }
}

/// Escape text so it renders literally when embedded in markup.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut position = 0;
    let mut search = 0;
    while let Some(found) = text[search..].find('[') {
        let open = search + found;
        search = open + 1;
        if tag_length(&text[open..]).is_none() {
            continue;
        }
        let backslashes = text[position..open]
            .bytes()
            .rev()
            .take_while(|b| *b == b'\\')
            .count();
        escaped.push_str(&text[position..open]);
        escaped.extend(std::iter::repeat('\\').take(backslashes + 1));
        position = open;
    }
    escaped.push_str(&text[position..]);
    if escaped.ends_with('\\') && !escaped.ends_with("\\\\") {
        escaped.push('\\');
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;
    use crate::text::Span;

    fn style(definition: &str) -> Style {
        Style::parse(definition).unwrap()
    }

    #[test]
    fn plain_text_has_no_spans() {
        let text = parse_markup("Hello, World").unwrap();
        assert_eq!(text.plain(), "Hello, World");
        assert!(text.spans().is_empty());
    }

    #[test]
    fn explicit_close() {
        let text = parse_markup("Hello [bold]World[/bold]!").unwrap();
        assert_eq!(text.plain(), "Hello World!");
        assert_eq!(text.spans(), &[Span::new(6, 11, style("bold"))]);
    }

    #[test]
    fn implicit_close_and_nesting() {
        let text = parse_markup("[red]a[b]b[/]c[/]d").unwrap();
        assert_eq!(text.plain(), "abcd");
        assert_eq!(
            text.spans(),
            &[Span::new(0, 3, style("red")), Span::new(1, 2, style("bold"))]
        );
    }

    #[test]
    fn close_matches_normalized_name() {
        let text = parse_markup("[b]x[/bold]").unwrap();
        assert_eq!(text.spans(), &[Span::new(0, 1, style("bold"))]);
    }

    #[test]
    fn inner_tag_layers_over_outer() {
        let text = parse_markup("[red][blue]x[/blue][/red]").unwrap();
        assert_eq!(text.get_style_at_offset(0), style("blue"));
    }

    #[test]
    fn unclosed_tags_close_at_end() {
        let text = parse_markup("[italic]abc").unwrap();
        assert_eq!(text.spans(), &[Span::new(0, 3, style("italic"))]);
    }

    #[test]
    fn link_tag_keeps_url() {
        let text = parse_markup("[link=https://example.com/Path]here[/link]").unwrap();
        let link = text.spans()[0].style.get_link().unwrap();
        assert_eq!(link.url, "https://example.com/Path");
    }

    #[test]
    fn mismatched_close_is_an_error() {
        let err = parse_markup("[bold]x[/italic]").unwrap_err();
        assert_eq!(err.position, 7);
        assert_eq!(err.tag, "[/italic]");
    }

    #[test]
    fn close_with_nothing_open_is_an_error() {
        let err = parse_markup("x[/]").unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.reason, "closing tag has nothing to close");
    }

    #[test]
    fn invalid_style_is_an_error() {
        let err = parse_markup("[nonsense]x").unwrap_err();
        assert_eq!(err.position, 0);
        assert!(err.reason.starts_with("invalid style"));
    }

    #[test]
    fn markup_rejects_bad_tags_up_front() {
        let err = Markup::parse("[bold]x[/red]").unwrap_err();
        assert_eq!(err.tag, "[/red]");

        let markup = Markup::parse("[bold]x[/bold] y").unwrap();
        let segments: Vec<_> = markup.render(&RenderOptions::new(80)).collect();
        assert_eq!(segments[0], Segment::styled("x", style("bold")));
        assert_eq!(markup.into_text().plain(), "x y");
    }

    #[test]
    fn non_tag_brackets_are_text() {
        let text = parse_markup("list[0] and [ spaced ]").unwrap();
        assert_eq!(text.plain(), "list[0] and [ spaced ]");
    }

    #[test]
    fn backslash_escapes_tag() {
        let text = parse_markup(r"\[bold]x").unwrap();
        assert_eq!(text.plain(), "[bold]x");
        assert!(text.spans().is_empty());

        let text = parse_markup(r"a\\[bold]x").unwrap();
        assert_eq!(text.plain(), r"a\x");
        assert_eq!(text.spans(), &[Span::new(2, 3, style("bold"))]);
    }

    #[test]
    fn escape_round_trips() {
        let test_cases = ["[bold]not bold[/]", r"path\[red]", "no tags [0]", r"trail\"];
        for input in test_cases {
            let escaped = escape(input);
            let text = parse_markup(&format!("{escaped}[bold]!")).unwrap();
            assert_eq!(text.plain(), format!("{input}!"), "Failed for {:?}", input);
        }
    }
}
