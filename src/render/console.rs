//! The console: renders to segments and writes them to a sink.

use std::any::Any;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use super::{cast, ConsoleError, Measurement, RenderOptions, Renderable};
use crate::color::ColorSystem;
use crate::config::ConsoleConfig;
use crate::control::Control;
use crate::segment::{self, Segment};
use crate::style::Style;
use crate::text::Text;

/// Intercepts segments on their way to the sink.
///
/// Used by live displays to keep their region below printed output.
pub trait RenderHook: Send + Sync {
    fn process_segments(&self, segments: Vec<Segment>, options: &RenderOptions) -> Vec<Segment>;
}

/// Check if two handles point at the same hook instance.
pub fn same_hook(a: &Arc<dyn RenderHook>, b: &Arc<dyn RenderHook>) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

/// A console shared between threads.
pub type SharedConsole = Arc<Mutex<Console>>;

/// An in-memory sink whose contents can be read back.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer(Arc<Mutex<Vec<u8>>>);

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Take the contents, leaving the buffer empty.
    pub fn take(&self) -> String {
        let mut bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&std::mem::take(&mut *bytes)).into_owned()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Renders renderables and writes styled output to a sink.
///
/// On a non-terminal sink control segments are dropped and styles are not
/// emitted, so files receive plain text.
pub struct Console {
    sink: Box<dyn Write + Send>,
    color_system: Option<ColorSystem>,
    width: usize,
    height: usize,
    is_terminal: bool,
    encoding: String,
    no_color: bool,
    markup: bool,
    tab_size: usize,
    quiet: bool,
    hooks: Vec<Arc<dyn RenderHook>>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("color_system", &self.color_system)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("is_terminal", &self.is_terminal)
            .field("encoding", &self.encoding)
            .field("quiet", &self.quiet)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Console {
    /// A console writing to `sink`, 80x25, not a terminal, without color.
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            color_system: None,
            width: ConsoleConfig::DEFAULT_WIDTH,
            height: ConsoleConfig::DEFAULT_HEIGHT,
            is_terminal: false,
            encoding: "utf-8".to_string(),
            no_color: false,
            markup: true,
            tab_size: 8,
            quiet: false,
            hooks: Vec::new(),
        }
    }

    /// A console configured from `config`.
    ///
    /// `is_terminal` is the detected state of the sink; the configuration can
    /// override it.
    pub fn from_config(
        config: &ConsoleConfig,
        sink: impl Write + Send + 'static,
        is_terminal: bool,
    ) -> Self {
        let is_terminal = config.force_terminal.unwrap_or(is_terminal);
        let (width, height) = config.resolve_size();
        let mut console = Self::new(sink);
        console.color_system = config.color_system.resolve(is_terminal);
        console.width = width;
        console.height = height;
        console.is_terminal = is_terminal;
        console.encoding = config.encoding.clone();
        console.no_color = config.no_color;
        console.markup = config.markup;
        console.tab_size = config.tab_size;
        console
    }

    /// A console on stdout, configured from the environment.
    pub fn stdout() -> Self {
        let mut config = ConsoleConfig::default();
        config.apply_env();
        Self::from_config(&config, io::stdout(), atty::is(atty::Stream::Stdout))
    }

    pub fn with_color_system(mut self, color_system: Option<ColorSystem>) -> Self {
        self.color_system = color_system;
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_terminal(mut self, is_terminal: bool) -> Self {
        self.is_terminal = is_terminal;
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    pub fn with_markup(mut self, markup: bool) -> Self {
        self.markup = markup;
        self
    }

    pub fn color_system(&self) -> Option<ColorSystem> {
        self.color_system
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Check if a broken pipe has silenced the console.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Render options matching the console's current state.
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            size: (self.width, self.height),
            min_width: 1,
            max_width: self.width,
            max_height: self.height,
            height: None,
            is_terminal: self.is_terminal,
            encoding: self.encoding.clone(),
            justify: None,
            overflow: None,
            no_wrap: None,
            tab_size: self.tab_size,
        }
    }

    pub fn push_render_hook(&mut self, hook: Arc<dyn RenderHook>) {
        self.hooks.push(hook);
    }

    pub fn pop_render_hook(&mut self) -> Option<Arc<dyn RenderHook>> {
        self.hooks.pop()
    }

    /// Remove `hook` wherever it sits in the hook stack.
    ///
    /// Returns `false` if it was not installed.
    pub fn remove_render_hook(&mut self, hook: &Arc<dyn RenderHook>) -> bool {
        match self.hooks.iter().rposition(|installed| same_hook(installed, hook)) {
            Some(index) => {
                self.hooks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Render to segments with the console's options or `options`.
    pub fn render(&self, renderable: &dyn Renderable, options: Option<&RenderOptions>) -> Vec<Segment> {
        let options = options.cloned().unwrap_or_else(|| self.options());
        renderable.render(&options).collect()
    }

    /// Render to lines of exactly `options.max_width` cells when `pad` is set.
    ///
    /// With a fixed `options.height`, the result has exactly that many lines.
    pub fn render_lines(
        &self,
        renderable: &dyn Renderable,
        options: Option<&RenderOptions>,
        style: Option<&Style>,
        pad: bool,
        new_lines: bool,
    ) -> Vec<Vec<Segment>> {
        let options = options.cloned().unwrap_or_else(|| self.options());
        let segments = renderable.render(&options);
        let mut lines =
            segment::split_and_crop_lines(segments, options.max_width, style, pad, new_lines);
        if let Some(height) = options.height {
            lines.truncate(height);
            while lines.len() < height {
                let mut blank = vec![Segment::with_style(
                    " ".repeat(options.max_width),
                    style.cloned(),
                )];
                if new_lines {
                    blank.push(Segment::line());
                }
                lines.push(blank);
            }
        }
        lines
    }

    pub fn measure(&self, renderable: &dyn Renderable, options: Option<&RenderOptions>) -> Measurement {
        let options = options.cloned().unwrap_or_else(|| self.options());
        Measurement::get(renderable, &options)
    }

    /// Parse markup into text, or plain text when markup is off.
    pub fn render_str(&self, text: &str) -> Result<Text, ConsoleError> {
        if self.markup {
            Ok(Text::from_markup(text)?)
        } else {
            Ok(Text::new(text))
        }
    }

    /// Render and write a renderable, then flush.
    ///
    /// Lines wider than the console are cropped to its width.
    pub fn print(&mut self, renderable: &dyn Renderable) -> Result<(), ConsoleError> {
        let options = self.options();
        let segments = cropped_segments(renderable, &options);
        let segments = self
            .hooks
            .iter()
            .fold(segments, |segments, hook| hook.process_segments(segments, &options));
        self.write_segments(&segments)
    }

    /// Print a string, parsed as markup unless markup is off.
    ///
    /// # Errors
    /// Invalid markup is returned as [`ConsoleError::Markup`].
    pub fn print_str(&mut self, text: &str) -> Result<(), ConsoleError> {
        let text = self.render_str(text)?;
        self.print(&text)
    }

    pub fn print_text(&mut self, text: &Text) -> Result<(), ConsoleError> {
        self.print(text)
    }

    /// Print a dynamically typed value.
    ///
    /// Strings go through [`Console::print_str`], so they are parsed as markup
    /// unless markup is off.
    ///
    /// # Errors
    /// Values that are neither strings nor renderables fail with
    /// [`ConsoleError::NotRenderable`]. Invalid markup in a string is returned
    /// as [`ConsoleError::Markup`].
    pub fn print_any<T: Any>(&mut self, value: &T) -> Result<(), ConsoleError> {
        let any: &dyn Any = value;
        if let Some(text) = any.downcast_ref::<String>() {
            return self.print_str(text);
        }
        if let Some(text) = any.downcast_ref::<&'static str>() {
            return self.print_str(text);
        }
        let renderable = cast(value)?;
        self.print(renderable)
    }

    /// Write control codes directly, bypassing render hooks.
    pub fn control(&mut self, control: &Control) -> Result<(), ConsoleError> {
        if control.is_empty() {
            return Ok(());
        }
        self.write_segments(std::slice::from_ref(control.segment()))
    }

    /// Write `count` blank lines.
    pub fn line(&mut self, count: usize) -> Result<(), ConsoleError> {
        let segments = vec![Segment::new("\n".repeat(count))];
        self.write_segments(&segments)
    }

    pub fn show_cursor(&mut self, show: bool) -> Result<(), ConsoleError> {
        self.control(&Control::show_cursor(show))
    }

    /// Render to a string exactly as it would be written to the sink.
    pub fn capture(&self, renderable: &dyn Renderable) -> Result<String, ConsoleError> {
        let segments = cropped_segments(renderable, &self.options());
        self.segments_to_string(&segments)
    }

    pub fn flush(&mut self) -> Result<(), ConsoleError> {
        if self.quiet {
            return Ok(());
        }
        match self.sink.flush() {
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                self.mark_quiet();
                Ok(())
            }
            other => Ok(other?),
        }
    }

    /// Turn segments into the exact text for the sink.
    pub fn segments_to_string(&self, segments: &[Segment]) -> Result<String, ConsoleError> {
        let color_system = if self.is_terminal {
            self.color_system
        } else {
            None
        };
        let visible: Vec<Segment> = if self.is_terminal {
            segments.to_vec()
        } else {
            segment::filter_control(segments.iter().cloned(), true).collect()
        };
        let mut output = String::new();
        for segment in segment::simplify(visible) {
            if segment.is_control {
                output.push_str(&segment.text);
                continue;
            }
            match (&segment.style, color_system) {
                (Some(style), Some(system)) => {
                    let style = if self.no_color {
                        style.without_color()
                    } else {
                        style.clone()
                    };
                    output.push_str(&style.render(&segment.text, Some(system)));
                }
                _ => output.push_str(&segment.text),
            }
        }
        if !self.encoding.to_ascii_lowercase().starts_with("utf") {
            if let Some(c) = output.chars().find(|c| !c.is_ascii()) {
                return Err(ConsoleError::encoding(&self.encoding, c));
            }
        }
        Ok(output)
    }

    fn write_segments(&mut self, segments: &[Segment]) -> Result<(), ConsoleError> {
        if self.quiet {
            return Ok(());
        }
        let output = self.segments_to_string(segments)?;
        let result = self
            .sink
            .write_all(output.as_bytes())
            .and_then(|()| self.sink.flush());
        match result {
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                self.mark_quiet();
                Ok(())
            }
            other => Ok(other?),
        }
    }

    fn mark_quiet(&mut self) {
        tracing::warn!("console output pipe closed; further output is discarded");
        self.quiet = true;
    }
}

/// Render with every line cropped to `options.max_width`.
fn cropped_segments(renderable: &dyn Renderable, options: &RenderOptions) -> Vec<Segment> {
    segment::split_and_crop_lines(renderable.render(options), options.max_width, None, false, true)
        .into_iter()
        .flatten()
        .collect()
}

impl Drop for Console {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            tracing::debug!(error = %err, "failed to flush console on drop");
        }
    }
}

static GLOBAL_CONSOLE: OnceLock<Mutex<Console>> = OnceLock::new();

/// The process-wide stdout console, created on first use.
pub fn global_console() -> &'static Mutex<Console> {
    GLOBAL_CONSOLE.get_or_init(|| Mutex::new(Console::stdout()))
}
