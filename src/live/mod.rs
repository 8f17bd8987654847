//! Live displays: a region redrawn in place as its renderable changes.
//!
//! While a [`Live`] is started it installs a render hook on its console.
//! Every print through that console first moves the cursor back to the top of
//! the live region, writes the printed output, then redraws the region below
//! it. Refreshing is printing nothing.
//!
//! Locks are always taken console first, then live state.

mod refresh;
mod render;

pub use render::{LiveRender, VerticalOverflow};

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::control::Control;
use crate::render::{Console, ConsoleError, RenderHook, RenderOptions, Renderable, SharedConsole};
use crate::segment::Segment;
use refresh::RefreshThread;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

struct LiveState {
    render: LiveRender,
    started: bool,
    transient: bool,
}

/// Render hook that keeps the live region below printed output.
struct LiveHook {
    state: Arc<Mutex<LiveState>>,
}

impl RenderHook for LiveHook {
    fn process_segments(&self, segments: Vec<Segment>, options: &RenderOptions) -> Vec<Segment> {
        let mut state = lock(&self.state);
        if options.is_terminal {
            let reset = state.render.position_cursor();
            let mut output = Vec::with_capacity(segments.len() + 2);
            if !reset.is_empty() {
                output.push(reset.segment().clone());
            }
            output.extend(segments);
            output.extend(state.render.render_frame(options));
            output
        } else if !state.started && !state.transient {
            let mut output = segments;
            output.extend(state.render.render_frame(options));
            output
        } else {
            segments
        }
    }
}

/// Print nothing, letting the live hook redraw the region.
fn refresh_console(console: &SharedConsole) -> Result<(), ConsoleError> {
    lock(console).print(&Control::default())
}

/// A live display bound to a console.
pub struct Live {
    console: SharedConsole,
    state: Arc<Mutex<LiveState>>,
    hook: Arc<dyn RenderHook>,
    auto_refresh: bool,
    refresh_per_second: f64,
    refresh_thread: Option<RefreshThread>,
}

impl Live {
    const DEFAULT_REFRESH_PER_SECOND: f64 = 4.0;

    pub fn new(renderable: impl Renderable + 'static, console: SharedConsole) -> Self {
        let state = Arc::new(Mutex::new(LiveState {
            render: LiveRender::new(Box::new(renderable)),
            started: false,
            transient: false,
        }));
        Self {
            console,
            hook: Arc::new(LiveHook {
                state: Arc::clone(&state),
            }) as Arc<dyn RenderHook>,
            state,
            auto_refresh: true,
            refresh_per_second: Self::DEFAULT_REFRESH_PER_SECOND,
            refresh_thread: None,
        }
    }

    /// Refresh from a background thread while started.
    pub fn with_auto_refresh(mut self, auto_refresh: bool) -> Self {
        self.auto_refresh = auto_refresh;
        self
    }

    pub fn with_refresh_per_second(mut self, refresh_per_second: f64) -> Self {
        self.refresh_per_second = refresh_per_second;
        self
    }

    /// Erase the region when stopped.
    pub fn with_transient(self, transient: bool) -> Self {
        lock(&self.state).transient = transient;
        self
    }

    pub fn with_vertical_overflow(self, vertical_overflow: VerticalOverflow) -> Self {
        lock(&self.state)
            .render
            .set_vertical_overflow(vertical_overflow);
        self
    }

    pub fn console(&self) -> &SharedConsole {
        &self.console
    }

    pub fn is_started(&self) -> bool {
        lock(&self.state).started
    }

    /// Start the display, hiding the cursor.
    ///
    /// Starting a started display does nothing.
    pub fn start(&mut self, refresh: bool) -> Result<()> {
        anyhow::ensure!(
            self.refresh_per_second > 0.0,
            "refresh_per_second must be positive, got {}",
            self.refresh_per_second
        );
        {
            let mut console = lock(&self.console);
            if lock(&self.state).started {
                return Ok(());
            }
            console
                .show_cursor(false)
                .context("Failed to hide cursor")?;
            let mut state = lock(&self.state);
            state.started = true;
            state.render.reset_shape();
            drop(state);
            console.push_render_hook(Arc::clone(&self.hook));
        }
        tracing::debug!(auto_refresh = self.auto_refresh, "live display started");

        if refresh {
            self.refresh()?;
        }
        if self.auto_refresh {
            let console = Arc::clone(&self.console);
            let interval = Duration::from_secs_f64(1.0 / self.refresh_per_second);
            let thread = RefreshThread::spawn(interval, move || {
                if let Err(err) = refresh_console(&console) {
                    tracing::debug!(error = %err, "live refresh failed");
                }
            })
            .context("Failed to spawn live refresh thread")?;
            self.refresh_thread = Some(thread);
        }
        Ok(())
    }

    /// Stop the display.
    ///
    /// Draws the final frame (or erases it when transient) and always shows
    /// the cursor again. The refresh thread is joined before anything is
    /// written.
    pub fn stop(&mut self) -> Result<()> {
        if !self.is_started() {
            return Ok(());
        }
        if let Some(thread) = self.refresh_thread.take() {
            thread.stop();
        }

        let mut console = lock(&self.console);
        let transient = {
            let mut state = lock(&self.state);
            state.started = false;
            state.transient
        };
        let is_terminal = console.is_terminal();
        let result = Self::finish(&mut console, &self.state, transient, is_terminal);
        console.remove_render_hook(&self.hook);
        let shown = console.show_cursor(true).context("Failed to show cursor");
        tracing::debug!(transient, "live display stopped");
        result.and(shown)
    }

    fn finish(
        console: &mut Console,
        state: &Mutex<LiveState>,
        transient: bool,
        is_terminal: bool,
    ) -> Result<()> {
        if transient && !is_terminal {
            return Ok(());
        }
        console
            .print(&Control::default())
            .context("Failed to draw final live frame")?;
        console.line(1).context("Failed to end live region")?;
        if transient {
            let restore = lock(state).render.restore_cursor();
            console
                .control(&restore)
                .context("Failed to erase live region")?;
        }
        Ok(())
    }

    /// Replace the renderable, optionally redrawing at once.
    pub fn update(&self, renderable: impl Renderable + 'static, refresh: bool) -> Result<()> {
        lock(&self.state).render.set_renderable(Box::new(renderable));
        if refresh {
            self.refresh()?;
        }
        Ok(())
    }

    /// Redraw the region now.
    pub fn refresh(&self) -> Result<()> {
        refresh_console(&self.console).context("Failed to refresh live display")
    }
}

impl Drop for Live {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            tracing::debug!(error = %err, "failed to stop live display on drop");
        }
    }
}
