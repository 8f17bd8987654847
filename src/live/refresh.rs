//! Background refresh for live displays.
//!
//! A dedicated thread calls a refresh function at a fixed interval until it
//! is told to stop. Ticks missed while a refresh runs are not queued.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a running refresh thread.
pub(crate) struct RefreshThread {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl RefreshThread {
    /// Spawn a thread calling `refresh` every `interval`.
    pub(crate) fn spawn(
        interval: Duration,
        refresh: impl Fn() + Send + 'static,
    ) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("live-refresh".to_string())
            .spawn(move || refresh_loop(stop_rx, interval, refresh))?;
        tracing::debug!(interval_ms = interval.as_millis() as u64, "refresh thread spawned");
        Ok(Self { stop_tx, handle })
    }

    /// Signal the thread and wait for it to exit.
    ///
    /// No refresh runs after this returns.
    pub(crate) fn stop(self) {
        // The thread may already have exited
        let _ = self.stop_tx.send(());
        if self.handle.join().is_err() {
            tracing::warn!("refresh thread panicked");
        } else {
            tracing::debug!("refresh thread joined");
        }
    }
}

/// Call `refresh` each time `interval` passes without a stop signal.
///
/// Exits on a stop signal or when the sender is dropped.
fn refresh_loop(stop_rx: Receiver<()>, interval: Duration, refresh: impl Fn()) {
    loop {
        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => refresh(),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn refreshes_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let thread = RefreshThread::spawn(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while count.load(Ordering::SeqCst) < 2 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        thread.stop();
        let after_stop = count.load(Ordering::SeqCst);
        assert!(after_stop >= 2);

        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn loop_exits_when_sender_dropped() {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        drop(stop_tx);
        refresh_loop(stop_rx, Duration::from_millis(1), || panic!("refreshed after disconnect"));
    }
}
