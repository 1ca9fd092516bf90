use std::io;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use caseclip_core::{update, Effect, MonitorState, Msg, StatusView};
use caseclip_logging::{clip_debug, clip_error, clip_info, set_poll_tick};

use crate::{ClipboardSource, MonitorEvent, SaveService};

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub polling_interval: Duration,
    pub start_enabled: bool,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            polling_interval: Duration::from_secs(1),
            start_enabled: true,
        }
    }
}

/// One-shot clipboard test: reads the clipboard once and runs the same save
/// pipeline the loop uses. Safe to call while the loop is running; the
/// service serializes the shared cache and output directory internally.
pub fn process_clipboard_now(
    clipboard: &mut dyn ClipboardSource,
    saver: &SaveService,
) -> MonitorEvent {
    let Some(content) = clipboard.read_text() else {
        return MonitorEvent::Error {
            reason: "clipboard empty or unreadable".to_string(),
        };
    };
    let result = saver.save(&content);
    MonitorEvent::from_save_result(&result)
}

/// The polling loop body. Owns the clipboard snapshot (inside the core state
/// machine) and runs one poll per `tick()` call; the surrounding thread adds
/// the sleep. Kept separate from the thread so ticks are testable.
pub struct MonitorLoop<C> {
    state: MonitorState,
    clipboard: C,
    saver: Arc<SaveService>,
    enabled: Arc<AtomicBool>,
    event_tx: mpsc::Sender<MonitorEvent>,
    ticks: u64,
}

impl<C: ClipboardSource> MonitorLoop<C> {
    pub fn new(
        clipboard: C,
        saver: Arc<SaveService>,
        enabled: Arc<AtomicBool>,
        event_tx: mpsc::Sender<MonitorEvent>,
    ) -> Self {
        Self {
            state: MonitorState::new(),
            clipboard,
            saver,
            enabled,
            event_tx,
            ticks: 0,
        }
    }

    /// Run one poll: read the clipboard, let the pure state machine decide,
    /// and execute any resulting save synchronously. A save failure is
    /// contained within this tick; the next tick resumes with its own read.
    pub fn tick(&mut self) {
        self.ticks += 1;
        set_poll_tick(self.ticks);

        let monitoring = self.enabled.load(Ordering::Relaxed);
        let content = self.clipboard.read_text();

        let state = mem::take(&mut self.state);
        let (state, effects) = update(state, Msg::PollTick { monitoring, content });
        self.state = state;

        for effect in effects {
            let Effect::ProcessContent { content } = effect;
            let result = self.saver.save(&content);
            if let Err(err) = &result {
                clip_error!("tick {}: save failed: {}", self.ticks, err);
            }

            let kind = MonitorEvent::result_kind(&result);
            let state = mem::take(&mut self.state);
            let (state, _) = update(state, Msg::SaveCompleted { result: kind });
            self.state = state;

            let view = self.state.view();
            clip_debug!(
                "status: saved={} duplicates={} no_match={} failures={}",
                view.saved,
                view.duplicates,
                view.no_match,
                view.failures
            );

            // A dropped receiver only means nobody is listening anymore.
            let _ = self.event_tx.send(MonitorEvent::from_save_result(&result));
        }
    }

    pub fn status(&self) -> StatusView {
        self.state.view()
    }
}

/// Handle held by the caller while the loop thread runs for the rest of the
/// process lifetime. There is no cancellation: the loop dies with the
/// process.
pub struct MonitorHandle {
    enabled: Arc<AtomicBool>,
    event_rx: mpsc::Receiver<MonitorEvent>,
    saver: Arc<SaveService>,
}

impl MonitorHandle {
    /// Spawn the monitor thread. Failure to spawn is the only fatal startup
    /// error of the monitoring side.
    pub fn spawn<C>(
        settings: MonitorSettings,
        clipboard: C,
        saver: Arc<SaveService>,
    ) -> io::Result<Self>
    where
        C: ClipboardSource + 'static,
    {
        let enabled = Arc::new(AtomicBool::new(settings.start_enabled));
        let (event_tx, event_rx) = mpsc::channel();
        let mut monitor = MonitorLoop::new(clipboard, saver.clone(), enabled.clone(), event_tx);
        let interval = settings.polling_interval;

        thread::Builder::new()
            .name("clipboard-monitor".to_string())
            .spawn(move || loop {
                monitor.tick();
                thread::sleep(interval);
            })?;
        clip_info!(
            "clipboard monitoring started (interval {:?}, enabled {})",
            interval,
            settings.start_enabled
        );

        Ok(Self {
            enabled,
            event_rx,
            saver,
        })
    }

    /// Toggle processing. The flag is read once per poll tick, so a toggle
    /// is observed within one interval.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        clip_info!(
            "clipboard monitoring {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn try_recv(&self) -> Option<MonitorEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<MonitorEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Synchronous clipboard test sharing the loop's save service.
    pub fn process_now(&self, clipboard: &mut dyn ClipboardSource) -> MonitorEvent {
        process_clipboard_now(clipboard, &self.saver)
    }
}
