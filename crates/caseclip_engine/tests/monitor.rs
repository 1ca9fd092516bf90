use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Once};
use std::time::Duration;

use caseclip_engine::{
    process_clipboard_now, ClipboardSource, MonitorEvent, MonitorHandle, MonitorLoop,
    MonitorSettings, SaveService, SaveSettings,
};
use tempfile::TempDir;

const SNIPPET: &str = "ICM 635658889\nSupport Request Number: 2505160020000588";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(caseclip_logging::initialize_for_tests);
}

/// Clipboard stand-in that replays a fixed sequence of reads, then reports
/// "nothing to read".
struct ScriptedClipboard {
    reads: VecDeque<Option<String>>,
}

impl ScriptedClipboard {
    fn new<const N: usize>(reads: [Option<&str>; N]) -> Self {
        Self {
            reads: reads
                .into_iter()
                .map(|read| read.map(str::to_string))
                .collect(),
        }
    }
}

impl ClipboardSource for ScriptedClipboard {
    fn read_text(&mut self) -> Option<String> {
        self.reads.pop_front().flatten()
    }
}

struct Fixture {
    monitor: MonitorLoop<ScriptedClipboard>,
    enabled: Arc<AtomicBool>,
    event_rx: mpsc::Receiver<MonitorEvent>,
    saver: Arc<SaveService>,
    _temp: TempDir,
}

fn fixture<const N: usize>(reads: [Option<&str>; N]) -> Fixture {
    init_logging();
    let temp = TempDir::new().unwrap();
    let saver = Arc::new(SaveService::new(SaveSettings::new(temp.path().to_path_buf())));
    let enabled = Arc::new(AtomicBool::new(true));
    let (event_tx, event_rx) = mpsc::channel();
    let monitor = MonitorLoop::new(
        ScriptedClipboard::new(reads),
        saver.clone(),
        enabled.clone(),
        event_tx,
    );
    Fixture {
        monitor,
        enabled,
        event_rx,
        saver,
        _temp: temp,
    }
}

fn drain(event_rx: &mpsc::Receiver<MonitorEvent>) -> Vec<MonitorEvent> {
    let mut events = Vec::new();
    while let Ok(event) = event_rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn fresh_content_is_saved_once_and_repeats_are_silent() {
    let mut fx = fixture([
        Some(SNIPPET),
        Some(SNIPPET),
        Some("Invalid data without proper IDs"),
        None,
    ]);

    for _ in 0..4 {
        fx.monitor.tick();
    }

    let events = drain(&fx.event_rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], MonitorEvent::Saved { .. }));
    assert_eq!(events[1], MonitorEvent::NoMatch);

    let view = fx.monitor.status();
    assert_eq!(view.ticks, 4);
    assert_eq!(view.saved, 1);
    assert_eq!(view.no_match, 1);
}

#[test]
fn empty_reads_never_reach_the_pipeline() {
    let mut fx = fixture([Some(""), None, Some("")]);

    for _ in 0..3 {
        fx.monitor.tick();
    }

    assert!(drain(&fx.event_rx).is_empty());
    assert_eq!(fx.monitor.status().ticks, 3);
}

#[test]
fn disabled_flag_skips_ticks_until_reenabled() {
    let mut fx = fixture([Some(SNIPPET), Some(SNIPPET)]);

    fx.enabled.store(false, Ordering::Relaxed);
    fx.monitor.tick();
    assert!(drain(&fx.event_rx).is_empty());

    // Toggle observed on the very next tick; the same content is now fresh.
    fx.enabled.store(true, Ordering::Relaxed);
    fx.monitor.tick();
    let events = drain(&fx.event_rx);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], MonitorEvent::Saved { .. }));
}

#[test]
fn reverting_to_earlier_content_is_a_duplicate_not_a_save() {
    let other = "ICM 111222333 different case";
    let mut fx = fixture([Some(SNIPPET), Some(other), Some(SNIPPET)]);

    for _ in 0..3 {
        fx.monitor.tick();
    }

    let events = drain(&fx.event_rx);
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], MonitorEvent::Saved { .. }));
    assert!(matches!(events[1], MonitorEvent::Saved { .. }));
    assert!(matches!(events[2], MonitorEvent::DuplicateSkipped { .. }));
}

#[test]
fn save_failure_does_not_stop_the_loop() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("never_made");
    let mut settings = SaveSettings::new(missing);
    settings.auto_create_dir = false;
    let saver = Arc::new(SaveService::new(settings));
    let enabled = Arc::new(AtomicBool::new(true));
    let (event_tx, event_rx) = mpsc::channel();
    let mut monitor = MonitorLoop::new(
        ScriptedClipboard::new([Some(SNIPPET), Some("Invalid data, no IDs")]),
        saver,
        enabled,
        event_tx,
    );

    monitor.tick();
    monitor.tick();

    let events = drain(&event_rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], MonitorEvent::Error { .. }));
    assert_eq!(events[1], MonitorEvent::NoMatch);
    assert_eq!(monitor.status().failures, 1);
}

#[test]
fn manual_process_now_shares_the_loop_dedupe_cache() {
    let mut fx = fixture([Some(SNIPPET)]);

    let mut manual = ScriptedClipboard::new([Some(SNIPPET)]);
    let event = process_clipboard_now(&mut manual, &fx.saver);
    assert!(matches!(event, MonitorEvent::Saved { .. }));

    // The loop's own read of the same content is now a duplicate.
    fx.monitor.tick();
    let events = drain(&fx.event_rx);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], MonitorEvent::DuplicateSkipped { .. }));
}

#[test]
fn process_now_reports_unreadable_clipboard() {
    let fx = fixture([]);
    let mut manual = ScriptedClipboard::new([None]);

    let event = process_clipboard_now(&mut manual, &fx.saver);

    assert!(matches!(event, MonitorEvent::Error { .. }));
}

#[test]
fn spawned_loop_delivers_events_on_its_own_thread() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let saver = Arc::new(SaveService::new(SaveSettings::new(temp.path().to_path_buf())));
    let settings = MonitorSettings {
        polling_interval: Duration::from_millis(10),
        start_enabled: true,
    };

    let handle = MonitorHandle::spawn(settings, ScriptedClipboard::new([Some(SNIPPET)]), saver)
        .expect("monitor thread spawns");

    let event = handle.recv_timeout(Duration::from_secs(5));
    assert!(matches!(event, Some(MonitorEvent::Saved { .. })));
    assert!(handle.is_enabled());
}
