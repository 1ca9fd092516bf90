//! Outcome rendering for the console front end.

use caseclip_engine::MonitorEvent;
use caseclip_logging::{clip_debug, clip_info, clip_warn};

/// Receives outcome events from the engine. Purely observational; nothing
/// flows back into the core.
pub trait Notifier {
    fn notify(&self, event: &MonitorEvent);
}

/// Renders events through the logging facade. With notifications disabled
/// in config, outcomes are still visible at debug level.
pub struct LogNotifier {
    enabled: bool,
}

impl LogNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn render(event: &MonitorEvent) -> String {
        match event {
            MonitorEvent::Saved { path } => format!("Case data saved: {}", path.display()),
            MonitorEvent::DuplicateSkipped { content_hash } => {
                // Hashes are 64 hex chars in practice, but never panic on a
                // short one.
                let short = content_hash.get(..12).unwrap_or(content_hash.as_str());
                format!("Duplicate content skipped (hash {short})")
            }
            MonitorEvent::NoMatch => "Clipboard text has no case identifiers".to_string(),
            MonitorEvent::Error { reason } => format!("Save failed: {reason}"),
        }
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, event: &MonitorEvent) {
        let message = Self::render(event);
        if !self.enabled {
            clip_debug!("{}", message);
            return;
        }
        match event {
            MonitorEvent::Error { .. } => clip_warn!("{}", message),
            _ => clip_info!("{}", message),
        }
    }
}
