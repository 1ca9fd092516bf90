use crate::view_model::StatusView;
use crate::TickResultKind;

/// State owned by the monitor loop thread. The snapshot of the last observed
/// clipboard text lives here and is only ever touched through `update`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonitorState {
    last_content: Option<String>,
    ticks: u64,
    saved: u64,
    duplicates: u64,
    no_match: u64,
    failures: u64,
    last_result: Option<TickResultKind>,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> StatusView {
        StatusView {
            ticks: self.ticks,
            saved: self.saved,
            duplicates: self.duplicates,
            no_match: self.no_match,
            failures: self.failures,
            last_result: self.last_result,
        }
    }

    pub fn last_content(&self) -> Option<&str> {
        self.last_content.as_deref()
    }

    pub(crate) fn advance_tick(&mut self) {
        self.ticks += 1;
    }

    pub(crate) fn set_last_content(&mut self, content: String) {
        self.last_content = Some(content);
    }

    pub(crate) fn record_result(&mut self, result: TickResultKind) {
        match result {
            TickResultKind::Saved => self.saved += 1,
            TickResultKind::DuplicateSkipped => self.duplicates += 1,
            TickResultKind::NoMatch => self.no_match += 1,
            TickResultKind::Failed => self.failures += 1,
        }
        self.last_result = Some(result);
    }
}
