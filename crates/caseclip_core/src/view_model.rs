use crate::TickResultKind;

/// Read-only status snapshot for callers that want to render monitor state
/// (tray tooltip, status log line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusView {
    pub ticks: u64,
    pub saved: u64,
    pub duplicates: u64,
    pub no_match: u64,
    pub failures: u64,
    pub last_result: Option<TickResultKind>,
}
