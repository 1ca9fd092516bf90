/// Outcome kind of one processed tick, fed back into the state machine for
/// the status tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResultKind {
    Saved,
    DuplicateSkipped,
    NoMatch,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// One poll of the clipboard. `content` is `None` when the read failed
    /// this tick; `monitoring` is the enabled flag as read at tick time.
    PollTick {
        monitoring: bool,
        content: Option<String>,
    },
    /// The save pipeline finished for a previously emitted effect.
    SaveCompleted { result: TickResultKind },
    /// Fallback for placeholder wiring.
    NoOp,
}
