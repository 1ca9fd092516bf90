use crate::{Effect, MonitorState, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// A `PollTick` yields `ProcessContent` only when monitoring is enabled and
/// the content is present, non-empty, and differs from the previous snapshot.
/// The comparison is exact string equality: a trailing-whitespace change is
/// new content.
pub fn update(mut state: MonitorState, msg: Msg) -> (MonitorState, Vec<Effect>) {
    let effects = match msg {
        Msg::PollTick { monitoring, content } => {
            state.advance_tick();
            if !monitoring {
                // Disabled ticks skip processing entirely; the snapshot is
                // left untouched so nothing is silently consumed.
                return (state, Vec::new());
            }
            let Some(content) = content else {
                // Clipboard read failed or held no text this tick.
                return (state, Vec::new());
            };
            if content.is_empty() {
                return (state, Vec::new());
            }
            if state.last_content() == Some(content.as_str()) {
                return (state, Vec::new());
            }
            state.set_last_content(content.clone());
            vec![Effect::ProcessContent { content }]
        }
        Msg::SaveCompleted { result } => {
            state.record_result(result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
