//! CaseClipSaver core: pure extraction, naming, and tick state machine.
mod analysis;
mod effect;
mod extract;
mod filename;
mod msg;
mod state;
mod update;
mod view_model;

pub use analysis::{analyze, ContentSignals, ContentType, PriorityLevel};
pub use effect::Effect;
pub use extract::{CaseIdExtractor, CaseIds};
pub use filename::{derive_filename, metadata_filename, timestamped_variant};
pub use msg::{Msg, TickResultKind};
pub use state::MonitorState;
pub use update::update;
pub use view_model::StatusView;
