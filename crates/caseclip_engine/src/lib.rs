//! CaseClipSaver engine: clipboard IO, save pipeline, and the monitor loop.
mod clipboard;
mod monitor;
mod persist;
mod save;
mod types;

pub use clipboard::{ClipboardSource, SystemClipboard};
pub use monitor::{process_clipboard_now, MonitorHandle, MonitorLoop, MonitorSettings};
pub use persist::{ensure_output_dir, CaseFileWriter, PersistError};
pub use save::{content_hash, Clock, SaveService, SaveSettings};
pub use types::{MonitorEvent, SaveError, SaveOutcome, SaveRecord};
