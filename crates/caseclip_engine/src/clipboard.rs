use caseclip_logging::clip_debug;

/// Text source polled by the monitor loop.
///
/// A failed read (busy clipboard, non-text payload, missing display) maps to
/// `None` and means "no new content this tick" — it is never fatal.
pub trait ClipboardSource: Send {
    fn read_text(&mut self) -> Option<String>;
}

/// System clipboard backed by arboard. A fresh `arboard::Clipboard` is
/// opened per read; the handle is not kept across ticks so the clipboard is
/// never held open between polls.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> Option<String> {
        let mut clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => clipboard,
            Err(err) => {
                clip_debug!("clipboard unavailable this tick: {}", err);
                return None;
            }
        };
        match clipboard.get_text() {
            Ok(text) if !text.is_empty() => Some(text),
            Ok(_) => None,
            Err(err) => {
                clip_debug!("clipboard read failed this tick: {}", err);
                None
            }
        }
    }
}
