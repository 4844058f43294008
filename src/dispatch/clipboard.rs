use crate::error::{Error, Result};

pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via `arboard`. Opened on first copy and held for the
/// life of the process; X11 and Wayland selections vanish with their owner.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => arboard::Clipboard::new()
                .map_err(|e| Error::ClipboardUnavailable(e.to_string()))?,
        };
        let handle = self.handle.insert(handle);

        handle
            .set_text(text.to_string())
            .map_err(|e| Error::ClipboardUnavailable(e.to_string()))
    }
}
