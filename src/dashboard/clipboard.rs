//! Login URL construction and clipboard access

use log::warn;

use crate::client::models::AppId;
use crate::error::{Error, Result};

/// Destination for copied text
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The desktop clipboard (X11/Wayland, macOS, Windows).
///
/// On X11 and Wayland the selection is served by the owning process and is
/// lost when it exits. A holding clipboard blocks in `write_text` until
/// another program takes the selection over.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard {
    hold: bool,
}

impl SystemClipboard {
    /// Clipboard whose writes outlive a short-lived process.
    pub fn holding() -> Self {
        Self { hold: true }
    }

    /// Whether writes block until the selection is replaced.
    pub fn holds_selection(&self) -> bool {
        self.hold
            && cfg!(all(
                unix,
                not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
            ))
    }

    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    fn set(
        &self,
        clipboard: &mut arboard::Clipboard,
        text: &str,
    ) -> std::result::Result<(), arboard::Error> {
        use arboard::SetExtLinux;

        if self.hold {
            clipboard.set().wait().text(text.to_string())
        } else {
            clipboard.set_text(text.to_string())
        }
    }

    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    fn set(
        &self,
        clipboard: &mut arboard::Clipboard,
        text: &str,
    ) -> std::result::Result<(), arboard::Error> {
        clipboard.set_text(text.to_string())
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| {
            warn!("Clipboard unavailable: {}", e);
            Error::Other(format!("Clipboard unavailable: {}", e))
        })?;

        self.set(&mut clipboard, text).map_err(|e| {
            warn!("Clipboard copy failed: {}", e);
            Error::Other(format!("Clipboard copy failed: {}", e))
        })
    }
}

/// Login URL an application hands to its users: `<origin>/?id=<id>`.
pub fn login_url(origin: &str, id: &AppId) -> String {
    format!("{}/?id={}", origin.trim_end_matches('/'), id)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Clipboard that records writes, or fails every write.
    #[derive(Default)]
    pub struct RecordingClipboard {
        pub writes: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl RecordingClipboard {
        pub fn failing() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn last(&self) -> Option<String> {
            self.writes.lock().unwrap().last().cloned()
        }
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(Error::Other("clipboard denied".to_string()));
            }
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }
}
