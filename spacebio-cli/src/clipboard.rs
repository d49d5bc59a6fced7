//! Clipboard backends for citation export.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use spacebio_core::{ClipboardBackend, ClipboardError, CopyOutcome, copy_with_fallback};
use std::io::{IsTerminal, Write};

/// The system clipboard via `arboard`.
#[derive(Default)]
pub struct ArboardClipboard;

impl ClipboardBackend for ArboardClipboard {
    fn name(&self) -> &str {
        "system"
    }

    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable {
            message: e.to_string(),
        })?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::WriteFailed {
                message: e.to_string(),
            })
    }
}

/// OSC 52 escape sequence, understood by most terminal emulators and over SSH.
pub struct Osc52Clipboard<W: Write> {
    out: W,
    require_tty: bool,
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
            require_tty: true,
        }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    #[cfg(test)]
    fn new(out: W) -> Self {
        Self {
            out,
            require_tty: false,
        }
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write> ClipboardBackend for Osc52Clipboard<W> {
    fn name(&self) -> &str {
        "osc52"
    }

    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.require_tty && !std::io::stdout().is_terminal() {
            return Err(ClipboardError::Unavailable {
                message: "stdout is not a terminal".to_string(),
            });
        }
        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| ClipboardError::WriteFailed {
                message: e.to_string(),
            })
    }
}

/// Copy with the system clipboard, falling back to OSC 52.
pub fn copy_text(text: &str) -> CopyOutcome {
    copy_with_fallback(text, &mut ArboardClipboard, &mut Osc52Clipboard::stdout())
}
