//! Clipboard
//!
//! Terminal clipboard writes via the OSC 52 escape sequence, which most
//! terminal emulators (and tmux with `set-clipboard on`) forward to the
//! system clipboard.

use std::io::Write;
use std::sync::Mutex;
use thiserror::Error;

/// Acknowledgment shown after a successful copy
pub const COPIED_MESSAGE: &str = "Copied to clipboard!";

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for copied text
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes OSC 52 sequences to a terminal stream
pub struct Osc52Clipboard<W: Write> {
    out: Mutex<W>,
}

impl Osc52Clipboard<std::io::Stderr> {
    /// Clipboard on the controlling terminal's stderr, leaving stdout for output
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        write!(out, "\x1b]52;c;{}\x07", base64_encode(text.as_bytes()))?;
        out.flush()?;
        Ok(())
    }
}

/// Standard base64 with padding
fn base64_encode(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut result = String::with_capacity(data.len().div_ceil(3) * 4);

    for chunk in data.chunks(3) {
        let b0 = chunk[0] as usize;
        let b1 = chunk.get(1).copied().unwrap_or(0) as usize;
        let b2 = chunk.get(2).copied().unwrap_or(0) as usize;

        result.push(ALPHABET[b0 >> 2] as char);
        result.push(ALPHABET[((b0 & 0x03) << 4) | (b1 >> 4)] as char);
        result.push(if chunk.len() > 1 {
            ALPHABET[((b1 & 0x0f) << 2) | (b2 >> 6)] as char
        } else {
            '='
        });
        result.push(if chunk.len() > 2 {
            ALPHABET[b2 & 0x3f] as char
        } else {
            '='
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_padding() {
        assert_eq!(base64_encode(b""), "");
        assert_eq!(base64_encode(b"f"), "Zg==");
        assert_eq!(base64_encode(b"fo"), "Zm8=");
        assert_eq!(base64_encode(b"foo"), "Zm9v");
        assert_eq!(base64_encode(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn test_osc52_sequence() {
        let clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("REF-7Q2").unwrap();

        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(written, format!("\x1b]52;c;{}\x07", base64_encode(b"REF-7Q2")));
    }
}
