//! Sink writes and ANSI stripping for the file rendering

use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::LazyLock;

use regex::Regex;

/// CSI color/style sequences: `ESC [ <digits/semicolons> m`
static CSI_SGR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("CSI pattern is valid"));

/// Write one rendered record to a sink and flush it
///
/// No framing or retry: the bytes go out as given and the first error is returned.
pub fn write_to_sink<W: Write + ?Sized>(sink: &mut W, bytes: &[u8]) -> io::Result<()> {
    sink.write_all(bytes)?;
    sink.flush()
}

/// Remove every CSI color sequence from `text`, leaving everything else untouched
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    CSI_SGR.replace_all(text, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_removes_color_codes() {
        let colored = "\x1b[38;5;12mINFO[now] hello\n\x1b[39m";
        assert_eq!(strip_ansi(colored), "INFO[now] hello\n");
    }

    #[test]
    fn test_strip_ansi_handles_reset_and_empty_params() {
        assert_eq!(strip_ansi("\x1b[0mA\x1b[mB\x1b[1;31mC"), "ABC");
    }

    #[test]
    fn test_strip_ansi_leaves_other_escapes() {
        // Cursor movement is not a color sequence
        let text = "\x1b[2Jclear\x1b[10;5H";
        assert_eq!(strip_ansi(text), text);
    }

    #[test]
    fn test_strip_ansi_plain_text_is_borrowed() {
        let text = "nothing to strip [1m here";
        assert!(matches!(strip_ansi(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_write_to_sink_appends() {
        let mut sink: Vec<u8> = b"first\n".to_vec();
        write_to_sink(&mut sink, b"second\n").unwrap();
        assert_eq!(sink, b"first\nsecond\n");
    }
}
