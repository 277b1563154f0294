//! Raw SSH channel bytes to key identifiers.
//!
//! A remote client sends whatever its terminal produces: printable UTF-8,
//! C0 control bytes, and ANSI escape sequences for the special keys. Only
//! the keys the site has names for are decoded; anything else is dropped.

/// Decode one chunk of channel data into key identifiers, in order.
///
/// Escape sequences split across two chunks decode as `esc` followed by
/// the remaining characters. Clients send whole sequences in practice.
pub fn decode_keys(bytes: &[u8]) -> Vec<String> {
    let mut keys = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let (key, consumed) = match bytes[pos] {
            0x1b => escape(&bytes[pos + 1..]),
            byte @ 0x00..=0x1f | byte @ 0x7f => (control(byte), 1),
            byte @ 0x20..=0x7e => (Some(char::from(byte).to_string()), 1),
            byte => utf8(&bytes[pos..], byte),
        };
        keys.extend(key);
        pos += consumed;
    }
    keys
}

fn control(byte: u8) -> Option<String> {
    let name = match byte {
        0x0d | 0x0a => "enter".to_string(),
        0x09 => "tab".to_string(),
        0x08 | 0x7f => "backspace".to_string(),
        0x01..=0x1a => format!("ctrl+{}", char::from(b'a' + byte - 1)),
        _ => return None,
    };
    Some(name)
}

/// `rest` is everything after the ESC byte. Returns the key and the bytes
/// consumed, ESC included.
fn escape(rest: &[u8]) -> (Option<String>, usize) {
    match rest {
        [b'[', params @ ..] => {
            let (key, len) = csi(params);
            (key, 2 + len)
        }
        [b'O', last, ..] => {
            let key = match last {
                b'A' => Some("up"),
                b'B' => Some("down"),
                b'C' => Some("right"),
                b'D' => Some("left"),
                b'H' => Some("home"),
                b'F' => Some("end"),
                _ => None,
            };
            (key.map(String::from), 3)
        }
        _ => (Some("esc".to_string()), 1),
    }
}

/// Control sequence after `ESC [`: parameter bytes up to a final byte in
/// `0x40..=0x7e`.
fn csi(params: &[u8]) -> (Option<String>, usize) {
    let Some(end) = params.iter().position(|b| (0x40..=0x7e).contains(b)) else {
        return (None, params.len());
    };
    let key = match &params[..=end] {
        b"A" => Some("up"),
        b"B" => Some("down"),
        b"C" => Some("right"),
        b"D" => Some("left"),
        b"H" | b"1~" | b"7~" => Some("home"),
        b"F" | b"4~" | b"8~" => Some("end"),
        b"5~" => Some("pgup"),
        b"6~" => Some("pgdown"),
        b"3~" => Some("delete"),
        b"Z" => Some("shift+tab"),
        _ => None,
    };
    (key.map(String::from), end + 1)
}

fn utf8(bytes: &[u8], lead: u8) -> (Option<String>, usize) {
    let len = match lead {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return (None, 1),
    };
    match bytes.get(..len).map(std::str::from_utf8) {
        Some(Ok(s)) => (Some(s.to_string()), len),
        _ => (None, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Vec<String> {
        decode_keys(bytes)
    }

    #[test]
    fn test_printable_characters() {
        assert_eq!(decode(b"qa"), vec!["q", "a"]);
    }

    #[test]
    fn test_control_bytes() {
        assert_eq!(decode(&[0x03]), vec!["ctrl+c"]);
        assert_eq!(decode(&[0x15, 0x04]), vec!["ctrl+u", "ctrl+d"]);
        assert_eq!(decode(b"\r"), vec!["enter"]);
        assert_eq!(decode(&[0x7f]), vec!["backspace"]);
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(decode(b"\x1b[A\x1b[B"), vec!["up", "down"]);
        // application cursor mode
        assert_eq!(decode(b"\x1bOA\x1bOB"), vec!["up", "down"]);
    }

    #[test]
    fn test_paging_keys() {
        assert_eq!(decode(b"\x1b[5~\x1b[6~"), vec!["pgup", "pgdown"]);
    }

    #[test]
    fn test_lone_escape() {
        assert_eq!(decode(b"\x1b"), vec!["esc"]);
        assert_eq!(decode(b"\x1bq"), vec!["esc", "q"]);
    }

    #[test]
    fn test_unknown_sequence_is_skipped() {
        // F5 with modifiers
        assert_eq!(decode(b"\x1b[15;2~a"), vec!["a"]);
    }

    #[test]
    fn test_utf8_characters() {
        assert_eq!(decode("é…".as_bytes()), vec!["é", "…"]);
        assert_eq!(decode(&[0xff, b'a']), vec!["a"]);
    }
}
