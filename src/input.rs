//! Byte-stream input decoder.
//!
//! Raw terminal input arrives in arbitrary chunks, so a multi-byte escape
//! sequence (arrow keys, page keys, SGR mouse reports) can be split across
//! reads. The decoder is a pure transition function over an explicit state
//! machine: bytes that form a strict prefix of a known sequence are carried
//! over to the next call, and a byte that cannot extend any known prefix
//! aborts the sequence instead of leaking garbage key events.

/// A discrete UI event decoded from the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A plain printable key.
    Key(char),
    Up,
    Down,
    PageUp,
    PageDown,
    /// Mouse wheel, one notch.
    ScrollUp,
    ScrollDown,
    Quit,
}

/// Unconsumed tail of the previous chunk that may be completed by the next
/// read. Owned exclusively by the decoder.
#[derive(Debug, Default, Clone)]
pub struct Decoder {
    pending: Vec<u8>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, input: &[u8]) -> Vec<InputEvent> {
        let pending = std::mem::take(&mut self.pending);
        let (events, rest) = decode(pending, input);
        self.pending = rest;
        events
    }
}

enum Scan {
    /// A full sequence was consumed; `event` is None for sequences that are
    /// recognized but deliberately discarded (non-wheel mouse, unknown CSI).
    Complete {
        event: Option<InputEvent>,
        len: usize,
    },
    /// The buffer ends inside a possible sequence; wait for more bytes.
    Partial,
    /// The bytes cannot form a known sequence: drop `skip` prefix bytes and
    /// resume decoding at the byte that broke the match.
    Abort { skip: usize },
}

/// Pure transition: `(carried bytes, new chunk) -> (events, carried bytes)`.
pub fn decode(mut pending: Vec<u8>, input: &[u8]) -> (Vec<InputEvent>, Vec<u8>) {
    pending.extend_from_slice(input);
    let buf = pending;
    let mut events = Vec::new();
    let mut i = 0;

    while i < buf.len() {
        let b = buf[i];
        if b == 0x1b {
            match scan_escape(&buf[i..]) {
                Scan::Complete { event, len } => {
                    if let Some(e) = event {
                        events.push(e);
                    }
                    i += len;
                }
                Scan::Partial => return (events, buf[i..].to_vec()),
                Scan::Abort { skip } => i += skip,
            }
            continue;
        }

        match b {
            0x03 => events.push(InputEvent::Quit),     // Ctrl-C
            0x02 => events.push(InputEvent::PageUp),   // Ctrl-B
            0x06 => events.push(InputEvent::PageDown), // Ctrl-F
            0x20..=0x7e => events.push(InputEvent::Key(b as char)),
            _ => {} // non-printable, not a shortcut: dropped
        }
        i += 1;
    }

    (events, Vec::new())
}

/// Match a sequence starting at an ESC byte.
fn scan_escape(rest: &[u8]) -> Scan {
    if rest.len() == 1 {
        return Scan::Partial;
    }
    if rest[1] != b'[' {
        // A bare ESC followed by something else: drop the ESC, let the
        // following byte be reprocessed as plain input.
        return Scan::Abort { skip: 1 };
    }
    scan_csi(rest)
}

/// Match `ESC [ <params> <final>` where params are bytes 0x30-0x3F and
/// intermediates 0x20-0x2F, and the final byte is 0x40-0x7E.
fn scan_csi(rest: &[u8]) -> Scan {
    let mut j = 2;
    while j < rest.len() {
        let b = rest[j];
        match b {
            0x30..=0x3f | 0x20..=0x2f => j += 1,
            0x40..=0x7e => {
                let params = &rest[2..j];
                return Scan::Complete {
                    event: interpret_csi(params, b),
                    len: j + 1,
                };
            }
            // Not a CSI byte at all: drop everything matched so far and
            // resume at this byte.
            _ => return Scan::Abort { skip: j },
        }
    }
    Scan::Partial
}

/// Map a complete CSI sequence to an event. Unknown sequences are consumed
/// without one so they never surface as key events.
fn interpret_csi(params: &[u8], final_byte: u8) -> Option<InputEvent> {
    match (params, final_byte) {
        ([], b'A') => Some(InputEvent::Up),
        ([], b'B') => Some(InputEvent::Down),
        ([b'5'], b'~') => Some(InputEvent::PageUp),
        ([b'6'], b'~') => Some(InputEvent::PageDown),
        // Only press reports (final `M`) translate to wheel events; release
        // reports (final `m`) fall through and are consumed like any other
        // unknown sequence.
        _ if final_byte == b'M' => interpret_sgr_mouse(params),
        _ => None,
    }
}

/// `< button ; col ; row` — wheel buttons 64/65 become scroll events, every
/// other button is recognized and discarded.
fn interpret_sgr_mouse(params: &[u8]) -> Option<InputEvent> {
    let text = std::str::from_utf8(params).ok()?;
    let fields = text.strip_prefix('<')?;
    let mut parts = fields.split(';');
    let button: u32 = parts.next()?.parse().ok()?;
    let _col: u32 = parts.next()?.parse().ok()?;
    let _row: u32 = parts.next()?.parse().ok()?;
    match button {
        64 => Some(InputEvent::ScrollUp),
        65 => Some(InputEvent::ScrollDown),
        _ => None,
    }
}
