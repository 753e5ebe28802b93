use regex::Regex;
use std::sync::OnceLock;

/// CSI sequences, OSC sequences (BEL or ST terminated) and two-byte ESC sequences.
fn escape_sequences() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-_]")
            .expect("escape sequence pattern is valid")
    })
}

/// Make text safe to draw in the terminal.
///
/// Removes escape sequences and control characters so neither the user nor the
/// answering service can move the cursor, recolor the screen or retitle the
/// window. Newlines are kept, tabs expand to four spaces.
pub fn escape_text(text: &str) -> String {
    let stripped = escape_sequences().replace_all(text, "");
    let mut out = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
