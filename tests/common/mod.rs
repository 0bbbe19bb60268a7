#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every helper

use smart_backspace::{ContentType, EditorSession, InterceptorRegistry};
use tracing::Level;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Open `lines` joined with `\n` as structured text.
pub fn java_session(lines: &[&str]) -> EditorSession {
    EditorSession::open(
        &InterceptorRegistry::with_defaults(),
        ContentType::JAVA,
        &lines.join("\n"),
    )
}

pub fn plain_session(lines: &[&str]) -> EditorSession {
    EditorSession::open(
        &InterceptorRegistry::with_defaults(),
        ContentType::PLAIN,
        &lines.join("\n"),
    )
}

/// Offset of `col` on `line` of `text`.
pub fn offset_of(text: &str, line: usize, col: usize) -> usize {
    text.split('\n')
        .take(line)
        .map(|l| l.chars().count() + 1)
        .sum::<usize>()
        + col
}

/// Render a buffer with visible whitespace: `·` for space, `→` for tab,
/// `⏎` before each newline and `|` at the caret.
pub fn visualize(text: &str, dot: usize) -> String {
    let mut out = String::new();
    for (idx, ch) in text.chars().enumerate() {
        if idx == dot {
            out.push('|');
        }
        match ch {
            ' ' => out.push('·'),
            '\t' => out.push('→'),
            '\r' => out.push('␍'),
            '\n' => out.push_str("⏎\n"),
            c => out.push(c),
        }
    }
    if dot >= text.chars().count() {
        out.push('|');
    }
    out
}

pub fn render(session: &EditorSession) -> String {
    visualize(&session.text(), session.dot())
}
