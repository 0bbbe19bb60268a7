//! Fuzz target for the deletion lifecycle.
//!
//! Drives random edits, caret moves and deletions through an editor session
//! and checks that nothing panics, the caret stays inside the document and no
//! event state outlives its deletion.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use smart_backspace::{Caret, ContentType, Document, EditorSession, InterceptorRegistry};

#[derive(Arbitrary, Debug)]
enum Op {
    Type(String),
    MoveTo(u16),
    Select(u16, u16),
    Backspace,
    DeleteForward,
}

#[derive(Arbitrary, Debug)]
struct Input {
    structured: bool,
    text: String,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let content_type = if input.structured {
        ContentType::JAVA
    } else {
        ContentType::PLAIN
    };
    let registry = InterceptorRegistry::with_defaults();
    let mut session = EditorSession::open(&registry, content_type, &input.text);

    for op in input.ops.into_iter().take(256) {
        match op {
            Op::Type(text) => {
                let _ = session.insert_text(&text);
            }
            Op::MoveTo(offset) => session.set_dot(usize::from(offset)),
            Op::Select(anchor, dot) => {
                let len = session.buffer().len_chars();
                session.select(usize::from(anchor).min(len), usize::from(dot).min(len));
            }
            Op::Backspace => {
                let _ = session.backspace();
            }
            Op::DeleteForward => {
                let _ = session.delete_forward();
            }
        }

        let buffer = session.buffer();
        assert!(buffer.dot() <= buffer.len_chars());
        assert!(buffer.mark() <= buffer.len_chars());
        assert!(session.interceptor().is_none_or(|i| i.state().is_idle()));
    }
});
