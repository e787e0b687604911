//! JSONC normalization.
//!
//! Turns the commented, trailing-comma-tolerant JSON used by the registry
//! data files and report settings into plain JSON that `serde_json` accepts.
//!
//! Handles:
//! - `//` line comments (the terminating newline is kept)
//! - `/* ... */` block comments
//! - trailing commas before `}` or `]`
//! - string literals, including escaped quotes, are copied verbatim

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    Str,
    StrEscape,
    LineComment,
    BlockComment,
}

/// Convert JSONC input into plain JSON.
///
/// Comment-like sequences and commas inside string literals are preserved.
/// An unterminated block comment swallows the rest of the input.
#[must_use]
pub fn strip_jsonc(input: &str) -> String {
    strip_trailing_commas(&strip_comments(input))
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut mode = Mode::Code;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match mode {
            Mode::Code => match c {
                '"' => {
                    out.push(c);
                    mode = Mode::Str;
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    mode = Mode::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    mode = Mode::BlockComment;
                }
                _ => out.push(c),
            },
            Mode::Str => {
                out.push(c);
                match c {
                    '\\' => mode = Mode::StrEscape,
                    '"' => mode = Mode::Code,
                    _ => {}
                }
            }
            Mode::StrEscape => {
                out.push(c);
                mode = Mode::Str;
            }
            Mode::LineComment => {
                if c == '\n' {
                    out.push(c);
                    mode = Mode::Code;
                }
            }
            Mode::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    mode = Mode::Code;
                }
            }
        }
    }
    out
}

fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_str = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if in_str {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_str = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_str = true;
                out.push(c);
            }
            // ',' is one byte, so `i + 1` is always a char boundary.
            ',' if closes_container(&input[i + 1..]) => {}
            _ => out.push(c),
        }
    }
    out
}

fn closes_container(rest: &str) -> bool {
    matches!(rest.trim_start().chars().next(), Some('}' | ']'))
}
