use crate::sql::{token::Token, token_kind::TokenKind};

/// Lenient SQL scanner producing a flat, gap-free stream of segments.
///
/// States, in priority order while scanning plain code:
/// - `'` or `"` opens a quote closed by the same character; a doubled
///   delimiter inside the quote is an escaped literal and does not close it.
/// - `[` opens a bracketed identifier closed by the next `]` (no doubling).
/// - `--` runs to the end of the line, `/*` to the first `*/` (no nesting).
/// - `;` is a statement terminator.
///
/// Anything left open at end of input simply runs to the end; this never fails.
/// Adjacent code characters are merged into one `Code` segment, so
/// concatenating every segment's text reproduces the input.
///
/// Only ASCII delimiters are inspected, which keeps every offset on a char
/// boundary for any UTF-8 input.
pub fn tokenize(sql: &str) -> Vec<Token> {
    let bytes = sql.as_bytes();
    let mut out = Vec::new();
    let mut code_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let region = match bytes[i] {
            q @ (b'\'' | b'"') => Some((TokenKind::Quoted(q as char), close_quote(bytes, i + 1, q))),
            b'[' => Some((
                TokenKind::Bracketed,
                find_byte(bytes, i + 1, b']').map_or(bytes.len(), |p| p + 1),
            )),
            b'-' if bytes.get(i + 1) == Some(&b'-') => Some((
                TokenKind::LineComment,
                find_byte(bytes, i + 2, b'\n').unwrap_or(bytes.len()),
            )),
            b'/' if bytes.get(i + 1) == Some(&b'*') => Some((
                TokenKind::BlockComment,
                find_block_end(bytes, i + 2).unwrap_or(bytes.len()),
            )),
            b';' => Some((TokenKind::Terminator, i + 1)),
            _ => None,
        };

        match region {
            Some((kind, end)) => {
                if code_start < i {
                    out.push(Token::new(TokenKind::Code, code_start, i));
                }
                out.push(Token::new(kind, i, end));
                i = end;
                code_start = end;
            }
            None => i += 1,
        }
    }

    if code_start < bytes.len() {
        out.push(Token::new(TokenKind::Code, code_start, bytes.len()));
    }
    out
}

/// End (exclusive) of a quote whose body starts at `from`.
fn close_quote(bytes: &[u8], from: usize, quote: u8) -> usize {
    let mut j = from;
    while j < bytes.len() {
        if bytes[j] == quote {
            if bytes.get(j + 1) == Some(&quote) {
                j += 2;
                continue;
            }
            return j + 1;
        }
        j += 1;
    }
    bytes.len()
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|p| p + from)
}

/// End (exclusive) of the first `*/` at or after `from`.
fn find_block_end(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(2)
        .position(|w| w == b"*/")
        .map(|p| p + from + 2)
}
