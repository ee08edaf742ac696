use crate::sql::tokenizer::tokenize;

/// Blank out comments, keeping every byte offset and line break intact.
///
/// Each comment character becomes as many spaces as its UTF-8 width, so
/// offsets found in the masked text index the original one unchanged.
pub fn mask_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for token in tokenize(text) {
        let slice = token.text(text);
        if !token.kind.is_comment() {
            out.push_str(slice);
            continue;
        }
        for c in slice.chars() {
            match c {
                '\n' | '\r' => out.push(c),
                _ => out.extend(std::iter::repeat_n(' ', c.len_utf8())),
            }
        }
    }
    out
}
