/// Extracts word tokens from text.
///
/// A token is a maximal run of ASCII letters, digits, or underscore; every
/// other character is a delimiter and is discarded. Order is preserved and
/// repeated tokens are kept: downstream shingling is positional.
///
/// The returned slices borrow from `text`, so tokenization allocates only the
/// vector itself.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if is_word_char(ch) {
            if start.is_none() {
                start = Some(idx);
            }
        } else if let Some(token_start) = start.take() {
            tokens.push(&text[token_start..idx]);
        }
    }

    if let Some(token_start) = start {
        tokens.push(&text[token_start..]);
    }

    tokens
}

#[inline]
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
