//! Identifier sanitization for metric names and label keys.

/// Rewrite `input` into the `[a-zA-Z0-9_]` alphabet.
///
/// Every byte outside the alphabet becomes `_`, so a multi-byte character
/// turns into one `_` per byte. A leading digit gets a `_` prefix. Empty
/// input stays empty.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 1);
    if input.as_bytes().first().is_some_and(u8::is_ascii_digit) {
        out.push('_');
    }
    out.extend(input.bytes().map(|b| {
        if b.is_ascii_alphanumeric() || b == b'_' {
            char::from(b)
        } else {
            '_'
        }
    }));
    out
}
