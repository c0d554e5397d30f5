//! XPath string-literal escaping for values spliced into extraction paths.
//! XPath 1.0 has no escape sequence inside string literals, so a value
//! containing both quote kinds has to be rebuilt with `concat(...)`.

/// Quote `value` as an XPath string literal.
pub fn escape(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }
    if !value.contains('\'') {
        return format!("'{}'", value);
    }

    // Both quote kinds present: split on double quotes and stitch the pieces
    // back together with single-quoted double-quote separators.
    let mut parts: Vec<String> = Vec::new();
    for (index, chunk) in value.split('"').enumerate() {
        if index > 0 {
            parts.push("'\"'".to_string());
        }
        if !chunk.is_empty() {
            parts.push(format!("\"{}\"", chunk));
        }
    }
    format!("concat({})", parts.join(", "))
}

/// Double backslashes. MySQL consumes one level of backslash escaping in
/// string literals before the XPath engine sees them; the other dialects do
/// not.
pub fn escape_backslashes(value: &str) -> String {
    value.replace('\\', "\\\\")
}
