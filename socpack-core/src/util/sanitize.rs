//! Line-level repair of exported CSV text before it reaches the parser.

/// Drop NUL bytes and close an unterminated quote on every line that carries
/// an odd number of `"` characters.
///
/// Line count and order never change; `\r` stays where it was, so on CRLF
/// input the closing quote lands after it.
pub fn sanitize(content: &str) -> String {
    let cleaned = content.replace('\0', "");
    let mut out = String::with_capacity(cleaned.len() + 16);
    for (i, line) in cleaned.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line);
        if line.matches('"').count() % 2 == 1 {
            out.push('"');
        }
    }
    out
}
