/// Convert a plain-text message into display-safe HTML: markup is escaped
/// and line breaks become `<br/>`. Applied to error messages coming from
/// external services before they are surfaced to the customer.
pub fn text_to_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("<br/>"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            text_to_html(r#"<b>"alert"</b> & 'more'"#),
            "&lt;b&gt;&quot;alert&quot;&lt;/b&gt; &amp; &#39;more&#39;"
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(text_to_html("line one\r\nline two"), "line one<br/>line two");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(text_to_html("out of stock"), "out of stock");
    }
}
