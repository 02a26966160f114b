//! Escaping for user-controlled text embedded in the notification email.

/// Escapes the five HTML-significant characters. Ampersand goes first so
/// already-produced entities are not double-mangled.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Converts line breaks to `<br/>`, treating CRLF, CR and LF each as a
/// single break.
pub fn newlines_to_breaks(input: &str) -> String {
    input
        .replace("\r\n", "<br/>")
        .replace('\r', "<br/>")
        .replace('\n', "<br/>")
}

/// Escape first, then break lines. Used for the free-text message field.
pub fn escape_html_with_breaks(input: &str) -> String {
    newlines_to_breaks(&escape_html(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_entities() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn does_not_double_escape_ampersands_in_one_pass() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn each_newline_convention_becomes_one_break() {
        assert_eq!(newlines_to_breaks("a\r\nb\rc\nd"), "a<br/>b<br/>c<br/>d");
    }

    #[test]
    fn escapes_before_breaking_lines() {
        assert_eq!(
            escape_html_with_breaks("<hi>\nthere"),
            "&lt;hi&gt;<br/>there"
        );
    }
}
