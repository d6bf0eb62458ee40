use std::borrow::Cow;

/// Escape text for interpolation into HTML element content or attribute values.
///
/// Each character is substituted at most once, so entities produced here are
/// never escaped a second time.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(|ch| entity(ch).is_some()) else {
        return Cow::Borrowed(text);
    };

    let mut escaped = String::with_capacity(text.len() + 16);
    escaped.push_str(&text[..first]);
    for ch in text[first..].chars() {
        match entity(ch) {
            Some(replacement) => escaped.push_str(replacement),
            None => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

fn entity(ch: char) -> Option<&'static str> {
    match ch {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(
            escape_html("plain words"),
            std::borrow::Cow::Borrowed("plain words")
        ));
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn escapes_every_special_character() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn only_special_characters() {
        assert_eq!(escape_html("&<>\"'"), "&amp;&lt;&gt;&quot;&#39;");
    }

    #[test]
    fn existing_entities_are_escaped_once() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
        assert_eq!(escape_html("&lt;b&gt;"), "&amp;lt;b&amp;gt;");
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(escape_html("café <☑>"), "café &lt;☑&gt;");
    }
}
