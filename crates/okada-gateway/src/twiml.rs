// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal TwiML rendering.
//!
//! The webhook only ever answers with a single `<Message>` element, so a
//! small renderer beats an XML dependency. Reply text is user-visible and
//! may contain `&`, `<`, and quotes; everything is escaped.

/// Render a one-message TwiML response document.
pub fn message_response(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        escape(body)
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_body_in_response_message() {
        let xml = message_response("Hello");
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>Hello</Message></Response>"
        );
    }

    #[test]
    fn escapes_markup_in_menu_text() {
        let xml = message_response("Jollof & Fried Rice <extra> \"portion\"");
        assert!(xml.contains("Jollof &amp; Fried Rice &lt;extra&gt; &quot;portion&quot;"));
        assert!(!xml.contains("& F"));
    }

    #[test]
    fn preserves_newlines_and_emoji() {
        let xml = message_response("line one\nline two \u{2705}");
        assert!(xml.contains("line one\nline two \u{2705}"));
    }
}
