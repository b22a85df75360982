//! Outbound channel link builders.

/// Messaging deep-link base (WhatsApp click-to-chat).
const MESSAGING_BASE: &str = "https://wa.me";

/// Deep link opening a messaging conversation with `phone`, pre-filled
/// with `text`.
#[must_use]
pub fn messaging_link(phone: &str, text: &str) -> String {
    format!("{MESSAGING_BASE}/{phone}?text={}", urlencoding::encode(text))
}

/// Mail-composition link carrying `subject` and `body`.
#[must_use]
pub fn mailto_link(subject: &str, body: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messaging_link_encodes_text() {
        let link = messaging_link("+233240000000", "Hello! I have a question.");
        assert_eq!(
            link,
            "https://wa.me/+233240000000?text=Hello%21%20I%20have%20a%20question."
        );
    }

    #[test]
    fn test_mailto_link_encodes_subject_and_body() {
        let link = mailto_link("New Order from Ama", "Subtotal: GHS 120.00\n");
        assert!(link.starts_with("mailto:?subject=New%20Order%20from%20Ama&body="));
        assert!(link.contains("Subtotal%3A%20GHS%20120.00%0A"));
    }
}
