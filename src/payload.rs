//! Translation of a message + envelope into the Freesend request body.
//!
//! Pure data transformation: no I/O, no mutation of the message. The only
//! failures are sender/recipient resolution; everything else always produces
//! a payload. Building twice from the same message yields byte-identical JSON.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{FreesendError, Result};
use crate::model::attachment::Attachment;
use crate::model::mail::{Envelope, Message};

/// Fallback filename for attachments that don't declare one.
const DEFAULT_FILENAME: &str = "attachment";

/// JSON request body for one send call.
///
/// Built fresh for every send and discarded once the response is processed.
/// Optional keys are omitted entirely when unset, never emitted as `null` or
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPayload {
    pub from_email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,

    pub to: String,

    pub subject: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentPayload>>,
}

/// One attachment entry in the request body.
///
/// Exactly one of `url` and `content` is set for any given entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentPayload {
    pub filename: String,

    /// Source URL for URL-marked attachments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Base64 of the raw bytes for content attachments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Build the request body for a message.
///
/// Field derivation, in order:
/// 1. Sender: message `from`, else envelope sender, else [`FreesendError::MissingSender`].
///    `fromName` is set only when the resolved address has a display name.
/// 2. Recipient: first non-blank message `to` entry, else first non-blank
///    envelope recipient, else [`FreesendError::MissingRecipient`].
/// 3. Subject: message subject (empty string when unset).
/// 4. Body: `html`/`text` each included iff non-empty; when both are missing,
///    `text` is forced to `""` so the API always receives a body field.
/// 5. Attachments: in message order, URL-marked entries carry `url`, the rest
///    carry base64 `content`; the key is omitted when the list is empty.
pub fn build_payload(message: &Message, envelope: &Envelope) -> Result<SendPayload> {
    let sender = message
        .from
        .as_ref()
        .filter(|a| !a.is_blank())
        .or_else(|| envelope.sender.as_ref().filter(|a| !a.is_blank()))
        .ok_or(FreesendError::MissingSender)?;

    let from_name = if sender.display_name.is_empty() {
        None
    } else {
        Some(sender.display_name.clone())
    };

    let to = message
        .to
        .iter()
        .find(|a| !a.is_blank())
        .or_else(|| envelope.recipients.iter().find(|a| !a.is_blank()))
        .ok_or(FreesendError::MissingRecipient)?;

    let html = message.html.as_ref().filter(|s| !s.is_empty()).cloned();
    let mut text = message.text.as_ref().filter(|s| !s.is_empty()).cloned();
    if html.is_none() && text.is_none() {
        // The API requires at least one body field.
        text = Some(String::new());
    }

    let attachments = if message.attachments.is_empty() {
        None
    } else {
        Some(message.attachments.iter().map(attachment_entry).collect())
    };

    Ok(SendPayload {
        from_email: sender.address.clone(),
        from_name,
        to: to.address.clone(),
        subject: message.subject.clone(),
        html,
        text,
        attachments,
    })
}

/// Classify a single attachment as URL-sourced or content-sourced.
fn attachment_entry(attachment: &Attachment) -> AttachmentPayload {
    let filename = attachment
        .filename
        .clone()
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

    match attachment.url() {
        Some(url) => AttachmentPayload {
            filename,
            url: Some(url.to_string()),
            content: None,
            content_type: attachment.content_type.clone(),
        },
        None => AttachmentPayload {
            filename,
            url: None,
            content: Some(BASE64.encode(&attachment.content)),
            content_type: attachment.content_type.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;

    use super::*;
    use crate::model::address::EmailAddress;

    fn json(message: &Message, envelope: &Envelope) -> serde_json::Value {
        let payload = build_payload(message, envelope).unwrap();
        serde_json::to_value(&payload).unwrap()
    }

    // ─── Sender resolution ──────────────────────────────────────────────

    #[test]
    fn test_from_name_present_when_display_name_set() {
        let message = Message::builder()
            .from("Jane Doe <jane@example.com>")
            .to("to@example.com")
            .build();
        let value = json(&message, &Envelope::default());
        assert_eq!(value["fromEmail"], "jane@example.com");
        assert_eq!(value["fromName"], "Jane Doe");
    }

    #[test]
    fn test_from_name_key_absent_without_display_name() {
        let message = Message::builder()
            .from("jane@example.com")
            .to("to@example.com")
            .build();
        let value = json(&message, &Envelope::default());
        assert_eq!(value["fromEmail"], "jane@example.com");
        assert!(value.get("fromName").is_none(), "fromName must be absent, not empty");
    }

    #[test]
    fn test_sender_falls_back_to_envelope() {
        let message = Message::builder().to("to@example.com").build();
        let envelope = Envelope::new("bounce@example.com", Vec::<&str>::new());
        let value = json(&message, &envelope);
        assert_eq!(value["fromEmail"], "bounce@example.com");
    }

    #[test]
    fn test_missing_sender_fails() {
        let message = Message::builder().to("to@example.com").build();
        let err = build_payload(&message, &Envelope::default()).unwrap_err();
        assert!(matches!(err, FreesendError::MissingSender));
    }

    // ─── Recipient resolution ───────────────────────────────────────────

    #[test]
    fn test_message_to_wins_over_envelope() {
        let message = Message::builder()
            .from("from@example.com")
            .to("first@example.com")
            .to("second@example.com")
            .build();
        let envelope = Envelope::new("from@example.com", ["envelope@example.com"]);
        let value = json(&message, &envelope);
        assert_eq!(value["to"], "first@example.com");
    }

    #[test]
    fn test_envelope_recipient_fallback() {
        let message = Message::builder().from("from@example.com").build();
        let envelope = Envelope::new("from@example.com", ["bcc@example.com"]);
        let value = json(&message, &envelope);
        assert_eq!(value["to"], "bcc@example.com");
    }

    #[test]
    fn test_missing_recipient_fails() {
        let message = Message::builder().from("from@example.com").build();
        let err = build_payload(&message, &Envelope::default()).unwrap_err();
        assert!(matches!(err, FreesendError::MissingRecipient));
    }

    #[test]
    fn test_whitespace_recipient_treated_as_absent() {
        let mut message = Message::builder().from("from@example.com").build();
        message.to.push(EmailAddress::new("   "));
        let err = build_payload(&message, &Envelope::default()).unwrap_err();
        assert!(matches!(err, FreesendError::MissingRecipient));
    }

    #[test]
    fn test_blank_to_entry_skipped_for_next_usable() {
        let mut message = Message::builder().from("from@example.com").build();
        message.to.push(EmailAddress::new(""));
        message.to.push(EmailAddress::new("real@example.com"));
        let value = json(&message, &Envelope::default());
        assert_eq!(value["to"], "real@example.com");
    }

    // ─── Body fields ────────────────────────────────────────────────────

    #[test]
    fn test_html_only_message_has_no_text_key() {
        let message = Message::builder()
            .from("sender@example.com")
            .to("recipient@example.com")
            .subject("Test Subject")
            .html("<h1>Hello World</h1>")
            .build();
        let value = json(&message, &Envelope::default());
        assert_eq!(
            value,
            serde_json::json!({
                "fromEmail": "sender@example.com",
                "to": "recipient@example.com",
                "subject": "Test Subject",
                "html": "<h1>Hello World</h1>",
            })
        );
    }

    #[test]
    fn test_empty_bodies_force_empty_text() {
        let message = Message::builder()
            .from("a@example.com")
            .to("b@example.com")
            .build();
        let value = json(&message, &Envelope::default());
        assert_eq!(value["text"], "");
        assert!(value.get("html").is_none());
    }

    #[test]
    fn test_both_bodies_present() {
        let message = Message::builder()
            .from("a@example.com")
            .to("b@example.com")
            .html("<p>hi</p>")
            .text("hi")
            .build();
        let value = json(&message, &Envelope::default());
        assert_eq!(value["html"], "<p>hi</p>");
        assert_eq!(value["text"], "hi");
    }

    #[test]
    fn test_empty_string_html_treated_as_absent() {
        let message = Message::builder()
            .from("a@example.com")
            .to("b@example.com")
            .html("")
            .build();
        let value = json(&message, &Envelope::default());
        assert!(value.get("html").is_none());
        assert_eq!(value["text"], "");
    }

    // ─── Attachments ────────────────────────────────────────────────────

    #[test]
    fn test_no_attachments_key_when_list_empty() {
        let message = Message::builder()
            .from("a@example.com")
            .to("b@example.com")
            .build();
        let value = json(&message, &Envelope::default());
        assert!(value.get("attachments").is_none(), "must omit key, not emit []");
    }

    #[test]
    fn test_url_attachment_round_trip() {
        let message = Message::builder()
            .from("a@example.com")
            .to("b@example.com")
            .attach(
                Attachment::from_url("https://example.com/report.pdf", "report.pdf")
                    .with_content_type("application/pdf"),
            )
            .build();
        let value = json(&message, &Envelope::default());
        assert_eq!(
            value["attachments"][0],
            serde_json::json!({
                "filename": "report.pdf",
                "url": "https://example.com/report.pdf",
                "contentType": "application/pdf",
            })
        );
    }

    #[test]
    fn test_raw_attachment_is_base64() {
        let bytes = b"binary\x00content".to_vec();
        let message = Message::builder()
            .from("a@example.com")
            .to("b@example.com")
            .attach(Attachment::from_bytes("data.bin", bytes.clone()))
            .build();
        let value = json(&message, &Envelope::default());
        let entry = &value["attachments"][0];
        assert_eq!(entry["content"], BASE64.encode(&bytes));
        assert!(entry.get("url").is_none());
    }

    #[test]
    fn test_url_marked_content_is_ignored() {
        // Content and url are mutually exclusive; the marker wins.
        let att = Attachment::from_bytes("mixed.txt", b"bytes".to_vec())
            .with_header(crate::model::attachment::URL_HEADER, "https://example.com/f");
        let message = Message::builder()
            .from("a@example.com")
            .to("b@example.com")
            .attach(att)
            .build();
        let value = json(&message, &Envelope::default());
        let entry = &value["attachments"][0];
        assert_eq!(entry["url"], "https://example.com/f");
        assert!(entry.get("content").is_none());
    }

    #[test]
    fn test_missing_filename_defaults() {
        let att = Attachment {
            filename: None,
            content: b"x".to_vec(),
            content_type: None,
            headers: Vec::new(),
        };
        let message = Message::builder()
            .from("a@example.com")
            .to("b@example.com")
            .attach(att)
            .build();
        let value = json(&message, &Envelope::default());
        assert_eq!(value["attachments"][0]["filename"], "attachment");
    }

    #[test]
    fn test_attachment_order_preserved() {
        let message = Message::builder()
            .from("a@example.com")
            .to("b@example.com")
            .attach(Attachment::from_bytes("one.txt", b"1".to_vec()))
            .attach(Attachment::from_url("https://example.com/two", "two.txt"))
            .attach(Attachment::from_bytes("three.txt", b"3".to_vec()))
            .build();
        let value = json(&message, &Envelope::default());
        let list = value["attachments"].as_array().unwrap();
        assert_eq!(list[0]["filename"], "one.txt");
        assert_eq!(list[1]["filename"], "two.txt");
        assert_eq!(list[2]["filename"], "three.txt");
    }

    // ─── Determinism ────────────────────────────────────────────────────

    #[test]
    fn test_translation_is_idempotent() {
        let message = Message::builder()
            .from("Jane <jane@example.com>")
            .to("to@example.com")
            .subject("Subject")
            .html("<p>hi</p>")
            .attach(Attachment::from_bytes("a.txt", b"abc".to_vec()))
            .attach(Attachment::from_url("https://example.com/b", "b.txt"))
            .build();
        let envelope = Envelope::default();
        let first = serde_json::to_vec(&build_payload(&message, &envelope).unwrap()).unwrap();
        let second = serde_json::to_vec(&build_payload(&message, &envelope).unwrap()).unwrap();
        assert_eq!(first, second, "same message must serialize byte-identically");
    }
}
