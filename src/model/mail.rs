//! Message and envelope types.

use super::address::EmailAddress;
use super::attachment::Attachment;

/// An outgoing email message.
///
/// The transport only reads these fields; a message is never mutated by a
/// send. Build one with [`Message::builder`].
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Message {
    /// Sender address. Falls back to the envelope sender when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<EmailAddress>,

    /// Primary recipients. Only the first usable entry is sent.
    #[serde(default)]
    pub to: Vec<EmailAddress>,

    /// Subject line (empty by default).
    #[serde(default)]
    pub subject: String,

    /// HTML body, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Plain-text body, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Attachments, in the order they were added.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Create a new message builder.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }
}

/// Transport-level sender/recipient information.
///
/// Used only as a fallback when the message's own headers don't resolve
/// unambiguously (e.g. blind-copy scenarios). An empty envelope is valid.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    /// Effective sender.
    pub sender: Option<EmailAddress>,
    /// Effective recipients.
    pub recipients: Vec<EmailAddress>,
}

impl Envelope {
    /// Create an envelope with a sender and recipients.
    pub fn new(
        sender: impl Into<EmailAddress>,
        recipients: impl IntoIterator<Item = impl Into<EmailAddress>>,
    ) -> Self {
        Self {
            sender: Some(sender.into()),
            recipients: recipients.into_iter().map(Into::into).collect(),
        }
    }
}

/// Builder for [`Message`] instances.
///
/// Construction never fails; sender/recipient resolution is validated when the
/// payload is built, so envelope fallbacks still apply.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    from: Option<EmailAddress>,
    to: Vec<EmailAddress>,
    subject: Option<String>,
    html: Option<String>,
    text: Option<String>,
    attachments: Vec<Attachment>,
}

impl MessageBuilder {
    /// Set the sender address. Accepts `"Name <addr>"` or a bare address.
    pub fn from(mut self, address: impl Into<EmailAddress>) -> Self {
        self.from = Some(address.into());
        self
    }

    /// Add a primary recipient.
    pub fn to(mut self, address: impl Into<EmailAddress>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the HTML body.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set the plain-text body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add an attachment.
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Build the message.
    pub fn build(self) -> Message {
        Message {
            from: self.from,
            to: self.to,
            subject: self.subject.unwrap_or_default(),
            html: self.html,
            text: self.text,
            attachments: self.attachments,
        }
    }
}
