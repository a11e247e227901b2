//! Attachments: raw content or URL-sourced.
//!
//! A URL-sourced attachment carries its source URL in a reserved header
//! instead of inlining bytes. The marking is plain metadata on the attachment
//! itself, so it survives any copying or re-serialization that preserves
//! headers, and no shared lookup state is needed.

/// Reserved attachment header naming the source URL.
///
/// When present with a non-empty value, the attachment's content is ignored
/// and the URL is sent instead; content and url are mutually exclusive in the
/// outgoing payload.
pub const URL_HEADER: &str = "X-Freesend-Url";

/// An email attachment.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Attachment {
    /// Filename. The payload falls back to `"attachment"` when missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Raw content bytes. Empty for URL-sourced attachments.
    #[serde(default)]
    pub content: Vec<u8>,

    /// Declared MIME type. When absent, the API infers it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Custom header pairs, in insertion order.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

impl Attachment {
    /// Create an attachment from raw bytes.
    pub fn from_bytes(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: Some(filename.into()),
            content: content.into(),
            content_type: None,
            headers: Vec::new(),
        }
    }

    /// Create an attachment that the API fetches from a URL.
    ///
    /// The URL is carried in [`URL_HEADER`] and the content stays empty.
    /// Construction cannot fail; an invalid URL is left for the remote API to
    /// reject at send time.
    pub fn from_url(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            content: Vec::new(),
            content_type: None,
            headers: vec![(URL_HEADER.to_string(), url.into())],
        }
    }

    /// Declare the MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set a custom header, replacing any existing value for the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Look up a custom header value (case-insensitive name match).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The source URL, if this attachment is URL-marked.
    ///
    /// Returns `None` when the reserved header is absent or empty.
    pub fn url(&self) -> Option<&str> {
        self.header(URL_HEADER).filter(|v| !v.is_empty())
    }
}
