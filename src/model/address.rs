//! Email addresses with an optional display name.

/// An email address with an optional human-readable display name.
///
/// The display name drives the payload's `fromName` field: it is emitted only
/// when non-empty, never as an empty string.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    /// Human-readable display name (may be empty).
    pub display_name: String,
    /// The bare email address (`user@domain`).
    pub address: String,
}

impl EmailAddress {
    /// Create an address without a display name.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            display_name: String::new(),
            address: address.into(),
        }
    }

    /// Create an address with a display name.
    pub fn with_name(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            display_name: name.into(),
            address: address.into(),
        }
    }

    /// Parse a single address from a header-style string.
    ///
    /// Supported formats:
    /// - `"user@domain.com"`
    /// - `"<user@domain.com>"`
    /// - `"Display Name <user@domain.com>"`
    /// - `"\"Display, Name\" <user@domain.com>"`
    ///
    /// If nothing matches, the raw string is stored as `address`; validation
    /// is left to the remote API.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::new("");
        }

        // "Display Name <address>" or "<address>"
        if let Some(angle_start) = trimmed.rfind('<') {
            if let Some(angle_end) = trimmed.rfind('>') {
                if angle_end > angle_start {
                    let addr = trimmed[angle_start + 1..angle_end].trim();
                    let name = strip_quotes(trimmed[..angle_start].trim());
                    return Self {
                        display_name: name,
                        address: addr.to_string(),
                    };
                }
            }
        }

        Self::new(trimmed)
    }

    /// Whether the bare address is empty or whitespace-only.
    ///
    /// Blank addresses are treated as absent during recipient resolution.
    pub fn is_blank(&self) -> bool {
        self.address.trim().is_empty()
    }

    /// Format for display: `"Display Name <address>"` or just `"address"`.
    pub fn display(&self) -> String {
        if self.display_name.is_empty() {
            self.address.clone()
        } else {
            format!("{} <{}>", self.display_name, self.address)
        }
    }
}

impl From<&str> for EmailAddress {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for EmailAddress {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

/// Strip surrounding double-quotes and trim whitespace.
fn strip_quotes(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
