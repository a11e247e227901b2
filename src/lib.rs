//! `freesend` — mail transport for the Freesend HTTP email API.
//!
//! This crate translates a message and its envelope into the Freesend JSON
//! request body, performs one authenticated POST per send, and maps HTTP and
//! transport failures into a typed error model. Attachments can carry raw
//! bytes or a source URL the API fetches itself.
//!
//! # Quick start
//!
//! ```no_run
//! use freesend::{Attachment, Envelope, FreesendTransport, Mailer, Message};
//! use freesend::config::{Config, MailerSettings};
//!
//! # async fn demo() -> freesend::Result<()> {
//! let credentials = Config::load().resolve(&MailerSettings::default())?;
//! let transport = FreesendTransport::new(credentials)?;
//!
//! let message = Message::builder()
//!     .from("Jane <jane@example.com>")
//!     .to("user@example.com")
//!     .subject("Welcome!")
//!     .html("<h1>Hello</h1>")
//!     .attach(Attachment::from_url("https://example.com/guide.pdf", "guide.pdf"))
//!     .build();
//!
//! transport.send(&message, &Envelope::default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Retries, rate limiting, and queuing are deliberately out of scope; every
//! `send` is a single attempt and every failure is surfaced to the caller.

pub mod config;
pub mod error;
pub mod model;
pub mod payload;
pub mod registry;
pub mod transport;

pub use config::{Config, Credentials, MailerSettings, DEFAULT_ENDPOINT};
pub use error::{FreesendError, Result};
pub use model::address::EmailAddress;
pub use model::attachment::{Attachment, URL_HEADER};
pub use model::mail::{Envelope, Message, MessageBuilder};
pub use payload::{build_payload, AttachmentPayload, SendPayload};
pub use registry::MailerRegistry;
pub use transport::{FreesendTransport, Mailer, SentReceipt, TRANSPORT_NAME};
