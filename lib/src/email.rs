/// Message model for the SendPost send endpoint.
/// All types are plain value records built through validated
/// constructors; serde renames map them onto the API's JSON schema.
use std::path::Path;

use serde::Serialize;

use crate::error::Error;

/// A single address with an optional display name.
#[derive(Clone, Debug, Serialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    /// Builds an address, rejecting anything that is not `local@domain`.
    pub fn new(email: &str, name: Option<&str>) -> Result<Self, Error> {
        let mut parts = email.splitn(2, '@');
        let local = parts.next().unwrap_or("");
        let domain = parts.next().unwrap_or("");

        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(Error::Validation(format!(
                "invalid email address: {:?}",
                email
            )));
        }

        Ok(Self {
            email: email.to_string(),
            name: name.map(|n| n.to_string()),
        })
    }
}

/// Primary recipient plus the CC/BCC lists scoped to it.
///
/// CC and BCC are wire-encoded *under* this entry, never at the top
/// level of the message, so a BCC list only ever belongs to its own
/// recipient entry.
#[derive(Clone, Debug, Serialize)]
pub struct Recipient {
    #[serde(flatten)]
    pub address: EmailAddress,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<EmailAddress>,
}

impl Recipient {
    pub fn new(address: EmailAddress) -> Self {
        Self {
            address,
            cc: Vec::new(),
            bcc: Vec::new(),
        }
    }

    pub fn with_cc(mut self, cc: Vec<EmailAddress>) -> Self {
        self.cc = cc;
        self
    }

    pub fn with_bcc(mut self, bcc: Vec<EmailAddress>) -> Self {
        self.bcc = bcc;
        self
    }
}

/// A file attachment. `content` holds the Base64-encoded file bytes,
/// as the API expects.
#[derive(Clone, Debug, Serialize)]
pub struct Attachment {
    pub filename: String,
    pub content: String,
}

impl Attachment {
    /// Base64-encodes raw bytes under the given filename.
    pub fn from_bytes(filename: &str, data: &[u8]) -> Result<Self, Error> {
        if filename.is_empty() {
            return Err(Error::Validation("attachment filename is empty".to_string()));
        }

        Ok(Self {
            filename: filename.to_string(),
            content: base64::encode(data),
        })
    }

    /// Reads a file and Base64-encodes it, named after its base name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Validation(format!("bad attachment path: {:?}", path)))?;

        Self::from_bytes(filename, &data)
    }

    /// Wraps content that is already Base64 text, verifying it decodes.
    pub fn from_base64(filename: &str, content: &str) -> Result<Self, Error> {
        if filename.is_empty() {
            return Err(Error::Validation("attachment filename is empty".to_string()));
        }

        base64::decode(content)?;

        Ok(Self {
            filename: filename.to_string(),
            content: content.to_string(),
        })
    }
}

/// A fully validated message, ready for the wire.
#[derive(Clone, Debug, Serialize)]
pub struct EmailMessage {
    pub from: EmailAddress,
    pub to: Vec<Recipient>,
    pub subject: String,
    #[serde(rename = "htmlBody", skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    #[serde(rename = "textBody", skip_serializing_if = "Option::is_none")]
    pub text_body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(rename = "trackOpens")]
    pub track_opens: bool,
    #[serde(rename = "trackClicks")]
    pub track_clicks: bool,
}

impl EmailMessage {
    pub fn builder(from: EmailAddress, subject: &str) -> MessageBuilder {
        MessageBuilder {
            from,
            to: Vec::new(),
            subject: subject.to_string(),
            html_body: None,
            text_body: None,
            attachments: Vec::new(),
            track_opens: false,
            track_clicks: false,
        }
    }
}

/// Assembles an `EmailMessage`; `build` enforces the message
/// invariants (at least one recipient, at least one non-empty body).
pub struct MessageBuilder {
    from: EmailAddress,
    to: Vec<Recipient>,
    subject: String,
    html_body: Option<String>,
    text_body: Option<String>,
    attachments: Vec<Attachment>,
    track_opens: bool,
    track_clicks: bool,
}

impl MessageBuilder {
    pub fn to(mut self, recipient: Recipient) -> Self {
        self.to.push(recipient);
        self
    }

    pub fn html_body(mut self, body: &str) -> Self {
        self.html_body = Some(body.to_string());
        self
    }

    pub fn text_body(mut self, body: &str) -> Self {
        self.text_body = Some(body.to_string());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn track_opens(mut self, enable: bool) -> Self {
        self.track_opens = enable;
        self
    }

    pub fn track_clicks(mut self, enable: bool) -> Self {
        self.track_clicks = enable;
        self
    }

    pub fn build(self) -> Result<EmailMessage, Error> {
        if self.to.is_empty() {
            return Err(Error::Validation("message has no recipients".to_string()));
        }

        // An empty string counts as no body at all
        let has_html = self.html_body.as_ref().map_or(false, |b| !b.is_empty());
        let has_text = self.text_body.as_ref().map_or(false, |b| !b.is_empty());

        if !has_html && !has_text {
            return Err(Error::Validation(
                "message has neither an HTML nor a text body".to_string(),
            ));
        }

        Ok(EmailMessage {
            from: self.from,
            to: self.to,
            subject: self.subject,
            html_body: self.html_body,
            text_body: self.text_body,
            attachments: self.attachments,
            track_opens: self.track_opens,
            track_clicks: self.track_clicks,
        })
    }
}
