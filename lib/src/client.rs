use reqwest::blocking;
use reqwest::header::CONTENT_TYPE;

use crate::api;
use crate::email::EmailMessage;
use crate::error::Error;

/// Boundary over the actual network call to the email service, so
/// callers (and tests) can swap the real client out.
pub trait EmailTransport {
    fn send_email(&self, message: &EmailMessage) -> Result<Vec<api::SendResult>, Error>;
}

pub struct Client {
    api_key: String,
    base_url: String,
    client: blocking::Client,
}

impl Client {
    pub fn from_api_key(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: api::SENDPOST_BASE_API.to_string(),
            client: blocking::Client::new(),
        }
    }

    /// Point the client at a different API host (e.g. a staging server).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[inline]
    fn request(&self, endpoint: api::Endpoint, body: String) -> Result<String, Error> {
        let url = api::build_endpoint_url(&self.base_url, endpoint);

        let req = self
            .client
            .post(reqwest::Url::parse(&url)?)
            .header(api::SUB_ACCOUNT_API_KEY_HEADER, self.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        let resp = api::map_status(req.send()?)?;

        Ok(resp.text()?)
    }
}

impl EmailTransport for Client {
    /// Submit one message; the API returns one result per recipient.
    fn send_email(&self, message: &EmailMessage) -> Result<Vec<api::SendResult>, Error> {
        let body = serde_json::to_string(message)?;

        log::debug!(
            "Submitting message to {} recipient(s): {}",
            message.to.len(),
            message.subject
        );

        let resp = self.request(api::Endpoint::SendEmail, body)?;
        serde_json::from_str(&resp).map_err(|e| e.into())
    }
}
