use serde::Deserialize;

use crate::error::Error;

pub const SENDPOST_BASE_API: &str = "https://api.sendpost.io/api/v1";

/// Header carrying the tenant-scoped credential.
pub const SUB_ACCOUNT_API_KEY_HEADER: &str = "X-SubAccount-ApiKey";

pub enum Endpoint {
    SendEmail,
}

#[inline]
pub fn build_endpoint_url(base: &str, endpoint: Endpoint) -> String {
    match endpoint {
        Endpoint::SendEmail => format!("{}/{}", base, "subaccount/email/"),
    }
}

/// Map a non-2xx API response to a transport error carrying the
/// status code and raw response body.
pub fn map_status(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, Error> {
    let status = resp.status();

    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().unwrap_or_default();

    Err(Error::Transport {
        status: status.as_u16(),
        body,
    })
}

/// Per-recipient entry in the send endpoint's response.
#[derive(Clone, Debug, Deserialize)]
pub struct SendResult {
    #[serde(rename = "messageId")]
    pub message_id: String,
    pub to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_endpoint_url() {
        let url = build_endpoint_url(SENDPOST_BASE_API, Endpoint::SendEmail);
        assert_eq!(url, "https://api.sendpost.io/api/v1/subaccount/email/");
    }

    #[test]
    fn test_parse_send_results() {
        let body = r#"[{"messageId": "abc123", "to": "recipient@example.com"}]"#;
        let results: Vec<SendResult> = serde_json::from_str(body).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].message_id, "abc123");
        assert_eq!(results[0].to, "recipient@example.com");
    }
}
