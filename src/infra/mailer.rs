//! Outbound email dispatch.
//!
//! The rendered notification goes out through the `Mailer` seam; production
//! uses the SendGrid v3 `mail/send` JSON API. Dispatch failures are isolated
//! by the pipeline and never decide the caller-visible outcome.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use super::{Result, SubmitError};

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// One email attachment, base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAttachment {
    /// Base64-encoded payload bytes.
    pub content: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub disposition: String,
}

/// A fully composed outbound notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: Vec<String>,
    pub from: String,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<EmailAttachment>,
}

/// Email delivery seam.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}

/// SendGrid v3 client. The API credential is injected at construction;
/// startup fails fast when it is absent.
#[derive(Debug, Clone)]
pub struct SendGridMailer {
    http: reqwest::Client,
    api_key: String,
}

#[derive(Serialize)]
struct SgAddress<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct SgPersonalization<'a> {
    to: Vec<SgAddress<'a>>,
}

#[derive(Serialize)]
struct SgContent<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct SgSendRequest<'a> {
    personalizations: Vec<SgPersonalization<'a>>,
    from: SgAddress<'a>,
    subject: &'a str,
    content: Vec<SgContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<&'a EmailAttachment>,
}

impl SendGridMailer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let request = SgSendRequest {
            personalizations: vec![SgPersonalization {
                to: email.to.iter().map(|e| SgAddress { email: e }).collect(),
            }],
            from: SgAddress { email: &email.from },
            subject: &email.subject,
            content: vec![SgContent {
                content_type: "text/html",
                value: &email.html,
            }],
            attachments: email.attachments.iter().collect(),
        };

        let response = self
            .http
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SubmitError::Dispatch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Dispatch(format!(
                "sendgrid responded {status}: {body}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_request_omits_empty_attachments() {
        let email = OutboundEmail {
            to: vec!["reviewer@example.com".to_string()],
            from: "sender@example.com".to_string(),
            subject: "New Loyalty Program Setup: Hotel Aurora".to_string(),
            html: "<html></html>".to_string(),
            attachments: vec![],
        };

        let request = SgSendRequest {
            personalizations: vec![SgPersonalization {
                to: email.to.iter().map(|e| SgAddress { email: e }).collect(),
            }],
            from: SgAddress { email: &email.from },
            subject: &email.subject,
            content: vec![SgContent {
                content_type: "text/html",
                value: &email.html,
            }],
            attachments: email.attachments.iter().collect(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("attachments").is_none());
        assert_eq!(json["personalizations"][0]["to"][0]["email"], "reviewer@example.com");
        assert_eq!(json["content"][0]["type"], "text/html");
    }

    #[test]
    fn attachment_serializes_with_wire_names() {
        let attachment = EmailAttachment {
            content: "aGVsbG8=".to_string(),
            filename: "logo.png".to_string(),
            mime_type: "image/png".to_string(),
            disposition: "attachment".to_string(),
        };
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["type"], "image/png");
        assert_eq!(json["disposition"], "attachment");
        assert_eq!(json["content"], "aGVsbG8=");
    }
}
