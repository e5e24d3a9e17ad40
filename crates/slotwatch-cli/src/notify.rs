//! Notification backends used when open appointments are found.
//!
//! Delivery is fire-and-forget from the poll loop's point of view: errors are
//! returned so they can be logged, never so they can stop polling.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use slotwatch_core::{AppConfig, Location};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned HTTP status {status}")]
    UnexpectedStatus { status: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Notification {
    pub title: String,
    pub message: String,
    pub timeout_secs: u32,
}

impl Notification {
    pub(crate) fn for_location(location: &Location, timeout_secs: u32) -> Self {
        Self {
            title: format!("Appointment found at {}!", location.name),
            message: format!("Next available: {}", location.next_appointment_display()),
            timeout_secs,
        }
    }
}

pub(crate) trait Notifier {
    fn notify(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Writes each notification to stdout.
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        println!("*** {} {}", notification.title, notification.message);
        Ok(())
    }
}

/// POSTs each notification as JSON to a webhook URL.
pub(crate) struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub(crate) fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let response = self.client.post(&self.url).json(notification).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Console output plus the optional webhook from configuration.
pub(crate) struct DefaultNotifier {
    console: ConsoleNotifier,
    webhook: Option<WebhookNotifier>,
}

impl DefaultNotifier {
    pub(crate) fn from_config(config: &AppConfig) -> Result<Self, NotifyError> {
        let webhook = config
            .webhook_url
            .as_deref()
            .map(|url| WebhookNotifier::new(url, config.request_timeout_secs, &config.user_agent))
            .transpose()?;
        Ok(Self {
            console: ConsoleNotifier,
            webhook,
        })
    }
}

impl Notifier for DefaultNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.console.notify(notification).await?;
        if let Some(webhook) = &self.webhook {
            webhook.notify(notification).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn location() -> Location {
        Location {
            name: "Bayonne".to_string(),
            street: "1010 Hudson St".to_string(),
            city: "Bayonne".to_string(),
            state: "NJ".to_string(),
            zip_code: "07002".to_string(),
            phone: "201-555-0100".to_string(),
            appointments: Some(3),
            next_appointment_date: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(15, 10, 0),
        }
    }

    #[test]
    fn notification_names_location_and_time() {
        let notification = Notification::for_location(&location(), 10);
        assert_eq!(notification.title, "Appointment found at Bayonne!");
        assert_eq!(notification.message, "Next available: 03/15/2024 03:10 PM");
        assert_eq!(notification.timeout_secs, 10);
    }

    #[tokio::test]
    async fn webhook_posts_notification_json() {
        let server = MockServer::start().await;
        let notification = Notification::for_location(&location(), 10);
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(body_json(serde_json::json!({
                "title": "Appointment found at Bayonne!",
                "message": "Next available: 03/15/2024 03:10 PM",
                "timeout_secs": 10
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let webhook =
            WebhookNotifier::new(&format!("{}/hook", server.uri()), 5, "slotwatch-test").unwrap();
        let result = webhook.notify(&notification).await;
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
    }

    #[tokio::test]
    async fn webhook_reports_failed_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let webhook = WebhookNotifier::new(&server.uri(), 5, "slotwatch-test").unwrap();
        let result = webhook
            .notify(&Notification::for_location(&location(), 10))
            .await;
        assert!(
            matches!(result, Err(NotifyError::UnexpectedStatus { status: 500 })),
            "got: {result:?}"
        );
    }
}
