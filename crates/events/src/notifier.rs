//! The notification seam between request handlers and delivery channels.

use std::sync::Arc;

use async_trait::async_trait;

use crate::delivery::email::EmailError;

/// A rendered plain-text email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivers rendered notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), EmailError>;
}

/// Notifier used when no delivery channel is configured. Logs and succeeds.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), EmailError> {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            "Email delivery not configured, skipping notification"
        );
        Ok(())
    }
}

/// Send every notification in order. A failed send is logged at `warn`
/// and does not stop the remaining sends.
pub async fn dispatch(notifier: &Arc<dyn Notifier>, notifications: Vec<Notification>) {
    for notification in notifications {
        if let Err(e) = notifier.send(&notification).await {
            tracing::warn!(
                to = %notification.to,
                subject = %notification.subject,
                error = %e,
                "Failed to send notification"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct FlakyNotifier {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for FlakyNotifier {
        async fn send(&self, notification: &Notification) -> Result<(), EmailError> {
            if notification.to == "broken" {
                return Err(EmailError::Build("refused".into()));
            }
            self.sent.lock().unwrap().push(notification.to.clone());
            Ok(())
        }
    }

    fn note(to: &str) -> Notification {
        Notification {
            to: to.to_string(),
            subject: "s".into(),
            body: "b".into(),
        }
    }

    #[tokio::test]
    async fn failure_does_not_stop_later_sends() {
        let flaky = Arc::new(FlakyNotifier {
            sent: Mutex::new(Vec::new()),
        });
        let notifier: Arc<dyn Notifier> = flaky.clone();
        dispatch(&notifier, vec![note("broken"), note("admin@example.com")]).await;
        assert_eq!(*flaky.sent.lock().unwrap(), vec!["admin@example.com"]);
    }

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        assert!(LogNotifier.send(&note("anyone@example.com")).await.is_ok());
    }
}
