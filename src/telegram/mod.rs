pub mod client;

use async_trait::async_trait;

use crate::error::Result;

/// Delivery channel for chat messages.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()>;
}

/// Sends bot messages to the configured chat.
///
/// Delivery failures are logged and never returned: a lost message must not
/// stop the poll loop from reporting later changes.
pub struct Notifier {
    messenger: Box<dyn Messenger>,
    chat_id: String,
}

impl Notifier {
    pub fn new(messenger: Box<dyn Messenger>, chat_id: &str) -> Self {
        Self {
            messenger,
            chat_id: chat_id.to_string(),
        }
    }

    /// Returns whether the message was delivered.
    pub async fn notify(&self, message: &str) -> bool {
        match self.messenger.send(&self.chat_id, message).await {
            Ok(()) => {
                tracing::info!(message = %message, "Bot sent message");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to deliver Telegram message");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::{Arc, Mutex};

    struct RecordingMessenger {
        sent: Arc<Mutex<Vec<(String, String)>>>,
        fail: bool,
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
            if self.fail {
                return Err(AppError::NotificationDelivery("chat not found".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.to_string(), text.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_notify_uses_fixed_chat() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let notifier = Notifier::new(
            Box::new(RecordingMessenger {
                sent: Arc::clone(&sent),
                fail: false,
            }),
            "12345",
        );

        assert!(notifier.notify("hello").await);
        assert_eq!(
            *sent.lock().unwrap(),
            vec![("12345".to_string(), "hello".to_string())]
        );
    }

    #[tokio::test]
    async fn test_notify_swallows_delivery_failure() {
        let notifier = Notifier::new(
            Box::new(RecordingMessenger {
                sent: Arc::new(Mutex::new(Vec::new())),
                fail: true,
            }),
            "12345",
        );

        assert!(!notifier.notify("hello").await);
    }
}
