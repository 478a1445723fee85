//! Alert delivery for health-check results.
//!
//! - `TelegramNotifier`: Bot API `sendMessage`
//! - `LogNotifier`: writes alerts to the log when Telegram is not configured

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;

mod error;
mod logger;
mod telegram;

pub use error::NotificationError;
pub use logger::LogNotifier;
pub use telegram::TelegramNotifier;

/// Sink for alert messages
#[async_trait]
pub trait Notifier: Send + Sync {
	async fn notify(&self, message: &str) -> Result<(), anyhow::Error>;
}

/// Telegram when `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID` are set, the log
/// otherwise
pub fn create_notifier(client: Arc<ClientWithMiddleware>) -> Arc<dyn Notifier> {
	let token = std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default();
	let chat_id = std::env::var("TELEGRAM_CHAT_ID").unwrap_or_default();

	match TelegramNotifier::new(None, token, chat_id, client) {
		Ok(notifier) => Arc::new(notifier),
		Err(e) => {
			tracing::warn!(error = %e, "Telegram alerts disabled, alerts go to the log");
			Arc::new(LogNotifier)
		}
	}
}
