//! Telegram notification implementation.
//!
//! Sends alerts to a chat through the Bot API `sendMessage` method.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;

use crate::services::notification::{NotificationError, Notifier};

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Implementation of Telegram notifications via the Bot API
pub struct TelegramNotifier {
	base_url: String,
	/// Telegram bot token
	token: String,
	/// Telegram chat ID
	chat_id: String,
	client: Arc<ClientWithMiddleware>,
}

impl TelegramNotifier {
	/// Creates a new Telegram notifier instance
	///
	/// # Arguments
	/// * `base_url` - Bot API URL, defaults to `https://api.telegram.org`
	/// * `token` - Telegram bot token
	/// * `chat_id` - Telegram chat ID
	/// * `client` - HTTP client used for delivery
	pub fn new(
		base_url: Option<String>,
		token: String,
		chat_id: String,
		client: Arc<ClientWithMiddleware>,
	) -> Result<Self, NotificationError> {
		if token.is_empty() {
			return Err(NotificationError::config_error("Telegram bot token is empty"));
		}
		if chat_id.is_empty() {
			return Err(NotificationError::config_error("Telegram chat id is empty"));
		}

		Ok(Self {
			base_url: base_url
				.unwrap_or_else(|| TELEGRAM_API_URL.to_string())
				.trim_end_matches('/')
				.to_string(),
			token,
			chat_id,
			client,
		})
	}

	pub fn construct_url(&self, message: &str) -> String {
		format!(
			"{}/bot{}/sendMessage?text={}&chat_id={}&disable_web_page_preview=true",
			self.base_url,
			self.token,
			urlencoding::encode(message),
			urlencoding::encode(&self.chat_id),
		)
	}
}

#[async_trait]
impl Notifier for TelegramNotifier {
	async fn notify(&self, message: &str) -> Result<(), anyhow::Error> {
		let url = self.construct_url(message);

		let response = self
			.client
			.get(&url)
			.send()
			.await
			.map_err(NotificationError::from)?;

		let status = response.status();
		if status.is_success() {
			return Ok(());
		}

		// Bot API errors carry {"ok": false, "description": "..."}
		let description = response
			.json::<serde_json::Value>()
			.await
			.ok()
			.and_then(|body| body["description"].as_str().map(str::to_string))
			.unwrap_or_else(|| status.to_string());

		Err(NotificationError::rejected(status.as_u16(), description).into())
	}
}
