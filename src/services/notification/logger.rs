use async_trait::async_trait;

use crate::services::notification::Notifier;

/// Writes alerts to the `alert` log target
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
	async fn notify(&self, message: &str) -> Result<(), anyhow::Error> {
		tracing::info!(target: "alert", "{}", message);
		Ok(())
	}
}
