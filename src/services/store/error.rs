use thiserror::Error;

/// Failures of the persistent store
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("Store I/O failed: {0}")]
	Io(#[from] std::io::Error),

	#[error("Store snapshot is invalid: {0}")]
	Snapshot(#[from] serde_json::Error),

	#[error("Store operation failed: {message}")]
	Operation { message: String },
}

impl StoreError {
	pub fn operation(message: impl Into<String>) -> Self {
		Self::Operation {
			message: message.into(),
		}
	}
}

pub type StoreResult<T> = Result<T, StoreError>;
