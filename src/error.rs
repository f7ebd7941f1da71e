use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[cfg(windows)]
	#[error(transparent)]
	Windows(#[from] windows::core::Error),
	#[error("API call failed: {0}")]
	ApiCallFailed(&'static str),
	#[error("an API call returned nothing")]
	ApiCallNone,
	#[error("error converting strings")]
	StringErr,
	#[error(transparent)]
	IO(#[from] std::io::Error),
	#[error(transparent)]
	Json(#[from] serde_json::Error),
	#[error("config error: {0}")]
	Config(&'static str),
	#[error("short write to target process: {written} of {expected} bytes")]
	ShortWrite { written: usize, expected: usize },
	#[error("timed out after {0:?}")]
	Timeout(std::time::Duration),
	#[error("remote loader returned NULL for {0}")]
	RemoteLoadFailed(String),
	#[error("injection is only supported on Windows")]
	Unsupported,
}
