//! Failure taxonomy for loading and building the tree.
//!
//! Every variant is terminal for the session: nothing renders and nothing is
//! retried. Callers report the error to the log and stop.

use thiserror::Error;

/// Why the initial document read failed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FetchReason {
	/// The server answered with a non-success status.
	#[error("HTTP status {0}")]
	Status(u16),
	/// The request never produced a usable response.
	#[error("{0}")]
	Transport(String),
}

/// Errors raised while turning the input document into a tree.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LoadError {
	/// The document could not be read.
	#[error("failed to fetch {url}: {reason}")]
	FetchFailure {
		/// Requested location.
		url: String,
		/// Underlying cause.
		reason: FetchReason,
	},
	/// The document does not have the `{name, children?}` shape.
	#[error("malformed input: {0}")]
	MalformedInput(String),
}

impl LoadError {
	pub(crate) fn transport(url: &str, reason: impl Into<String>) -> Self {
		Self::FetchFailure {
			url: url.to_string(),
			reason: FetchReason::Transport(reason.into()),
		}
	}

	pub(crate) fn status(url: &str, status: u16) -> Self {
		Self::FetchFailure {
			url: url.to_string(),
			reason: FetchReason::Status(status),
		}
	}

	/// True for [`LoadError::FetchFailure`].
	pub fn is_fetch_failure(&self) -> bool {
		matches!(self, Self::FetchFailure { .. })
	}
}

impl From<serde_json::Error> for LoadError {
	fn from(err: serde_json::Error) -> Self {
		Self::MalformedInput(err.to_string())
	}
}
