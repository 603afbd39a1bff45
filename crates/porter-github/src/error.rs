// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the GitHub client.

use porter_common_http::RetryableError;
use thiserror::Error;

/// Errors that can occur when talking to the GitHub REST API.
#[derive(Debug, Error)]
pub enum GithubError {
	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Request timed out.
	#[error("Request timed out")]
	Timeout,

	/// Token missing, expired or revoked.
	#[error("Unauthorized: check the admin token")]
	Unauthorized,

	/// Primary or secondary API rate limit.
	#[error("GitHub API rate limit exceeded")]
	RateLimited,

	/// GitHub answered with an error status. `errors` holds the messages of
	/// the individual error entries, if any.
	#[error("GitHub API error: {status} - {message}")]
	ApiError {
		status: u16,
		message: String,
		errors: Vec<String>,
	},

	/// Invalid or unparseable response.
	#[error("Invalid response from GitHub: {0}")]
	InvalidResponse(String),

	/// File contents could not be decoded.
	#[error("Failed to decode file contents: {0}")]
	Decode(String),

	/// Configuration error.
	#[error("Configuration error: {0}")]
	Config(String),
}

impl RetryableError for GithubError {
	fn is_retryable(&self) -> bool {
		match self {
			GithubError::Network(e) => e.is_retryable(),
			GithubError::Timeout => true,
			GithubError::RateLimited => true,
			GithubError::ApiError { status, .. } => *status >= 500,
			_ => false,
		}
	}
}

impl GithubError {
	/// Create an API error from status code and message.
	pub fn api_error(status: u16, message: impl Into<String>) -> Self {
		Self::ApiError {
			status,
			message: message.into(),
			errors: Vec::new(),
		}
	}

	/// Every human-readable message carried by this error: the top-level
	/// message followed by the messages of the individual error entries.
	pub fn messages(&self) -> Vec<&str> {
		match self {
			GithubError::ApiError {
				message, errors, ..
			} => std::iter::once(message.as_str())
				.chain(errors.iter().map(String::as_str))
				.collect(),
			_ => Vec::new(),
		}
	}

	pub fn status(&self) -> Option<u16> {
		match self {
			GithubError::ApiError { status, .. } => Some(*status),
			GithubError::Network(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_retryable_timeout() {
		assert!(GithubError::Timeout.is_retryable());
	}

	#[test]
	fn test_retryable_5xx() {
		assert!(GithubError::api_error(500, "Internal Server Error").is_retryable());
		assert!(GithubError::api_error(503, "Service Unavailable").is_retryable());
	}

	#[test]
	fn test_not_retryable_4xx() {
		assert!(!GithubError::api_error(404, "Not Found").is_retryable());
		assert!(!GithubError::api_error(422, "Validation Failed").is_retryable());
	}

	#[test]
	fn test_not_retryable_unauthorized() {
		assert!(!GithubError::Unauthorized.is_retryable());
	}

	#[test]
	fn test_messages_include_error_entries() {
		let err = GithubError::ApiError {
			status: 422,
			message: "Validation Failed".to_string(),
			errors: vec!["Over invitation rate limit".to_string()],
		};
		assert_eq!(
			err.messages(),
			vec!["Validation Failed", "Over invitation rate limit"]
		);
		assert_eq!(err.status(), Some(422));
	}

	#[test]
	fn test_messages_empty_for_transport_errors() {
		assert!(GithubError::Timeout.messages().is_empty());
		assert_eq!(GithubError::Timeout.status(), None);
	}

	#[test]
	fn test_error_display() {
		let err = GithubError::api_error(404, "Not Found");
		assert_eq!(err.to_string(), "GitHub API error: 404 - Not Found");
	}
}
