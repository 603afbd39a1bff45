// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the GitHub client.

use std::env;
use std::time::Duration;

use porter_common_config::{require_secret_env, Secret, SecretString};
use porter_common_http::RetryConfig;
use reqwest::Url;
use tracing::warn;

use crate::error::GithubError;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const TOKEN_ENV: &str = "ADMIN_TOKEN";
pub const BASE_URL_ENV: &str = "GITHUB_API_URL";

/// Configuration for [`GithubClient`](crate::GithubClient).
///
/// The token needs `admin:org` to create invitations and `repo` to read the
/// rules file and touch issues.
#[derive(Clone)]
pub struct GithubConfig {
	token: SecretString,

	/// Base URL for the REST API (validated HTTPS, parsed)
	base_url: Url,

	pub timeout: Duration,

	/// Retry policy for idempotent reads
	pub retry_config: RetryConfig,
}

impl std::fmt::Debug for GithubConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GithubConfig")
			.field("token", &self.token)
			.field("base_url", &self.base_url.as_str())
			.field("timeout", &self.timeout)
			.field("retry_config", &self.retry_config)
			.finish()
	}
}

impl GithubConfig {
	/// Validate a base URL: parseable, HTTPS, with a non-loopback host.
	fn validate_base_url(raw: &str) -> Result<Url, GithubError> {
		let url = Url::parse(raw)
			.map_err(|e| GithubError::Config(format!("Invalid GitHub base URL '{raw}': {e}")))?;

		if url.scheme() != "https" {
			return Err(GithubError::Config(format!(
				"GitHub base URL must use https, got '{}'",
				url.scheme()
			)));
		}

		let host = url
			.host_str()
			.ok_or_else(|| GithubError::Config("GitHub base URL must include a host".to_string()))?;

		if host == "localhost" || host == "127.0.0.1" || host == "[::1]" {
			return Err(GithubError::Config(
				"GitHub base URL must not be localhost".to_string(),
			));
		}

		Ok(url)
	}

	fn default_base_url() -> Url {
		Url::parse(DEFAULT_BASE_URL).expect("default URL is valid")
	}

	/// Create a configuration for api.github.com with the given token.
	pub fn new(token: impl Into<String>) -> Self {
		Self {
			token: Secret::new(token.into()),
			base_url: Self::default_base_url(),
			timeout: DEFAULT_TIMEOUT,
			retry_config: RetryConfig::default(),
		}
	}

	/// Create configuration from environment variables.
	///
	/// - `ADMIN_TOKEN` (or `ADMIN_TOKEN_FILE`): required, non-blank
	/// - `GITHUB_API_URL`: optional, defaults to api.github.com, must be HTTPS
	pub fn from_env() -> Result<Self, GithubError> {
		let token =
			require_secret_env(TOKEN_ENV).map_err(|e| GithubError::Config(e.to_string()))?;

		if token.is_blank() {
			return Err(GithubError::Config(format!("{TOKEN_ENV} is empty")));
		}

		let base_url = match env::var(BASE_URL_ENV) {
			Ok(raw) if !raw.trim().is_empty() => Self::validate_base_url(raw.trim())?,
			_ => Self::default_base_url(),
		};

		Ok(Self {
			token,
			base_url,
			timeout: DEFAULT_TIMEOUT,
			retry_config: RetryConfig::default(),
		})
	}

	/// Set a custom base URL (GitHub Enterprise Server).
	///
	/// If validation fails, logs a warning and keeps the previous value.
	pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
		let url_str = url.into();
		match Self::validate_base_url(&url_str) {
			Ok(validated) => self.base_url = validated,
			Err(e) => {
				warn!(error = %e, url = %url_str, "Invalid base_url in with_base_url, keeping previous value");
			}
		}
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
		self.retry_config = config;
		self
	}

	pub(crate) fn token(&self) -> &SecretString {
		&self.token
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}
}
