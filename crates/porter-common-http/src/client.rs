// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP client construction with the Porter User-Agent.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Client builder preloaded with the Porter User-Agent.
///
/// GitHub rejects API requests that carry no User-Agent at all.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Build a client whose every request times out after `timeout`.
///
/// Fails only when the TLS backend cannot be initialized.
pub fn new_client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
	builder().timeout(timeout).build()
}

/// Format: `porter/{version}`.
pub fn user_agent() -> String {
	format!("porter/{}", env!("CARGO_PKG_VERSION"))
}
