// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! GitHub REST client implementation.

use porter_common_config::SecretString;
use porter_common_http::{retry, RetryConfig};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::config::GithubConfig;
use crate::error::GithubError;
use crate::types::{
	ApiErrorBody, CommentRequest, FileContents, Invitation, InvitationRequest, LabelsRequest,
};

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Client for the GitHub REST API, authenticated with a personal or
/// installation token.
#[derive(Debug, Clone)]
pub struct GithubClient {
	http_client: Client,
	token: SecretString,
	base_url: String,
	retry_config: RetryConfig,
}

impl GithubClient {
	/// Build a client from configuration.
	///
	/// Fails when the underlying HTTP client cannot be constructed.
	pub fn new(config: &GithubConfig) -> Result<Self, GithubError> {
		let http_client = porter_common_http::new_client_with_timeout(config.timeout)?;

		Ok(Self {
			http_client,
			token: config.token().clone(),
			base_url: config.base_url().as_str().trim_end_matches('/').to_string(),
			retry_config: config.retry_config.clone(),
		})
	}

	/// Point the client at another API root without validation (useful for
	/// testing against a local server).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into().trim_end_matches('/').to_string();
		self
	}

	pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
		self.retry_config = config;
		self
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Fetch a single file from a repository's default branch.
	///
	/// Reads are idempotent, so transient failures are retried.
	#[instrument(skip(self))]
	pub async fn get_file_contents(
		&self,
		owner: &str,
		repo: &str,
		path: &str,
	) -> Result<FileContents, GithubError> {
		let url = format!(
			"{}/repos/{}/{}/contents/{}",
			self.base_url,
			urlencoding::encode(owner),
			urlencoding::encode(repo),
			encode_path(path)
		);

		let url = url.as_str();
		retry(&self.retry_config, move || async move {
			debug!(url = %url, "Fetching file contents");
			let response = self.send(self.request(Method::GET, url)).await?;
			read_json::<FileContents>(response).await
		})
		.await
	}

	/// Invite an email address to an organization.
	///
	/// Issued exactly once; a failed invitation is never retried here.
	///
	/// Any 2xx means the invitation exists. The parsed body is returned when
	/// GitHub sent one we understand, `None` otherwise.
	#[instrument(skip(self))]
	pub async fn create_org_invitation(
		&self,
		org: &str,
		email: &str,
		role: &str,
	) -> Result<Option<Invitation>, GithubError> {
		let url = format!(
			"{}/orgs/{}/invitations",
			self.base_url,
			urlencoding::encode(org)
		);

		let response = self
			.send(
				self
					.request(Method::POST, &url)
					.json(&InvitationRequest { email, role }),
			)
			.await?;

		match read_json::<Invitation>(response).await {
			Ok(invitation) => {
				info!(invitation_id = invitation.id, "Organization invitation created");
				Ok(Some(invitation))
			}
			Err(e) => {
				warn!(error = %e, "Organization invitation created, response body unreadable");
				Ok(None)
			}
		}
	}

	/// Add labels to an issue. Existing labels are kept.
	#[instrument(skip(self))]
	pub async fn add_labels(
		&self,
		owner: &str,
		repo: &str,
		issue_number: u64,
		labels: &[&str],
	) -> Result<(), GithubError> {
		let url = format!(
			"{}/repos/{}/{}/issues/{issue_number}/labels",
			self.base_url,
			urlencoding::encode(owner),
			urlencoding::encode(repo)
		);

		self
			.send(self.request(Method::POST, &url).json(&LabelsRequest { labels }))
			.await?;
		Ok(())
	}

	/// Post a comment on an issue.
	#[instrument(skip(self, body))]
	pub async fn create_issue_comment(
		&self,
		owner: &str,
		repo: &str,
		issue_number: u64,
		body: &str,
	) -> Result<(), GithubError> {
		let url = format!(
			"{}/repos/{}/{}/issues/{issue_number}/comments",
			self.base_url,
			urlencoding::encode(owner),
			urlencoding::encode(repo)
		);

		self
			.send(self.request(Method::POST, &url).json(&CommentRequest { body }))
			.await?;
		Ok(())
	}

	fn request(&self, method: Method, url: &str) -> RequestBuilder {
		self
			.http_client
			.request(method, url)
			.bearer_auth(self.token.expose())
			.header(ACCEPT, ACCEPT_GITHUB_JSON)
			.header(API_VERSION_HEADER, API_VERSION)
	}

	/// Send a request and turn any non-2xx answer into a [`GithubError`].
	async fn send(&self, request: RequestBuilder) -> Result<Response, GithubError> {
		let response = request.send().await.map_err(|e| {
			if e.is_timeout() {
				error!("Request timed out");
				return GithubError::Timeout;
			}
			error!(error = %e, "Network error during GitHub request");
			GithubError::Network(e)
		})?;

		let status = response.status();
		debug!(status = %status, "Received response from GitHub");

		if status.is_success() {
			return Ok(response);
		}

		Err(error_from_response(response).await)
	}
}

async fn error_from_response(response: Response) -> GithubError {
	let status = response.status().as_u16();
	let quota_exhausted = response
		.headers()
		.get(RATE_LIMIT_REMAINING_HEADER)
		.and_then(|v| v.to_str().ok())
		.is_some_and(|v| v.trim() == "0");
	let body = response.text().await.unwrap_or_default();

	if status == 401 {
		error!(status, "Unauthorized request");
		return GithubError::Unauthorized;
	}

	if quota_exhausted && (status == 403 || status == 429) {
		error!(status, "API rate limit exceeded");
		return GithubError::RateLimited;
	}

	let parsed = serde_json::from_str::<ApiErrorBody>(&body).unwrap_or_default();
	let message = if parsed.message.is_empty() {
		body.trim().to_string()
	} else {
		parsed.message.clone()
	};
	let errors = parsed.detail_messages();

	error!(status, message = %message, errors = ?errors, "GitHub API error");
	GithubError::ApiError {
		status,
		message,
		errors,
	}
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GithubError> {
	let body = response.text().await.map_err(|e| {
		error!(error = %e, "Failed to read response body");
		GithubError::Network(e)
	})?;

	trace!(body = %body, "Response body");

	serde_json::from_str(&body).map_err(|e| {
		error!(error = %e, "Failed to parse GitHub response");
		GithubError::InvalidResponse(format!("JSON parse error: {e}"))
	})
}

/// Percent-encode each segment of a repository path, dropping empty ones.
fn encode_path(path: &str) -> String {
	path
		.split('/')
		.filter(|segment| !segment.is_empty())
		.map(|segment| urlencoding::encode(segment).into_owned())
		.collect::<Vec<_>>()
		.join("/")
}
