// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The external calls the pipeline makes, behind a trait for testability.

use async_trait::async_trait;
use porter_github::{GithubClient, GithubError};
use tracing::debug;

/// GitHub operations used by the access request pipeline.
///
/// Each method is one external call; the pipeline awaits every call before
/// issuing the next.
#[async_trait]
pub trait AccessApi: Send + Sync {
	/// Fetch a repository file and return its decoded text.
	async fn fetch_config(&self, owner: &str, repo: &str, path: &str)
		-> Result<String, GithubError>;

	/// Invite `email` to `org` with `role`.
	async fn create_invitation(&self, org: &str, email: &str, role: &str)
		-> Result<(), GithubError>;

	async fn add_label(
		&self,
		owner: &str,
		repo: &str,
		issue_number: u64,
		label: &str,
	) -> Result<(), GithubError>;

	async fn create_comment(
		&self,
		owner: &str,
		repo: &str,
		issue_number: u64,
		body: &str,
	) -> Result<(), GithubError>;
}

#[async_trait]
impl AccessApi for GithubClient {
	async fn fetch_config(
		&self,
		owner: &str,
		repo: &str,
		path: &str,
	) -> Result<String, GithubError> {
		let file = self.get_file_contents(owner, repo, path).await?;
		let content = file.decode()?;
		debug!(path = %file.path, content = %content, "Decoded rules file");
		Ok(content)
	}

	async fn create_invitation(
		&self,
		org: &str,
		email: &str,
		role: &str,
	) -> Result<(), GithubError> {
		self.create_org_invitation(org, email, role).await.map(|_| ())
	}

	async fn add_label(
		&self,
		owner: &str,
		repo: &str,
		issue_number: u64,
		label: &str,
	) -> Result<(), GithubError> {
		self.add_labels(owner, repo, issue_number, &[label]).await
	}

	async fn create_comment(
		&self,
		owner: &str,
		repo: &str,
		issue_number: u64,
		body: &str,
	) -> Result<(), GithubError> {
		self.create_issue_comment(owner, repo, issue_number, body).await
	}
}

#[async_trait]
impl<T> AccessApi for &T
where
	T: AccessApi + ?Sized,
{
	async fn fetch_config(
		&self,
		owner: &str,
		repo: &str,
		path: &str,
	) -> Result<String, GithubError> {
		(**self).fetch_config(owner, repo, path).await
	}

	async fn create_invitation(
		&self,
		org: &str,
		email: &str,
		role: &str,
	) -> Result<(), GithubError> {
		(**self).create_invitation(org, email, role).await
	}

	async fn add_label(
		&self,
		owner: &str,
		repo: &str,
		issue_number: u64,
		label: &str,
	) -> Result<(), GithubError> {
		(**self).add_label(owner, repo, issue_number, label).await
	}

	async fn create_comment(
		&self,
		owner: &str,
		repo: &str,
		issue_number: u64,
		body: &str,
	) -> Result<(), GithubError> {
		(**self).create_comment(owner, repo, issue_number, body).await
	}
}
