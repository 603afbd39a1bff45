// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request and response shapes for the endpoints Porter calls.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::GithubError;

/// `GET /repos/{owner}/{repo}/contents/{path}` for a single file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileContents {
	pub path: String,
	#[serde(default)]
	pub sha: String,
	#[serde(default)]
	pub encoding: String,
	/// Base64 payload, wrapped at 60 columns by GitHub.
	#[serde(default)]
	pub content: String,
}

impl FileContents {
	/// Decode the base64 payload into UTF-8 text.
	pub fn decode(&self) -> Result<String, GithubError> {
		if !self.encoding.is_empty() && self.encoding != "base64" {
			return Err(GithubError::Decode(format!(
				"unsupported encoding '{}' for {}",
				self.encoding, self.path
			)));
		}

		let compact: String = self
			.content
			.chars()
			.filter(|c| !c.is_ascii_whitespace())
			.collect();

		let bytes = STANDARD
			.decode(compact.as_bytes())
			.map_err(|e| GithubError::Decode(format!("{}: {e}", self.path)))?;

		String::from_utf8(bytes).map_err(|e| GithubError::Decode(format!("{}: {e}", self.path)))
	}
}

/// Body of `POST /orgs/{org}/invitations`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct InvitationRequest<'a> {
	pub email: &'a str,
	pub role: &'a str,
}

/// A pending organization invitation.
#[derive(Debug, Clone, Deserialize)]
pub struct Invitation {
	pub id: u64,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LabelsRequest<'a> {
	pub labels: &'a [&'a str],
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CommentRequest<'a> {
	pub body: &'a str,
}

/// GitHub error response body.
///
/// ```json
/// {"message": "Validation Failed",
///  "errors": [{"resource": "OrganizationInvitation", "code": "unprocessable",
///              "field": "data", "message": "Over invitation rate limit"}]}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
	#[serde(default)]
	pub message: String,
	#[serde(default)]
	pub errors: Vec<ApiErrorDetail>,
	#[serde(default)]
	pub documentation_url: Option<String>,
}

/// A single entry of `errors`. GitHub sends either an object or a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorDetail {
	Structured {
		#[serde(default)]
		resource: Option<String>,
		#[serde(default)]
		field: Option<String>,
		#[serde(default)]
		code: Option<String>,
		#[serde(default)]
		message: Option<String>,
	},
	Text(String),
}

impl ApiErrorDetail {
	/// The entry's message, falling back to its code.
	pub fn message(&self) -> Option<&str> {
		match self {
			ApiErrorDetail::Structured { message, code, .. } => {
				message.as_deref().or(code.as_deref())
			}
			ApiErrorDetail::Text(text) => Some(text),
		}
	}
}

impl ApiErrorBody {
	pub fn detail_messages(&self) -> Vec<String> {
		self
			.errors
			.iter()
			.filter_map(ApiErrorDetail::message)
			.map(str::to_string)
			.collect()
	}
}
