// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! GitHub REST client for Porter.
//!
//! Covers the handful of endpoints an access-request bot needs: reading a
//! repository file, inviting an email address to an organization, and
//! labeling and commenting on the originating issue.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::GithubClient;
pub use config::GithubConfig;
pub use error::GithubError;
pub use porter_common_http::RetryConfig;
pub use types::{ApiErrorBody, ApiErrorDetail, FileContents, Invitation};
