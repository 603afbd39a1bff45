// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Trusted-user gate.

use regex::Regex;
use tracing::{debug, warn};

use crate::error::PipelineError;

/// Whether `login` may request access. No rule means everyone is trusted.
///
/// The rule is a case-sensitive, unanchored search; operators anchor it
/// themselves (`^(alice|bob)$`) when they need an exact match.
pub fn is_trusted_user(login: &str, rule: Option<&Regex>) -> bool {
	rule.map_or(true, |rule| rule.is_match(login))
}

/// [`is_trusted_user`] as a pipeline stage.
pub fn check_trust(login: &str, rule: Option<&Regex>) -> Result<(), PipelineError> {
	if rule.is_none() {
		debug!("No trusted user rule configured, skipping trust check");
		return Ok(());
	}

	if is_trusted_user(login, rule) {
		debug!(login = %login, "Requester is trusted");
		Ok(())
	} else {
		warn!(login = %login, "Requester rejected by trusted user rule");
		Err(PipelineError::Trust {
			login: login.to_string(),
		})
	}
}
