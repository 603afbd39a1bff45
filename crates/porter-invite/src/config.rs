// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operator rules file: parsing and validation.
//!
//! The file is JSON authored by the organization's operators:
//!
//! ```json
//! {
//!   "emailRule": { "regex": ".*@example.com$", "onMismatch": "failed" },
//!   "trustedUserRule": { "regex": "^(alice|bob)$" },
//!   "parserRules": {
//!     "email": { "regex": "<p>Email of Requester:\\s*(?<email>.+?)<\\/p>" }
//!   }
//! }
//! ```
//!
//! `pattern` is accepted in place of `regex`. Nothing downstream of
//! [`validate_config`] looks at the raw JSON again.

use regex::{Regex, RegexBuilder};
use serde_json::Value;
use thiserror::Error;

use crate::context::EmailSource;
use crate::outcome::StepStatus;

const EMAIL_RULE: &str = "emailRule";
const TRUSTED_USER_RULE: &str = "trustedUserRule";
const PARSER_RULES: &str = "parserRules";
const ON_MISMATCH: &str = "onMismatch";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Config is not valid JSON: {0}")]
	Parse(String),

	#[error("Config lacks valid email rule")]
	MissingEmailRule,

	#[error("Config lacks valid parser rules")]
	MissingParserRules,

	#[error("Config rule {rule} has an invalid pattern: {source}")]
	InvalidPattern {
		rule: &'static str,
		#[source]
		source: regex::Error,
	},

	#[error("Config emailRule.onMismatch must be \"failed\" or \"approvalRequired\", got {0}")]
	InvalidMismatchPolicy(String),
}

/// Validated rules. Patterns are compiled once here.
#[derive(Debug, Clone)]
pub struct AccessConfig {
	email_rule: Regex,
	trusted_user_rule: Option<Regex>,
	email_parser: Option<Regex>,
	username_parser: Option<Regex>,
	on_email_mismatch: StepStatus,
}

impl AccessConfig {
	/// Case-insensitive acceptance pattern for email addresses.
	pub fn email_rule(&self) -> &Regex {
		&self.email_rule
	}

	/// `None` means every requester is trusted.
	pub fn trusted_user_rule(&self) -> Option<&Regex> {
		self.trusted_user_rule.as_ref()
	}

	pub fn email_parser(&self) -> Option<&Regex> {
		self.email_parser.as_ref()
	}

	pub fn username_parser(&self) -> Option<&Regex> {
		self.username_parser.as_ref()
	}

	/// Status reported when an email does not match the email rule.
	pub fn on_email_mismatch(&self) -> StepStatus {
		self.on_email_mismatch
	}
}

/// Parse the decoded rules file.
pub fn parse_config(text: &str) -> Result<Value, ConfigError> {
	serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Check the raw config's required fields and compile its patterns.
///
/// A missing or empty `emailRule` is always fatal. When the email is
/// extracted from the issue body, a capture pattern must come from
/// `parserRules.email` or, failing that, from the request's own capture input.
pub fn validate_config(raw: &Value, source: &EmailSource) -> Result<AccessConfig, ConfigError> {
	let email_pattern = rule_pattern(raw.get(EMAIL_RULE)).ok_or(ConfigError::MissingEmailRule)?;
	let email_rule = compile_email_pattern(email_pattern).map_err(|source| {
		ConfigError::InvalidPattern {
			rule: EMAIL_RULE,
			source,
		}
	})?;

	let trusted_user_rule = match rule_pattern(raw.get(TRUSTED_USER_RULE)) {
		Some(pattern) => Some(compile(TRUSTED_USER_RULE, pattern)?),
		None => None,
	};

	let parser_rules = raw.get(PARSER_RULES);
	let configured = rule_pattern(parser_rules.and_then(|rules| rules.get("email")));
	let email_parser = match (configured, source) {
		(Some(pattern), _) => Some(compile("parserRules.email", pattern)?),
		(None, EmailSource::IssueBody { capture_pattern, .. }) => {
			match capture_pattern.as_deref().filter(|p| !p.is_empty()) {
				Some(pattern) => Some(compile("email capture input", pattern)?),
				None => return Err(ConfigError::MissingParserRules),
			}
		}
		(None, EmailSource::Direct(_)) => None,
	};
	let username_parser = match rule_pattern(parser_rules.and_then(|rules| rules.get("username"))) {
		Some(pattern) => Some(compile("parserRules.username", pattern)?),
		None => None,
	};

	let on_email_mismatch = match raw.get(EMAIL_RULE).and_then(|rule| rule.get(ON_MISMATCH)) {
		None | Some(Value::Null) => StepStatus::Failed,
		Some(Value::String(policy)) if policy == "failed" => StepStatus::Failed,
		Some(Value::String(policy)) if policy == "approvalRequired" => StepStatus::ApprovalRequired,
		Some(other) => return Err(ConfigError::InvalidMismatchPolicy(other.to_string())),
	};

	Ok(AccessConfig {
		email_rule,
		trusted_user_rule,
		email_parser,
		username_parser,
		on_email_mismatch,
	})
}

/// Email patterns always match case-insensitively.
pub(crate) fn compile_email_pattern(pattern: &str) -> Result<Regex, regex::Error> {
	RegexBuilder::new(pattern).case_insensitive(true).build()
}

fn compile(rule: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
	Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern { rule, source })
}

/// The non-empty `regex` (or `pattern`) string of a rule object.
fn rule_pattern(rule: Option<&Value>) -> Option<&str> {
	let rule = rule?;
	rule
		.get("regex")
		.or_else(|| rule.get("pattern"))
		.and_then(Value::as_str)
		.filter(|pattern| !pattern.is_empty())
}
