// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `VAR` / `VAR_FILE` secret lookup.

use std::path::PathBuf;
use std::{env, fs};

use porter_common_secret::{Secret, SecretString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

#[derive(Debug, Error)]
pub enum RequiredSecretError {
	#[error(transparent)]
	Load(SecretEnvError),

	#[error("neither {var} nor {file_var} is set")]
	Missing { var: String, file_var: String },
}

/// Load a secret from `{var}_FILE` if set, otherwise from `{var}`.
///
/// A single trailing newline is stripped from file contents. Returns
/// `Ok(None)` when neither variable is set.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;

		let secret = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(Secret::new(secret)));
	}

	Ok(env::var(var).ok().map(Secret::new))
}

/// Like [`load_secret_env`], but a missing secret is an error.
pub fn require_secret_env(var: &str) -> Result<SecretString, RequiredSecretError> {
	load_secret_env(var)
		.map_err(RequiredSecretError::Load)?
		.ok_or_else(|| RequiredSecretError::Missing {
			var: var.to_string(),
			file_var: format!("{var}_FILE"),
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	// Each test owns a distinct variable name; the process environment is shared
	// between test threads.

	#[test]
	fn reads_direct_value() {
		env::set_var("PORTER_TEST_DIRECT", "ghp_direct");
		let secret = load_secret_env("PORTER_TEST_DIRECT").unwrap().unwrap();
		assert_eq!(secret.expose(), "ghp_direct");
		env::remove_var("PORTER_TEST_DIRECT");
	}

	#[test]
	fn file_takes_precedence_and_strips_newline() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "ghp_from_file").unwrap();

		env::set_var("PORTER_TEST_PRECEDENCE", "ghp_direct");
		env::set_var("PORTER_TEST_PRECEDENCE_FILE", file.path());

		let secret = load_secret_env("PORTER_TEST_PRECEDENCE").unwrap().unwrap();
		assert_eq!(secret.expose(), "ghp_from_file");

		env::remove_var("PORTER_TEST_PRECEDENCE");
		env::remove_var("PORTER_TEST_PRECEDENCE_FILE");
	}

	#[test]
	fn empty_file_path_is_an_error() {
		env::set_var("PORTER_TEST_EMPTY_PATH_FILE", "");
		let err = load_secret_env("PORTER_TEST_EMPTY_PATH").unwrap_err();
		assert!(matches!(err, SecretEnvError::EmptyPath { .. }));
		env::remove_var("PORTER_TEST_EMPTY_PATH_FILE");
	}

	#[test]
	fn unreadable_file_is_an_error() {
		env::set_var("PORTER_TEST_MISSING_FILE_FILE", "/nonexistent/porter/token");
		let err = load_secret_env("PORTER_TEST_MISSING_FILE").unwrap_err();
		assert!(matches!(err, SecretEnvError::Io { .. }));
		env::remove_var("PORTER_TEST_MISSING_FILE_FILE");
	}

	#[test]
	fn unset_returns_none() {
		assert!(load_secret_env("PORTER_TEST_NEVER_SET").unwrap().is_none());
	}

	#[test]
	fn require_reports_both_names() {
		let err = require_secret_env("PORTER_TEST_REQUIRED").unwrap_err();
		assert_eq!(
			err.to_string(),
			"neither PORTER_TEST_REQUIRED nor PORTER_TEST_REQUIRED_FILE is set"
		);
	}
}
