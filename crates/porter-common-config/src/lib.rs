// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential loading for Porter.
//!
//! Secrets come from `VAR` or from a file named by `VAR_FILE`, which is how
//! workflow runners and container runtimes usually mount tokens.

pub mod env;

pub use porter_common_secret::{Secret, SecretString, REDACTED};

pub use env::{load_secret_env, require_secret_env, RequiredSecretError, SecretEnvError};
