// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access request pipeline.
//!
//! Takes one "please add me to the org" issue and walks it through:
//!
//! 1. fetch and validate the operator's rules file
//! 2. check the issue author against the trusted-user rule
//! 3. find the requester's email and check it against the email rule
//! 4. invite the email to the organization
//! 5. on failure, label and comment on the issue (retry or human review)
//! 6. report a single `message` / `stepStatus` pair
//!
//! Every stage can end the run early; whatever happens, [`run`] returns
//! exactly one [`FinalStatus`].

pub mod api;
pub mod config;
pub mod context;
pub mod email;
pub mod error;
pub mod escalation;
pub mod invitation;
pub mod outcome;
pub mod pipeline;
pub mod trust;

pub use api::AccessApi;
pub use config::{parse_config, validate_config, AccessConfig, ConfigError};
pub use context::{
	parse_owner_contacts, EmailSource, RequestContext, DEFAULT_EMAIL_CAPTURE, DEFAULT_ROLE,
};
pub use email::{extract_email, resolve_email, validate_email, EmailError};
pub use error::PipelineError;
pub use escalation::{
	apply_escalation, EscalationReport, SideEffect, AUTOMATION_FAILED_LABEL, RETRY_LABEL,
};
pub use invitation::{attempt_invitation, is_invitation_rate_limit, InvitationOutcome};
pub use outcome::{report, FinalStatus, Invited, StepStatus};
pub use pipeline::{process, run};
pub use trust::{check_trust, is_trusted_user};
