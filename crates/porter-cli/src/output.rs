// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Step outputs and workflow commands.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use porter_invite::FinalStatus;

const MESSAGE: &str = "message";
const STEP_STATUS: &str = "stepStatus";
const DELIMITER: &str = "PORTER_OUTPUT_EOF";

/// Append the status to the `GITHUB_OUTPUT` file, or print `::set-output`
/// commands when there is none.
pub fn publish(status: &FinalStatus, output_path: Option<&Path>) -> Result<()> {
	match output_path {
		Some(path) => {
			let mut file = OpenOptions::new()
				.create(true)
				.append(true)
				.open(path)
				.with_context(|| format!("failed to open output file {}", path.display()))?;
			file
				.write_all(output_file_lines(status).as_bytes())
				.with_context(|| format!("failed to write output file {}", path.display()))?;
		}
		None => print!("{}", set_output_commands(status)),
	}
	Ok(())
}

pub fn output_file_lines(status: &FinalStatus) -> String {
	let mut out = String::new();
	push_output(&mut out, MESSAGE, &status.message);
	push_output(&mut out, STEP_STATUS, status.step_status.as_str());
	out
}

fn push_output(out: &mut String, name: &str, value: &str) {
	if value.contains('\n') {
		out.push_str(&format!("{name}<<{DELIMITER}\n{value}\n{DELIMITER}\n"));
	} else {
		out.push_str(&format!("{name}={value}\n"));
	}
}

pub fn set_output_commands(status: &FinalStatus) -> String {
	format!(
		"::set-output name={MESSAGE}::{}\n::set-output name={STEP_STATUS}::{}\n",
		escape_data(&status.message),
		status.step_status
	)
}

pub fn error_annotation(message: &str) -> String {
	format!("::error::{}", escape_data(message))
}

/// Workflow command data escaping.
fn escape_data(value: &str) -> String {
	value
		.replace('%', "%25")
		.replace('\r', "%0D")
		.replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
	use super::*;
	use porter_invite::StepStatus;

	fn status(message: &str, step_status: StepStatus) -> FinalStatus {
		FinalStatus {
			message: message.to_string(),
			step_status,
		}
	}

	#[test]
	fn output_file_uses_name_value_lines() {
		let lines = output_file_lines(&status("all good", StepStatus::Success));
		assert_eq!(lines, "message=all good\nstepStatus=success\n");
	}

	#[test]
	fn multiline_message_uses_delimiter() {
		let lines = output_file_lines(&status("one\ntwo", StepStatus::Failed));
		assert_eq!(
			lines,
			"message<<PORTER_OUTPUT_EOF\none\ntwo\nPORTER_OUTPUT_EOF\nstepStatus=failed\n"
		);
	}

	#[test]
	fn set_output_escapes_message() {
		let commands = set_output_commands(&status("100%\ndone", StepStatus::ApprovalRequired));
		assert_eq!(
			commands,
			"::set-output name=message::100%25%0Adone\n::set-output name=stepStatus::approvalRequired\n"
		);
	}

	#[test]
	fn error_annotation_is_single_line() {
		assert_eq!(error_annotation("a\r\nb"), "::error::a%0D%0Ab");
	}

	#[test]
	fn publish_appends_to_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("output");
		std::fs::write(&path, "existing=1\n").unwrap();

		publish(&status("done", StepStatus::Success), Some(&path)).unwrap();

		assert_eq!(
			std::fs::read_to_string(&path).unwrap(),
			"existing=1\nmessage=done\nstepStatus=success\n"
		);
	}
}
