// SPDX-FileCopyrightText: 2026 Kickoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-level validation of raw submissions.
//!
//! Errors are collected rather than returned on the first failure, so the
//! caller can show every problem at once.

use std::sync::LazyLock;

use kickoff_slug::sanitize;
use regex::Regex;

/// Longest company name accepted, in characters, before sanitizing.
pub const MAX_COMPANY_NAME_LEN: usize = 200;

/// Longest email address accepted, in characters.
pub const MAX_EMAIL_LEN: usize = 254;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("email pattern is valid")
});

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    /// Company name with surrounding whitespace removed.
    pub company_name: String,
    /// Email with surrounding whitespace removed.
    pub email: String,
    /// Canonical identifier derived from the company name. Never empty.
    pub identifier: String,
}

/// Outcome of previewing a company name without submitting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// The name sanitizes to this identifier.
    Identifier(String),
    /// The name cannot be used.
    Invalid(Vec<String>),
}

/// Validate both fields, collecting every error.
pub fn validate(company_name: &str, email: &str) -> Result<ValidSubmission, Vec<String>> {
    let mut errors = Vec::new();

    let identifier = match check_company_name(company_name) {
        Ok(identifier) => Some(identifier),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let email = email.trim();
    if email.is_empty() {
        errors.push("email is required".to_string());
    } else if email.chars().count() > MAX_EMAIL_LEN {
        errors.push(format!("email must be at most {MAX_EMAIL_LEN} characters"));
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.push("email is not a valid address".to_string());
    }

    match identifier {
        Some(identifier) if errors.is_empty() => Ok(ValidSubmission {
            company_name: company_name.trim().to_string(),
            email: email.to_string(),
            identifier,
        }),
        _ => Err(errors),
    }
}

/// Run the company-name rules alone. Not subject to admission control.
pub fn preview(company_name: &str) -> Preview {
    match check_company_name(company_name) {
        Ok(identifier) => Preview::Identifier(identifier),
        Err(e) => Preview::Invalid(vec![e]),
    }
}

fn check_company_name(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("company_name is required".to_string());
    }
    if trimmed.chars().count() > MAX_COMPANY_NAME_LEN {
        return Err(format!(
            "company_name must be at most {MAX_COMPANY_NAME_LEN} characters"
        ));
    }
    let identifier = sanitize(trimmed);
    if identifier.is_empty() {
        return Err("company_name must contain at least one letter or digit".to_string());
    }
    Ok(identifier)
}
