//! Validate role form fields.

use anyhow::{Result, bail};
use emporium_rbac::{FieldError, validate_role};
use serde::Serialize;

use super::{OutputFormat, print_json};
use crate::style::{print_error, print_success};

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    name: &'a str,
    guard_name: &'a str,
    valid: bool,
    errors: Vec<FieldError>,
}

pub fn run(name: &str, guard_name: &str, format: OutputFormat) -> Result<()> {
    let errors = validate_role(name, guard_name).err().unwrap_or_default();
    let valid = errors.is_empty();

    match format {
        OutputFormat::Json => print_json(&CheckReport {
            name,
            guard_name,
            valid,
            errors: errors.errors.clone(),
        })?,
        OutputFormat::Text if valid => {
            print_success(&format!("Role '{name}' with guard '{guard_name}' is valid"));
        }
        OutputFormat::Text => {
            for error in &errors.errors {
                print_error(&error.to_string());
            }
        }
    }

    if !valid {
        bail!("{errors}");
    }
    Ok(())
}
