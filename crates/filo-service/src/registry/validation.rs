//! Input validation for registry operations.
//!
//! Every check runs before the store is touched and fails with
//! `ErrorKind::Validation`.

use validator::{Validate, ValidationErrors};

use filo_core::error::AppError;
use filo_core::result::AppResult;
use filo_entity::file::FileKey;

use super::service::RegisterFile;

/// Validate a registration request.
pub fn validate_register(input: &RegisterFile) -> AppResult<()> {
    input
        .validate()
        .map_err(|errors| AppError::validation(describe(&errors)))
}

/// Validate a composite key used for deletion.
pub fn validate_key(key: &FileKey) -> AppResult<()> {
    require_non_empty("directory_path", &key.directory_path)?;
    require_non_empty("filename", &key.filename)
}

fn require_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Flatten validator errors into one message with fields in a stable order.
fn describe(errors: &ValidationErrors) -> String {
    let mut problems: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reason = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "is invalid".to_string());
            format!("{field} {reason}")
        })
        .collect();
    problems.sort();
    problems.join("; ")
}
