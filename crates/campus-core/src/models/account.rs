use serde::Deserialize;
use std::sync::LazyLock;
use utoipa::ToSchema;

use crate::validation::{is_strong_password, Check, Schema, Validate, ValidationError};

/// Credential change submitted from the account settings form.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    /// Repeated new password, when the form asks for it
    #[serde(default)]
    pub confirm_password: Option<String>,
}

static CHANGE_PASSWORD_SCHEMA: LazyLock<Schema<ChangePasswordRequest>> = LazyLock::new(|| {
    Schema::<ChangePasswordRequest>::new()
        .required(
            "currentPassword",
            |r| Some(r.current_password.as_str()),
            Check::NonEmpty,
            "currentPassword must not be empty",
        )
        .required(
            "newPassword",
            |r| Some(r.new_password.as_str()),
            Check::Length { min: 8, max: 128 },
            "newPassword must be between 8 and 128 characters",
        )
        .required(
            "newPassword",
            |r| Some(r.new_password.as_str()),
            Check::Predicate(is_strong_password),
            "newPassword must contain an uppercase letter, a lowercase letter, a digit and a symbol",
        )
});

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut result = CHANGE_PASSWORD_SCHEMA.validate(self);

        // Cross-field rule: only checked when the confirmation is present
        if let Some(confirm) = &self.confirm_password {
            if confirm != &self.new_password {
                let mut err = result.err().unwrap_or(ValidationError {
                    violations: Vec::new(),
                });
                err.violations.push(crate::validation::FieldViolation {
                    field: "confirmPassword".to_string(),
                    message: "confirmPassword must match newPassword".to_string(),
                });
                result = Err(err);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(current: &str, new: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: None,
        }
    }

    #[test]
    fn test_weak_password_rejected() {
        let err = request("old", "password").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["newPassword"]);
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(request("old", "Password1!").validate().is_ok());
    }

    #[test]
    fn test_every_field_reported() {
        let err = request("", "short").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["currentPassword", "newPassword"]);
    }

    #[test]
    fn test_confirmation_mismatch() {
        let mut req = request("old", "Password1!");
        req.confirm_password = Some("Password2!".to_string());
        let err = req.validate().unwrap_err();
        assert_eq!(err.fields(), vec!["confirmPassword"]);

        req.confirm_password = Some("Password1!".to_string());
        assert!(req.validate().is_ok());
    }
}
