/// Submitted form bodies and their validation rules
///
/// All forms arrive as `application/x-www-form-urlencoded`. Handlers extract
/// them with `WithRejection<Form<T>, ApiError>` and call [`Validate`] before
/// touching the store; failures become 422 responses with field details.
///
/// Every field is read as text and defaults to empty, so a missing or
/// non-numeric value reaches the validator instead of failing to decode.

use crate::error::ApiError;
use axum::http::Uri;
use mifl_shared::accounts::NewAccount;
use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Registration form
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(length(min = 2, max = 20, message = "Username must be 2 to 20 characters"))]
    pub username: String,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 120, message = "Email must be at most 120 characters")
    )]
    pub email: String,

    #[validate(custom(function = "whole_number"))]
    pub team_number: String,

    #[validate(custom(function = "whole_number"))]
    pub meeting_count: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub confirm_password: String,
}

impl TryFrom<RegisterForm> for NewAccount {
    type Error = ApiError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        let team_number = parse_whole_number(&form.team_number)
            .ok_or_else(|| ApiError::field("team_number", WHOLE_NUMBER_MESSAGE))?;
        let meeting_count = parse_whole_number(&form.meeting_count)
            .ok_or_else(|| ApiError::field("meeting_count", WHOLE_NUMBER_MESSAGE))?;

        Ok(NewAccount {
            username: form.username,
            email: form.email,
            team_number,
            meeting_count,
            password: form.password,
        })
    }
}

/// Login form
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// "Remember me" checkbox; browsers omit unchecked boxes entirely
    pub remember: Option<String>,
}

impl LoginForm {
    pub fn remembered(&self) -> bool {
        matches!(self.remember.as_deref(), Some(value) if value != "false")
    }
}

/// Account update form, used by both `/account` and `/update`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AccountForm {
    #[validate(length(min = 2, max = 20, message = "Username must be 2 to 20 characters"))]
    pub username: String,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 120, message = "Email must be at most 120 characters")
    )]
    pub email: String,
}

/// Notebook post form (create and update)
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PostForm {
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(custom(function = "not_blank"))]
    pub content: String,
}

/// Task board form
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct TaskForm {
    #[validate(
        length(min = 1, max = 100, message = "Category must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub category: String,

    #[validate(
        length(min = 1, max = 100, message = "Title must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(custom(function = "not_blank"))]
    pub content: String,
}

/// Required text: whitespace alone does not count
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed("This field is required"));
        return Err(error);
    }

    Ok(())
}

const WHOLE_NUMBER_MESSAGE: &str = "Enter a whole number of zero or more";

fn parse_whole_number(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok().filter(|n| *n >= 0)
}

/// Team number and meeting count: non-negative integers
fn whole_number(value: &str) -> Result<(), ValidationError> {
    if parse_whole_number(value).is_none() {
        let mut error = ValidationError::new("whole_number");
        error.message = Some(Cow::Borrowed(WHOLE_NUMBER_MESSAGE));
        return Err(error);
    }

    Ok(())
}

/// `?next=` on the login page
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Where to send the browser after a successful login
///
/// Only same-site paths are honored; `//host`, absolute URLs and anything
/// carrying whitespace or control characters fall back to `/home`.
/// Browsers drop tabs and newlines from URLs, so `/\t/host` would otherwise
/// become `//host`.
pub fn local_redirect_target(next: Option<&str>) -> &str {
    match next {
        Some(path) if is_local_path(path) => path,
        _ => "/home",
    }
}

fn is_local_path(path: &str) -> bool {
    if !path.starts_with('/') || path.starts_with("//") || path.contains('\\') {
        return false;
    }
    if path.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return false;
    }

    match path.parse::<Uri>() {
        Ok(uri) => uri.scheme().is_none() && uri.authority().is_none(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            team_number: "5492".to_string(),
            meeting_count: "0".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_register_form_valid() {
        assert!(register_form().validate().is_ok());
    }

    #[test]
    fn test_register_form_rejects_mismatched_confirmation() {
        let form = RegisterForm {
            confirm_password: "secret2".to_string(),
            ..register_form()
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("confirm_password"));
    }

    #[test]
    fn test_register_form_rejects_short_username_and_bad_email() {
        let form = RegisterForm {
            username: "a".to_string(),
            email: "not-an-email".to_string(),
            ..register_form()
        };

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_register_form_rejects_bad_counts() {
        for bad in ["-1", "abc", "", "1.5"] {
            let form = RegisterForm {
                team_number: bad.to_string(),
                meeting_count: bad.to_string(),
                ..register_form()
            };

            let errors = form.validate().unwrap_err();
            let fields = errors.field_errors();
            assert!(fields.contains_key("team_number"), "{bad:?}");
            assert!(fields.contains_key("meeting_count"), "{bad:?}");
        }
    }

    #[test]
    fn test_register_form_converts_counts() {
        let form = RegisterForm {
            meeting_count: " 7 ".to_string(),
            ..register_form()
        };
        form.validate().unwrap();

        let account = NewAccount::try_from(form).unwrap();
        assert_eq!(account.team_number, 5492);
        assert_eq!(account.meeting_count, 7);
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let form: RegisterForm = serde_urlencoded::from_str("username=alice").unwrap();
        assert_eq!(form.email, "");

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("team_number"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_email_longer_than_column_is_rejected() {
        // Well-formed, but longer than the users.email column
        let long_email = format!("alice@{}.{}.com", "b".repeat(60), "c".repeat(60));
        assert_eq!(long_email.len(), 131);

        let form = RegisterForm {
            email: long_email.clone(),
            ..register_form()
        };
        let errors = form.validate().unwrap_err();
        let codes: Vec<_> = errors.field_errors()["email"]
            .iter()
            .map(|e| e.code.clone())
            .collect();
        assert_eq!(codes, ["length"]);

        let form = AccountForm {
            username: "alice".to_string(),
            email: long_email,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_remember_checkbox() {
        let mut form = LoginForm {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
            remember: None,
        };
        assert!(!form.remembered());

        form.remember = Some("y".to_string());
        assert!(form.remembered());

        form.remember = Some("false".to_string());
        assert!(!form.remembered());
    }

    #[test]
    fn test_post_form_limits() {
        let form = PostForm {
            title: "x".repeat(101),
            content: "c1".to_string(),
        };
        assert!(form.validate().is_err());

        let form = PostForm {
            title: "p1".to_string(),
            content: String::new(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_task_form_rejects_blank_fields() {
        let form = TaskForm {
            category: "build".to_string(),
            title: "   ".to_string(),
            content: "c1".to_string(),
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_local_redirect_target() {
        assert_eq!(local_redirect_target(None), "/home");
        assert_eq!(local_redirect_target(Some("/tasks")), "/tasks");
        assert_eq!(local_redirect_target(Some("/post/1/update?x=1")), "/post/1/update?x=1");
        assert_eq!(local_redirect_target(Some("//evil.example")), "/home");
        assert_eq!(local_redirect_target(Some("https://evil.example")), "/home");
        assert_eq!(local_redirect_target(Some("")), "/home");
        assert_eq!(local_redirect_target(Some("/a\nb")), "/home");
        assert_eq!(local_redirect_target(Some("/\t/evil.example")), "/home");
        assert_eq!(local_redirect_target(Some("/\r\n/evil.example")), "/home");
        assert_eq!(local_redirect_target(Some("/a b")), "/home");
        assert_eq!(local_redirect_target(Some("/\\evil.example")), "/home");
    }
}
