use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::{Role, User};

/// Request body for signup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default, alias = "full_name")]
    pub full_name: String,
    pub role: Option<String>,
}

/// Request body for signin.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after signup or signin.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            role: u.role,
        }
    }
}

pub(crate) const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("dev@example.com"));
        assert!(!is_valid_email("dev@localhost"));
        assert!(!is_valid_email("no at sign.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn signup_accepts_camel_and_snake_full_name() {
        let a: SignupRequest = serde_json::from_str(
            r#"{"email":"a@b.co","password":"longenough","fullName":"A B"}"#,
        )
        .unwrap();
        let b: SignupRequest = serde_json::from_str(
            r#"{"email":"a@b.co","password":"longenough","full_name":"A B"}"#,
        )
        .unwrap();
        assert_eq!(a.full_name, "A B");
        assert_eq!(b.full_name, "A B");
        assert!(a.role.is_none());
    }

    #[test]
    fn public_user_uses_camel_case_and_hides_hash() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            full_name: "Test User".into(),
            role: Role::Client,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["fullName"], "Test User");
        assert_eq!(json["role"], "client");
        assert!(json.get("password_hash").is_none());
    }
}
