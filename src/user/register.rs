use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bson::doc;
use mongodb::Database;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::{db, utils};

pub type FormErrors = BTreeMap<&'static str, Vec<&'static str>>;

const USERNAME_MAX_LEN: usize = 150;
const PASSWORD_MIN_LEN: usize = 8;

#[derive(Deserialize, Debug, Default)]
pub struct RegistrationForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password1: String,
    #[serde(default)]
    password2: String,
    #[serde(default)]
    email: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        if self.username.is_empty() {
            errors.entry("username").or_default().push("this field is required");
        } else {
            if self.username.chars().count() > USERNAME_MAX_LEN {
                errors
                    .entry("username")
                    .or_default()
                    .push("at most 150 characters");
            }
            if !self
                .username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "@.+-_".contains(c))
            {
                errors
                    .entry("username")
                    .or_default()
                    .push("letters, digits and @ . + - _ only");
            }
        }

        if self.password1.is_empty() {
            errors.entry("password1").or_default().push("this field is required");
        } else {
            if self.password1.chars().count() < PASSWORD_MIN_LEN {
                errors
                    .entry("password1")
                    .or_default()
                    .push("at least 8 characters");
            }
            if self.password1.chars().all(|c| c.is_ascii_digit()) {
                errors
                    .entry("password1")
                    .or_default()
                    .push("password is entirely numeric");
            }
            if !self.username.is_empty()
                && self.password1.eq_ignore_ascii_case(&self.username)
            {
                errors
                    .entry("password1")
                    .or_default()
                    .push("password is too similar to the username");
            }
        }

        if self.password2.is_empty() {
            errors.entry("password2").or_default().push("this field is required");
        } else if self.password2 != self.password1 {
            errors
                .entry("password2")
                .or_default()
                .push("the two password fields do not match");
        }

        if !self.email.is_empty() && !valid_email(&self.email) {
            errors
                .entry("email")
                .or_default()
                .push("enter a valid email address");
        }

        errors
    }

    /// Persists exactly one new user. Only called after `validate`
    /// came back empty; a taken username surfaces as a form error.
    pub async fn save(&self, mongo: &Database) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        if db::find_user(mongo, &self.username).await.is_some() {
            errors
                .entry("username")
                .or_default()
                .push("a user with that username already exists");
            return Err(errors);
        }

        let res = db::insert_user(
            mongo,
            doc! {
                "username": &self.username,
                "password": utils::hash_password(&self.password1),
                "email": &self.email,
            },
        )
        .await;

        match res {
            Ok(()) => Ok(()),
            Err(_) => {
                errors
                    .entry("username")
                    .or_default()
                    .push("a user with that username already exists");
                Err(errors)
            }
        }
    }

    // passwords are never echoed back
    pub fn render(&self, errors: &FormErrors) -> Value {
        json!({
            "fields": {
                "username": self.username,
                "email": self.email,
            },
            "errors": errors,
        })
    }
}

fn valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

pub async fn form_handler() -> impl IntoResponse {
    let form = RegistrationForm::default();

    (
        StatusCode::OK,
        utils::gen_response(0, form.render(&FormErrors::new())),
    )
}

pub async fn register_handler(
    Json(form): Json<RegistrationForm>,
    Extension(mongo): Extension<Database>,
) -> Response {
    let errors = form.validate();
    if !errors.is_empty() {
        debug!("registration rejected: {:?}", errors);
        return (
            StatusCode::BAD_REQUEST,
            utils::gen_response(1, form.render(&errors)),
        )
            .into_response();
    }

    match form.save(&mongo).await {
        Ok(()) => utils::login_redirect().into_response(),
        Err(errors) => (
            StatusCode::BAD_REQUEST,
            utils::gen_response(1, form.render(&errors)),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            username: "alice".to_string(),
            password1: "correct horse".to_string(),
            password2: "correct horse".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn test_email_optional() {
        let form = RegistrationForm {
            email: String::new(),
            ..valid_form()
        };

        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_empty_form_requires_fields() {
        let errors = RegistrationForm::default().validate();

        assert_eq!(errors["username"], vec!["this field is required"]);
        assert_eq!(errors["password1"], vec!["this field is required"]);
        assert_eq!(errors["password2"], vec!["this field is required"]);
        assert!(!errors.contains_key("email"));
    }

    #[test]
    fn test_username_charset() {
        let form = RegistrationForm {
            username: "alice smith".to_string(),
            ..valid_form()
        };

        assert_eq!(
            form.validate()["username"],
            vec!["letters, digits and @ . + - _ only"]
        );
    }

    #[test]
    fn test_username_too_long() {
        let form = RegistrationForm {
            username: "a".repeat(USERNAME_MAX_LEN + 1),
            ..valid_form()
        };

        assert_eq!(form.validate()["username"], vec!["at most 150 characters"]);
    }

    #[test]
    fn test_short_password() {
        let form = RegistrationForm {
            password1: "short".to_string(),
            password2: "short".to_string(),
            ..valid_form()
        };

        assert_eq!(form.validate()["password1"], vec!["at least 8 characters"]);
    }

    #[test]
    fn test_numeric_password() {
        let form = RegistrationForm {
            password1: "123456789".to_string(),
            password2: "123456789".to_string(),
            ..valid_form()
        };

        assert_eq!(
            form.validate()["password1"],
            vec!["password is entirely numeric"]
        );
    }

    #[test]
    fn test_password_mismatch() {
        let form = RegistrationForm {
            password2: "something else".to_string(),
            ..valid_form()
        };

        assert_eq!(
            form.validate()["password2"],
            vec!["the two password fields do not match"]
        );
    }

    #[test]
    fn test_password_similar_to_username() {
        let form = RegistrationForm {
            username: "CorrectHorse".to_string(),
            password1: "correcthorse".to_string(),
            password2: "correcthorse".to_string(),
            ..valid_form()
        };

        assert_eq!(
            form.validate()["password1"],
            vec!["password is too similar to the username"]
        );
    }

    #[test]
    fn test_bad_email() {
        for email in ["no-at-sign", "@example.com", "alice@nodot", "alice@.com"] {
            let form = RegistrationForm {
                email: email.to_string(),
                ..valid_form()
            };

            assert_eq!(
                form.validate()["email"],
                vec!["enter a valid email address"],
                "{email}"
            );
        }
    }

    #[test]
    fn test_errors_accumulate() {
        let form = RegistrationForm {
            username: "bad name".to_string(),
            password1: "1234".to_string(),
            password2: "4321".to_string(),
            email: "nope".to_string(),
        };

        let errors = form.validate();

        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors["password1"],
            vec!["at least 8 characters", "password is entirely numeric"]
        );
    }

    #[test]
    fn test_render_never_echoes_passwords() {
        let form = valid_form();
        let rendered = form.render(&form.validate());

        assert_eq!(rendered["fields"]["username"], "alice");
        assert_eq!(rendered["errors"], json!({}));
        assert!(rendered["fields"].get("password1").is_none());
        assert!(!rendered.to_string().contains("correct horse"));
    }
}
