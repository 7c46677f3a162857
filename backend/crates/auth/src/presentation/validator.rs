//! Request Validation
//!
//! Turns raw request bodies into use case inputs. Every field is checked
//! so one response lists all problems at once.

use kernel::error::app_error::{AppResult, FieldError};

use crate::application::{LoginInput, RegisterInput, ResetPasswordInput};
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};

/// Collects field errors while fields are validated one by one
#[derive(Default)]
struct Errors(Vec<FieldError>);

impl Errors {
    fn check<T>(&mut self, field: &'static str, result: AppResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(FieldError::new(field, e.message().to_owned()));
                None
            }
        }
    }

    fn require(&mut self, field: &'static str, value: &str, message: &'static str) -> bool {
        if value.trim().is_empty() {
            self.0.push(FieldError::new(field, message));
            return false;
        }
        true
    }

    /// Only called once some check failed, so the list is never empty
    fn into_error(self) -> AuthError {
        AuthError::Validation(self.0)
    }
}

impl LoginRequest {
    pub fn validate(self) -> AuthResult<LoginInput> {
        let mut errors = Errors::default();

        let email = errors.check("email", Email::new(&self.email));
        let has_password = errors.require("password", &self.password, "Password is required");

        match (email, has_password) {
            (Some(email), true) => Ok(LoginInput {
                email,
                password: RawPassword::submitted(self.password),
            }),
            _ => Err(errors.into_error()),
        }
    }
}

impl RegisterRequest {
    pub fn validate(self) -> AuthResult<RegisterInput> {
        let mut errors = Errors::default();

        let name = errors.check("name", UserName::new(&self.name));
        let email = errors.check("email", Email::new(&self.email));
        let password = errors.check("password", RawPassword::new(self.password));

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => Ok(RegisterInput {
                name,
                email,
                password,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

impl ForgotPasswordRequest {
    pub fn validate(self) -> AuthResult<Email> {
        let mut errors = Errors::default();

        let email = errors.check("email", Email::new(&self.email));

        email.ok_or_else(|| errors.into_error())
    }
}

impl ResetPasswordRequest {
    pub fn validate(self) -> AuthResult<ResetPasswordInput> {
        let mut errors = Errors::default();

        let has_token = errors.require("token", &self.token, "Token is required");
        let password = errors.check("password", RawPassword::new(self.password));

        match (has_token, password) {
            (true, Some(password)) => Ok(ResetPasswordInput {
                token: self.token.trim().to_owned(),
                password,
            }),
            _ => Err(errors.into_error()),
        }
    }
}
