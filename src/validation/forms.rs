//! Authentication forms.

use super::rules::{check_email, check_password, check_phone, check_required};
use super::FormErrors;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Login only checks presence and email shape; the password policy is the
    /// server's business for existing accounts.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.check("email", check_email(&self.email));
        errors.check("password", check_required("Password", &self.password));
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub farm_name: String,
    /// Optional; validated only when present.
    pub phone: Option<String>,
}

impl RegistrationForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.check("name", check_required("Name", &self.name));
        errors.check("email", check_email(&self.email));
        errors.check("password", check_password(&self.password));
        if self.password != self.confirm_password {
            errors.insert("confirmPassword", "Passwords do not match");
        }
        errors.check("farmName", check_required("Farm name", &self.farm_name));
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            errors.check("phone", check_phone(phone));
        }
        errors
    }
}
