use crate::models::LoginRequest;
use crate::viewmodels::validation::{required, Field, ValidationErrors};

/// Login inputs; both fields are mandatory before the request goes out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginFormViewModel {
    email: String,
    password: String,
    errors: ValidationErrors,
}

impl LoginFormViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.to_string();
    }

    /// What the password box shows after a re-render; always what a submit would send
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = password.to_string();
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    /// Validates and, on success, hands back the credentials to send
    pub fn credentials(&mut self) -> Result<LoginRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required(&mut errors, Field::Email, &self.email, "Email is required");
        required(&mut errors, Field::Password, &self.password, "Password is required");
        self.errors = errors.clone();
        errors.into_result()?;
        Ok(LoginRequest::new(self.email.trim(), self.password.clone()))
    }

    /// Forget the password once it has been used
    pub fn clear_password(&mut self) {
        self.password.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_are_required() {
        let mut form = LoginFormViewModel::new();
        let errors = form.credentials().unwrap_err();
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
        assert!(form.error(Field::Email).is_some());
    }

    #[test]
    fn credentials_are_built_from_inputs() {
        let mut form = LoginFormViewModel::new();
        form.set_email("  admin@example.com ");
        form.set_password("secret");

        let credentials = form.credentials().unwrap();
        assert_eq!(credentials, LoginRequest::new("admin@example.com", "secret"));
        assert_eq!(form.error(Field::Email), None);

        form.clear_password();
        assert!(form.credentials().is_err());
    }

    #[test]
    fn typed_password_outlives_a_failed_validation() {
        let mut form = LoginFormViewModel::new();
        form.set_password("secret");

        let errors = form.credentials().unwrap_err();
        assert!(errors.contains(Field::Email));
        assert_eq!(form.password(), "secret");

        form.clear_password();
        assert_eq!(form.password(), "");
    }
}
