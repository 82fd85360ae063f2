// ============================================================================
// USER FORM VIEWMODEL - create/edit form state, validation and submission
// ============================================================================
// Holds what the inputs show; the view writes into it on every input event
// and reads it back on every render.
// ============================================================================

use thiserror::Error;

use crate::models::{Employment, NewUser, UserPatch, UserRecord};
use crate::services::ApiError;
use crate::state::{UserState, ViewScope};
use crate::viewmodels::validation::{
    validate_birth_date, validate_email, validate_full_name, validate_name, validate_sur_name,
    validate_telephone, Field, ValidationErrors,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Raw input values
#[derive(Debug, Clone, PartialEq)]
pub struct UserFormValues {
    pub name: String,
    pub sur_name: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub birth_date: String,
    pub telephone: String,
    pub employment: Employment,
    pub user_agreement: bool,
}

impl Default for UserFormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            sur_name: String::new(),
            full_name: String::new(),
            email: String::new(),
            password: String::new(),
            birth_date: String::new(),
            telephone: String::new(),
            employment: Employment::Unemployed,
            user_agreement: false,
        }
    }
}

/// Validated payload, ready for the record store
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(NewUser),
    Update { id: String, patch: UserPatch },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("form is invalid: {0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserFormViewModel {
    mode: FormMode,
    values: UserFormValues,
    errors: ValidationErrors,
    submit_error: Option<String>,
    submitting: bool,
}

impl UserFormViewModel {
    pub fn create() -> Self {
        Self::with_mode(FormMode::Create)
    }

    pub fn edit(id: impl Into<String>) -> Self {
        Self::with_mode(FormMode::Edit { id: id.into() })
    }

    fn with_mode(mode: FormMode) -> Self {
        Self {
            mode,
            values: UserFormValues::default(),
            errors: ValidationErrors::new(),
            submit_error: None,
            submitting: false,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn values(&self) -> &UserFormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_name(&mut self, name: &str) {
        self.values.name = name.to_string();
        self.sync_full_name();
    }

    pub fn set_sur_name(&mut self, sur_name: &str) {
        self.values.sur_name = sur_name.to_string();
        self.sync_full_name();
    }

    /// Manual override; replaced again as soon as name or surname changes
    pub fn set_full_name(&mut self, full_name: &str) {
        self.values.full_name = full_name.to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.values.email = email.to_string();
    }

    pub fn set_password(&mut self, password: &str) {
        self.values.password = password.to_string();
    }

    pub fn set_birth_date(&mut self, birth_date: &str) {
        self.values.birth_date = birth_date.to_string();
    }

    pub fn set_telephone(&mut self, telephone: &str) {
        self.values.telephone = telephone.to_string();
    }

    pub fn set_employment(&mut self, employment: Employment) {
        self.values.employment = employment;
    }

    pub fn set_user_agreement(&mut self, accepted: bool) {
        self.values.user_agreement = accepted;
    }

    fn sync_full_name(&mut self) {
        self.values.full_name = format!("{} {}", self.values.name, self.values.sur_name)
            .trim()
            .to_string();
    }

    /// Pre-fills the edit form from the record being edited
    pub fn populate(&mut self, record: &UserRecord) {
        self.values = UserFormValues {
            name: record.name.clone(),
            sur_name: record.sur_name.clone(),
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            password: String::new(),
            birth_date: record.birth_date.clone().unwrap_or_default(),
            telephone: record.telephone.clone().unwrap_or_default(),
            employment: record.employment.unwrap_or_default(),
            user_agreement: record.user_agreement.unwrap_or(false),
        };
        // Name and surname just changed, so the derived full name follows them
        self.sync_full_name();
        self.errors = ValidationErrors::new();
        self.submit_error = None;
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let v = &self.values;
        let mut errors = ValidationErrors::new();

        validate_name(&mut errors, &v.name);
        validate_sur_name(&mut errors, &v.sur_name);
        validate_full_name(&mut errors, &v.full_name);
        if !self.is_editing() {
            validate_email(&mut errors, &v.email);
            if v.password.is_empty() {
                errors.add(Field::Password, "Password is required");
            }
        }
        validate_birth_date(&mut errors, &v.birth_date);
        validate_telephone(&mut errors, &v.telephone);

        errors.into_result()
    }

    /// Validates and builds the payload. Email and password never reach an update.
    pub fn submission(&self) -> Result<Submission, ValidationErrors> {
        self.validate()?;
        let v = &self.values;

        Ok(match &self.mode {
            FormMode::Create => Submission::Create(NewUser {
                email: v.email.trim().to_string(),
                name: v.name.clone(),
                sur_name: v.sur_name.clone(),
                full_name: v.full_name.clone(),
                password: v.password.clone(),
                birth_date: non_empty(&v.birth_date),
                telephone: non_empty(&v.telephone),
                employment: v.employment,
                user_agreement: v.user_agreement,
            }),
            FormMode::Edit { id } => Submission::Update {
                id: id.clone(),
                patch: UserPatch {
                    name: Some(v.name.clone()),
                    sur_name: Some(v.sur_name.clone()),
                    full_name: Some(v.full_name.clone()),
                    birth_date: non_empty(&v.birth_date),
                    // "" clears the stored number; an absent field leaves it unchanged
                    telephone: Some(v.telephone.trim().to_string()),
                    employment: Some(v.employment),
                    user_agreement: Some(v.user_agreement),
                },
            },
        })
    }

    pub fn record_validation(&mut self) -> Result<Submission, SubmitError> {
        match self.submission() {
            Ok(submission) => {
                self.errors = ValidationErrors::new();
                self.submit_error = None;
                Ok(submission)
            }
            Err(errors) => {
                log::debug!("[FORM] Validation failed: {}", errors);
                self.errors = errors.clone();
                Err(SubmitError::Validation(errors))
            }
        }
    }

    pub fn begin_submit(&mut self) {
        self.submitting = true;
        self.submit_error = None;
    }

    pub fn finish_submit(&mut self, outcome: &Result<UserRecord, SubmitError>) {
        self.submitting = false;
        self.submit_error = match outcome {
            Err(SubmitError::Api(ApiError::Cancelled)) | Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };
    }
}

/// Sends a validated submission to the store.
/// The caller navigates away only on `Ok`.
pub async fn submit(
    submission: Submission,
    users: &UserState,
    scope: &ViewScope,
) -> Result<UserRecord, SubmitError> {
    let record = match submission {
        Submission::Create(new_user) => users.create(new_user, scope).await?,
        Submission::Update { id, patch } => users.update(&id, patch, scope).await?,
    };
    Ok(record)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ApiClient, SharedToken};
    use crate::state::ChangeNotifier;
    use crate::testing::{record_json, MockTransport};
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ivan_petrov() -> UserFormViewModel {
        let mut form = UserFormViewModel::create();
        form.set_name("Ivan");
        form.set_sur_name("Petrov");
        form.set_password("x");
        form.set_email("a@b.com");
        form
    }

    fn users_store() -> (Rc<MockTransport>, UserState) {
        let transport = MockTransport::new();
        let token: SharedToken = Rc::new(RefCell::new(Some("t".into())));
        let api = ApiClient::new("/api", transport.clone(), token);
        (transport, UserState::new(api, ChangeNotifier::new()))
    }

    #[test]
    fn full_name_follows_name_and_surname() {
        let mut form = UserFormViewModel::create();
        form.set_name("Ivan");
        assert_eq!(form.values().full_name, "Ivan");
        form.set_sur_name("Petrov");
        assert_eq!(form.values().full_name, "Ivan Petrov");
        form.set_name("");
        assert_eq!(form.values().full_name, "Petrov");
    }

    #[test]
    fn defaults_match_a_fresh_form() {
        let form = UserFormViewModel::create();
        assert_eq!(form.values().employment, Employment::Unemployed);
        assert!(!form.values().user_agreement);
        assert!(!form.is_editing());
    }

    #[test]
    fn create_requires_email_and_password() {
        let mut form = UserFormViewModel::create();
        form.set_name("Ivan");
        form.set_sur_name("Petrov");

        let errors = form.validate().unwrap_err();
        assert!(errors.contains(Field::Email));
        assert!(errors.contains(Field::Password));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn edit_ignores_email_and_password() {
        let mut form = UserFormViewModel::edit("5");
        form.set_name("Ivan");
        form.set_sur_name("Petrov");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn optional_fields_are_checked_only_when_filled() {
        let mut form = ivan_petrov();
        form.set_telephone("89991234567");
        form.set_birth_date("05-01-2024");

        let errors = form.validate().unwrap_err();
        assert!(errors.contains(Field::Telephone));
        assert!(errors.contains(Field::BirthDate));

        form.set_telephone("+79991234567");
        form.set_birth_date("2024-01-05");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn create_payload_carries_password_and_derived_full_name() {
        let submission = ivan_petrov().submission().unwrap();
        let Submission::Create(user) = submission else {
            panic!("expected a create submission");
        };
        let body = serde_json::to_value(&user).unwrap();
        assert_eq!(
            body,
            json!({
                "email": "a@b.com",
                "name": "Ivan",
                "surName": "Petrov",
                "fullName": "Ivan Petrov",
                "password": "x",
                "employment": "unemployed",
                "userAgreement": false
            })
        );
    }

    #[test]
    fn update_payload_never_contains_email_or_password() {
        let mut form = UserFormViewModel::edit("7");
        form.set_name("Ivan");
        form.set_sur_name("Petrov");
        form.set_email("should-not-leak@b.com");
        form.set_password("should-not-leak");

        let Submission::Update { id, patch } = form.submission().unwrap() else {
            panic!("expected an update submission");
        };
        assert_eq!(id, "7");
        let body = serde_json::to_value(&patch).unwrap();
        assert!(body.get("email").is_none());
        assert!(body.get("password").is_none());
        assert_eq!(body["fullName"], "Ivan Petrov");
    }

    #[test]
    fn populate_prefills_from_record_and_rederives_full_name() {
        let record: UserRecord = serde_json::from_value(json!({
            "id": "3",
            "email": "o@b.com",
            "name": "Oleg",
            "surName": "Ivanov",
            "fullName": "Stale Name",
            "telephone": "+79990000000",
            "employment": "employed",
            "userAgreement": true
        }))
        .unwrap();

        let mut form = UserFormViewModel::edit("3");
        form.populate(&record);

        let v = form.values();
        assert_eq!(v.full_name, "Oleg Ivanov");
        assert_eq!(v.telephone, "+79990000000");
        assert_eq!(v.birth_date, "");
        assert_eq!(v.employment, Employment::Employed);
        assert!(v.user_agreement);
        assert_eq!(v.password, "");
    }

    #[test]
    fn clearing_telephone_on_edit_sends_an_empty_value() {
        let record: UserRecord =
            serde_json::from_value(json!({
                "id": "3",
                "email": "o@b.com",
                "name": "Oleg",
                "surName": "Ivanov",
                "telephone": "+79990000000"
            }))
            .unwrap();
        let mut form = UserFormViewModel::edit("3");
        form.populate(&record);
        form.set_telephone("");

        let Submission::Update { patch, .. } = form.submission().unwrap() else {
            panic!("expected an update submission");
        };
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body["telephone"], "");
    }

    #[test]
    fn empty_telephone_is_left_out_of_create_payload() {
        let Submission::Create(user) = ivan_petrov().submission().unwrap() else {
            panic!("expected a create submission");
        };
        let body = serde_json::to_value(&user).unwrap();
        assert!(body.get("telephone").is_none());
    }

    #[test]
    fn record_validation_keeps_errors_for_rendering() {
        let mut form = UserFormViewModel::create();
        assert!(matches!(form.record_validation(), Err(SubmitError::Validation(_))));
        assert_eq!(form.error(Field::Name), Some("Name is required"));

        let mut form = ivan_petrov();
        assert!(form.record_validation().is_ok());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn create_scenario_adds_record_with_server_id() {
        let (transport, users) = users_store();
        transport.respond(
            201,
            json!({
                "id": "42",
                "email": "a@b.com",
                "name": "Ivan",
                "surName": "Petrov",
                "fullName": "Ivan Petrov"
            }),
        );

        let form = ivan_petrov();
        assert_eq!(form.values().full_name, "Ivan Petrov");
        let record = block_on(submit(form.submission().unwrap(), &users, &ViewScope::new())).unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "/api/users");
        assert_eq!(request.body.unwrap()["fullName"], "Ivan Petrov");
        assert_eq!(record.id, "42");
        assert_eq!(users.len(), 1);
        assert_eq!(users.users()[0].id, "42");
    }

    #[test]
    fn failed_submit_is_returned_so_navigation_can_be_skipped() {
        let (transport, users) = users_store();
        transport.respond(400, json!({ "message": "Email already exists" }));

        let mut form = ivan_petrov();
        let submission = form.record_validation().unwrap();
        form.begin_submit();
        let outcome = block_on(submit(submission, &users, &ViewScope::new()));
        form.finish_submit(&outcome);

        assert!(matches!(outcome, Err(SubmitError::Api(_))));
        assert!(!form.is_submitting());
        assert_eq!(form.submit_error(), Some("HTTP 400: Email already exists"));
        assert!(users.is_empty());
    }

    #[test]
    fn update_submission_goes_through_patch() {
        let (transport, users) = users_store();
        transport.respond(200, record_json("7", "Ivan", "Petrov"));

        let mut form = UserFormViewModel::edit("7");
        form.set_name("Ivan");
        form.set_sur_name("Petrov");
        block_on(submit(form.submission().unwrap(), &users, &ViewScope::new())).unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "/api/users/7");
        assert_eq!(request.method, crate::services::Method::Patch);
    }
}
