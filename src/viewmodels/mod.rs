pub mod login_form;
pub mod user_form;
pub mod validation;

pub use login_form::LoginFormViewModel;
pub use user_form::{FormMode, Submission, SubmitError, UserFormValues, UserFormViewModel};
pub use validation::{Field, ValidationErrors};
