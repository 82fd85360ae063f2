pub mod app;
pub mod fields;
pub mod login;
pub mod user_form;
pub mod user_table;

pub use app::render_app;
pub use login::render_login;
pub use user_form::render_user_form;
pub use user_table::render_user_table;
