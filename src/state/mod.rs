// ============================================================================
// STATE MODULE - stores built on Rc<RefCell> + change notifications
// ============================================================================

pub mod app_state;
pub mod auth_state;
pub mod reactivity;
pub mod status;
pub mod user_state;
pub mod view_scope;

pub use app_state::AppState;
pub use auth_state::AuthState;
pub use reactivity::{ChangeNotifier, RenderGate};
pub use status::{OperationState, RequestStatus};
pub use user_state::UserState;
pub use view_scope::ViewScope;
