// ============================================================================
// APP STATE - composition root owning every store
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::router::Route;
use crate::services::{ApiClient, HttpTransport, SharedToken};
use crate::state::{AuthState, ChangeNotifier, UserState, ViewScope};
use crate::utils::storage::TokenStorage;
use crate::viewmodels::{LoginFormViewModel, UserFormViewModel};

/// Global application state, cloned cheaply into views and closures
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub users: UserState,

    // UI state
    pub route: Rc<RefCell<Route>>,
    pub login_form: Rc<RefCell<LoginFormViewModel>>,
    pub user_form: Rc<RefCell<UserFormViewModel>>,

    view_scope: Rc<RefCell<ViewScope>>,
    notifier: ChangeNotifier,
}

impl AppState {
    pub fn new(config: &AppConfig, transport: Rc<dyn HttpTransport>, storage: Rc<dyn TokenStorage>) -> Self {
        let notifier = ChangeNotifier::new();
        let token: SharedToken = Rc::new(RefCell::new(None));
        let api = ApiClient::new(&config.api_base_url, transport, token.clone());

        let auth = AuthState::new(api.clone(), token, storage, notifier.clone());
        let users = UserState::new(api, notifier.clone());

        Self {
            auth,
            users,
            route: Rc::new(RefCell::new(Route::UserList)),
            login_form: Rc::new(RefCell::new(LoginFormViewModel::new())),
            user_form: Rc::new(RefCell::new(UserFormViewModel::create())),
            view_scope: Rc::new(RefCell::new(ViewScope::new())),
            notifier,
        }
    }

    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.notifier.subscribe(callback);
    }

    pub fn notify(&self) {
        self.notifier.notify();
    }

    pub fn current_route(&self) -> Route {
        self.route.borrow().clone()
    }

    /// Scope of the view currently on screen
    pub fn view_scope(&self) -> ViewScope {
        self.view_scope.borrow().clone()
    }

    /// Leaves the current view and enters `route` (after the auth guard).
    /// Requests of the old view are cancelled; leaving a form drops the record under edit.
    pub fn navigate(&self, route: Route) -> Route {
        let landed = route.guard(self.auth.is_authenticated());
        let previous = self.current_route();
        if previous == landed {
            return landed;
        }

        self.view_scope.borrow().cancel();
        *self.view_scope.borrow_mut() = ViewScope::new();

        if previous.is_form() {
            self.users.clear_current();
        }
        match &landed {
            Route::UserList => self.users.forget_list_failure(),
            Route::CreateUser => *self.user_form.borrow_mut() = UserFormViewModel::create(),
            Route::EditUser(id) => *self.user_form.borrow_mut() = UserFormViewModel::edit(id.clone()),
            _ => {}
        }

        log::info!("🧭 [ROUTER] {} -> {}", previous.path(), landed.path());
        *self.route.borrow_mut() = landed.clone();
        self.notifier.notify();
        landed
    }

    /// Ends the session and forgets the previous operator's data
    pub fn logout(&self) {
        self.auth.logout();
        self.users.clear();
        self.login_form.borrow_mut().clear_password();
    }
}
