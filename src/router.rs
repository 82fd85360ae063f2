// ============================================================================
// ROUTER - route table, protected-route guard, History API glue
// ============================================================================

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    UserList,
    CreateUser,
    EditUser(String),
}

impl Route {
    /// Unknown paths resolve to the listing
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Route::Login,
            [] => Route::UserList,
            ["user", "create"] => Route::CreateUser,
            ["user", "edit", id] => Route::EditUser((*id).to_string()),
            _ => Route::UserList,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::UserList => "/".to_string(),
            Route::CreateUser => "/user/create".to_string(),
            Route::EditUser(id) => format!("/user/edit/{}", id),
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Where the operator actually lands
    pub fn guard(self, authenticated: bool) -> Self {
        if self.is_protected() && !authenticated {
            Route::Login
        } else {
            self
        }
    }

    pub fn is_form(&self) -> bool {
        matches!(self, Route::CreateUser | Route::EditUser(_))
    }
}

/// Current browser path, "/" when unavailable
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history(route: &Route) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let path = route.path();
    if current_path() == path {
        return;
    }
    match window.history() {
        Ok(history) => {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&path)) {
                log::warn!("⚠️ [ROUTER] pushState failed: {:?}", e);
            }
        }
        Err(e) => log::warn!("⚠️ [ROUTER] History unavailable: {:?}", e),
    }
}

/// Switches view: updates state, address bar and kicks off the route's loads
pub fn navigate(state: &AppState, route: Route) {
    let landed = state.navigate(route);
    push_history(&landed);
    load_route_data(state, &landed);
}

/// Same as `navigate` but for back/forward, where the browser already moved
pub fn sync_with_location(state: &AppState) {
    let landed = state.navigate(Route::parse(&current_path()));
    if landed.path() != current_path() {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&landed.path()));
        }
    }
    load_route_data(state, &landed);
}

/// Fetches the listing again in the current view's scope
pub fn reload_users(state: &AppState) {
    let users = state.users.clone();
    let scope = state.view_scope();
    spawn_local(async move {
        let _ = users.fetch_all(&scope).await;
    });
}

fn load_route_data(state: &AppState, route: &Route) {
    match route {
        Route::UserList if state.users.list_state().is_idle() => reload_users(state),
        Route::EditUser(id) => {
            let state = state.clone();
            let id = id.clone();
            let scope = state.view_scope();
            spawn_local(async move {
                if let Ok(record) = state.users.fetch_one(&id, &scope).await {
                    state.user_form.borrow_mut().populate(&record);
                    state.notify();
                }
            });
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_parse() {
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/"), Route::UserList);
        assert_eq!(Route::parse("/user/create"), Route::CreateUser);
        assert_eq!(Route::parse("/user/edit/42"), Route::EditUser("42".into()));
        assert_eq!(Route::parse("/user/edit/42/"), Route::EditUser("42".into()));
        assert_eq!(Route::parse("/user/edit/42?tab=1"), Route::EditUser("42".into()));
    }

    #[test]
    fn unknown_paths_redirect_to_listing() {
        assert_eq!(Route::parse("/nope"), Route::UserList);
        assert_eq!(Route::parse("/user/edit"), Route::UserList);
        assert_eq!(Route::parse("/user/delete/1"), Route::UserList);
    }

    #[test]
    fn paths_round_trip() {
        for route in [Route::Login, Route::UserList, Route::CreateUser, Route::EditUser("9".into())] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn guard_sends_anonymous_users_to_login() {
        assert_eq!(Route::UserList.guard(false), Route::Login);
        assert_eq!(Route::EditUser("1".into()).guard(false), Route::Login);
        assert_eq!(Route::CreateUser.guard(true), Route::CreateUser);
        assert_eq!(Route::Login.guard(false), Route::Login);
        // An authenticated visit to /login stays there
        assert_eq!(Route::Login.guard(true), Route::Login);
    }
}
