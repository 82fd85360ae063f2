// ============================================================================
// AUTH STATE - session store: bearer token + login lifecycle
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::LoginRequest;
use crate::services::{ApiClient, ApiError, SharedToken};
use crate::state::reactivity::ChangeNotifier;
use crate::state::status::{OperationState, RequestStatus};
use crate::state::view_scope::ViewScope;
use crate::utils::constants::LOGIN_FAILED_FALLBACK;
use crate::utils::storage::TokenStorage;

#[derive(Clone)]
pub struct AuthState {
    token: SharedToken,
    login_op: Rc<RefCell<OperationState>>,
    storage: Rc<dyn TokenStorage>,
    api: ApiClient,
    notifier: ChangeNotifier,
}

impl AuthState {
    /// `token` must be the same cell the `ApiClient` reads its bearer from.
    /// A token found in `storage` is restored immediately.
    pub fn new(
        api: ApiClient,
        token: SharedToken,
        storage: Rc<dyn TokenStorage>,
        notifier: ChangeNotifier,
    ) -> Self {
        if let Some(saved) = storage.load() {
            log::info!("💾 [AUTH] Token restored from storage");
            *token.borrow_mut() = Some(saved);
        }

        Self {
            token,
            login_op: Rc::new(RefCell::new(OperationState::default())),
            storage,
            api,
            notifier,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// Derived from the token, so it can never disagree with it
    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    pub fn status(&self) -> RequestStatus {
        self.login_op.borrow().status
    }

    pub fn error(&self) -> Option<String> {
        self.login_op.borrow().error.clone()
    }

    pub fn login_state(&self) -> OperationState {
        self.login_op.borrow().clone()
    }

    /// Exchanges credentials for a token.
    /// On failure the previous token (if any) is kept and the reason is stored in `error()`.
    pub async fn login(&self, credentials: LoginRequest, scope: &ViewScope) -> Result<(), ApiError> {
        self.login_op.borrow_mut().begin();
        self.notifier.notify();

        match scope.run(self.api.login(&credentials)).await {
            Ok(Ok(response)) => {
                if let Err(e) = self.storage.save(&response.token) {
                    log::warn!("⚠️ [AUTH] Token not persisted: {}", e);
                }
                *self.token.borrow_mut() = Some(response.token);
                self.login_op.borrow_mut().succeed();
                log::info!("✅ [AUTH] Logged in as {}", credentials.email);
                self.notifier.notify();
                Ok(())
            }
            Ok(Err(e)) => {
                log::error!("❌ [AUTH] Login failed: {}", e);
                self.login_op.borrow_mut().fail(e.user_message(LOGIN_FAILED_FALLBACK));
                self.notifier.notify();
                Err(e)
            }
            Err(cancelled) => {
                log::debug!("[AUTH] Login abandoned");
                self.login_op.borrow_mut().reset();
                Err(cancelled)
            }
        }
    }

    pub fn logout(&self) {
        log::info!("👋 [AUTH] Logout");
        *self.token.borrow_mut() = None;
        if let Err(e) = self.storage.clear() {
            log::warn!("⚠️ [AUTH] Could not clear persisted token: {}", e);
        }
        self.login_op.borrow_mut().reset();
        self.notifier.notify();
    }
}
