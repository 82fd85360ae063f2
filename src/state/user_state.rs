// ============================================================================
// USER STATE - record store: list, record under edit, per-operation status
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{NewUser, UserPatch, UserRecord};
use crate::services::{ApiClient, ApiError};
use crate::state::reactivity::ChangeNotifier;
use crate::state::status::OperationState;
use crate::state::view_scope::ViewScope;
use crate::utils::constants::FETCH_USERS_FAILED_FALLBACK;

#[derive(Clone)]
pub struct UserState {
    users: Rc<RefCell<Vec<UserRecord>>>,
    current: Rc<RefCell<Option<UserRecord>>>,
    list_op: Rc<RefCell<OperationState>>,
    current_op: Rc<RefCell<OperationState>>,
    create_op: Rc<RefCell<OperationState>>,
    update_op: Rc<RefCell<OperationState>>,
    api: ApiClient,
    notifier: ChangeNotifier,
}

impl UserState {
    pub fn new(api: ApiClient, notifier: ChangeNotifier) -> Self {
        Self {
            users: Rc::new(RefCell::new(Vec::new())),
            current: Rc::new(RefCell::new(None)),
            list_op: Rc::new(RefCell::new(OperationState::default())),
            current_op: Rc::new(RefCell::new(OperationState::default())),
            create_op: Rc::new(RefCell::new(OperationState::default())),
            update_op: Rc::new(RefCell::new(OperationState::default())),
            api,
            notifier,
        }
    }

    pub fn users(&self) -> Vec<UserRecord> {
        self.users.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.users.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.borrow().is_empty()
    }

    pub fn current(&self) -> Option<UserRecord> {
        self.current.borrow().clone()
    }

    pub fn list_state(&self) -> OperationState {
        self.list_op.borrow().clone()
    }

    pub fn current_state(&self) -> OperationState {
        self.current_op.borrow().clone()
    }

    pub fn create_state(&self) -> OperationState {
        self.create_op.borrow().clone()
    }

    pub fn update_state(&self) -> OperationState {
        self.update_op.borrow().clone()
    }

    /// Replaces the whole list with the server snapshot
    pub async fn fetch_all(&self, scope: &ViewScope) -> Result<(), ApiError> {
        self.list_op.borrow_mut().begin();
        self.notifier.notify();

        match scope.run(self.api.list_users()).await {
            Ok(Ok(users)) => {
                log::info!("📋 [USERS] {} users loaded", users.len());
                *self.users.borrow_mut() = users;
                self.list_op.borrow_mut().succeed();
                self.notifier.notify();
                Ok(())
            }
            Ok(Err(e)) => {
                log::error!("❌ [USERS] Fetching users failed: {}", e);
                self.list_op.borrow_mut().fail(e.user_message(FETCH_USERS_FAILED_FALLBACK));
                self.notifier.notify();
                Err(e)
            }
            Err(cancelled) => {
                self.list_op.borrow_mut().reset();
                Err(cancelled)
            }
        }
    }

    /// Loads one record into the current slot; the list is not touched
    pub async fn fetch_one(&self, id: &str, scope: &ViewScope) -> Result<UserRecord, ApiError> {
        self.current_op.borrow_mut().begin();
        self.notifier.notify();

        match scope.run(self.api.get_user(id)).await {
            Ok(Ok(user)) => {
                *self.current.borrow_mut() = Some(user.clone());
                self.current_op.borrow_mut().succeed();
                self.notifier.notify();
                Ok(user)
            }
            Ok(Err(e)) => {
                if e.is_not_found() {
                    log::warn!("⚠️ [USERS] User {} not found", id);
                } else {
                    log::error!("❌ [USERS] Fetching user {} failed: {}", id, e);
                }
                self.current_op.borrow_mut().fail(e.to_string());
                self.notifier.notify();
                Err(e)
            }
            Err(cancelled) => {
                self.current_op.borrow_mut().reset();
                Err(cancelled)
            }
        }
    }

    /// Appends the record returned by the backend
    pub async fn create(&self, user: NewUser, scope: &ViewScope) -> Result<UserRecord, ApiError> {
        self.create_op.borrow_mut().begin();
        self.notifier.notify();

        match scope.run(self.api.create_user(&user)).await {
            Ok(Ok(created)) => {
                {
                    let mut users = self.users.borrow_mut();
                    match users.iter().position(|u| u.id == created.id) {
                        // Ids stay unique even if the backend hands back one we already hold
                        Some(index) => users[index] = created.clone(),
                        None => users.push(created.clone()),
                    }
                }
                log::info!("✅ [USERS] User {} created", created.id);
                self.create_op.borrow_mut().succeed();
                self.notifier.notify();
                Ok(created)
            }
            Ok(Err(e)) => {
                log::error!("❌ [USERS] Creating user failed: {}", e);
                self.create_op.borrow_mut().fail(e.to_string());
                self.notifier.notify();
                Err(e)
            }
            Err(cancelled) => {
                self.create_op.borrow_mut().reset();
                Err(cancelled)
            }
        }
    }

    /// Replaces the matching list entry with the backend's answer and clears the
    /// current record. If the list does not hold `id` it is left as is and marked
    /// stale (Idle) so the listing refetches next time it is shown.
    pub async fn update(&self, id: &str, patch: UserPatch, scope: &ViewScope) -> Result<UserRecord, ApiError> {
        self.update_op.borrow_mut().begin();
        self.notifier.notify();

        match scope.run(self.api.update_user(id, &patch)).await {
            Ok(Ok(updated)) => {
                let replaced = {
                    let mut users = self.users.borrow_mut();
                    match users.iter().position(|u| u.id == updated.id) {
                        Some(index) => {
                            users[index] = updated.clone();
                            true
                        }
                        None => false,
                    }
                };
                if !replaced {
                    log::warn!("⚠️ [USERS] Updated user {} is not in the list, marking it stale", updated.id);
                    self.list_op.borrow_mut().reset();
                }
                *self.current.borrow_mut() = None;
                self.update_op.borrow_mut().succeed();
                log::info!("✅ [USERS] User {} updated", updated.id);
                self.notifier.notify();
                Ok(updated)
            }
            Ok(Err(e)) => {
                log::error!("❌ [USERS] Updating user {} failed: {}", id, e);
                self.update_op.borrow_mut().fail(e.to_string());
                self.notifier.notify();
                Err(e)
            }
            Err(cancelled) => {
                self.update_op.borrow_mut().reset();
                Err(cancelled)
            }
        }
    }

    /// A failed listing goes back to Idle so the next visit fetches again
    pub fn forget_list_failure(&self) {
        let mut list_op = self.list_op.borrow_mut();
        if list_op.is_failed() {
            list_op.reset();
        }
    }

    pub fn clear_current(&self) {
        let had_record = self.current.borrow_mut().take().is_some();
        self.current_op.borrow_mut().reset();
        if had_record {
            self.notifier.notify();
        }
    }

    /// Drops everything, e.g. when the operator logs out
    pub fn clear(&self) {
        self.users.borrow_mut().clear();
        *self.current.borrow_mut() = None;
        for op in [&self.list_op, &self.current_op, &self.create_op, &self.update_op] {
            op.borrow_mut().reset();
        }
        self.notifier.notify();
    }
}
