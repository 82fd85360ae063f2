// ============================================================================
// APP - wires browser services into the state and owns the root element
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, on_popstate, set_inner_html};
use crate::router;
use crate::services::GlooTransport;
use crate::state::{AppState, RenderGate};
use crate::utils::constants::APP_ROOT_ID;
use crate::utils::storage::LocalTokenStorage;
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(APP_ROOT_ID)
            .ok_or_else(|| JsValue::from_str(&format!("No #{} element found", APP_ROOT_ID)))?;

        let transport = Rc::new(GlooTransport::new(CONFIG.with_credentials));
        let storage = Rc::new(LocalTokenStorage::new(&CONFIG.token_storage_key));
        let state = AppState::new(&CONFIG, transport, storage);
        log::info!(
            "🔐 [APP] Session {}",
            if state.auth.is_authenticated() { "restored from storage" } else { "absent" }
        );

        // Several stores may notify in the same tick; one render per tick is enough
        let gate = RenderGate::new();
        state.subscribe_to_changes(move || {
            use gloo_timers::callback::Timeout;
            if !gate.request() {
                return;
            }
            let gate = gate.clone();
            Timeout::new(0, move || {
                gate.rendered();
                crate::rerender_app();
            })
            .forget();
        });

        let state_for_history = state.clone();
        on_popstate(move |_| router::sync_with_location(&state_for_history))?;

        Ok(Self { state, root })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let view = render_app(&self.state)?;
        set_inner_html(&self.root, "");
        append_child(&self.root, &view)
    }
}
