// ============================================================================
// USER ADMIN - back-office SPA for managing user accounts (pure Rust + WASM)
// ============================================================================
// Layers:
// - Views: functions that build DOM from state (no logic)
// - ViewModels: form state, validation, submission
// - State: stores behind Rc<RefCell>, one status per operation
// - Services: HTTP only (bearer token injected per request)
// - Models: JSON shapes shared with the backend
// ============================================================================

pub mod app;
pub mod config;
pub mod dom;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
pub mod views;

#[cfg(test)]
mod testing;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::App;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(config::CONFIG.log_level()));
    log::info!("🚀 User admin starting, API at {}", config::CONFIG.api_base_url);

    let app = App::new()?;
    // Resolve the address bar first so the first paint is already the guarded route
    router::sync_with_location(app.state());
    app.render()?;

    APP.with(|cell| *cell.borrow_mut() = Some(app));
    Ok(())
}

/// Full re-render of the mounted app
pub fn rerender_app() {
    APP.with(|cell| match cell.borrow().as_ref() {
        Some(app) => {
            if let Err(e) = app.render() {
                log::error!("❌ [APP] Render failed: {:?}", e);
            }
        }
        None => log::warn!("⚠️ [APP] Render requested before start"),
    });
}

/// Callable from JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
