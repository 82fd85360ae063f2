// ============================================================================
// APP VIEW - layout shell and route dispatch
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::router::{self, Route};
use crate::state::AppState;
use crate::views::{render_login, render_user_form, render_user_table};

pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let route = state.current_route();
    log::debug!("🎨 [APP] render {}", route.path());

    let content = match &route {
        Route::Login => return render_login(state),
        Route::UserList => render_user_table(state)?,
        Route::CreateUser | Route::EditUser(_) => render_user_form(state)?,
    };

    Ok(ElementBuilder::new("div")?
        .class("layout")
        .child(render_nav(state, &route)?)?
        .child(ElementBuilder::new("main")?.class("content").child(content)?.build())?
        .build())
}

fn render_nav(state: &AppState, active: &Route) -> Result<Element, JsValue> {
    let mut nav = ElementBuilder::new("nav")?.class("drawer");
    for (label, route) in [("Home", Route::UserList), ("Create user", Route::CreateUser)] {
        nav = nav.child(nav_link(state, label, route, active)?)?;
    }

    let logout = ElementBuilder::new("button")?
        .class("drawer-item drawer-logout")
        .attr("type", "button")?
        .text("Logout")
        .build();
    let state = state.clone();
    on_click(&logout, move |_| {
        log::info!("👋 [AUTH] Logout requested");
        state.logout();
        router::navigate(&state, Route::Login);
    })?;

    Ok(nav.child(logout)?.build())
}

fn nav_link(state: &AppState, label: &str, route: Route, active: &Route) -> Result<Element, JsValue> {
    let class = if &route == active { "drawer-item active" } else { "drawer-item" };
    let link = ElementBuilder::new("a")?
        .class(class)
        .attr("href", &route.path())?
        .text(label)
        .build();
    let state = state.clone();
    on_click(&link, move |e| {
        e.prevent_default();
        router::navigate(&state, route.clone());
    })?;
    Ok(link)
}
