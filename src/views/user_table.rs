// ============================================================================
// USER TABLE VIEW - listing with loading and error states
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::models::UserRecord;
use crate::router::{self, Route};
use crate::state::AppState;
use crate::utils::constants::FETCH_USERS_FAILED_FALLBACK;
use crate::views::fields::render_alert;

const COLUMNS: [&str; 8] = ["ID", "Email", "Name", "Surname", "Birth date", "Employment", "Telephone", ""];

pub fn render_user_table(state: &AppState) -> Result<Element, JsValue> {
    let list = state.users.list_state();
    let section = ElementBuilder::new("section")?
        .class("users-view")
        .child(ElementBuilder::new("h1")?.class("page-title").text("Users").build())?;

    if list.is_loading() {
        return Ok(section
            .child(ElementBuilder::new("div")?.class("spinner").attr("aria-busy", "true")?.text("Loading...").build())?
            .build());
    }
    if list.is_failed() {
        let message = list.error.as_deref().unwrap_or(FETCH_USERS_FAILED_FALLBACK);
        let retry = ElementBuilder::new("button")?
            .class("btn btn-secondary")
            .attr("type", "button")?
            .text("Retry")
            .build();
        let state = state.clone();
        on_click(&retry, move |_| {
            log::info!("🔁 [USERS] Retrying listing");
            router::reload_users(&state);
        })?;
        return Ok(section.child(render_alert(message)?)?.child(retry)?.build());
    }

    let users = state.users.users();
    if users.is_empty() {
        return Ok(section
            .child(ElementBuilder::new("p")?.class("empty").text("No users yet").build())?
            .build());
    }

    let mut header = ElementBuilder::new("tr")?;
    for title in COLUMNS {
        header = header.child(ElementBuilder::new("th")?.text(title).build())?;
    }
    let mut body = ElementBuilder::new("tbody")?;
    for user in &users {
        body = body.child(render_row(state, user)?)?;
    }

    let table = ElementBuilder::new("table")?
        .class("users-table")
        .child(ElementBuilder::new("thead")?.child(header.build())?.build())?
        .child(body.build())?
        .build();
    Ok(section.child(table)?.build())
}

fn render_row(state: &AppState, user: &UserRecord) -> Result<Element, JsValue> {
    let cells = [
        user.id.as_str(),
        user.email.as_str(),
        user.name.as_str(),
        user.sur_name.as_str(),
        user.birth_date.as_deref().unwrap_or("-"),
        user.employment.map(|e| e.as_str()).unwrap_or("-"),
        user.telephone.as_deref().unwrap_or("-"),
    ];

    let mut row = ElementBuilder::new("tr")?;
    for cell in cells {
        row = row.child(ElementBuilder::new("td")?.text(cell).build())?;
    }

    let route = Route::EditUser(user.id.clone());
    let edit = ElementBuilder::new("a")?
        .class("btn btn-link")
        .attr("href", &route.path())?
        .text("Edit")
        .build();
    let state = state.clone();
    on_click(&edit, move |e| {
        e.prevent_default();
        router::navigate(&state, route.clone());
    })?;

    Ok(row.child(ElementBuilder::new("td")?.child(edit)?.build())?.build())
}
