// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{on_submit, ElementBuilder};
use crate::router::{self, Route};
use crate::state::AppState;
use crate::viewmodels::Field;
use crate::views::fields::{render_alert, render_input, InputSpec};

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let login = state.auth.login_state();
    let loading = login.is_loading();
    let form_vm = state.login_form.borrow().clone();

    let email = {
        let vm = state.login_form.clone();
        render_input(
            InputSpec::text("login-email", "Email", form_vm.email())
                .input_type("email")
                .placeholder("admin@example.com")
                .error(form_vm.error(Field::Email))
                .disabled(loading),
            move |value| vm.borrow_mut().set_email(&value),
        )?
    };
    let password = {
        let vm = state.login_form.clone();
        render_input(
            InputSpec::text("login-password", "Password", form_vm.password())
                .input_type("password")
                .error(form_vm.error(Field::Password))
                .disabled(loading),
            move |value| vm.borrow_mut().set_password(&value),
        )?
    };

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .flag("disabled", loading)?
        .text(if loading { "Signing in..." } else { "Sign in" })
        .build();

    let mut form = ElementBuilder::new("form")?
        .class("login-form")
        .attr("novalidate", "")?
        .child(ElementBuilder::new("h1")?.class("login-title").text("Sign in").build())?;
    if let Some(message) = login.error.as_deref() {
        form = form.child(render_alert(message)?)?;
    }
    let form = form.child(email)?.child(password)?.child(submit)?.build();

    let state_for_submit = state.clone();
    on_submit(&form, move || {
        let credentials = state_for_submit.login_form.borrow_mut().credentials();
        let credentials = match credentials {
            Ok(credentials) => credentials,
            Err(errors) => {
                log::debug!("[AUTH] Login form invalid: {}", errors);
                state_for_submit.notify();
                return;
            }
        };

        let state = state_for_submit.clone();
        spawn_local(async move {
            let scope = state.view_scope();
            if state.auth.login(credentials, &scope).await.is_ok() {
                state.login_form.borrow_mut().clear_password();
                router::navigate(&state, Route::UserList);
            }
        });
    })?;

    Ok(ElementBuilder::new("section")?.class("login-view").child(form)?.build())
}
