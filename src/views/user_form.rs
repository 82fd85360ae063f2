// ============================================================================
// USER FORM VIEW - create and edit share one form
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{on_checkbox_change, on_click, on_select_change, on_submit, set_input_value_by_id, ElementBuilder};
use crate::models::Employment;
use crate::router::{self, Route};
use crate::state::AppState;
use crate::viewmodels::{user_form, Field, UserFormViewModel};
use crate::views::fields::{render_alert, render_input, InputSpec};

const FULL_NAME_INPUT_ID: &str = "user-full-name";

pub fn render_user_form(state: &AppState) -> Result<Element, JsValue> {
    let vm = state.user_form.borrow().clone();
    let editing = vm.is_editing();

    let title = if editing { "Edit user" } else { "Create user" };
    let section = ElementBuilder::new("section")?
        .class("user-form-view")
        .child(ElementBuilder::new("h1")?.class("page-title").text(title).build())?;

    // Record still loading or failed: nothing to edit yet
    if editing {
        let current = state.users.current_state();
        if current.is_loading() || (state.users.current().is_none() && !current.is_failed()) {
            return Ok(section
                .child(ElementBuilder::new("div")?.class("spinner").attr("aria-busy", "true")?.text("Loading...").build())?
                .build());
        }
        if let Some(message) = current.error.as_deref() {
            return Ok(section.child(render_alert(message)?)?.build());
        }
    }

    let disabled = vm.is_submitting();
    let values = vm.values();
    let shared = &state.user_form;

    let mut form = ElementBuilder::new("form")?.class("user-form").attr("novalidate", "")?;
    if let Some(message) = vm.submit_error() {
        form = form.child(render_alert(message)?)?;
    }

    form = form
        .child(bound_input(
            shared,
            InputSpec::text("user-name", "Name", &values.name).error(vm.error(Field::Name)).disabled(disabled),
            |vm, value| {
                vm.set_name(value);
                set_input_value_by_id(FULL_NAME_INPUT_ID, &vm.values().full_name);
            },
        )?)?
        .child(bound_input(
            shared,
            InputSpec::text("user-sur-name", "Surname", &values.sur_name)
                .error(vm.error(Field::SurName))
                .disabled(disabled),
            |vm, value| {
                vm.set_sur_name(value);
                set_input_value_by_id(FULL_NAME_INPUT_ID, &vm.values().full_name);
            },
        )?)?
        .child(bound_input(
            shared,
            InputSpec::text(FULL_NAME_INPUT_ID, "Full name", &values.full_name)
                .error(vm.error(Field::FullName))
                .disabled(disabled),
            |vm, value| vm.set_full_name(value),
        )?)?;

    // Credentials are fixed once the account exists
    if !editing {
        form = form
            .child(bound_input(
                shared,
                InputSpec::text("user-email", "Email", &values.email)
                    .input_type("email")
                    .error(vm.error(Field::Email))
                    .disabled(disabled),
                |vm, value| vm.set_email(value),
            )?)?
            .child(bound_input(
                shared,
                InputSpec::text("user-password", "Password", &values.password)
                    .input_type("password")
                    .error(vm.error(Field::Password))
                    .disabled(disabled),
                |vm, value| vm.set_password(value),
            )?)?;
    }

    form = form
        .child(bound_input(
            shared,
            InputSpec::text("user-birth-date", "Birth date", &values.birth_date)
                .input_type("date")
                .error(vm.error(Field::BirthDate))
                .disabled(disabled),
            |vm, value| vm.set_birth_date(value),
        )?)?
        .child(bound_input(
            shared,
            InputSpec::text("user-telephone", "Telephone", &values.telephone)
                .input_type("tel")
                .placeholder("+79991234567")
                .error(vm.error(Field::Telephone))
                .disabled(disabled),
            |vm, value| vm.set_telephone(value),
        )?)?
        .child(render_employment(shared, values.employment, disabled)?)?
        .child(render_agreement(shared, values.user_agreement, disabled)?)?
        .child(render_actions(state, editing, disabled)?)?;

    let form = form.build();
    let state_for_submit = state.clone();
    on_submit(&form, move || handle_submit(&state_for_submit))?;

    Ok(section.child(form)?.build())
}

fn bound_input<F>(
    vm: &Rc<RefCell<UserFormViewModel>>,
    spec: InputSpec<'_>,
    apply: F,
) -> Result<Element, JsValue>
where
    F: Fn(&mut UserFormViewModel, &str) + 'static,
{
    let vm = vm.clone();
    render_input(spec, move |value| apply(&mut vm.borrow_mut(), &value))
}

fn render_employment(
    vm: &Rc<RefCell<UserFormViewModel>>,
    selected: Employment,
    disabled: bool,
) -> Result<Element, JsValue> {
    let mut select = ElementBuilder::new("select")?
        .id("user-employment")?
        .class("field-input")
        .flag("disabled", disabled)?;
    for (employment, label) in [(Employment::Employed, "Employed"), (Employment::Unemployed, "Unemployed")] {
        let option = ElementBuilder::new("option")?
            .attr("value", employment.as_str())?
            .flag("selected", employment == selected)?
            .text(label)
            .build();
        select = select.child(option)?;
    }
    let select = select.build();

    let vm = vm.clone();
    on_select_change(&select, move |value| match Employment::parse(&value) {
        Some(employment) => vm.borrow_mut().set_employment(employment),
        None => log::warn!("⚠️ [APP] Unknown employment option: {}", value),
    })?;

    Ok(ElementBuilder::new("div")?
        .class("field")
        .child(
            ElementBuilder::new("label")?
                .class("field-label")
                .attr("for", "user-employment")?
                .text("Employment")
                .build(),
        )?
        .child(select)?
        .build())
}

fn render_agreement(
    vm: &Rc<RefCell<UserFormViewModel>>,
    accepted: bool,
    disabled: bool,
) -> Result<Element, JsValue> {
    let checkbox = ElementBuilder::new("input")?
        .id("user-agreement")?
        .attr("type", "checkbox")?
        .flag("checked", accepted)?
        .flag("disabled", disabled)?
        .build();
    let vm = vm.clone();
    on_checkbox_change(&checkbox, move |checked| vm.borrow_mut().set_user_agreement(checked))?;

    Ok(ElementBuilder::new("div")?
        .class("field field-checkbox")
        .child(checkbox)?
        .child(
            ElementBuilder::new("label")?
                .attr("for", "user-agreement")?
                .text("User agreement accepted")
                .build(),
        )?
        .build())
}

fn render_actions(state: &AppState, editing: bool, disabled: bool) -> Result<Element, JsValue> {
    let label = match (editing, disabled) {
        (_, true) => "Saving...",
        (true, false) => "Save",
        (false, false) => "Create",
    };
    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .flag("disabled", disabled)?
        .text(label)
        .build();

    let cancel = ElementBuilder::new("a")?
        .class("btn btn-secondary")
        .attr("href", &Route::UserList.path())?
        .text("Cancel")
        .build();
    let state = state.clone();
    on_click(&cancel, move |e| {
        e.prevent_default();
        router::navigate(&state, Route::UserList);
    })?;

    Ok(ElementBuilder::new("div")?.class("form-actions").child(submit)?.child(cancel)?.build())
}

/// Validate, send, and leave the form only once the store accepted the record
fn handle_submit(state: &AppState) {
    let submission = state.user_form.borrow_mut().record_validation();
    let submission = match submission {
        Ok(submission) => submission,
        Err(_) => {
            state.notify();
            return;
        }
    };

    state.user_form.borrow_mut().begin_submit();
    state.notify();

    let state = state.clone();
    spawn_local(async move {
        let scope = state.view_scope();
        let outcome = user_form::submit(submission, &state.users, &scope).await;
        state.user_form.borrow_mut().finish_submit(&outcome);
        match outcome {
            Ok(record) => {
                log::info!("✅ [USERS] Saved user {}", record.id);
                router::navigate(&state, Route::UserList);
            }
            Err(e) => {
                log::warn!("⚠️ [USERS] Save failed: {}", e);
                state.notify();
            }
        }
    });
}
