// ============================================================================
// FORM FIELDS - labelled inputs with inline validation messages
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_input_value, ElementBuilder};

pub struct InputSpec<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub input_type: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub error: Option<&'a str>,
    pub disabled: bool,
}

impl<'a> InputSpec<'a> {
    pub fn text(id: &'a str, label: &'a str, value: &'a str) -> Self {
        Self {
            id,
            label,
            input_type: "text",
            value,
            placeholder: "",
            error: None,
            disabled: false,
        }
    }

    pub fn input_type(mut self, input_type: &'a str) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// `<div class="field">` with label, input and the field's error (if any)
pub fn render_input<F>(spec: InputSpec<'_>, on_change: F) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let invalid = spec.error.is_some();
    let input = ElementBuilder::new("input")?
        .id(spec.id)?
        .class(if invalid { "field-input invalid" } else { "field-input" })
        .attr("type", spec.input_type)?
        .attr("name", spec.id)?
        .attr("value", spec.value)?
        .attr("placeholder", spec.placeholder)?
        .flag("disabled", spec.disabled)?
        .build();
    on_input_value(&input, on_change)?;

    let label = ElementBuilder::new("label")?
        .class("field-label")
        .attr("for", spec.id)?
        .text(spec.label)
        .build();

    let mut field = ElementBuilder::new("div")?.class("field").child(label)?.child(input)?;
    if let Some(message) = spec.error {
        field = field.child(render_field_error(message)?)?;
    }
    Ok(field.build())
}

pub fn render_field_error(message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("span")?.class("field-error").text(message).build())
}

/// Banner for request-level failures
pub fn render_alert(message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("alert alert-error")
        .attr("role", "alert")?
        .text(message)
        .build())
}
