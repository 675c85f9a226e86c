// templates/pages/form.rs

use crate::domain::forms::{FieldSpec, FormSpec};
use crate::domain::validation::{FieldKind, FormReport};
use crate::templates::components::notice;
use crate::templates::site_layout;
use maud::{html, Markup};
use std::collections::BTreeMap;

pub struct FormPageVm<'a> {
    pub form: &'static FormSpec,
    /// Field values to pre-fill, hidden inputs included.
    pub values: &'a BTreeMap<String, String>,
    /// Present after a rejected submission.
    pub report: Option<&'a FormReport>,
    pub notice: Option<&'a str>,
}

pub fn form_page(vm: &FormPageVm) -> Markup {
    let form = vm.form;
    let value = |name: &str| vm.values.get(name).map(String::as_str).unwrap_or("");
    let error = |name: &str| vm.report.and_then(|r| r.error_for(name));
    let first_invalid = vm.report.and_then(|r| r.first_invalid());

    site_layout(
        form.title,
        html! {
            h1 { (form.title) }
            p class="intro" { (form.intro) }

            @if let Some(message) = vm.notice {
                (notice("info", message))
            }
            @if vm.report.is_some_and(|r| !r.is_valid()) {
                (notice("error", "Some fields need attention before we can accept this submission."))
            }

            form method="get" action="/thankyou" class="card site-form" id=(format!("{}-form", form.id)) {
                input type="hidden" name="form" value=(form.id);
                @for spec in form.fields {
                    @if spec.kind == FieldKind::Hidden {
                        input type="hidden" name=(spec.name) value=(value(spec.name));
                    } @else {
                        (field(spec, value(spec.name), error(spec.name), first_invalid == Some(spec.name)))
                    }
                }
                div class="form-actions" {
                    button type="submit" { "Submit" }
                    button type="submit" formaction=(form.path) formnovalidate name="save" value="draft" class="secondary" {
                        "Save draft"
                    }
                }
            }
        },
    )
}

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Tel => "tel",
        FieldKind::Number => "number",
        FieldKind::Hidden => "hidden",
        _ => "text",
    }
}

fn field(spec: &FieldSpec, value: &str, error: Option<&str>, autofocus: bool) -> Markup {
    let error_id = format!("{}-error", spec.name);
    let described_by = error.map(|_| error_id.as_str());
    let invalid = error.map(|_| "true");

    html! {
        div class=(if error.is_some() { "form-field invalid" } else { "form-field" }) {
            label for=(spec.name) {
                (spec.label)
                @if spec.required { " *" }
            }
            @match spec.kind {
                FieldKind::TextArea => {
                    textarea id=(spec.name) name=(spec.name) rows="4" required[spec.required]
                        aria-invalid=[invalid] aria-describedby=[described_by] autofocus[autofocus] { (value) }
                }
                FieldKind::Select => {
                    select id=(spec.name) name=(spec.name) required[spec.required]
                        aria-invalid=[invalid] aria-describedby=[described_by] autofocus[autofocus] {
                        option value="" { "Choose one" }
                        @for (code, label) in spec.options {
                            option value=(code) selected[*code == value] { (label) }
                        }
                    }
                }
                kind => {
                    input type=(input_type(kind)) id=(spec.name) name=(spec.name) value=(value)
                        required[spec.required] pattern=[spec.pattern]
                        aria-invalid=[invalid] aria-describedby=[described_by] autofocus[autofocus];
                }
            }
            @if let Some(hint) = spec.hint {
                small class="hint" { (hint) }
            }
            @if let Some(message) = error {
                p class="field-error" id=(error_id) role="alert" { (message) }
            }
        }
    }
}
