use crate::domain::submission::Submission;
use crate::domain::validation::FormReport;
use crate::templates::components::notice;
use crate::templates::site_layout;
use maud::{html, Markup};

pub struct ThankYouVm<'a> {
    pub submission: Option<&'a Submission>,
    pub report: Option<&'a FormReport>,
    /// The submission came from storage, not this request.
    pub from_storage: bool,
}

pub fn thank_you_page(vm: &ThankYouVm) -> Markup {
    let invalid = vm.report.filter(|r| !r.is_valid());

    site_layout(
        "Thank you",
        html! {
            @match (vm.submission, invalid) {
                (None, _) => {
                    h1 { "Nothing submitted yet" }
                    p { "We couldn't find a form submission. " a href="/" { "Return to listings" } }
                }
                (Some(_), Some(report)) => {
                    h1 { "Please check your details" }
                    (notice("error", "Some fields need attention before we can accept this submission."))
                    ul class="field-errors" {
                        @for error in &report.errors {
                            li class="field-error" { (crate::domain::submission::field_label(&error.field_id)) ": " (error.message) }
                        }
                    }
                }
                (Some(submission), None) => {
                    h1 { "Thank you, " (submission.display_name()) "!" }
                    @if vm.from_storage {
                        p class="muted" { "Showing your most recent submission." }
                    }
                    dl class="card submission" {
                        @for field in submission.display_fields() {
                            dt { (field.label) }
                            dd {
                                @if let Some(link) = &field.link {
                                    a href=(link) { (field.value) }
                                } @else {
                                    (field.value)
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
