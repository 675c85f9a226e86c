use crate::ui::Dialog;
use maud::{html, Markup};

/// Dialog markup, hidden until opened. Element ids come from the view-model
/// so the focus order in markup matches the controller's.
pub fn dialog(d: &Dialog, body: Markup) -> Markup {
    render(d, None, body)
}

/// A dialog rendered already open. Its close control is a link to
/// `close_href`, which should land back on the element that opened it.
pub fn open_dialog(d: &Dialog, close_href: &str, body: Markup) -> Markup {
    render(d, Some(close_href), body)
}

fn render(d: &Dialog, close_href: Option<&str>, body: Markup) -> Markup {
    let title_id = format!("{}-title", d.id);

    html! {
        div class="modal-backdrop" data-dialog=(d.id) hidden[close_href.is_none()] {
            div class="modal" id=(d.id) role="dialog" aria-modal="true" aria-labelledby=(title_id) {
                @match (&d.close_button, close_href) {
                    (Some(close), Some(href)) => {
                        a class="modal-close" id=(close) href=(href) aria-label="Close" { "×" }
                    }
                    (Some(close), None) => {
                        button type="button" class="modal-close" id=(close) aria-label="Close" { "×" }
                    }
                    (None, _) => {}
                }
                h2 id=(title_id) { (d.title) }
                (body)
            }
        }
    }
}
