use maud::{html, Markup};

pub mod card;
pub mod error;
pub mod filters;
pub mod modal;
pub mod weather;

pub use card::{favorite_button, listing_card, listing_facts, listing_heading};
pub use error::error_page;
pub use filters::filter_form;
pub use modal::{dialog, open_dialog};
pub use weather::weather_panel;

pub fn notice(kind: &str, message: &str) -> Markup {
    html! {
        p class=(format!("notice notice-{kind}")) role="status" { (message) }
    }
}
