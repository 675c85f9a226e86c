use crate::ui::{Action, BindingTable, NavMenu};
use maud::{html, Markup, DOCTYPE};

pub const SITE_NAME: &str = "Rexburg Home Finder";

pub fn site_layout(title: &str, content: Markup) -> Markup {
    // Rendered closed; the toggle id comes from the binding table.
    let menu = NavMenu::default();
    let bindings = BindingTable::listings_page();
    let toggle_id = bindings.element_id(&Action::ToggleMenu).unwrap_or("hamburger");

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | " (SITE_NAME) }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="site-header" {
                    a href="/" class="brand" { (SITE_NAME) }
                    button
                        type="button"
                        id=(toggle_id)
                        class="hamburger"
                        aria-controls="primary-nav"
                        aria-expanded=(menu.aria_expanded())
                        aria-label="Toggle navigation"
                    {
                        (menu.button_glyph())
                    }
                    nav id="primary-nav" class=(menu.nav_class()) {
                        ul {
                            li { a href="/" { "Listings" } }
                            li { a href="/neighborhoods" { "Neighborhoods" } }
                            li { a href="/favorites" { "Favorites" } }
                            li { a href="/calculator" { "Calculators" } }
                            li { a href="/resources" { "Resources" } }
                            li { a href="/list-property" { "List a property" } }
                            li { a href="/directory" { "Chamber" } }
                            li { a href="/join" { "Join" } }
                            li { a href="/courses" { "Courses" } }
                        }
                    }
                }
                main class="container" {
                    (content)
                }
                footer class="site-footer" {
                    p { "Student and family housing near campus." }
                }
            }
        }
    }
}
