// templates/pages/neighborhoods.rs

use crate::content::neighborhoods::{category_label, details_dialog, return_focus, FILTERS};
use crate::content::Neighborhood;
use crate::domain::listing::format_dollars;
use crate::paths::neighborhood_path;
use crate::templates::components::open_dialog;
use crate::templates::site_layout;
use crate::ui::ModalController;
use maud::{html, Markup};

pub struct NeighborhoodsVm<'a> {
    pub filter: &'a str,
    /// Shown neighborhoods with their listing counts.
    pub cards: &'a [(&'a Neighborhood, usize)],
    /// The neighborhood whose details are open, with its controller.
    pub open: Option<(&'a Neighborhood, &'a ModalController)>,
}

pub fn neighborhoods_page(vm: &NeighborhoodsVm) -> Markup {
    site_layout(
        "Neighborhoods",
        html! {
            h1 { "Explore Rexburg neighborhoods" }

            div class="filter-buttons" role="group" aria-label="Filter neighborhoods" {
                @for filter in FILTERS {
                    a class=(if filter == vm.filter { "filter-btn active" } else { "filter-btn" })
                        href=(format!("/neighborhoods?filter={filter}"))
                        aria-pressed=(if filter == vm.filter { "true" } else { "false" }) {
                        (category_label(filter))
                    }
                }
            }

            @if vm.cards.is_empty() {
                p class="no-results" { "No neighborhoods match this filter." }
            } @else {
                div class="neighborhood-grid" {
                    @for (neighborhood, count) in vm.cards {
                        (card(neighborhood, *count))
                    }
                }
            }

            @if let Some((neighborhood, modal)) = vm.open {
                (details(neighborhood, modal))
            }
        },
    )
}

fn listings_href(neighborhood: &Neighborhood) -> String {
    let name: String = url::form_urlencoded::byte_serialize(neighborhood.name.as_bytes()).collect();
    format!("/?neighborhood={name}")
}

fn card(neighborhood: &Neighborhood, count: usize) -> Markup {
    html! {
        article class="card neighborhood-card" id=(neighborhood.card_id()) {
            h2 { (neighborhood.name) }
            p class="muted" { (neighborhood.distance_to_campus) " to campus" }
            p { (neighborhood.description) }
            ul class="facts" {
                li { "Average rent " strong { (format_dollars(f64::from(neighborhood.average_rent))) } }
                li { "Safety " (neighborhood.safety_score) "/10" }
                li { "Walk score " (neighborhood.walk_score) }
            }
            ul class="tags" {
                @for category in &neighborhood.categories {
                    li { (category_label(category)) }
                }
            }
            div class="card-actions" {
                a class="view-details" href=(neighborhood_path(&neighborhood.id)) { "Learn more" }
                a href=(listings_href(neighborhood)) {
                    (count) @if count == 1 { " listing" } @else { " listings" }
                }
            }
        }
    }
}

fn list(title: &str, items: &[String]) -> Markup {
    html! {
        @if !items.is_empty() {
            h3 { (title) }
            ul {
                @for item in items {
                    li { (item) }
                }
            }
        }
    }
}

fn details(neighborhood: &Neighborhood, modal: &ModalController) -> Markup {
    let dialog = details_dialog(neighborhood);
    let close_href = match return_focus(modal) {
        Some(card) => format!("/neighborhoods#{card}"),
        None => "/neighborhoods".to_string(),
    };
    let listings_id = dialog.focusables.first().cloned().unwrap_or_default();
    let nearby = &neighborhood.amenities;
    let transport = &neighborhood.transportation;

    open_dialog(
        &dialog,
        &close_href,
        html! {
            p { (neighborhood.full_description) }
            ul class="facts" {
                li { "Distance to campus: " (neighborhood.distance_to_campus) }
                li { "Average rent: " (format_dollars(f64::from(neighborhood.average_rent))) }
                li { "Parking: " (neighborhood.parking) }
                li { "Public transit: " (neighborhood.public_transit) }
            }
            (list("Shopping", &nearby.shopping))
            (list("Dining", &nearby.dining))
            (list("Recreation", &nearby.recreation))
            (list("Services", &nearby.services))
            h3 { "Getting around" }
            ul {
                @if !transport.bus_routes.is_empty() {
                    li { "Bus routes: " (transport.bus_routes.join(", ")) }
                }
                li { "Biking: " (transport.bike_paths) }
                li { "Walking to campus: " (transport.walking_to_campus) }
            }
            (list("Pros", &neighborhood.pros))
            (list("Cons", &neighborhood.cons))
            (list("Best for", &neighborhood.best_for))
            a id=(listings_id) class="view-details" href=(listings_href(neighborhood)) {
                "See listings in " (neighborhood.name)
            }
        },
    )
}
