use crate::domain::Listing;
use crate::templates::components::listing_card;
use crate::templates::site_layout;
use maud::{html, Markup};

pub fn favorites_page(listings: &[Listing]) -> Markup {
    site_layout(
        "Favorites",
        html! {
            h1 { "Saved properties" }
            @if listings.is_empty() {
                p class="no-results" { "You haven't saved any properties yet." }
                a href="/" { "Browse listings" }
            } @else {
                div class="listing-grid" {
                    @for listing in listings {
                        (listing_card(listing, true, "/favorites"))
                    }
                }
            }
        },
    )
}
