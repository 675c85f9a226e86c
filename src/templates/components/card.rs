use crate::domain::Listing;
use crate::paths::{favorite_path, listing_path};
use maud::{html, Markup};

/// Title, then address, then a generic name.
pub fn listing_heading(listing: &Listing) -> String {
    if !listing.title.trim().is_empty() {
        listing.title.clone()
    } else if !listing.address.trim().is_empty() {
        listing.address.clone()
    } else {
        format!("Listing {}", listing.id)
    }
}

fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// "2 bd · 1 ba · 800 sqft · 0.3 mi", skipping anything unknown.
pub fn listing_facts(listing: &Listing) -> String {
    let mut parts = Vec::new();
    if let Some(b) = listing.bedrooms {
        parts.push(format!("{} bd", number(b)));
    }
    if let Some(b) = listing.bathrooms {
        parts.push(format!("{} ba", number(b)));
    }
    if let Some(a) = listing.area {
        parts.push(format!("{} sqft", number(a)));
    }
    if let Some(d) = listing.distance {
        parts.push(format!("{} mi", number(d)));
    }
    parts.join(" · ")
}

pub fn favorite_button(listing_id: &str, is_favorite: bool, next: &str, element_id: Option<&str>) -> Markup {
    let next: String = url::form_urlencoded::byte_serialize(next.as_bytes()).collect();
    let action = format!("{}?next={next}", favorite_path(listing_id));

    html! {
        form method="post" action=(action) class="favorite-form" {
            button type="submit" class="favorite-btn" id=[element_id] aria-pressed=(if is_favorite { "true" } else { "false" }) {
                @if is_favorite { "♥ Saved" } @else { "♡ Save" }
            }
        }
    }
}

pub fn listing_card(listing: &Listing, is_favorite: bool, next: &str) -> Markup {
    let heading = listing_heading(listing);
    let href = listing_path(&listing.id);

    html! {
        article class="card listing-card" id=(format!("card-{}", listing.id)) {
            @if let Some(image) = &listing.image {
                img src=(image) alt=(heading) loading="lazy";
            }
            h3 { a href=(href) { (heading) } }
            p class="price" { (listing.display_price()) }
            p class="facts" { (listing_facts(listing)) }
            @if let Some(neighborhood) = &listing.neighborhood {
                p class="neighborhood" { (neighborhood) }
            }
            @if !listing.tags.is_empty() {
                ul class="tags" {
                    @for tag in &listing.tags {
                        li { (tag) }
                    }
                }
            }
            div class="card-actions" {
                a class="view-details" href=(href) { "View details" }
                (favorite_button(&listing.id, is_favorite, next, None))
            }
        }
    }
}
