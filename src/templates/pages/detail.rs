// templates/pages/detail.rs

use crate::domain::finance::{Affordability, MortgageBreakdown};
use crate::domain::listing::format_dollars;
use crate::domain::query::ScoredListing;
use crate::domain::Listing;
use crate::paths::listing_path;
use crate::templates::components::{dialog, favorite_button, listing_facts, listing_heading};
use crate::templates::site_layout;
use crate::ui::page::details_dialog;
use maud::{html, Markup};

pub struct DetailPageVm<'a> {
    pub listing: &'a Listing,
    pub is_favorite: bool,
    pub similar: &'a [ScoredListing],
    pub mortgage: Option<MortgageBreakdown>,
    pub affordability: Option<Affordability>,
}

pub fn detail_page(vm: &DetailPageVm) -> Markup {
    let listing = vm.listing;
    let heading = listing_heading(listing);
    let here = listing_path(&listing.id);
    let details = details_dialog();
    let contact_id = details.focusables.last().cloned().unwrap_or_default();
    let favorite_id = details.focusables.first().cloned();

    site_layout(
        &heading,
        html! {
            article class="card listing-detail" {
                @if let Some(image) = &listing.image {
                    img src=(image) alt=(heading);
                }
                h1 { (heading) }
                @if !listing.address.is_empty() && listing.address != heading {
                    p class="address" { (listing.address) }
                }
                p class="price" { (listing.display_price()) }
                p class="facts" { (listing_facts(listing)) }
                @if let Some(neighborhood) = &listing.neighborhood {
                    p { "Neighborhood: " (neighborhood) }
                }
                @if let Some(available) = &listing.available {
                    p { "Availability: " (available) }
                }
                @if !listing.description.is_empty() {
                    p class="description" { (listing.description) }
                }
                @if !listing.tags.is_empty() {
                    ul class="tags" {
                        @for tag in &listing.tags {
                            li { (tag) }
                        }
                    }
                }
                (favorite_button(&listing.id, vm.is_favorite, &here, None))
                a class="view-details" href=(format!("#{}", details.id)) { "Contact" }
            }

            @if let Some(m) = &vm.mortgage {
                section class="card mortgage" {
                    h2 { "Estimated monthly cost" }
                    p { "With 20% down at 6.5% over 30 years:" }
                    ul {
                        li { "Principal & interest: " strong { (format_dollars(m.monthly_payment)) } }
                        li { "Property tax: " (format_dollars(m.monthly_property_tax)) }
                        li { "Insurance: " (format_dollars(m.monthly_insurance)) }
                        li { "Total: " strong { (format_dollars(m.total_monthly_payment)) } }
                    }
                }
            }

            @if let Some(a) = &vm.affordability {
                section class="card affordability" {
                    h2 { "Affordability" }
                    p {
                        (format_dollars(a.monthly_payment)) " a month is "
                        (format!("{:.1}", a.percentage_of_income)) "% of your income. "
                        @if a.is_affordable {
                            "That is within your budget of " (format_dollars(a.max_affordable)) "."
                        } @else {
                            "That is over your budget of " (format_dollars(a.max_affordable)) "."
                        }
                    }
                }
            }

            @if !vm.similar.is_empty() {
                section class="similar" {
                    h2 { "Similar properties" }
                    ul {
                        @for scored in vm.similar {
                            li {
                                a href=(listing_path(&scored.listing.id)) { (listing_heading(&scored.listing)) }
                                " · " (scored.listing.display_price())
                                " · " (scored.score) "% match"
                            }
                        }
                    }
                }
            }

            (dialog(&details, html! {
                @if let Some(contact) = &listing.contact {
                    @if let Some(phone) = &contact.phone {
                        p { "Phone: " a id=(contact_id) href=(format!("tel:{phone}")) { (phone) } }
                    }
                    @if let Some(email) = &contact.email {
                        p { "Email: " a href=(format!("mailto:{email}")) { (email) } }
                    }
                } @else {
                    p id=(contact_id) { "Contact information is not available for this listing." }
                }
                (favorite_button(&listing.id, vm.is_favorite, &here, favorite_id.as_deref()))
            }))
        },
    )
}
