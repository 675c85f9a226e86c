// templates/pages/listings.rs

use crate::domain::listing::format_dollars;
use crate::domain::query::ListingStats;
use crate::loader::DataSource;
use crate::storage::SearchEntry;
use crate::templates::components::{filter_form, listing_card, notice, weather_panel};
use crate::templates::site_layout;
use crate::ui::{BindingTable, ListingsView};
use crate::weather::{WeatherError, WeatherReport};
use maud::{html, Markup};

pub struct ListingsPageVm<'a> {
    pub view: &'a ListingsView,
    pub favorites: &'a [String],
    pub source: DataSource,
    pub greeting: &'a str,
    pub weather: Option<&'a Result<WeatherReport, WeatherError>>,
    pub recent_searches: &'a [SearchEntry],
    /// Current URL, for links that come back here.
    pub here: &'a str,
}

pub fn listings_page(vm: &ListingsPageVm) -> Markup {
    let view = vm.view;
    let bindings = BindingTable::listings_page();

    site_layout(
        "Listings",
        html! {
            h1 { "Find your next home" }
            p class="greeting" { (vm.greeting) }

            @if vm.source == DataSource::Fallback {
                (notice("warning", "Live listings are unavailable, so sample listings are shown."))
            }

            (weather_panel(vm.weather))

            @if let Some(stats) = &view.stats {
                (stats_panel(stats))
            }

            (filter_form(view, &bindings))

            @if !vm.recent_searches.is_empty() {
                section class="recent-searches" {
                    h2 { "Recent searches" }
                    ul {
                        @for entry in vm.recent_searches {
                            li { a href=(search_href(&entry.term)) { (entry.term) } }
                        }
                    }
                }
            }

            p class="result-count" id="results-count" {
                "Showing " (view.listings.len()) " of " (view.catalog_size) " properties"
            }

            @if view.is_empty() {
                p class="no-results" { "No properties match your criteria. Try adjusting your filters." }
            } @else {
                div class="listing-grid" id="listings" {
                    @for listing in &view.listings {
                        (listing_card(listing, vm.favorites.contains(&listing.id), vm.here))
                    }
                }
            }
        },
    )
}

fn search_href(term: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
    format!("/?q={encoded}")
}

fn stats_panel(stats: &ListingStats) -> Markup {
    html! {
        section class="card stats" aria-label="Market summary" {
            div { strong { (stats.total) } " listings" }
            div { strong { (stats.for_rent) } " for rent" }
            div { strong { (stats.for_sale) } " for sale" }
            @if stats.for_rent > 0 {
                div { "Average rent " strong { (format_dollars(stats.average_rent as f64)) } }
            }
            @if stats.for_sale > 0 {
                div { "Average price " strong { (format_dollars(stats.average_sale_price as f64)) } }
            }
        }
    }
}
