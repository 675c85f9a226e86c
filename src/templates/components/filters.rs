use crate::domain::SortOption;
use crate::ui::{Action, BindingTable, FilterField, ListingsView};
use maud::{html, Markup};

fn element_id<'a>(bindings: &'a BindingTable, action: &Action, default: &'a str) -> &'a str {
    bindings.element_id(action).unwrap_or(default)
}

fn number_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// The search/filter/sort form. A plain GET to `/`, so every state is a URL.
pub fn filter_form(view: &ListingsView, bindings: &BindingTable) -> Markup {
    let state = &view.state;
    let c = &state.criteria;
    let id_for = |field: FilterField| element_id(bindings, &Action::Filter(field), field.param());

    let type_id = id_for(FilterField::Type);
    let min_id = id_for(FilterField::MinPrice);
    let max_id = id_for(FilterField::MaxPrice);
    let bed_id = id_for(FilterField::Bedrooms);
    let hood_id = id_for(FilterField::Neighborhood);
    let sort_id = element_id(bindings, &Action::Sort, "sort");
    let clear_id = element_id(bindings, &Action::ClearFilters, "clear");

    let listing_type = c.listing_type.as_deref().unwrap_or("");
    let bedrooms = c.min_bedrooms.map(|b| b.to_string()).unwrap_or_default();

    html! {
        form id="search-form" class="card filters" method="get" action="/" role="search" {
            div class="field search" {
                label for="q" { "Search" }
                input type="search" id="q" name="q" value=(state.search) placeholder="Address, neighborhood, amenity…";
            }

            div class="field" {
                label for=(type_id) { "Type" }
                select id=(type_id) name=(FilterField::Type.param()) {
                    option value="" selected[listing_type.is_empty()] { "Any" }
                    option value="rent" selected[listing_type.eq_ignore_ascii_case("rent")] { "For Rent" }
                    option value="buy" selected[listing_type.eq_ignore_ascii_case("buy")] { "For Sale" }
                }
            }

            div class="field" {
                label for=(min_id) { "Min price" }
                input type="number" min="0" id=(min_id) name=(FilterField::MinPrice.param()) value=(number_value(c.min_price));
            }
            div class="field" {
                label for=(max_id) { "Max price" }
                input type="number" min="0" id=(max_id) name=(FilterField::MaxPrice.param()) value=(number_value(c.max_price));
            }

            div class="field" {
                label for=(bed_id) { "Bedrooms" }
                select id=(bed_id) name=(FilterField::Bedrooms.param()) {
                    option value="" selected[bedrooms.is_empty()] { "Any" }
                    @for n in ["1", "2", "3", "4"] {
                        option value=(n) selected[bedrooms == n] { (n) "+" }
                    }
                }
            }

            div class="field" {
                label for=(hood_id) { "Neighborhood" }
                select id=(hood_id) name=(FilterField::Neighborhood.param()) {
                    option value="" selected[c.neighborhood.is_none()] { "All" }
                    @for name in &view.neighborhoods {
                        option value=(name) selected[c.neighborhood.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(name))] { (name) }
                    }
                }
            }

            div class="field" {
                label for="tags" { "Amenities" }
                input type="text" id="tags" name=(FilterField::Tags.param()) value=(c.required_tags.join(", ")) placeholder="Parking, Laundry";
            }

            div class="field" {
                label for=(sort_id) { "Sort by" }
                select id=(sort_id) name="sort" {
                    @for sort in SortOption::ALL {
                        option value=(sort.as_str()) selected[sort == state.sort] { (sort.label()) }
                    }
                }
            }

            div class="actions" {
                button type="submit" class="primary" { "Search" }
                a id=(clear_id) href="/" { "Clear filters" }
            }
        }
    }
}
