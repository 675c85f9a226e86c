// src/ui/page.rs
//
// The listings page as a value: the loaded catalog never changes, every
// user action produces a new `PageState`, and the rendered view is derived
// from the two.

use crate::domain::listing::parse_leading_number;
use crate::domain::query::{self, Criteria, ListingStats, SortOption};
use crate::domain::Listing;
use crate::ui::bindings::{Action, BindingTable, EventKind, FilterField};
use crate::ui::menu::NavMenu;
use crate::ui::modal::{Dialog, Key, ModalController};

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub criteria: Criteria,
    pub search: String,
    pub sort: SortOption,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            criteria: Criteria::default(),
            search: String::new(),
            sort: SortOption::PriceLow,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Filter { field: FilterField, value: String },
    ToggleTag(String),
    Search(String),
    Sort(String),
    ClearFilters,
}

impl PageState {
    /// State described by URL query parameters. Unknown parameters and
    /// unparsable values are ignored.
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        params
            .into_iter()
            .filter_map(|(name, value)| match name {
                "q" => Some(UiEvent::Search(value.to_string())),
                "sort" => Some(UiEvent::Sort(value.to_string())),
                _ => FilterField::from_param(name).map(|field| UiEvent::Filter {
                    field,
                    value: value.to_string(),
                }),
            })
            .fold(PageState::default(), PageState::apply)
    }

    pub fn apply(mut self, event: UiEvent) -> Self {
        match event {
            UiEvent::Filter { field, value } => self.set_filter(field, value.trim()),
            UiEvent::ToggleTag(tag) => {
                let tag = tag.trim();
                if tag.is_empty() {
                    return self;
                }
                let before = self.criteria.required_tags.len();
                self.criteria
                    .required_tags
                    .retain(|t| !t.eq_ignore_ascii_case(tag));
                if self.criteria.required_tags.len() == before {
                    self.criteria.required_tags.push(tag.to_string());
                }
            }
            UiEvent::Search(term) => self.search = term.trim().to_string(),
            UiEvent::Sort(name) => match SortOption::parse(&name) {
                Some(sort) => self.sort = sort,
                None => tracing::debug!(sort = %name, "ignoring unknown sort option"),
            },
            UiEvent::ClearFilters => {
                self.criteria = Criteria::default();
                self.search.clear();
            }
        }
        self
    }

    fn set_filter(&mut self, field: FilterField, value: &str) {
        let text = || Some(value.to_string()).filter(|v| !v.is_empty());
        let number = || {
            let parsed = parse_leading_number(value);
            if parsed.is_none() && !value.is_empty() {
                tracing::debug!(param = field.param(), value, "ignoring non-numeric filter value");
            }
            parsed
        };

        let c = &mut self.criteria;
        match field {
            FilterField::Type => c.listing_type = text(),
            FilterField::MinPrice => c.min_price = number(),
            FilterField::MaxPrice => c.max_price = number(),
            FilterField::Bedrooms => c.min_bedrooms = number(),
            FilterField::Neighborhood => c.neighborhood = text(),
            FilterField::Tags => {
                c.required_tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            }
        }
    }

    /// Query pairs that reproduce this state, for links and redirects.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let c = &self.criteria;
        let mut params = Vec::new();
        if let Some(t) = &c.listing_type {
            params.push((FilterField::Type.param(), t.clone()));
        }
        for (field, value) in [
            (FilterField::MinPrice, c.min_price),
            (FilterField::MaxPrice, c.max_price),
            (FilterField::Bedrooms, c.min_bedrooms),
        ] {
            if let Some(v) = value {
                params.push((field.param(), v.to_string()));
            }
        }
        if let Some(n) = &c.neighborhood {
            params.push((FilterField::Neighborhood.param(), n.clone()));
        }
        if !c.required_tags.is_empty() {
            params.push((FilterField::Tags.param(), c.required_tags.join(",")));
        }
        if !self.search.is_empty() {
            params.push(("q", self.search.clone()));
        }
        params.push(("sort", self.sort.as_str().to_string()));
        params
    }
}

/// Everything the listings page shows, derived from the catalog and state.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingsView {
    pub listings: Vec<Listing>,
    pub catalog_size: usize,
    pub stats: Option<ListingStats>,
    pub neighborhoods: Vec<String>,
    pub state: PageState,
}

impl ListingsView {
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// Filter, then search, then sort.
pub fn derive_view(catalog: &[Listing], state: &PageState) -> ListingsView {
    let filtered = query::filter(catalog, &state.criteria);
    let searched = query::search(&filtered, &state.search);
    let (key, direction) = state.sort.key_and_direction();
    let listings = query::sort(&searched, key, direction);

    ListingsView {
        listings,
        catalog_size: catalog.len(),
        stats: query::stats(catalog),
        neighborhoods: query::group_by_neighborhood(catalog).into_keys().collect(),
        state: state.clone(),
    }
}

/// What a dispatched interaction changed.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    View(ListingsView),
    MenuToggled(bool),
    ModalChanged,
    /// The caller owns favorites storage; this names the listing to toggle.
    ToggleFavorite(String),
    Unbound,
}

/// One per page load: the catalog, the state, and the widgets on the page.
pub struct PageController {
    catalog: Vec<Listing>,
    state: PageState,
    bindings: BindingTable,
    menu: NavMenu,
    modal: ModalController,
}

pub const DETAILS_DIALOG: &str = "listing-details";

impl PageController {
    pub fn new(catalog: Vec<Listing>, state: PageState) -> Self {
        let mut modal = ModalController::new();
        modal.register(details_dialog());

        Self {
            catalog,
            state,
            bindings: BindingTable::listings_page(),
            menu: NavMenu::default(),
            modal,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn menu(&self) -> &NavMenu {
        &self.menu
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut ModalController {
        &mut self.modal
    }

    pub fn view(&self) -> ListingsView {
        derive_view(&self.catalog, &self.state)
    }

    pub fn apply(&mut self, event: UiEvent) -> ListingsView {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
        self.view()
    }

    /// Runs the bound action for an interaction. `value` is the element's
    /// current value (input text, select option, listing id on cards).
    pub fn dispatch(&mut self, selector: &str, event: EventKind, value: &str) -> Outcome {
        let Some(action) = self.bindings.dispatch(selector, event).cloned() else {
            tracing::debug!(selector, ?event, "no binding");
            return Outcome::Unbound;
        };

        match action {
            Action::ToggleMenu => Outcome::MenuToggled(self.menu.toggle()),
            Action::OpenModal(dialog) => match self.modal.show(&dialog) {
                Ok(()) => Outcome::ModalChanged,
                Err(e) => {
                    tracing::warn!(error = %e, "binding names an unregistered dialog");
                    Outcome::Unbound
                }
            },
            Action::CloseModal => {
                self.modal.close();
                Outcome::ModalChanged
            }
            Action::Filter(field) => Outcome::View(self.apply(UiEvent::Filter {
                field,
                value: value.to_string(),
            })),
            Action::ToggleTag => Outcome::View(self.apply(UiEvent::ToggleTag(value.to_string()))),
            Action::Search => Outcome::View(self.apply(UiEvent::Search(value.to_string()))),
            Action::Sort => Outcome::View(self.apply(UiEvent::Sort(value.to_string()))),
            Action::ClearFilters => Outcome::View(self.apply(UiEvent::ClearFilters)),
            Action::ToggleFavorite => Outcome::ToggleFavorite(value.to_string()),
        }
    }

    /// Escape goes to the open dialog first, then the menu.
    pub fn handle_key(&mut self, key: Key) -> bool {
        self.modal.handle_key(key) || self.menu.handle_key(key)
    }
}

/// The details dialog shared by listing cards.
pub fn details_dialog() -> Dialog {
    Dialog::new(DETAILS_DIALOG, "Listing details")
        .with_close_button("details-close")
        .with_focusable("details-favorite")
        .with_focusable("details-contact")
}
