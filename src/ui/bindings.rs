// src/ui/bindings.rs
//
// Event wiring as data: each row says which element, which event, which
// action. The page controller looks rows up instead of registering closures.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Input,
    Submit,
    KeyDown,
}

/// Criteria inputs on the listings page, named by their query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Type,
    MinPrice,
    MaxPrice,
    Bedrooms,
    Neighborhood,
    Tags,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Type,
        FilterField::MinPrice,
        FilterField::MaxPrice,
        FilterField::Bedrooms,
        FilterField::Neighborhood,
        FilterField::Tags,
    ];

    pub fn param(&self) -> &'static str {
        match self {
            FilterField::Type => "type",
            FilterField::MinPrice => "minPrice",
            FilterField::MaxPrice => "maxPrice",
            FilterField::Bedrooms => "bedrooms",
            FilterField::Neighborhood => "neighborhood",
            FilterField::Tags => "tags",
        }
    }

    pub fn from_param(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.param() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ToggleMenu,
    OpenModal(String),
    CloseModal,
    Filter(FilterField),
    ToggleTag,
    Search,
    Sort,
    ClearFilters,
    ToggleFavorite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub selector: String,
    pub event: EventKind,
    pub action: Action,
}

impl Binding {
    pub fn new(selector: impl Into<String>, event: EventKind, action: Action) -> Self {
        Self {
            selector: selector.into(),
            event,
            action,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl BindingTable {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    /// Wiring for the listings page.
    pub fn listings_page() -> Self {
        use Action::*;
        use EventKind::*;

        Self::new(vec![
            Binding::new("#hamburger", Click, ToggleMenu),
            Binding::new("#property-type", Change, Filter(FilterField::Type)),
            Binding::new("#min-price", Change, Filter(FilterField::MinPrice)),
            Binding::new("#max-price", Change, Filter(FilterField::MaxPrice)),
            Binding::new("#bedrooms", Change, Filter(FilterField::Bedrooms)),
            Binding::new("#neighborhood", Change, Filter(FilterField::Neighborhood)),
            Binding::new(".amenity-checkbox", Change, ToggleTag),
            Binding::new("#search-form", Submit, Search),
            Binding::new("#sort-select", Change, Sort),
            Binding::new("#clear-filters", Click, ClearFilters),
            Binding::new(".view-details", Click, OpenModal("listing-details".to_string())),
            Binding::new("#details-close", Click, CloseModal),
            Binding::new(".favorite-btn", Click, ToggleFavorite),
        ])
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// First row matching both selector and event.
    pub fn dispatch(&self, selector: &str, event: EventKind) -> Option<&Action> {
        self.bindings
            .iter()
            .find(|b| b.selector == selector && b.event == event)
            .map(|b| &b.action)
    }

    /// Element id for an `#id` selector row bound to `action`, used when
    /// rendering the page so markup and wiring stay in step.
    pub fn element_id(&self, action: &Action) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| &b.action == action)
            .and_then(|b| b.selector.strip_prefix('#'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_matches_selector_and_event() {
        let table = BindingTable::listings_page();
        assert_eq!(
            table.dispatch("#sort-select", EventKind::Change),
            Some(&Action::Sort)
        );
        assert_eq!(table.dispatch("#sort-select", EventKind::Click), None);
        assert_eq!(table.dispatch("#nope", EventKind::Click), None);
    }

    #[test]
    fn test_element_ids_and_params() {
        let table = BindingTable::listings_page();
        assert_eq!(
            table.element_id(&Action::Filter(FilterField::MinPrice)),
            Some("min-price")
        );
        assert_eq!(table.element_id(&Action::ToggleTag), None);
        assert_eq!(FilterField::from_param("maxPrice"), Some(FilterField::MaxPrice));
        assert_eq!(FilterField::from_param("price"), None);
    }
}
