pub mod bindings;
pub mod menu;
pub mod modal;
pub mod page;

pub use bindings::{Action, Binding, BindingTable, EventKind, FilterField};
pub use menu::NavMenu;
pub use modal::{Dialog, Key, ModalController, ModalError, ModalState};
pub use page::{derive_view, ListingsView, Outcome, PageController, PageState, UiEvent};
