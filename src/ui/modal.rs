// src/ui/modal.rs
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModalError {
    #[error("Unknown dialog: {0}")]
    UnknownDialog(String),
}

/// Keys the controller reacts to. Anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    ShiftTab,
    Escape,
    Enter,
    Other,
}

/// A dialog and the elements inside it that can take focus, in tab order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub id: String,
    pub title: String,
    pub focusables: Vec<String>,
    pub close_button: Option<String>,
}

impl Dialog {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            focusables: Vec::new(),
            close_button: None,
        }
    }

    pub fn with_close_button(mut self, element: impl Into<String>) -> Self {
        self.close_button = Some(element.into());
        self
    }

    pub fn with_focusable(mut self, element: impl Into<String>) -> Self {
        self.focusables.push(element.into());
        self
    }

    /// Tab order inside the dialog. The close button leads unless it was
    /// already listed.
    pub fn tab_order(&self) -> Vec<&str> {
        let mut order = Vec::with_capacity(self.focusables.len() + 1);
        if let Some(close) = self.close_button.as_deref() {
            if !self.focusables.iter().any(|f| f == close) {
                order.push(close);
            }
        }
        order.extend(self.focusables.iter().map(String::as_str));
        order
    }

    fn contains(&self, element: &str) -> bool {
        self.tab_order().contains(&element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open {
        dialog: String,
        return_focus: Option<String>,
    },
}

/// Visibility, focus trap and focus restoration for a set of dialogs.
/// At most one dialog is open at a time.
#[derive(Debug)]
pub struct ModalController {
    dialogs: HashMap<String, Dialog>,
    focus: Option<String>,
    state: ModalState,
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            dialogs: HashMap::new(),
            focus: None,
            state: ModalState::Closed,
        }
    }

    pub fn register(&mut self, dialog: Dialog) {
        self.dialogs.insert(dialog.id.clone(), dialog);
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn open_dialog(&self) -> Option<&Dialog> {
        match &self.state {
            ModalState::Open { dialog, .. } => self.dialogs.get(dialog),
            ModalState::Closed => None,
        }
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// Page focus moved by something other than the controller (a click,
    /// a script). Ignored while a dialog is open and the element is outside it.
    pub fn set_focus(&mut self, element: impl Into<String>) {
        let element = element.into();
        if let Some(dialog) = self.open_dialog() {
            if !dialog.contains(&element) {
                return;
            }
        }
        self.focus = Some(element);
    }

    pub fn show(&mut self, id: &str) -> Result<(), ModalError> {
        let dialog = self
            .dialogs
            .get(id)
            .ok_or_else(|| ModalError::UnknownDialog(id.to_string()))?;

        let initial = dialog
            .close_button
            .clone()
            .or_else(|| dialog.focusables.first().cloned());

        let return_focus = match std::mem::replace(&mut self.state, ModalState::Closed) {
            // Replacing an open dialog keeps the first return target.
            ModalState::Open { return_focus, .. } => return_focus,
            ModalState::Closed => self.focus.clone(),
        };

        tracing::debug!(dialog = id, "modal opened");
        self.state = ModalState::Open {
            dialog: id.to_string(),
            return_focus,
        };
        self.focus = initial;
        Ok(())
    }

    /// Returns false if nothing was open.
    pub fn close(&mut self) -> bool {
        match std::mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Open {
                dialog,
                return_focus,
            } => {
                tracing::debug!(%dialog, "modal closed");
                self.focus = return_focus;
                true
            }
            ModalState::Closed => false,
        }
    }

    /// Returns true when the key was consumed by the open dialog.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let Some(dialog) = self.open_dialog() else {
            return false;
        };

        match key {
            Key::Escape => self.close(),
            Key::Tab | Key::ShiftTab => {
                let order = dialog.tab_order();
                if order.is_empty() {
                    return true;
                }
                let last = order.len() - 1;
                let current = self
                    .focus
                    .as_deref()
                    .and_then(|f| order.iter().position(|o| *o == f));

                let next = match (key, current) {
                    (Key::Tab, Some(i)) if i < last => i + 1,
                    (Key::Tab, _) => 0,
                    (_, Some(i)) if i > 0 => i - 1,
                    (_, _) => last,
                };
                self.focus = Some(order[next].to_string());
                true
            }
            Key::Enter => {
                let on_close = dialog.close_button.is_some()
                    && dialog.close_button.as_deref() == self.focus.as_deref();
                if on_close {
                    self.close()
                } else {
                    false
                }
            }
            Key::Other => false,
        }
    }

    /// A click on the overlay outside the dialog content.
    pub fn click_backdrop(&mut self) -> bool {
        self.close()
    }

    /// A click inside the dialog content. Only the close button closes;
    /// any other focusable element takes focus.
    pub fn click_content(&mut self, element: Option<&str>) -> bool {
        let Some(dialog) = self.open_dialog() else {
            return false;
        };
        let Some(element) = element else {
            return false;
        };

        if dialog.close_button.as_deref() == Some(element) {
            return self.close();
        }
        if dialog.contains(element) {
            self.focus = Some(element.to_string());
        }
        false
    }
}
