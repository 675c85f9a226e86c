// src/ui/menu.rs
use crate::ui::modal::Key;

/// Hamburger navigation menu for narrow screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn handle_key(&mut self, key: Key) -> bool {
        if key == Key::Escape && self.open {
            self.open = false;
            return true;
        }
        false
    }

    pub fn nav_class(&self) -> &'static str {
        if self.open {
            "nav open"
        } else {
            "nav"
        }
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    /// Hamburger glyph while closed, a cross while open.
    pub fn button_glyph(&self) -> &'static str {
        if self.open {
            "\u{00D7}"
        } else {
            "\u{2630}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_escape() {
        let mut menu = NavMenu::default();
        assert_eq!(menu.aria_expanded(), "false");

        assert!(menu.toggle());
        assert_eq!(menu.nav_class(), "nav open");
        assert_eq!(menu.button_glyph(), "×");

        assert!(menu.handle_key(Key::Escape));
        assert!(!menu.is_open());
        assert!(!menu.handle_key(Key::Escape));
    }
}
