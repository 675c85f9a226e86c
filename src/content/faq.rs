// src/content/faq.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: u32,
    pub question: String,
    pub answer: String,
}

/// Accordion state: at most one answer is expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaqAccordion {
    open: Option<u32>,
}

impl FaqAccordion {
    /// Opens `requested` if it names a known question.
    pub fn new(faqs: &[Faq], requested: Option<u32>) -> Self {
        let open = requested.filter(|id| faqs.iter().any(|f| f.id == *id));
        Self { open }
    }

    pub fn is_open(&self, id: u32) -> bool {
        self.open == Some(id)
    }

    pub fn open_id(&self) -> Option<u32> {
        self.open
    }

    /// Link target for a question: opens it, or closes it when already open.
    pub fn toggle_href(&self, base: &str, id: u32) -> String {
        if self.is_open(id) {
            format!("{base}#faq-{id}")
        } else {
            format!("{base}?faq={id}#faq-{id}")
        }
    }
}
