// src/content/courses.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub credits: u32,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Subject {
    #[default]
    All,
    Wdd,
    Cse,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::All, Subject::Wdd, Subject::Cse];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Subject::All),
            "wdd" => Some(Subject::Wdd),
            "cse" => Some(Subject::Cse),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::All => "all",
            Subject::Wdd => "wdd",
            Subject::Cse => "cse",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Subject::All => "All",
            Subject::Wdd => "WDD",
            Subject::Cse => "CSE",
        }
    }

    pub fn matches(self, course: &Course) -> bool {
        match self {
            Subject::All => true,
            Subject::Wdd => course.code.starts_with("WDD"),
            Subject::Cse => course.code.starts_with("CSE"),
        }
    }
}

pub fn filter_courses(courses: &[Course], subject: Subject) -> Vec<&Course> {
    courses.iter().filter(|c| subject.matches(c)).collect()
}

pub fn total_credits(courses: &[&Course]) -> u32 {
    courses.iter().map(|c| c.credits).sum()
}
