// templates/pages/courses.rs

use crate::content::{Course, Subject};
use crate::templates::site_layout;
use maud::{html, Markup};

pub struct CoursesVm<'a> {
    pub subject: Subject,
    pub courses: &'a [&'a Course],
    pub total_credits: u32,
}

pub fn courses_page(vm: &CoursesVm) -> Markup {
    site_layout(
        "Courses",
        html! {
            h1 { "Web and computer programming certificate" }

            div class="filter-buttons" role="group" aria-label="Filter courses" {
                @for subject in Subject::ALL {
                    a class=(if subject == vm.subject { "filter-btn active" } else { "filter-btn" })
                        href=(format!("/courses?subject={}", subject.as_str()))
                        aria-pressed=(if subject == vm.subject { "true" } else { "false" }) {
                        (subject.label())
                    }
                }
            }

            @if vm.courses.is_empty() {
                p class="no-results" { "No courses match the selected filter." }
            } @else {
                ul class="course-list" {
                    @for course in vm.courses {
                        li class=(if course.completed { "course completed" } else { "course" }) title=(course.name) {
                            (course.code)
                            @if course.completed { " ✓" }
                        }
                    }
                }
            }

            p class="credits" id="total-credits" { "Total Credits: " (vm.total_credits) }
        },
    )
}
