// templates/pages/resources.rs

use crate::content::services::category_label;
use crate::content::{Faq, FaqAccordion, Service, ServiceGroup};
use crate::paths::service_path;
use crate::templates::site_layout;
use maud::{html, Markup};

pub struct ResourcesVm<'a> {
    pub groups: &'a [ServiceGroup<'a>],
    pub popular: &'a [&'a Service],
    pub faqs: &'a [Faq],
    pub accordion: FaqAccordion,
}

pub fn resources_page(vm: &ResourcesVm) -> Markup {
    site_layout(
        "Resources",
        html! {
            h1 { "Local services and resources" }

            @if !vm.popular.is_empty() {
                section class="card popular-services" {
                    h2 { "Popular with visitors" }
                    ol {
                        @for service in vm.popular {
                            li { a href=(service_path(&service.id)) { (service.name) } }
                        }
                    }
                }
            }

            nav class="category-index" aria-label="Service categories" {
                ul {
                    @for group in vm.groups {
                        li { a href=(format!("#{}", group.category)) { (group.label()) } }
                    }
                }
            }

            @for group in vm.groups {
                section class="service-category" id=(group.category) {
                    h2 { (group.label()) }
                    div class="service-grid" {
                        @for service in &group.services {
                            (service_card(service))
                        }
                    }
                }
            }

            section class="faq" id="faq" {
                h2 { "Frequently asked questions" }
                @for faq in vm.faqs {
                    (faq_item(faq, &vm.accordion))
                }
            }
        },
    )
}

fn service_card(service: &Service) -> Markup {
    html! {
        article class="card service-card" {
            h3 { a href=(service_path(&service.id)) { (service.name) } }
            @if let Some(rating) = service.rating {
                p class="rating" {
                    (format!("{rating:.1}")) " ★"
                    @if let Some(reviews) = service.review_count {
                        " (" (reviews) " reviews)"
                    }
                }
            }
            p { (service.description) }
            @if let Some(phone) = &service.phone {
                p { a href=(format!("tel:{phone}")) { (phone) } }
            }
        }
    }
}

fn faq_item(faq: &Faq, accordion: &FaqAccordion) -> Markup {
    let open = accordion.is_open(faq.id);
    let answer_id = format!("faq-answer-{}", faq.id);

    html! {
        div class=(if open { "faq-item open" } else { "faq-item" }) id=(format!("faq-{}", faq.id)) {
            a class="faq-question" href=(accordion.toggle_href("/resources", faq.id))
                aria-expanded=(if open { "true" } else { "false" }) aria-controls=(answer_id) {
                (faq.question)
            }
            div class="faq-answer" id=(answer_id) hidden[!open] {
                p { (faq.answer) }
            }
        }
    }
}

pub fn service_page(service: &Service) -> Markup {
    site_layout(
        &service.name,
        html! {
            article class="card service-detail" {
                p class="muted" { a href=(format!("/resources#{}", service.category)) { (category_label(&service.category)) } }
                h1 { (service.name) }
                p { (service.description) }
                dl {
                    @if let Some(address) = &service.address {
                        dt { "Address" } dd { (address) }
                    }
                    @if let Some(phone) = &service.phone {
                        dt { "Phone" } dd { a href=(format!("tel:{phone}")) { (phone) } }
                    }
                    @if let Some(email) = &service.email {
                        dt { "Email" } dd { a href=(format!("mailto:{email}")) { (email) } }
                    }
                    @if let Some(website) = &service.website {
                        dt { "Website" } dd { a href=(website) rel="noopener" { (website) } }
                    }
                    @if let Some(hours) = &service.hours {
                        dt { "Hours" } dd { (hours) }
                    }
                }
                @if !service.specialties.is_empty() {
                    h2 { "Specialties" }
                    ul class="tags" {
                        @for specialty in &service.specialties {
                            li { (specialty) }
                        }
                    }
                }
                a href="/resources" { "Back to all resources" }
            }
        },
    )
}
