// templates/pages/directory.rs

use crate::content::members::membership_class;
use crate::content::DirectoryView;
use crate::domain::Listing;
use crate::templates::components::listing_heading;
use crate::templates::site_layout;
use maud::{html, Markup};

pub struct DirectoryVm<'a> {
    pub members: &'a [Listing],
    pub spotlights: &'a [Listing],
    pub view: DirectoryView,
}

pub fn directory_page(vm: &DirectoryVm) -> Markup {
    site_layout(
        "Chamber directory",
        html! {
            h1 { "Chamber member directory" }

            @if !vm.spotlights.is_empty() {
                section class="spotlights" aria-label="Member spotlights" {
                    h2 { "Member spotlights" }
                    div class="spotlight-grid" {
                        @for member in vm.spotlights {
                            article class=(format!("card spotlight {}", membership_class(member))) {
                                h3 { (listing_heading(member)) }
                                @if let Some(tier) = &member.tier {
                                    p class="tier" { (tier) " member" }
                                }
                                p { (member.description) }
                                @if let Some(website) = &member.website {
                                    a href=(website) rel="noopener" { "Visit website" }
                                }
                            }
                        }
                    }
                }
            }

            div class="view-toggle" role="group" aria-label="Directory layout" {
                @for view in [DirectoryView::Grid, DirectoryView::List] {
                    a class=(if view == vm.view { "view-btn active" } else { "view-btn" })
                        href=(format!("/directory?view={}", view.as_str()))
                        aria-pressed=(if view == vm.view { "true" } else { "false" }) {
                        @match view {
                            DirectoryView::Grid => { "Grid" }
                            DirectoryView::List => { "List" }
                        }
                    }
                }
            }

            div id="members" class=(format!("members {}", vm.view.as_str())) {
                @for member in vm.members {
                    @match vm.view {
                        DirectoryView::Grid => { (member_card(member)) }
                        DirectoryView::List => { (member_row(member)) }
                    }
                }
            }
        },
    )
}

fn phone(member: &Listing) -> Option<&str> {
    member.contact.as_ref().and_then(|c| c.phone.as_deref())
}

fn member_card(member: &Listing) -> Markup {
    html! {
        section class=(format!("card member-card {}", membership_class(member))) {
            h2 { (listing_heading(member)) }
            p class="address" { (member.address) }
            @if let Some(phone) = phone(member) {
                p { a href=(format!("tel:{phone}")) { (phone) } }
            }
            @if let Some(website) = &member.website {
                a href=(website) rel="noopener" { (website) }
            }
        }
    }
}

fn member_row(member: &Listing) -> Markup {
    html! {
        div class=(format!("member-row {}", membership_class(member))) {
            span class="name" { (listing_heading(member)) }
            span class="address" { (member.address) }
            span class="phone" { (phone(member).unwrap_or("")) }
            @if let Some(website) = &member.website {
                a href=(website) rel="noopener" { (website) }
            }
        }
    }
}
