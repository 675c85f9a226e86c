use crate::content::courses::{filter_courses, total_credits};
use crate::content::neighborhoods::{self, filter_neighborhoods, listing_counts, open_details, DEFAULT_FILTER};
use crate::content::services::{group_by_category, popular_services, POPULAR_LIMIT};
use crate::content::{DirectoryView, FaqAccordion, Subject};
use crate::domain::finance::{affordability, mortgage, rent_affordability};
use crate::domain::forms::{FormSpec, JOIN_FORM, LIST_PROPERTY_FORM};
use crate::domain::query::{similar_listings, spotlights, SortOption, DEFAULT_SIMILAR_LIMIT};
use crate::domain::submission::Submission;
use crate::domain::validation::FormReport;
use crate::errors::ServerError;
use crate::paths::{listing_path, segment};
use crate::responses::{asset_response, html_response, json_response, redirect_response, ResultResp};
use crate::state::AppState;
use crate::templates::pages;
use crate::ui::{derive_view, PageState};
use astra::Request;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};

const STYLESHEET: &str = include_str!("../static/main.css");
const RECENT_SEARCHES_SHOWN: usize = 5;
const SPOTLIGHT_COUNT: usize = 3;
const DEFAULT_RENT_SHARE: u32 = 30;
const FAQ_COUNTER: &str = "faqInteractions";

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let query = req.uri().query().unwrap_or("");

    tracing::debug!(method, path, "request");

    match (method, path) {
        ("GET", "/") => listings(state, query),
        ("GET", "/api/listings") => listings_json(state, query),
        ("GET", "/favorites") => favorites(state),
        ("GET", "/thankyou") => thank_you(state, query),
        ("GET", "/calculator") => calculator(query),
        ("GET", "/join") => form_page(state, &JOIN_FORM, query),
        ("GET", "/list-property") => form_page(state, &LIST_PROPERTY_FORM, query),
        ("GET", "/neighborhoods") => neighborhoods_index(state, query, None),
        ("GET", "/resources") => resources(state, query),
        ("GET", "/directory") => directory(state, query),
        ("GET", "/courses") => courses(state, query),
        ("GET", "/static/main.css") => asset_response(STYLESHEET, "text/css; charset=utf-8"),

        ("GET", p) if p.starts_with("/listings/") => {
            detail(state, &path_id(p, "/listings/")?, query)
        }
        ("POST", p) if p.starts_with("/favorites/") => {
            toggle_favorite(state, &path_id(p, "/favorites/")?, query)
        }
        ("GET", p) if p.starts_with("/neighborhoods/") => {
            let id = path_id(p, "/neighborhoods/")?;
            neighborhoods_index(state, "", Some(&id))
        }
        ("GET", p) if p.starts_with("/resources/") => {
            service(state, &path_id(p, "/resources/")?)
        }

        _ => Err(ServerError::NotFound),
    }
}

/// The single, percent-decoded path segment after `prefix`.
fn path_id(path: &str, prefix: &str) -> Result<String, ServerError> {
    segment(path, prefix).ok_or(ServerError::NotFound)
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

fn query_map(query: &str) -> HashMap<String, String> {
    parse_query(query).into_iter().collect()
}

/// Page state from the URL. Without an explicit `sort` the saved
/// preference applies; an explicit one becomes the new preference.
fn page_state(state: &AppState, params: &[(String, String)]) -> PageState {
    let mut page = PageState::from_params(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let mut prefs = state.storage.preferences();

    let explicit_sort = params
        .iter()
        .any(|(k, v)| k == "sort" && SortOption::parse(v).is_some());

    if explicit_sort {
        if prefs.sort_by != page.sort.as_str() {
            prefs.sort_by = page.sort.as_str().to_string();
            state.storage.save_preferences(&prefs);
        }
    } else if let Some(sort) = SortOption::parse(&prefs.sort_by) {
        page.sort = sort;
    }

    page
}

fn listings(state: &AppState, query: &str) -> ResultResp {
    let loaded = state.listings()?;
    let params = parse_query(query);
    let page = page_state(state, &params);

    if !page.search.is_empty() {
        state.storage.add_search(&page.search, &page.criteria, Utc::now());
    }

    let view = derive_view(&loaded.listings, &page);
    let favorites = state.storage.favorites();
    let greeting = state.storage.record_visit(Utc::now());
    let mut recent = state.storage.search_history();
    recent.truncate(RECENT_SEARCHES_SHOWN);
    let here = if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{query}")
    };

    html_response(pages::listings_page(&pages::ListingsPageVm {
        view: &view,
        favorites: &favorites,
        source: loaded.source,
        greeting: &greeting,
        weather: state.weather.as_ref(),
        recent_searches: &recent,
        here: &here,
    }))
}

fn listings_json(state: &AppState, query: &str) -> ResultResp {
    let loaded = state.listings()?;
    let params = parse_query(query);
    let page = PageState::from_params(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let view = derive_view(&loaded.listings, &page);

    json_response(&serde_json::json!({
        "source": loaded.source,
        "count": view.listings.len(),
        "total": view.catalog_size,
        "sort": page.sort.as_str(),
        "criteria": page.criteria,
        "stats": view.stats,
        "listings": view.listings,
    }))
}

fn detail(state: &AppState, id: &str, query: &str) -> ResultResp {
    let loaded = state.listings()?;
    let listing = loaded
        .listings
        .iter()
        .find(|l| l.id == id)
        .ok_or(ServerError::NotFound)?;

    state.storage.add_viewed(&listing.id, Utc::now());

    let similar = similar_listings(listing, &loaded.listings, DEFAULT_SIMILAR_LIMIT);

    let mortgage_estimate = match listing.price {
        Some(price) if !listing.is_rental() => mortgage(price, price * 0.2, 6.5, 30).ok(),
        _ => None,
    };

    let income = query_map(query)
        .get("income")
        .and_then(|v| v.trim().parse::<f64>().ok());
    let affordable = income.and_then(|income| affordability(listing, income, f64::from(DEFAULT_RENT_SHARE)));

    html_response(pages::detail_page(&pages::DetailPageVm {
        listing,
        is_favorite: state.storage.is_favorite(&listing.id),
        similar: &similar,
        mortgage: mortgage_estimate,
        affordability: affordable,
    }))
}

fn toggle_favorite(state: &AppState, id: &str, query: &str) -> ResultResp {
    let loaded = state.listings()?;
    if !loaded.listings.iter().any(|l| l.id == id) {
        return Err(ServerError::NotFound);
    }

    let now_favorite = state.storage.toggle_favorite(id);
    tracing::info!(listing = id, favorite = now_favorite, "favorite toggled");

    // Only same-site paths; anything else goes back to the listing.
    let params = query_map(query);
    let next = params
        .get("next")
        .filter(|n| n.starts_with('/') && !n.starts_with("//"))
        .cloned()
        .unwrap_or_else(|| listing_path(id));

    redirect_response(&next)
}

fn favorites(state: &AppState) -> ResultResp {
    let loaded = state.listings()?;
    let ids = state.storage.favorites();

    // Favorites order, skipping ids no longer in the catalog.
    let saved: Vec<_> = ids
        .iter()
        .filter_map(|id| loaded.listings.iter().find(|l| &l.id == id).cloned())
        .collect();

    html_response(pages::favorites_page(&saved))
}

fn thank_you(state: &AppState, query: &str) -> ResultResp {
    let submitted = Submission::from_query(query);

    if submitted.is_empty() {
        let latest = state.storage.latest_submission();
        return html_response(pages::thank_you_page(&pages::ThankYouVm {
            submission: latest.as_ref(),
            report: None,
            from_storage: latest.is_some(),
        }));
    }

    let report = submitted.validate();
    if !report.is_valid() {
        tracing::debug!(field = ?report.first_invalid(), "submission rejected");
    }

    // A known form goes back to its own page, with the values kept as a draft.
    if let Some(form) = submitted.form() {
        if !report.is_valid() {
            let draft = form.draft_values(pairs(&submitted.fields));
            state.storage.save_form_draft(form.id, draft, Utc::now());
            let values: BTreeMap<String, String> = submitted.fields.iter().cloned().collect();
            return render_form(form, &values, Some(&report), None);
        }
        state.storage.clear_form_draft(form.id);
    }

    if report.is_valid() {
        state.storage.save_submission(&submitted);
        tracing::info!(form = submitted.form_id.as_deref().unwrap_or("unknown"), "submission accepted");
    }

    html_response(pages::thank_you_page(&pages::ThankYouVm {
        submission: Some(&submitted),
        report: Some(&report),
        from_storage: false,
    }))
}

fn pairs(fields: &[(String, String)]) -> impl Iterator<Item = (&str, &str)> {
    fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
}

/// A form page. `save=draft` stores the values it carries; otherwise a
/// stored draft pre-fills the fields.
fn form_page(state: &AppState, form: &'static FormSpec, query: &str) -> ResultResp {
    let params = parse_query(query);
    let saving = params.iter().any(|(k, v)| k == "save" && v == "draft");

    let (values, notice) = if saving {
        let draft = form.draft_values(pairs(&params));
        let saved = state.storage.save_form_draft(form.id, draft.clone(), Utc::now());
        let notice = if saved {
            "Draft saved. You can come back to finish it later."
        } else {
            "Your draft could not be saved."
        };
        (draft, Some(notice.to_string()))
    } else {
        match state.storage.form_draft(form.id) {
            Some(draft) => {
                let notice = format!(
                    "Restored your draft from {}.",
                    draft.saved_at.format("%B %-d, %Y")
                );
                (draft.fields, Some(notice))
            }
            None => (BTreeMap::new(), None),
        }
    };

    render_form(form, &values, None, notice.as_deref())
}

fn render_form(
    form: &'static FormSpec,
    values: &BTreeMap<String, String>,
    report: Option<&FormReport>,
    notice: Option<&str>,
) -> ResultResp {
    // Hidden timestamp is stamped at render time.
    let mut values = values.clone();
    values.insert("timestamp".to_string(), Utc::now().to_rfc3339());

    html_response(pages::form_page(&pages::FormPageVm {
        form,
        values: &values,
        report,
        notice,
    }))
}

/// Without a `filter` parameter the remembered filter applies; a known one
/// becomes the remembered filter. `open` names a neighborhood whose details
/// dialog is shown.
fn neighborhoods_index(state: &AppState, query: &str, open: Option<&str>) -> ResultResp {
    let catalog = &state.content;
    let opened = match open {
        Some(id) => Some(catalog.neighborhood(id).ok_or(ServerError::NotFound)?),
        None => None,
    };

    let requested = query_map(query)
        .get("filter")
        .and_then(|f| neighborhoods::parse_filter(f));
    let filter = match requested {
        Some(filter) => {
            state.storage.save_neighborhood_filter(filter);
            filter
        }
        None => state
            .storage
            .neighborhood_filter()
            .as_deref()
            .and_then(neighborhoods::parse_filter)
            .unwrap_or(DEFAULT_FILTER),
    };

    let shown = filter_neighborhoods(&catalog.neighborhoods, filter);
    let counts = match state.listings() {
        Ok(loaded) => listing_counts(&shown, &loaded.listings),
        Err(e) => {
            tracing::warn!(error = %e, "listing counts unavailable");
            vec![0; shown.len()]
        }
    };
    let cards: Vec<_> = shown.into_iter().zip(counts).collect();

    let modal = match opened {
        Some(neighborhood) => {
            state.storage.add_viewed(&format!("neighborhood_{}", neighborhood.id), Utc::now());
            let modal = open_details(neighborhood).map_err(|e| {
                tracing::error!(error = %e, "neighborhood dialog failed to open");
                ServerError::InternalError
            })?;
            Some((neighborhood, modal))
        }
        None => None,
    };

    html_response(pages::neighborhoods_page(&pages::NeighborhoodsVm {
        filter,
        cards: &cards,
        open: modal.as_ref().map(|(n, m)| (*n, m)),
    }))
}

fn resources(state: &AppState, query: &str) -> ResultResp {
    let catalog = &state.content;
    let requested = query_map(query)
        .get("faq")
        .and_then(|v| v.trim().parse::<u32>().ok());
    let accordion = FaqAccordion::new(&catalog.faqs, requested);
    if accordion.open_id().is_some() {
        state.storage.increment_counter(FAQ_COUNTER);
    }

    let groups = group_by_category(&catalog.services);
    let interactions = state.storage.service_interactions();
    let popular = popular_services(&catalog.services, &interactions, POPULAR_LIMIT);

    html_response(pages::resources_page(&pages::ResourcesVm {
        groups: &groups,
        popular: &popular,
        faqs: &catalog.faqs,
        accordion,
    }))
}

fn service(state: &AppState, id: &str) -> ResultResp {
    let service = state.content.service(id).ok_or(ServerError::NotFound)?;
    state.storage.track_service(&service.id, "view", Utc::now());

    html_response(pages::service_page(service))
}

/// An explicit valid `view` becomes the stored layout preference.
fn directory(state: &AppState, query: &str) -> ResultResp {
    let mut prefs = state.storage.preferences();
    let requested = query_map(query)
        .get("view")
        .and_then(|v| DirectoryView::parse(v));

    let view = match requested {
        Some(view) => {
            if prefs.view_mode != view.as_str() {
                prefs.view_mode = view.as_str().to_string();
                state.storage.save_preferences(&prefs);
            }
            view
        }
        None => DirectoryView::parse(&prefs.view_mode).unwrap_or_default(),
    };

    let members = &state.content.members;
    let featured = spotlights(members, SPOTLIGHT_COUNT, &mut rand::thread_rng());

    html_response(pages::directory_page(&pages::DirectoryVm {
        members,
        spotlights: &featured,
        view,
    }))
}

fn courses(state: &AppState, query: &str) -> ResultResp {
    let subject = query_map(query)
        .get("subject")
        .and_then(|s| Subject::parse(s))
        .unwrap_or_default();
    let shown = filter_courses(&state.content.courses, subject);

    html_response(pages::courses_page(&pages::CoursesVm {
        subject,
        courses: &shown,
        total_credits: total_credits(&shown),
    }))
}

fn calculator(query: &str) -> ResultResp {
    let inputs = query_map(query);
    let number = |name: &str, default: f64| -> f64 {
        match inputs.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
            Some(v) => v.parse().unwrap_or(f64::NAN),
            None => default,
        }
    };

    let mortgage_result = inputs.contains_key("homePrice").then(|| {
        let years = inputs
            .get("loanTerm")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(30);
        mortgage(
            number("homePrice", f64::NAN),
            number("downPayment", 0.0),
            number("interestRate", 6.5),
            years,
        )
    });

    let rent_result = inputs.contains_key("income").then(|| {
        let share = inputs
            .get("rentPercent")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_RENT_SHARE);
        rent_affordability(number("income", f64::NAN), number("debts", 0.0), share)
    });

    html_response(pages::calculator_page(&pages::CalculatorVm {
        inputs: &inputs,
        mortgage: mortgage_result,
        rent: rent_result,
    }))
}
