use crate::catalog::{CollectionKind, Section};
use crate::domain::{Facets, Listing, ListingFilter};
use crate::errors::ServerError;
use crate::leads::Lead;
use crate::responses::{html_response, text_response, ResultResp};
use crate::state::AppState;
use crate::templates::pages::{self, DetailVm, FeaturedSection, ListingsVm};
use crate::templates::inquiry_result;
use astra::Request;
use std::collections::HashMap;
use std::io::Read;

/// Form bodies larger than this are refused.
const MAX_FORM_BYTES: u64 = 64 * 1024;

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    tracing::debug!(%method, %path, "request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => home(state),
        ("GET", ["healthz"]) => text_response("ok"),

        ("GET", ["contact"]) => html_response(pages::contact_page(state.catalog().sections())),
        ("POST", ["contact"]) => {
            let form = read_form(&mut req)?;
            submit_lead(state, &form, None)
        }

        ("GET", [slug, "listings"]) => {
            let query = parse_query(&req);
            let filter = ListingFilter::new(
                query.get("q").map(String::as_str),
                query.get("category").map(String::as_str),
                query.get("location").map(String::as_str),
            );
            listings(state, find_section(state, slug)?, CollectionKind::Current, &filter)
        }
        ("GET", [slug, "closed"]) => listings(
            state,
            find_section(state, slug)?,
            CollectionKind::Previous,
            &ListingFilter::default(),
        ),

        ("GET", [slug, "listings", id]) => {
            detail(state, find_section(state, slug)?, CollectionKind::Current, id)
        }
        ("GET", [slug, "closed", id]) => {
            detail(state, find_section(state, slug)?, CollectionKind::Previous, id)
        }

        ("POST", [slug, "listings", id, "inquire"]) => {
            let section = find_section(state, slug)?;
            let listing = state
                .listing(&section.current, id)?
                .ok_or(ServerError::NotFound)?;
            let form = read_form(&mut req)?;
            submit_lead(state, &form, Some(&listing))
        }

        _ => Err(ServerError::NotFound),
    }
}

fn find_section<'a>(state: &'a AppState, slug: &str) -> Result<&'a Section, ServerError> {
    state.catalog().section(slug).ok_or(ServerError::NotFound)
}

fn home(state: &AppState) -> ResultResp {
    let sections = state.catalog().sections();

    // One broken collection should not take the whole home page down.
    let featured: Vec<FeaturedSection<'_>> = sections
        .iter()
        .map(|section| FeaturedSection {
            section,
            listings: state
                .listings(&section.current)
                .map(|all| all.iter().take(pages::home::FEATURED_PER_SECTION).cloned().collect())
                .map_err(|e| e.to_string()),
        })
        .collect();

    html_response(pages::home_page(sections, &featured))
}

fn listings(
    state: &AppState,
    section: &Section,
    kind: CollectionKind,
    filter: &ListingFilter,
) -> ResultResp {
    let all = state.listings(section.collection(kind))?;

    let vm = ListingsVm {
        sections: state.catalog().sections(),
        section,
        kind,
        total: all.len(),
        shown: filter.apply(&all),
        filter,
        facets: Facets::collect(&all),
    };

    html_response(pages::listings_page(&vm))
}

fn detail(state: &AppState, section: &Section, kind: CollectionKind, id: &str) -> ResultResp {
    let listing = state
        .listing(section.collection(kind), id)?
        .ok_or(ServerError::NotFound)?;

    html_response(pages::listing_detail_page(&DetailVm {
        sections: state.catalog().sections(),
        section,
        kind,
        listing: &listing,
    }))
}

/// Relay a lead and answer with the fragment the form swaps in.
fn submit_lead(
    state: &AppState,
    form: &[(String, String)],
    listing: Option<&Listing>,
) -> ResultResp {
    let outcome = Lead::from_form(form.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .map(|lead| match listing {
            Some(l) => lead.about(l),
            None => lead,
        })
        .and_then(|lead| state.relay().submit(&lead).map_err(ServerError::from));

    if let Err(err) = &outcome {
        tracing::warn!(error = %err, "lead not submitted");
    }

    html_response(inquiry_result(&outcome))
}

fn read_form(req: &mut Request) -> Result<Vec<(String, String)>, ServerError> {
    let mut body = Vec::new();
    // One byte past the limit is enough to know the form is too large.
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES + 1)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("Unreadable form body: {e}")))?;

    if body.len() as u64 > MAX_FORM_BYTES {
        return Err(ServerError::BadRequest("Form submission is too large.".into()));
    }

    Ok(url::form_urlencoded::parse(&body).into_owned().collect())
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
