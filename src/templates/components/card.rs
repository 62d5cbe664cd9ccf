use crate::catalog::CollectionKind;
use crate::domain::{Listing, Status};
use maud::{html, Markup};

pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn status_badge(status: Status) -> Markup {
    html! {
        span class=(format!("badge badge-{}", status.as_str())) { (status.label()) }
    }
}

/// Link target for a listing inside a section. The id is percent-encoded as
/// a path segment, so a space is `%20` and never `+`.
pub fn listing_href(section_slug: &str, kind: CollectionKind, id: &str) -> String {
    let id = encode_segment(id);
    match kind {
        CollectionKind::Current => format!("/{section_slug}/listings/{id}"),
        CollectionKind::Previous => format!("/{section_slug}/closed/{id}"),
    }
}

fn encode_segment(raw: &str) -> String {
    // byte_serialize leaves only `*-._` and alphanumerics bare; its `+` always means space.
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Document-supplied URLs are only used when they are http(s) or site-relative
/// and carry nothing that could end a quoted CSS or HTML value.
pub fn safe_url(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let allowed_scheme = raw.starts_with("https://")
        || raw.starts_with("http://")
        || (raw.starts_with('/') && !raw.starts_with("//"));
    let clean = !raw
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '(' | ')' | '\\' | '<' | '>'));

    (allowed_scheme && clean).then_some(raw)
}

pub fn listing_card(section_slug: &str, kind: CollectionKind, listing: &Listing) -> Markup {
    let href = listing_href(section_slug, kind, &listing.id);
    let image = listing
        .cover_image()
        .and_then(safe_url)
        .unwrap_or(PLACEHOLDER_IMAGE);

    html! {
        a class="listing-card" href=(href) {
            div class="listing-card-image" {
                img src=(image) alt=(listing.title) loading="lazy";
                (status_badge(listing.status))
            }
            div class="listing-card-body" {
                h3 { (listing.title) }
                p class="listing-location" { (listing.location) }
                p class="listing-meta" {
                    (listing.category)
                    @if let Some(size) = &listing.size {
                        " • " (size)
                    }
                }
                p class="listing-price" { (listing.price) }
            }
        }
    }
}
