use crate::templates::components::safe_url;
use maud::{html, Markup};

/// Scrollable image strip for the detail pages. Unusable URLs are skipped.
pub fn image_gallery(images: &[String], title: &str) -> Markup {
    let images: Vec<&str> = images.iter().filter_map(|src| safe_url(src)).collect();

    html! {
        @if images.is_empty() {
            div class="gallery gallery-empty" { p { "No images" } }
        } @else {
            div class="gallery" {
                @for (i, src) in images.iter().enumerate() {
                    figure class="gallery-item" {
                        img src=(src) alt=(format!("{title} ({} of {})", i + 1, images.len())) loading="lazy";
                    }
                }
            }
        }
    }
}
