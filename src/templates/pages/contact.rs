// templates/pages/contact.rs

use crate::catalog::Section;
use crate::templates::{desktop_layout, inquiry_form};
use maud::{html, Markup};

pub const CONTACT_TOPICS: &[&str] = &["Commercial Real Estate", "Business Brokerage"];

pub fn contact_page(sections: &[Section]) -> Markup {
    desktop_layout(
        "Contact",
        sections,
        html! {
            main class="container contact-grid" {
                section class="page-intro" {
                    h1 { "Get in Touch" }
                    p { "Whether you're looking to buy, sell, or learn more about our services, we're here to help." }
                }

                (inquiry_form("/contact", "Send us a message", CONTACT_TOPICS))

                section class="contact-info" {
                    h3 { "Business Hours" }
                    p { "Monday - Friday: 9:00 AM - 5:00 PM" }
                }
            }
        },
    )
}
