use crate::errors::ServerError;
use maud::{html, Markup};

/// Lead form posting to `action`; the relay result is swapped into
/// `#inquiry-result`. `topics` adds a division picker (contact page).
pub fn inquiry_form(action: &str, heading: &str, topics: &[&str]) -> Markup {
    html! {
        div class="inquiry-wrapper" {
            h3 { (heading) }
            form
                method="post"
                action=(action)
                hx-post=(action)
                hx-target="#inquiry-result"
                hx-swap="innerHTML"
                hx-disabled-elt="button"
                class="inquiry-form"
            {
                label for="name" { "Your Name *" }
                input type="text" id="name" name="name" autocomplete="name" required;

                label for="email" { "Email Address *" }
                input type="email" id="email" name="email" autocomplete="email" required;

                label for="phone" { "Phone Number *" }
                input type="tel" id="phone" name="phone" autocomplete="tel" required;

                @if !topics.is_empty() {
                    label for="topic" { "Division" }
                    select id="topic" name="topic" {
                        @for topic in topics {
                            option value=(topic) { (topic) }
                        }
                    }
                }

                label for="message" { "Message" }
                textarea id="message" name="message" rows="4" {}

                button type="submit" class="primary" {
                    span class="btn-text" { "Submit" }
                    span class="spinner" aria-hidden="true" {}
                }
            }

            div id="inquiry-result" {}
        }
    }
}

/// Fragment shown after a submission attempt.
pub fn inquiry_result(outcome: &Result<(), ServerError>) -> Markup {
    html! {
        @match outcome {
            Ok(()) => div class="notice notice-success" {
                p { strong { "Thank you!" } " We received your request and will be in touch shortly." }
            },
            Err(ServerError::BadRequest(msg)) => div class="notice notice-error" {
                p { (msg) }
            },
            Err(_) => div class="notice notice-error" {
                p { "We couldn't send your request right now. Please try again or call us directly." }
            },
        }
    }
}
