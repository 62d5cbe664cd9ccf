use crate::catalog::Section;
use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, sections: &[Section], content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Kulshan" }
                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
                script src="/static/htmx.js" defer {};
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    a href="/" class="brand" { "Kulshan" }
                    nav {
                        ul {
                            @for section in sections {
                                li { a href=(format!("/{}/listings", section.slug)) { (section.title) } }
                                li { a href=(format!("/{}/closed", section.slug)) { "Closed Transactions" } }
                            }
                            li { a href="/contact" { "Contact" } }
                        }
                    }
                }
                (content)
                footer class="px-6 py-6 text-sm text-muted" {
                    p { "Commercial real estate and business brokerage." }
                }
            }
        }
    }
}
