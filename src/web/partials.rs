use clap::crate_version;
use maud::{html, Markup};

use crate::rupees::Rupees;

pub fn headers() -> Markup {
    html! {
        meta name="viewport" content="width=device-width, initial-scale=1";
        meta charset="UTF-8";
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
        link rel="stylesheet" href="https://unpkg.com/bulma-prefers-dark";
    }
}

/// Labeled numeric input with a stable `id`.
pub fn number_field(id: &str, label: &str, value: &str, step: &str) -> Markup {
    html! {
        div.field {
            label.label for=(id) { (label) }
            div.control {
                input.input id=(id) name=(id) type="number" min="0" step=(step) value=(value) required;
            }
        }
    }
}

pub fn price(value: f64) -> Markup {
    html! {
        span title=(value) { (Rupees(value)) }
    }
}

pub fn footer() -> Markup {
    html! {
        footer.footer {
            div.content.has-text-centered {
                p {
                    "House Price Dashboard " (crate_version!())
                    " · made with " a href="https://www.rust-lang.org/" { "Rust" }
                    ", " a href="https://bulma.io/" { "Bulma" }
                    " and " a href="https://www.chartjs.org/" { "Chart.js" }
                }
            }
        }
    }
}
