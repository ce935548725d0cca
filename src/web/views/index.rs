use maud::{html, Markup, PreEscaped, DOCTYPE};
use poem::web::{Data, Html};
use poem::{handler, IntoResponse, Response};

use crate::dataset::HOUSES;
use crate::model::Model;
use crate::prelude::*;
use crate::regression::{Coefficients, FitSummary};
use crate::web::partials::*;
use crate::web::state::Dashboard;

/// Feature names in the design matrix column order, the intercept excluded.
const WEIGHT_NAMES: [&str; 3] = ["per square foot", "per bedroom", "per bathroom"];

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get(dashboard: Data<&Arc<Dashboard>>) -> Result<Response> {
    // `</` inside the JSON would close the script element.
    let chart_json = serde_json::to_string(&dashboard.chart)
        .context("failed to serialize the chart data")?
        .replace("</", "<\\/");

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                script defer src="https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.js" crossorigin="anonymous" referrerpolicy="no-referrer" {}
                title { "House Price Predictor" }
            }
            body {
                section.section {
                    div.container {
                        h1.title { "House Price Predictor" }
                        p.subtitle { "Linear regression over " (HOUSES.len()) " houses, prices in INR" }

                        @match &dashboard.model {
                            Model::Ready { coefficients, summary } => {
                                div.columns {
                                    div.column."is-4" {
                                        (form())
                                        (model_box(coefficients, summary))
                                    }
                                    div.column {
                                        div.box {
                                            canvas id="priceChart" {}
                                        }
                                    }
                                }
                            }
                            Model::Failed(error) => {
                                div.notification.is-danger {
                                    strong { "The model could not be fitted: " }
                                    (error.to_string())
                                }
                            }
                            Model::Pending => {
                                div.notification.is-warning { "The model is not fitted yet." }
                            }
                        }
                    }
                }

                (footer())

                @if dashboard.model.coefficients().is_some() {
                    script type="application/json" id="chart-data" { (PreEscaped(chart_json)) }
                    script type="module" { (PreEscaped(SCRIPT)) }
                }
            }
        }
    };
    Ok(Html(markup.into_string()).into_response())
}

fn form() -> Markup {
    html! {
        form.box onsubmit="return false;" {
            (number_field("size", "Size (sqft)", "1000", "any"))
            (number_field("bedrooms", "Bedrooms", "3", "1"))
            (number_field("bathrooms", "Bathrooms", "2", "1"))
            div.field {
                label.label { "Predicted price" }
                p."is-size-4".has-text-weight-bold id="predicted-price" { "–" }
            }
        }
    }
}

fn model_box(coefficients: &Coefficients, summary: &FitSummary) -> Markup {
    html! {
        div.box {
            p.title."is-6" { "Model" }
            table.table.is-fullwidth.is-narrow {
                tbody {
                    tr {
                        th { "Intercept" }
                        td.has-text-right { (price(coefficients.intercept())) }
                    }
                    @for (name, weight) in WEIGHT_NAMES.iter().zip(coefficients.weights()) {
                        tr {
                            th { (name) }
                            td.has-text-right { (price(*weight)) }
                        }
                    }
                    tr {
                        th { abbr title="Root-mean-square error on the houses above" { "RMSE" } }
                        td.has-text-right { (price(summary.rmse)) }
                    }
                    @if let Some(r_squared) = summary.r_squared {
                        tr {
                            th { "R²" }
                            td.has-text-right { (format!("{:.4}", r_squared)) }
                        }
                    }
                }
            }
        }
    }
}

const SCRIPT: &str = r#"
    "use strict";

    const chartData = JSON.parse(document.getElementById("chart-data").textContent);
    const formatPrice = (value) => `₹${value.toLocaleString("en-IN")}`;

    const priceChart = new Chart(document.getElementById("priceChart").getContext("2d"), {
        type: "scatter",
        data: {
            datasets: [
                {
                    label: chartData.observed.label,
                    data: chartData.observed.data,
                    backgroundColor: "blue",
                },
                {
                    label: chartData.fitted.label,
                    type: "line",
                    data: chartData.fitted.data,
                    borderColor: "red",
                    borderWidth: 2,
                    fill: false,
                },
                {
                    label: chartData.predicted.label,
                    data: chartData.predicted.data,
                    backgroundColor: "green",
                },
            ],
        },
        options: {
            responsive: true,
            plugins: {
                tooltip: {
                    callbacks: {
                        label: (context) => formatPrice(context.raw.y),
                    },
                },
            },
            scales: {
                x: { title: { display: true, text: "Size (sqft)" } },
                y: {
                    title: { display: true, text: "Price (₹)" },
                    ticks: { callback: formatPrice },
                },
            },
        },
    });

    const inputs = ["size", "bedrooms", "bathrooms"].map((id) => document.getElementById(id));
    let lastRequestId = 0;

    async function predict() {
        const requestId = ++lastRequestId;
        const query = new URLSearchParams(inputs.map((input) => [input.id, input.value]));
        const response = await fetch(`/predict?${query}`);
        if (response.status !== 200 || requestId !== lastRequestId) {
            return;
        }
        const prediction = await response.json();
        document.getElementById("predicted-price").innerText = prediction.formatted_price;
        priceChart.data.datasets[2].data = prediction.predicted.data;
        priceChart.update();
    }

    inputs.forEach((input) => input.addEventListener("input", predict));
    predict();
"#;
