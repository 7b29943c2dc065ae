//! The charts page showing spending per category.
//!
//! The page is a static shell: the ECharts options are built here with empty
//! series, and a script on the page fills them from the summary API.

use axum::response::{IntoResponse, Response};
use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

const DONUT_CHART_ID: &str = "donut-chart";
const BAR_CHART_ID: &str = "bar-chart";
const LEGEND_ID: &str = "chart-legend";
const MESSAGE_ID: &str = "chart-message";

/// A chart with its HTML container ID and ECharts configuration.
struct SpendingChart {
    /// The HTML element ID to use for the chart (kebab-case)
    id: &'static str,
    /// The ECharts configuration as a JSON string
    options: String,
}

/// Render the charts page.
pub async fn get_charts_page() -> Response {
    let charts = [
        SpendingChart {
            id: DONUT_CHART_ID,
            options: category_donut_chart().to_string(),
        },
        SpendingChart {
            id: BAR_CHART_ID,
            options: category_bar_chart().to_string(),
        },
    ];

    charts_view(&charts).into_response()
}

fn charts_view(charts: &[SpendingChart]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CHARTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Spending by Category" }

            p id=(MESSAGE_ID) class="hidden mb-4 text-gray-500 dark:text-gray-400" {}

            section id="charts" class="w-full max-w-6xl mb-4"
            {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    @for chart in charts {
                        div
                            id=(chart.id)
                            class="min-h-[380px] rounded dark:bg-gray-100"
                        {}
                    }
                }
            }

            ul id=(LEGEND_ID) class="w-full max-w-6xl space-y-1" {}
        }
    };

    base(
        "Charts",
        &[
            HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
            charts_script(charts),
        ],
        &content,
    )
}

/// Generates the script that initializes the charts and loads their data.
///
/// The charts follow the browser's dark mode setting and resize with the window.
fn charts_script(charts: &[SpendingChart]) -> HeadElement {
    let init_script = charts
        .iter()
        .map(|chart| {
            format!(
                r#"charts["{id}"] = (function() {{
                    const chart = echarts.init(document.getElementById("{id}"));
                    chart.setOption({options});

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
                    }};
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();

                    return chart;
                }})();"#,
                id = chart.id,
                options = chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let load_script = format!(
        r#"const showMessage = (text) => {{
            const message = document.getElementById("{MESSAGE_ID}");
            message.textContent = text;
            message.classList.remove("hidden");
        }};
        const currencyFormatter = new Intl.NumberFormat('en-US', {{
            style: 'currency',
            currency: 'USD'
        }});

        fetch("{SUMMARY_API}")
            .then((response) => {{
                if (!response.ok) {{
                    throw new Error(`summary request failed with status ${{response.status}}`);
                }}
                return response.json();
            }})
            .then((totals) => {{
                if (totals.length === 0) {{
                    showMessage("No expense data available yet");
                    return;
                }}

                charts["{DONUT_CHART_ID}"].setOption({{
                    series: [{{ data: totals.map((total) => ({{ name: total.category, value: total.value }})) }}]
                }});
                charts["{BAR_CHART_ID}"].setOption({{
                    xAxis: {{ data: totals.map((total) => total.category) }},
                    series: [{{ data: totals.map((total) => total.value) }}]
                }});

                const legend = document.getElementById("{LEGEND_ID}");
                legend.replaceChildren(...totals.map((total) => {{
                    const item = document.createElement("li");
                    item.textContent = `${{total.category}} — ${{currencyFormatter.format(total.value)}}`;
                    return item;
                }}));
            }})
            .catch((error) => {{
                console.error(error);
                showMessage("Could not load chart data, try refreshing the page.");
            }});"#,
        SUMMARY_API = endpoints::SUMMARY_API,
    );

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\nconst charts = {{}};\n{init_script}\n{load_script}\n}});"
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

fn category_donut_chart() -> Chart {
    Chart::new()
        .title(Title::new().text("Share of spending"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .series(Pie::new().name("Spending").radius(vec!["40%", "70%"]))
}

fn category_bar_chart() -> Chart {
    Chart::new()
        .title(Title::new().text("Total spent"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Spending"))
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}
