//! ECharts configuration for the dashboard's monthly rollup chart.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with a matching HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Line, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::aggregation::MonthlySummary, html::HeadElement};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Income and expenses as bars with net income as a line, one point per month.
pub(super) fn monthly_chart(monthly: &[MonthlySummary]) -> Chart {
    let labels: Vec<String> = monthly.iter().map(|month| month.label.clone()).collect();
    let income: Vec<f64> = monthly.iter().map(|month| month.income).collect();
    let expense: Vec<f64> = monthly.iter().map(|month| month.expense).collect();
    let net: Vec<f64> = monthly.iter().map(|month| month.net).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Monthly summary")
                .subtext(format!("Last {} months", monthly.len())),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(70)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Income").data(income))
        .series(bar::Bar::new().name("Expense").data(expense))
        .series(Line::new().name("Net").data(net))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('ja-JP', {
              style: 'currency',
              currency: 'JPY'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{dashboard::aggregation::monthly_rollup, test_utils::seed_transactions};

    use super::{DashboardChart, charts_script, monthly_chart};

    #[test]
    fn chart_has_one_label_per_month() {
        let monthly = monthly_rollup(&seed_transactions(), 6, date!(2024 - 01 - 20));

        let options = monthly_chart(&monthly).to_string();

        assert!(options.contains("2023-08"));
        assert!(options.contains("2024-01"));
        assert!(options.contains("\"Net\""));
    }

    #[test]
    fn script_initializes_each_chart() {
        let charts = [DashboardChart {
            id: "monthly-chart",
            options: "{}".to_owned(),
        }];

        let crate::html::HeadElement::ScriptSource(script) = charts_script(&charts) else {
            panic!("expected inline script");
        };

        assert!(script.0.contains("document.getElementById(\"monthly-chart\")"));
    }
}
