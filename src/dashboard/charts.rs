//! ECharts configuration for the dashboard's two charts.
//!
//! - **Spending by Category**: a pie chart with one slice per category that
//!   has had money spent from it.
//! - **Daily Expenses**: a bar chart of the windowed daily expense totals.
//!
//! The chart options are serialised to JSON by charming and initialised by an
//! inline script that sits next to the chart containers. Keeping the script
//! inline means it runs both on a full page load and when HTMX swaps in a
//! refreshed partial.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, ItemStyle, JsFunction, Tooltip,
        Trigger,
    },
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::dashboard::{
    aggregation::{CategoryUsage, DateBucket},
    config::Palette,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the chart containers followed by the script that draws them.
pub(super) fn charts_view(charts: &[DashboardChart], palette: &Palette) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class={ "min-h-[380px] rounded-lg shadow-md " (palette.card) }
                    {}
                }
            }

            script { (charts_script(charts, palette.dark_charts)) }
        }
    )
}

/// Generates JavaScript that initialises an ECharts instance for each chart.
///
/// When `always_dark` is false the chart theme follows the browser's colour
/// scheme preference.
fn charts_script(charts: &[DashboardChart], always_dark: bool) -> PreEscaped<String> {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const existing = echarts.getInstanceByDom(chartDom);
                    if (existing) {{
                        existing.dispose();
                    }}
                    const chart = echarts.init(chartDom, {});
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    if ({}) {{
                        return;
                    }}
                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                if always_dark { "'dark'" } else { "null" },
                chart.options,
                always_dark,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PreEscaped(script_content)
}

/// The (amount spent, category name) pairs shown in the spending chart.
///
/// Categories with nothing spent are left out.
pub(super) fn spending_slices(usage: &[CategoryUsage]) -> Vec<(f64, String)> {
    usage
        .iter()
        .filter(|category| category.used > 0.0)
        .map(|category| (category.used, category.name.clone()))
        .collect()
}

pub(super) fn spending_chart(title: &str, usage: &[CategoryUsage], palette: &Palette) -> Chart {
    Chart::new()
        .title(Title::new().text(title).left(20).top("1%"))
        .color(
            palette
                .chart_colors
                .iter()
                .map(|&color| Color::from(color))
                .collect(),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("center").top("bottom"))
        .series(
            Pie::new()
                .name(title)
                .radius("60%")
                .data(spending_slices(usage)),
        )
}

pub(super) fn daily_expenses_chart(
    title: &str,
    timeline: &[DateBucket],
    palette: &Palette,
) -> Chart {
    let labels: Vec<String> = timeline.iter().map(|bucket| bucket.label.clone()).collect();
    let values: Vec<f64> = timeline.iter().map(|bucket| bucket.total).collect();

    Chart::new()
        .title(Title::new().text(title).left(20).top("1%"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(60)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name(title)
                .item_style(ItemStyle::new().color(palette.bar_color))
                .data(values),
        )
}

#[inline]
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

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
