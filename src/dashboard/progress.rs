//! Per-category progress bars showing how much of each deposit has been spent.

use maud::{Markup, html};

use crate::{
    dashboard::{
        aggregation::{CategoryUsage, UsageBand},
        config::Palette,
    },
    html::{format_currency, format_percentage},
};

fn band_class(band: UsageBand, palette: &Palette) -> &'static str {
    match band {
        UsageBand::Low => palette.low_usage,
        UsageBand::Medium => palette.medium_usage,
        UsageBand::High => palette.high_usage,
    }
}

/// Renders one progress row per category, in the order given.
pub(super) fn category_progress_view(
    heading: &str,
    usage: &[CategoryUsage],
    palette: &Palette,
) -> Markup {
    html! {
        section id="category-progress" class={ "w-full mx-auto mb-4 rounded-lg p-4 shadow-md " (palette.card) } {
            h3 class="text-xl font-semibold mb-4" { (heading) }

            ul class="space-y-4" {
                @for category in usage {
                    li { (progress_row(category, palette)) }
                }
            }
        }
    }
}

fn progress_row(usage: &CategoryUsage, palette: &Palette) -> Markup {
    let fill_width = usage.fill_width();
    let percentage = format_percentage(usage.percentage);

    html! {
        div class="flex justify-between items-baseline mb-1" {
            span class="font-medium truncate" title=(usage.name) { (usage.name) }
            span class={ "text-sm " (palette.muted_text) } {
                (format_currency(usage.used)) " / " (format_currency(usage.deposit))
                " (" span class="usage-percentage" { (percentage) } ")"
            }
        }

        div
            class={ "w-full rounded-full h-2.5 " (palette.progress_track) }
            role="progressbar"
            aria-label=(format!("{} used: {percentage}", usage.name))
            aria-valuenow=(format!("{fill_width:.1}"))
            aria-valuemin="0"
            aria-valuemax="100"
        {
            @if fill_width > 0.0 {
                div
                    class={ "h-2.5 rounded-full transition-all " (band_class(usage.band, palette)) }
                    style=(format!("width: {fill_width:.1}%"))
                {}
            }
        }
    }
}
