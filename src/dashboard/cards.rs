//! Summary cards for the dashboard totals and the biggest category.

use maud::{Markup, html};

use crate::{
    dashboard::{
        aggregation::DashboardSummary,
        config::{DashboardText, Palette},
    },
    html::format_currency,
};

/// Renders the four summary cards in a responsive grid.
pub(super) fn summary_cards_view(
    summary: &DashboardSummary,
    text: &DashboardText,
    palette: &Palette,
) -> Markup {
    html! {
        section id="summary-cards" class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4" {
                (amount_card(&text.total_balance, summary.total_balance, palette))
                (amount_card(&text.total_deposits, summary.total_deposits, palette))
                (amount_card(&text.total_expenses, summary.total_expenses, palette))
                (biggest_category_card(summary, text, palette))
            }
        }
    }
}

fn amount_card(label: &str, amount: f64, palette: &Palette) -> Markup {
    html! {
        div
            class={ "rounded-lg p-4 shadow-md " (palette.card) }
            aria-label=(format!("{label}: {}", format_currency(amount)))
        {
            h4 class={ "text-sm font-medium mb-2 " (palette.muted_text) } { (label) }
            div class="text-3xl font-bold" { (format_currency(amount)) }
        }
    }
}

/// The biggest category card, or a placeholder when there are no categories.
fn biggest_category_card(
    summary: &DashboardSummary,
    text: &DashboardText,
    palette: &Palette,
) -> Markup {
    html! {
        div
            id="biggest-category"
            class={ "rounded-lg p-4 shadow-md " (palette.card) }
        {
            h4 class={ "text-sm font-medium mb-2 " (palette.muted_text) } {
                (text.biggest_category)
            }

            @match &summary.biggest_category {
                Some(category) => {
                    div class="text-2xl font-bold truncate" title=(category.name) {
                        (category.name)
                    }
                    div class={ "text-sm " (palette.muted_text) } {
                        (format_currency(category.spent)) " spent"
                    }
                }
                None => {
                    div class={ "text-lg italic " (palette.muted_text) } {
                        (text.no_biggest_category)
                    }
                }
            }
        }
    }
}
