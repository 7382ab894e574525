//! Shared page layout, style constants and number formatting.

use maud::{DOCTYPE, Markup, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "px-4 py-2 text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 border border-red-600 \
    dark:border-red-500 rounded bg-transparent cursor-pointer";

/// Extra elements to add to the `<head>` of a page.
pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
}

/// Wrap `content` in the HTML document shared by every page.
///
/// `body_class` sets the page background and text colours, which differ
/// between dashboard themes.
pub fn base(
    title: &str,
    body_class: &str,
    head_elements: &[HeadElement],
    content: &Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Budget Dashboard" }
                link href="/static/main.css" rel="stylesheet";

                script src="/static/htmx-2.0.8-min.js" {}
                script src="/static/htmx-ext-response-targets-2.0.4.js" {}

                style
                {
                    r#"
                    .htmx-indicator {
                        display: none;
                    }

                    .htmx-request .htmx-indicator,
                    .htmx-request.htmx-indicator {
                        display: inline;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body
                hx-ext="response-targets"
                class={"container max-w-full min-h-screen " (body_class)}
            {
                (content)

                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 font-medium rounded text-sm px-5
                            py-2.5 text-center my-4"
                    {
                        "Back to Dashboard"
                    }
                }
            }
        }
    );

    base(title, "bg-gray-50 dark:bg-gray-900", &[], &content)
}

/// Format `number` as dollars and cents, e.g. `$1,234.50` or `-$3.00`.
///
/// Non-finite numbers are shown as an em dash since they come from
/// malformed records rather than real amounts.
pub fn format_currency(number: f64) -> String {
    if !number.is_finite() {
        return "—".to_owned();
    }

    // Sums of floats leave residue like 5.55e-17 that numfmt would print in
    // scientific notation.
    let number = (number * 100.0).round() / 100.0;

    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("a single character prefix is a valid currency symbol")
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .expect("a two character prefix is a valid currency symbol")
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt drops trailing zeros in the fraction, e.g. "12.30" becomes "12.3"
    // and "12.00" becomes "12".
    match formatted_string.find('.') {
        None => formatted_string.push_str(".00"),
        Some(dot) if formatted_string.len() - dot == 2 => formatted_string.push('0'),
        Some(_) => {}
    }

    formatted_string
}

/// Format a percentage with one decimal place, or an em dash when undefined.
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(value) => format!("{value:.1}%"),
        None => "—".to_owned(),
    }
}
