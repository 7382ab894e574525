//! Aggregation of budget records into the values shown on the dashboard.
//!
//! Everything here is a pure function of the records passed in. The
//! dashboard recomputes the whole summary from scratch on every load, so
//! there is no partially updated state to reason about.

use std::collections::HashMap;

use time::{Date, Month};

use crate::records::{Category, Deposit, Expense};

/// The number of buckets kept by the default [ChartWindow].
pub const DEFAULT_WINDOW_DAYS: usize = 7;

const HIGH_USAGE_THRESHOLD: f64 = 80.0;
const MEDIUM_USAGE_THRESHOLD: f64 = 50.0;

/// How many of the most recent date buckets the timeline chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartWindow {
    /// Keep the last `n` buckets.
    Fixed(usize),
    /// Keep as many buckets as there are days in the current month.
    CalendarMonth,
}

impl Default for ChartWindow {
    fn default() -> Self {
        ChartWindow::Fixed(DEFAULT_WINDOW_DAYS)
    }
}

impl ChartWindow {
    /// The maximum number of buckets to keep, given today's date.
    pub fn bucket_limit(self, today: Date) -> usize {
        match self {
            ChartWindow::Fixed(limit) => limit,
            ChartWindow::CalendarMonth => today.month().length(today.year()) as usize,
        }
    }
}

/// The total amount spent on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DateBucket {
    /// The short label for the chart axis, e.g. "1/5" for "1/5/2024".
    pub label: String,
    /// The calendar date, or `None` if the date string could not be parsed.
    pub date: Option<Date>,
    /// The sum of the expense amounts on this date.
    pub total: f64,
}

/// How much of a category's deposits have been used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageBand {
    /// At most half used.
    Low,
    /// More than half, and at most 80%, used.
    Medium,
    /// More than 80% used.
    High,
}

/// The spending progress of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUsage {
    /// The category name.
    pub name: String,
    /// The total deposited into the category.
    pub deposit: f64,
    /// The amount spent, `deposit - balance`.
    pub used: f64,
    /// `used` as a percentage of `deposit`.
    ///
    /// `None` when the percentage is undefined, i.e. nothing has been
    /// deposited. Overspent categories exceed 100.
    pub percentage: Option<f64>,
    /// The colour band for the progress bar.
    pub band: UsageBand,
}

impl CategoryUsage {
    /// The width of the progress bar fill, as a percentage from 0 to 100.
    pub fn fill_width(&self) -> f64 {
        self.percentage
            .map_or(0.0, |percentage| percentage.clamp(0.0, 100.0))
    }
}

/// The category that has had the most money spent from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TopCategory {
    /// The category name.
    pub name: String,
    /// The amount spent from the category.
    pub spent: f64,
}

/// Everything the dashboard displays, derived from the stored records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    /// The sum of the remaining balance of every category.
    pub total_balance: f64,
    /// The sum of every deposit.
    pub total_deposits: f64,
    /// The sum of every expense.
    pub total_expenses: f64,
    /// `None` when there are no categories.
    pub biggest_category: Option<TopCategory>,
    /// Daily expense totals in chronological order, limited by the [ChartWindow].
    pub timeline: Vec<DateBucket>,
    /// One entry per category, in the stored order.
    pub usage: Vec<CategoryUsage>,
    /// The number of records the summary was built from.
    pub record_count: usize,
}

impl DashboardSummary {
    /// Whether there were no records to summarise.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// Build the dashboard summary from the three record collections.
///
/// `today` decides the window size for [ChartWindow::CalendarMonth].
pub fn aggregate(
    categories: &[Category],
    expenses: &[Expense],
    deposits: &[Deposit],
    window: ChartWindow,
    today: Date,
) -> DashboardSummary {
    let timeline = window_buckets(
        bucket_expenses_by_date(expenses),
        window.bucket_limit(today),
    );

    DashboardSummary {
        total_balance: total_balance(categories),
        total_deposits: total_deposits(deposits),
        total_expenses: total_expenses(expenses),
        biggest_category: biggest_category(categories).map(|category| TopCategory {
            name: category.name.clone(),
            spent: category.spent(),
        }),
        timeline,
        usage: categories.iter().map(category_usage).collect(),
        record_count: categories.len() + expenses.len() + deposits.len(),
    }
}

/// The sum of every category's remaining balance, 0 when there are none.
pub fn total_balance(categories: &[Category]) -> f64 {
    categories.iter().map(|category| category.balance).sum()
}

/// The sum of every deposit amount.
pub fn total_deposits(deposits: &[Deposit]) -> f64 {
    deposits.iter().map(|deposit| deposit.amount).sum()
}

/// The sum of every expense amount.
pub fn total_expenses(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Find the category with the most money spent from it.
///
/// Ties go to the category that comes first.
pub fn biggest_category(categories: &[Category]) -> Option<&Category> {
    let mut categories = categories.iter();
    let first = categories.next()?;

    Some(categories.fold(first, |biggest, category| {
        if category.spent() > biggest.spent() {
            category
        } else {
            biggest
        }
    }))
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum BucketKey<'a> {
    Date(Date),
    Raw(&'a str),
}

/// Sum expense amounts per date, sorted from oldest to newest.
///
/// Date strings that parse to the same calendar date share a bucket, e.g.
/// "1/5/2024" and "2024-01-05". The label comes from the first date string
/// seen for the bucket. Dates that cannot be parsed are grouped by their
/// exact text and placed before every parsed date, in the order they first
/// appear, so a window over the most recent buckets drops them first.
pub fn bucket_expenses_by_date(expenses: &[Expense]) -> Vec<DateBucket> {
    let mut buckets: Vec<DateBucket> = Vec::new();
    let mut bucket_indices: HashMap<BucketKey, usize> = HashMap::new();

    for expense in expenses {
        let date = parse_date(&expense.date);
        let key = match date {
            Some(date) => BucketKey::Date(date),
            None => BucketKey::Raw(expense.date.as_str()),
        };

        match bucket_indices.get(&key) {
            Some(&index) => buckets[index].total += expense.amount,
            None => {
                bucket_indices.insert(key, buckets.len());
                buckets.push(DateBucket {
                    label: short_date_label(&expense.date),
                    date,
                    total: expense.amount,
                });
            }
        }
    }

    // Stable sort keeps unparsed dates in the order they were first seen.
    buckets.sort_by_key(|bucket| (bucket.date.is_some(), bucket.date));
    buckets
}

/// Keep only the `limit` most recent buckets.
pub fn window_buckets(mut buckets: Vec<DateBucket>, limit: usize) -> Vec<DateBucket> {
    let start = buckets.len().saturating_sub(limit);
    buckets.split_off(start)
}

/// Shorten a date string to its first two slash separated parts.
///
/// "1/5/2024" becomes "1/5". Strings without slashes are returned whole.
pub fn short_date_label(date: &str) -> String {
    date.split('/').take(2).collect::<Vec<_>>().join("/")
}

/// Parse a date written as `month/day/year` or as an ISO 8601 date.
///
/// Two digit years are read as 2000-2049 or 1950-1999. Either form may be
/// followed by a time, e.g. "1/8/2024, 10:30:00 AM", which is ignored.
pub fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();

    if text.contains('/') {
        parse_month_day_year(text)
    } else {
        parse_iso_date(text)
    }
}

fn parse_month_day_year(text: &str) -> Option<Date> {
    let mut parts = text.split('/');
    let month: u8 = parts.next()?.trim().parse().ok()?;
    let day: u8 = parts.next()?.trim().parse().ok()?;
    let year_text = parts.next()?;

    if parts.next().is_some() {
        return None;
    }

    let year_text = match year_text.split_once(',') {
        Some((year_text, time)) if !time.trim().is_empty() => year_text,
        Some(_) => return None,
        None => year_text,
    }
    .trim();

    let year: i32 = year_text.parse().ok()?;
    let year = match (year_text.len(), year) {
        (1 | 2, 0..50) => 2000 + year,
        (1 | 2, _) => 1900 + year,
        _ => year,
    };

    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

fn parse_iso_date(text: &str) -> Option<Date> {
    let (date_part, rest) = text.split_at_checked(10)?;

    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return None;
    }

    let mut parts = date_part.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;

    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

/// Work out how much of `category` has been spent.
pub fn category_usage(category: &Category) -> CategoryUsage {
    let used = category.spent();
    let percentage = if category.deposit == 0.0 {
        None
    } else {
        Some(used / category.deposit * 100.0).filter(|percentage| percentage.is_finite())
    };

    CategoryUsage {
        name: category.name.clone(),
        deposit: category.deposit,
        used,
        percentage,
        band: usage_band(percentage),
    }
}

/// Classify a usage percentage.
///
/// The thresholds are exclusive: exactly 80% is [UsageBand::Medium] and
/// exactly 50% is [UsageBand::Low]. An undefined percentage is low.
pub fn usage_band(percentage: Option<f64>) -> UsageBand {
    match percentage {
        Some(percentage) if percentage > HIGH_USAGE_THRESHOLD => UsageBand::High,
        Some(percentage) if percentage > MEDIUM_USAGE_THRESHOLD => UsageBand::Medium,
        _ => UsageBand::Low,
    }
}

#[cfg(test)]
mod tests {
    use time::{Date, Duration, macros::date};

    use super::{
        ChartWindow, DateBucket, UsageBand, aggregate, biggest_category, bucket_expenses_by_date,
        category_usage, parse_date, short_date_label, total_balance, usage_band, window_buckets,
    };
    use crate::records::{Category, Deposit, Expense};

    fn create_test_category(name: &str, deposit: f64, balance: f64) -> Category {
        Category {
            id: name.to_lowercase(),
            name: name.to_owned(),
            deposit,
            balance,
        }
    }

    fn create_test_expense(amount: f64, date: &str) -> Expense {
        Expense {
            id: format!("{date}-{amount}"),
            name: "Something".to_owned(),
            amount,
            category_name: "Food".to_owned(),
            date: date.to_owned(),
        }
    }

    fn create_test_deposit(amount: f64) -> Deposit {
        Deposit {
            id: format!("d-{amount}"),
            category_name: "Food".to_owned(),
            amount,
            date: "1/1/2024".to_owned(),
        }
    }

    fn month_day_year(date: Date) -> String {
        format!("{}/{}/{}", date.month() as u8, date.day(), date.year())
    }

    /// One expense per day for `count` days starting on 2024-01-01.
    fn create_daily_buckets(count: i64) -> Vec<DateBucket> {
        let expenses: Vec<_> = (0..count)
            .map(|offset| {
                let date = date!(2024 - 01 - 01) + Duration::days(offset);
                create_test_expense(1.0, &month_day_year(date))
            })
            .collect();

        bucket_expenses_by_date(&expenses)
    }

    #[test]
    fn total_balance_sums_category_balances() {
        let categories = vec![
            create_test_category("Food", 100.0, 40.0),
            create_test_category("Rent", 500.0, 250.5),
        ];

        assert_eq!(total_balance(&categories), 290.5);
    }

    #[test]
    fn total_balance_of_no_categories_is_zero() {
        assert_eq!(total_balance(&[]), 0.0);
    }

    #[test]
    fn biggest_category_keeps_first_of_tied_entries() {
        // spent: 5, 9, 9, 3
        let categories = vec![
            create_test_category("A", 10.0, 5.0),
            create_test_category("B", 10.0, 1.0),
            create_test_category("C", 20.0, 11.0),
            create_test_category("D", 10.0, 7.0),
        ];

        let biggest = biggest_category(&categories).unwrap();

        assert_eq!(biggest.name, "B");
    }

    #[test]
    fn biggest_category_of_no_categories_is_none() {
        assert_eq!(biggest_category(&[]), None);
    }

    #[test]
    fn buckets_sum_amounts_per_date_in_chronological_order() {
        let expenses = vec![
            create_test_expense(7.0, "1/6/2024"),
            create_test_expense(10.0, "1/5/2024"),
            create_test_expense(5.0, "1/5/2024"),
        ];

        let buckets = bucket_expenses_by_date(&expenses);

        assert_eq!(
            buckets,
            vec![
                DateBucket {
                    label: "1/5".to_owned(),
                    date: Some(date!(2024 - 01 - 05)),
                    total: 15.0,
                },
                DateBucket {
                    label: "1/6".to_owned(),
                    date: Some(date!(2024 - 01 - 06)),
                    total: 7.0,
                },
            ]
        );
    }

    #[test]
    fn buckets_sort_by_date_not_by_label() {
        let expenses = vec![
            create_test_expense(1.0, "10/1/2024"),
            create_test_expense(2.0, "9/30/2024"),
            create_test_expense(3.0, "1/1/2025"),
        ];

        let labels: Vec<_> = bucket_expenses_by_date(&expenses)
            .into_iter()
            .map(|bucket| bucket.label)
            .collect();

        assert_eq!(labels, vec!["9/30", "10/1", "1/1"]);
    }

    #[test]
    fn differently_formatted_dates_share_a_bucket() {
        let expenses = vec![
            create_test_expense(10.0, "1/5/2024"),
            create_test_expense(5.0, "2024-01-05"),
        ];

        let buckets = bucket_expenses_by_date(&expenses);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "1/5");
        assert_eq!(buckets[0].total, 15.0);
    }

    #[test]
    fn unparsed_dates_go_first_in_order_of_appearance() {
        let expenses = vec![
            create_test_expense(1.0, "someday"),
            create_test_expense(2.0, "1/5/2024"),
            create_test_expense(3.0, "yesterday"),
            create_test_expense(4.0, "someday"),
        ];

        let buckets = bucket_expenses_by_date(&expenses);

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].label, "someday");
        assert_eq!(buckets[0].total, 5.0);
        assert_eq!(buckets[0].date, None);
        assert_eq!(buckets[1].label, "yesterday");
        assert_eq!(buckets[2].label, "1/5");
    }

    #[test]
    fn fixed_window_keeps_recent_days_over_unparsed_dates() {
        let mut expenses: Vec<_> = (1..=7)
            .map(|day| create_test_expense(1.0, &format!("1/{day}/2024")))
            .collect();
        expenses.push(create_test_expense(2.0, "1/8/2024, 10:30:00 AM"));
        expenses.push(create_test_expense(3.0, "Jan 9, 2024"));

        let summary = aggregate(
            &[],
            &expenses,
            &[],
            ChartWindow::default(),
            date!(2024 - 01 - 31),
        );

        let labels: Vec<_> = summary
            .timeline
            .iter()
            .map(|bucket| bucket.label.as_str())
            .collect();
        assert_eq!(labels, vec!["1/2", "1/3", "1/4", "1/5", "1/6", "1/7", "1/8"]);
        assert!(summary.timeline.iter().all(|bucket| bucket.date.is_some()));
        assert_eq!(summary.timeline.last().unwrap().total, 2.0);
    }

    #[test]
    fn fixed_window_keeps_most_recent_buckets() {
        let buckets = create_daily_buckets(10);

        let kept = window_buckets(buckets, ChartWindow::Fixed(7).bucket_limit(date!(2024 - 03 - 01)));

        assert_eq!(kept.len(), 7);
        assert_eq!(kept.first().unwrap().date, Some(date!(2024 - 01 - 04)));
        assert_eq!(kept.last().unwrap().date, Some(date!(2024 - 01 - 10)));
    }

    #[test]
    fn fixed_window_keeps_everything_when_there_are_fewer_buckets() {
        let buckets = create_daily_buckets(3);

        let kept = window_buckets(buckets, 7);

        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn calendar_month_window_uses_days_in_current_month() {
        assert_eq!(ChartWindow::CalendarMonth.bucket_limit(date!(2024 - 02 - 10)), 29);
        assert_eq!(ChartWindow::CalendarMonth.bucket_limit(date!(2023 - 02 - 10)), 28);
        assert_eq!(ChartWindow::CalendarMonth.bucket_limit(date!(2024 - 04 - 30)), 30);
        assert_eq!(ChartWindow::CalendarMonth.bucket_limit(date!(2024 - 12 - 01)), 31);
    }

    #[test]
    fn calendar_month_window_keeps_min_of_days_and_buckets() {
        let today = date!(2024 - 02 - 10);
        let limit = ChartWindow::CalendarMonth.bucket_limit(today);

        assert_eq!(window_buckets(create_daily_buckets(40), limit).len(), 29);
        assert_eq!(window_buckets(create_daily_buckets(5), limit).len(), 5);
    }

    #[test]
    fn default_window_is_seven_buckets() {
        assert_eq!(ChartWindow::default(), ChartWindow::Fixed(7));
    }

    #[test]
    fn short_label_keeps_first_two_components() {
        assert_eq!(short_date_label("1/5/2024"), "1/5");
        assert_eq!(short_date_label("12/31"), "12/31");
        assert_eq!(short_date_label("2024-01-05"), "2024-01-05");
        assert_eq!(short_date_label(""), "");
    }

    #[test]
    fn parses_supported_date_formats() {
        assert_eq!(parse_date("1/5/2024"), Some(date!(2024 - 01 - 05)));
        assert_eq!(parse_date("01/05/24"), Some(date!(2024 - 01 - 05)));
        assert_eq!(parse_date("12/31/99"), Some(date!(1999 - 12 - 31)));
        assert_eq!(parse_date("2024-01-05"), Some(date!(2024 - 01 - 05)));
        assert_eq!(
            parse_date("2024-01-05T10:30:00.000Z"),
            Some(date!(2024 - 01 - 05))
        );
        assert_eq!(
            parse_date("1/8/2024, 10:30:00 AM"),
            Some(date!(2024 - 01 - 08))
        );
    }

    #[test]
    fn rejects_invalid_dates() {
        assert_eq!(parse_date("2/30/2024"), None);
        assert_eq!(parse_date("13/1/2024"), None);
        assert_eq!(parse_date("1/5/2024/1"), None);
        assert_eq!(parse_date("1/5/2024,"), None);
        assert_eq!(parse_date("Jan 9, 2024"), None);
        assert_eq!(parse_date("2024-01-05junk"), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn usage_percentage_and_band() {
        let usage = category_usage(&create_test_category("Food", 100.0, 40.0));

        assert_eq!(usage.used, 60.0);
        assert_eq!(usage.percentage, Some(60.0));
        assert_eq!(usage.band, UsageBand::Medium);
    }

    #[test]
    fn usage_band_thresholds_are_exclusive() {
        assert_eq!(usage_band(Some(50.0)), UsageBand::Low);
        assert_eq!(usage_band(Some(50.1)), UsageBand::Medium);
        assert_eq!(usage_band(Some(80.0)), UsageBand::Medium);
        assert_eq!(usage_band(Some(80.1)), UsageBand::High);
        assert_eq!(usage_band(None), UsageBand::Low);
    }

    #[test]
    fn usage_with_no_deposit_is_undefined() {
        let usage = category_usage(&create_test_category("Empty", 0.0, 0.0));

        assert_eq!(usage.percentage, None);
        assert_eq!(usage.band, UsageBand::Low);
        assert_eq!(usage.fill_width(), 0.0);
    }

    #[test]
    fn overspent_percentage_is_not_clamped_but_fill_is() {
        let usage = category_usage(&create_test_category("Fun", 100.0, -50.0));

        assert_eq!(usage.percentage, Some(150.0));
        assert_eq!(usage.band, UsageBand::High);
        assert_eq!(usage.fill_width(), 100.0);
    }

    #[test]
    fn negative_usage_fill_is_clamped_to_zero() {
        let usage = category_usage(&create_test_category("Refunds", 100.0, 120.0));

        assert_eq!(usage.percentage, Some(-20.0));
        assert_eq!(usage.fill_width(), 0.0);
    }

    #[test]
    fn aggregate_builds_complete_summary() {
        let categories = vec![
            create_test_category("Food", 100.0, 40.0),
            create_test_category("Rent", 500.0, 480.0),
        ];
        let expenses = vec![
            create_test_expense(10.0, "1/5/2024"),
            create_test_expense(5.0, "1/5/2024"),
            create_test_expense(7.0, "1/6/2024"),
        ];
        let deposits = vec![create_test_deposit(100.0), create_test_deposit(500.0)];

        let summary = aggregate(
            &categories,
            &expenses,
            &deposits,
            ChartWindow::default(),
            date!(2024 - 01 - 31),
        );

        assert_eq!(summary.total_balance, 520.0);
        assert_eq!(summary.total_deposits, 600.0);
        assert_eq!(summary.total_expenses, 22.0);
        assert_eq!(summary.biggest_category.unwrap().name, "Food");
        assert_eq!(summary.timeline.len(), 2);
        assert_eq!(summary.usage.len(), 2);
        assert_eq!(summary.usage[1].band, UsageBand::Low);
        assert_eq!(summary.record_count, 7);
    }

    #[test]
    fn aggregate_of_nothing_is_empty() {
        let summary = aggregate(&[], &[], &[], ChartWindow::default(), date!(2024 - 01 - 31));

        assert!(summary.is_empty());
        assert_eq!(summary.total_balance, 0.0);
        assert_eq!(summary.total_deposits, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.biggest_category, None);
        assert!(summary.timeline.is_empty());
    }

    #[test]
    fn aggregate_is_deterministic() {
        let categories = vec![create_test_category("Food", 100.0, 40.0)];
        let expenses = vec![
            create_test_expense(3.0, "2/1/2024"),
            create_test_expense(4.0, "1/1/2024"),
            create_test_expense(5.0, "junk"),
        ];
        let today = date!(2024 - 02 - 02);

        let first = aggregate(&categories, &expenses, &[], ChartWindow::CalendarMonth, today);
        let second = aggregate(&categories, &expenses, &[], ChartWindow::CalendarMonth, today);

        assert_eq!(first, second);
    }
}
