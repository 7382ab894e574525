use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use budget_dashboard::{
    CATEGORIES_KEY, Category, DEPOSITS_KEY, Deposit, EXPENSES_KEY, Expense, initialize_db,
    set_records,
};

/// A utility for creating a test database for the budget dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let today = OffsetDateTime::now_utc().date();

    println!("Creating categories...");
    let categories = [
        ("Groceries", 600.0, 212.4),
        ("Rent", 1800.0, 0.0),
        ("Transport", 250.0, 160.0),
        ("Fun", 150.0, -35.5),
        ("Savings", 1000.0, 1000.0),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (name, deposit, balance))| Category {
        id: format!("category-{index}"),
        name: name.to_owned(),
        deposit,
        balance,
    })
    .collect::<Vec<_>>();
    set_records(CATEGORIES_KEY, &categories, &conn)?;

    println!("Creating deposits...");
    let deposits = categories
        .iter()
        .enumerate()
        .map(|(index, category)| Deposit {
            id: format!("deposit-{index}"),
            category_name: category.name.clone(),
            amount: category.deposit,
            date: month_day_year(today - Duration::days(30)),
        })
        .collect::<Vec<_>>();
    set_records(DEPOSITS_KEY, &deposits, &conn)?;

    println!("Creating expenses...");
    let expenses = [
        ("Weekly shop", 120.3, "Groceries", 1),
        ("Top up", 45.0, "Groceries", 3),
        ("Weekly shop", 142.8, "Groceries", 8),
        ("Farmers market", 79.5, "Groceries", 12),
        ("Monthly rent", 1800.0, "Rent", 20),
        ("Bus card", 40.0, "Transport", 2),
        ("Fuel", 50.0, "Transport", 9),
        ("Concert tickets", 120.0, "Fun", 5),
        ("Dinner out", 65.5, "Fun", 0),
        // Refers to a category that has since been deleted.
        ("Gym", 30.0, "Health", 4),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (name, amount, category_name, days_ago))| Expense {
        id: format!("expense-{index}"),
        name: name.to_owned(),
        amount,
        category_name: category_name.to_owned(),
        date: month_day_year(today - Duration::days(days_ago)),
    })
    .collect::<Vec<_>>();
    set_records(EXPENSES_KEY, &expenses, &conn)?;

    println!("Success!");

    Ok(())
}

/// Format a date the way the budgeting app stores it, e.g. "1/5/2024".
fn month_day_year(date: Date) -> String {
    format!("{}/{}/{}", date.month() as u8, date.day(), date.year())
}
