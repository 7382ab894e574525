//! The budget records read by the dashboard.
//!
//! Records are owned by other parts of the app and stored as JSON arrays in
//! the key-value store, one key per record type. Field names follow the
//! stored JSON, e.g. `categoryName`.

use serde::{Deserialize, Serialize};

/// The storage key for the list of [Category] records.
pub const CATEGORIES_KEY: &str = "categories";
/// The storage key for the list of [Expense] records.
pub const EXPENSES_KEY: &str = "expenses";
/// The storage key for the list of [Deposit] records.
pub const DEPOSITS_KEY: &str = "deposits";

/// Every key the dashboard reads, in the order they are loaded.
pub const RECORD_KEYS: [&str; 3] = [CATEGORIES_KEY, EXPENSES_KEY, DEPOSITS_KEY];

/// A budget bucket that money is deposited into and spent from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The unique ID of the category.
    pub id: String,
    /// The display name.
    pub name: String,
    /// The total amount ever deposited into the category.
    pub deposit: f64,
    /// The amount currently remaining.
    pub balance: f64,
}

impl Category {
    /// The amount spent from the category, `deposit - balance`.
    pub fn spent(&self) -> f64 {
        self.deposit - self.balance
    }
}

/// Money spent, loosely associated with a category by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The unique ID of the expense.
    pub id: String,
    /// What the money was spent on.
    pub name: String,
    /// The amount spent.
    pub amount: f64,
    /// The name of the category the expense was recorded against.
    ///
    /// The category may have since been deleted or renamed.
    pub category_name: String,
    /// The date of the expense as entered, e.g. "1/5/2024".
    pub date: String,
}

/// Money added to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    /// The unique ID of the deposit.
    pub id: String,
    /// The name of the category the deposit was recorded against.
    pub category_name: String,
    /// The amount deposited.
    pub amount: f64,
    /// The date of the deposit as entered.
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::{Category, Expense};

    #[test]
    fn spent_is_deposit_minus_balance() {
        let category = Category {
            id: "1".to_owned(),
            name: "Food".to_owned(),
            deposit: 100.0,
            balance: 40.0,
        };

        assert_eq!(category.spent(), 60.0);
    }

    #[test]
    fn expense_uses_camel_case_field_names() {
        let json = r#"{"id":"e1","name":"Lunch","amount":12.5,"categoryName":"Food","date":"1/5/2024"}"#;

        let expense: Expense = serde_json::from_str(json).unwrap();

        assert_eq!(expense.category_name, "Food");
        assert_eq!(expense.amount, 12.5);
    }
}
