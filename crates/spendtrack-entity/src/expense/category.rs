//! Expense category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of expense categories.
///
/// Stored in PostgreSQL as the `expense_category` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "expense_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Travel,
    Meals,
    Lodging,
    OfficeSupplies,
    Software,
    Equipment,
    Other,
}

impl ExpenseCategory {
    /// All categories, in display order.
    pub const ALL: [ExpenseCategory; 7] = [
        Self::Travel,
        Self::Meals,
        Self::Lodging,
        Self::OfficeSupplies,
        Self::Software,
        Self::Equipment,
        Self::Other,
    ];

    /// Return the category as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Meals => "meals",
            Self::Lodging => "lodging",
            Self::OfficeSupplies => "office_supplies",
            Self::Software => "software",
            Self::Equipment => "equipment",
            Self::Other => "other",
        }
    }

    /// Human-readable label for reports and CSV exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Travel => "Travel",
            Self::Meals => "Meals",
            Self::Lodging => "Lodging",
            Self::OfficeSupplies => "Office Supplies",
            Self::Software => "Software",
            Self::Equipment => "Equipment",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = spendtrack_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "travel" => Ok(Self::Travel),
            "meals" => Ok(Self::Meals),
            "lodging" => Ok(Self::Lodging),
            "office_supplies" => Ok(Self::OfficeSupplies),
            "software" => Ok(Self::Software),
            "equipment" => Ok(Self::Equipment),
            "other" => Ok(Self::Other),
            _ => Err(spendtrack_core::AppError::validation(format!(
                "Invalid expense category: '{s}'"
            ))),
        }
    }
}
