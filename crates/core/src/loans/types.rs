//! Personal loan and expense types.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tillbook_shared::types::{LoanId, WeekId, lenient, optional_id};

/// Display name for records without a person.
pub const UNASSIGNED: &str = "Unassigned";

/// Direction of a personal money movement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoanType {
    /// Money lent to the person.
    Loan,
    /// Money the person spent on the business' behalf.
    Expense,
    /// Any other type found in the store.
    Unknown(String),
}

impl Default for LoanType {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loan => write!(f, "Loan"),
            Self::Expense => write!(f, "Expense"),
            Self::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

impl std::str::FromStr for LoanType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "loan" | "prestamo" | "préstamo" => Self::Loan,
            "expense" | "gasto" => Self::Expense,
            _ => Self::Unknown(s.trim().to_string()),
        })
    }
}

impl Serialize for LoanType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LoanType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = lenient::string(deserializer)?;
        let Ok(kind) = text.parse::<LoanType>();
        Ok(kind)
    }
}

/// One loan or expense attributed to a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    /// Store key.
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<LoanId>,
    /// Week the record belongs to.
    #[serde(default, alias = "semana_id", deserialize_with = "optional_id")]
    pub week_id: Option<WeekId>,
    /// Person the money moved to or from.
    #[serde(default, alias = "persona", deserialize_with = "lenient::string")]
    pub person: String,
    /// Loan or expense.
    #[serde(default, alias = "tipo", alias = "type")]
    pub kind: LoanType,
    /// What the money was for.
    #[serde(default, alias = "concepto", deserialize_with = "lenient::string")]
    pub concept: String,
    /// Amount moved.
    #[serde(default, alias = "monto", deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
}

impl LoanRecord {
    /// Creates a loan to `person`.
    #[must_use]
    pub fn loan(person: impl Into<String>, concept: impl Into<String>, amount: Decimal) -> Self {
        Self {
            person: person.into(),
            kind: LoanType::Loan,
            concept: concept.into(),
            amount,
            ..Self::default()
        }
    }

    /// Creates an expense paid by `person`.
    #[must_use]
    pub fn expense(person: impl Into<String>, concept: impl Into<String>, amount: Decimal) -> Self {
        Self {
            kind: LoanType::Expense,
            ..Self::loan(person, concept, amount)
        }
    }

    /// Trimmed person name, or [`UNASSIGNED`] when blank.
    #[must_use]
    pub fn display_person(&self) -> &str {
        match self.person.trim() {
            "" => UNASSIGNED,
            name => name,
        }
    }

    /// Case-insensitive grouping key for the person.
    #[must_use]
    pub fn person_key(&self) -> String {
        self.display_person().to_lowercase()
    }
}

/// A concept and amount shown under a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptLine {
    /// What the money was for.
    pub concept: String,
    /// Amount moved.
    pub amount: Decimal,
}

/// Where a person stands at the end of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// Expenses exceed loans.
    Owes,
    /// Loans and expenses cancel out.
    Settled,
    /// Loans exceed expenses.
    Holds,
}

/// Loan and expense totals for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonBalance {
    /// Display name (first spelling seen).
    pub person: String,
    /// Sum of loans.
    pub loans: Decimal,
    /// Sum of expenses.
    pub expenses: Decimal,
    /// `loans - expenses`.
    pub net: Decimal,
    /// Individual loans, in input order.
    pub loan_lines: Vec<ConceptLine>,
    /// Individual expenses, in input order.
    pub expense_lines: Vec<ConceptLine>,
}

impl PersonBalance {
    /// Creates an empty balance for a person.
    #[must_use]
    pub fn new(person: impl Into<String>) -> Self {
        Self {
            person: person.into(),
            loans: Decimal::ZERO,
            expenses: Decimal::ZERO,
            net: Decimal::ZERO,
            loan_lines: Vec::new(),
            expense_lines: Vec::new(),
        }
    }

    /// Classifies the net balance.
    #[must_use]
    pub fn standing(&self) -> Standing {
        match self.net.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Less => Standing::Owes,
            std::cmp::Ordering::Equal => Standing::Settled,
            std::cmp::Ordering::Greater => Standing::Holds,
        }
    }
}

/// Per-person balances in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonBalances {
    balances: Vec<PersonBalance>,
}

impl PersonBalances {
    pub(crate) fn from_vec(balances: Vec<PersonBalance>) -> Self {
        Self { balances }
    }

    /// Finds a person's balance, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn get(&self, person: &str) -> Option<&PersonBalance> {
        let key = match person.trim() {
            "" => UNASSIGNED.to_lowercase(),
            name => name.to_lowercase(),
        };
        self.balances
            .iter()
            .find(|balance| balance.person.to_lowercase() == key)
    }

    /// Balances in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, PersonBalance> {
        self.balances.iter()
    }

    /// Number of people.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Whether no person has any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Display order: net descending, first-seen order on ties.
    #[must_use]
    pub fn sorted_by_net(&self) -> Vec<PersonBalance> {
        let mut sorted = self.balances.clone();
        sorted.sort_by(|a, b| b.net.cmp(&a.net));
        sorted
    }
}

impl<'a> IntoIterator for &'a PersonBalances {
    type Item = &'a PersonBalance;
    type IntoIter = std::slice::Iter<'a, PersonBalance>;

    fn into_iter(self) -> Self::IntoIter {
        self.balances.iter()
    }
}

/// Week-wide loan totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTotals {
    /// Sum of all loans.
    pub total_loans: Decimal,
    /// Sum of all expenses.
    pub total_expenses: Decimal,
    /// `total_loans - total_expenses`.
    pub total_net: Decimal,
}

/// Expenses paid by one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonExpenses {
    /// Display name (first spelling seen).
    pub person: String,
    /// Sum of the person's expenses.
    pub total: Decimal,
    /// Individual expenses, in input order.
    pub lines: Vec<ConceptLine>,
}

/// Expense records grouped by person, largest total first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseListing {
    /// One entry per person with at least one expense.
    pub people: Vec<PersonExpenses>,
    /// Sum over every person.
    pub grand_total: Decimal,
}
