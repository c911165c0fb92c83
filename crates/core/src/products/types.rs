//! Product line types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::{Money, ProductId, WeekId, lenient, optional_id};

/// One product-table row for the week.
///
/// A row with `pounds > 0` is a real product sale. A row with no pounds is a
/// standalone expense whose value lives in `unit_price`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Store key.
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<ProductId>,
    /// Week the row belongs to.
    #[serde(default, alias = "semana_id", deserialize_with = "optional_id")]
    pub week_id: Option<WeekId>,
    /// Product name, or the expense concept for standalone expenses.
    #[serde(default, alias = "nombre", deserialize_with = "lenient::string")]
    pub name: String,
    /// Price per pound, or the expense value for standalone expenses.
    #[serde(default, alias = "precio_unitario", deserialize_with = "lenient::decimal")]
    pub unit_price: Decimal,
    /// Pounds sold.
    #[serde(default, alias = "libras", deserialize_with = "lenient::decimal")]
    pub pounds: Decimal,
    /// Deduction against this product's gross total (spoilage and the like).
    #[serde(default, alias = "gasto", deserialize_with = "lenient::decimal")]
    pub expense: Decimal,
}

impl ProductRecord {
    /// Creates a product sale row.
    #[must_use]
    pub fn sale(name: impl Into<String>, unit_price: Decimal, pounds: Decimal) -> Self {
        Self {
            name: name.into(),
            unit_price,
            pounds,
            ..Self::default()
        }
    }

    /// Creates a standalone expense row.
    #[must_use]
    pub fn standalone_expense(concept: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: concept.into(),
            unit_price: amount,
            ..Self::default()
        }
    }

    /// Sets the deduction applied to this product.
    #[must_use]
    pub fn with_expense(mut self, expense: Decimal) -> Self {
        self.expense = expense;
        self
    }

    /// Whether this row is a real product sale.
    #[must_use]
    pub fn is_product(&self) -> bool {
        self.pounds > Decimal::ZERO
    }

    /// `unit_price * pounds`, saturating at the `Decimal` range.
    #[must_use]
    pub fn gross_total(&self) -> Decimal {
        Money::mul(self.unit_price, self.pounds)
    }

    /// `gross_total - expense`.
    #[must_use]
    pub fn final_total(&self) -> Decimal {
        Money::sub(self.gross_total(), self.expense)
    }
}

/// A week's rows split into product sales and standalone expenses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPartition<'a> {
    /// Rows with `pounds > 0`, in input order.
    pub products: Vec<&'a ProductRecord>,
    /// Remaining rows, in input order.
    pub expenses: Vec<&'a ProductRecord>,
}

/// Display line for a product sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    /// Product name.
    pub name: String,
    /// Price per pound.
    pub unit_price: Decimal,
    /// Pounds sold.
    pub pounds: Decimal,
    /// `unit_price * pounds`.
    pub gross_total: Decimal,
    /// Deduction applied to the product.
    pub expense: Decimal,
    /// `gross_total - expense`.
    pub final_total: Decimal,
}

/// Display line for a standalone expense row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandaloneExpenseLine {
    /// Expense concept.
    pub name: String,
    /// Expense value.
    pub amount: Decimal,
}

/// Product totals for a week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTotals {
    /// Product sale lines.
    pub products: Vec<ProductLine>,
    /// Standalone expense lines.
    pub expenses: Vec<StandaloneExpenseLine>,
    /// Sum of gross totals over product sales.
    pub gross_total: Decimal,
    /// Sum of deductions embedded in product sales.
    pub expense_deductions: Decimal,
    /// Sum of standalone expense values.
    pub standalone_expenses_total: Decimal,
    /// `gross_total - expense_deductions - standalone_expenses_total`.
    pub final_total: Decimal,
}
