//! Product sales and standalone expense totals.

use rust_decimal::Decimal;
use tillbook_shared::types::Money;

use super::types::{
    ProductLine, ProductPartition, ProductRecord, ProductTotals, StandaloneExpenseLine,
};

/// Computes product totals for a week.
pub struct ProductLedger;

impl ProductLedger {
    /// Splits rows into product sales (`pounds > 0`) and standalone expenses.
    ///
    /// Every row lands in exactly one side; input order is kept on both.
    #[must_use]
    pub fn partition(records: &[ProductRecord]) -> ProductPartition<'_> {
        let (products, expenses) = records.iter().partition(|record| record.is_product());
        ProductPartition { products, expenses }
    }

    /// Sum of `unit_price * pounds` over product sales.
    #[must_use]
    pub fn gross_total(products: &[&ProductRecord]) -> Decimal {
        Money::sum(products.iter().map(|record| record.gross_total()))
    }

    /// Sum of per-product deductions.
    #[must_use]
    pub fn expense_deductions(products: &[&ProductRecord]) -> Decimal {
        Money::sum(products.iter().map(|record| record.expense))
    }

    /// Sum of standalone expense values (held in `unit_price`).
    #[must_use]
    pub fn standalone_expenses_total(expenses: &[&ProductRecord]) -> Decimal {
        Money::sum(expenses.iter().map(|record| record.unit_price))
    }

    /// `gross_total - expense_deductions - standalone_expenses_total`.
    #[must_use]
    pub fn final_products_total(records: &[ProductRecord]) -> Decimal {
        let partition = Self::partition(records);
        Money::sub(
            Money::sub(
                Self::gross_total(&partition.products),
                Self::expense_deductions(&partition.products),
            ),
            Self::standalone_expenses_total(&partition.expenses),
        )
    }

    /// Builds the display lines and totals for both product tables.
    #[must_use]
    pub fn summarize(records: &[ProductRecord]) -> ProductTotals {
        let partition = Self::partition(records);

        let gross_total = Self::gross_total(&partition.products);
        let expense_deductions = Self::expense_deductions(&partition.products);
        let standalone_expenses_total = Self::standalone_expenses_total(&partition.expenses);

        let products = partition
            .products
            .iter()
            .map(|record| ProductLine {
                name: record.name.clone(),
                unit_price: record.unit_price,
                pounds: record.pounds,
                gross_total: record.gross_total(),
                expense: record.expense,
                final_total: record.final_total(),
            })
            .collect();

        let expenses = partition
            .expenses
            .iter()
            .map(|record| StandaloneExpenseLine {
                name: record.name.clone(),
                amount: record.unit_price,
            })
            .collect();

        ProductTotals {
            products,
            expenses,
            gross_total,
            expense_deductions,
            standalone_expenses_total,
            final_total: Money::sub(
                Money::sub(gross_total, expense_deductions),
                standalone_expenses_total,
            ),
        }
    }
}
