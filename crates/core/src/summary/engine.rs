//! Weekly summary composition.

use std::borrow::Borrow;

use rayon::prelude::*;
use rust_decimal::Decimal;
use tillbook_shared::config::EngineConfig;
use tillbook_shared::types::Money;
use tracing::debug;

use super::types::{BreakdownItem, BreakdownRow, DayCash, DayDifference, WeeklySummary};
use crate::closing::{ClosingReconciler, ClosingRecord, Day, DifferenceStatus};
use crate::expenses::{OtherExpenseRecord, OtherExpenses};
use crate::loans::{LoanLedger, LoanRecord};
use crate::products::{ProductLedger, ProductRecord};
use crate::week::WeekRecords;

/// Builds the weekly balance from a week's records.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeeklySummaryEngine {
    loans: LoanLedger,
}

impl WeeklySummaryEngine {
    /// Creates an engine from configuration.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self {
            loans: LoanLedger::new(config.unknown_loan_type),
        }
    }

    /// Loan ledger used for per-person balances.
    #[must_use]
    pub const fn loan_ledger(&self) -> LoanLedger {
        self.loans
    }

    /// Summarizes one week's records.
    ///
    /// A negative loan net is money owed back to the business and is added
    /// to cash. A positive loan net is held by people and is taken out of the
    /// final balance as the sum of positive per-person nets.
    #[must_use]
    pub fn summarize(
        &self,
        closings: &[ClosingRecord],
        products: &[ProductRecord],
        other_expenses: &[OtherExpenseRecord],
        loans: &[LoanRecord],
    ) -> WeeklySummary {
        let total_cash = Money::sum(closings.iter().map(|record| record.total_cash));
        let total_products_final = ProductLedger::final_products_total(products);
        let total_other_expenses = OtherExpenses::total(other_expenses);

        let groups = self.loans.group_by_person(loans);
        let total_loans_final = self.loans.aggregate(loans).total_net;
        let positive_loans_total = LoanLedger::positive_net_sum(&groups);

        let adjusted_cash = if total_loans_final < Decimal::ZERO {
            Money::add(total_cash, total_loans_final.abs())
        } else {
            total_cash
        };
        let loans_outgoing = if total_loans_final > Decimal::ZERO {
            positive_loans_total
        } else {
            Decimal::ZERO
        };

        let breakdown = Self::breakdown(
            adjusted_cash,
            total_products_final,
            total_other_expenses,
            loans_outgoing,
        );
        let final_balance = breakdown
            .last()
            .map_or(adjusted_cash, |row| row.balance);

        let (per_day_differences, day_cash) = Self::daily_totals(closings);
        let daily_cash_total = Money::sum(day_cash.iter().map(|day| day.cash));
        let daily_difference_total =
            Money::sum(per_day_differences.iter().map(|day| day.difference));

        debug!(
            closings = closings.len(),
            products = products.len(),
            other_expenses = other_expenses.len(),
            loans = loans.len(),
            %total_cash,
            %adjusted_cash,
            %final_balance,
            "Weekly summary computed"
        );

        WeeklySummary {
            total_cash,
            total_products_final,
            total_other_expenses,
            total_loans_final,
            positive_loans_total,
            adjusted_cash,
            final_balance,
            per_person_balances: groups.sorted_by_net(),
            per_day_differences,
            day_cash,
            daily_cash_total,
            daily_difference_total,
            breakdown,
        }
    }

    /// Summarizes a week context.
    #[must_use]
    pub fn summarize_week(&self, records: &WeekRecords) -> WeeklySummary {
        self.summarize(
            &records.closings,
            &records.products,
            &records.other_expenses,
            &records.loans,
        )
    }

    /// Summarizes several weeks in parallel, keeping input order.
    #[must_use]
    pub fn summarize_many<W>(&self, weeks: &[W]) -> Vec<WeeklySummary>
    where
        W: Borrow<WeekRecords> + Sync,
    {
        weeks
            .par_iter()
            .map(|records| self.summarize_week(records.borrow()))
            .collect()
    }

    /// Per-day differences and cash for Saturday, Sunday and an open Monday.
    ///
    /// Each register of a day is looked up separately. A legacy record that
    /// answers for several registers is counted once.
    fn daily_totals(closings: &[ClosingRecord]) -> (Vec<DayDifference>, Vec<DayCash>) {
        let mut differences = Vec::new();
        let mut cash = Vec::new();

        for day in Day::TRADING_DAYS {
            let mut found: Vec<&ClosingRecord> = Vec::new();
            for register in 1..=day.register_count() {
                if let Some(record) = ClosingReconciler::lookup(closings, &day, register) {
                    if !found.iter().any(|seen| std::ptr::eq(*seen, record)) {
                        found.push(record);
                    }
                }
            }

            if day == Day::Monday && found.is_empty() {
                continue;
            }

            let difference = Money::sum(
                found
                    .iter()
                    .map(|record| ClosingReconciler::difference(record)),
            );
            differences.push(DayDifference {
                day: day.clone(),
                difference,
                status: DifferenceStatus::of(difference),
            });
            cash.push(DayCash {
                day,
                cash: Money::sum(found.iter().map(|record| record.total_cash)),
                closings: found.len(),
            });
        }

        (differences, cash)
    }

    fn breakdown(
        adjusted_cash: Decimal,
        products: Decimal,
        other_expenses: Decimal,
        positive_loans: Decimal,
    ) -> Vec<BreakdownRow> {
        let mut balance = adjusted_cash;
        let mut rows = vec![BreakdownRow {
            item: BreakdownItem::AdjustedCash,
            amount: adjusted_cash,
            balance,
        }];

        for (item, amount) in [
            (BreakdownItem::Products, products),
            (BreakdownItem::OtherExpenses, other_expenses),
            (BreakdownItem::PositiveLoans, positive_loans),
        ] {
            balance = Money::sub(balance, amount);
            rows.push(BreakdownRow {
                item,
                amount,
                balance,
            });
        }

        rows.push(BreakdownRow {
            item: BreakdownItem::FinalBalance,
            amount: balance,
            balance,
        });
        rows
    }
}
