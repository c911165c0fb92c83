//! Property tests for closing reconciliation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::reconciler::{ClosingReconciler, DifferenceStatus};
use super::types::{ClosingLoan, ClosingRecord, Day};

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|n| Decimal::new(n, 2))
}

fn closing_without_loans() -> impl Strategy<Value = ClosingRecord> {
    (amount(), amount(), amount(), amount(), amount(), amount()).prop_map(
        |(total_cash, base, sales, vouchers, carry_over, other)| ClosingRecord {
            total_cash,
            base,
            sales,
            vouchers,
            carry_over,
            other,
            ..ClosingRecord::new(Day::Saturday, 1)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Without loans the difference is counted cash minus concepts.
    #[test]
    fn prop_difference_without_loans(record in closing_without_loans()) {
        prop_assert_eq!(
            ClosingReconciler::difference(&record),
            record.total_cash - ClosingReconciler::concepts_total(&record)
        );
    }

    /// Cash equal to the concepts always reconciles.
    #[test]
    fn prop_exact_cash_reconciles(record in closing_without_loans()) {
        let record = ClosingRecord {
            total_cash: record.base + record.carry_over + record.sales + record.vouchers + record.other,
            ..record
        };
        let summary = ClosingReconciler::reconcile(Some(&record));
        prop_assert_eq!(summary.difference, Decimal::ZERO);
        prop_assert_eq!(summary.status, DifferenceStatus::Balanced);
    }

    /// Every loan raises the difference by exactly its amount.
    #[test]
    fn prop_loans_are_added_back(
        record in closing_without_loans(),
        loans in prop::collection::vec(amount(), 1..8),
    ) {
        let base_difference = ClosingReconciler::difference(&record);
        let loan_sum: Decimal = loans.iter().copied().sum();
        let record = ClosingRecord {
            loans: loans
                .into_iter()
                .map(|amount| ClosingLoan { concept: String::new(), amount })
                .collect(),
            ..record
        };
        prop_assert_eq!(ClosingReconciler::difference(&record), base_difference + loan_sum);
    }

    /// Reconciling the same record twice yields identical output.
    #[test]
    fn prop_reconcile_is_idempotent(record in closing_without_loans()) {
        let first = ClosingReconciler::reconcile(Some(&record));
        let second = ClosingReconciler::reconcile(Some(&record));
        prop_assert_eq!(first, second);
    }
}
