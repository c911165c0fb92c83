//! Per-person loan and expense aggregation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tillbook_shared::config::UnknownLoanTypePolicy;
use tillbook_shared::types::Money;

use super::types::{
    ConceptLine, ExpenseListing, LoanRecord, LoanTotals, LoanType, PersonBalance, PersonBalances,
    PersonExpenses,
};

/// Which bucket a record counts toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Loan,
    Expense,
}

/// Groups and totals personal loans and expenses.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoanLedger {
    policy: UnknownLoanTypePolicy,
}

impl LoanLedger {
    /// Creates a ledger with the given handling for unknown record types.
    #[must_use]
    pub const fn new(policy: UnknownLoanTypePolicy) -> Self {
        Self { policy }
    }

    /// Policy applied to unrecognised record types.
    #[must_use]
    pub const fn policy(&self) -> UnknownLoanTypePolicy {
        self.policy
    }

    fn side(&self, kind: &LoanType) -> Option<Side> {
        match (kind, self.policy) {
            (LoanType::Loan, _) => Some(Side::Loan),
            (LoanType::Expense, _) | (LoanType::Unknown(_), UnknownLoanTypePolicy::Expense) => {
                Some(Side::Expense)
            }
            (LoanType::Unknown(_), UnknownLoanTypePolicy::Ignore) => None,
        }
    }

    /// Per-person totals in first-seen order.
    ///
    /// Names are matched trimmed and case-insensitively; the first spelling
    /// seen is the one displayed. Blank names group under "Unassigned".
    /// Records of an ignored type still register the person.
    #[must_use]
    pub fn group_by_person(&self, records: &[LoanRecord]) -> PersonBalances {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut balances: Vec<PersonBalance> = Vec::new();

        for record in records {
            let slot = *index.entry(record.person_key()).or_insert_with(|| {
                balances.push(PersonBalance::new(record.display_person()));
                balances.len() - 1
            });
            let balance = &mut balances[slot];

            let line = ConceptLine {
                concept: record.concept.clone(),
                amount: record.amount,
            };
            match self.side(&record.kind) {
                Some(Side::Loan) => {
                    balance.loans = Money::add(balance.loans, record.amount);
                    balance.loan_lines.push(line);
                }
                Some(Side::Expense) => {
                    balance.expenses = Money::add(balance.expenses, record.amount);
                    balance.expense_lines.push(line);
                }
                None => {}
            }
            balance.net = Money::sub(balance.loans, balance.expenses);
        }

        PersonBalances::from_vec(balances)
    }

    /// Week-wide loan and expense totals.
    #[must_use]
    pub fn aggregate(&self, records: &[LoanRecord]) -> LoanTotals {
        let total_loans = self.sum_side(records, Side::Loan);
        let total_expenses = self.sum_side(records, Side::Expense);

        LoanTotals {
            total_loans,
            total_expenses,
            total_net: Money::sub(total_loans, total_expenses),
        }
    }

    /// Sum of the nets of people who hold money (`net > 0`).
    #[must_use]
    pub fn positive_net_sum(grouped: &PersonBalances) -> Decimal {
        Money::sum(
            grouped
                .iter()
                .map(|balance| balance.net)
                .filter(|net| *net > Decimal::ZERO),
        )
    }

    /// Expense records grouped by person, largest total first.
    ///
    /// Ties keep first-seen order.
    #[must_use]
    pub fn expenses_by_person(&self, records: &[LoanRecord]) -> ExpenseListing {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut people: Vec<PersonExpenses> = Vec::new();

        for record in records
            .iter()
            .filter(|record| self.side(&record.kind) == Some(Side::Expense))
        {
            let slot = *index.entry(record.person_key()).or_insert_with(|| {
                people.push(PersonExpenses {
                    person: record.display_person().to_string(),
                    total: Decimal::ZERO,
                    lines: Vec::new(),
                });
                people.len() - 1
            });
            let entry = &mut people[slot];
            entry.total = Money::add(entry.total, record.amount);
            entry.lines.push(ConceptLine {
                concept: record.concept.clone(),
                amount: record.amount,
            });
        }

        people.sort_by(|a, b| b.total.cmp(&a.total));
        let grand_total = Money::sum(people.iter().map(|entry| entry.total));

        ExpenseListing {
            people,
            grand_total,
        }
    }

    fn sum_side(&self, records: &[LoanRecord], side: Side) -> Decimal {
        Money::sum(
            records
                .iter()
                .filter(|record| self.side(&record.kind) == Some(side))
                .map(|record| record.amount),
        )
    }
}
