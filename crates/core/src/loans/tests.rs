//! Tests for the loan ledger.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tillbook_shared::config::UnknownLoanTypePolicy;

use super::ledger::LoanLedger;
use super::types::{LoanRecord, LoanType, Standing, UNASSIGNED};

fn scenario_e() -> Vec<LoanRecord> {
    vec![
        LoanRecord::loan("Ana", "Anticipo", dec!(100000)),
        LoanRecord::expense("Ana", "Hielo", dec!(30000)),
        LoanRecord::expense("Luis", "Gas", dec!(50000)),
    ]
}

#[test]
fn test_scenario_e_grouping() {
    let ledger = LoanLedger::default();
    let grouped = ledger.group_by_person(&scenario_e());

    let ana = grouped.get("Ana").unwrap();
    assert_eq!(ana.loans, dec!(100000));
    assert_eq!(ana.expenses, dec!(30000));
    assert_eq!(ana.net, dec!(70000));
    assert_eq!(ana.standing(), Standing::Holds);

    let luis = grouped.get("Luis").unwrap();
    assert_eq!(luis.loans, Decimal::ZERO);
    assert_eq!(luis.expenses, dec!(50000));
    assert_eq!(luis.net, dec!(-50000));
    assert_eq!(luis.standing(), Standing::Owes);

    assert_eq!(LoanLedger::positive_net_sum(&grouped), dec!(70000));
}

#[test]
fn test_scenario_e_aggregate() {
    let totals = LoanLedger::default().aggregate(&scenario_e());
    assert_eq!(totals.total_loans, dec!(100000));
    assert_eq!(totals.total_expenses, dec!(80000));
    assert_eq!(totals.total_net, dec!(20000));
}

#[test]
fn test_blank_person_is_unassigned() {
    let records = vec![
        LoanRecord::loan("", "x", dec!(10)),
        LoanRecord::loan("   ", "y", dec!(5)),
    ];
    let grouped = LoanLedger::default().group_by_person(&records);

    assert_eq!(grouped.len(), 1);
    let unassigned = grouped.get(UNASSIGNED).unwrap();
    assert_eq!(unassigned.loans, dec!(15));
    assert_eq!(unassigned.loan_lines.len(), 2);
}

#[test]
fn test_person_names_match_case_insensitively() {
    let records = vec![
        LoanRecord::loan("Ana ", "a", dec!(10)),
        LoanRecord::expense("ANA", "b", dec!(4)),
        LoanRecord::loan("ana", "c", dec!(1)),
    ];
    let grouped = LoanLedger::default().group_by_person(&records);

    assert_eq!(grouped.len(), 1);
    let ana = grouped.iter().next().unwrap();
    assert_eq!(ana.person, "Ana");
    assert_eq!(ana.net, dec!(7));
}

#[test]
fn test_unknown_type_ignored_by_default() {
    let records = vec![
        LoanRecord {
            kind: LoanType::Unknown("Abono".to_string()),
            ..LoanRecord::loan("Ana", "?", dec!(999))
        },
        LoanRecord::loan("Ana", "a", dec!(10)),
    ];
    let ledger = LoanLedger::default();

    let totals = ledger.aggregate(&records);
    assert_eq!(totals.total_loans, dec!(10));
    assert_eq!(totals.total_expenses, Decimal::ZERO);
    assert_eq!(ledger.group_by_person(&records).get("ana").unwrap().net, dec!(10));
}

#[test]
fn test_unknown_type_counts_as_expense_when_configured() {
    let records = vec![LoanRecord {
        kind: LoanType::Unknown("Abono".to_string()),
        ..LoanRecord::loan("Ana", "?", dec!(40))
    }];
    let ledger = LoanLedger::new(UnknownLoanTypePolicy::Expense);

    let totals = ledger.aggregate(&records);
    assert_eq!(totals.total_expenses, dec!(40));
    assert_eq!(totals.total_net, dec!(-40));
    assert_eq!(ledger.expenses_by_person(&records).grand_total, dec!(40));
}

#[test]
fn test_sorted_by_net_descending_and_stable() {
    let records = vec![
        LoanRecord::loan("Ana", "a", dec!(10)),
        LoanRecord::loan("Bea", "b", dec!(50)),
        LoanRecord::loan("Carla", "c", dec!(10)),
        LoanRecord::expense("Dora", "d", dec!(5)),
    ];
    let grouped = LoanLedger::default().group_by_person(&records);
    let order: Vec<_> = grouped
        .sorted_by_net()
        .into_iter()
        .map(|balance| balance.person)
        .collect();

    assert_eq!(order, vec!["Bea", "Ana", "Carla", "Dora"]);
}

#[test]
fn test_expenses_by_person_sorted_with_grand_total() {
    let records = vec![
        LoanRecord::expense("Ana", "Hielo", dec!(30000)),
        LoanRecord::loan("Ana", "Anticipo", dec!(100000)),
        LoanRecord::expense("Luis", "Gas", dec!(50000)),
        LoanRecord::expense("ana", "Bolsas", dec!(5000)),
    ];
    let listing = LoanLedger::default().expenses_by_person(&records);

    assert_eq!(listing.people.len(), 2);
    assert_eq!(listing.people[0].person, "Luis");
    assert_eq!(listing.people[1].person, "Ana");
    assert_eq!(listing.people[1].total, dec!(35000));
    assert_eq!(listing.people[1].lines.len(), 2);
    assert_eq!(listing.grand_total, dec!(85000));
}

#[rstest]
#[case("Prestamo", LoanType::Loan)]
#[case("préstamo", LoanType::Loan)]
#[case("LOAN", LoanType::Loan)]
#[case("Gasto", LoanType::Expense)]
#[case(" expense ", LoanType::Expense)]
#[case("Abono", LoanType::Unknown("Abono".to_string()))]
fn test_loan_type_parsing(#[case] input: &str, #[case] expected: LoanType) {
    let kind: LoanType = input.parse().unwrap();
    assert_eq!(kind, expected);
}

#[test]
fn test_spanish_record_deserializes() {
    let record: LoanRecord = serde_json::from_value(json!({
        "id": "4",
        "persona": "Ana",
        "tipo": "Gasto",
        "concepto": "Hielo",
        "monto": "30000"
    }))
    .unwrap();

    assert_eq!(record.kind, LoanType::Expense);
    assert_eq!(record.person, "Ana");
    assert_eq!(record.amount, dec!(30000));
}

#[test]
fn test_missing_type_is_unknown() {
    let record: LoanRecord = serde_json::from_value(json!({ "persona": "Ana" })).unwrap();
    assert_eq!(record.kind, LoanType::Unknown(String::new()));
}

fn loan_record() -> impl Strategy<Value = LoanRecord> {
    (
        prop::sample::select(vec!["Ana", "ana", "Luis", "", "Bea"]),
        prop::bool::ANY,
        (0i64..10_000_000).prop_map(|n| Decimal::new(n, 2)),
    )
        .prop_map(|(person, is_loan, amount)| {
            if is_loan {
                LoanRecord::loan(person, "p", amount)
            } else {
                LoanRecord::expense(person, "g", amount)
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Per-person nets add up to the aggregate net.
    #[test]
    fn prop_group_nets_sum_to_aggregate(records in prop::collection::vec(loan_record(), 0..30)) {
        let ledger = LoanLedger::default();
        let grouped = ledger.group_by_person(&records);
        let net_sum: Decimal = grouped.iter().map(|balance| balance.net).sum();
        prop_assert_eq!(net_sum, ledger.aggregate(&records).total_net);
    }

    /// Positive nets never sum below the aggregate net.
    #[test]
    fn prop_positive_sum_bounds_net(records in prop::collection::vec(loan_record(), 0..30)) {
        let ledger = LoanLedger::default();
        let grouped = ledger.group_by_person(&records);
        let positive = LoanLedger::positive_net_sum(&grouped);
        prop_assert!(positive >= Decimal::ZERO);
        prop_assert!(positive >= ledger.aggregate(&records).total_net);
    }

    /// Sorting by net is a permutation in descending order.
    #[test]
    fn prop_sorted_by_net_is_descending(records in prop::collection::vec(loan_record(), 0..30)) {
        let grouped = LoanLedger::default().group_by_person(&records);
        let sorted = grouped.sorted_by_net();
        prop_assert_eq!(sorted.len(), grouped.len());
        prop_assert!(sorted.windows(2).all(|pair| pair[0].net >= pair[1].net));
    }
}
