mod support;

use std::sync::Arc;

use chrono::NaiveDate;
use ledger_api::domain::account::{AccountInfo, AccountKind, AccountStatus, DrCrFlag};
use ledger_api::service::bod_service::BodService;
use ledger_db::models::transaction::TransactionLegModel;
use ledger_api::domain::balance::AccountBalanceRow;
use ledger_logic::services::BodServiceImpl;
use rust_decimal_macros::dec;
use support::mock_repositories::{MockAccountRegistry, MockBalanceQuery, MockBalanceStore, MockChartOfAccounts, MockSystemClock, MockTransactionRepository};

fn office_account(account_no: &str, gl_num: &str) -> AccountInfo {
    AccountInfo {
        account_no: account_no.to_string(),
        kind: AccountKind::Office,
        gl_num: gl_num.to_string(),
        status: AccountStatus::Active,
        loan_limit: rust_decimal::Decimal::ZERO,
        opening_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        closure_date: None,
    }
}

fn future_leg(tran_id: &str, line_no: i32, account_no: &str, flag: DrCrFlag, value_date: NaiveDate, amount: rust_decimal::Decimal) -> TransactionLegModel {
    TransactionLegModel {
        tran_id: tran_id.to_string(),
        line_no,
        tran_date: value_date,
        value_date,
        account_no: account_no.to_string(),
        dr_cr_flag: flag.as_str().to_string(),
        currency: "XAF".to_string(),
        fcy_amount: amount,
        exchange_rate: rust_decimal::Decimal::ONE,
        lcy_amount: amount,
        narration: "standing order".to_string(),
        tran_status: "Future".to_string(),
        pointing_id: None,
        created_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn promotes_every_leg_whose_value_date_has_matured() {
    let run_date = NaiveDate::from_ymd_opt(2026, 5, 2).unwrap();
    let due_date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();

    let transaction_repository = Arc::new(MockTransactionRepository::default());
    transaction_repository
        .legs
        .lock()
        .unwrap()
        .push(future_leg("T20260501000001111-1", 1, "1100001000001", DrCrFlag::D, due_date, dec!(25.00)));
    transaction_repository
        .legs
        .lock()
        .unwrap()
        .push(future_leg("T20260501000001111-2", 2, "1100002000001", DrCrFlag::C, due_date, dec!(25.00)));

    let account_registry = Arc::new(
        MockAccountRegistry::default()
            .with_account(office_account("1100001000001", "110101000"))
            .with_account(office_account("1100002000001", "210101000")),
    );
    let balance_store =
        Arc::new(MockBalanceStore::new(run_date).with_account_row(AccountBalanceRow::new_zero("1100001000001", run_date, dec!(100.00), chrono::Utc::now())));
    let balance_query = Arc::new(MockBalanceQuery::new());
    let chart_of_accounts = Arc::new(MockChartOfAccounts::default());
    let clock = Arc::new(MockSystemClock::new(run_date));

    let service = BodServiceImpl::new(transaction_repository.clone(), account_registry, balance_store, balance_query, chart_of_accounts, clock);
    let summary = service.promote_future_dated().await.expect("promote_future_dated failed");

    assert_eq!(summary.pending_before, 2);
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.pending_after, 0);
    assert!(summary.errors.is_empty());

    let legs = transaction_repository.legs.lock().unwrap();
    assert!(legs.iter().all(|l| l.tran_status == "Posted"));
    assert_eq!(transaction_repository.movements.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn a_failure_on_one_leg_does_not_roll_back_legs_already_promoted() {
    let run_date = NaiveDate::from_ymd_opt(2026, 5, 2).unwrap();
    let due_date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();

    let transaction_repository = Arc::new(MockTransactionRepository::default());
    transaction_repository
        .legs
        .lock()
        .unwrap()
        .push(future_leg("T20260501000002222-1", 1, "1100001000001", DrCrFlag::D, due_date, dec!(10.00)));
    transaction_repository
        .legs
        .lock()
        .unwrap()
        .push(future_leg("T20260501000002222-2", 2, "9999999999999", DrCrFlag::C, due_date, dec!(10.00)));

    // Only the first leg's account is registered; the second resolves to
    // AccountNotFound, mirroring a stale or deleted office account.
    let account_registry = Arc::new(MockAccountRegistry::default().with_account(office_account("1100001000001", "110101000")));
    let balance_store =
        Arc::new(MockBalanceStore::new(run_date).with_account_row(AccountBalanceRow::new_zero("1100001000001", run_date, dec!(100.00), chrono::Utc::now())));
    let balance_query = Arc::new(MockBalanceQuery::new());
    let chart_of_accounts = Arc::new(MockChartOfAccounts::default());
    let clock = Arc::new(MockSystemClock::new(run_date));

    let service = BodServiceImpl::new(transaction_repository.clone(), account_registry, balance_store, balance_query, chart_of_accounts, clock);
    let summary = service.promote_future_dated().await.expect("promote_future_dated failed");

    assert_eq!(summary.pending_before, 2);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.pending_after, 1);
    assert_eq!(summary.errors.len(), 1);

    let legs = transaction_repository.legs.lock().unwrap();
    let promoted = legs.iter().find(|l| l.account_no == "1100001000001").unwrap();
    assert_eq!(promoted.tran_status, "Posted");
    let stuck = legs.iter().find(|l| l.account_no == "9999999999999").unwrap();
    assert_eq!(stuck.tran_status, "Future");
}

#[tokio::test]
async fn no_future_legs_due_is_a_clean_no_op() {
    let run_date = NaiveDate::from_ymd_opt(2026, 5, 2).unwrap();
    let transaction_repository = Arc::new(MockTransactionRepository::default());
    let account_registry = Arc::new(MockAccountRegistry::default());
    let balance_store = Arc::new(MockBalanceStore::new(run_date));
    let balance_query = Arc::new(MockBalanceQuery::new());
    let chart_of_accounts = Arc::new(MockChartOfAccounts::default());
    let clock = Arc::new(MockSystemClock::new(run_date));

    let service = BodServiceImpl::new(transaction_repository, account_registry, balance_store, balance_query, chart_of_accounts, clock);
    let summary = service.promote_future_dated().await.expect("promote_future_dated failed");

    assert_eq!(summary.pending_before, 0);
    assert_eq!(summary.processed, 0);
    assert_eq!(summary.pending_after, 0);
    assert!(summary.errors.is_empty());
}
