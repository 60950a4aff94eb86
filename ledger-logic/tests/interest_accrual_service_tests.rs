mod support;

use std::sync::Arc;

use chrono::NaiveDate;
use ledger_api::domain::interest::generate_accr_tran_id;
use ledger_api::service::interest_accrual_service::InterestAccrualService;
use ledger_db::models::account::{AccountModel, InterestRateModel, SubProductModel};
use ledger_db::models::balance::AccountBalanceModel;
use ledger_db::repository::BalanceRepository;
use ledger_logic::services::InterestAccrualServiceImpl;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use support::mock_repositories::{MockAccountRepository, MockBalanceRepository};

fn running_liability_account(account_no: &str, sub_product_code: &str) -> AccountModel {
    AccountModel {
        account_no: account_no.to_string(),
        is_customer: true,
        customer_id: Some("C0001".to_string()),
        gl_num: "110101000".to_string(),
        sub_product_code: Some(sub_product_code.to_string()),
        status: "Active".to_string(),
        opening_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        maturity_date: None,
        closure_date: None,
        loan_limit: Decimal::ZERO,
        fixed_rate_at_opening: None,
    }
}

fn savings_sub_product(code: &str) -> SubProductModel {
    SubProductModel {
        sub_product_code: code.to_string(),
        interest_code: Some("SVRATE".to_string()),
        interest_increment: dec!(0.50),
        receivable_gl_num: None,
        income_gl_num: None,
        payable_gl_num: Some("210301000".to_string()),
        expenditure_gl_num: Some("310401000".to_string()),
    }
}

fn balance_row(account_no: &str, accrual_date: NaiveDate, closing_bal: Decimal) -> AccountBalanceModel {
    AccountBalanceModel {
        account_no: account_no.to_string(),
        tran_date: accrual_date,
        opening_bal: closing_bal,
        dr_summation: Decimal::ZERO,
        cr_summation: Decimal::ZERO,
        closing_bal,
        current_balance: closing_bal,
        available_balance: closing_bal,
        last_updated: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn running_liability_account_accrues_rate_times_balance_over_36500() {
    let accrual_date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    let accounts = Arc::new(
        MockAccountRepository::default()
            .with_account(running_liability_account("1000000010001", "SV01"))
            .with_sub_product(savings_sub_product("SV01"))
            .with_interest_rate(InterestRateModel {
                interest_code: "SVRATE".to_string(),
                effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                interest_rate: dec!(5.00),
            }),
    );
    let balances = Arc::new(MockBalanceRepository::default());
    balances.upsert_account_row(balance_row("1000000010001", accrual_date, dec!(1000.00))).await.unwrap();
    let accruals = Arc::new(support::mock_repositories::MockInterestAccrualRepository::default());

    let service = InterestAccrualServiceImpl::new(accounts, balances, accruals.clone());
    let report = service.accrue_all(accrual_date).await.expect("accrue_all failed");

    assert_eq!(report.accounts_processed, 1);
    assert_eq!(report.accounts_skipped, 0);
    assert!(report.errors.is_empty());

    let legs = accruals.legs.lock().unwrap();
    assert_eq!(legs.len(), 2);
    let dr_leg = legs.iter().find(|l| l.dr_cr_flag == "D").unwrap();
    let cr_leg = legs.iter().find(|l| l.dr_cr_flag == "C").unwrap();
    assert_eq!(dr_leg.gl_num, "310401000");
    assert_eq!(cr_leg.gl_num, "210301000");
    assert_eq!(dr_leg.amount, dec!(0.15));
    assert_eq!(cr_leg.amount, dec!(0.15));
    assert_eq!(dr_leg.accr_tran_id, generate_accr_tran_id(accrual_date, 1, 1));
    assert_eq!(cr_leg.accr_tran_id, generate_accr_tran_id(accrual_date, 1, 2));
}

#[tokio::test]
async fn deal_liability_account_uses_the_rate_fixed_at_opening() {
    let accrual_date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    let mut deal_account = running_liability_account("1000000020002", "TD01");
    deal_account.gl_num = "110201000".to_string();
    deal_account.fixed_rate_at_opening = Some(dec!(6.00));

    let accounts = Arc::new(
        MockAccountRepository::default().with_account(deal_account).with_sub_product(SubProductModel {
            sub_product_code: "TD01".to_string(),
            interest_code: None,
            interest_increment: Decimal::ZERO,
            receivable_gl_num: None,
            income_gl_num: None,
            payable_gl_num: Some("210301000".to_string()),
            expenditure_gl_num: Some("310401000".to_string()),
        }),
    );
    let balances = Arc::new(MockBalanceRepository::default());
    balances.upsert_account_row(balance_row("1000000020002", accrual_date, dec!(2000.00))).await.unwrap();
    let accruals = Arc::new(support::mock_repositories::MockInterestAccrualRepository::default());

    let service = InterestAccrualServiceImpl::new(accounts, balances, accruals.clone());
    let report = service.accrue_all(accrual_date).await.expect("accrue_all failed");

    assert_eq!(report.accounts_processed, 1);
    let legs = accruals.legs.lock().unwrap();
    assert_eq!(legs[0].amount, dec!(0.33));
}

#[tokio::test]
async fn an_account_with_no_sub_product_code_is_skipped() {
    let accrual_date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    let mut account = running_liability_account("1000000030003", "unused");
    account.sub_product_code = None;
    let accounts = Arc::new(MockAccountRepository::default().with_account(account));
    let balances = Arc::new(MockBalanceRepository::default());
    let accruals = Arc::new(support::mock_repositories::MockInterestAccrualRepository::default());

    let service = InterestAccrualServiceImpl::new(accounts, balances, accruals.clone());
    let report = service.accrue_all(accrual_date).await.expect("accrue_all failed");

    assert_eq!(report.accounts_skipped, 1);
    assert_eq!(report.accounts_processed, 0);
    assert!(report.errors.is_empty());
    assert!(accruals.legs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn a_missing_sub_product_record_is_reported_as_an_error() {
    let accrual_date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    let accounts = Arc::new(MockAccountRepository::default().with_account(running_liability_account("1000000040004", "GHOST")));
    let balances = Arc::new(MockBalanceRepository::default());
    let accruals = Arc::new(support::mock_repositories::MockInterestAccrualRepository::default());

    let service = InterestAccrualServiceImpl::new(accounts, balances, accruals);
    let report = service.accrue_all(accrual_date).await.expect("accrue_all failed");

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].account_no, "1000000040004");
}

#[tokio::test]
async fn a_missing_balance_row_is_reported_as_an_error() {
    let accrual_date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    let accounts = Arc::new(
        MockAccountRepository::default()
            .with_account(running_liability_account("1000000050005", "SV01"))
            .with_sub_product(savings_sub_product("SV01"))
            .with_interest_rate(InterestRateModel {
                interest_code: "SVRATE".to_string(),
                effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                interest_rate: dec!(5.00),
            }),
    );
    let balances = Arc::new(MockBalanceRepository::default());
    let accruals = Arc::new(support::mock_repositories::MockInterestAccrualRepository::default());

    let service = InterestAccrualServiceImpl::new(accounts, balances, accruals);
    let report = service.accrue_all(accrual_date).await.expect("accrue_all failed");

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("balance row missing"));
}

#[tokio::test]
async fn a_zero_closing_balance_is_skipped_without_an_error() {
    let accrual_date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    let accounts = Arc::new(
        MockAccountRepository::default()
            .with_account(running_liability_account("1000000060006", "SV01"))
            .with_sub_product(savings_sub_product("SV01"))
            .with_interest_rate(InterestRateModel {
                interest_code: "SVRATE".to_string(),
                effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                interest_rate: dec!(5.00),
            }),
    );
    let balances = Arc::new(MockBalanceRepository::default());
    balances.upsert_account_row(balance_row("1000000060006", accrual_date, Decimal::ZERO)).await.unwrap();
    let accruals = Arc::new(support::mock_repositories::MockInterestAccrualRepository::default());

    let service = InterestAccrualServiceImpl::new(accounts, balances, accruals.clone());
    let report = service.accrue_all(accrual_date).await.expect("accrue_all failed");

    assert_eq!(report.accounts_skipped, 1);
    assert!(report.errors.is_empty());
    assert!(accruals.legs.lock().unwrap().is_empty());
}
