use ledger_api::domain::account::{AccountInfo, AccountStatus, DrCrFlag};
use ledger_api::error::LedgerError;
use rust_decimal::Decimal;

/// Per-leg validation policy (spec.md §4.6 table). `available_balance` is
/// only consulted for a customer, non-overdraft debit; `current_balance` is
/// only consulted for an office-liability debit.
pub fn validate_leg(
    account: &AccountInfo,
    flag: DrCrFlag,
    amount: Decimal,
    is_overdraft_leaf: bool,
    available_balance: Decimal,
    current_balance: Decimal,
) -> Result<(), LedgerError> {
    if !account.status.is_transactable() {
        return Err(LedgerError::AccountInactive {
            account_no: account.account_no.clone(),
            status: status_name(account.status),
        });
    }

    if account.is_customer() {
        if flag == DrCrFlag::C {
            return Ok(());
        }
        if is_overdraft_leaf {
            return Ok(());
        }
        if amount > available_balance {
            return Err(LedgerError::InsufficientBalance {
                account_no: account.account_no.clone(),
                requested: amount,
                available: available_balance,
            });
        }
        return Ok(());
    }

    // Office account.
    if account.is_asset_gl() {
        // Office asset GLs tolerate a debit- or credit-driven negative balance.
        return Ok(());
    }
    if account.is_liability_gl() {
        if flag == DrCrFlag::C {
            return Ok(());
        }
        if current_balance - amount < Decimal::ZERO {
            return Err(LedgerError::InsufficientBalance {
                account_no: account.account_no.clone(),
                requested: amount,
                available: current_balance,
            });
        }
        return Ok(());
    }

    // Office, other GL prefix: conservative on both legs — resulting balance
    // must stay >= 0 whether the leg is a debit or a credit (spec.md §4.6).
    let resulting = match flag {
        DrCrFlag::D => current_balance - amount,
        DrCrFlag::C => current_balance + amount,
    };
    if resulting < Decimal::ZERO {
        return Err(LedgerError::InsufficientBalance {
            account_no: account.account_no.clone(),
            requested: amount,
            available: current_balance,
        });
    }
    Ok(())
}

fn status_name(status: AccountStatus) -> String {
    match status {
        AccountStatus::Active => "Active",
        AccountStatus::Inactive => "Inactive",
        AccountStatus::Closed => "Closed",
        AccountStatus::Dormant => "Dormant",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledger_api::domain::account::AccountKind;
    use rust_decimal_macros::dec;

    fn customer(gl_num: &str) -> AccountInfo {
        AccountInfo {
            account_no: "1000000010001".to_string(),
            kind: AccountKind::Customer,
            gl_num: gl_num.to_string(),
            status: AccountStatus::Active,
            loan_limit: Decimal::ZERO,
            opening_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            closure_date: None,
        }
    }

    #[test]
    fn customer_debit_at_exact_available_succeeds() {
        let acct = customer("110101000");
        assert!(validate_leg(&acct, DrCrFlag::D, dec!(100.00), false, dec!(100.00), dec!(100.00)).is_ok());
    }

    #[test]
    fn customer_debit_over_available_by_a_cent_fails() {
        let acct = customer("110101000");
        let err = validate_leg(&acct, DrCrFlag::D, dec!(100.01), false, dec!(100.00), dec!(100.00)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    }

    #[test]
    fn overdraft_leaf_allows_unrestricted_debit() {
        let acct = customer("210201000");
        assert!(validate_leg(&acct, DrCrFlag::D, dec!(5000.00), true, dec!(0.00), dec!(0.00)).is_ok());
    }

    #[test]
    fn inactive_account_rejects_any_leg() {
        let mut acct = customer("110101000");
        acct.status = AccountStatus::Inactive;
        let err = validate_leg(&acct, DrCrFlag::C, dec!(1.00), false, dec!(0.00), dec!(0.00)).unwrap_err();
        assert!(matches!(err, LedgerError::AccountInactive { .. }));
    }

    #[test]
    fn office_asset_gl_accepts_debit_into_negative() {
        let mut acct = customer("210500000");
        acct.kind = AccountKind::Office;
        assert!(validate_leg(&acct, DrCrFlag::D, dec!(500.00), false, dec!(0.00), dec!(0.00)).is_ok());
    }

    #[test]
    fn office_other_gl_credit_producing_negative_balance_fails() {
        let mut acct = customer("310101000");
        acct.kind = AccountKind::Office;
        let err = validate_leg(&acct, DrCrFlag::C, dec!(50.00), false, dec!(0.00), dec!(-100.00)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    }
}
