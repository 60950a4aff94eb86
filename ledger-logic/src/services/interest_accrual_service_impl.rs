use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::domain::account::DrCrFlag;
use ledger_api::domain::gl::{book_type_for_gl, AccountBookType};
use ledger_api::domain::interest::{generate_accr_tran_id, AccrualError, AccrualReport, AccrualStatus, InterestAccrualLeg};
use ledger_api::error::LedgerResult;
use ledger_api::service::interest_accrual_service::InterestAccrualService;
use ledger_db::models::account::AccountModel;
use ledger_db::models::interest::InterestAccrualLegModel;
use ledger_db::repository::{AccountRepository, BalanceRepository, InterestAccrualRepository};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::decimal::round_half_up_2;

/// `rate × 100` (percentage points) `× 365` (day-count basis), per spec.md §4.8 step 4.
const DAY_COUNT_DIVISOR: u32 = 36_500;

/// C8, EOD Job 2 (spec.md §4.8). Per-account failures are captured in the
/// returned report rather than aborting the batch (spec.md §7).
pub struct InterestAccrualServiceImpl {
    account_repository: Arc<dyn AccountRepository>,
    balance_repository: Arc<dyn BalanceRepository>,
    interest_accrual_repository: Arc<dyn InterestAccrualRepository>,
}

impl InterestAccrualServiceImpl {
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        balance_repository: Arc<dyn BalanceRepository>,
        interest_accrual_repository: Arc<dyn InterestAccrualRepository>,
    ) -> Self {
        Self { account_repository, balance_repository, interest_accrual_repository }
    }

    async fn effective_rate(&self, account: &AccountModel, sub_product: &ledger_db::models::account::SubProductModel, accrual_date: NaiveDate) -> Option<Decimal> {
        let book_type = book_type_for_gl(&account.gl_num);
        let is_liability = account.gl_num.starts_with('1');

        if is_liability && book_type == AccountBookType::Deal {
            return account.fixed_rate_at_opening;
        }

        let interest_code = sub_product.interest_code.as_ref()?;
        let rate_row = self.account_repository.latest_interest_rate(interest_code, accrual_date).await.ok()??;
        Some(rate_row.interest_rate + sub_product.interest_increment)
    }

    /// Dr/Cr GL selection per spec.md §4.8 step 6, with fallback when the
    /// primary GL is not configured on the sub-product.
    fn select_gls(is_liability: bool, sub_product: &ledger_db::models::account::SubProductModel) -> Option<(String, String)> {
        if is_liability {
            let dr = sub_product.expenditure_gl_num.clone().or_else(|| sub_product.payable_gl_num.clone())?;
            let cr = sub_product.payable_gl_num.clone().or_else(|| sub_product.expenditure_gl_num.clone())?;
            Some((dr, cr))
        } else {
            let dr = sub_product.receivable_gl_num.clone().or_else(|| sub_product.income_gl_num.clone())?;
            let cr = sub_product.income_gl_num.clone().or_else(|| sub_product.receivable_gl_num.clone())?;
            Some((dr, cr))
        }
    }
}

#[async_trait]
impl InterestAccrualService for InterestAccrualServiceImpl {
    async fn accrue_all(&self, accrual_date: NaiveDate) -> LedgerResult<AccrualReport> {
        let mut report = AccrualReport::new(accrual_date);
        let mut next_seq = self.interest_accrual_repository.max_seq_for_date(accrual_date).await? + 1;

        let accounts = self.account_repository.find_interest_eligible().await?;
        let divisor = Decimal::from(DAY_COUNT_DIVISOR);

        for account in accounts {
            let Some(sub_product_code) = &account.sub_product_code else {
                report.accounts_skipped += 1;
                continue;
            };
            let Some(sub_product) = self.account_repository.find_sub_product(sub_product_code).await? else {
                report.errors.push(AccrualError {
                    account_no: account.account_no.clone(),
                    message: format!("sub-product {sub_product_code} not found"),
                });
                continue;
            };

            let is_liability = account.gl_num.starts_with('1');

            let Some(rate) = self.effective_rate(&account, &sub_product, accrual_date).await else {
                report.errors.push(AccrualError {
                    account_no: account.account_no.clone(),
                    message: "no interest rate configured".to_string(),
                });
                continue;
            };

            let Some(balance_row) = self.balance_repository.find_account_row(&account.account_no, accrual_date).await? else {
                report.errors.push(AccrualError {
                    account_no: account.account_no.clone(),
                    message: format!("balance row missing for {accrual_date}"),
                });
                continue;
            };

            let bal = balance_row.closing_bal;
            if rate == Decimal::ZERO || bal == Decimal::ZERO {
                report.accounts_skipped += 1;
                continue;
            }

            let amount = round_half_up_2(bal * rate / divisor);
            if amount == Decimal::ZERO {
                report.accounts_skipped += 1;
                continue;
            }

            let Some((dr_gl, cr_gl)) = Self::select_gls(is_liability, &sub_product) else {
                report.errors.push(AccrualError {
                    account_no: account.account_no.clone(),
                    message: "no GL mapping configured for interest accrual".to_string(),
                });
                continue;
            };

            if next_seq > 999_999_999 {
                warn!(accrual_date = %accrual_date, "interest accrual sequence exhausted for the day");
                report.errors.push(AccrualError {
                    account_no: account.account_no.clone(),
                    message: "accrual sequence exhausted for the day".to_string(),
                });
                continue;
            }

            let dr_id = generate_accr_tran_id(accrual_date, next_seq, 1);
            let cr_id = generate_accr_tran_id(accrual_date, next_seq, 2);
            next_seq += 1;

            let dr_leg = InterestAccrualLeg {
                accr_tran_id: dr_id,
                account_no: account.account_no.clone(),
                gl_num: dr_gl,
                dr_cr_flag: DrCrFlag::D,
                amount,
                accrual_date,
                status: AccrualStatus::Pending,
            };
            let cr_leg = InterestAccrualLeg {
                accr_tran_id: cr_id,
                account_no: account.account_no.clone(),
                gl_num: cr_gl,
                dr_cr_flag: DrCrFlag::C,
                amount,
                accrual_date,
                status: AccrualStatus::Pending,
            };

            self.interest_accrual_repository.insert_leg(InterestAccrualLegModel::from(dr_leg)).await?;
            self.interest_accrual_repository.insert_leg(InterestAccrualLegModel::from(cr_leg)).await?;
            debug!(account_no = %account.account_no, %amount, "interest accrued");
            report.accounts_processed += 1;
        }

        Ok(report)
    }
}
