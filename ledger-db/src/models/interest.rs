use chrono::NaiveDate;
use ledger_api::domain::account::DrCrFlag;
use ledger_api::domain::interest::{AccrualStatus, InterestAccrualLeg};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `Intt_Accr_Tran` row (spec.md §3/§6), primary key `accr_tran_id` (20 chars).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InterestAccrualLegModel {
    pub accr_tran_id: String,
    pub account_no: String,
    pub gl_num: String,
    pub dr_cr_flag: String,
    pub amount: Decimal,
    pub accrual_date: NaiveDate,
    pub status: String,
}

impl From<InterestAccrualLegModel> for InterestAccrualLeg {
    fn from(m: InterestAccrualLegModel) -> Self {
        InterestAccrualLeg {
            accr_tran_id: m.accr_tran_id,
            account_no: m.account_no,
            gl_num: m.gl_num,
            dr_cr_flag: if m.dr_cr_flag == "D" { DrCrFlag::D } else { DrCrFlag::C },
            amount: m.amount,
            accrual_date: m.accrual_date,
            status: if m.status == "Pending" { AccrualStatus::Pending } else { AccrualStatus::Processed },
        }
    }
}

impl From<InterestAccrualLeg> for InterestAccrualLegModel {
    fn from(d: InterestAccrualLeg) -> Self {
        InterestAccrualLegModel {
            accr_tran_id: d.accr_tran_id,
            account_no: d.account_no,
            gl_num: d.gl_num,
            dr_cr_flag: d.dr_cr_flag.as_str().to_string(),
            amount: d.amount,
            accrual_date: d.accrual_date,
            status: match d.status {
                AccrualStatus::Pending => "Pending".to_string(),
                AccrualStatus::Processed => "Processed".to_string(),
            },
        }
    }
}
