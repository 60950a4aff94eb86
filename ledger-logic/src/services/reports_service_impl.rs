use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledger_api::domain::reports::{BalanceSheetEntry, BalanceSheetLine, BalanceSheetReport, TrialBalanceReport, TrialBalanceRow};
use ledger_api::error::{LedgerError, LedgerResult};
use ledger_api::service::chart_of_accounts_service::ChartOfAccountsService;
use ledger_db::repository::BalanceRepository;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use tracing::info;

use ledger_api::service::reports_service::ReportsService;

/// C10, EOD Job 7 (spec.md §4.10). Reads the closed-day GL balances; fails
/// the job with `TrialBalanceImbalanced` if total DR != total CR to the cent.
pub struct ReportsServiceImpl {
    chart_of_accounts: Arc<dyn ChartOfAccountsService>,
    balance_repository: Arc<dyn BalanceRepository>,
    reports_dir: String,
}

impl ReportsServiceImpl {
    pub fn new(chart_of_accounts: Arc<dyn ChartOfAccountsService>, balance_repository: Arc<dyn BalanceRepository>, reports_dir: String) -> Self {
        Self { chart_of_accounts, balance_repository, reports_dir }
    }

    fn day_dir(&self, tran_date: NaiveDate) -> std::path::PathBuf {
        std::path::Path::new(&self.reports_dir).join(tran_date.format("%Y%m%d").to_string())
    }
}

#[async_trait]
impl ReportsService for ReportsServiceImpl {
    async fn trial_balance(&self, tran_date: NaiveDate) -> LedgerResult<TrialBalanceReport> {
        let active = self.chart_of_accounts.active_gls().await?;
        let mut rows = Vec::with_capacity(active.len());
        let mut total_dr = Decimal::ZERO;
        let mut total_cr = Decimal::ZERO;

        let mut sorted = active;
        sorted.sort_by(|a, b| a.gl_num.cmp(&b.gl_num));

        for gl in sorted {
            let Some(balance) = self.balance_repository.find_gl_row(&gl.gl_num, tran_date).await? else {
                continue;
            };
            total_dr += balance.dr_summation;
            total_cr += balance.cr_summation;
            rows.push(TrialBalanceRow {
                gl_code: gl.gl_num,
                gl_name: gl.gl_name,
                opening_bal: balance.opening_bal,
                dr_summation: balance.dr_summation,
                cr_summation: balance.cr_summation,
                closing_bal: balance.closing_bal,
            });
        }

        if total_dr != total_cr {
            return Err(LedgerError::TrialBalanceImbalanced { tran_date, debit_total: total_dr, credit_total: total_cr });
        }

        Ok(TrialBalanceReport { tran_date, rows, total_dr, total_cr })
    }

    async fn balance_sheet(&self, tran_date: NaiveDate) -> LedgerResult<BalanceSheetReport> {
        let gls = self.chart_of_accounts.balance_sheet_gls().await?;
        let mut liabilities = Vec::new();
        let mut assets = Vec::new();
        let mut total_liabilities = Decimal::ZERO;
        let mut total_assets = Decimal::ZERO;

        for gl in gls {
            let Some(balance) = self.balance_repository.find_gl_row(&gl.gl_num, tran_date).await? else {
                continue;
            };
            let class = self.chart_of_accounts.classify(&gl.gl_num).await?;
            let entry = BalanceSheetEntry { gl_code: gl.gl_num, gl_name: gl.gl_name, closing_bal: balance.closing_bal };
            match class.balance_sheet_side() {
                ledger_api::domain::gl::BalanceSheetSide::Liability => {
                    total_liabilities += entry.closing_bal;
                    liabilities.push(entry);
                }
                ledger_api::domain::gl::BalanceSheetSide::Asset => {
                    total_assets += entry.closing_bal;
                    assets.push(entry);
                }
            }
        }

        liabilities.sort_by(|a, b| a.gl_code.cmp(&b.gl_code));
        assets.sort_by(|a, b| a.gl_code.cmp(&b.gl_code));

        let pair_count = liabilities.len().max(assets.len());
        let mut liabilities = liabilities.into_iter();
        let mut assets = assets.into_iter();
        let lines = (0..pair_count)
            .map(|_| BalanceSheetLine { liability: liabilities.next(), asset: assets.next() })
            .collect();

        Ok(BalanceSheetReport { tran_date, lines, total_liabilities, total_assets })
    }

    async fn write_reports(&self, tran_date: NaiveDate) -> LedgerResult<(String, String)> {
        std::fs::create_dir_all(self.day_dir(tran_date)).map_err(|e| LedgerError::IoError(e.to_string()))?;

        let trial_balance = self.trial_balance(tran_date).await?;
        let csv_path = self.day_dir(tran_date).join(format!("TrialBalance_{}.csv", tran_date.format("%Y%m%d")));
        write_trial_balance_csv(&trial_balance, &csv_path)?;

        let balance_sheet = self.balance_sheet(tran_date).await?;
        let xlsx_path = self.day_dir(tran_date).join(format!("BalanceSheet_{}.xlsx", tran_date.format("%Y%m%d")));
        write_balance_sheet_xlsx(&balance_sheet, &xlsx_path)?;

        info!(tran_date = %tran_date, "financial reports written");
        Ok((csv_path.to_string_lossy().into_owned(), xlsx_path.to_string_lossy().into_owned()))
    }
}

fn write_trial_balance_csv(report: &TrialBalanceReport, path: &std::path::Path) -> LedgerResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| LedgerError::IoError(e.to_string()))?;
    writer
        .write_record(["GL_Code", "GL_Name", "Opening_Bal", "DR_Summation", "CR_Summation", "Closing_Bal"])
        .map_err(|e| LedgerError::IoError(e.to_string()))?;
    for row in &report.rows {
        writer
            .write_record([
                row.gl_code.as_str(),
                row.gl_name.as_str(),
                &row.opening_bal.to_string(),
                &row.dr_summation.to_string(),
                &row.cr_summation.to_string(),
                &row.closing_bal.to_string(),
            ])
            .map_err(|e| LedgerError::IoError(e.to_string()))?;
    }
    writer
        .write_record(["TOTAL", "", "", &report.total_dr.to_string(), &report.total_cr.to_string(), ""])
        .map_err(|e| LedgerError::IoError(e.to_string()))?;
    writer.flush().map_err(|e| LedgerError::IoError(e.to_string()))
}

fn write_balance_sheet_xlsx(report: &BalanceSheetReport, path: &std::path::Path) -> LedgerResult<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let title_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let header_format = Format::new().set_bold();

    sheet
        .merge_range(0, 0, 0, 2, &format!("BALANCE SHEET - {}", report.tran_date.format("%Y%m%d")), &title_format)
        .map_err(|e| LedgerError::IoError(e.to_string()))?;
    sheet
        .merge_range(0, 4, 0, 6, &format!("BALANCE SHEET - {}", report.tran_date.format("%Y%m%d")), &title_format)
        .map_err(|e| LedgerError::IoError(e.to_string()))?;

    sheet.write_string_with_format(1, 0, "LIABILITIES", &header_format).map_err(|e| LedgerError::IoError(e.to_string()))?;
    sheet.write_string_with_format(1, 4, "ASSETS", &header_format).map_err(|e| LedgerError::IoError(e.to_string()))?;

    sheet.write_string_with_format(2, 0, "GL Code", &header_format).map_err(|e| LedgerError::IoError(e.to_string()))?;
    sheet.write_string_with_format(2, 1, "GL Name", &header_format).map_err(|e| LedgerError::IoError(e.to_string()))?;
    sheet.write_string_with_format(2, 2, "Closing Bal", &header_format).map_err(|e| LedgerError::IoError(e.to_string()))?;
    sheet.write_string_with_format(2, 4, "GL Code", &header_format).map_err(|e| LedgerError::IoError(e.to_string()))?;
    sheet.write_string_with_format(2, 5, "GL Name", &header_format).map_err(|e| LedgerError::IoError(e.to_string()))?;
    sheet.write_string_with_format(2, 6, "Closing Bal", &header_format).map_err(|e| LedgerError::IoError(e.to_string()))?;

    for (idx, line) in report.lines.iter().enumerate() {
        let row = (idx + 3) as u32;
        if let Some(entry) = &line.liability {
            sheet.write_string(row, 0, &entry.gl_code).map_err(|e| LedgerError::IoError(e.to_string()))?;
            sheet.write_string(row, 1, &entry.gl_name).map_err(|e| LedgerError::IoError(e.to_string()))?;
            sheet
                .write_string(row, 2, &entry.closing_bal.to_string())
                .map_err(|e| LedgerError::IoError(e.to_string()))?;
        }
        if let Some(entry) = &line.asset {
            sheet.write_string(row, 4, &entry.gl_code).map_err(|e| LedgerError::IoError(e.to_string()))?;
            sheet.write_string(row, 5, &entry.gl_name).map_err(|e| LedgerError::IoError(e.to_string()))?;
            sheet
                .write_string(row, 6, &entry.closing_bal.to_string())
                .map_err(|e| LedgerError::IoError(e.to_string()))?;
        }
    }

    let totals_row = (report.lines.len() + 3) as u32;
    sheet.write_string_with_format(totals_row, 0, "TOTAL", &header_format).map_err(|e| LedgerError::IoError(e.to_string()))?;
    sheet
        .write_string(totals_row, 2, &report.total_liabilities.to_string())
        .map_err(|e| LedgerError::IoError(e.to_string()))?;
    sheet.write_string_with_format(totals_row, 4, "TOTAL", &header_format).map_err(|e| LedgerError::IoError(e.to_string()))?;
    sheet
        .write_string(totals_row, 6, &report.total_assets.to_string())
        .map_err(|e| LedgerError::IoError(e.to_string()))?;

    workbook.save(path).map_err(|e| LedgerError::IoError(e.to_string()))
}
