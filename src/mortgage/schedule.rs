//! Amortization schedule output structures

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::payment::Loan;

/// A single payment period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Period number (1-indexed)
    pub period: u32,
    pub date: NaiveDate,
    pub beginning_balance: f64,
    /// Regular payment, clamped on the final period
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub additional_payment: f64,
    pub ending_balance: f64,
}

impl AmortizationRow {
    /// Regular payment plus any additional payment
    pub fn total_payment(&self) -> f64 {
        self.payment + self.additional_payment
    }
}

/// One calendar month of a schedule, aggregated across the payments made in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAmortizationRow {
    /// First day of the month
    pub month: NaiveDate,
    /// Highest beginning balance in the month
    pub beginning_balance: f64,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub additional_payment: f64,
    /// Lowest ending balance in the month
    pub ending_balance: f64,
    /// Payment plus additional payment
    pub total_payment: f64,
}

impl MonthlyAmortizationRow {
    fn opening(row: &AmortizationRow, month: NaiveDate) -> Self {
        Self {
            month,
            beginning_balance: row.beginning_balance,
            payment: row.payment,
            principal: row.principal,
            interest: row.interest,
            additional_payment: row.additional_payment,
            ending_balance: row.ending_balance,
            total_payment: row.total_payment(),
        }
    }

    fn absorb(&mut self, row: &AmortizationRow) {
        self.beginning_balance = self.beginning_balance.max(row.beginning_balance);
        self.ending_balance = self.ending_balance.min(row.ending_balance);
        self.payment += row.payment;
        self.principal += row.principal;
        self.interest += row.interest;
        self.additional_payment += row.additional_payment;
        self.total_payment += row.total_payment();
    }
}

/// Complete amortization schedule for one loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Terms of the loan
    pub loan: Loan,

    /// Scheduled (unclamped) periodic payment
    pub scheduled_payment: f64,

    /// Requested additional payment per period
    pub additional_payment: f64,

    /// One row per payment period, in order
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub fn new(loan: Loan, scheduled_payment: f64, additional_payment: f64) -> Self {
        Self {
            loan,
            scheduled_payment,
            additional_payment,
            rows: Vec::new(),
        }
    }

    /// Add a row
    pub fn add_row(&mut self, row: AmortizationRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[AmortizationRow] {
        &self.rows
    }

    /// Number of payment periods until payoff
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&AmortizationRow> {
        self.rows.last()
    }

    /// Date of the final payment
    pub fn payoff_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    /// Principal repaid through regular payments
    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal).sum()
    }

    pub fn total_additional(&self) -> f64 {
        self.rows.iter().map(|r| r.additional_payment).sum()
    }

    /// Everything paid over the life of the loan
    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|r| r.total_payment()).sum()
    }

    /// Aggregate the schedule by calendar month.
    ///
    /// Bi-weekly schedules have two or three payments in a month; the month keeps the
    /// highest beginning balance and the lowest ending balance and sums the flows.
    /// A monthly schedule maps one row to one month.
    pub fn to_monthly(&self) -> Vec<MonthlyAmortizationRow> {
        let mut months: Vec<MonthlyAmortizationRow> = Vec::new();

        for row in &self.rows {
            let month = first_of_month(row.date);
            match months.last_mut() {
                Some(current) if current.month == month => current.absorb(row),
                _ => months.push(MonthlyAmortizationRow::opening(row, month)),
            }
        }

        months
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            total_periods: self.rows.len() as u32,
            scheduled_payment: self.scheduled_payment,
            total_interest: self.total_interest(),
            total_principal: self.total_principal(),
            total_additional: self.total_additional(),
            total_paid: self.total_paid(),
            payoff_date: self.payoff_date(),
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_periods: u32,
    pub scheduled_payment: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub total_additional: f64,
    pub total_paid: f64,
    pub payoff_date: Option<NaiveDate>,
}
