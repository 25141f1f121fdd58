//! Amortization engine: period-by-period payoff of a fixed-rate mortgage

use chrono::{Datelike, Local, Months, NaiveDate};
use log::debug;

use super::payment::Loan;
use super::schedule::{AmortizationRow, AmortizationSchedule};
use super::state::AmortizationState;
use crate::error::{HousingError, Result};
use crate::rates::round_cents;

/// Configuration for an amortization run
#[derive(Debug, Clone)]
pub struct AmortizationConfig {
    /// Extra principal paid every period on top of the scheduled payment
    pub additional_payment: f64,

    /// Date of the first payment
    pub start_date: NaiveDate,
}

impl Default for AmortizationConfig {
    fn default() -> Self {
        Self {
            additional_payment: 0.0,
            start_date: default_start_date(),
        }
    }
}

impl AmortizationConfig {
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            additional_payment: 0.0,
            start_date,
        }
    }

    pub fn with_additional_payment(mut self, additional_payment: f64) -> Self {
        self.additional_payment = additional_payment;
        self
    }
}

/// First day of the month after `today`
pub fn first_of_next_month(today: NaiveDate) -> NaiveDate {
    today
        .with_day(1)
        .and_then(|d| d.checked_add_months(Months::new(1)))
        .unwrap_or(today)
}

/// First payment date when none is given: the first of next month, evaluated now
pub fn default_start_date() -> NaiveDate {
    first_of_next_month(Local::now().date_naive())
}

/// Main amortization engine
#[derive(Debug, Clone)]
pub struct AmortizationEngine {
    loan: Loan,
    config: AmortizationConfig,
    scheduled_payment: f64,
    periodic_rate: f64,
}

impl AmortizationEngine {
    /// Create an engine for a loan.
    ///
    /// Fails if the additional payment is negative, or if the scheduled payment does
    /// not exceed the first period's interest (the balance would never reach zero).
    pub fn new(loan: Loan, config: AmortizationConfig) -> Result<Self> {
        if !config.additional_payment.is_finite() || config.additional_payment < 0.0 {
            return Err(HousingError::invalid(format!(
                "additional payment must be non-negative, got {}",
                config.additional_payment
            )));
        }

        let scheduled_payment = loan.scheduled_payment()?;
        let periodic_rate = loan.periodic_rate();

        let first_interest = round_cents(periodic_rate * loan.principal);
        if !(scheduled_payment > first_interest) {
            return Err(HousingError::NonAmortizingLoan {
                payment: scheduled_payment,
                interest: first_interest,
            });
        }

        Ok(Self {
            loan,
            config,
            scheduled_payment,
            periodic_rate,
        })
    }

    pub fn loan(&self) -> &Loan {
        &self.loan
    }

    /// Scheduled payment before final-period clamping
    pub fn scheduled_payment(&self) -> f64 {
        self.scheduled_payment
    }

    /// Interest rate per payment period
    pub fn periodic_rate(&self) -> f64 {
        self.periodic_rate
    }

    /// Lazily produce the schedule one period at a time
    pub fn rows(&self) -> ScheduleRows<'_> {
        ScheduleRows {
            engine: self,
            state: AmortizationState::new(self.loan.principal, self.config.start_date),
        }
    }

    /// Run the loan to payoff and collect every period
    pub fn amortize(&self) -> AmortizationSchedule {
        let mut schedule =
            AmortizationSchedule::new(self.loan, self.scheduled_payment, self.config.additional_payment);

        for row in self.rows() {
            schedule.add_row(row);
        }

        debug!(
            "amortized {:.2} over {} {} periods, total interest {:.2}",
            self.loan.principal,
            schedule.len(),
            self.loan.frequency,
            schedule.total_interest()
        );

        schedule
    }

    /// Calculate a single period from the state at its start
    fn calculate_period(&self, state: &AmortizationState) -> AmortizationRow {
        let beginning_balance = state.beginning_balance;
        let interest = round_cents(self.periodic_rate * beginning_balance);

        // Final payment only covers what is left
        let (payment, principal, additional_payment, ending_balance) =
            if self.scheduled_payment >= beginning_balance + interest {
                (beginning_balance + interest, beginning_balance, 0.0, 0.0)
            } else {
                let principal = self.scheduled_payment - interest;
                let remaining = beginning_balance - principal;
                let additional = self.config.additional_payment.min(remaining);
                let ending = if additional >= remaining { 0.0 } else { remaining - additional };
                (self.scheduled_payment, principal, additional, ending)
            };

        AmortizationRow {
            period: state.period,
            date: state.date,
            beginning_balance,
            payment,
            principal,
            interest,
            additional_payment,
            ending_balance,
        }
    }
}

/// Iterator over the periods of a loan; finite and not restartable
#[derive(Debug, Clone)]
pub struct ScheduleRows<'a> {
    engine: &'a AmortizationEngine,
    state: AmortizationState,
}

impl Iterator for ScheduleRows<'_> {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state.paid_off {
            return None;
        }

        let row = self.engine.calculate_period(&self.state);
        let next_date = self
            .engine
            .loan
            .frequency
            .date_after(self.engine.config.start_date, self.state.period)
            .unwrap_or(NaiveDate::MAX);
        self.state.advance(row.ending_balance, next_date);

        Some(row)
    }
}

/// Amortize a loan with an optional additional payment per period
pub fn amortize(loan: Loan, additional_payment: f64, start_date: NaiveDate) -> Result<AmortizationSchedule> {
    let config = AmortizationConfig::starting(start_date).with_additional_payment(additional_payment);
    Ok(AmortizationEngine::new(loan, config)?.amortize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mortgage::payment::PaymentFrequency;
    use approx::assert_abs_diff_eq;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn loan_250k(frequency: PaymentFrequency) -> Loan {
        Loan::new(250_000.0, 25, 0.03, frequency).unwrap()
    }

    #[test]
    fn test_monthly_totals() {
        let schedule = amortize(loan_250k(PaymentFrequency::Monthly), 0.0, start()).unwrap();

        assert_eq!(round_cents(schedule.total_interest()), 104_934.71);
        assert_eq!(round_cents(schedule.total_principal()), 250_000.0);
        assert_eq!(schedule.last().unwrap().ending_balance, 0.0);
    }

    #[test]
    fn test_bi_weekly_totals() {
        let schedule = amortize(loan_250k(PaymentFrequency::BiWeekly), 0.0, start()).unwrap();
        assert_eq!(round_cents(schedule.total_interest()), 104_696.21);
        assert_eq!(round_cents(schedule.total_principal()), 250_000.0);

        let schedule = amortize(loan_250k(PaymentFrequency::AcceleratedBiWeekly), 0.0, start()).unwrap();
        assert_eq!(round_cents(schedule.total_interest()), 92_042.94);
        assert_eq!(round_cents(schedule.total_principal()), 250_000.0);
    }

    #[test]
    fn test_row_invariants() {
        let loan = Loan::monthly(100_000.0, 25, 0.06).unwrap();
        let schedule = amortize(loan, 50.0, start()).unwrap();
        let rate = loan.periodic_rate();

        let mut prior_end = loan.principal;
        for (i, row) in schedule.rows().iter().enumerate() {
            assert_eq!(row.period as usize, i + 1);
            assert_eq!(row.beginning_balance, prior_end);
            assert_eq!(row.interest, round_cents(rate * row.beginning_balance));
            assert_abs_diff_eq!(
                row.ending_balance,
                row.beginning_balance - (row.principal + row.additional_payment),
                epsilon = 1e-6
            );
            assert!(row.ending_balance >= 0.0);
            prior_end = row.ending_balance;
        }
        assert_eq!(prior_end, 0.0);
    }

    #[test]
    fn test_additional_payment_shortens_schedule() {
        let base = amortize(loan_250k(PaymentFrequency::Monthly), 0.0, start()).unwrap();
        let extra = amortize(loan_250k(PaymentFrequency::Monthly), 200.0, start()).unwrap();

        assert!(extra.len() < base.len());
        assert!(extra.total_interest() < base.total_interest());
        assert_abs_diff_eq!(
            extra.total_principal() + extra.total_additional(),
            250_000.0,
            epsilon = 0.01 * extra.len() as f64
        );
    }

    #[test]
    fn test_lazy_rows_match_schedule() {
        let loan = Loan::monthly(100_000.0, 25, 0.06).unwrap();
        let engine = AmortizationEngine::new(loan, AmortizationConfig::starting(start())).unwrap();

        let first: Vec<_> = engine.rows().take(3).collect();
        let schedule = engine.amortize();
        assert_eq!(&schedule.rows()[..3], &first[..]);
        assert_eq!(schedule.len(), 300);
    }

    #[test]
    fn test_idempotent() {
        let a = amortize(loan_250k(PaymentFrequency::BiWeekly), 25.0, start()).unwrap();
        let b = amortize(loan_250k(PaymentFrequency::BiWeekly), 25.0, start()).unwrap();
        assert_eq!(a.rows, b.rows);
    }

    #[test]
    fn test_dates_advance_by_frequency() {
        let monthly = amortize(loan_250k(PaymentFrequency::Monthly), 0.0, start()).unwrap();
        assert_eq!(monthly.rows[1].date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());

        let bi_weekly = amortize(loan_250k(PaymentFrequency::BiWeekly), 0.0, start()).unwrap();
        assert_eq!(bi_weekly.rows[1].date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn test_negative_additional_payment_rejected() {
        let result = amortize(loan_250k(PaymentFrequency::Monthly), -1.0, start());
        assert!(matches!(result, Err(HousingError::InvalidInput(_))));
    }

    #[test]
    fn test_non_amortizing_loan_rejected() {
        // Payment rounds to zero cents
        let loan = Loan::monthly(0.004, 1, 0.0).unwrap();
        let result = AmortizationEngine::new(loan, AmortizationConfig::starting(start()));
        assert!(matches!(result, Err(HousingError::NonAmortizingLoan { .. })));
    }

    #[test]
    fn test_very_long_term_rejected() {
        let loan = Loan::monthly(100_000.0, 12_500, 0.06).unwrap();
        let result = AmortizationEngine::new(loan, AmortizationConfig::starting(start()));
        assert!(matches!(result, Err(HousingError::NonAmortizingLoan { .. })));

        let result = amortize(loan.with_frequency(PaymentFrequency::BiWeekly), 0.0, start());
        assert!(matches!(result, Err(HousingError::NonAmortizingLoan { .. })));
    }

    #[test]
    fn test_first_of_next_month() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 19).unwrap();
        assert_eq!(first_of_next_month(d), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
