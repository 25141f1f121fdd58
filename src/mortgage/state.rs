//! Running state of a loan during amortization

use chrono::NaiveDate;

/// State of the loan at the start of a payment period
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Current period (1-indexed)
    pub period: u32,

    /// Date of the current payment
    pub date: NaiveDate,

    /// Outstanding balance at the start of the period
    pub beginning_balance: f64,

    /// Set once a period has brought the balance to zero
    pub paid_off: bool,
}

impl AmortizationState {
    /// Initialize state at the first payment
    pub fn new(principal: f64, start_date: NaiveDate) -> Self {
        Self {
            period: 1,
            date: start_date,
            beginning_balance: principal,
            paid_off: false,
        }
    }

    /// Advance to the next period; BOP balance comes from the prior EOP balance
    pub fn advance(&mut self, ending_balance: f64, next_date: NaiveDate) {
        self.period += 1;
        self.date = next_date;
        self.beginning_balance = ending_balance;
        if ending_balance == 0.0 {
            self.paid_off = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let next = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let mut state = AmortizationState::new(1000.0, start);

        state.advance(600.0, next);
        assert_eq!(state.period, 2);
        assert_eq!(state.beginning_balance, 600.0);
        assert!(!state.paid_off);

        state.advance(0.0, next);
        assert!(state.paid_off);
    }
}
