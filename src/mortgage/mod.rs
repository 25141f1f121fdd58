//! Mortgage payments and amortization schedules

mod payment;
mod state;
mod engine;
mod schedule;

pub use payment::{
    Loan, PaymentFrequency, payment, monthly_payment, bi_weekly_payment, accelerated_bi_weekly_payment,
};
pub use state::AmortizationState;
pub use engine::{
    AmortizationEngine, AmortizationConfig, ScheduleRows, amortize, default_start_date, first_of_next_month,
};
pub use schedule::{AmortizationRow, AmortizationSchedule, MonthlyAmortizationRow, ScheduleSummary};
