use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::Money;
use crate::errors::{PlannerError, Result};
use crate::loan::calculator::{installment, LoanInputs};

/// scheduled payment in amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// equal-installment amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub inputs: LoanInputs,
    pub start_date: NaiveDate,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate the month-by-month schedule, first payment one month after `start_date`
    pub fn generate(inputs: &LoanInputs, start_date: NaiveDate) -> Result<Self> {
        inputs.validate()?;

        // final payment date bounds the term before any rows are built
        start_date
            .checked_add_months(Months::new(inputs.term_months))
            .ok_or_else(|| PlannerError::invalid("term_months", "schedule runs past the calendar"))?;

        let monthly_rate = inputs.monthly_rate().as_decimal();
        let emi = installment(inputs.principal, monthly_rate, inputs.term_months)?;

        let mut payments = Vec::new();
        let mut balance = inputs.principal;
        let mut cumulative_interest = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;

        for i in 1..=inputs.term_months {
            let payment_date = start_date
                .checked_add_months(Months::new(i))
                .ok_or_else(|| PlannerError::invalid("term_months", "schedule runs past the calendar"))?;

            let interest_portion = balance * monthly_rate;
            let (payment_amount, principal_portion) = if i == inputs.term_months {
                // last payment clears whatever rounding left behind
                (balance + interest_portion, balance)
            } else {
                let principal_portion = (emi - interest_portion).min(balance);
                (principal_portion + interest_portion, principal_portion)
            };

            cumulative_interest += interest_portion;
            cumulative_principal += principal_portion;
            let ending_balance = balance - principal_portion;

            payments.push(ScheduledPayment {
                payment_number: i,
                payment_date,
                beginning_balance: balance,
                payment_amount,
                principal_portion,
                interest_portion,
                ending_balance,
                cumulative_interest,
                cumulative_principal,
            });

            balance = ending_balance;
        }

        let total_interest: Money = payments.iter().map(|p| p.interest_portion).sum();
        let total_payment: Money = payments.iter().map(|p| p.payment_amount).sum();

        debug!(
            principal = %inputs.principal,
            term_months = inputs.term_months,
            total_interest = %total_interest,
            "generated amortization schedule"
        );

        Ok(Self {
            inputs: *inputs,
            start_date,
            payments,
            total_interest,
            total_payment,
        })
    }

    /// get payment for specific period (1-based)
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        let index = payment_number.checked_sub(1)?;
        self.payments.get(index as usize)
    }

    /// remaining balance after the given payment
    ///
    /// Principal before the first payment, zero once the schedule has run out.
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        if payment_number == 0 {
            return self.inputs.principal;
        }
        self.get_payment(payment_number)
            .or_else(|| self.payments.last())
            .map(|p| p.ending_balance)
            .unwrap_or(Money::ZERO)
    }

    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::loan::calculator::compute_loan;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    #[test]
    fn test_equal_installments_schedule() {
        let inputs = LoanInputs::new(Money::from_major(100_000), Rate::from_percentage(12), 24);
        let schedule = AmortizationSchedule::generate(&inputs, start()).unwrap();
        let estimate = compute_loan(&inputs).unwrap();

        assert_eq!(schedule.payments.len(), 24);

        let first = &schedule.payments[0];
        assert_eq!(first.beginning_balance, inputs.principal);
        assert_eq!(first.interest_portion, Money::from_major(1_000));
        assert_eq!(first.payment_amount, estimate.monthly_payment);

        let last = schedule.get_payment(24).unwrap();
        assert_eq!(last.ending_balance, Money::ZERO);
        assert_eq!(last.cumulative_principal, inputs.principal);

        // every installment but the last is the level payment
        for payment in &schedule.payments[..23] {
            assert_eq!(payment.payment_amount, estimate.monthly_payment);
        }
        assert!((last.payment_amount - estimate.monthly_payment).abs() < Money::CENT);

        // schedule totals agree with the closed form to within a cent
        assert!((schedule.total_payment - estimate.total_payment).abs() < Money::CENT);
        assert_eq!(schedule.total_payment - schedule.total_interest, inputs.principal);
    }

    #[test]
    fn test_interest_declines_over_time() {
        let inputs = LoanInputs::new(Money::from_major(50_000), Rate::from_percent(dec!(9.5)), 36);
        let schedule = AmortizationSchedule::generate(&inputs, start()).unwrap();

        for pair in schedule.payments.windows(2) {
            assert!(pair[1].interest_portion < pair[0].interest_portion);
            assert!(pair[1].principal_portion >= pair[0].principal_portion);
            assert_eq!(pair[1].beginning_balance, pair[0].ending_balance);
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let inputs = LoanInputs::new(Money::from_major(12_000), Rate::ZERO, 12);
        let schedule = AmortizationSchedule::generate(&inputs, start()).unwrap();

        assert_eq!(schedule.total_interest, Money::ZERO);
        assert_eq!(schedule.total_payment, inputs.principal);
        assert_eq!(schedule.balance_after_payment(6), Money::from_major(6_000));
    }

    #[test]
    fn test_payment_dates_follow_calendar_months() {
        let inputs = LoanInputs::new(Money::from_major(6_000), Rate::from_percentage(10), 6);
        let schedule = AmortizationSchedule::generate(&inputs, start()).unwrap();

        // month-end start clamps to the shorter month
        assert_eq!(schedule.payments[0].payment_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(schedule.payments[5].payment_date, NaiveDate::from_ymd_opt(2024, 7, 31).unwrap());
    }

    #[test]
    fn test_lookup_bounds() {
        let inputs = LoanInputs::new(Money::from_major(6_000), Rate::from_percentage(10), 6);
        let schedule = AmortizationSchedule::generate(&inputs, start()).unwrap();

        assert!(schedule.get_payment(0).is_none());
        assert!(schedule.get_payment(7).is_none());
        assert_eq!(schedule.balance_after_payment(0), inputs.principal);
        assert!(schedule.balance_after_payment(3) < inputs.principal);
        assert_eq!(schedule.balance_after_payment(6), Money::ZERO);

        // a repaid loan stays repaid
        assert_eq!(schedule.balance_after_payment(7), Money::ZERO);
        assert_eq!(schedule.balance_after_payment(u32::MAX), Money::ZERO);
    }

    #[test]
    fn test_term_past_calendar_is_invalid_input() {
        let inputs = LoanInputs::new(Money::from_major(100_000), Rate::ZERO, u32::MAX);
        assert!(compute_loan(&inputs).is_ok());

        let err = AmortizationSchedule::generate(&inputs, start()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { field: "term_months", .. }));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let inputs = LoanInputs::new(Money::ZERO, Rate::from_percentage(10), 6);
        assert!(AmortizationSchedule::generate(&inputs, start()).unwrap_err().is_invalid_input());
    }
}
