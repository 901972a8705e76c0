use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result};

/// loan parameters for a payment estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
}

/// payment estimate for a fixed-rate amortizing loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

impl LoanInputs {
    pub fn new(principal: Money, annual_rate: Rate, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate,
            term_months,
        }
    }

    /// reject parameters no loan can have
    ///
    /// Product and slider limits are not applied here, see `LoanBounds`.
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(PlannerError::invalid(
                "principal",
                format!("must be positive, got {}", self.principal),
            ));
        }
        if self.term_months == 0 {
            return Err(PlannerError::invalid("term_months", "must be at least one month"));
        }
        if self.annual_rate.is_negative() {
            return Err(PlannerError::invalid(
                "annual_rate",
                format!("must not be negative, got {}", self.annual_rate),
            ));
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }
}

/// compute monthly payment, total payment and total interest
///
/// Standard installment formula `P * r * (1 + r)^n / ((1 + r)^n - 1)` with
/// `r` the monthly rate, degrading to `P / n` for interest-free loans.
pub fn compute_loan(inputs: &LoanInputs) -> Result<LoanResult> {
    if let Err(e) = inputs.validate() {
        warn!(error = %e, "rejected loan inputs");
        return Err(e);
    }

    let monthly_payment = installment(
        inputs.principal,
        inputs.monthly_rate().as_decimal(),
        inputs.term_months,
    )?;
    let total_payment = monthly_payment
        .checked_mul(Decimal::from(inputs.term_months))
        .ok_or_else(|| PlannerError::invalid("principal", "total payment exceeds decimal range"))?;
    let total_interest = total_payment - inputs.principal;

    debug!(
        principal = %inputs.principal,
        annual_rate = %inputs.annual_rate,
        term_months = inputs.term_months,
        monthly_payment = %monthly_payment,
        "computed loan payment"
    );

    Ok(LoanResult {
        monthly_payment,
        total_payment,
        total_interest,
    })
}

/// monthly payment as a percentage of monthly income
///
/// `None` unless the income is positive.
pub fn debt_to_income_ratio(monthly_payment: Money, monthly_income: Option<Money>) -> Option<Rate> {
    let income = monthly_income.filter(|i| i.is_positive())?;
    monthly_payment
        .as_decimal()
        .checked_div(income.as_decimal())
        .map(Rate::from_decimal)
}

/// level installment for `n` months at monthly rate `r`
///
/// Rounded up at the last kept place so `installment * n` never falls short
/// of the principal.
pub(crate) fn installment(principal: Money, r: Decimal, n: u32) -> Result<Money> {
    if r.is_zero() {
        return Ok(Money::from_decimal_round_up(
            principal.as_decimal() / Decimal::from(n),
        ));
    }

    let growth = compound_factor(r, n).ok_or_else(|| {
        PlannerError::invalid("term_months", format!("(1 + r)^{} exceeds decimal range", n))
    })?;

    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(PlannerError::invalid("annual_rate", "rate too small to amortize"));
    }

    // scale P last so large principals only overflow when the answer would
    let annuity = r
        .checked_mul(growth)
        .and_then(|num| num.checked_div(denominator))
        .ok_or_else(|| {
            PlannerError::invalid("annual_rate", "r * (1 + r)^n exceeds decimal range")
        })?;

    principal
        .as_decimal()
        .checked_mul(annuity)
        .map(Money::from_decimal_round_up)
        .ok_or_else(|| PlannerError::invalid("principal", "payment exceeds decimal range"))
}

/// `(1 + r)^n` by repeated multiplication, `None` on overflow
fn compound_factor(r: Decimal, n: u32) -> Option<Decimal> {
    let base = Decimal::ONE + r;
    let mut factor = Decimal::ONE;
    for _ in 0..n {
        factor = factor.checked_mul(base)?;
    }
    Some(factor)
}
