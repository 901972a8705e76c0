use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{LoanBounds, PlannerConfig};
use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result};
use crate::loan::{compute_loan, AffordabilityAssessment, LoanInputs, LoanProduct, LoanResult};
use crate::types::LoanKind;

/// recomputed estimate for the current estimator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub inputs: LoanInputs,
    pub monthly_income: Option<Money>,
    pub result: LoanResult,
    pub affordability: Option<AffordabilityAssessment>,
    pub matching_products: Vec<LoanKind>,
}

/// interactive loan estimator
///
/// Holds the inputs the user is adjusting and keeps a summary that is
/// recomputed on every accepted change. Rejected changes leave the previous
/// state untouched.
#[derive(Debug, Clone)]
pub struct LoanEstimator {
    bounds: LoanBounds,
    affordability_threshold: Rate,
    products: Vec<LoanProduct>,
    inputs: LoanInputs,
    monthly_income: Option<Money>,
    summary: LoanSummary,
}

impl LoanEstimator {
    pub fn builder() -> LoanEstimatorBuilder {
        LoanEstimatorBuilder::new()
    }

    pub fn inputs(&self) -> &LoanInputs {
        &self.inputs
    }

    pub fn summary(&self) -> &LoanSummary {
        &self.summary
    }

    pub fn result(&self) -> &LoanResult {
        &self.summary.result
    }

    pub fn bounds(&self) -> &LoanBounds {
        &self.bounds
    }

    pub fn set_amount(&mut self, amount: Money) -> Result<&LoanSummary> {
        self.bounds.amount.check("principal", amount)?;
        self.apply(LoanInputs { principal: amount, ..self.inputs }, self.monthly_income)
    }

    pub fn set_term_months(&mut self, term_months: u32) -> Result<&LoanSummary> {
        self.bounds.term_months.check("term_months", term_months)?;
        self.apply(LoanInputs { term_months, ..self.inputs }, self.monthly_income)
    }

    pub fn set_rate(&mut self, annual_rate: Rate) -> Result<&LoanSummary> {
        self.bounds.annual_rate.check("annual_rate", annual_rate)?;
        self.apply(LoanInputs { annual_rate, ..self.inputs }, self.monthly_income)
    }

    /// set or clear the optional monthly income
    pub fn set_monthly_income(&mut self, income: Option<Money>) -> Result<&LoanSummary> {
        if let Some(i) = income {
            if i.is_negative() {
                return Err(PlannerError::invalid(
                    "monthly_income",
                    format!("must not be negative, got {}", i),
                ));
            }
        }
        self.apply(self.inputs, income)
    }

    /// set the monthly income from free-form text; blank clears it
    pub fn set_monthly_income_text(&mut self, text: &str) -> Result<&LoanSummary> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self.set_monthly_income(None);
        }
        let income = Money::from_str_exact(trimmed).map_err(|e| {
            PlannerError::invalid("monthly_income", format!("'{}' is not a number: {}", trimmed, e))
        })?;
        self.set_monthly_income(Some(income))
    }

    /// json representation of the current summary
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.summary).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }

    fn apply(&mut self, inputs: LoanInputs, monthly_income: Option<Money>) -> Result<&LoanSummary> {
        let summary = summarize(
            &inputs,
            monthly_income,
            self.affordability_threshold,
            &self.products,
        )?;
        self.inputs = inputs;
        self.monthly_income = monthly_income;
        self.summary = summary;
        Ok(&self.summary)
    }
}

fn summarize(
    inputs: &LoanInputs,
    monthly_income: Option<Money>,
    threshold: Rate,
    products: &[LoanProduct],
) -> Result<LoanSummary> {
    let result = compute_loan(inputs)?;
    let affordability =
        AffordabilityAssessment::assess(result.monthly_payment, monthly_income, threshold);
    let matching_products = products
        .iter()
        .filter(|p| p.fits(inputs))
        .map(|p| p.kind)
        .collect();

    debug!(
        monthly_payment = %result.monthly_payment,
        affordable = affordability.as_ref().map(|a| a.is_affordable()),
        "estimator recomputed"
    );

    Ok(LoanSummary {
        inputs: *inputs,
        monthly_income,
        result,
        affordability,
        matching_products,
    })
}

/// builder for loan estimators
pub struct LoanEstimatorBuilder {
    amount: Option<Money>,
    rate: Option<Rate>,
    term_months: Option<u32>,
    monthly_income: Option<Money>,
    config: Option<PlannerConfig>,
}

impl Default for LoanEstimatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanEstimatorBuilder {
    pub fn new() -> Self {
        Self {
            amount: None,
            rate: None,
            term_months: None,
            monthly_income: None,
            config: None,
        }
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.term_months = Some(months);
        self
    }

    pub fn monthly_income(mut self, income: Money) -> Self {
        self.monthly_income = Some(income);
        self
    }

    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// build the estimator; unset inputs default to 100,000 over 24 months at 12%
    pub fn build(self) -> Result<LoanEstimator> {
        let config = match self.config {
            Some(config) => {
                config.validate()?;
                config
            }
            None => PlannerConfig::default(),
        };
        let bounds = config.loan_bounds;

        let inputs = LoanInputs::new(
            self.amount.unwrap_or_else(|| Money::from_major(100_000)),
            self.rate.unwrap_or_else(|| Rate::from_percentage(12)),
            self.term_months.unwrap_or(24),
        );
        bounds.amount.check("principal", inputs.principal)?;
        bounds.term_months.check("term_months", inputs.term_months)?;
        bounds.annual_rate.check("annual_rate", inputs.annual_rate)?;

        let summary = summarize(
            &inputs,
            self.monthly_income,
            config.affordability_threshold,
            &config.products,
        )?;

        Ok(LoanEstimator {
            bounds,
            affordability_threshold: config.affordability_threshold,
            products: config.products,
            inputs,
            monthly_income: self.monthly_income,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Affordability;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let estimator = LoanEstimator::builder().build().unwrap();

        assert_eq!(estimator.inputs().principal, Money::from_major(100_000));
        assert_eq!(estimator.inputs().term_months, 24);
        assert_eq!(estimator.result().monthly_payment.to_cents(), Money::from_cents(470735));
        assert!(estimator.summary().affordability.is_none());
        assert_eq!(
            estimator.summary().matching_products,
            vec![LoanKind::PersonalLoan, LoanKind::VehicleFinance]
        );
    }

    #[test]
    fn test_recomputes_on_every_change() {
        let mut estimator = LoanEstimator::builder().build().unwrap();
        let before = estimator.result().monthly_payment;

        let longer = estimator.set_term_months(48).unwrap().result.monthly_payment;
        assert!(longer < before);

        let pricier = estimator.set_rate(Rate::from_percent(dec!(15.5))).unwrap().result.monthly_payment;
        assert!(pricier > longer);

        let bigger = estimator.set_amount(Money::from_major(200_000)).unwrap().result.monthly_payment;
        assert!(bigger > pricier);
    }

    #[test]
    fn test_out_of_bounds_change_keeps_state() {
        let mut estimator = LoanEstimator::builder().build().unwrap();
        let before = estimator.summary().clone();

        assert!(estimator.set_term_months(7).unwrap_err().is_invalid_input());
        assert!(estimator.set_amount(Money::from_major(600_000)).is_err());
        assert!(estimator.set_rate(Rate::from_percentage(4)).is_err());
        assert_eq!(estimator.summary(), &before);
    }

    #[test]
    fn test_monthly_income_text() {
        let mut estimator = LoanEstimator::builder().build().unwrap();

        let summary = estimator.set_monthly_income_text("20000").unwrap();
        let affordability = summary.affordability.as_ref().unwrap();
        assert_eq!(affordability.verdict, Affordability::WithinLimits);
        assert_eq!(affordability.display_percentage(), "23.5%");

        let summary = estimator.set_monthly_income_text("  ").unwrap();
        assert!(summary.affordability.is_none());

        assert!(estimator.set_monthly_income_text("lots").is_err());
        assert!(estimator.set_monthly_income(Some(Money::from_major(-1))).is_err());
    }

    #[test]
    fn test_builder_rejects_off_slider_inputs() {
        let result = LoanEstimator::builder().term_months(100).build();
        assert!(matches!(
            result,
            Err(PlannerError::InvalidInput { field: "term_months", .. })
        ));
    }

    #[test]
    fn test_custom_config() {
        let mut config = PlannerConfig::default();
        config.affordability_threshold = Rate::from_percentage(20);

        let estimator = LoanEstimator::builder()
            .monthly_income(Money::from_major(20_000))
            .config(config)
            .build()
            .unwrap();

        let affordability = estimator.summary().affordability.as_ref().unwrap();
        assert_eq!(affordability.verdict, Affordability::Stretched);
    }

    #[test]
    fn test_json_view() {
        let estimator = LoanEstimator::builder().build().unwrap();
        let value: serde_json::Value = serde_json::from_str(&estimator.json()).unwrap();
        assert_eq!(value["inputs"]["term_months"], 24);
        assert!(value["result"]["monthly_payment"].is_string());
    }
}
