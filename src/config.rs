use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result};
use crate::loan::products::LoanProduct;
use crate::types::CreditHistory;

/// planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub loan_bounds: LoanBounds,
    /// debt-to-income ratio at which a loan stops being comfortable
    pub affordability_threshold: Rate,
    pub budget_thresholds: BudgetThresholds,
    pub goal_thresholds: GoalThresholds,
    pub eligibility: EligibilityRules,
    pub products: Vec<LoanProduct>,
}

/// value a slider can hold
pub trait SliderValue: Copy + PartialOrd + fmt::Display {
    /// position on the slider's numeric axis
    fn position(&self) -> Decimal;
}

impl SliderValue for Money {
    fn position(&self) -> Decimal {
        self.as_decimal()
    }
}

impl SliderValue for Rate {
    fn position(&self) -> Decimal {
        self.as_percentage()
    }
}

impl SliderValue for u32 {
    fn position(&self) -> Decimal {
        Decimal::from(*self)
    }
}

/// inclusive slider range with a fixed step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderBounds<T> {
    pub min: T,
    pub max: T,
    pub step: T,
}

impl<T: SliderValue> SliderBounds<T> {
    pub fn new(min: T, max: T, step: T) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// true when the value sits on a step boundary counted from `min`
    pub fn on_step(&self, value: T) -> bool {
        let step = self.step.position();
        if step.is_zero() {
            return true;
        }
        ((value.position() - self.min.position()) % step).is_zero()
    }

    /// validate a value against range and step
    pub fn check(&self, field: &'static str, value: T) -> Result<()> {
        if !self.contains(value) {
            return Err(PlannerError::invalid(
                field,
                format!("{} is outside {}..={}", value, self.min, self.max),
            ));
        }
        if !self.on_step(value) {
            return Err(PlannerError::invalid(
                field,
                format!("{} is not a multiple of step {} from {}", value, self.step, self.min),
            ));
        }
        Ok(())
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.min > self.max {
            return Err(PlannerError::InvalidConfiguration {
                message: format!("{} bounds: min {} exceeds max {}", name, self.min, self.max),
            });
        }
        if self.step.position() < Decimal::ZERO {
            return Err(PlannerError::InvalidConfiguration {
                message: format!("{} bounds: negative step {}", name, self.step),
            });
        }
        Ok(())
    }
}

/// input bounds enforced by the loan estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanBounds {
    pub amount: SliderBounds<Money>,
    pub term_months: SliderBounds<u32>,
    pub annual_rate: SliderBounds<Rate>,
}

impl Default for LoanBounds {
    fn default() -> Self {
        Self {
            amount: SliderBounds::new(
                Money::from_major(1_000),
                Money::from_major(500_000),
                Money::from_major(1_000),
            ),
            term_months: SliderBounds::new(6, 72, 6),
            annual_rate: SliderBounds::new(
                Rate::from_percentage(5),
                Rate::from_percentage(20),
                Rate::from_percent(dec!(0.5)),
            ),
        }
    }
}

/// budget usage thresholds, in percent of the category budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetThresholds {
    pub warning: Decimal,
    pub over_budget: Decimal,
    /// default alert threshold for new planners
    pub alert: Decimal,
}

impl Default for BudgetThresholds {
    fn default() -> Self {
        Self {
            warning: dec!(75),
            over_budget: dec!(90),
            alert: dec!(75),
        }
    }
}

/// lower edges of goal progress tiers, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalThresholds {
    pub fair: Decimal,
    pub good: Decimal,
    pub strong: Decimal,
}

impl Default for GoalThresholds {
    fn default() -> Self {
        Self {
            fair: dec!(25),
            good: dec!(50),
            strong: dec!(75),
        }
    }
}

/// pre-qualification rules for loan applicants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRules {
    pub min_age: u32,
    pub max_age: u32,
    pub min_monthly_income: Money,
    pub min_months_employed: u32,
    pub min_credit_history: CreditHistory,
    pub require_documents: bool,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            min_age: 18,
            max_age: 65,
            min_monthly_income: Money::from_major(3_000),
            min_months_employed: 3,
            min_credit_history: CreditHistory::Good,
            require_documents: true,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            loan_bounds: LoanBounds::default(),
            affordability_threshold: Rate::from_percentage(30),
            budget_thresholds: BudgetThresholds::default(),
            goal_thresholds: GoalThresholds::default(),
            eligibility: EligibilityRules::default(),
            products: LoanProduct::catalog(),
        }
    }
}

impl PlannerConfig {
    /// parse and validate a json configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlannerConfig =
            serde_json::from_str(json).map_err(|e| PlannerError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PlannerError::InvalidConfiguration {
            message: e.to_string(),
        })
    }

    /// check internal consistency
    pub fn validate(&self) -> Result<()> {
        self.loan_bounds.amount.validate("amount")?;
        self.loan_bounds.term_months.validate("term_months")?;
        self.loan_bounds.annual_rate.validate("annual_rate")?;

        if self.affordability_threshold.as_decimal() <= Decimal::ZERO {
            return Err(PlannerError::InvalidConfiguration {
                message: "affordability threshold must be positive".to_string(),
            });
        }

        let b = &self.budget_thresholds;
        if b.warning > b.over_budget {
            return Err(PlannerError::InvalidConfiguration {
                message: format!(
                    "budget warning threshold {} exceeds over-budget threshold {}",
                    b.warning, b.over_budget
                ),
            });
        }

        let g = &self.goal_thresholds;
        if !(g.fair <= g.good && g.good <= g.strong) {
            return Err(PlannerError::InvalidConfiguration {
                message: "goal thresholds must be ordered fair <= good <= strong".to_string(),
            });
        }

        let e = &self.eligibility;
        if e.min_age > e.max_age {
            return Err(PlannerError::InvalidConfiguration {
                message: format!("eligibility min age {} exceeds max age {}", e.min_age, e.max_age),
            });
        }

        for product in &self.products {
            product.validate()?;
        }

        Ok(())
    }

    /// look up a product by kind
    pub fn product(&self, kind: crate::types::LoanKind) -> Option<&LoanProduct> {
        self.products.iter().find(|p| p.kind == kind)
    }
}
