use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result};
use crate::loan::calculator::LoanInputs;
use crate::types::LoanKind;

/// terms of a loan product on offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProduct {
    pub kind: LoanKind,
    pub name: String,
    pub description: String,
    pub min_rate: Rate,
    pub max_rate: Rate,
    pub max_amount: Money,
    pub min_term_months: u32,
    pub max_term_months: u32,
}

/// a single way loan inputs fall outside a product's terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductMismatch {
    AmountAboveMaximum { maximum: Money, requested: Money },
    RateOutOfRange { min: Rate, max: Rate, requested: Rate },
    TermOutOfRange { min: u32, max: u32, requested: u32 },
}

impl fmt::Display for ProductMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductMismatch::AmountAboveMaximum { maximum, requested } => {
                write!(f, "amount {} above maximum {}", requested, maximum)
            }
            ProductMismatch::RateOutOfRange { min, max, requested } => {
                write!(f, "rate {} outside {}-{}", requested, min, max)
            }
            ProductMismatch::TermOutOfRange { min, max, requested } => {
                write!(f, "term {} months outside {}-{} months", requested, min, max)
            }
        }
    }
}

impl LoanProduct {
    pub fn personal_loan() -> Self {
        Self {
            kind: LoanKind::PersonalLoan,
            name: "Personal Loan".to_string(),
            description: "For personal expenses, debt consolidation, or emergencies".to_string(),
            min_rate: Rate::from_percentage(10),
            max_rate: Rate::from_percentage(15),
            max_amount: Money::from_major(200_000),
            min_term_months: 6,
            max_term_months: 60,
        }
    }

    pub fn vehicle_finance() -> Self {
        Self {
            kind: LoanKind::VehicleFinance,
            name: "Vehicle Finance".to_string(),
            description: "Finance your dream car with competitive rates".to_string(),
            min_rate: Rate::from_percentage(8),
            max_rate: Rate::from_percentage(12),
            max_amount: Money::from_major(500_000),
            min_term_months: 12,
            max_term_months: 72,
        }
    }

    pub fn home_loan() -> Self {
        Self {
            kind: LoanKind::HomeLoan,
            name: "Home Loan".to_string(),
            description: "Make your homeownership dreams a reality".to_string(),
            min_rate: Rate::from_percentage(6),
            max_rate: Rate::from_percentage(10),
            max_amount: Money::from_major(2_000_000),
            min_term_months: 5 * 12,
            max_term_months: 30 * 12,
        }
    }

    pub fn student_loan() -> Self {
        Self {
            kind: LoanKind::StudentLoan,
            name: "Student Loan".to_string(),
            description: "Invest in your education and future".to_string(),
            min_rate: Rate::from_percentage(5),
            max_rate: Rate::from_percentage(8),
            max_amount: Money::from_major(100_000),
            min_term_months: 12,
            max_term_months: 84,
        }
    }

    /// the standard product line-up
    pub fn catalog() -> Vec<Self> {
        vec![
            Self::personal_loan(),
            Self::vehicle_finance(),
            Self::home_loan(),
            Self::student_loan(),
        ]
    }

    /// every term of this product the inputs violate, empty when they fit
    pub fn check(&self, inputs: &LoanInputs) -> Vec<ProductMismatch> {
        let mut mismatches = Vec::new();

        if inputs.principal > self.max_amount {
            mismatches.push(ProductMismatch::AmountAboveMaximum {
                maximum: self.max_amount,
                requested: inputs.principal,
            });
        }
        if inputs.annual_rate < self.min_rate || inputs.annual_rate > self.max_rate {
            mismatches.push(ProductMismatch::RateOutOfRange {
                min: self.min_rate,
                max: self.max_rate,
                requested: inputs.annual_rate,
            });
        }
        if inputs.term_months < self.min_term_months || inputs.term_months > self.max_term_months {
            mismatches.push(ProductMismatch::TermOutOfRange {
                min: self.min_term_months,
                max: self.max_term_months,
                requested: inputs.term_months,
            });
        }

        mismatches
    }

    pub fn fits(&self, inputs: &LoanInputs) -> bool {
        self.check(inputs).is_empty()
    }

    /// midpoint of the advertised rate range
    pub fn typical_rate(&self) -> Rate {
        Rate::from_decimal((self.min_rate.as_decimal() + self.max_rate.as_decimal()) / dec!(2))
    }

    /// human readable rate range, e.g. "10-15%"
    pub fn rate_label(&self) -> String {
        format!(
            "{}-{}%",
            self.min_rate.as_percentage().normalize(),
            self.max_rate.as_percentage().normalize()
        )
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.min_rate > self.max_rate
            || self.min_term_months > self.max_term_months
            || !self.max_amount.is_positive()
        {
            return Err(PlannerError::InvalidConfiguration {
                message: format!("inconsistent terms for product {}", self.name),
            });
        }
        Ok(())
    }
}

/// products whose terms accept the given inputs
pub fn matching_products<'a>(products: &'a [LoanProduct], inputs: &LoanInputs) -> Vec<&'a LoanProduct> {
    products.iter().filter(|p| p.fits(inputs)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_labels() {
        let catalog = LoanProduct::catalog();
        let labels: Vec<String> = catalog.iter().map(|p| p.rate_label()).collect();
        assert_eq!(labels, vec!["10-15%", "8-12%", "6-10%", "5-8%"]);
        assert_eq!(LoanProduct::home_loan().max_term_months, 360);
    }

    #[test]
    fn test_check_reports_every_mismatch() {
        let product = LoanProduct::personal_loan();
        let inputs = LoanInputs::new(Money::from_major(250_000), Rate::from_percentage(20), 72);

        let mismatches = product.check(&inputs);
        assert_eq!(mismatches.len(), 3);
        assert!(matches!(mismatches[0], ProductMismatch::AmountAboveMaximum { .. }));
        assert_eq!(mismatches[2].to_string(), "term 72 months outside 6-60 months");
    }

    #[test]
    fn test_matching_products() {
        let catalog = LoanProduct::catalog();
        let inputs = LoanInputs::new(Money::from_major(100_000), Rate::from_percentage(10), 24);

        let names: Vec<&str> = matching_products(&catalog, &inputs)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Personal Loan", "Vehicle Finance"]);
    }

    #[test]
    fn test_typical_rate() {
        assert_eq!(LoanProduct::personal_loan().typical_rate().as_percentage(), dec!(12.5));
    }
}
