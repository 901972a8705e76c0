use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::loan::calculator::debt_to_income_ratio;
use crate::types::Affordability;

/// debt-to-income assessment of a monthly obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub ratio: Rate,
    pub verdict: Affordability,
    pub message: String,
}

impl AffordabilityAssessment {
    /// assess a payment against income, `None` without a positive income
    pub fn assess(
        monthly_payment: Money,
        monthly_income: Option<Money>,
        threshold: Rate,
    ) -> Option<Self> {
        let ratio = debt_to_income_ratio(monthly_payment, monthly_income)?;
        let verdict = if ratio < threshold {
            Affordability::WithinLimits
        } else {
            Affordability::Stretched
        };
        let message = match verdict {
            Affordability::WithinLimits => "Excellent! Well within recommended limits",
            Affordability::Stretched => "Consider a lower loan amount or longer term",
        };
        Some(Self {
            ratio,
            verdict,
            message: message.to_string(),
        })
    }

    /// ratio as a percentage rounded to one decimal place
    pub fn display_percentage(&self) -> String {
        format!("{:.1}%", self.ratio.as_percentage().round_dp(1))
    }

    pub fn is_affordable(&self) -> bool {
        self.verdict == Affordability::WithinLimits
    }
}
