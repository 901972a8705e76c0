use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::config::EligibilityRules;
use crate::decimal::Money;
use crate::types::{CreditHistory, EmploymentStatus};

/// applicant details for a loan pre-qualification check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityApplicant {
    pub age: u32,
    pub employment_status: EmploymentStatus,
    pub months_employed: u32,
    pub monthly_salary: Money,
    pub monthly_expenses: Money,
    pub credit_history: CreditHistory,
    pub existing_loans: u32,
    pub documents_provided: bool,
}

/// a failed pre-qualification rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EligibilityFailure {
    AgeOutOfRange { min: u32, max: u32, age: u32 },
    IncomeBelowMinimum { minimum: Money, income: Money },
    Unemployed,
    EmploymentTooShort { minimum_months: u32, months: u32 },
    CreditHistoryTooWeak { minimum: CreditHistory, actual: CreditHistory },
    MissingDocuments,
}

impl fmt::Display for EligibilityFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityFailure::AgeOutOfRange { min, max, age } => {
                write!(f, "applicant must be {}-{} years old, is {}", min, max, age)
            }
            EligibilityFailure::IncomeBelowMinimum { minimum, income } => {
                write!(f, "monthly income {} below minimum {}", income, minimum)
            }
            EligibilityFailure::Unemployed => write!(f, "applicant must be employed"),
            EligibilityFailure::EmploymentTooShort { minimum_months, months } => write!(
                f,
                "employed for {} months, at least {} required",
                months, minimum_months
            ),
            EligibilityFailure::CreditHistoryTooWeak { minimum, actual } => {
                write!(f, "credit history {:?} below {:?}", actual, minimum)
            }
            EligibilityFailure::MissingDocuments => {
                write!(f, "proof of income and identity required")
            }
        }
    }
}

/// outcome of a pre-qualification check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub failures: Vec<EligibilityFailure>,
    /// salary left after expenses
    pub disposable_income: Money,
    /// loans the applicant already carries, reported for the lender's review
    pub existing_loans: u32,
}

/// check an applicant against every rule and collect all failures
pub fn check_eligibility(applicant: &EligibilityApplicant, rules: &EligibilityRules) -> EligibilityReport {
    let mut failures = Vec::new();

    if applicant.age < rules.min_age || applicant.age > rules.max_age {
        failures.push(EligibilityFailure::AgeOutOfRange {
            min: rules.min_age,
            max: rules.max_age,
            age: applicant.age,
        });
    }

    if applicant.monthly_salary < rules.min_monthly_income {
        failures.push(EligibilityFailure::IncomeBelowMinimum {
            minimum: rules.min_monthly_income,
            income: applicant.monthly_salary,
        });
    }

    if applicant.employment_status == EmploymentStatus::Unemployed {
        failures.push(EligibilityFailure::Unemployed);
    } else if applicant.months_employed < rules.min_months_employed {
        failures.push(EligibilityFailure::EmploymentTooShort {
            minimum_months: rules.min_months_employed,
            months: applicant.months_employed,
        });
    }

    if applicant.credit_history < rules.min_credit_history {
        failures.push(EligibilityFailure::CreditHistoryTooWeak {
            minimum: rules.min_credit_history,
            actual: applicant.credit_history,
        });
    }

    if rules.require_documents && !applicant.documents_provided {
        failures.push(EligibilityFailure::MissingDocuments);
    }

    debug!(failures = failures.len(), "eligibility checked");

    EligibilityReport {
        eligible: failures.is_empty(),
        failures,
        disposable_income: applicant.monthly_salary - applicant.monthly_expenses,
        existing_loans: applicant.existing_loans,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant() -> EligibilityApplicant {
        EligibilityApplicant {
            age: 25,
            employment_status: EmploymentStatus::PermanentlyEmployed,
            months_employed: 18,
            monthly_salary: Money::from_major(15_000),
            monthly_expenses: Money::from_major(8_000),
            credit_history: CreditHistory::Excellent,
            existing_loans: 0,
            documents_provided: true,
        }
    }

    #[test]
    fn test_qualifying_applicant() {
        let report = check_eligibility(&applicant(), &EligibilityRules::default());
        assert!(report.eligible);
        assert!(report.failures.is_empty());
        assert_eq!(report.disposable_income, Money::from_major(7_000));
        assert_eq!(report.existing_loans, 0);
    }

    #[test]
    fn test_existing_loans_carried_into_report() {
        let report = check_eligibility(
            &EligibilityApplicant { existing_loans: 3, ..applicant() },
            &EligibilityRules::default(),
        );
        assert!(report.eligible);
        assert_eq!(report.existing_loans, 3);
    }

    #[test]
    fn test_age_limits_are_inclusive() {
        let rules = EligibilityRules::default();
        for (age, ok) in [(17, false), (18, true), (65, true), (66, false)] {
            let report = check_eligibility(&EligibilityApplicant { age, ..applicant() }, &rules);
            assert_eq!(report.eligible, ok, "age {}", age);
        }
    }

    #[test]
    fn test_collects_all_failures() {
        let weak = EligibilityApplicant {
            age: 70,
            employment_status: EmploymentStatus::Unemployed,
            months_employed: 0,
            monthly_salary: Money::from_major(2_000),
            monthly_expenses: Money::from_major(2_500),
            credit_history: CreditHistory::Fair,
            existing_loans: 2,
            documents_provided: false,
        };
        let report = check_eligibility(&weak, &EligibilityRules::default());

        assert!(!report.eligible);
        assert_eq!(report.failures.len(), 5);
        assert!(report.failures.contains(&EligibilityFailure::Unemployed));
        assert!(report.disposable_income.is_negative());
    }

    #[test]
    fn test_short_employment() {
        let report = check_eligibility(
            &EligibilityApplicant {
                employment_status: EmploymentStatus::ContractWorker,
                months_employed: 2,
                ..applicant()
            },
            &EligibilityRules::default(),
        );
        assert_eq!(
            report.failures,
            vec![EligibilityFailure::EmploymentTooShort { minimum_months: 3, months: 2 }]
        );
        assert_eq!(report.failures[0].to_string(), "employed for 2 months, at least 3 required");
    }

    #[test]
    fn test_documents_optional_when_configured() {
        let rules = EligibilityRules {
            require_documents: false,
            ..EligibilityRules::default()
        };
        let report = check_eligibility(
            &EligibilityApplicant { documents_provided: false, ..applicant() },
            &rules,
        );
        assert!(report.eligible);
    }
}
