pub mod budget;
pub mod config;
pub mod decimal;
pub mod eligibility;
pub mod errors;
pub mod estimator;
pub mod goals;
pub mod loan;
pub mod types;

// re-export key types
pub use budget::{BudgetAlert, BudgetCategory, BudgetPlanner, BudgetSettings, BudgetTotals};
pub use config::{LoanBounds, PlannerConfig, SliderBounds};
pub use decimal::{Money, Rate};
pub use eligibility::{check_eligibility, EligibilityApplicant, EligibilityFailure, EligibilityReport};
pub use errors::{PlannerError, Result};
pub use estimator::{LoanEstimator, LoanEstimatorBuilder, LoanSummary};
pub use goals::{GoalProgress, GoalTracker, SavingsGoal};
pub use loan::{
    compute_loan, debt_to_income_ratio, AffordabilityAssessment, AmortizationSchedule,
    LoanInputs, LoanProduct, LoanResult, ScheduledPayment,
};
pub use types::{
    Affordability, BudgetPeriod, BudgetStatus, CreditHistory, EmploymentStatus, EntryId,
    GoalCategory, LoanKind, ProgressTier,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
