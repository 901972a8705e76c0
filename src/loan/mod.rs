pub mod affordability;
pub mod amortization;
pub mod calculator;
pub mod products;

pub use affordability::AffordabilityAssessment;
pub use amortization::{AmortizationSchedule, ScheduledPayment};
pub use calculator::{compute_loan, debt_to_income_ratio, LoanInputs, LoanResult};
pub use products::{matching_products, LoanProduct, ProductMismatch};
