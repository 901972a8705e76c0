use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// identifier for budget categories and savings goals
pub type EntryId = Uuid;

/// loan product kinds offered in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanKind {
    PersonalLoan,
    VehicleFinance,
    HomeLoan,
    StudentLoan,
}

/// affordability verdict for a debt-to-income ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affordability {
    /// ratio below the configured threshold
    WithinLimits,
    /// ratio at or above the threshold
    Stretched,
}

/// employment status of a loan applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    PermanentlyEmployed,
    SelfEmployed,
    ContractWorker,
    Unemployed,
}

/// self-reported credit history
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreditHistory {
    Poor,
    Fair,
    Good,
    Excellent,
}

/// budget tracking period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Weekly,
    Quarterly,
}

/// status of a budget category by share spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::Warning => "Warning",
            BudgetStatus::OverBudget => "Over Budget",
        };
        f.write_str(label)
    }
}

/// savings goal categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    #[default]
    Savings,
    Travel,
    MajorPurchase,
    Education,
    Other,
}

/// progress band of a savings goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProgressTier {
    /// below 25%
    Low,
    /// 25% up to 50%
    Fair,
    /// 50% up to 75%
    Good,
    /// 75% and above
    Strong,
}
