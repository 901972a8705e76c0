use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::BudgetThresholds;
use crate::decimal::Money;
use crate::errors::{PlannerError, Result};
use crate::types::{BudgetPeriod, BudgetStatus, EntryId};

/// spending budget for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: EntryId,
    pub name: String,
    pub budget: Money,
    pub spent: Money,
}

impl BudgetCategory {
    /// share of the budget spent, in percent
    pub fn usage_percentage(&self) -> Decimal {
        self.spent.percent_of(self.budget).unwrap_or(Decimal::ZERO)
    }

    /// may be negative once overspent
    pub fn remaining(&self) -> Money {
        self.budget - self.spent
    }

    pub fn status(&self, thresholds: &BudgetThresholds) -> BudgetStatus {
        status_for(self.usage_percentage(), thresholds)
    }
}

/// status band for a usage percentage
pub fn status_for(usage: Decimal, thresholds: &BudgetThresholds) -> BudgetStatus {
    if usage >= thresholds.over_budget {
        BudgetStatus::OverBudget
    } else if usage >= thresholds.warning {
        BudgetStatus::Warning
    } else {
        BudgetStatus::OnTrack
    }
}

/// user adjustable planner settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSettings {
    /// usage percentage at which a category raises an alert
    pub alert_threshold: Decimal,
    pub period: BudgetPeriod,
}

/// aggregate view over all categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetTotals {
    pub total_budget: Money,
    pub total_spent: Money,
    pub remaining: Money,
    pub usage_percentage: Decimal,
}

/// category that has reached the alert threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub category_id: EntryId,
    pub name: String,
    pub usage_percentage: Decimal,
    pub status: BudgetStatus,
}

/// budget planner holding categories for one period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPlanner {
    categories: Vec<BudgetCategory>,
    settings: BudgetSettings,
    thresholds: BudgetThresholds,
}

impl Default for BudgetPlanner {
    fn default() -> Self {
        Self::new(BudgetThresholds::default())
    }
}

impl BudgetPlanner {
    pub fn new(thresholds: BudgetThresholds) -> Self {
        Self {
            categories: Vec::new(),
            settings: BudgetSettings {
                alert_threshold: thresholds.alert,
                period: BudgetPeriod::default(),
            },
            thresholds,
        }
    }

    pub fn categories(&self) -> &[BudgetCategory] {
        &self.categories
    }

    pub fn settings(&self) -> &BudgetSettings {
        &self.settings
    }

    pub fn category(&self, id: EntryId) -> Result<&BudgetCategory> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(PlannerError::CategoryNotFound { id })
    }

    /// add a category with nothing spent yet
    pub fn add_category(&mut self, name: &str, budget: Money) -> Result<EntryId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::invalid("category", "name must not be empty"));
        }
        if !budget.is_positive() {
            return Err(PlannerError::invalid(
                "budget",
                format!("must be positive, got {}", budget),
            ));
        }

        let id = Uuid::new_v4();
        self.categories.push(BudgetCategory {
            id,
            name: name.to_string(),
            budget,
            spent: Money::ZERO,
        });
        debug!(category = name, budget = %budget, "budget category added");
        Ok(id)
    }

    pub fn remove_category(&mut self, id: EntryId) -> Result<BudgetCategory> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(PlannerError::CategoryNotFound { id })?;
        Ok(self.categories.remove(index))
    }

    /// record spending against a category and return its new status
    pub fn record_spending(&mut self, id: EntryId, amount: Money) -> Result<BudgetStatus> {
        if !amount.is_positive() {
            return Err(PlannerError::invalid(
                "amount",
                format!("must be positive, got {}", amount),
            ));
        }
        let thresholds = self.thresholds;
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(PlannerError::CategoryNotFound { id })?;

        category.spent += amount;
        let status = category.status(&thresholds);
        if status == BudgetStatus::OverBudget {
            warn!(category = %category.name, spent = %category.spent, "category over budget");
        }
        Ok(status)
    }

    pub fn set_alert_threshold(&mut self, percentage: Decimal) -> Result<()> {
        if percentage <= Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(PlannerError::invalid(
                "alert_threshold",
                format!("must be within (0, 100], got {}", percentage),
            ));
        }
        self.settings.alert_threshold = percentage;
        Ok(())
    }

    pub fn set_period(&mut self, period: BudgetPeriod) {
        self.settings.period = period;
    }

    pub fn totals(&self) -> BudgetTotals {
        let total_budget: Money = self.categories.iter().map(|c| c.budget).sum();
        let total_spent: Money = self.categories.iter().map(|c| c.spent).sum();
        BudgetTotals {
            total_budget,
            total_spent,
            remaining: total_budget - total_spent,
            usage_percentage: total_spent.percent_of(total_budget).unwrap_or(Decimal::ZERO),
        }
    }

    /// categories at or past the alert threshold, highest usage first
    pub fn alerts(&self) -> Vec<BudgetAlert> {
        let mut alerts: Vec<BudgetAlert> = self
            .categories
            .iter()
            .filter(|c| c.usage_percentage() >= self.settings.alert_threshold)
            .map(|c| BudgetAlert {
                category_id: c.id,
                name: c.name.clone(),
                usage_percentage: c.usage_percentage(),
                status: c.status(&self.thresholds),
            })
            .collect();
        alerts.sort_by(|a, b| b.usage_percentage.cmp(&a.usage_percentage));
        alerts
    }
}
