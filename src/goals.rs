use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::GoalThresholds;
use crate::decimal::Money;
use crate::errors::{PlannerError, Result};
use crate::types::{EntryId, GoalCategory, ProgressTier};

const SECONDS_PER_DAY: i64 = 86_400;

/// savings goal with a target date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: EntryId,
    pub name: String,
    pub target: Money,
    pub current: Money,
    pub deadline: NaiveDate,
    pub category: GoalCategory,
}

/// derived progress figures for a goal at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: EntryId,
    pub percentage: Decimal,
    pub tier: ProgressTier,
    pub remaining: Money,
    /// whole days until the deadline, negative once it has passed
    pub days_left: i64,
    /// savings per month needed to finish on time, in whole currency units
    pub monthly_needed: Money,
    pub completed: bool,
}

impl SavingsGoal {
    pub fn percentage(&self) -> Decimal {
        self.current.percent_of(self.target).unwrap_or(Decimal::ZERO)
    }

    pub fn remaining(&self) -> Money {
        (self.target - self.current).max(Money::ZERO)
    }

    /// days until the deadline (midnight UTC), rounded up
    pub fn days_left(&self, time: &SafeTimeProvider) -> i64 {
        let deadline = self.deadline.and_time(chrono::NaiveTime::MIN).and_utc();
        let seconds = (deadline - time.now()).num_seconds();
        (seconds + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY)
    }

    /// remaining amount spread over the months left, at least one month
    pub fn monthly_needed(&self, days_left: i64) -> Money {
        let remaining = self.remaining();
        if remaining.is_zero() {
            return Money::ZERO;
        }
        let months = (Decimal::from(days_left) / dec!(30)).max(Decimal::ONE);
        Money::from_decimal(
            (remaining.as_decimal() / months)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    pub fn progress(&self, time: &SafeTimeProvider, thresholds: &GoalThresholds) -> GoalProgress {
        let percentage = self.percentage();
        let days_left = self.days_left(time);
        GoalProgress {
            goal_id: self.id,
            percentage,
            tier: tier_for(percentage, thresholds),
            remaining: self.remaining(),
            days_left,
            monthly_needed: self.monthly_needed(days_left),
            completed: self.current >= self.target,
        }
    }
}

pub fn tier_for(percentage: Decimal, thresholds: &GoalThresholds) -> ProgressTier {
    if percentage >= thresholds.strong {
        ProgressTier::Strong
    } else if percentage >= thresholds.good {
        ProgressTier::Good
    } else if percentage >= thresholds.fair {
        ProgressTier::Fair
    } else {
        ProgressTier::Low
    }
}

/// collection of savings goals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalTracker {
    goals: Vec<SavingsGoal>,
    thresholds: GoalThresholds,
}

impl GoalTracker {
    pub fn new(thresholds: GoalThresholds) -> Self {
        Self {
            goals: Vec::new(),
            thresholds,
        }
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    pub fn goal(&self, id: EntryId) -> Result<&SavingsGoal> {
        self.goals
            .iter()
            .find(|g| g.id == id)
            .ok_or(PlannerError::GoalNotFound { id })
    }

    /// add a goal starting from nothing saved
    pub fn add_goal(
        &mut self,
        name: &str,
        target: Money,
        deadline: NaiveDate,
        category: GoalCategory,
    ) -> Result<EntryId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::invalid("name", "goal name must not be empty"));
        }
        if !target.is_positive() {
            return Err(PlannerError::invalid(
                "target",
                format!("must be positive, got {}", target),
            ));
        }

        let id = Uuid::new_v4();
        self.goals.push(SavingsGoal {
            id,
            name: name.to_string(),
            target,
            current: Money::ZERO,
            deadline,
            category,
        });
        debug!(goal = name, target = %target, %deadline, "savings goal added");
        Ok(id)
    }

    pub fn remove_goal(&mut self, id: EntryId) -> Result<SavingsGoal> {
        let index = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or(PlannerError::GoalNotFound { id })?;
        Ok(self.goals.remove(index))
    }

    /// add savings to a goal and return its updated progress
    pub fn contribute(
        &mut self,
        id: EntryId,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<GoalProgress> {
        if !amount.is_positive() {
            return Err(PlannerError::invalid(
                "amount",
                format!("must be positive, got {}", amount),
            ));
        }
        let thresholds = self.thresholds;
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(PlannerError::GoalNotFound { id })?;

        let was_complete = goal.current >= goal.target;
        goal.current += amount;
        let progress = goal.progress(time, &thresholds);
        if progress.completed && !was_complete {
            info!(goal = %goal.name, "savings goal reached");
        }
        Ok(progress)
    }

    pub fn progress(&self, id: EntryId, time: &SafeTimeProvider) -> Result<GoalProgress> {
        Ok(self.goal(id)?.progress(time, &self.thresholds))
    }

    pub fn total_saved(&self) -> Money {
        self.goals.iter().map(|g| g.current).sum()
    }

    pub fn total_target(&self) -> Money {
        self.goals.iter().map(|g| g.target).sum()
    }

    /// mean progress across goals, rounded to a whole percent
    pub fn average_progress(&self) -> Decimal {
        if self.goals.is_empty() {
            return Decimal::ZERO;
        }
        let sum: Decimal = self.goals.iter().map(|g| g.percentage()).sum();
        (sum / Decimal::from(self.goals.len()))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_year() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()))
    }

    fn tracker(time: &SafeTimeProvider) -> (GoalTracker, Vec<EntryId>) {
        let mut tracker = GoalTracker::default();
        let rows = [
            ("Emergency Fund", 50_000, 32_000, date(2025, 12, 31), GoalCategory::Savings),
            ("Vacation to Cape Town", 15_000, 8_500, date(2025, 7, 15), GoalCategory::Travel),
            ("New Car Down Payment", 80_000, 45_000, date(2025, 10, 1), GoalCategory::MajorPurchase),
        ];
        let mut ids = Vec::new();
        for (name, target, current, deadline, category) in rows {
            let id = tracker.add_goal(name, Money::from_major(target), deadline, category).unwrap();
            tracker.contribute(id, Money::from_major(current), time).unwrap();
            ids.push(id);
        }
        (tracker, ids)
    }

    #[test]
    fn test_goal_progress() {
        let time = new_year();
        let (tracker, ids) = tracker(&time);

        let emergency = tracker.progress(ids[0], &time).unwrap();
        assert_eq!(emergency.percentage, dec!(64));
        assert_eq!(emergency.tier, ProgressTier::Good);
        assert_eq!(emergency.days_left, 364);
        assert_eq!(emergency.remaining, Money::from_major(18_000));
        // 18,000 over 364 / 30 months
        assert_eq!(emergency.monthly_needed, Money::from_major(1_484));
        assert!(!emergency.completed);
    }

    #[test]
    fn test_tracker_totals() {
        let time = new_year();
        let (tracker, _) = tracker(&time);

        assert_eq!(tracker.total_saved(), Money::from_major(85_500));
        assert_eq!(tracker.total_target(), Money::from_major(145_000));
        // (64 + 56.67 + 56.25) / 3
        assert_eq!(tracker.average_progress(), dec!(59));
        assert_eq!(GoalTracker::default().average_progress(), Decimal::ZERO);
    }

    #[test]
    fn test_days_left_rounds_up_partial_days() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 6, 30, 18, 0, 0).unwrap(),
        ));
        let goal = SavingsGoal {
            id: Uuid::new_v4(),
            name: "Trip".to_string(),
            target: Money::from_major(1_000),
            current: Money::ZERO,
            deadline: date(2025, 7, 2),
            category: GoalCategory::Travel,
        };
        assert_eq!(goal.days_left(&time), 2);

        let past = SavingsGoal { deadline: date(2025, 6, 29), ..goal };
        assert_eq!(past.days_left(&time), -1);
    }

    #[test]
    fn test_near_deadline_needs_full_remainder() {
        let time = new_year();
        let mut tracker = GoalTracker::default();
        let id = tracker
            .add_goal("Course fees", Money::from_major(3_000), date(2025, 1, 15), GoalCategory::Education)
            .unwrap();

        let progress = tracker.progress(id, &time).unwrap();
        assert_eq!(progress.tier, ProgressTier::Low);
        assert_eq!(progress.monthly_needed, Money::from_major(3_000));
    }

    #[test]
    fn test_completion() {
        let time = new_year();
        let (mut tracker, ids) = tracker(&time);

        let progress = tracker.contribute(ids[1], Money::from_major(7_000), &time).unwrap();
        assert!(progress.completed);
        assert_eq!(progress.tier, ProgressTier::Strong);
        assert_eq!(progress.remaining, Money::ZERO);
        assert_eq!(progress.monthly_needed, Money::ZERO);
    }

    #[test]
    fn test_tiers() {
        let t = GoalThresholds::default();
        assert_eq!(tier_for(dec!(10), &t), ProgressTier::Low);
        assert_eq!(tier_for(dec!(25), &t), ProgressTier::Fair);
        assert_eq!(tier_for(dec!(50), &t), ProgressTier::Good);
        assert_eq!(tier_for(dec!(75), &t), ProgressTier::Strong);
    }

    #[test]
    fn test_validation_and_lookup() {
        let time = new_year();
        let (mut tracker, ids) = tracker(&time);

        assert!(tracker.add_goal("", Money::from_major(10), date(2025, 5, 1), GoalCategory::Other).is_err());
        assert!(tracker.add_goal("Bike", Money::ZERO, date(2025, 5, 1), GoalCategory::Other).is_err());
        assert!(tracker.contribute(ids[0], Money::from_major(-5), &time).is_err());

        let removed = tracker.remove_goal(ids[2]).unwrap();
        assert_eq!(removed.category, GoalCategory::MajorPurchase);
        assert_eq!(
            tracker.progress(ids[2], &time),
            Err(PlannerError::GoalNotFound { id: ids[2] })
        );
    }
}
