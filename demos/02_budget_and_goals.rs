/// budget and goals - category usage, alerts and savings progress
use chrono::{NaiveDate, TimeZone, Utc};
use finance_planner_rs::{
    BudgetPlanner, GoalCategory, GoalTracker, Money, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut budget = BudgetPlanner::default();
    let food = budget.add_category("Food & Dining", Money::from_major(2_500))?;
    let transport = budget.add_category("Transportation", Money::from_major(2_000))?;

    budget.record_spending(food, Money::from_major(2_400))?;
    let status = budget.record_spending(transport, Money::from_major(1_200))?;
    println!("transportation: {}", status);

    let totals = budget.totals();
    println!(
        "spent {} of {} ({}%)",
        totals.total_spent,
        totals.total_budget,
        totals.usage_percentage.round_dp(1)
    );
    for alert in budget.alerts() {
        println!("  alert: {} at {}% ({})", alert.name, alert.usage_percentage.round_dp(1), alert.status);
    }

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().ok_or("bad time")?,
    ));
    let mut goals = GoalTracker::default();
    let fund = goals.add_goal(
        "Emergency Fund",
        Money::from_major(50_000),
        NaiveDate::from_ymd_opt(2025, 12, 31).ok_or("bad date")?,
        GoalCategory::Savings,
    )?;

    let progress = goals.contribute(fund, Money::from_major(32_000), &time)?;
    println!(
        "\nemergency fund: {}% ({:?}), {} days left, {}/month needed",
        progress.percentage.round_dp(1),
        progress.tier,
        progress.days_left,
        progress.monthly_needed
    );

    Ok(())
}
