/// loan estimator - adjust inputs, check affordability, products and schedule
use chrono::NaiveDate;
use finance_planner_rs::{
    check_eligibility, AmortizationSchedule, CreditHistory, EligibilityApplicant,
    EmploymentStatus, LoanEstimator, Money, PlannerConfig, Rate,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = PlannerConfig::default();

    let mut estimator = LoanEstimator::builder()
        .amount(Money::from_major(150_000))
        .term_months(36)
        .config(config.clone())
        .build()?;

    println!("=== initial estimate ===");
    println!("{}\n", estimator.json());

    estimator.set_rate(Rate::from_percent(dec!(10.5)))?;
    let summary = estimator.set_monthly_income_text("18000")?;
    if let Some(a) = &summary.affordability {
        println!("debt-to-income: {} ({})", a.display_percentage(), a.message);
    }
    println!("matching products: {:?}\n", summary.matching_products);

    // rejected change leaves the estimate as it was
    if let Err(e) = estimator.set_term_months(80) {
        println!("rejected: {}\n", e);
    }

    let schedule = AmortizationSchedule::generate(
        estimator.inputs(),
        NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("bad date")?,
    )?;
    println!("first three payments:");
    for p in schedule.payments.iter().take(3) {
        println!(
            "  #{} {} pay {} (interest {}, principal {}) balance {}",
            p.payment_number,
            p.payment_date,
            p.payment_amount.to_cents(),
            p.interest_portion.to_cents(),
            p.principal_portion.to_cents(),
            p.ending_balance.to_cents(),
        );
    }

    let applicant = EligibilityApplicant {
        age: 25,
        employment_status: EmploymentStatus::PermanentlyEmployed,
        months_employed: 12,
        monthly_salary: Money::from_major(18_000),
        monthly_expenses: Money::from_major(8_000),
        credit_history: CreditHistory::Good,
        existing_loans: 0,
        documents_provided: true,
    };
    let report = check_eligibility(&applicant, &config.eligibility);
    println!("\neligible: {} (disposable income {})", report.eligible, report.disposable_income);

    Ok(())
}
