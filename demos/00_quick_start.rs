/// quick start - minimal loan estimate
use finance_planner_rs::{compute_loan, LoanInputs, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 100,000 over 24 months at 12%
    let inputs = LoanInputs::new(Money::from_major(100_000), Rate::from_percentage(12), 24);
    let result = compute_loan(&inputs)?;

    println!("monthly payment: {}", result.monthly_payment.to_cents());
    println!("total payment:   {}", result.total_payment.to_cents());
    println!("total interest:  {}", result.total_interest.to_cents());

    Ok(())
}
