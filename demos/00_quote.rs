/// quote a plan in both modes for the same product
use installment_plan_rs::{quote, Money, PlanPolicy, PlanRequest, Tenor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let request = PlanRequest {
        price: Money::from_major(189_999),
        tenor: Tenor::Months12,
        down_payment_percent: 20,
        due_day: 15,
    };

    let interest_bearing = quote(&request, &PlanPolicy::interest_bearing())?;
    println!("interest-bearing ({}):", interest_bearing.interest_rate);
    println!("  down payment:     {}", interest_bearing.down_payment);
    println!("  monthly payment:  {}", interest_bearing.periodic_payment);
    println!("  total payable:    {}", interest_bearing.total_payable);

    let zero_interest = quote(&request, &PlanPolicy::zero_interest())?;
    println!("zero-interest:");
    println!("  down payment:     {}", zero_interest.down_payment);
    println!("  monthly payment:  {}", zero_interest.periodic_payment);
    println!("  total payable:    {}", zero_interest.total_payable);

    // out-of-range parameters are rejected, not clamped
    let bad = PlanRequest {
        down_payment_percent: 70,
        ..request
    };
    println!("70% down: {}", quote(&bad, &PlanPolicy::default()).unwrap_err());

    Ok(())
}
