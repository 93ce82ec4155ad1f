/// quick start - minimal gold loan example
use chrono::NaiveDate;
use gold_ledger::{
    AccrualEngine, EventStore, Loan, Money, PaymentAllocator, PaymentMethod, Rate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut events = EventStore::new();

    // lend 100,000 against gold at 2% per month
    let loan = Loan::open(
        "GL-202601-0001".to_string(),
        "CUST-42".to_string(),
        Money::from_major(100_000),
        Rate::from_percentage(2),
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        None,
        &mut events,
    )?;

    // customer pays 5,000 two months later
    let result = PaymentAllocator.allocate(
        &loan,
        Money::from_major(5_000),
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        PaymentMethod::Cash,
        None,
        &mut events,
    )?;

    println!("applied to interest:  {}", result.application.to_interest);
    println!("applied to principal: {}", result.application.to_principal);

    // balances as of a later date
    let snapshot = AccrualEngine.accrue(
        &result.loan,
        NaiveDate::from_ymd_opt(2026, 6, 10).unwrap(),
    );
    println!("remaining principal:  {}", snapshot.remaining_principal);
    println!("interest accrued:     {}", snapshot.interest_accrued);
    println!("total due:            {}", snapshot.total_due);

    Ok(())
}
