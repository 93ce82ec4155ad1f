/// json state - persist and restore a loan mid-lifecycle
use chrono::NaiveDate;
use gold_ledger::{
    AccrualEngine, EventStore, Loan, Money, PaymentAllocator, PaymentMethod, Rate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut events = EventStore::new();

    let loan = Loan::open(
        "GL-202601-0001".to_string(),
        "CUST-42".to_string(),
        Money::from_major(100_000),
        Rate::from_percentage(2),
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        None,
        &mut events,
    )?;

    let result = PaymentAllocator.allocate(
        &loan,
        Money::from_major(5_000),
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        PaymentMethod::Cash,
        None,
        &mut events,
    )?;

    // serialize to json, as a handler would before persisting
    let json = serde_json::to_string_pretty(&result.loan)?;
    println!("{json}");

    // restore and verify the accrual replays identically
    let restored: Loan = serde_json::from_str(&json)?;
    let as_of = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();
    assert_eq!(
        AccrualEngine.accrue(&restored, as_of),
        AccrualEngine.accrue(&result.loan, as_of),
    );
    println!("\nrestored loan replays to the same snapshot");

    Ok(())
}
