/// loan lifecycle - open, pay down, extend, settle, and reverse with controlled time
use chrono::{Duration, TimeZone, Utc};
use gold_ledger::{
    AccrualEngine, EventStore, Loan, Money, PaymentAllocator, PaymentMethod, Rate,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== gold loan lifecycle ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();
    let mut events = EventStore::new();

    let mut loan = Loan::open(
        "GL-202601-0001".to_string(),
        "CUST-42".to_string(),
        Money::from_major(50_000),
        Rate::from_percentage(2),
        time.now().date_naive(),
        Some(time.now().date_naive() + Duration::days(180)),
        &mut events,
    )?;
    println!("opened {} on {}", loan.loan_number, loan.start_date);

    // three monthly payments
    for month in 1..=3 {
        controller.advance(Duration::days(31));
        let result = PaymentAllocator.allocate_now(
            &loan,
            Money::from_major(3_000),
            PaymentMethod::Cash,
            None,
            &time,
            &mut events,
        )?;
        println!(
            "month {}: paid 3000 -> interest {}, principal {}, due {}",
            month,
            result.application.to_interest,
            result.application.to_principal,
            result.snapshot.total_due
        );
        loan = result.loan;
    }

    // customer asks for more time
    let new_due = time.now().date_naive() + Duration::days(90);
    loan = loan.extend(
        new_due,
        "customer request".to_string(),
        Money::from_major(250),
        &mut events,
    )?;
    println!("\nextended to {} ({:?})", new_due, loan.status);

    // settle the full balance
    controller.advance(Duration::days(62));
    let due_now = AccrualEngine.accrue_now(&loan, &time).total_due;
    let settled = PaymentAllocator.allocate_now(
        &loan,
        due_now,
        PaymentMethod::BankTransfer,
        Some("final settlement".to_string()),
        &time,
        &mut events,
    )?;
    println!(
        "settled {} on {} -> {:?}",
        due_now,
        time.now().date_naive(),
        settled.loan.status
    );

    // administrative reversal reopens the loan
    let last_payment = settled.loan.payments.last().unwrap().payment_id;
    let reversed = PaymentAllocator.reverse(
        &settled.loan,
        last_payment,
        time.now().date_naive(),
        &mut events,
    )?;
    println!(
        "reversed final payment -> {:?}, due {}",
        reversed.loan.status, reversed.snapshot.total_due
    );

    println!("\n{} events recorded", events.events().len());
    Ok(())
}
