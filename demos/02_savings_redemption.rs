/// savings scheme - contribute monthly, mature, and redeem against a purchase
use chrono::NaiveDate;
use gold_ledger::{
    format_document_number, EventStore, InMemorySequenceIssuer, InventoryBook,
    MaturityCalculator, MetalType, Money, PaymentMethod, Rate, RateBoard, Redemption,
    RedemptionItem, Saving, SequenceIssuer, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== savings scheme redemption ===\n");

    let mut events = EventStore::new();
    let mut issuer = InMemorySequenceIssuer::new();

    let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let scheme_number = format_document_number("SS", (2026, 1), issuer.next_sequence("SS", (2026, 1)));

    // 1,000 per month for 12 months, default bonus of one installment
    let mut saving = Saving::open(
        scheme_number,
        "CUST-7".to_string(),
        Money::from_major(1_000),
        12,
        start,
        Money::ZERO,
        Rate::ZERO,
        &mut events,
    )?;
    println!("opened {} maturing {}", saving.scheme_number, saving.maturity_date);

    // pay every installment on its due date
    for index in 0..saving.installments.len() {
        let due = saving.installments[index].due_date;
        saving = saving.record_installment(index, due, PaymentMethod::Upi, None, &mut events)?;
    }
    println!(
        "all installments paid: total {} ({:?})",
        saving.total_paid, saving.status
    );

    let breakdown = MaturityCalculator.calculate(&saving);
    println!(
        "maturity: contribution {} + bonus {} = {}",
        breakdown.total_contribution, breakdown.bonus_amount, breakdown.maturity_amount
    );

    // redeem against a 2g gold chain
    let product_id = Uuid::new_v4();
    let mut rates = RateBoard::new();
    rates.set_rate(MetalType::Gold, "22K", Money::from_major(7_250));
    let mut stock = InventoryBook::new();
    stock.set_quantity(product_id, 3);

    let items = vec![RedemptionItem {
        product_id,
        description: "22K gold chain".to_string(),
        metal: MetalType::Gold,
        purity: "22K".to_string(),
        quantity: 1,
        rate: None,
        weight: dec!(2),
        making_charges: Money::from_major(500),
        line_total: Money::ZERO,
    }];

    let (redemption, saving) = Redemption::open(
        &saving,
        items,
        &rates,
        &stock,
        NaiveDate::from_ymd_opt(2027, 1, 10).unwrap(),
        &mut events,
    )?;

    println!("\npurchase total: {}", redemption.total_purchase_amount);
    if redemption.additional_payment_required {
        println!("top-up due:     {}", redemption.additional_payment_amount);
    }
    println!("scheme status:  {:?}", saving.status);

    Ok(())
}
