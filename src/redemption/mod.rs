pub mod settlement;

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::saving::{MaturityCalculator, Saving};
use crate::types::{MetalType, ProductId, SavingId, SavingStatus};

pub use settlement::{Settlement, SettlementCalculator};

/// one purchase line inside a redemption
///
/// `rate` is per gram; when absent it is resolved from the active rate board
/// during settlement. `line_total` is filled in by the settlement calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedemptionItem {
    pub product_id: ProductId,
    pub description: String,
    pub metal: MetalType,
    pub purity: String,
    pub quantity: u32,
    pub rate: Option<Money>,
    pub weight: Decimal,
    pub making_charges: Money,
    pub line_total: Money,
}

/// conversion of a matured scheme's value into a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redemption {
    pub redemption_id: Uuid,
    pub saving_id: SavingId,
    /// computed once at creation from the referenced scheme, never re-derived
    pub maturity_amount: Money,
    pub items: Vec<RedemptionItem>,
    pub total_purchase_amount: Money,
    pub additional_payment_required: bool,
    pub additional_payment_amount: Money,
    pub created_date: NaiveDate,
}

/// active metal rate lookup, keyed by metal and purity
pub trait RateLookup {
    fn find_active_rate(&self, metal: MetalType, purity: &str) -> Option<Money>;
}

/// inventory availability check; stock adjustment itself stays with the caller
pub trait StockChecker {
    fn check_available(&self, product_id: ProductId, quantity: u32) -> bool;
}

/// in-memory rate board for tests, demos, and simple deployments
#[derive(Debug, Default)]
pub struct RateBoard {
    rates: HashMap<(MetalType, String), Money>,
}

impl RateBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rate(&mut self, metal: MetalType, purity: &str, rate_per_gram: Money) {
        self.rates.insert((metal, purity.to_string()), rate_per_gram);
    }
}

impl RateLookup for RateBoard {
    fn find_active_rate(&self, metal: MetalType, purity: &str) -> Option<Money> {
        self.rates.get(&(metal, purity.to_string())).copied()
    }
}

/// in-memory stock register for tests, demos, and simple deployments
#[derive(Debug, Default)]
pub struct InventoryBook {
    quantities: HashMap<ProductId, u32>,
}

impl InventoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        self.quantities.insert(product_id, quantity);
    }
}

impl StockChecker for InventoryBook {
    fn check_available(&self, product_id: ProductId, quantity: u32) -> bool {
        self.quantities
            .get(&product_id)
            .map(|available| *available >= quantity)
            .unwrap_or(false)
    }
}

impl Redemption {
    /// redeem a scheme against a set of purchase items
    ///
    /// the scheme must be active or completed and not already redeemed; on
    /// success the returned scheme is marked redeemed. a scheme can be
    /// redeemed at most once.
    pub fn open(
        saving: &Saving,
        items: Vec<RedemptionItem>,
        rates: &dyn RateLookup,
        stock: &dyn StockChecker,
        today: NaiveDate,
        events: &mut EventStore,
    ) -> Result<(Redemption, Saving)> {
        if saving.is_redeemed {
            return Err(LedgerError::AlreadyRedeemed {
                saving_id: saving.saving_id,
            });
        }
        if !matches!(
            saving.status,
            SavingStatus::Active | SavingStatus::Completed
        ) {
            return Err(LedgerError::IneligibleForRedemption {
                status: saving.status,
            });
        }

        let breakdown = MaturityCalculator.calculate(saving);
        let settlement =
            SettlementCalculator.settle(breakdown.maturity_amount, items, rates, stock)?;

        let redemption = Redemption {
            redemption_id: Uuid::new_v4(),
            saving_id: saving.saving_id,
            maturity_amount: breakdown.maturity_amount,
            items: settlement.items,
            total_purchase_amount: settlement.total_purchase_amount,
            additional_payment_required: settlement.additional_payment_required,
            additional_payment_amount: settlement.additional_payment_amount,
            created_date: today,
        };

        let mut updated = saving.clone();
        updated.is_redeemed = true;
        updated.status = SavingStatus::Redeemed;

        events.emit(Event::SchemeRedeemed {
            saving_id: saving.saving_id,
            redemption_id: redemption.redemption_id,
            maturity_amount: redemption.maturity_amount,
            total_purchase_amount: redemption.total_purchase_amount,
            additional_payment_amount: redemption.additional_payment_amount,
        });
        events.emit(Event::SchemeStatusChanged {
            saving_id: saving.saving_id,
            old_status: saving.status,
            new_status: SavingStatus::Redeemed,
        });

        Ok((redemption, updated))
    }

    /// administrative reversal: restore the scheme to completed, not redeemed
    pub fn reverse(&self, saving: &Saving, events: &mut EventStore) -> Saving {
        let mut restored = saving.clone();
        restored.is_redeemed = false;
        restored.status = SavingStatus::Completed;

        events.emit(Event::RedemptionReversed {
            saving_id: saving.saving_id,
            redemption_id: self.redemption_id,
        });
        events.emit(Event::SchemeStatusChanged {
            saving_id: saving.saving_id,
            old_status: saving.status,
            new_status: SavingStatus::Completed,
        });

        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::PaymentMethod;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn completed_scheme(events: &mut EventStore) -> Saving {
        let mut saving = Saving::open(
            "SS-202601-0001".to_string(),
            "CUST-7".to_string(),
            Money::from_major(1_000),
            12,
            d(2026, 1, 5),
            Money::ZERO,
            Rate::ZERO,
            events,
        )
        .unwrap();
        for index in 0..12 {
            saving = saving
                .record_installment(
                    index,
                    saving.installments[index].due_date,
                    PaymentMethod::Cash,
                    None,
                    events,
                )
                .unwrap();
        }
        assert_eq!(saving.status, SavingStatus::Completed);
        saving
    }

    fn gold_item(product_id: ProductId, weight_grams: Decimal) -> RedemptionItem {
        RedemptionItem {
            product_id,
            description: "gold chain".to_string(),
            metal: MetalType::Gold,
            purity: "22K".to_string(),
            quantity: 1,
            rate: None,
            weight: weight_grams,
            making_charges: Money::from_major(500),
            line_total: Money::ZERO,
        }
    }

    fn board_and_book(product_id: ProductId) -> (RateBoard, InventoryBook) {
        let mut rates = RateBoard::new();
        rates.set_rate(MetalType::Gold, "22K", Money::from_major(7_250));
        let mut stock = InventoryBook::new();
        stock.set_quantity(product_id, 5);
        (rates, stock)
    }

    #[test]
    fn test_redeem_completed_scheme() {
        let mut events = EventStore::new();
        let saving = completed_scheme(&mut events);
        let product_id = Uuid::new_v4();
        let (rates, stock) = board_and_book(product_id);
        events.clear();

        let (redemption, updated) = Redemption::open(
            &saving,
            vec![gold_item(product_id, dec!(2))],
            &rates,
            &stock,
            d(2027, 1, 10),
            &mut events,
        )
        .unwrap();

        // maturity 13000 (default bonus); purchase 2g * 7250 + 500 = 15000
        assert_eq!(redemption.maturity_amount, Money::from_major(13_000));
        assert_eq!(redemption.total_purchase_amount, Money::from_major(15_000));
        assert!(redemption.additional_payment_required);
        assert_eq!(
            redemption.additional_payment_amount,
            Money::from_major(2_000)
        );
        assert!(updated.is_redeemed);
        assert_eq!(updated.status, SavingStatus::Redeemed);
        // input untouched
        assert!(!saving.is_redeemed);
        assert!(events
            .events()
            .iter()
            .any(|e| matches!(e, Event::SchemeRedeemed { .. })));
    }

    #[test]
    fn test_redeem_twice_rejected() {
        let mut events = EventStore::new();
        let saving = completed_scheme(&mut events);
        let product_id = Uuid::new_v4();
        let (rates, stock) = board_and_book(product_id);

        let (_, redeemed) = Redemption::open(
            &saving,
            vec![gold_item(product_id, dec!(1))],
            &rates,
            &stock,
            d(2027, 1, 10),
            &mut events,
        )
        .unwrap();

        let again = Redemption::open(
            &redeemed,
            vec![gold_item(product_id, dec!(1))],
            &rates,
            &stock,
            d(2027, 1, 11),
            &mut events,
        );
        assert!(matches!(again, Err(LedgerError::AlreadyRedeemed { .. })));
    }

    #[test]
    fn test_cancelled_scheme_ineligible() {
        let mut events = EventStore::new();
        let saving = Saving::open(
            "SS-202601-0002".to_string(),
            "CUST-8".to_string(),
            Money::from_major(1_000),
            6,
            d(2026, 1, 5),
            Money::ZERO,
            Rate::ZERO,
            &mut events,
        )
        .unwrap();
        let cancelled = saving.cancel(&mut events).unwrap();

        let product_id = Uuid::new_v4();
        let (rates, stock) = board_and_book(product_id);
        let result = Redemption::open(
            &cancelled,
            vec![gold_item(product_id, dec!(1))],
            &rates,
            &stock,
            d(2026, 6, 1),
            &mut events,
        );
        assert!(matches!(
            result,
            Err(LedgerError::IneligibleForRedemption { .. })
        ));
    }

    #[test]
    fn test_reverse_restores_scheme() {
        let mut events = EventStore::new();
        let saving = completed_scheme(&mut events);
        let product_id = Uuid::new_v4();
        let (rates, stock) = board_and_book(product_id);

        let (redemption, redeemed) = Redemption::open(
            &saving,
            vec![gold_item(product_id, dec!(1))],
            &rates,
            &stock,
            d(2027, 1, 10),
            &mut events,
        )
        .unwrap();
        events.clear();

        let restored = redemption.reverse(&redeemed, &mut events);

        assert!(!restored.is_redeemed);
        assert_eq!(restored.status, SavingStatus::Completed);
        assert!(matches!(
            events.events()[0],
            Event::RedemptionReversed { .. }
        ));
    }

    #[test]
    fn test_failed_settlement_leaves_scheme_untouched() {
        let mut events = EventStore::new();
        let saving = completed_scheme(&mut events);
        let product_id = Uuid::new_v4();
        let (rates, _) = board_and_book(product_id);
        let empty_stock = InventoryBook::new();

        let result = Redemption::open(
            &saving,
            vec![gold_item(product_id, dec!(1))],
            &rates,
            &empty_stock,
            d(2027, 1, 10),
            &mut events,
        );

        assert!(matches!(
            result,
            Err(LedgerError::InsufficientStock { .. })
        ));
        assert!(!saving.is_redeemed);
        assert_eq!(saving.status, SavingStatus::Completed);
    }
}
