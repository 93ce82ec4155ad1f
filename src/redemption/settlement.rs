use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::redemption::{RateLookup, RedemptionItem, StockChecker};

/// settlement of a maturity amount against a set of purchase items
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub items: Vec<RedemptionItem>,
    pub total_purchase_amount: Money,
    pub additional_payment_required: bool,
    pub additional_payment_amount: Money,
}

/// reconciles a scheme's maturity value against a jewelry purchase
///
/// the stock precondition gates settlement validity here; actually
/// decrementing inventory happens in the calling layer after settlement
/// succeeds. there is no surplus-refund path when the maturity value exceeds
/// the purchase: the difference is simply absorbed.
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// enrich each line with its rate, price it, and compute any top-up due
    ///
    /// `line_total = weight * rate * quantity + making_charges * quantity`,
    /// with making charges a flat per-unit amount.
    pub fn settle(
        &self,
        maturity_amount: Money,
        items: Vec<RedemptionItem>,
        rates: &dyn RateLookup,
        stock: &dyn StockChecker,
    ) -> Result<Settlement> {
        let mut enriched = Vec::with_capacity(items.len());
        let mut total_purchase_amount = Money::ZERO;

        for mut item in items {
            if !stock.check_available(item.product_id, item.quantity) {
                return Err(LedgerError::InsufficientStock {
                    product_id: item.product_id,
                    requested: item.quantity,
                });
            }

            let rate = match item.rate {
                Some(rate) => rate,
                None => match rates.find_active_rate(item.metal, &item.purity) {
                    Some(rate) => rate,
                    None if item.metal.is_precious() => {
                        return Err(LedgerError::RateNotFound {
                            metal: item.metal,
                            purity: item.purity.clone(),
                        });
                    }
                    None => Money::ZERO,
                },
            };

            let quantity = Decimal::from(item.quantity);
            let metal_value = rate * item.weight * quantity;
            let line_total = metal_value + item.making_charges * quantity;

            item.rate = Some(rate);
            item.line_total = line_total;
            total_purchase_amount += line_total;
            enriched.push(item);
        }

        let additional_payment_amount =
            (total_purchase_amount - maturity_amount).max(Money::ZERO);

        Ok(Settlement {
            items: enriched,
            total_purchase_amount,
            additional_payment_required: additional_payment_amount > Money::ZERO,
            additional_payment_amount,
        })
    }
}
