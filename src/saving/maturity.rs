use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::saving::Saving;

/// maturity payout broken into its parts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaturityBreakdown {
    pub total_contribution: Money,
    pub bonus_amount: Money,
    pub maturity_amount: Money,
}

/// computes the payout a scheme is worth at maturity
///
/// bonus precedence: a configured flat bonus wins, then a percentage of the
/// total contribution, and a scheme configured with neither earns one
/// installment as the default bonus. eligibility (status, not yet redeemed)
/// is the caller's precondition, not checked here.
pub struct MaturityCalculator;

impl MaturityCalculator {
    pub fn calculate(&self, scheme: &Saving) -> MaturityBreakdown {
        let total_contribution =
            scheme.installment_amount * Decimal::from(scheme.duration_months);

        let bonus_amount = if scheme.bonus_amount > Money::ZERO {
            scheme.bonus_amount
        } else if scheme.bonus_percent.as_decimal() > Decimal::ZERO {
            total_contribution.percentage(scheme.bonus_percent.as_percentage())
        } else {
            scheme.installment_amount
        };

        MaturityBreakdown {
            total_contribution,
            bonus_amount,
            maturity_amount: total_contribution + bonus_amount,
        }
    }
}
