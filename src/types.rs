use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a savings scheme
pub type SavingId = Uuid;

/// unique identifier for an inventory product
pub type ProductId = Uuid;

/// loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// loan open and accruing interest
    Active,
    /// fully repaid; re-derived from the accrual snapshot, never set directly
    Closed,
    /// written off after non-payment
    Defaulted,
    /// due date pushed out by an extension
    Extended,
}

/// savings scheme status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingStatus {
    /// collecting installments
    Active,
    /// total paid reached the scheme amount
    Completed,
    /// cancelled before completion
    Cancelled,
    /// abandoned by the customer
    Defaulted,
    /// matured value converted into a purchase
    Redeemed,
}

/// status of a single scheme installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    Pending,
    Paid,
    Missed,
    Waived,
}

/// how a payment was tendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    BankTransfer,
}

/// metal category for rate lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetalType {
    Gold,
    Silver,
    Platinum,
    Other,
}

impl MetalType {
    /// precious metals require an active rate; other categories default to zero
    pub fn is_precious(&self) -> bool {
        matches!(self, MetalType::Gold | MetalType::Silver)
    }
}

/// split of a loan payment between interest and principal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PaymentApplication {
    pub to_interest: Money,
    pub to_principal: Money,
}

impl PaymentApplication {
    pub fn total_applied(&self) -> Money {
        self.to_interest + self.to_principal
    }
}
