use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{LoanStatus, MetalType, SavingStatus};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid payment amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("payment dated {payment_date} precedes loan start {start_date}")]
    InvalidPaymentDate {
        payment_date: NaiveDate,
        start_date: NaiveDate,
    },

    #[error("payment not found: {payment_id}")]
    PaymentNotFound {
        payment_id: Uuid,
    },

    #[error("loan not active: current status is {status:?}")]
    LoanNotActive {
        status: LoanStatus,
    },

    #[error("installment not found: index {index}")]
    InstallmentNotFound {
        index: usize,
    },

    #[error("installment already paid: index {index}")]
    InstallmentAlreadyPaid {
        index: usize,
    },

    #[error("scheme not active: current status is {status:?}")]
    SchemeNotActive {
        status: SavingStatus,
    },

    #[error("scheme already redeemed: {saving_id}")]
    AlreadyRedeemed {
        saving_id: Uuid,
    },

    #[error("scheme not eligible for redemption: current status is {status:?}")]
    IneligibleForRedemption {
        status: SavingStatus,
    },

    #[error("no active rate for {metal:?} purity {purity}")]
    RateNotFound {
        metal: MetalType,
        purity: String,
    },

    #[error("insufficient stock for product {product_id}: requested {requested}")]
    InsufficientStock {
        product_id: Uuid,
        requested: u32,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
