pub mod accrual;
pub mod allocation;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::types::{LoanId, LoanStatus, PaymentMethod};

pub use accrual::{AccrualEngine, AccrualSnapshot};
pub use allocation::{AllocationResult, PaymentAllocator};

/// a recorded repayment against a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPayment {
    pub payment_id: Uuid,
    pub amount: Money,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub applied_to_interest: Money,
    pub applied_to_principal: Money,
    pub notes: Option<String>,
}

/// a due-date extension granted on a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanExtension {
    pub previous_due_date: Option<NaiveDate>,
    pub new_due_date: NaiveDate,
    pub reason: String,
    pub fee: Money,
}

/// pawn-style gold loan with simple monthly interest
///
/// the payment history is the source of truth: balances and the closed/open
/// status are always re-derived from scratch by [`AccrualEngine`], never kept
/// as running totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: LoanId,
    pub loan_number: String,
    pub customer_id: String,
    pub principal: Money,
    pub monthly_rate: Rate,
    pub start_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub payments: Vec<LoanPayment>,
    pub extensions: Vec<LoanExtension>,
    pub status: LoanStatus,
}

impl Loan {
    /// open a new loan with an empty payment history
    pub fn open(
        loan_number: String,
        customer_id: String,
        principal: Money,
        monthly_rate: Rate,
        start_date: NaiveDate,
        due_date: Option<NaiveDate>,
        events: &mut EventStore,
    ) -> Result<Self> {
        if principal <= Money::ZERO {
            return Err(LedgerError::InvalidAmount { amount: principal });
        }
        if monthly_rate.as_decimal().is_sign_negative() {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("negative monthly rate: {monthly_rate}"),
            });
        }

        let loan = Self {
            loan_id: Uuid::new_v4(),
            loan_number,
            customer_id,
            principal,
            monthly_rate,
            start_date,
            due_date,
            payments: Vec::new(),
            extensions: Vec::new(),
            status: LoanStatus::Active,
        };

        events.emit(Event::LoanOpened {
            loan_id: loan.loan_id,
            principal,
            start_date,
        });

        Ok(loan)
    }

    /// sum of all payment amounts, regardless of how they were applied
    pub fn total_paid(&self) -> Money {
        self.payments
            .iter()
            .fold(Money::ZERO, |acc, p| acc + p.amount)
    }

    /// check if the loan can take further payments
    pub fn can_accept_payment(&self) -> bool {
        !matches!(self.status, LoanStatus::Closed)
    }

    /// grant a due-date extension, returning the updated loan
    pub fn extend(
        &self,
        new_due_date: NaiveDate,
        reason: String,
        fee: Money,
        events: &mut EventStore,
    ) -> Result<Loan> {
        if !matches!(self.status, LoanStatus::Active | LoanStatus::Extended) {
            return Err(LedgerError::LoanNotActive {
                status: self.status,
            });
        }

        let mut updated = self.clone();
        updated.extensions.push(LoanExtension {
            previous_due_date: self.due_date,
            new_due_date,
            reason,
            fee,
        });
        updated.due_date = Some(new_due_date);
        updated.status = LoanStatus::Extended;

        events.emit(Event::LoanExtended {
            loan_id: self.loan_id,
            previous_due_date: self.due_date,
            new_due_date,
            fee,
        });
        events.emit(Event::LoanStatusChanged {
            loan_id: self.loan_id,
            old_status: self.status,
            new_status: LoanStatus::Extended,
        });

        Ok(updated)
    }

    /// write the loan off as defaulted, returning the updated loan
    pub fn mark_defaulted(&self, as_of: NaiveDate, events: &mut EventStore) -> Result<Loan> {
        if matches!(self.status, LoanStatus::Closed) {
            return Err(LedgerError::LoanNotActive {
                status: self.status,
            });
        }

        let snapshot = AccrualEngine.accrue(self, as_of);
        let mut updated = self.clone();
        updated.status = LoanStatus::Defaulted;

        events.emit(Event::LoanDefaulted {
            loan_id: self.loan_id,
            outstanding: snapshot.total_due,
        });
        events.emit(Event::LoanStatusChanged {
            loan_id: self.loan_id,
            old_status: self.status,
            new_status: LoanStatus::Defaulted,
        });

        Ok(updated)
    }
}
