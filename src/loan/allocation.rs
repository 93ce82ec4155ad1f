use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::loan::{AccrualEngine, AccrualSnapshot, Loan, LoanPayment};
use crate::types::{LoanStatus, PaymentApplication, PaymentMethod};

/// outcome of allocating a payment (or reversing one)
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationResult {
    pub application: PaymentApplication,
    pub loan: Loan,
    pub snapshot: AccrualSnapshot,
}

/// splits loan payments between outstanding interest and principal
///
/// never mutates the loan it is given; callers persist the returned state.
pub struct PaymentAllocator;

impl PaymentAllocator {
    /// allocate a payment dated `date` against the loan
    ///
    /// interest outstanding as of the payment date is settled first; any
    /// remainder reduces principal. the loan closes when the post-payment
    /// accrual reports paid in full.
    pub fn allocate(
        &self,
        loan: &Loan,
        amount: Money,
        date: NaiveDate,
        method: PaymentMethod,
        notes: Option<String>,
        events: &mut EventStore,
    ) -> Result<AllocationResult> {
        if amount <= Money::ZERO {
            return Err(LedgerError::InvalidAmount { amount });
        }
        if date < loan.start_date {
            return Err(LedgerError::InvalidPaymentDate {
                payment_date: date,
                start_date: loan.start_date,
            });
        }
        if !loan.can_accept_payment() {
            return Err(LedgerError::LoanNotActive {
                status: loan.status,
            });
        }

        let before = AccrualEngine.accrue(loan, date);
        let to_interest = amount.min(before.interest_accrued);
        let to_principal = amount - to_interest;
        let application = PaymentApplication {
            to_interest,
            to_principal,
        };

        let payment_id = Uuid::new_v4();
        let mut updated = loan.clone();
        updated.payments.push(LoanPayment {
            payment_id,
            amount,
            date,
            method,
            applied_to_interest: to_interest,
            applied_to_principal: to_principal,
            notes,
        });

        let snapshot = AccrualEngine.accrue(&updated, date);

        events.emit(Event::PaymentReceived {
            loan_id: loan.loan_id,
            payment_id,
            amount,
            applied_to_interest: to_interest,
            applied_to_principal: to_principal,
            date,
        });

        if snapshot.paid_in_full {
            updated.status = LoanStatus::Closed;
            events.emit(Event::LoanClosed {
                loan_id: loan.loan_id,
                total_paid: snapshot.total_paid,
                closed_on: date,
            });
            events.emit(Event::LoanStatusChanged {
                loan_id: loan.loan_id,
                old_status: loan.status,
                new_status: LoanStatus::Closed,
            });
        }

        Ok(AllocationResult {
            application,
            loan: updated,
            snapshot,
        })
    }

    /// allocate a payment dated by the clock's current date
    pub fn allocate_now(
        &self,
        loan: &Loan,
        amount: Money,
        method: PaymentMethod,
        notes: Option<String>,
        time: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<AllocationResult> {
        self.allocate(loan, amount, time.now().date_naive(), method, notes, events)
    }

    /// administratively reverse a payment, re-deriving the loan's status
    ///
    /// a closed loan whose governing payment is removed must not stay closed:
    /// the status is recomputed from a fresh accrual as of `as_of`.
    pub fn reverse(
        &self,
        loan: &Loan,
        payment_id: Uuid,
        as_of: NaiveDate,
        events: &mut EventStore,
    ) -> Result<AllocationResult> {
        let position = loan
            .payments
            .iter()
            .position(|p| p.payment_id == payment_id)
            .ok_or(LedgerError::PaymentNotFound { payment_id })?;

        let mut updated = loan.clone();
        let removed = updated.payments.remove(position);
        let snapshot = AccrualEngine.accrue(&updated, as_of);

        events.emit(Event::PaymentReversed {
            loan_id: loan.loan_id,
            payment_id,
            amount: removed.amount,
            date: as_of,
        });

        if snapshot.paid_in_full {
            updated.status = LoanStatus::Closed;
        } else if matches!(loan.status, LoanStatus::Closed) {
            updated.status = LoanStatus::Active;
            events.emit(Event::LoanReopened {
                loan_id: loan.loan_id,
                total_due: snapshot.total_due,
                reopened_on: as_of,
            });
            events.emit(Event::LoanStatusChanged {
                loan_id: loan.loan_id,
                old_status: LoanStatus::Closed,
                new_status: LoanStatus::Active,
            });
        }

        let application = PaymentApplication {
            to_interest: removed.applied_to_interest,
            to_principal: removed.applied_to_principal,
        };

        Ok(AllocationResult {
            application,
            loan: updated,
            snapshot,
        })
    }
}
