use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{LoanId, LoanStatus, SavingId, SavingStatus};

/// all events that can be emitted by ledger operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // loan lifecycle events
    LoanOpened {
        loan_id: LoanId,
        principal: Money,
        start_date: NaiveDate,
    },
    LoanClosed {
        loan_id: LoanId,
        total_paid: Money,
        closed_on: NaiveDate,
    },
    LoanReopened {
        loan_id: LoanId,
        total_due: Money,
        reopened_on: NaiveDate,
    },
    LoanExtended {
        loan_id: LoanId,
        previous_due_date: Option<NaiveDate>,
        new_due_date: NaiveDate,
        fee: Money,
    },
    LoanDefaulted {
        loan_id: LoanId,
        outstanding: Money,
    },

    // loan payment events
    PaymentReceived {
        loan_id: LoanId,
        payment_id: Uuid,
        amount: Money,
        applied_to_interest: Money,
        applied_to_principal: Money,
        date: NaiveDate,
    },
    PaymentReversed {
        loan_id: LoanId,
        payment_id: Uuid,
        amount: Money,
        date: NaiveDate,
    },

    // savings scheme events
    SchemeOpened {
        saving_id: SavingId,
        installment_amount: Money,
        duration_months: u32,
        maturity_date: NaiveDate,
    },
    InstallmentPaid {
        saving_id: SavingId,
        installment_index: usize,
        amount: Money,
        paid_date: NaiveDate,
        total_paid: Money,
    },
    InstallmentMissed {
        saving_id: SavingId,
        installment_index: usize,
        due_date: NaiveDate,
    },
    InstallmentWaived {
        saving_id: SavingId,
        installment_index: usize,
        amount: Money,
    },
    SchemeCompleted {
        saving_id: SavingId,
        total_paid: Money,
    },
    SchemeCancelled {
        saving_id: SavingId,
        total_paid: Money,
    },

    // redemption events
    SchemeRedeemed {
        saving_id: SavingId,
        redemption_id: Uuid,
        maturity_amount: Money,
        total_purchase_amount: Money,
        additional_payment_amount: Money,
    },
    RedemptionReversed {
        saving_id: SavingId,
        redemption_id: Uuid,
    },

    // status change events
    LoanStatusChanged {
        loan_id: LoanId,
        old_status: LoanStatus,
        new_status: LoanStatus,
    },
    SchemeStatusChanged {
        saving_id: SavingId,
        old_status: SavingStatus,
        new_status: SavingStatus,
    },
}

/// collects the events an operation emits; a handler drains it after each
/// read-compute-write cycle and appends the batch to the audit log
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// drain everything collected so far, leaving the store empty
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
