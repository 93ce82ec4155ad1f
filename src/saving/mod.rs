pub mod maturity;
pub mod schedule;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::types::{InstallmentStatus, PaymentMethod, SavingId, SavingStatus};

pub use maturity::{MaturityBreakdown, MaturityCalculator};
pub use schedule::{SavingsSchedule, ScheduleGenerator};

/// a single scheduled contribution of a savings scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub amount: Money,
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
    pub paid_date: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

/// recurring gold-savings scheme
///
/// the installment schedule is generated exactly once at creation and never
/// regenerated; `total_paid` is recomputed from the installment list on every
/// change rather than kept as a running total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saving {
    pub saving_id: SavingId,
    pub scheme_number: String,
    pub customer_id: String,
    pub total_amount: Money,
    pub installment_amount: Money,
    pub duration_months: u32,
    pub start_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub bonus_amount: Money,
    pub bonus_percent: Rate,
    pub installments: Vec<Installment>,
    pub total_paid: Money,
    pub status: SavingStatus,
    pub is_redeemed: bool,
}

impl Saving {
    /// open a new scheme with a freshly generated schedule
    pub fn open(
        scheme_number: String,
        customer_id: String,
        installment_amount: Money,
        duration_months: u32,
        start_date: NaiveDate,
        bonus_amount: Money,
        bonus_percent: Rate,
        events: &mut EventStore,
    ) -> Result<Self> {
        let schedule = ScheduleGenerator.generate(start_date, installment_amount, duration_months)?;

        let saving = Self {
            saving_id: Uuid::new_v4(),
            scheme_number,
            customer_id,
            total_amount: installment_amount * rust_decimal::Decimal::from(duration_months),
            installment_amount,
            duration_months,
            start_date,
            maturity_date: schedule.maturity_date,
            bonus_amount,
            bonus_percent,
            installments: schedule.installments,
            total_paid: Money::ZERO,
            status: SavingStatus::Active,
            is_redeemed: false,
        };

        events.emit(Event::SchemeOpened {
            saving_id: saving.saving_id,
            installment_amount,
            duration_months,
            maturity_date: saving.maturity_date,
        });

        Ok(saving)
    }

    /// sum of paid installments; waived and missed ones never count
    fn paid_total(&self) -> Money {
        self.installments
            .iter()
            .filter(|i| i.status == InstallmentStatus::Paid)
            .fold(Money::ZERO, |acc, i| acc + i.amount)
    }

    fn installment_checked(&self, index: usize) -> Result<&Installment> {
        self.installments
            .get(index)
            .ok_or(LedgerError::InstallmentNotFound { index })
    }

    /// record one installment as paid, returning the updated scheme
    ///
    /// transitions to `Completed` exactly when the recomputed total reaches
    /// the scheme amount while the scheme was still active.
    pub fn record_installment(
        &self,
        index: usize,
        paid_date: NaiveDate,
        method: PaymentMethod,
        notes: Option<String>,
        events: &mut EventStore,
    ) -> Result<Saving> {
        if self.status != SavingStatus::Active {
            return Err(LedgerError::SchemeNotActive {
                status: self.status,
            });
        }
        let installment = self.installment_checked(index)?;
        if installment.status == InstallmentStatus::Paid {
            return Err(LedgerError::InstallmentAlreadyPaid { index });
        }

        let mut updated = self.clone();
        {
            let slot = &mut updated.installments[index];
            slot.status = InstallmentStatus::Paid;
            slot.paid_date = Some(paid_date);
            slot.payment_method = Some(method);
            slot.notes = notes;
        }
        updated.total_paid = updated.paid_total();

        events.emit(Event::InstallmentPaid {
            saving_id: self.saving_id,
            installment_index: index,
            amount: updated.installments[index].amount,
            paid_date,
            total_paid: updated.total_paid,
        });

        if updated.total_paid >= updated.total_amount {
            updated.status = SavingStatus::Completed;
            events.emit(Event::SchemeCompleted {
                saving_id: self.saving_id,
                total_paid: updated.total_paid,
            });
            events.emit(Event::SchemeStatusChanged {
                saving_id: self.saving_id,
                old_status: SavingStatus::Active,
                new_status: SavingStatus::Completed,
            });
        }

        Ok(updated)
    }

    /// flag a pending installment as missed, returning the updated scheme
    pub fn mark_installment_missed(
        &self,
        index: usize,
        events: &mut EventStore,
    ) -> Result<Saving> {
        if self.status != SavingStatus::Active {
            return Err(LedgerError::SchemeNotActive {
                status: self.status,
            });
        }
        let installment = self.installment_checked(index)?;
        if installment.status == InstallmentStatus::Paid {
            return Err(LedgerError::InstallmentAlreadyPaid { index });
        }

        let mut updated = self.clone();
        updated.installments[index].status = InstallmentStatus::Missed;
        updated.total_paid = updated.paid_total();

        events.emit(Event::InstallmentMissed {
            saving_id: self.saving_id,
            installment_index: index,
            due_date: updated.installments[index].due_date,
        });

        Ok(updated)
    }

    /// waive an unpaid installment, returning the updated scheme
    pub fn waive_installment(&self, index: usize, events: &mut EventStore) -> Result<Saving> {
        if self.status != SavingStatus::Active {
            return Err(LedgerError::SchemeNotActive {
                status: self.status,
            });
        }
        let installment = self.installment_checked(index)?;
        if installment.status == InstallmentStatus::Paid {
            return Err(LedgerError::InstallmentAlreadyPaid { index });
        }

        let mut updated = self.clone();
        updated.installments[index].status = InstallmentStatus::Waived;
        updated.total_paid = updated.paid_total();

        events.emit(Event::InstallmentWaived {
            saving_id: self.saving_id,
            installment_index: index,
            amount: updated.installments[index].amount,
        });

        Ok(updated)
    }

    /// cancel an active scheme, returning the updated scheme
    pub fn cancel(&self, events: &mut EventStore) -> Result<Saving> {
        if self.status != SavingStatus::Active {
            return Err(LedgerError::SchemeNotActive {
                status: self.status,
            });
        }

        let mut updated = self.clone();
        updated.status = SavingStatus::Cancelled;

        events.emit(Event::SchemeCancelled {
            saving_id: self.saving_id,
            total_paid: self.total_paid,
        });
        events.emit(Event::SchemeStatusChanged {
            saving_id: self.saving_id,
            old_status: SavingStatus::Active,
            new_status: SavingStatus::Cancelled,
        });

        Ok(updated)
    }

    /// mark an abandoned scheme as defaulted, returning the updated scheme
    pub fn mark_defaulted(&self, events: &mut EventStore) -> Result<Saving> {
        if self.status != SavingStatus::Active {
            return Err(LedgerError::SchemeNotActive {
                status: self.status,
            });
        }

        let mut updated = self.clone();
        updated.status = SavingStatus::Defaulted;

        events.emit(Event::SchemeStatusChanged {
            saving_id: self.saving_id,
            old_status: SavingStatus::Active,
            new_status: SavingStatus::Defaulted,
        });

        Ok(updated)
    }
}
