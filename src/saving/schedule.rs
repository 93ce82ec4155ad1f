use chrono::NaiveDate;

use crate::calendar::add_months;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::saving::Installment;
use crate::types::InstallmentStatus;

/// generated installment plan for a savings scheme
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsSchedule {
    pub installments: Vec<Installment>,
    pub maturity_date: NaiveDate,
}

/// produces the one-time installment schedule for a new scheme
///
/// a scheme's schedule exists in exactly one generation event: callers must
/// never regenerate once installments carry payment history.
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// generate `duration_months` pending installments, one per calendar month
    /// starting at `start_date`, plus the maturity date one month after the last
    pub fn generate(
        &self,
        start_date: NaiveDate,
        installment_amount: Money,
        duration_months: u32,
    ) -> Result<SavingsSchedule> {
        if duration_months == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "scheme duration must be at least one month".to_string(),
            });
        }
        if installment_amount <= Money::ZERO {
            return Err(LedgerError::InvalidAmount {
                amount: installment_amount,
            });
        }

        let mut installments = Vec::with_capacity(duration_months as usize);
        for i in 0..duration_months {
            installments.push(Installment {
                amount: installment_amount,
                due_date: add_months(start_date, i)?,
                status: InstallmentStatus::Pending,
                paid_date: None,
                payment_method: None,
                notes: None,
            });
        }

        Ok(SavingsSchedule {
            installments,
            maturity_date: add_months(start_date, duration_months)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_schedule_completeness() {
        let schedule = ScheduleGenerator
            .generate(d(2026, 1, 5), Money::from_major(1_000), 12)
            .unwrap();

        assert_eq!(schedule.installments.len(), 12);
        assert!(schedule
            .installments
            .iter()
            .all(|i| i.status == InstallmentStatus::Pending));
        assert!(schedule
            .installments
            .iter()
            .all(|i| i.amount == Money::from_major(1_000)));

        // due dates strictly increase by one calendar month
        for (i, installment) in schedule.installments.iter().enumerate() {
            assert_eq!(installment.due_date, d(2026, 1 + i as u32, 5));
        }
        assert_eq!(schedule.maturity_date, d(2027, 1, 5));
    }

    #[test]
    fn test_month_end_clamping() {
        let schedule = ScheduleGenerator
            .generate(d(2026, 1, 31), Money::from_major(500), 4)
            .unwrap();

        let due: Vec<NaiveDate> = schedule.installments.iter().map(|i| i.due_date).collect();
        assert_eq!(
            due,
            vec![d(2026, 1, 31), d(2026, 2, 28), d(2026, 3, 31), d(2026, 4, 30)]
        );
        assert_eq!(schedule.maturity_date, d(2026, 5, 31));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let result = ScheduleGenerator.generate(d(2026, 1, 5), Money::from_major(1_000), 0);
        assert!(matches!(
            result,
            Err(LedgerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_non_positive_installment_rejected() {
        let result = ScheduleGenerator.generate(d(2026, 1, 5), Money::ZERO, 12);
        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
    }
}
