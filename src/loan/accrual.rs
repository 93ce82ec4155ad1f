use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::calendar::whole_months_between;
use crate::decimal::Money;
use crate::loan::{Loan, LoanPayment};

/// point-in-time view of a loan's balances, derived from its payment history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccrualSnapshot {
    pub remaining_principal: Money,
    pub interest_accrued: Money,
    pub total_due: Money,
    pub total_paid: Money,
    pub paid_in_full: bool,
    pub as_of: NaiveDate,
}

/// engine for accruing simple monthly interest over an irregular payment history
///
/// accrual is a pure replay: payments are walked in date order, interest is
/// charged on the principal outstanding at the start of each gap for whole
/// elapsed months only, and each payment settles interest before principal.
/// recomputing from the same history always reproduces the same snapshot, so
/// out-of-order payment edits can never drift the balances.
pub struct AccrualEngine;

impl AccrualEngine {
    /// compute the loan's balances as of a calendar date
    pub fn accrue(&self, loan: &Loan, as_of: NaiveDate) -> AccrualSnapshot {
        let mut payments: Vec<&LoanPayment> = loan.payments.iter().collect();
        payments.sort_by_key(|p| p.date);

        let mut remaining_principal = loan.principal;
        let mut accrued_interest = Money::ZERO;
        let mut total_paid = Money::ZERO;
        let mut cursor = loan.start_date;

        for payment in payments {
            let elapsed = whole_months_between(cursor, payment.date);
            if elapsed > 0 {
                accrued_interest +=
                    remaining_principal.simple_interest(loan.monthly_rate, elapsed);
            }

            // interest settles first; the remainder reduces principal, floored at zero
            let to_interest = payment.amount.min(accrued_interest);
            accrued_interest -= to_interest;
            remaining_principal =
                (remaining_principal - (payment.amount - to_interest)).max(Money::ZERO);

            total_paid += payment.amount;
            cursor = payment.date;
        }

        // final open period, only while principal remains outstanding
        if remaining_principal > Money::ZERO {
            let elapsed = whole_months_between(cursor, as_of);
            if elapsed > 0 {
                accrued_interest +=
                    remaining_principal.simple_interest(loan.monthly_rate, elapsed);
            }
        }

        let total_due = remaining_principal + accrued_interest;

        AccrualSnapshot {
            remaining_principal,
            interest_accrued: accrued_interest,
            total_due,
            total_paid,
            paid_in_full: total_due <= Money::ZERO,
            as_of,
        }
    }

    /// compute the loan's balances as of the clock's current date
    pub fn accrue_now(&self, loan: &Loan, time: &SafeTimeProvider) -> AccrualSnapshot {
        self.accrue(loan, time.now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::events::EventStore;
    use crate::types::PaymentMethod;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn test_loan(principal: i64, rate_percent: u32, start: NaiveDate) -> Loan {
        let mut events = EventStore::new();
        Loan::open(
            "GL-202601-0001".to_string(),
            "CUST-1".to_string(),
            Money::from_major(principal),
            Rate::from_percentage(rate_percent),
            start,
            None,
            &mut events,
        )
        .unwrap()
    }

    fn raw_payment(amount: i64, date: NaiveDate) -> LoanPayment {
        LoanPayment {
            payment_id: Uuid::new_v4(),
            amount: Money::from_major(amount),
            date,
            method: PaymentMethod::Cash,
            applied_to_interest: Money::ZERO,
            applied_to_principal: Money::ZERO,
            notes: None,
        }
    }

    #[test]
    fn test_no_payments_whole_months() {
        let loan = test_loan(100_000, 2, d(2026, 1, 10));
        let snapshot = AccrualEngine.accrue(&loan, d(2026, 4, 10));

        assert_eq!(snapshot.remaining_principal, Money::from_major(100_000));
        assert_eq!(snapshot.interest_accrued, Money::from_major(6_000));
        assert_eq!(snapshot.total_due, Money::from_major(106_000));
        assert_eq!(snapshot.total_paid, Money::ZERO);
        assert!(!snapshot.paid_in_full);
    }

    #[test]
    fn test_payment_after_two_months_splits_interest_first() {
        // scenario: 100000 at 2%/month, 5000 paid exactly two months in
        let mut loan = test_loan(100_000, 2, d(2026, 1, 10));
        loan.payments.push(raw_payment(5_000, d(2026, 3, 10)));

        let snapshot = AccrualEngine.accrue(&loan, d(2026, 3, 10));

        // 4000 interest accrued; payment clears it and 1000 hits principal
        assert_eq!(snapshot.remaining_principal, Money::from_major(99_000));
        assert_eq!(snapshot.interest_accrued, Money::ZERO);
        assert_eq!(snapshot.total_due, Money::from_major(99_000));
        assert_eq!(snapshot.total_paid, Money::from_major(5_000));
    }

    #[test]
    fn test_partial_month_accrues_nothing() {
        // scenario: payment 15 days in reduces principal only
        let mut loan = test_loan(100_000, 2, d(2026, 1, 10));
        loan.payments.push(raw_payment(5_000, d(2026, 1, 25)));

        let snapshot = AccrualEngine.accrue(&loan, d(2026, 1, 25));

        assert_eq!(snapshot.remaining_principal, Money::from_major(95_000));
        assert_eq!(snapshot.interest_accrued, Money::ZERO);
    }

    #[test]
    fn test_interest_on_reduced_principal() {
        // after the first payment trims principal to 99000, the next period
        // accrues on 99000, not on the original amount
        let mut loan = test_loan(100_000, 2, d(2026, 1, 10));
        loan.payments.push(raw_payment(5_000, d(2026, 3, 10)));

        let snapshot = AccrualEngine.accrue(&loan, d(2026, 4, 10));

        assert_eq!(snapshot.remaining_principal, Money::from_major(99_000));
        assert_eq!(snapshot.interest_accrued, Money::from_major(1_980));
        assert_eq!(snapshot.total_due, Money::from_major(100_980));
    }

    #[test]
    fn test_unsorted_history_replayed_in_date_order() {
        let mut loan = test_loan(100_000, 2, d(2026, 1, 10));
        loan.payments.push(raw_payment(3_000, d(2026, 5, 10)));
        loan.payments.push(raw_payment(5_000, d(2026, 3, 10)));

        let ordered = {
            let mut other = test_loan(100_000, 2, d(2026, 1, 10));
            other.payments.push(raw_payment(5_000, d(2026, 3, 10)));
            other.payments.push(raw_payment(3_000, d(2026, 5, 10)));
            AccrualEngine.accrue(&other, d(2026, 6, 10))
        };
        let shuffled = AccrualEngine.accrue(&loan, d(2026, 6, 10));

        assert_eq!(shuffled.remaining_principal, ordered.remaining_principal);
        assert_eq!(shuffled.interest_accrued, ordered.interest_accrued);
        assert_eq!(shuffled.total_due, ordered.total_due);
    }

    #[test]
    fn test_principal_floored_at_zero() {
        let mut loan = test_loan(10_000, 2, d(2026, 1, 10));
        loan.payments.push(raw_payment(50_000, d(2026, 2, 10)));

        let snapshot = AccrualEngine.accrue(&loan, d(2026, 2, 10));

        assert_eq!(snapshot.remaining_principal, Money::ZERO);
        assert_eq!(snapshot.interest_accrued, Money::ZERO);
        assert!(snapshot.paid_in_full);
    }

    #[test]
    fn test_no_interest_after_principal_cleared() {
        let mut loan = test_loan(10_000, 2, d(2026, 1, 10));
        loan.payments.push(raw_payment(10_200, d(2026, 2, 10)));

        // six months later nothing further has accrued
        let snapshot = AccrualEngine.accrue(&loan, d(2026, 8, 10));

        assert_eq!(snapshot.total_due, Money::ZERO);
        assert!(snapshot.paid_in_full);
    }

    #[test]
    fn test_idempotence() {
        let mut loan = test_loan(100_000, 2, d(2026, 1, 10));
        loan.payments.push(raw_payment(5_000, d(2026, 3, 10)));

        let first = AccrualEngine.accrue(&loan, d(2026, 6, 1));
        let second = AccrualEngine.accrue(&loan, d(2026, 6, 1));

        assert_eq!(first, second);
    }

    #[test]
    fn test_monotonicity_without_payments() {
        let loan = test_loan(100_000, 2, d(2026, 1, 10));

        let mut previous = Money::ZERO;
        for month in 1..=12u32 {
            let as_of = crate::calendar::add_months(d(2026, 1, 10), month).unwrap();
            let due = AccrualEngine.accrue(&loan, as_of).total_due;
            assert!(due >= previous);
            previous = due;
        }
    }

    #[test]
    fn test_accrue_now_uses_clock() {
        let loan = test_loan(100_000, 2, d(2026, 1, 10));
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
        ));

        let snapshot = AccrualEngine.accrue_now(&loan, &time);

        assert_eq!(snapshot.as_of, d(2026, 3, 10));
        assert_eq!(snapshot.interest_accrued, Money::from_major(4_000));
    }
}
