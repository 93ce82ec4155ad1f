pub mod calendar;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod loan;
pub mod redemption;
pub mod saving;
pub mod sequence;
pub mod store;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use loan::{
    AccrualEngine, AccrualSnapshot, AllocationResult, Loan, LoanExtension, LoanPayment,
    PaymentAllocator,
};
pub use redemption::{
    InventoryBook, RateBoard, RateLookup, Redemption, RedemptionItem, Settlement,
    SettlementCalculator, StockChecker,
};
pub use saving::{
    Installment, MaturityBreakdown, MaturityCalculator, Saving, SavingsSchedule,
    ScheduleGenerator,
};
pub use sequence::{format_document_number, InMemorySequenceIssuer, SequenceIssuer};
pub use store::{EntityStore, InMemoryStore};
pub use types::{
    InstallmentStatus, LoanId, LoanStatus, MetalType, PaymentApplication, PaymentMethod,
    ProductId, SavingId, SavingStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
