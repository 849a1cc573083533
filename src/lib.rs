pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod payments;
pub mod quote;
pub mod schedule;
pub mod status;
pub mod types;

// re-export key types
pub use config::{PlanPolicy, RateTable, MAX_DUE_DAY, MIN_DUE_DAY};
pub use decimal::{Money, Rate};
pub use errors::{PlanError, Result};
pub use events::{Event, EventStore};
pub use payments::{
    GatewayRequest, Notification, NotificationSink, NotificationVariant, PaymentGateway,
    PaymentReceipt, PaymentRecorder, PaymentRequest,
};
pub use quote::{quote, PlanQuote, PlanRequest};
pub use status::{derive_view, DashboardStats, InstallmentView};
pub use types::{
    Installment, InstallmentId, InstallmentStatus, Payment, PaymentId, PaymentMethod, QuoteMode,
    Tenor,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
