//! tranzr Common Library
//!
//! Booking types and pure logic shared by the wizard, the job boards and the CLI.
//! Nothing here performs I/O or waits on a service.

pub mod error;
pub mod fixtures;
pub mod items;
pub mod jobs;
pub mod model;
pub mod quote;

pub use error::{Error, Result};
pub use items::{ItemEdit, ItemList, MediaList};
pub use jobs::{
    AssignedDriver, CustomerJob, CustomerStatus, DriverAction, DriverJob, DriverStatus, Invoice, Payslip,
};
pub use model::{DetectedItem, JobId, JobRequest, MediaAsset, MediaKind, PaymentMethod, Quote, RouteInfo};
pub use quote::{parse_volume, recalculate_quote, volume_from_dimensions, QuoteParams};
