//! Booking service boundary
//!
//! Everything the workflow needs from the outside world goes through
//! [`BookingService`]. The wizard and the job boards receive it as an
//! injected dependency so tests can swap in deterministic fakes.

pub mod mock;

pub use mock::MockBookingService;

use async_trait::async_trait;
use thiserror::Error;
use tranzr_common::{DetectedItem, JobId, JobRequest, MediaAsset, MediaKind, RouteInfo};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("request rejected: {0}")]
    Rejected(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[async_trait]
pub trait BookingService: Send + Sync {
    /// Check credentials. `Ok(false)` means the service answered and refused.
    async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<bool>;

    /// Capture or pick a photo/video
    async fn upload_media(&self, kind: MediaKind) -> ServiceResult<MediaAsset>;

    /// Find movable items in the uploaded media
    async fn detect_items(&self, media: &[MediaAsset]) -> ServiceResult<Vec<DetectedItem>>;

    /// Distance, duration and traffic between two postcodes
    async fn estimate_route(&self, origin: &str, destination: &str) -> ServiceResult<RouteInfo>;

    /// Book the job; the service assigns the permanent id
    async fn submit_job(&self, request: &JobRequest) -> ServiceResult<JobId>;

    async fn save_note(&self, job_id: &JobId, note: &str) -> ServiceResult<bool>;
}
