//! In-memory booking service
//!
//! Simulates network latency with timers and never fails. Sign-in accepts
//! any non-blank email and password.

use super::{BookingService, ServiceResult};
use crate::config::{Config, LatencyConfig};
use async_trait::async_trait;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tranzr_common::fixtures;
use tranzr_common::{DetectedItem, JobId, JobRequest, MediaAsset, MediaKind, RouteInfo};

pub struct MockBookingService {
    latency: LatencyConfig,
    job_id_prefix: String,
    next_media_id: AtomicU64,
}

impl MockBookingService {
    pub fn new(latency: LatencyConfig, job_id_prefix: impl Into<String>) -> Self {
        // Seed from the clock like a capture timestamp; ids then only grow
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(1);

        Self {
            latency,
            job_id_prefix: job_id_prefix.into(),
            next_media_id: AtomicU64::new(seed),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.latency.clone(), config.job_id_prefix.clone())
    }

    /// No simulated latency
    pub fn instant() -> Self {
        Self::new(LatencyConfig::none(), "TRZ")
    }

    fn random_job_id(&self) -> JobId {
        let number: u32 = rand::rng().random_range(100_000..1_000_000);
        JobId(format!("{}-{}", self.job_id_prefix, number))
    }
}

async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl BookingService for MockBookingService {
    async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<bool> {
        delay(self.latency.auth()).await;
        let success = !email.trim().is_empty() && !password.trim().is_empty();
        tracing::debug!(email, success, "mock authenticate");
        Ok(success)
    }

    async fn upload_media(&self, kind: MediaKind) -> ServiceResult<MediaAsset> {
        delay(self.latency.upload()).await;
        let id = self.next_media_id.fetch_add(1, Ordering::Relaxed);
        Ok(MediaAsset {
            id,
            kind,
            uri: fixtures::placeholder_uri(kind).to_string(),
        })
    }

    async fn detect_items(&self, media: &[MediaAsset]) -> ServiceResult<Vec<DetectedItem>> {
        tracing::debug!(media = media.len(), "mock detect_items");
        Ok(fixtures::detected_items())
    }

    async fn estimate_route(&self, origin: &str, destination: &str) -> ServiceResult<RouteInfo> {
        let (distance, duration, traffic) = fixtures::ROUTE_DETAILS;
        Ok(RouteInfo {
            origin_postcode: Some(origin.to_string()),
            destination_postcode: Some(destination.to_string()),
            distance: distance.into(),
            duration: duration.into(),
            traffic_condition: traffic.into(),
        })
    }

    async fn submit_job(&self, request: &JobRequest) -> ServiceResult<JobId> {
        delay(self.latency.submit()).await;
        let job_id = self.random_job_id();
        tracing::info!(%job_id, items = request.items.len(), "mock job created");
        Ok(job_id)
    }

    async fn save_note(&self, job_id: &JobId, note: &str) -> ServiceResult<bool> {
        delay(self.latency.note()).await;
        tracing::debug!(%job_id, len = note.len(), "mock note saved");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tranzr_common::{recalculate_quote, PaymentMethod, QuoteParams};

    #[tokio::test]
    async fn test_authenticate_requires_non_blank() {
        let service = MockBookingService::instant();
        assert!(service.authenticate("a@b.com", "secret").await.unwrap());
        assert!(!service.authenticate("", "secret").await.unwrap());
        assert!(!service.authenticate("a@b.com", "   ").await.unwrap());
    }

    #[tokio::test]
    async fn test_job_id_format() {
        let service = MockBookingService::instant();
        let request = JobRequest {
            items: vec![],
            route: RouteInfo::default(),
            quote: recalculate_quote(&[], &QuoteParams::default()),
            payment_method: PaymentMethod::Card,
        };

        let job_id = service.submit_job(&request).await.unwrap();
        let (prefix, digits) = job_id.as_str().split_once('-').expect("missing dash");
        assert_eq!(prefix, "TRZ");
        assert_eq!(digits.len(), 6);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_upload_ids_are_unique() {
        let service = MockBookingService::instant();
        let a = service.upload_media(MediaKind::Image).await.unwrap();
        let b = service.upload_media(MediaKind::Video).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(b.uri, fixtures::VIDEO_PLACEHOLDER_URI);
    }
}
