//! Booking wizard
//!
//! MediaUpload → LocationEntry → QuoteReview → Payment → Submitted
//!
//! Every step can go back one step; going back from the first step (or from
//! Submitted) exits the wizard. A submission is guarded so that a second
//! request while one is in flight, or after one succeeded, never reaches the
//! service.

pub mod draft;

pub use draft::Draft;

use crate::config::Config;
use crate::error::{Result, TranzrError};
use crate::service::{BookingService, ServiceResult};
use crate::session::{Credentials, LoginPolicy, Role, Session, SignIn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tranzr_common::{DetectedItem, ItemEdit, JobId, JobRequest, MediaAsset, MediaKind, PaymentMethod, Quote, QuoteParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    MediaUpload,
    LocationEntry,
    QuoteReview,
    Payment,
    Submitted,
}

impl WizardStep {
    /// Steps shown in the progress indicator
    pub const INPUT_STEPS: [WizardStep; 4] = [
        WizardStep::MediaUpload,
        WizardStep::LocationEntry,
        WizardStep::QuoteReview,
        WizardStep::Payment,
    ];

    /// 1-based position; Submitted sits after the last input step
    pub fn number(&self) -> usize {
        match self {
            WizardStep::MediaUpload => 1,
            WizardStep::LocationEntry => 2,
            WizardStep::QuoteReview => 3,
            WizardStep::Payment => 4,
            WizardStep::Submitted => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::MediaUpload => "Upload Media",
            WizardStep::LocationEntry => "Locations",
            WizardStep::QuoteReview => "Review Quote",
            WizardStep::Payment => "Payment",
            WizardStep::Submitted => "Booked",
        }
    }

    /// Label of the forward button
    pub fn action_label(&self) -> &'static str {
        match self {
            WizardStep::MediaUpload => "Generate Quote",
            WizardStep::LocationEntry => "Review Quote",
            WizardStep::QuoteReview => "Proceed to Payment",
            WizardStep::Payment => "Complete Booking",
            WizardStep::Submitted => "Done",
        }
    }

    fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::MediaUpload => Some(WizardStep::LocationEntry),
            WizardStep::LocationEntry => Some(WizardStep::QuoteReview),
            WizardStep::QuoteReview => Some(WizardStep::Payment),
            WizardStep::Payment => Some(WizardStep::Submitted),
            WizardStep::Submitted => None,
        }
    }

    fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::MediaUpload => None,
            WizardStep::LocationEntry => Some(WizardStep::MediaUpload),
            WizardStep::QuoteReview => Some(WizardStep::LocationEntry),
            WizardStep::Payment => Some(WizardStep::QuoteReview),
            WizardStep::Submitted => None,
        }
    }
}

/// Something the user should see after a successful transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Items changed since the quote was computed; offer a recalculation
    StaleQuote,
    /// Sign-in was refused but allowed by configuration
    SignInOverridden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    pub step: WizardStep,
    pub notices: Vec<Notice>,
    /// Set when this transition submitted the booking
    pub job_id: Option<JobId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Back {
    Moved(WizardStep),
    /// A submission is in flight; the wizard stays where it is
    Blocked,
    Exited,
}

#[derive(Debug, Clone, PartialEq)]
enum Submission {
    Idle,
    InFlight,
    Done(JobId),
}

pub struct BookingWizard {
    service: Arc<dyn BookingService>,
    session: Session,
    step: WizardStep,
    draft: Draft,
    submission: Submission,
}

impl BookingWizard {
    pub fn new(service: Arc<dyn BookingService>, session: Session, params: QuoteParams) -> Self {
        Self {
            service,
            session,
            step: WizardStep::MediaUpload,
            draft: Draft::new(params),
            submission: Submission::Idle,
        }
    }

    pub fn from_config(service: Arc<dyn BookingService>, config: &Config) -> Self {
        let session = Session::new(Role::Customer, LoginPolicy::from_flag(config.allow_failed_login));
        Self::new(service, session, config.quote_params())
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn job_id(&self) -> Option<&JobId> {
        match &self.submission {
            Submission::Done(job_id) => Some(job_id),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == Submission::InFlight
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.session.set_credentials(credentials);
    }

    fn ensure_editable(&self) -> Result<()> {
        match &self.submission {
            Submission::Idle => Ok(()),
            Submission::InFlight => Err(TranzrError::SubmissionInFlight),
            Submission::Done(job_id) => Err(TranzrError::AlreadySubmitted(job_id.clone())),
        }
    }

    pub async fn upload_media(&mut self, kind: MediaKind) -> Result<MediaAsset> {
        self.ensure_editable()?;
        let asset = self.service.upload_media(kind).await?;
        self.draft.attach_media(asset.clone())?;
        tracing::debug!(id = asset.id, %kind, "media attached");
        Ok(asset)
    }

    pub fn remove_media(&mut self, id: u64) -> Result<MediaAsset> {
        self.ensure_editable()?;
        Ok(self.draft.remove_media(id)?)
    }

    pub fn add_item(&mut self, name: &str, dimensions: &str, volume: &str) -> Result<u64> {
        self.ensure_editable()?;
        if name.trim().is_empty() {
            return Err(TranzrError::Validation("Enter a name for the item".into()));
        }
        Ok(self.draft.add_item(name, dimensions, volume))
    }

    pub fn update_item(&mut self, id: u64, edit: ItemEdit) -> Result<DetectedItem> {
        self.ensure_editable()?;
        Ok(self.draft.update_item(id, edit)?)
    }

    pub fn remove_item(&mut self, id: u64) -> Result<DetectedItem> {
        self.ensure_editable()?;
        Ok(self.draft.remove_item(id)?)
    }

    pub fn set_postcodes(&mut self, origin: &str, destination: &str) -> Result<()> {
        self.ensure_editable()?;
        self.draft.set_postcodes(origin, destination);
        Ok(())
    }

    pub fn recalculate_quote(&mut self) -> Result<Quote> {
        self.ensure_editable()?;
        Ok(self.draft.recalculate_quote().clone())
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) -> Result<()> {
        self.ensure_editable()?;
        self.draft.select_payment_method(method);
        Ok(())
    }

    fn stale_notice(&self) -> Vec<Notice> {
        if self.draft.is_quote_stale() {
            vec![Notice::StaleQuote]
        } else {
            Vec::new()
        }
    }

    /// Move forward one step. Validation failures leave the wizard untouched.
    pub async fn advance(&mut self) -> Result<Advance> {
        self.ensure_editable()?;

        let mut notices = Vec::new();
        let mut job_id = None;

        match self.step {
            WizardStep::MediaUpload => {
                if self.draft.media().is_empty() {
                    return Err(TranzrError::Validation(
                        "Add at least one photo or video of your items to continue".into(),
                    ));
                }
                if self.draft.needs_detection() {
                    let items = self.service.detect_items(self.draft.media()).await?;
                    tracing::info!(items = items.len(), "items detected");
                    self.draft.apply_detection(items);
                }
            }
            WizardStep::LocationEntry => {
                if self.draft.route().has_postcodes() {
                    let route = self.draft.route();
                    let origin = route.origin_postcode.clone().unwrap_or_default();
                    let destination = route.destination_postcode.clone().unwrap_or_default();
                    let details = self.service.estimate_route(&origin, &destination).await?;
                    self.draft.set_route_details(details);
                } else {
                    tracing::debug!("postcodes incomplete, skipping route estimate");
                }
                self.draft.ensure_quote();
                notices = self.stale_notice();
            }
            WizardStep::QuoteReview => {
                if !self.session.is_authenticated() {
                    if !self.session.has_credentials() {
                        return Err(TranzrError::Validation("Sign in to continue to payment".into()));
                    }
                    if self.session.sign_in(self.service.as_ref()).await? == SignIn::Overridden {
                        notices.push(Notice::SignInOverridden);
                    }
                }
                if self.draft.is_quote_stale() {
                    tracing::warn!("continuing to payment with a stale quote");
                    notices.push(Notice::StaleQuote);
                }
            }
            WizardStep::Payment => {
                job_id = Some(self.submit().await?);
            }
            WizardStep::Submitted => {}
        }

        if let Some(next) = self.step.next() {
            tracing::debug!(from = ?self.step, to = ?next, "wizard advanced");
            self.step = next;
        }

        Ok(Advance {
            step: self.step,
            notices,
            job_id,
        })
    }

    /// Move back one step, or exit from the first step.
    ///
    /// Refused while a submission is in flight.
    pub fn back(&mut self) -> Back {
        if self.submission == Submission::InFlight {
            return Back::Blocked;
        }
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                Back::Moved(previous)
            }
            None => Back::Exited,
        }
    }

    /// Freeze the draft into a request and mark a submission in flight
    pub fn begin_submission(&mut self) -> Result<JobRequest> {
        self.ensure_editable()?;
        if self.step != WizardStep::Payment {
            return Err(TranzrError::Validation("Review the quote before paying".into()));
        }

        let request = self.draft.snapshot().ok_or_else(|| {
            TranzrError::Validation("Select a payment method to complete the booking".into())
        })?;
        self.submission = Submission::InFlight;
        Ok(request)
    }

    /// Record the service's answer for the in-flight submission.
    ///
    /// On failure the draft is kept and the wizard stays on Payment.
    pub fn finish_submission(&mut self, outcome: ServiceResult<JobId>) -> Result<JobId> {
        if self.submission != Submission::InFlight {
            return Err(TranzrError::Validation("No booking submission in progress".into()));
        }

        match outcome {
            Ok(job_id) => {
                tracing::info!(%job_id, "booking submitted");
                self.submission = Submission::Done(job_id.clone());
                self.step = WizardStep::Submitted;
                Ok(job_id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "booking submission failed");
                self.submission = Submission::Idle;
                Err(e.into())
            }
        }
    }

    async fn submit(&mut self) -> Result<JobId> {
        let request = self.begin_submission()?;
        let outcome = self.service.submit_job(&request).await;
        self.finish_submission(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        let mut step = WizardStep::MediaUpload;
        let mut seen = vec![step];
        while let Some(next) = step.next() {
            assert_eq!(next.previous().unwrap_or(step), step);
            step = next;
            seen.push(step);
        }
        assert_eq!(seen.len(), 5);
        assert_eq!(step, WizardStep::Submitted);
        assert_eq!(WizardStep::Submitted.previous(), None);
    }

    #[test]
    fn test_progress_numbers() {
        for (i, step) in WizardStep::INPUT_STEPS.iter().enumerate() {
            assert_eq!(step.number(), i + 1);
        }
    }
}
