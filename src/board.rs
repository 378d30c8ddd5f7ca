//! Customer and driver job boards
//!
//! Dashboards that hold jobs after booking. Status changes come from user
//! actions only; notes are persisted through the booking service before they
//! are stored on the job.

use crate::error::{Result, TranzrError};
use crate::service::BookingService;
use tranzr_common::jobs::normalize_note;
use tranzr_common::{
    fixtures, CustomerJob, CustomerStatus, DriverAction, DriverJob, DriverStatus, Invoice, JobId, JobRequest, Payslip,
};

/// Save a note through the service; returns the normalized note on success
async fn persist_note(service: &dyn BookingService, job_id: &JobId, text: &str) -> Result<Option<String>> {
    let note = normalize_note(text);
    let saved = service
        .save_note(job_id, note.as_deref().unwrap_or_default())
        .await?;
    if !saved {
        return Err(TranzrError::Service(crate::service::ServiceError::Rejected(format!(
            "note for {} was not saved",
            job_id
        ))));
    }
    Ok(note)
}

#[derive(Debug, Clone, Default)]
pub struct CustomerBoard {
    active: Vec<CustomerJob>,
    past: Vec<CustomerJob>,
}

impl CustomerBoard {
    pub fn new(active: Vec<CustomerJob>, past: Vec<CustomerJob>) -> Self {
        Self { active, past }
    }

    pub fn with_fixtures() -> Self {
        Self::new(fixtures::customer_active_jobs(), fixtures::customer_past_jobs())
    }

    pub fn active(&self) -> &[CustomerJob] {
        &self.active
    }

    pub fn past(&self) -> &[CustomerJob] {
        &self.past
    }

    pub fn find(&self, job_id: &JobId) -> Option<&CustomerJob> {
        self.active.iter().chain(self.past.iter()).find(|j| &j.id == job_id)
    }

    fn find_mut(&mut self, job_id: &JobId) -> Option<&mut CustomerJob> {
        self.active.iter_mut().chain(self.past.iter_mut()).find(|j| &j.id == job_id)
    }

    /// Add a freshly submitted booking as a scheduled job
    pub fn record_booking(&mut self, job_id: JobId, request: &JobRequest, date: &str) -> &CustomerJob {
        let address = match (&request.route.origin_postcode, &request.route.destination_postcode) {
            (Some(from), Some(to)) => format!("{} → {}", from, to),
            (Some(from), None) => from.clone(),
            (None, Some(to)) => to.clone(),
            (None, None) => "Address to be confirmed".to_string(),
        };

        self.active.insert(
            0,
            CustomerJob {
                id: job_id,
                status: CustomerStatus::Scheduled,
                address,
                date: date.to_string(),
                time: "TBC".to_string(),
                item_count: request.items.len() as u32,
                estimated_hours: request.quote.estimated_hours,
                driver: None,
                note: None,
            },
        );
        &self.active[0]
    }

    /// Move a job to its next status; completed jobs move to the past list
    pub fn advance_status(&mut self, job_id: &JobId) -> Result<CustomerStatus> {
        let pos = self
            .active
            .iter()
            .position(|j| &j.id == job_id)
            .ok_or_else(|| {
                if self.past.iter().any(|j| &j.id == job_id) {
                    TranzrError::Booking(tranzr_common::Error::InvalidTransition {
                        action: "advance".into(),
                        status: CustomerStatus::Complete.to_string(),
                    })
                } else {
                    TranzrError::JobNotFound(job_id.clone())
                }
            })?;

        let next = self.active[pos].status.next()?;
        self.active[pos].status = next;
        if next == CustomerStatus::Complete {
            let job = self.active.remove(pos);
            self.past.insert(0, job);
        }
        tracing::info!(%job_id, status = %next, "customer job status changed");
        Ok(next)
    }

    pub async fn save_note(&mut self, service: &dyn BookingService, job_id: &JobId, text: &str) -> Result<&CustomerJob> {
        if self.find(job_id).is_none() {
            return Err(TranzrError::JobNotFound(job_id.clone()));
        }
        let note = persist_note(service, job_id, text).await?;
        let job = self
            .find_mut(job_id)
            .ok_or_else(|| TranzrError::JobNotFound(job_id.clone()))?;
        job.note = note;
        Ok(job)
    }
}

/// Totals shown on the driver's earnings tabs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EarningsSummary {
    pub paid_total: u32,
    pub approved_invoices: u32,
    pub pending_invoices: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverList {
    Available,
    Current,
    History,
}

#[derive(Debug, Clone, Default)]
pub struct DriverBoard {
    available: Vec<DriverJob>,
    current: Vec<DriverJob>,
    history: Vec<DriverJob>,
    payslips: Vec<Payslip>,
    invoices: Vec<Invoice>,
}

impl DriverBoard {
    pub fn new(available: Vec<DriverJob>, current: Vec<DriverJob>, history: Vec<DriverJob>) -> Self {
        Self {
            available,
            current,
            history,
            ..Default::default()
        }
    }

    pub fn with_fixtures() -> Self {
        Self {
            available: fixtures::driver_available_jobs(),
            current: fixtures::driver_current_jobs(),
            history: fixtures::driver_history_jobs(),
            payslips: fixtures::payslips(),
            invoices: fixtures::invoices(),
        }
    }

    pub fn available(&self) -> &[DriverJob] {
        &self.available
    }

    pub fn current(&self) -> &[DriverJob] {
        &self.current
    }

    pub fn history(&self) -> &[DriverJob] {
        &self.history
    }

    pub fn payslips(&self) -> &[Payslip] {
        &self.payslips
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn find(&self, job_id: &JobId) -> Option<&DriverJob> {
        self.available
            .iter()
            .chain(self.current.iter())
            .chain(self.history.iter())
            .find(|j| &j.id == job_id)
    }

    fn find_mut(&mut self, job_id: &JobId) -> Option<&mut DriverJob> {
        self.available
            .iter_mut()
            .chain(self.current.iter_mut())
            .chain(self.history.iter_mut())
            .find(|j| &j.id == job_id)
    }

    fn list_mut(&mut self, list: DriverList) -> &mut Vec<DriverJob> {
        match list {
            DriverList::Available => &mut self.available,
            DriverList::Current => &mut self.current,
            DriverList::History => &mut self.history,
        }
    }

    fn locate(&self, job_id: &JobId) -> Option<(DriverList, usize)> {
        [
            (DriverList::Available, &self.available),
            (DriverList::Current, &self.current),
            (DriverList::History, &self.history),
        ]
        .into_iter()
        .find_map(|(list, jobs)| jobs.iter().position(|j| &j.id == job_id).map(|pos| (list, pos)))
    }

    /// Apply a driver action, moving the job between lists as needed.
    ///
    /// Accepting moves a job to the end of current; completing moves it to
    /// the front of history.
    pub fn apply(&mut self, job_id: &JobId, action: DriverAction) -> Result<&DriverJob> {
        let (list, pos) = self
            .locate(job_id)
            .ok_or_else(|| TranzrError::JobNotFound(job_id.clone()))?;

        let jobs = self.list_mut(list);
        let next = action.apply(jobs[pos].status)?;
        jobs[pos].status = next;

        let target = match (list, next) {
            (_, DriverStatus::Completed) => DriverList::History,
            (DriverList::Available, _) => DriverList::Current,
            (list, _) => list,
        };

        tracing::info!(%job_id, %action, status = %next, "driver job status changed");

        if target == list {
            return Ok(&self.list_mut(list)[pos]);
        }

        let job = self.list_mut(list).remove(pos);
        let jobs = self.list_mut(target);
        if target == DriverList::History {
            jobs.insert(0, job);
            Ok(&jobs[0])
        } else {
            jobs.push(job);
            Ok(&jobs[jobs.len() - 1])
        }
    }

    pub async fn save_note(&mut self, service: &dyn BookingService, job_id: &JobId, text: &str) -> Result<&DriverJob> {
        if self.find(job_id).is_none() {
            return Err(TranzrError::JobNotFound(job_id.clone()));
        }
        let note = persist_note(service, job_id, text).await?;
        let job = self
            .find_mut(job_id)
            .ok_or_else(|| TranzrError::JobNotFound(job_id.clone()))?;
        job.note = note;
        Ok(job)
    }

    pub fn earnings(&self) -> EarningsSummary {
        let invoice_total = |status: &str| {
            self.invoices
                .iter()
                .filter(|i| i.status.eq_ignore_ascii_case(status))
                .map(|i| i.amount)
                .sum()
        };

        EarningsSummary {
            paid_total: self
                .payslips
                .iter()
                .filter(|p| p.status.eq_ignore_ascii_case("paid"))
                .map(|p| p.amount)
                .sum(),
            approved_invoices: invoice_total("approved"),
            pending_invoices: invoice_total("pending"),
        }
    }
}
