//! Post-booking jobs
//!
//! Customers and drivers see the same job through different status sets.
//! Status changes are user-initiated; each view has a total transition
//! function that rejects every pair it does not list.

use crate::error::{Error, Result};
use crate::model::JobId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerStatus {
    Scheduled,
    EnRoute,
    OnSite,
    Complete,
}

impl CustomerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CustomerStatus::Scheduled => "Scheduled",
            CustomerStatus::EnRoute => "Driver En Route",
            CustomerStatus::OnSite => "Driver On Site",
            CustomerStatus::Complete => "Completed",
        }
    }

    /// scheduled → en-route → on-site → complete
    pub fn next(&self) -> Result<CustomerStatus> {
        match self {
            CustomerStatus::Scheduled => Ok(CustomerStatus::EnRoute),
            CustomerStatus::EnRoute => Ok(CustomerStatus::OnSite),
            CustomerStatus::OnSite => Ok(CustomerStatus::Complete),
            CustomerStatus::Complete => Err(Error::InvalidTransition {
                action: "advance".into(),
                status: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerStatus::Scheduled => write!(f, "scheduled"),
            CustomerStatus::EnRoute => write!(f, "en-route"),
            CustomerStatus::OnSite => write!(f, "on-site"),
            CustomerStatus::Complete => write!(f, "complete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedDriver {
    pub name: String,
    pub image: Option<String>,
    pub eta: Option<String>,
}

/// Job as shown on the customer dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerJob {
    pub id: JobId,
    pub status: CustomerStatus,
    pub address: String,
    pub date: String,
    /// e.g. `14:00-16:00`
    pub time: String,
    pub item_count: u32,
    pub estimated_hours: u32,
    #[serde(default)]
    pub driver: Option<AssignedDriver>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Available,
    Assigned,
    InProgress,
    Paused,
    Completed,
}

impl DriverStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DriverStatus::Available => "Available",
            DriverStatus::Assigned => "Assigned",
            DriverStatus::InProgress => "In Progress",
            DriverStatus::Paused => "Paused",
            DriverStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverStatus::Available => write!(f, "available"),
            DriverStatus::Assigned => write!(f, "assigned"),
            DriverStatus::InProgress => write!(f, "in_progress"),
            DriverStatus::Paused => write!(f, "paused"),
            DriverStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverAction {
    Accept,
    Start,
    Pause,
    Resume,
    Complete,
}

impl DriverAction {
    /// Total transition function for the driver view
    pub fn apply(&self, status: DriverStatus) -> Result<DriverStatus> {
        use DriverAction::*;
        use DriverStatus::*;

        match (self, status) {
            (Accept, Available) => Ok(InProgress),
            (Start, Assigned) => Ok(InProgress),
            (Pause, InProgress) => Ok(Paused),
            (Resume, Paused) => Ok(InProgress),
            (Complete, InProgress) => Ok(Completed),
            (action, status) => Err(Error::InvalidTransition {
                action: action.to_string(),
                status: status.to_string(),
            }),
        }
    }

    /// Actions offered for a status
    pub fn available_for(status: DriverStatus) -> &'static [DriverAction] {
        match status {
            DriverStatus::Available => &[DriverAction::Accept],
            DriverStatus::Assigned => &[DriverAction::Start],
            DriverStatus::InProgress => &[DriverAction::Pause, DriverAction::Complete],
            DriverStatus::Paused => &[DriverAction::Resume],
            DriverStatus::Completed => &[],
        }
    }
}

impl fmt::Display for DriverAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverAction::Accept => write!(f, "accept"),
            DriverAction::Start => write!(f, "start"),
            DriverAction::Pause => write!(f, "pause"),
            DriverAction::Resume => write!(f, "resume"),
            DriverAction::Complete => write!(f, "complete"),
        }
    }
}

impl std::str::FromStr for DriverAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" => Ok(DriverAction::Accept),
            "start" => Ok(DriverAction::Start),
            "pause" => Ok(DriverAction::Pause),
            "resume" => Ok(DriverAction::Resume),
            "complete" => Ok(DriverAction::Complete),
            _ => Err(format!(
                "Unknown action: {}. Use accept, start, pause, resume, or complete",
                s
            )),
        }
    }
}

/// Job as shown on the driver dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverJob {
    pub id: JobId,
    pub status: DriverStatus,
    pub pickup: String,
    pub dropoff: String,
    pub estimated_time: String,
    /// Whole pounds
    pub payment: u32,
    pub distance: String,
    pub customer_name: String,
    pub items: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    pub id: String,
    pub period: String,
    pub amount: u32,
    pub date: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub description: String,
    pub amount: u32,
    pub date: String,
    pub status: String,
}

/// Normalize note text: blank clears the note
pub fn normalize_note(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
