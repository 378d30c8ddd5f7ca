//! Booking data model
//!
//! Types shared by the booking wizard, the job boards and the CLI:
//! - MediaAsset / DetectedItem: what the customer uploads and what detection finds
//! - RouteInfo / Quote: derived, display-oriented values
//! - JobRequest: the immutable snapshot submitted at the end of the wizard

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned job identifier (`PREFIX-######`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        JobId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// A captured or uploaded photo/video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: u64,
    pub kind: MediaKind,
    pub uri: String,
}

/// An item found in the uploaded media, editable by the customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedItem {
    pub id: u64,
    pub name: String,
    /// Free text, e.g. `200x90x85cm`
    #[serde(default)]
    pub dimensions: String,
    /// Free text with a unit suffix, e.g. `1.53m³`
    #[serde(default)]
    pub volume: String,
}

/// Route between the two postcodes (display only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteInfo {
    pub origin_postcode: Option<String>,
    pub destination_postcode: Option<String>,
    pub distance: String,
    pub duration: String,
    pub traffic_condition: String,
}

impl RouteInfo {
    /// Both postcodes present and non-blank
    pub fn has_postcodes(&self) -> bool {
        let filled = |p: &Option<String>| p.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.origin_postcode) && filled(&self.destination_postcode)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Cubic metres
    pub total_volume: f64,
    pub estimated_hours: u32,
    pub hourly_rate: u32,
    pub total_price: u32,
    #[serde(rename = "insurance")]
    pub insurance_note: String,
}

impl Quote {
    /// `2.28m³`
    pub fn volume_label(&self) -> String {
        format!("{:.2}m³", self.total_volume)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Card, PaymentMethod::BankTransfer];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "bank" | "banktransfer" | "bank-transfer" | "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            _ => Err(format!("Unknown payment method: {}. Use card or bank-transfer", s)),
        }
    }
}

/// Snapshot submitted once at the end of the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub items: Vec<DetectedItem>,
    pub route: RouteInfo,
    pub quote: Quote,
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_has_postcodes() {
        let mut route = RouteInfo::default();
        assert!(!route.has_postcodes());

        route.origin_postcode = Some("E1 6AN".into());
        route.destination_postcode = Some("  ".into());
        assert!(!route.has_postcodes());

        route.destination_postcode = Some("M1 1AE".into());
        assert!(route.has_postcodes());
    }

    #[test]
    fn test_payment_method_from_str() {
        assert_eq!("card".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert_eq!("Bank-Transfer".parse::<PaymentMethod>(), Ok(PaymentMethod::BankTransfer));
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_quote_serialize_uses_insurance_key() {
        let quote = Quote {
            total_volume: 2.28,
            estimated_hours: 3,
            hourly_rate: 45,
            total_price: 135,
            insurance_note: "Basic coverage included".into(),
        };
        let json = serde_json::to_string(&quote).expect("serialize failed");
        assert!(json.contains("\"estimatedHours\":3"));
        assert!(json.contains("\"insurance\":\"Basic coverage included\""));
        assert_eq!(quote.volume_label(), "2.28m³");
    }

    #[test]
    fn test_detected_item_deserialize_missing_fields() {
        let item: DetectedItem = serde_json::from_str(r#"{"id": 4, "name": "Lamp"}"#).expect("deserialize failed");
        assert_eq!(item.name, "Lamp");
        assert_eq!(item.volume, "");
    }
}
