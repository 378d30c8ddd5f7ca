//! Fixed prototype data
//!
//! Detection results, route details and the dashboards' starting jobs.

use crate::jobs::{AssignedDriver, CustomerJob, CustomerStatus, DriverJob, DriverStatus, Invoice, Payslip};
use crate::model::{DetectedItem, JobId, MediaKind};

pub const IMAGE_PLACEHOLDER_URI: &str =
    "https://images.unsplash.com/photo-1567225557594-88d73e55f2cb?w=400&q=80";
pub const VIDEO_PLACEHOLDER_URI: &str =
    "https://images.unsplash.com/photo-1558997519-83c9716b1b07?w=400&q=80";

pub fn placeholder_uri(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => IMAGE_PLACEHOLDER_URI,
        MediaKind::Video => VIDEO_PLACEHOLDER_URI,
    }
}

fn item(id: u64, name: &str, dimensions: &str, volume: &str) -> DetectedItem {
    DetectedItem {
        id,
        name: name.into(),
        dimensions: dimensions.into(),
        volume: volume.into(),
    }
}

pub fn detected_items() -> Vec<DetectedItem> {
    vec![
        item(1, "Sofa", "200x90x85cm", "1.53m³"),
        item(2, "Coffee Table", "120x60x45cm", "0.32m³"),
        item(3, "Bookshelf", "80x30x180cm", "0.43m³"),
    ]
}

/// (distance, duration, traffic)
pub const ROUTE_DETAILS: (&str, &str, &str) = ("5.2 miles", "15 mins", "Light traffic");

pub fn customer_active_jobs() -> Vec<CustomerJob> {
    vec![
        CustomerJob {
            id: JobId::from("TRZ-123456"),
            status: CustomerStatus::EnRoute,
            address: "123 Main Street, London, UK".into(),
            date: "2023-06-15".into(),
            time: "14:00-16:00".into(),
            item_count: 12,
            estimated_hours: 2,
            driver: Some(AssignedDriver {
                name: "John Smith".into(),
                image: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=john".into()),
                eta: Some("15 mins".into()),
            }),
            note: Some("Fragile items in the living room need special care.".into()),
        },
        CustomerJob {
            id: JobId::from("TRZ-789012"),
            status: CustomerStatus::Scheduled,
            address: "456 Park Avenue, Manchester, UK".into(),
            date: "2023-06-20".into(),
            time: "10:00-13:00".into(),
            item_count: 8,
            estimated_hours: 3,
            driver: None,
            note: None,
        },
    ]
}

pub fn customer_past_jobs() -> Vec<CustomerJob> {
    vec![CustomerJob {
        id: JobId::from("TRZ-987654"),
        status: CustomerStatus::Complete,
        address: "789 Oak Road, Birmingham, UK".into(),
        date: "2023-06-01".into(),
        time: "09:00-11:00".into(),
        item_count: 5,
        estimated_hours: 2,
        driver: Some(AssignedDriver {
            name: "Sarah Johnson".into(),
            image: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=sarah".into()),
            eta: None,
        }),
        note: Some("Everything went smoothly. Great service!".into()),
    }]
}

#[allow(clippy::too_many_arguments)]
fn driver_job(
    id: &str,
    status: DriverStatus,
    pickup: &str,
    dropoff: &str,
    estimated_time: &str,
    payment: u32,
    distance: &str,
    customer_name: &str,
    items: &[&str],
    note: Option<&str>,
) -> DriverJob {
    DriverJob {
        id: JobId::from(id),
        status,
        pickup: pickup.into(),
        dropoff: dropoff.into(),
        estimated_time: estimated_time.into(),
        payment,
        distance: distance.into(),
        customer_name: customer_name.into(),
        items: items.iter().map(|s| s.to_string()).collect(),
        note: note.map(str::to_string),
    }
}

pub fn driver_available_jobs() -> Vec<DriverJob> {
    vec![
        driver_job(
            "job1", DriverStatus::Available, "123 Main St, London", "456 Park Ave, London",
            "2 hours", 120, "5.2 miles", "John Smith", &["Sofa", "Dining Table", "Bed Frame"], None,
        ),
        driver_job(
            "job2", DriverStatus::Available, "789 Oak Rd, London", "101 Pine St, London",
            "1.5 hours", 90, "3.8 miles", "Emma Johnson", &["Wardrobe", "Bookshelf", "TV Stand"], None,
        ),
    ]
}

pub fn driver_current_jobs() -> Vec<DriverJob> {
    vec![driver_job(
        "job3", DriverStatus::InProgress, "222 Elm St, London", "333 Maple Ave, London",
        "2.5 hours", 150, "6.1 miles", "Sarah Williams", &["Refrigerator", "Washing Machine", "Couch"],
        Some("Customer mentioned the refrigerator needs to be handled with care."),
    )]
}

pub fn driver_history_jobs() -> Vec<DriverJob> {
    vec![
        driver_job(
            "job4", DriverStatus::Completed, "444 Cedar Ln, London", "555 Birch Rd, London",
            "1 hour", 75, "2.5 miles", "Michael Brown", &["Desk", "Office Chair", "Filing Cabinet"],
            Some("Delivery completed on time. Customer was satisfied."),
        ),
        driver_job(
            "job5", DriverStatus::Completed, "666 Willow Way, London", "777 Spruce St, London",
            "3 hours", 180, "7.3 miles", "David Jones", &["King Bed", "Dresser", "Nightstands", "Dining Set"],
            Some("Had to use the service elevator for the king bed."),
        ),
    ]
}

pub fn payslips() -> Vec<Payslip> {
    [
        ("PS001", "May 2023", 1250, "31/05/2023"),
        ("PS002", "June 2023", 1420, "30/06/2023"),
        ("PS003", "July 2023", 1380, "31/07/2023"),
    ]
    .into_iter()
    .map(|(id, period, amount, date)| Payslip {
        id: id.into(),
        period: period.into(),
        amount,
        date: date.into(),
        status: "Paid".into(),
    })
    .collect()
}

pub fn invoices() -> Vec<Invoice> {
    [
        ("INV001", "Fuel expenses", 120, "15/05/2023", "Approved"),
        ("INV002", "Vehicle maintenance", 250, "22/06/2023", "Pending"),
        ("INV003", "Parking fees", 45, "10/07/2023", "Approved"),
    ]
    .into_iter()
    .map(|(id, description, amount, date, status)| Invoice {
        id: id.into(),
        description: description.into(),
        amount,
        date: date.into(),
        status: status.into(),
    })
    .collect()
}
