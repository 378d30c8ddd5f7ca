//! Interactive booking in the terminal
//!
//! Drives [`BookingWizard`] with dialoguer prompts. Validation failures are
//! shown and the same step is offered again; nothing typed so far is lost.

use crate::board::CustomerBoard;
use crate::config::Config;
use crate::error::{Result, TranzrError};
use crate::service::{BookingService, MockBookingService};
use crate::session::Credentials;
use crate::wizard::{Back, BookingWizard, Notice, WizardStep};
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tranzr_common::{CustomerJob, DetectedItem, DriverJob, ItemEdit, JobId, MediaKind, PaymentMethod, Quote};

fn prompt_err(e: dialoguer::Error) -> TranzrError {
    TranzrError::Prompt(e.to_string())
}

/// Show a spinner while a service call is pending
async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

pub fn format_item_line(item: &DetectedItem) -> String {
    let dimensions = if item.dimensions.is_empty() {
        String::new()
    } else {
        format!(" ({})", item.dimensions)
    };
    let volume = if item.volume.is_empty() { "-" } else { item.volume.as_str() };
    format!("#{} {}{}  {}", item.id, item.name, dimensions, volume)
}

pub fn format_quote_lines(quote: &Quote, stale: bool) -> Vec<String> {
    let mut lines = vec![
        format!("  Total Volume:    {}", quote.volume_label()),
        format!("  Estimated Hours: {} hours", quote.estimated_hours),
        format!("  Hourly Rate:     £{}", quote.hourly_rate),
        format!("  Total Price:     £{}", quote.total_price),
        format!("  {}", quote.insurance_note),
    ];
    if stale {
        lines.push("  ⚠ Items changed since this quote was calculated. Recalculate to update it.".into());
    }
    lines
}

/// Job card lines for the customer dashboard
pub fn format_customer_job(job: &CustomerJob) -> Vec<String> {
    let mut lines = vec![
        format!("  {}  [{}]  {} {}", job.id, job.status.label(), job.date, job.time),
        format!("    {} · {} items · {} hrs", job.address, job.item_count, job.estimated_hours),
    ];
    if let Some(driver) = &job.driver {
        match &driver.eta {
            Some(eta) => lines.push(format!("    Driver: {} (ETA {})", driver.name, eta)),
            None => lines.push(format!("    Driver: {}", driver.name)),
        }
    }
    if let Some(note) = &job.note {
        lines.push(format!("    Note: {}", note));
    }
    lines
}

/// Job card lines for the driver dashboard
pub fn format_driver_job(job: &DriverJob) -> Vec<String> {
    let mut lines = vec![
        format!("  {}  [{}]  £{}", job.id, job.status.label(), job.payment),
        format!("    {} → {}", job.pickup, job.dropoff),
        format!("    {} · {} · {}", job.customer_name, job.distance, job.estimated_time),
    ];
    if !job.items.is_empty() {
        lines.push(format!("    Items: {}", job.items.join(", ")));
    }
    if let Some(note) = &job.note {
        lines.push(format!("    Note: {}", note));
    }
    lines
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice {
            Notice::StaleQuote => println!("⚠ The quote does not reflect your latest item changes"),
            Notice::SignInOverridden => println!("⚠ Sign-in was not confirmed; continuing anyway"),
        }
    }
}

fn prompt_credentials() -> Result<Credentials> {
    let email: String = Input::new()
        .with_prompt("Email")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let password = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()
        .map_err(prompt_err)?;
    Ok(Credentials::new(email, password))
}

fn select(prompt: &str, options: &[&str]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact()
        .map_err(prompt_err)
}

fn pick_item(items: &[DetectedItem]) -> Result<Option<u64>> {
    if items.is_empty() {
        println!("  No items yet");
        return Ok(None);
    }
    let labels: Vec<String> = items.iter().map(format_item_line).collect();
    let index = Select::new()
        .with_prompt("Item")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    Ok(items.get(index).map(|i| i.id))
}

fn text(prompt: &str, initial: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)
}

enum StepChoice {
    Stay,
    Advance,
    Back,
}

/// Prompt for the current step and apply edits. Returns what to do next.
async fn run_step(wizard: &mut BookingWizard) -> Result<StepChoice> {
    let step = wizard.step();
    let forward = step.action_label();

    match step {
        WizardStep::MediaUpload => {
            println!("Include an A4 sheet of paper in at least one photo or video for scale.");
            for media in wizard.draft().media() {
                println!("  #{} [{}] {}", media.id, media.kind, media.uri);
            }
            match select("Media", &["Take photo", "Record video", "Remove media", forward, "Back"])? {
                0 => {
                    wizard.upload_media(MediaKind::Image).await?;
                }
                1 => {
                    wizard.upload_media(MediaKind::Video).await?;
                }
                2 => {
                    let ids: Vec<String> = wizard.draft().media().iter().map(|m| m.id.to_string()).collect();
                    if ids.is_empty() {
                        println!("  No media to remove");
                    } else {
                        let index = select("Remove", &ids.iter().map(String::as_str).collect::<Vec<_>>())?;
                        if let Some(id) = wizard.draft().media().get(index).map(|m| m.id) {
                            wizard.remove_media(id)?;
                        }
                    }
                }
                3 => return Ok(StepChoice::Advance),
                _ => return Ok(StepChoice::Back),
            }
            Ok(StepChoice::Stay)
        }
        WizardStep::LocationEntry => {
            let route = wizard.draft().route().clone();
            let origin = text("Pickup postcode", route.origin_postcode.as_deref().unwrap_or_default())?;
            let destination = text("Drop-off postcode", route.destination_postcode.as_deref().unwrap_or_default())?;
            wizard.set_postcodes(&origin, &destination)?;
            match select("Locations", &[forward, "Back"])? {
                0 => Ok(StepChoice::Advance),
                _ => Ok(StepChoice::Back),
            }
        }
        WizardStep::QuoteReview => {
            let route = wizard.draft().route();
            if !route.distance.is_empty() {
                println!("Route: {}, {} ({})", route.distance, route.duration, route.traffic_condition);
            }
            println!("Detected Items");
            for item in wizard.draft().items() {
                println!("  {}", format_item_line(item));
            }
            if let Some(quote) = wizard.draft().quote() {
                for line in format_quote_lines(quote, wizard.draft().is_quote_stale()) {
                    println!("{}", line);
                }
            }

            let options = ["Add item", "Edit item", "Delete item", "Recalculate quote", forward, "Back"];
            match select("Quote", &options)? {
                0 => {
                    let name = text("Name", "")?;
                    let dimensions = text("Dimensions (e.g. 200x90x85cm)", "")?;
                    let volume = text("Volume (blank to derive from dimensions)", "")?;
                    wizard.add_item(&name, &dimensions, &volume)?;
                }
                1 => {
                    if let Some(id) = pick_item(wizard.draft().items())? {
                        let current = wizard.draft().items().iter().find(|i| i.id == id).cloned().unwrap_or_default();
                        let edit = ItemEdit {
                            name: Some(text("Name", &current.name)?),
                            dimensions: Some(text("Dimensions", &current.dimensions)?),
                            volume: Some(text("Volume", &current.volume)?),
                        };
                        wizard.update_item(id, edit)?;
                    }
                }
                2 => {
                    if let Some(id) = pick_item(wizard.draft().items())? {
                        wizard.remove_item(id)?;
                    }
                }
                3 => {
                    wizard.recalculate_quote()?;
                }
                4 => {
                    if !wizard.session().has_credentials() {
                        println!("Sign in to continue");
                        wizard.set_credentials(prompt_credentials()?);
                    }
                    return Ok(StepChoice::Advance);
                }
                _ => return Ok(StepChoice::Back),
            }
            Ok(StepChoice::Stay)
        }
        WizardStep::Payment => {
            if let Some(quote) = wizard.draft().quote() {
                println!("Order Summary");
                println!("  {} hours removal service  £{}", quote.estimated_hours, quote.total_price);
                println!("  Total: £{}", quote.total_price);
            }
            let labels: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.label()).collect();
            let index = select("Payment method", &labels)?;
            if let Some(method) = PaymentMethod::ALL.get(index) {
                wizard.select_payment_method(*method)?;
            }
            match select("Payment", &[forward, "Back"])? {
                0 => Ok(StepChoice::Advance),
                _ => Ok(StepChoice::Back),
            }
        }
        WizardStep::Submitted => Ok(StepChoice::Advance),
    }
}

/// Run the booking wizard against the mock service.
///
/// Returns the job id, or None when the user backed out of the first step.
pub async fn run_booking(config: &Config, credentials: Option<Credentials>) -> Result<Option<JobId>> {
    let service: Arc<dyn BookingService> = Arc::new(MockBookingService::from_config(config));
    let mut wizard = BookingWizard::from_config(service, config);
    if let Some(credentials) = credentials {
        wizard.set_credentials(credentials);
    }

    loop {
        let step = wizard.step();
        if step == WizardStep::Submitted {
            break;
        }
        println!("\n[{}/{}] {}", step.number(), WizardStep::INPUT_STEPS.len(), step.title());

        let choice = match run_step(&mut wizard).await {
            Ok(choice) => choice,
            Err(e) if e.is_recoverable() => {
                println!("⚠ {}", e);
                continue;
            }
            Err(e) => return Err(e),
        };

        match choice {
            StepChoice::Stay => {}
            StepChoice::Back => {
                match wizard.back() {
                    Back::Exited => {
                        println!("Booking cancelled");
                        return Ok(None);
                    }
                    Back::Blocked => println!("⚠ Please wait for the booking to finish"),
                    Back::Moved(_) => {}
                }
            }
            StepChoice::Advance => {
                let message = match step {
                    WizardStep::MediaUpload => "Analysing your photos...",
                    WizardStep::QuoteReview => "Signing in...",
                    WizardStep::Payment => "Submitting booking...",
                    WizardStep::LocationEntry => "Estimating route...",
                    _ => "Working...",
                };
                match with_spinner(message, wizard.advance()).await {
                    Ok(advance) => print_notices(&advance.notices),
                    Err(TranzrError::AuthenticationFailed(email)) => {
                        println!("⚠ Sign-in failed for {}", email);
                        let retry = Confirm::new()
                            .with_prompt("Try different credentials?")
                            .default(true)
                            .interact()
                            .map_err(prompt_err)?;
                        if retry {
                            wizard.set_credentials(prompt_credentials()?);
                        }
                    }
                    Err(e) if e.is_recoverable() => println!("⚠ {}", e),
                    Err(e) => return Err(e),
                }
            }
        }
    }

    let Some(job_id) = wizard.job_id().cloned() else {
        return Ok(None);
    };

    if let Some(quote) = wizard.draft().quote() {
        println!("\n✅ Booking confirmed: {} (£{})", job_id, quote.total_price);
    }

    let mut board = CustomerBoard::with_fixtures();
    if let Some(request) = wizard.draft().clone().snapshot() {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let job = board.record_booking(job_id.clone(), &request, &today);
        println!("  {} · {} · {} hrs estimated", job.status.label(), job.address, job.estimated_hours);
    }

    Ok(Some(job_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tranzr_common::{fixtures, recalculate_quote, QuoteParams};

    #[test]
    fn test_format_item_line() {
        let items = fixtures::detected_items();
        assert_eq!(format_item_line(&items[0]), "#1 Sofa (200x90x85cm)  1.53m³");

        let bare = DetectedItem { id: 9, name: "Box".into(), ..Default::default() };
        assert_eq!(format_item_line(&bare), "#9 Box  -");
    }

    #[test]
    fn test_format_quote_lines_flags_stale() {
        let quote = recalculate_quote(&fixtures::detected_items(), &QuoteParams::default());

        let fresh = format_quote_lines(&quote, false);
        assert!(fresh.iter().any(|l| l.contains("£135")));
        assert!(fresh.iter().any(|l| l.contains("2.28m³")));
        assert!(!fresh.iter().any(|l| l.contains("Recalculate")));

        let stale = format_quote_lines(&quote, true);
        assert_eq!(stale.len(), fresh.len() + 1);
    }

    /// Driver with an ETA on an active job
    #[test]
    fn test_format_customer_job_with_eta() {
        let job = &fixtures::customer_active_jobs()[0];
        let lines = format_customer_job(job);

        assert_eq!(lines[0], "  TRZ-123456  [Driver En Route]  2023-06-15 14:00-16:00");
        assert!(lines.contains(&"    Driver: John Smith (ETA 15 mins)".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("    Note: Fragile")));
    }

    /// Past jobs keep the driver but have no ETA
    #[test]
    fn test_format_customer_job_without_eta() {
        let job = &fixtures::customer_past_jobs()[0];
        let lines = format_customer_job(job);
        assert!(lines.contains(&"    Driver: Sarah Johnson".to_string()));
        assert!(!lines.iter().any(|l| l.contains("ETA")));
    }

    /// Unassigned scheduled job without a note
    #[test]
    fn test_format_customer_job_minimal() {
        let job = &fixtures::customer_active_jobs()[1];
        assert_eq!(format_customer_job(job).len(), 2);
    }

    /// Driver card lists the items and the note
    #[test]
    fn test_format_driver_job() {
        let job = &fixtures::driver_current_jobs()[0];
        let lines = format_driver_job(job);

        assert_eq!(lines[0], "  job3  [In Progress]  £150");
        assert_eq!(lines[1], "    222 Elm St, London → 333 Maple Ave, London");
        assert!(lines.contains(&"    Items: Refrigerator, Washing Machine, Couch".to_string()));
        assert_eq!(lines.len(), 5);
    }
}
