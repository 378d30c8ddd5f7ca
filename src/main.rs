use clap::Parser;
use tracing_subscriber::EnvFilter;
use tranzr::board::{CustomerBoard, DriverBoard};
use tranzr::service::MockBookingService;
use tranzr::session::{Credentials, Role};
use tranzr::{cli, config, error, interactive};
use tranzr_common::{fixtures, recalculate_quote, CustomerJob, DetectedItem, DriverJob, JobId};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn print_customer_job(job: &CustomerJob) {
    for line in interactive::format_customer_job(job) {
        println!("{}", line);
    }
}

fn print_driver_job(job: &DriverJob) {
    for line in interactive::format_driver_job(job) {
        println!("{}", line);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Quote { items } => {
            let items: Vec<DetectedItem> = match items {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)?;
                    serde_json::from_str(&content)?
                }
                None => fixtures::detected_items(),
            };

            println!("📦 tranzr - Quote\n");
            for item in &items {
                println!("  {}", interactive::format_item_line(item));
            }
            println!();
            let quote = recalculate_quote(&items, &config.quote_params());
            for line in interactive::format_quote_lines(&quote, false) {
                println!("{}", line);
            }
        }

        Commands::Book { email, password } => {
            println!("🚚 tranzr - Book a removal");
            let credentials = email.zip(password).map(|(e, p)| Credentials::new(e, p));
            if interactive::run_booking(&config, credentials).await?.is_none() {
                println!("No booking made");
            }
        }

        Commands::Jobs { role } => match role {
            Role::Customer => {
                let board = CustomerBoard::with_fixtures();
                println!("Active jobs ({})", board.active().len());
                board.active().iter().for_each(print_customer_job);
                println!("\nPast jobs ({})", board.past().len());
                board.past().iter().for_each(print_customer_job);
            }
            Role::Driver => {
                let board = DriverBoard::with_fixtures();
                println!("Available jobs ({})", board.available().len());
                board.available().iter().for_each(print_driver_job);
                println!("\nCurrent jobs ({})", board.current().len());
                board.current().iter().for_each(print_driver_job);
                println!("\nJob history ({})", board.history().len());
                board.history().iter().for_each(print_driver_job);
            }
        },

        Commands::Driver { job_id, action } => {
            let mut board = DriverBoard::with_fixtures();
            let job = board.apply(&JobId::from(job_id.as_str()), action)?;
            println!("✔ {} {}", action, job.id);
            print_driver_job(job);
        }

        Commands::Note { role, job_id, text } => {
            let service = MockBookingService::from_config(&config);
            let job_id = JobId::from(job_id.as_str());
            match role {
                Role::Customer => {
                    let mut board = CustomerBoard::with_fixtures();
                    let job = board.save_note(&service, &job_id, &text).await?;
                    println!("✔ Note saved");
                    print_customer_job(job);
                }
                Role::Driver => {
                    let mut board = DriverBoard::with_fixtures();
                    let job = board.save_note(&service, &job_id, &text).await?;
                    println!("✔ Note saved");
                    print_driver_job(job);
                }
            }
        }

        Commands::Earnings => {
            let board = DriverBoard::with_fixtures();
            let summary = board.earnings();

            println!("Payslips");
            for slip in board.payslips() {
                println!("  {}  {}  £{}  {} ({})", slip.id, slip.period, slip.amount, slip.status, slip.date);
            }
            println!("  Paid total: £{}", summary.paid_total);

            println!("\nInvoices");
            for invoice in board.invoices() {
                println!(
                    "  {}  {}  £{}  {} ({})",
                    invoice.id, invoice.description, invoice.amount, invoice.status, invoice.date
                );
            }
            println!("  Approved: £{}", summary.approved_invoices);
            println!("  Pending:  £{}", summary.pending_invoices);
        }

        Commands::Config { set_hourly_rate, show } => {
            let mut config = config;

            if let Some(rate) = set_hourly_rate {
                config.set_hourly_rate(rate)?;
                println!("✔ Hourly rate set to £{}", rate);
            }

            if show || set_hourly_rate.is_none() {
                println!("Settings:");
                println!("  Hourly rate: £{}", config.hourly_rate);
                println!("  Insurance: {}", config.insurance_note);
                println!("  Job id prefix: {}", config.job_id_prefix);
                println!("  Allow failed login: {}", config.allow_failed_login);
                println!(
                    "  Latency (ms): auth {}, submit {}, note {}, upload {}",
                    config.latency.auth_ms, config.latency.submit_ms, config.latency.note_ms, config.latency.upload_ms
                );
            }
        }
    }

    Ok(())
}
