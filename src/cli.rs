use crate::session::Role;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tranzr_common::DriverAction;

#[derive(Parser)]
#[command(name = "tranzr")]
#[command(about = "Removals booking: instant quotes, bookings and job boards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Quote a list of items
    Quote {
        /// JSON file with detected items (defaults to the sample items)
        #[arg(short, long)]
        items: Option<PathBuf>,
    },

    /// Book a removal step by step
    Book {
        /// Sign-in email (prompted when missing)
        #[arg(long)]
        email: Option<String>,

        /// Sign-in password (prompted when missing)
        #[arg(long, requires = "email")]
        password: Option<String>,
    },

    /// List jobs for a role
    Jobs {
        #[arg(short, long, value_enum, default_value = "customer")]
        role: Role,
    },

    /// Apply a driver action to a job
    Driver {
        #[arg(required = true)]
        job_id: String,

        /// accept/start/pause/resume/complete
        #[arg(required = true)]
        action: DriverAction,
    },

    /// Save a note on a job
    Note {
        #[arg(short, long, value_enum, default_value = "customer")]
        role: Role,

        #[arg(required = true)]
        job_id: String,

        /// Note text; empty clears the note
        #[arg(required = true)]
        text: String,
    },

    /// Driver payslips and invoices
    Earnings,

    /// Show or edit settings
    Config {
        /// Set the hourly rate in pounds
        #[arg(long)]
        set_hourly_rate: Option<u32>,

        /// Show settings
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_driver_action() {
        let cli = Cli::try_parse_from(["tranzr", "driver", "job1", "accept"]).unwrap();
        match cli.command {
            Commands::Driver { job_id, action } => {
                assert_eq!(job_id, "job1");
                assert_eq!(action, DriverAction::Accept);
            }
            _ => panic!("expected driver command"),
        }
    }

    #[test]
    fn test_reject_unknown_driver_action() {
        assert!(Cli::try_parse_from(["tranzr", "driver", "job1", "teleport"]).is_err());
    }

    #[test]
    fn test_note_role_and_verbose() {
        let cli = Cli::try_parse_from(["tranzr", "-v", "note", "--role", "driver", "job3", "Gate code 1234"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Note { role, job_id, text } => {
                assert_eq!(role, Role::Driver);
                assert_eq!(job_id, "job3");
                assert_eq!(text, "Gate code 1234");
            }
            _ => panic!("expected note command"),
        }
    }

    #[test]
    fn test_password_requires_email() {
        assert!(Cli::try_parse_from(["tranzr", "book", "--password", "secret"]).is_err());
    }
}
