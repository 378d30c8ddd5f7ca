//! tranzr
//!
//! Booking wizard, job boards and the terminal client built on
//! [`tranzr_common`].

pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod service;
pub mod session;
pub mod wizard;
