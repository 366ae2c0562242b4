//! # Commands Module
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── report.rs   ◄─── report, reports, all
//! └── intake.rs   ◄─── product-intake submission
//! ```
//!
//! Every command takes the [`Session`](crate::state::Session) by reference
//! and an output writer, so tests drive them against a `Vec<u8>`.

pub mod intake;
pub mod report;
