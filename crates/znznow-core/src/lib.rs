//! Core types for the ZNZNOW vendor agreement platform.
//!
//! This crate provides the foundational types used throughout the platform:
//!
//! - **Identifiers**: the strongly-typed [`AgreementId`]
//! - **Domain types**: partnership tiers, record status, and the submitted
//!   agreement payload
//!
//! # Example
//!
//! ```
//! use znznow_core::{AgreementId, PartnershipLevel};
//!
//! // Generate an agreement ID
//! let id = AgreementId::generate();
//! assert_eq!(id, AgreementId::parse(&id.to_string()).unwrap());
//!
//! // The commission mapping is binary: "growth" and everything else
//! assert_eq!(PartnershipLevel::from_code("growth").commission_percent(), 25);
//! assert_eq!(PartnershipLevel::from_code("platinum").commission_percent(), 30);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;
pub mod types;

pub use ids::{AgreementId, IdError};
pub use types::{AgreementForm, AgreementStatus, PartnershipLevel};
