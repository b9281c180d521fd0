//! Document generation for the ZNZNOW agreement platform.
//!
//! Two pieces live here: decoding the submitted signature data URI into raw
//! PNG bytes, and rendering the fixed-layout partnership agreement PDF.
//!
//! # Example
//!
//! ```
//! use znznow_core::AgreementForm;
//! use znznow_document::{decode_signature, PdfRenderer};
//!
//! let form = AgreementForm {
//!     vendor_name: "Spice Tours".to_string(),
//!     vendor_email: "a@b.com".to_string(),
//!     vendor_registration: "REG1".to_string(),
//!     contact_person: "Jane".to_string(),
//!     partnership_level: "growth".to_string(),
//!     ..AgreementForm::default()
//! };
//!
//! let signature = decode_signature("data:image/png;base64,aGVsbG8=");
//! let pdf = PdfRenderer::default()
//!     .render(&form, signature.as_deref())
//!     .unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod renderer;
pub mod signature;
pub mod terms;

pub use error::{RenderError, Result};
pub use renderer::{Branding, PdfRenderer};
pub use signature::decode_signature;
