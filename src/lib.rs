//! # billdotcom-rs
//!
//! A Rust client library for the Bill.com v2 API.
//!
//! Every call is a form-encoded POST carrying the developer key, the session
//! ID, and a JSON `data` document; the client handles that envelope and
//! exposes typed entities on top of it.
//!
//! ```ignore
//! use billdotcom_rs::{Client, Credentials, Environment, entities::bill};
//! use rust_decimal_macros::dec;
//! use time::macros::date;
//!
//! let mut client = Client::new(Credentials {
//!     user_name: "user@example.com".into(),
//!     password: "...".into(),
//!     dev_key: "...".into(),
//!     env: Environment::Sandbox,
//! })?;
//! client.login("00801ORGID", None, None).await?;
//!
//! let bill = client
//!     .bills()
//!     .create(&bill::Builder::new(
//!         "00901VENDOR",
//!         "INV-1042",
//!         date!(2024 - 03 - 01),
//!         date!(2024 - 03 - 31),
//!         vec![bill::LineItemBuilder::new(dec!(120.50))],
//!     ))
//!     .await?;
//! ```
//!
//! Errors carry async span traces via `tracing-error`; set up tracing with
//! an `ErrorLayer` to capture them:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())
//!     .init();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod client;
pub mod endpoints;
pub mod entities;
pub mod error;
pub mod payments;
pub mod request;
pub mod utils;

#[cfg(feature = "webhook")]
pub mod webhook;

pub use client::{Client, Credentials, MfaStatus, Session};
pub use endpoints::{BillComEndpoint, Environment};
pub use entities::{
    ApprovalStatus, BillComObject, CreateParams, Entity, IsActive, PaymentStatus, from_value,
};
pub use error::{Error, Result};
pub use payments::{
    BillPayParams, ChargeCustomerParams, InvoicePayParams, MailHeaders, PayBillsParams,
    PaymentsApi, RecordApPaymentParams, RecordArPaymentParams,
};
pub use request::{Filter, ListParams, Sort};

// Re-export SpanTrace for users who want to access it
pub use tracing_error::SpanTrace;

// Re-export the resource handle and metadata types for convenience
pub use entities::metadata::{FieldMetadata, Metadata};
pub use entities::resource::Resource;
