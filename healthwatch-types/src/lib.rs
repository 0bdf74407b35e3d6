//! # healthwatch-types
//!
//! Core types for hardware health normalization. This crate defines the
//! shared vocabulary between the normalization engine and whatever monitoring
//! host consumes its output: severities, normalized status values, sensor
//! measurements, check results and discovery records.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable `serde` and/or `minicbor` features as needed
//! - **Vendor agnostic**: Nothing in here knows about Redfish, PowerVault or Pure
//! - **Ergonomic builders**: Fluent API for constructing measurements
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON/MessagePack/etc. serialization via serde
//! - `minicbor`: Compact binary serialization via CBOR (useful for storing
//!   discovery parameters)
//! - `all`: Enable all serialization formats
//!
//! ## Example
//!
//! ```rust
//! use healthwatch_types::{Measurement, Severity, Unit};
//!
//! let fan = Measurement::builder(4200.0)
//!     .unit(Unit::Rpm)
//!     .lower(Some(1000.0), Some(500.0))
//!     .build();
//!
//! assert_eq!(fan.unit.render(fan.value), "4200.0 rpm");
//! assert!(Severity::Crit > Severity::Warn);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod discovery;
mod measurement;
mod result;
mod severity;
mod status;

pub use discovery::*;
pub use measurement::*;
pub use result::*;
pub use severity::*;
pub use status::*;
