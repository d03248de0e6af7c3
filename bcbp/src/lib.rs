// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! IATA Bar Coded Boarding Pass (BCBP) decoder.
//!
//! This crate decodes the "Format M" data of a boarding pass barcode into its
//! [fields]. The data is made of groups: a unique mandatory group, a
//! mandatory group per leg, optional conditional and airline use data per
//! leg and optional security data. The size of the optional data is encoded
//! by hexadecimal size fields which are resolved into a [`Layout`] before the
//! fields are assembled.
//!
//! Decoding never fails. Data that violates the structure is kept as unknown
//! data and fields that don't match their format are marked invalid. The raw
//! values of all [`fields`] joined together are always the decoded data.
//!
//! # Examples
//!
//! Lets decode a boarding pass with two legs:
//!
//! ```
//! use bcbp::BoardingPass;
//!
//! let pass = BoardingPass::decode("M2DESMARAIS/LUC       EABC123 YULFRAAC 0834 326J003A0027 167>5321WW1325BAC 0014123456002001412346700100141234789012A0141234567890 1AC AC 1234567890123    20KYLX58ZDEF456 FRAGVALH 3664 327C012C0002 12E2A0140987654321 1AC AC 1234567890123    2PCNWQ^164GIWVC5EH7JNT684FVNJ91W2QA4DVN5J8K4F0L0GEQ3DF5TGBN8709HKT5D3DW3GBHFCVHMY7J5T6HFR41W2QA4DVN5J8K4F0L0GE");
//!
//! assert_eq!(pass.version_number(), Some(5));
//! assert_eq!(pass.leg_count(), Some(2));
//!
//! for leg in pass.data().repeated.iter().flatten() {
//!     let from = leg.mandatory.field(26).map(|f| f.raw.as_str());
//!     let to = leg.mandatory.field(38).map(|f| f.raw.as_str());
//!     println!("{from:?} -> {to:?}");
//! }
//!
//! let raw: String = pass.fields().iter().map(|f| f.raw.as_str()).collect();
//! assert_eq!(raw, pass.raw());
//! ```
//!
//! Airline, airport and compartment names are resolved by a [`CodeLookup`]
//! and ordinal dates relative to a known flight date or today:
//!
//! ```
//! use bcbp::{BoardingPass, TableLookup};
//! use chrono::NaiveDate;
//!
//! let mut lookup = TableLookup::new();
//! lookup.add_airport("YUL", "Montréal");
//!
//! let pass = BoardingPass::builder()
//!     .lookup(&lookup)
//!     .anchor_date(NaiveDate::from_ymd_opt(2025, 11, 20).unwrap())
//!     .build("M1DESMARAIS/LUC       EABC123 YULFRAAC 0834 326J001A0025 100");
//!
//! let from = pass.field(26, Some(0)).unwrap();
//! assert_eq!(from.interpretation.as_deref(), Some("Montréal"));
//!
//! let date = pass.field(46, Some(0)).unwrap();
//! assert_eq!(date.interpretation.as_deref(), Some("Sat 22 Nov 2025"));
//! ```
//!
//! [fields]: crate::Field
//! [`fields`]: crate::BoardingPass::fields

#[macro_use]
mod macros;

mod assembler;
mod error;
mod extractor;
mod field;
mod interpret;
mod lookup;
mod pass;

pub mod ordinal;
pub mod resolver;
pub mod schema;

pub use assembler::{FieldGroup, LegData, StructuredData, UniqueData};
pub use error::Error;
pub use extractor::Extractor;
pub use field::{parse_hex_size, Field, Group, UNKNOWN_FIELD_ID};
pub use interpret::Interpreter;
pub use lookup::{CodeLookup, Compartment, NoLookup, TableLookup};
pub use pass::{BoardingPass, BoardingPassBuilder};
pub use resolver::{ControlPoint, InvalidMarker, InvalidReason, Layout};
