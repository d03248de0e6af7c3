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

use std::fmt;

use chrono::{Local, NaiveDate};
use log::debug;

use crate::assembler::{Assembler, StructuredData};
use crate::extractor::Extractor;
use crate::field::{Field, Group};
use crate::interpret::Context;
use crate::lookup::{CodeLookup, NoLookup};
use crate::ordinal::{parse_issue_date, DateWindows, OrdinalResolver};
use crate::resolver::{detect_version, resolve, InvalidReason, Layout};
use crate::schema::{id, Schema};

/// A decoded boarding pass.
///
/// The pass is decoded once when created and never fails. Malformed data
/// shows up as invalid fields or as unknown data.
///
/// # Examples
///
/// ```
/// use bcbp::BoardingPass;
///
/// let pass = BoardingPass::decode(
///     "M1DESMARAIS/LUC       EABC123 YULFRAAC 0834 326J001A0025 100",
/// );
///
/// assert_eq!(pass.leg_count(), Some(1));
/// assert_eq!(pass.version_number(), None);
/// assert!(pass.is_fully_valid());
///
/// let seat = pass.field(104, Some(0)).expect("seat should be decoded");
/// assert_eq!(seat.raw, "001A");
/// assert_eq!(seat.interpretation.as_deref(), Some("1A"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoardingPass {
    raw: String,
    version: Option<u8>,
    #[cfg_attr(feature = "serde", serde(skip))]
    schema: Schema,
    layout: Layout,
    data: StructuredData,
}

impl BoardingPass {
    /// Decodes the `raw` barcode data with the default settings.
    pub fn decode(raw: &str) -> Self {
        BoardingPassBuilder::new().build(raw)
    }

    pub fn builder<'a>() -> BoardingPassBuilder<'a> {
        BoardingPassBuilder::new()
    }

    /// The barcode data this pass was decoded from.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn data(&self) -> &StructuredData {
        &self.data
    }

    /// The resolved control points.
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The version number following the `>`, if present.
    #[inline]
    pub fn version_number(&self) -> Option<u8> {
        self.version
    }

    /// The number of legs encoded, if it's a digit from 1 to 9.
    pub fn leg_count(&self) -> Option<u8> {
        self.raw
            .as_bytes()
            .get(1)
            .filter(|b| (b'1'..=b'9').contains(*b))
            .map(|b| b - b'0')
    }

    /// Why the structure of the record is invalid, if it is.
    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        self.layout.invalid.map(|marker| marker.reason)
    }

    /// Returns `true` if the record is structurally valid and all fields are
    /// valid and known.
    pub fn is_fully_valid(&self) -> bool {
        self.layout.invalid.is_none()
            && self
                .fields()
                .iter()
                .all(|field| field.valid && !field.is_unknown())
    }

    /// Returns all decoded fields in the order of the barcode.
    ///
    /// Concatenating the raw values yields the barcode data.
    pub fn fields(&self) -> Vec<&Field> {
        self.data.fields()
    }

    /// Returns the decoded field `id`. Fields of repeated groups require the
    /// `leg`.
    pub fn field(&self, id: u16, leg: Option<usize>) -> Option<&Field> {
        let group = self.schema.field(id)?.group;
        let unique = self.data.unique.as_ref();
        let leg = || leg.and_then(|leg| self.data.repeated.as_ref()?.get(leg));

        let fields = match group {
            Group::UniqueMandatory => unique.map(|u| &u.mandatory),
            Group::UniqueConditional => unique.and_then(|u| u.conditional.as_ref()),
            Group::Security => unique.and_then(|u| u.security.as_ref()),
            Group::RepeatedMandatory => leg().map(|l| &l.mandatory),
            Group::RepeatedConditional => leg().and_then(|l| l.conditional.as_ref()),
            Group::RepeatedAirlineUse => leg().and_then(|l| l.airline.as_ref()),
        }?;

        fields.field(id)
    }
}

impl fmt::Display for BoardingPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in self.fields() {
            writeln!(f, "{field}")?;
        }
        Ok(())
    }
}

/// Boarding pass factory, which holds the context used to decode.
#[derive(Clone, Copy, Default)]
pub struct BoardingPassBuilder<'a> {
    lookup: Option<&'a dyn CodeLookup>,
    anchor_date: Option<NaiveDate>,
    today: Option<NaiveDate>,
    windows: DateWindows,
}

impl<'a> BoardingPassBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lookup used to resolve airline, airport and compartment
    /// codes.
    pub fn lookup(&mut self, lookup: &'a dyn CodeLookup) -> &mut Self {
        self.lookup = Some(lookup);
        self
    }

    /// Sets the known date of the flight.
    pub fn anchor_date(&mut self, date: NaiveDate) -> &mut Self {
        self.anchor_date = Some(date);
        self
    }

    /// Sets the date ordinal dates are resolved relative to. Defaults to the
    /// local date.
    pub fn today(&mut self, date: NaiveDate) -> &mut Self {
        self.today = Some(date);
        self
    }

    pub fn windows(&mut self, windows: DateWindows) -> &mut Self {
        self.windows = windows;
        self
    }

    /// Decodes the `raw` barcode data.
    pub fn build(&self, raw: &str) -> BoardingPass {
        let version = detect_version(raw.as_bytes());
        debug!("decoding BCBP of version {version:?}");

        let schema = Schema::for_version(version.unwrap_or(0));
        let layout = resolve(raw.as_bytes(), &schema);
        let extractor = Extractor::new(raw, &schema, &layout);

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let dates = OrdinalResolver::new(today).with_windows(self.windows);

        let issue = schema
            .field(id::DATE_OF_ISSUE)
            .zip(extractor.get(id::DATE_OF_ISSUE, None))
            .filter(|(def, raw)| def.is_valid(raw))
            .and_then(|(_, raw)| parse_issue_date(raw.as_bytes()).ok())
            .and_then(|(year, day)| dates.resolve_issue_date(year, day, self.anchor_date));

        let ctx = Context {
            lookup: self.lookup.unwrap_or(&NoLookup),
            dates,
            anchor: self.anchor_date,
            issue,
            extractor: &extractor,
        };

        let data = Assembler::new(raw, &schema, &layout, &ctx).assemble();

        BoardingPass {
            raw: raw.to_owned(),
            version,
            schema,
            layout,
            data,
        }
    }
}
