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

//! Resolves the byte ranges of all groups within a record.
//!
//! The record is walked once from left to right. Most groups have a fixed
//! length but the conditional and security groups are sized by hexadecimal
//! length fields which are decoded on the way. The first structural problem
//! stops the walk and is recorded as [`InvalidMarker`]; nothing past it is
//! assigned to a group.

use std::fmt;

use log::{debug, trace, warn};

use crate::field::{parse_hex_size, Group};
use crate::schema::{id, Schema, SECURITY_MARKER, VERSION_MARKER};

/// The resolved byte range of a group instance.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ControlPoint {
    pub start: usize,
    pub length: usize,
}

impl ControlPoint {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Returns the offset following the last byte of the group.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    fn clamp(self, limit: usize) -> Option<Self> {
        (self.start < limit)
            .then(|| Self::new(self.start, self.length.min(limit - self.start)))
    }
}

/// The groups of a single leg.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LegControlPoints {
    pub mandatory: ControlPoint,
    pub conditional: Option<ControlPoint>,
    pub airline: Option<ControlPoint>,
}

/// Why the structure of a record is invalid.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InvalidReason {
    /// The record ends before a mandatory group.
    TooShort,
    /// The number of legs is not a digit from 1 to 9.
    InvalidLegCount,
    /// A field size is not a two digit hexadecimal number.
    NotHexadecimal,
    /// The conditional data doesn't start with `>`.
    MissingVersionMarker,
    /// The security data doesn't start with `^`.
    MissingSecurityMarker,
    /// A field size doesn't fit the enclosing block or the record.
    SizeMismatch,
    /// Bytes follow the security data.
    TrailingData,
    /// The record contains a byte that is not ASCII.
    NonAscii,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::TooShort => "record is too short",
            Self::InvalidLegCount => "number of legs should be 1 to 9",
            Self::NotHexadecimal => "field size is not hexadecimal",
            Self::MissingVersionMarker => "missing beginning of version number",
            Self::MissingSecurityMarker => "missing beginning of security data",
            Self::SizeMismatch => "field size doesn't match the data",
            Self::TrailingData => "data after the security data",
            Self::NonAscii => "non-ASCII data",
        };

        write!(f, "{reason}")
    }
}

/// The offset from which on the record is structurally invalid.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InvalidMarker {
    pub offset: usize,
    pub reason: InvalidReason,
}

impl InvalidMarker {
    fn new(offset: usize, reason: InvalidReason) -> Self {
        Self { offset, reason }
    }
}

/// The control points of a record.
///
/// Groups that are present don't overlap and end at or before the invalid
/// marker. Following the groups in the order of the barcode (unique
/// mandatory, then per leg the mandatory group with the unique conditional
/// group after the first one, the conditional and airline use group, and
/// finally the security group) yields consecutive ranges.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Layout {
    pub unique_mandatory: Option<ControlPoint>,
    pub unique_conditional: Option<ControlPoint>,
    pub legs: Vec<LegControlPoints>,
    pub security: Option<ControlPoint>,
    pub invalid: Option<InvalidMarker>,
}

impl Layout {
    /// Returns the control point of the `group`. Repeated groups require the
    /// `leg` and unique groups ignore it.
    pub fn control_point(&self, group: Group, leg: Option<usize>) -> Option<ControlPoint> {
        let leg = || leg.and_then(|leg| self.legs.get(leg));

        match group {
            Group::UniqueMandatory => self.unique_mandatory,
            Group::UniqueConditional => self.unique_conditional,
            Group::Security => self.security,
            Group::RepeatedMandatory => leg().map(|leg| leg.mandatory),
            Group::RepeatedConditional => leg().and_then(|leg| leg.conditional),
            Group::RepeatedAirlineUse => leg().and_then(|leg| leg.airline),
        }
    }

    /// Returns all present control points in the order of the barcode.
    pub fn control_points(&self) -> Vec<(Group, Option<usize>, ControlPoint)> {
        let mut points = Vec::new();

        if let Some(cp) = self.unique_mandatory {
            points.push((Group::UniqueMandatory, None, cp));
        }

        for (i, leg) in self.legs.iter().enumerate() {
            points.push((Group::RepeatedMandatory, Some(i), leg.mandatory));

            if i == 0 {
                if let Some(cp) = self.unique_conditional {
                    points.push((Group::UniqueConditional, None, cp));
                }
            }

            if let Some(cp) = leg.conditional {
                points.push((Group::RepeatedConditional, Some(i), cp));
            }

            if let Some(cp) = leg.airline {
                points.push((Group::RepeatedAirlineUse, Some(i), cp));
            }
        }

        if let Some(cp) = self.security {
            points.push((Group::Security, None, cp));
        }

        points
    }

    fn truncate(&mut self, limit: usize) {
        self.unique_mandatory = self.unique_mandatory.and_then(|cp| cp.clamp(limit));
        self.unique_conditional = self.unique_conditional.and_then(|cp| cp.clamp(limit));
        self.security = self.security.and_then(|cp| cp.clamp(limit));

        let mut legs = Vec::with_capacity(self.legs.len());
        for leg in &self.legs {
            let Some(mandatory) = leg.mandatory.clamp(limit) else {
                break;
            };

            legs.push(LegControlPoints {
                mandatory,
                conditional: leg.conditional.and_then(|cp| cp.clamp(limit)),
                airline: leg.airline.and_then(|cp| cp.clamp(limit)),
            });
        }
        self.legs = legs;
    }
}

/// Returns the version number following the `>` of the first leg's
/// conditional data, if there is any.
pub fn detect_version(raw: &[u8]) -> Option<u8> {
    let schema = Schema::for_version(0);
    let um = schema.group_length(Group::UniqueMandatory)?;
    let rm = schema.group_length(Group::RepeatedMandatory)?;
    let size_at = um + schema.field(id::VARIABLE_SIZE)?.offset;

    let size = parse_hex_size(raw.get(size_at..size_at + 2)?).ok()?;
    let start = um + rm;

    if size > 0 && raw.get(start) == Some(&VERSION_MARKER) {
        let at = start + schema.field(id::VERSION_NUMBER)?.offset;
        raw.get(at)
            .filter(|b| b.is_ascii_digit())
            .map(|b| b - b'0')
    } else {
        None
    }
}

/// Resolves the control points of the `raw` record using the `schema`.
pub fn resolve(raw: &[u8], schema: &Schema) -> Layout {
    let mut resolver = Resolver {
        raw,
        schema,
        layout: Layout::default(),
    };

    let mut invalid = resolver.walk().err();

    if let Some(offset) = raw.iter().position(|b| !b.is_ascii()) {
        if invalid.map_or(true, |marker| offset < marker.offset) {
            invalid = Some(InvalidMarker::new(offset, InvalidReason::NonAscii));
        }
    }

    let mut layout = resolver.layout;

    if let Some(marker) = invalid {
        warn!(
            "invalid BCBP data at offset {}: {}",
            marker.offset, marker.reason
        );
        layout.truncate(marker.offset);
        layout.invalid = Some(marker);
    }

    layout
}

struct Resolver<'a> {
    raw: &'a [u8],
    schema: &'a Schema,
    layout: Layout,
}

impl Resolver<'_> {
    fn walk(&mut self) -> Result<(), InvalidMarker> {
        let um = self.group_length(Group::UniqueMandatory);
        let rm = self.group_length(Group::RepeatedMandatory);

        if self.raw.len() < um + rm {
            return Err(InvalidMarker::new(0, InvalidReason::TooShort));
        }

        let legs = match self.raw[self.offset(id::NUMBER_OF_LEGS)] {
            b @ b'1'..=b'9' => (b - b'0') as usize,
            _ => return Err(InvalidMarker::new(0, InvalidReason::InvalidLegCount)),
        };

        self.layout.unique_mandatory = Some(ControlPoint::new(0, um));
        debug!("resolving {legs} leg(s) of version {}", self.schema.version());

        let mut cursor = um;

        for leg in 0..legs {
            if self.raw.len() < cursor + rm {
                return Err(InvalidMarker::new(cursor, InvalidReason::TooShort));
            }

            let mandatory = ControlPoint::new(cursor, rm);
            self.layout.legs.push(LegControlPoints {
                mandatory,
                conditional: None,
                airline: None,
            });

            let size = self.hex_at(cursor + self.offset(id::VARIABLE_SIZE))?;
            cursor = mandatory.end();
            trace!("leg {leg} has {size} byte of variable size data");

            if size == 0 {
                continue;
            }

            if cursor + size > self.raw.len() {
                return Err(InvalidMarker::new(cursor, InvalidReason::SizeMismatch));
            }

            let mut block = ControlPoint::new(cursor, size);

            if leg == 0 {
                block = self.unique_conditional(block)?;
            }

            self.repeated_conditional(leg, block)?;
            cursor = block.end();
        }

        self.security(cursor)
    }

    /// Resolves the unique conditional group at the start of the `block` and
    /// returns what remains of the block.
    fn unique_conditional(&mut self, block: ControlPoint) -> Result<ControlPoint, InvalidMarker> {
        if self.raw[block.start] != VERSION_MARKER {
            return Err(InvalidMarker::new(
                block.start,
                InvalidReason::MissingVersionMarker,
            ));
        }

        let (size_at, header) = self.size_field(id::UNIQUE_SIZE);

        if block.length < header {
            return Err(InvalidMarker::new(block.start, InvalidReason::SizeMismatch));
        }

        // the header stays in the group if the size is malformed
        self.layout.unique_conditional = Some(block);
        let length = header + self.hex_at(block.start + size_at)?;

        if length > block.length {
            return Err(InvalidMarker::new(
                block.start + size_at,
                InvalidReason::SizeMismatch,
            ));
        }

        let cp = ControlPoint::new(block.start, length);
        debug!("unique conditional data at {}..{}", cp.start, cp.end());
        self.layout.unique_conditional = Some(cp);

        Ok(ControlPoint::new(cp.end(), block.length - length))
    }

    /// Splits the `block` into the repeated conditional and the airline use
    /// group of the `leg`.
    fn repeated_conditional(
        &mut self,
        leg: usize,
        block: ControlPoint,
    ) -> Result<(), InvalidMarker> {
        if block.length == 0 {
            return Ok(());
        }

        let (size_at, header) = self.size_field(id::REPEATED_SIZE);

        if block.length < header {
            return Err(InvalidMarker::new(block.start, InvalidReason::SizeMismatch));
        }

        let length = header + self.hex_at(block.start + size_at)?;

        // the airline use data would be of negative size
        if length > block.length {
            return Err(InvalidMarker::new(block.start, InvalidReason::SizeMismatch));
        }

        let conditional = ControlPoint::new(block.start, length);
        let airline = (block.length > length)
            .then(|| ControlPoint::new(conditional.end(), block.length - length));

        debug!(
            "leg {leg} conditional data at {}..{} with {} byte airline use data",
            conditional.start,
            conditional.end(),
            airline.map_or(0, |cp| cp.length)
        );

        let cps = &mut self.layout.legs[leg];
        cps.conditional = Some(conditional);
        cps.airline = airline;

        Ok(())
    }

    fn security(&mut self, cursor: usize) -> Result<(), InvalidMarker> {
        let remaining = self.raw.len() - cursor;

        if remaining == 0 {
            return Ok(());
        }

        if !self.schema.has_security_size() {
            self.layout.security = Some(ControlPoint::new(cursor, remaining));
            return Ok(());
        }

        if self.raw[cursor] != SECURITY_MARKER {
            return Err(InvalidMarker::new(
                cursor,
                InvalidReason::MissingSecurityMarker,
            ));
        }

        let (size_at, header) = self.size_field(id::SECURITY_SIZE);

        if remaining < header {
            return Err(InvalidMarker::new(cursor, InvalidReason::SizeMismatch));
        }

        self.layout.security = Some(ControlPoint::new(cursor, remaining));
        let length = header + self.hex_at(cursor + size_at)?;
        self.layout.security = Some(ControlPoint::new(cursor, length));

        if length > remaining {
            // the security data runs past the end of the record
            Err(InvalidMarker::new(
                cursor + header,
                InvalidReason::SizeMismatch,
            ))
        } else if length < remaining {
            Err(InvalidMarker::new(
                cursor + length,
                InvalidReason::TrailingData,
            ))
        } else {
            Ok(())
        }
    }

    fn hex_at(&self, at: usize) -> Result<usize, InvalidMarker> {
        self.raw
            .get(at..at + 2)
            .and_then(|bytes| parse_hex_size(bytes).ok())
            .ok_or_else(|| InvalidMarker::new(at, InvalidReason::NotHexadecimal))
    }

    /// Returns the offset of the size field and the length of the header
    /// including the size field.
    fn size_field(&self, id: u16) -> (usize, usize) {
        let def = self
            .schema
            .field(id)
            .expect("size field should be defined in the schema");
        (def.offset, def.offset + def.length.unwrap_or_default())
    }

    fn offset(&self, id: u16) -> usize {
        self.schema
            .field(id)
            .map(|def| def.offset)
            .expect("field should be defined in the schema")
    }

    fn group_length(&self, group: Group) -> usize {
        self.schema
            .group_length(group)
            .expect("mandatory group should have a fixed length")
    }
}
