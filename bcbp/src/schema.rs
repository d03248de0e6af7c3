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

//! Version-aware catalog of the BCBP fields.
//!
//! Each group's fields are listed in the order they appear in the barcode.
//! A field's offset is the sum of the lengths of the fields before it in the
//! same group, so fields added by later versions are appended at the end of
//! their group.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::field::Group;
use crate::interpret::Interpreter;

/// Item numbers of the fields the resolver anchors on.
pub(crate) mod id {
    pub const NUMBER_OF_LEGS: u16 = 5;
    pub const VARIABLE_SIZE: u16 = 6;
    pub const OPERATING_CARRIER: u16 = 42;
    pub const VERSION_NUMBER: u16 = 9;
    pub const UNIQUE_SIZE: u16 = 10;
    pub const DATE_OF_ISSUE: u16 = 22;
    pub const REPEATED_SIZE: u16 = 17;
    pub const SECURITY_SIZE: u16 = 29;
}

/// Marks the beginning of the version number.
pub const VERSION_MARKER: u8 = b'>';

/// Marks the beginning of the security data.
pub const SECURITY_MARKER: u8 = b'^';

struct FieldSpec {
    id: u16,
    group: Group,
    description: &'static str,
    length: Option<usize>,
    pattern: Option<&'static str>,
    interpreter: Option<Interpreter>,
    since: u8,
}

macro_rules! field {
    ($id:expr, $group:ident, $desc:expr, $len:expr, $pattern:expr, $interp:expr) => {
        field!($id, $group, $desc, $len, $pattern, $interp, since 0)
    };

    ($id:expr, $group:ident, $desc:expr, $len:expr, $pattern:expr, $interp:expr, since $v:expr) => {
        FieldSpec {
            id: $id,
            group: Group::$group,
            description: $desc,
            length: $len,
            pattern: $pattern,
            interpreter: $interp,
            since: $v,
        }
    };
}

macro_rules! day_of_year {
    () => {
        "(00[1-9]|0[1-9][0-9]|[12][0-9]{2}|3[0-5][0-9]|36[0-6])"
    };
}

#[rustfmt::skip]
static FIELDS: &[FieldSpec] = &[
    // Unique Mandatory
    field!(1, UniqueMandatory, "Format Code", Some(1), Some("^M$"), Some(Interpreter::FormatCode)),
    field!(5, UniqueMandatory, "Number of Legs Encoded", Some(1), Some("^[1-9]$"), Some(Interpreter::LegCount)),
    field!(11, UniqueMandatory, "Passenger Name", Some(20), Some("^[ -~]{20}$"), Some(Interpreter::PassengerName)),
    field!(253, UniqueMandatory, "Electronic Ticket Indicator", Some(1), Some("^[A-Z ]$"), Some(Interpreter::ElectronicTicket)),
    // Repeated Mandatory
    field!(7, RepeatedMandatory, "Operating Carrier PNR Code", Some(7), Some("^[A-Z0-9 ]{7}$"), Some(Interpreter::Text)),
    field!(26, RepeatedMandatory, "From City Airport Code", Some(3), Some("^[A-Z]{3}$"), Some(Interpreter::Airport)),
    field!(38, RepeatedMandatory, "To City Airport Code", Some(3), Some("^[A-Z]{3}$"), Some(Interpreter::Airport)),
    field!(42, RepeatedMandatory, "Operating Carrier Designator", Some(3), Some("^[A-Z0-9]{2}[A-Z0-9 ]$"), Some(Interpreter::Airline)),
    field!(43, RepeatedMandatory, "Flight Number", Some(5), Some("^[0-9]{4}[A-Z ]$"), Some(Interpreter::FlightNumber)),
    field!(46, RepeatedMandatory, "Date of Flight", Some(3), Some(DATE_OF_FLIGHT_PATTERN), Some(Interpreter::FlightDate)),
    field!(71, RepeatedMandatory, "Compartment Code", Some(1), Some("^[A-Z]$"), Some(Interpreter::Compartment)),
    field!(104, RepeatedMandatory, "Seat Number", Some(4), Some("^([0-9]{3}[A-Z]|[A-Z ]{4})$"), Some(Interpreter::Seat)),
    field!(107, RepeatedMandatory, "Check-In Sequence Number", Some(5), Some("^([0-9]{4}[A-Z ]| {5})$"), Some(Interpreter::CheckInSequence)),
    field!(113, RepeatedMandatory, "Passenger Status", Some(1), Some("^[0-9A-Z]$"), Some(Interpreter::PassengerStatus)),
    field!(6, RepeatedMandatory, "Field Size of Variable Size Field", Some(2), Some(HEX_SIZE_PATTERN), Some(Interpreter::HexSize)),
    // Unique Conditional
    field!(8, UniqueConditional, "Beginning of Version Number", Some(1), Some("^>$"), None),
    field!(9, UniqueConditional, "Version Number", Some(1), Some("^[0-9]$"), Some(Interpreter::Version)),
    field!(10, UniqueConditional, "Field Size of Following Structured Message - Unique", Some(2), Some(HEX_SIZE_PATTERN), Some(Interpreter::HexSize)),
    field!(15, UniqueConditional, "Passenger Description", Some(1), Some("^[0-9A-Z ]$"), Some(Interpreter::PassengerDescription)),
    field!(12, UniqueConditional, "Source of Check-In", Some(1), Some("^[A-Z ]$"), Some(Interpreter::CheckInSource)),
    field!(14, UniqueConditional, "Source of Boarding Pass Issuance", Some(1), Some("^[A-Z ]$"), Some(Interpreter::IssuanceSource)),
    field!(22, UniqueConditional, "Date of Issue of Boarding Pass", Some(4), Some(DATE_OF_ISSUE_PATTERN), Some(Interpreter::IssueDate)),
    field!(16, UniqueConditional, "Document Type", Some(1), Some("^[A-Z ]$"), Some(Interpreter::DocumentType)),
    field!(21, UniqueConditional, "Airline Designator of Boarding Pass Issuer", Some(3), Some(OPTIONAL_AIRLINE_PATTERN), Some(Interpreter::Airline)),
    field!(23, UniqueConditional, "Baggage Tag Licence Plate Number(s)", Some(13), Some(BAG_TAG_PATTERN), Some(Interpreter::BagTag)),
    field!(31, UniqueConditional, "1st Non-Consecutive Baggage Tag Licence Plate Number", Some(13), Some(BAG_TAG_PATTERN), Some(Interpreter::BagTag)),
    field!(32, UniqueConditional, "2nd Non-Consecutive Baggage Tag Licence Plate Number", Some(13), Some(BAG_TAG_PATTERN), Some(Interpreter::BagTag)),
    // Repeated Conditional
    field!(17, RepeatedConditional, "Field Size of Following Structured Message - Repeated", Some(2), Some(HEX_SIZE_PATTERN), Some(Interpreter::HexSize)),
    field!(142, RepeatedConditional, "Airline Numeric Code", Some(3), Some("^([0-9]{3}| {3})$"), None),
    field!(143, RepeatedConditional, "Document Form/Serial Number", Some(10), Some("^[0-9A-Z ]{10}$"), Some(Interpreter::Text)),
    field!(18, RepeatedConditional, "Selectee Indicator", Some(1), Some("^[0-9 ]$"), Some(Interpreter::Selectee)),
    field!(108, RepeatedConditional, "International Documentation Verification", Some(1), Some("^[0-9 ]$"), Some(Interpreter::DocumentVerification)),
    field!(19, RepeatedConditional, "Marketing Carrier Designator", Some(3), Some(OPTIONAL_AIRLINE_PATTERN), Some(Interpreter::Airline)),
    field!(20, RepeatedConditional, "Frequent Flyer Airline Designator", Some(3), Some(OPTIONAL_AIRLINE_PATTERN), Some(Interpreter::Airline)),
    field!(236, RepeatedConditional, "Frequent Flyer Number", Some(16), Some("^[0-9A-Z ]{16}$"), Some(Interpreter::Text)),
    field!(89, RepeatedConditional, "ID/AD Indicator", Some(1), Some("^[0-9A-Z ]$"), Some(Interpreter::IdAd), since 4),
    field!(118, RepeatedConditional, "Free Baggage Allowance", Some(3), Some("^([0-9]{2}[KL]|[0-9]PC| {3})$"), Some(Interpreter::FreeBaggageAllowance), since 4),
    field!(254, RepeatedConditional, "Fast Track", Some(1), Some("^[YN ]$"), Some(Interpreter::FastTrack), since 5),
    // Repeated Airline Use
    field!(4, RepeatedAirlineUse, "For Individual Airline Use", None, None, None),
    // Security
    field!(25, Security, "Beginning of Security Data", Some(1), Some("^\\^$"), None, since 3),
    field!(28, Security, "Type of Security Data", Some(1), Some("^[0-9A-Z ]$"), None, since 3),
    field!(29, Security, "Length of Security Data", Some(2), Some(HEX_SIZE_PATTERN), Some(Interpreter::HexSize), since 5),
    field!(30, Security, "Security Data", None, None, None),
];

const HEX_SIZE_PATTERN: &str = "^[0-9A-Fa-f]{2}$";
const OPTIONAL_AIRLINE_PATTERN: &str = "^([A-Z0-9]{2}[A-Z0-9 ]| {3})$";
const BAG_TAG_PATTERN: &str = "^([0-9]{13}| {13})$";
const DATE_OF_FLIGHT_PATTERN: &str = concat!("^", day_of_year!(), "$");
const DATE_OF_ISSUE_PATTERN: &str = concat!("^([0-9]", day_of_year!(), "| {4})$");

/// Validity patterns compiled once for all versions.
static PATTERNS: LazyLock<HashMap<u16, Regex>> = LazyLock::new(|| {
    FIELDS
        .iter()
        .filter_map(|spec| {
            spec.pattern.map(|pattern| {
                let regex = Regex::new(pattern).expect("field pattern should compile");
                (spec.id, regex)
            })
        })
        .collect()
});

/// The definition of a field within a schema version.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct FieldDefinition {
    /// The item number as defined by IATA Resolution 792.
    pub id: u16,
    pub group: Group,
    pub description: &'static str,
    /// Offset in bytes from the start of the group.
    pub offset: usize,
    /// The fixed length or `None` if the field takes the rest of its group.
    pub length: Option<usize>,
    pub interpreter: Option<Interpreter>,
}

impl FieldDefinition {
    /// Returns `true` if the raw value matches the field's format. Fields
    /// without a format are always valid.
    pub fn is_valid(&self, raw: &str) -> bool {
        PATTERNS
            .get(&self.id)
            .map_or(true, |regex| regex.is_match(raw))
    }

    /// Returns `true` if the interpretation depends on the leg the field
    /// belongs to.
    #[inline]
    pub fn is_leg_sensitive(&self) -> bool {
        self.interpreter
            .is_some_and(|interpreter| interpreter.is_leg_sensitive())
    }
}

/// Returns the ordered field definitions of the `version`.
pub fn fields_for(version: u8) -> Vec<FieldDefinition> {
    // the next free offset per group or `None` once a variable field closed it
    let mut offsets: HashMap<Group, Option<usize>> = HashMap::new();
    let mut fields = Vec::with_capacity(FIELDS.len());

    for spec in FIELDS.iter().filter(|spec| spec.since <= version) {
        let next = offsets.entry(spec.group).or_insert(Some(0));
        let offset = next.expect("variable length field should be the last of its group");

        fields.push(FieldDefinition {
            id: spec.id,
            group: spec.group,
            description: spec.description,
            offset,
            length: spec.length,
            interpreter: spec.interpreter,
        });

        *next = spec.length.map(|length| offset + length);
    }

    fields
}

/// The field definitions of one version.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Schema {
    version: u8,
    fields: Vec<FieldDefinition>,
}

impl Schema {
    pub fn for_version(version: u8) -> Self {
        Self {
            version,
            fields: fields_for(version),
        }
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.version
    }

    /// All fields in the order of their groups.
    #[inline]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// The fields of the `group` ordered by offset.
    pub fn group(&self, group: Group) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(move |def| def.group == group)
    }

    /// Returns the field by its item number if defined in this version.
    pub fn field(&self, id: u16) -> Option<&FieldDefinition> {
        self.fields.iter().find(|def| def.id == id)
    }

    /// Returns the length of the `group` or `None` if it contains a variable
    /// length field.
    pub fn group_length(&self, group: Group) -> Option<usize> {
        self.group(group).map(|def| def.length).sum()
    }

    /// Returns `true` if this version encodes the length of the security data.
    #[inline]
    pub fn has_security_size(&self) -> bool {
        self.field(id::SECURITY_SIZE).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandatory_groups_have_fixed_length() {
        let schema = Schema::for_version(6);
        assert_eq!(schema.group_length(Group::UniqueMandatory), Some(23));
        assert_eq!(schema.group_length(Group::RepeatedMandatory), Some(37));
        assert_eq!(schema.group_length(Group::RepeatedAirlineUse), None);
        assert_eq!(schema.group_length(Group::Security), None);
    }

    #[test]
    fn offsets_follow_field_order() {
        let schema = Schema::for_version(6);
        let offset = |id| schema.field(id).map(|def| def.offset);

        assert_eq!(offset(id::NUMBER_OF_LEGS), Some(1));
        assert_eq!(offset(253), Some(22));
        assert_eq!(offset(46), Some(21));
        assert_eq!(offset(id::VARIABLE_SIZE), Some(35));
        assert_eq!(offset(id::UNIQUE_SIZE), Some(2));
        assert_eq!(offset(id::DATE_OF_ISSUE), Some(7));
        assert_eq!(offset(236), Some(23));
        assert_eq!(offset(254), Some(43));
        assert_eq!(offset(id::SECURITY_SIZE), Some(2));
        assert_eq!(offset(30), Some(4));
    }

    #[test]
    fn later_versions_add_fields() {
        let v2 = Schema::for_version(2);
        assert!(v2.field(25).is_none());
        assert!(v2.field(89).is_none());
        assert_eq!(v2.field(30).map(|def| def.offset), Some(0));

        let v4 = Schema::for_version(4);
        assert!(v4.field(25).is_some());
        assert!(v4.field(118).is_some());
        assert!(v4.field(254).is_none());
        assert!(!v4.has_security_size());
        assert_eq!(v4.field(30).map(|def| def.offset), Some(2));

        let v5 = Schema::for_version(5);
        assert!(v5.field(254).is_some());
        assert!(v5.has_security_size());
        assert_eq!(v5.fields().len(), FIELDS.len());
    }

    #[test]
    fn validates_day_of_year() {
        let schema = Schema::for_version(0);
        let date = schema.field(46).expect("date of flight should be defined");

        assert!(date.is_valid("001"));
        assert!(date.is_valid("346"));
        assert!(date.is_valid("366"));
        assert!(!date.is_valid("000"));
        assert!(!date.is_valid("367"));
        assert!(!date.is_valid("34 "));

        let issue = schema
            .field(id::DATE_OF_ISSUE)
            .expect("date of issue should be defined");
        assert!(issue.is_valid("5346"));
        assert!(issue.is_valid("    "));
        assert!(!issue.is_valid("5400"));
    }

    #[test]
    fn fields_without_pattern_are_valid() {
        let schema = Schema::for_version(6);
        let airline_use = schema.field(4).expect("airline use should be defined");
        assert!(airline_use.is_valid("anything goes"));
    }

    #[test]
    fn all_patterns_compile() {
        assert_eq!(
            PATTERNS.len(),
            FIELDS.iter().filter(|spec| spec.pattern.is_some()).count()
        );
    }
}
