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

use crate::Error;

/// Id of the synthetic field that covers bytes no definition accounts for.
pub const UNKNOWN_FIELD_ID: u16 = 0;

/// A structural section of a BCBP record.
///
/// The repeated groups are present once per leg encoded in the barcode.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Group {
    UniqueMandatory,
    RepeatedMandatory,
    UniqueConditional,
    RepeatedConditional,
    RepeatedAirlineUse,
    Security,
}

/// A decoded field of the boarding pass.
///
/// The raw value is kept as found in the barcode, including the padding. It
/// may be invalid with respect to the field's format in which case no
/// interpretation is attempted.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Field {
    /// The item number as defined by IATA Resolution 792 or
    /// [`UNKNOWN_FIELD_ID`].
    pub id: u16,
    pub description: &'static str,
    pub raw: String,
    /// Whether the raw value matches the field's format.
    pub valid: bool,
    /// A human readable meaning of the raw value.
    pub interpretation: Option<String>,
}

impl Field {
    pub(crate) fn unknown(raw: &str) -> Self {
        Self {
            id: UNKNOWN_FIELD_ID,
            description: "Unknown Data",
            raw: raw.to_owned(),
            valid: false,
            interpretation: None,
        }
    }

    /// Returns `true` if this field covers data that couldn't be assigned to
    /// a defined field.
    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.id == UNKNOWN_FIELD_ID
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3} {}: \"{}\"", self.id, self.description, self.raw)?;

        match (&self.interpretation, self.valid) {
            (Some(interpretation), _) => write!(f, " ({interpretation})"),
            (None, false) => write!(f, " (invalid)"),
            (None, true) => Ok(()),
        }
    }
}

/// Parses a two character hexadecimal field size.
///
/// # Errors
///
/// Returns an error if there are not two bytes or they are not hex digits.
pub fn parse_hex_size(bytes: &[u8]) -> Result<usize, Error> {
    if bytes.len() != 2 {
        return Err(Error::InvalidFieldLength {
            expected: 2,
            actual: bytes.len(),
        });
    }

    parse_hex!(bytes)
}
