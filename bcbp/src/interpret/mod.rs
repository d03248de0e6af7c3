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

//! Interpretation of raw field values.

use chrono::NaiveDate;
use log::trace;

use crate::extractor::Extractor;
use crate::field::parse_hex_size;
use crate::lookup::CodeLookup;
use crate::ordinal::{parse_day_of_year, parse_issue_date, OrdinalResolver, DATE_FORMAT};
use crate::schema::id;

mod codes;

/// The ways a raw field value can be interpreted.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Interpreter {
    FormatCode,
    LegCount,
    PassengerName,
    ElectronicTicket,
    /// The value without padding.
    Text,
    Airport,
    Airline,
    FlightNumber,
    FlightDate,
    Compartment,
    Seat,
    CheckInSequence,
    PassengerStatus,
    HexSize,
    Version,
    PassengerDescription,
    CheckInSource,
    IssuanceSource,
    IssueDate,
    DocumentType,
    BagTag,
    Selectee,
    DocumentVerification,
    IdAd,
    FreeBaggageAllowance,
    FastTrack,
}

/// What an interpreter may need besides the raw value.
pub(crate) struct Context<'a> {
    pub lookup: &'a dyn CodeLookup,
    pub dates: OrdinalResolver,
    pub anchor: Option<NaiveDate>,
    pub issue: Option<NaiveDate>,
    pub extractor: &'a Extractor<'a>,
}

impl Interpreter {
    /// Returns `true` if the interpretation depends on other fields of the
    /// same leg.
    #[inline]
    pub fn is_leg_sensitive(&self) -> bool {
        matches!(self, Self::Compartment)
    }

    /// Interprets the `raw` value. The `leg` is only passed to leg sensitive
    /// interpreters.
    pub(crate) fn interpret(
        &self,
        raw: &str,
        leg: Option<usize>,
        ctx: &Context<'_>,
    ) -> Option<String> {
        let interpretation = match self {
            Self::FormatCode => Some(format!("Format {raw}")),
            Self::LegCount => match raw {
                "1" => Some("1 leg".to_string()),
                _ => Some(format!("{raw} legs")),
            },
            Self::PassengerName => passenger_name(raw),
            Self::ElectronicTicket => match raw {
                "E" => Some("Electronic ticket".to_string()),
                _ => Some("Not an electronic ticket".to_string()),
            },
            Self::Text => non_blank(raw).map(str::to_string),
            Self::Airport => ctx.lookup.airport_city(raw),
            Self::Airline => non_blank(raw).and_then(|code| ctx.lookup.airline_name(code)),
            Self::FlightNumber => Some(without_leading_zeros(raw.trim())),
            Self::FlightDate => {
                let day = parse_day_of_year(raw.as_bytes()).ok()?;
                ctx.dates
                    .resolve_flight_date(day, ctx.anchor, ctx.issue)
                    .map(|dates| dates.to_string())
            }
            Self::Compartment => {
                let airline = ctx.extractor.get(id::OPERATING_CARRIER, leg)?;
                ctx.lookup
                    .compartment(airline.trim(), raw)
                    .map(|compartment| match compartment.details {
                        Some(details) => format!("{} ({details})", compartment.name),
                        None => compartment.name,
                    })
            }
            Self::Seat => seat(raw),
            Self::CheckInSequence => non_blank(raw).map(without_leading_zeros),
            Self::PassengerStatus => code(raw, codes::passenger_status),
            Self::HexSize => parse_hex_size(raw.as_bytes())
                .ok()
                .map(|size| format!("{size} bytes")),
            Self::Version => Some(format!("Version {raw}")),
            Self::PassengerDescription => code(raw, codes::passenger_description),
            Self::CheckInSource => code(raw, codes::check_in_source),
            Self::IssuanceSource => code(raw, codes::issuance_source),
            Self::IssueDate => {
                let (year, day) = parse_issue_date(raw.as_bytes()).ok()?;
                ctx.dates
                    .resolve_issue_date(year, day, ctx.anchor)
                    .map(|date| date.format(DATE_FORMAT).to_string())
            }
            Self::DocumentType => code(raw, codes::document_type),
            Self::BagTag => bag_tag(raw),
            Self::Selectee => code(raw, codes::selectee),
            Self::DocumentVerification => code(raw, codes::document_verification),
            Self::IdAd => code(raw, codes::id_ad),
            Self::FreeBaggageAllowance => free_baggage_allowance(raw),
            Self::FastTrack => code(raw, codes::fast_track),
        };

        if interpretation.is_none() {
            trace!("no interpretation of {self:?} for \"{raw}\"");
        }

        interpretation
    }
}

fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn code(raw: &str, table: fn(char) -> Option<&'static str>) -> Option<String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => table(c).map(str::to_string),
        _ => None,
    }
}

fn without_leading_zeros(value: &str) -> String {
    let stripped = value.trim_start_matches('0');

    if stripped.is_empty() || !stripped.starts_with(|c: char| c.is_ascii_digit()) {
        // keep a single zero in front of a suffix or of an all zero value
        format!("0{stripped}")
    } else {
        stripped.to_string()
    }
}

/// Returns the name as given name followed by surname.
fn passenger_name(raw: &str) -> Option<String> {
    let name = non_blank(raw)?;

    match name.split_once('/') {
        Some((surname, given)) if !given.trim().is_empty() => {
            Some(format!("{} {}", given.trim(), surname.trim()))
        }
        Some((surname, _)) => Some(surname.trim().to_string()),
        None => Some(name.to_string()),
    }
}

fn seat(raw: &str) -> Option<String> {
    let seat = non_blank(raw)?;

    match seat {
        "INF" => Some("Infant".to_string()),
        _ if seat.len() == 4 && seat[..3].bytes().all(|b| b.is_ascii_digit()) => {
            Some(without_leading_zeros(seat))
        }
        _ => Some(seat.to_string()),
    }
}

/// A licence plate is the source digit, the carrier's numeric code and a six
/// digit serial number followed by the number of consecutive tags.
fn bag_tag(raw: &str) -> Option<String> {
    let tag = non_blank(raw)?;

    if tag.len() != 13 || !tag.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let (plate, count) = tag.split_at(10);

    match count.parse::<u16>().ok()? {
        0 => Some(plate.to_string()),
        1 => Some(format!("{plate} and 1 consecutive tag")),
        n => Some(format!("{plate} and {n} consecutive tags")),
    }
}

fn free_baggage_allowance(raw: &str) -> Option<String> {
    let allowance = non_blank(raw)?;

    if let Some(pieces) = allowance.strip_suffix("PC") {
        return match pieces.parse::<u8>().ok()? {
            1 => Some("1 piece".to_string()),
            n => Some(format!("{n} pieces")),
        };
    }

    let (amount, unit) = allowance.split_at(allowance.len().checked_sub(1)?);
    let amount = amount.parse::<u16>().ok()?;

    match unit {
        "K" => Some(format!("{amount} kg")),
        "L" => Some(format!("{amount} lb")),
        _ => None,
    }
}
