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

use bcbp::{BoardingPass, ControlPoint, Field, FieldGroup, InvalidReason, LegData};
use chrono::NaiveDate;

const SINGLE_LEG: &str = "M1DESMARAIS/LUC       EABC123 YULFRAAC 0834 326J001A0025 100";
const CUT_BAG_TAG: &str = "M1DOE/JOHN            EABC123 DAYCLTAA 5163 346Y015D0027 147>217 MM5346BAA 11234567890029001001123456732AA AA XXXXXXX             X";
const SECURITY_WITHOUT_SIZE: &str =
    "M1DESMARAIS/LUC       EABC123 YULFRAAC 0834 326J001A0025 106>30000^1ABC^DEF";
const LONG_REPEATED_CONDITIONAL: &str = "M1DESMARAIS/LUC       EABC123 YULFRAAC 0834 326J001A0025 12F>30029014123456789012AC AC 1234567890123   12PC";
const SHORT_SECOND_LEG: &str = "M2DESMARAIS/LUC       EABC123 YULFRAAC 0834 326J001A0025 100DEF456 FRAGVALH 3664 327C012C0002 101X";
const MULTI_LEG: &str = "M2DESMARAIS/LUC       EABC123 YULFRAAC 0834 326J003A0027 167>5321WW1325BAC 0014123456002001412346700100141234789012A0141234567890 1AC AC 1234567890123    20KYLX58ZDEF456 FRAGVALH 3664 327C012C0002 12E2A0140987654321 1AC AC 1234567890123    2PCNWQ^164GIWVC5EH7JNT684FVNJ91W2QA4DVN5J8K4F0L0GEQ3DF5TGBN8709HKT5D3DW3GBHFCVHMY7J5T6HFR41W2QA4DVN5J8K4F0L0GE";

const RECORDS: [&str; 6] = [
    SINGLE_LEG,
    CUT_BAG_TAG,
    SECURITY_WITHOUT_SIZE,
    LONG_REPEATED_CONDITIONAL,
    SHORT_SECOND_LEG,
    MULTI_LEG,
];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("date should be valid")
}

fn decode(raw: &str) -> BoardingPass {
    BoardingPass::builder().today(today()).build(raw)
}

fn joined(pass: &BoardingPass) -> String {
    pass.fields().iter().map(|field| field.raw.as_str()).collect()
}

fn raw_value(pass: &BoardingPass, id: u16, leg: Option<usize>) -> Option<&str> {
    pass.field(id, leg).map(|field| field.raw.as_str())
}

fn first_leg(pass: &BoardingPass) -> &LegData {
    pass.data()
        .repeated
        .as_ref()
        .and_then(|legs| legs.first())
        .expect("first leg should be decoded")
}

fn unique_conditional(pass: &BoardingPass) -> Option<&FieldGroup> {
    pass.data()
        .unique
        .as_ref()
        .and_then(|unique| unique.conditional.as_ref())
}

fn unknown_tail(pass: &BoardingPass) -> Option<&str> {
    pass.data().unknown.as_ref().map(|field| field.raw.as_str())
}

fn assert_consecutive(pass: &BoardingPass) {
    let points: Vec<ControlPoint> = pass
        .layout()
        .control_points()
        .into_iter()
        .map(|(_, _, cp)| cp)
        .collect();

    for pair in points.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start, "{:?}", pass.raw());
    }
}

#[test]
fn every_prefix_round_trips() {
    for raw in RECORDS {
        for end in 0..=raw.len() {
            let pass = decode(&raw[..end]);
            assert_eq!(joined(&pass), &raw[..end]);
            assert_consecutive(&pass);
        }
    }
}

#[test]
fn corrupted_bytes_round_trip() {
    for raw in RECORDS {
        for at in 0..raw.len() {
            for byte in ["0", "Z", ">", "^", " ", "é"] {
                let mut corrupted = raw.to_string();
                corrupted.replace_range(at..at + 1, byte);

                let pass = decode(&corrupted);
                assert_eq!(joined(&pass), corrupted);
                assert_consecutive(&pass);
            }
        }
    }
}

#[test]
fn decodes_multi_leg_record() {
    let pass = decode(MULTI_LEG);

    assert!(pass.is_fully_valid());
    assert_eq!(pass.version_number(), Some(5));
    assert_eq!(pass.leg_count(), Some(2));
    assert_eq!(pass.data().repeated.as_ref().map(Vec::len), Some(2));
    assert_eq!(pass.data().unknown, None);

    let name = pass.field(11, None).expect("name should be decoded");
    assert_eq!(name.interpretation.as_deref(), Some("LUC DESMARAIS"));

    assert_eq!(raw_value(&pass, 29, None), Some("64"));
    assert_eq!(raw_value(&pass, 30, None).map(str::len), Some(100));

    let bag_tag = pass.field(23, None).expect("bag tag should be decoded");
    assert_eq!(
        bag_tag.interpretation.as_deref(),
        Some("0014123456 and 2 consecutive tags")
    );

    let pnr = pass.field(7, Some(1)).expect("PNR should be decoded");
    assert_eq!(pnr.interpretation.as_deref(), Some("DEF456"));
}

#[test]
fn decoding_is_idempotent() {
    for raw in RECORDS.into_iter().chain(["M1", ""]) {
        assert_eq!(decode(raw), decode(raw));
    }
}

#[test]
fn repeated_data_has_one_entry_per_leg() {
    for raw in [SINGLE_LEG, CUT_BAG_TAG, MULTI_LEG, SHORT_SECOND_LEG] {
        let pass = decode(raw);
        let legs = pass.data().repeated.as_ref().map(Vec::len);
        assert_eq!(legs, pass.leg_count().map(usize::from));
    }
}

#[test]
fn field_cut_by_end_of_group_is_unknown() {
    let pass = decode(CUT_BAG_TAG);
    let conditional = unique_conditional(&pass).expect("unique conditional data should be decoded");

    let unknown = conditional.last().expect("there should be fields");
    assert!(unknown.is_unknown());
    assert_eq!(unknown.raw, "112345678900");
    assert_eq!(conditional.field(23), None);
    assert!(!pass.is_fully_valid());

    // the leftover of the repeated conditional data is unknown too
    let leg = first_leg(&pass);
    let rest = leg
        .conditional
        .as_ref()
        .and_then(|group| group.unknown())
        .expect("leftover should be unknown");
    assert_eq!(rest.raw, "    ");
    assert_eq!(raw_value(&pass, 4, Some(0)), Some("X"));
}

#[test]
fn zero_variable_size_has_no_conditional_data() {
    let pass = decode(SINGLE_LEG);
    let leg = first_leg(&pass);

    assert_eq!(leg.airline, None);
    assert_eq!(leg.conditional, None);
    assert_eq!(unique_conditional(&pass), None);
    assert!(pass.is_fully_valid());
}

#[test]
fn leap_day_resolves_to_most_recent_leap_year() {
    let pass = decode(&SINGLE_LEG.replace("326J", "366J"));
    let date = pass
        .field(46, Some(0))
        .expect("date of flight should be decoded");

    assert!(date.valid);
    assert_eq!(date.interpretation.as_deref(), Some("Tue 31 Dec 2024"));
}

#[test]
fn ordinary_day_resolves_to_all_candidates() {
    let pass = decode(SINGLE_LEG);
    let date = pass
        .field(46, Some(0))
        .expect("date of flight should be decoded");

    assert_eq!(
        date.interpretation.as_deref(),
        Some("Thu 21 Nov 2024 or Sat 22 Nov 2025 or Sun 22 Nov 2026")
    );
}

#[test]
fn day_out_of_range_is_invalid() {
    let pass = decode(&SINGLE_LEG.replace("326J", "367J"));
    let date = pass
        .field(46, Some(0))
        .expect("date of flight should be decoded");

    assert_eq!(date.raw, "367");
    assert!(!date.valid);
    assert_eq!(date.interpretation, None);
    assert!(!pass.is_fully_valid());
    assert_eq!(pass.layout().invalid, None);
}

#[test]
fn short_record_is_unknown() {
    let raw = "M1DESMARAIS/LUC       EABC123 YULFRAAC";
    let pass = decode(raw);

    assert_eq!(pass.data().unique, None);
    assert_eq!(pass.data().repeated, None);
    assert_eq!(pass.invalid_reason(), Some(InvalidReason::TooShort));
    assert_eq!(
        pass.fields(),
        vec![&Field {
            id: 0,
            description: "Unknown Data",
            raw: raw.to_string(),
            valid: false,
            interpretation: None,
        }]
    );
    assert!(!pass.is_fully_valid());
}

#[test]
fn empty_record_has_no_fields() {
    let pass = decode("");

    assert!(pass.fields().is_empty());
    assert_eq!(pass.leg_count(), None);
    assert!(!pass.is_fully_valid());
}

#[test]
fn structural_error_leaves_unknown_tail() {
    let mut raw = MULTI_LEG.to_string();
    raw.replace_range(62..64, "XY");
    let pass = decode(&raw);

    assert_eq!(pass.invalid_reason(), Some(InvalidReason::NotHexadecimal));
    assert_eq!(unknown_tail(&pass), Some(&raw[62..]));
    assert_eq!(pass.data().repeated.as_ref().map(Vec::len), Some(1));

    // the version number ends at the invalid size and is unknown
    let conditional = unique_conditional(&pass).expect("unique conditional data should be decoded");
    assert_eq!(conditional.field(8).map(|f| f.raw.as_str()), Some(">"));
    assert_eq!(conditional.field(9), None);
    assert_eq!(conditional.unknown().map(|f| f.raw.as_str()), Some("5"));
    assert_eq!(pass.field(10, None), None);
}

#[test]
fn field_ending_at_invalid_data_is_unknown() {
    let mut raw = CUT_BAG_TAG.to_string();
    raw.replace_range(58..60, "ZZ");
    let pass = decode(&raw);

    assert_eq!(pass.invalid_reason(), Some(InvalidReason::NotHexadecimal));
    assert_eq!(raw_value(&pass, 107, Some(0)), Some("0027 "));
    assert_eq!(pass.field(113, Some(0)), None);

    let unknown = first_leg(&pass).mandatory.unknown();
    assert_eq!(unknown.map(|f| f.raw.as_str()), Some("1"));
    assert_eq!(unknown_tail(&pass), Some(&raw[58..]));
    assert_eq!(joined(&pass), raw);
}

#[test]
fn lower_case_sizes_are_accepted() {
    let pass = decode(&MULTI_LEG.replacen("2A014", "2a014", 1));

    assert_eq!(pass.layout().invalid, None);
    assert_eq!(pass.field(17, Some(0)).map(|f| f.valid), Some(true));
}

#[test]
fn security_data_without_size_takes_the_rest() {
    for version in [3, 4] {
        let raw = SECURITY_WITHOUT_SIZE.replacen(">3", &format!(">{version}"), 1);
        let pass = decode(&raw);

        assert_eq!(pass.version_number(), Some(version));
        assert_eq!(pass.layout().invalid, None);
        assert_eq!(raw_value(&pass, 25, None), Some("^"));
        assert_eq!(raw_value(&pass, 28, None), Some("1"));
        assert_eq!(pass.field(29, None), None);
        assert_eq!(raw_value(&pass, 30, None), Some("ABC^DEF"));
        assert!(pass.is_fully_valid());
    }
}

#[test]
fn fields_of_later_versions_are_unknown() {
    let pass = decode(LONG_REPEATED_CONDITIONAL);

    assert_eq!(pass.version_number(), Some(3));
    assert_eq!(pass.layout().invalid, None);
    assert_eq!(pass.field(89, Some(0)), None);
    assert_eq!(pass.field(118, Some(0)), None);
    assert_eq!(raw_value(&pass, 236, Some(0)), Some("1234567890123   "));

    let leg = first_leg(&pass);
    let unknown = leg.conditional.as_ref().and_then(|group| group.unknown());
    assert_eq!(unknown.map(|f| f.raw.as_str()), Some("12PC"));
    assert_eq!(leg.airline, None);
    assert!(!pass.is_fully_valid());

    // the same bytes are known fields from version 4 on
    let pass = decode(&LONG_REPEATED_CONDITIONAL.replacen(">3", ">4", 1));
    assert_eq!(raw_value(&pass, 89, Some(0)), Some("1"));
    assert_eq!(raw_value(&pass, 118, Some(0)), Some("2PC"));
    assert!(pass.is_fully_valid());
}

#[test]
fn conditional_data_shorter_than_its_size_field_is_invalid() {
    let pass = decode(SHORT_SECOND_LEG);
    let invalid = pass.layout().invalid.expect("record should be invalid");

    assert_eq!(invalid.reason, InvalidReason::SizeMismatch);
    assert_eq!(invalid.offset, 97);
    assert_eq!(pass.data().repeated.as_ref().map(Vec::len), Some(2));
    assert_eq!(pass.layout().legs[1].conditional, None);
    assert_eq!(unknown_tail(&pass), Some("X"));
    assert_eq!(joined(&pass), SHORT_SECOND_LEG);
}
