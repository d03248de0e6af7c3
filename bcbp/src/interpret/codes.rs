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

//! Meanings of the single character codes defined by IATA Resolution 792.

pub(super) fn passenger_status(code: char) -> Option<&'static str> {
    match code {
        '0' => Some("Ticket issuance/passenger not checked in"),
        '1' => Some("Ticket issuance/passenger checked in"),
        '2' => Some("Baggage checked/passenger not checked in"),
        '3' => Some("Baggage checked/passenger checked in"),
        '4' => Some("Passenger passed security check"),
        '5' => Some("Passenger passed gate exit (coupon used)"),
        '6' => Some("Transit"),
        '7' => Some("Standby"),
        '8' => Some("Boarding data revalidation done"),
        '9' => Some("Original boarding line used at time of ticket issuance"),
        'A' => Some("Up- or down-grading required at close out"),
        _ => None,
    }
}

pub(super) fn passenger_description(code: char) -> Option<&'static str> {
    match code {
        '0' => Some("Adult"),
        '1' => Some("Male"),
        '2' => Some("Female"),
        '3' => Some("Child"),
        '4' => Some("Infant"),
        '5' => Some("No passenger (cabin baggage)"),
        '6' => Some("Adult traveling with infant"),
        '7' => Some("Unaccompanied minor"),
        _ => None,
    }
}

pub(super) fn check_in_source(code: char) -> Option<&'static str> {
    match code {
        'W' => Some("Web"),
        'K' => Some("Airport kiosk"),
        'R' => Some("Remote or off site kiosk"),
        'M' => Some("Mobile device"),
        'O' => Some("Airport agent"),
        'T' => Some("Town agent"),
        'V' => Some("Third party vendor"),
        'A' => Some("Automated check-in"),
        _ => None,
    }
}

pub(super) fn issuance_source(code: char) -> Option<&'static str> {
    match code {
        'W' => Some("Web printed"),
        'K' => Some("Airport kiosk"),
        'X' => Some("Transfer kiosk"),
        'R' => Some("Remote or off site kiosk"),
        'M' => Some("Mobile device"),
        'O' => Some("Airport agent"),
        'T' => Some("Town agent"),
        'V' => Some("Third party vendor"),
        _ => None,
    }
}

pub(super) fn document_type(code: char) -> Option<&'static str> {
    match code {
        'B' => Some("Boarding pass"),
        'I' => Some("Itinerary receipt"),
        _ => None,
    }
}

pub(super) fn selectee(code: char) -> Option<&'static str> {
    match code {
        '0' => Some("Not selectee"),
        '1' => Some("Selectee"),
        '3' => Some("Known traveler"),
        _ => None,
    }
}

pub(super) fn document_verification(code: char) -> Option<&'static str> {
    match code {
        '0' => Some("Travel document verification not required"),
        '1' => Some("Travel document verification required"),
        '2' => Some("Travel document verification performed"),
        _ => None,
    }
}

pub(super) fn id_ad(code: char) -> Option<&'static str> {
    match code {
        '0' => Some("IDN1 positive space"),
        '1' => Some("IDN2 space available"),
        '2' => Some("IDB1 positive space"),
        '3' => Some("IDB2 space available"),
        '4' => Some("AD"),
        '5' => Some("DG"),
        '6' => Some("DM"),
        '7' => Some("GE"),
        '8' => Some("IG"),
        '9' => Some("RG"),
        'A' => Some("UD"),
        'B' => Some("ID industry discount not followed by a classification"),
        'C' => Some("IDFS1"),
        'D' => Some("IDFS2"),
        'E' => Some("IDR1"),
        'F' => Some("IDR2"),
        _ => None,
    }
}

pub(super) fn fast_track(code: char) -> Option<&'static str> {
    match code {
        'Y' => Some("Fast track"),
        'N' => Some("No fast track"),
        _ => None,
    }
}
