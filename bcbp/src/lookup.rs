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

use std::collections::HashMap;

/// A cabin compartment of an airline.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Compartment {
    /// The name of the cabin, e.g. "Business".
    pub name: String,
    /// Additional details like the fare family.
    pub details: Option<String>,
}

/// Resolves codes found in a boarding pass to names.
///
/// The decoder calls the lookup while interpreting fields and doesn't cache
/// the results. Implementations should be free of side effects. All methods
/// return `None` by default, so an implementation only needs to provide the
/// tables it has.
pub trait CodeLookup {
    /// Returns the name of the airline with the IATA designator `code`.
    fn airline_name(&self, code: &str) -> Option<String> {
        let _ = code;
        None
    }

    /// Returns the city served by the airport with the IATA `code`.
    fn airport_city(&self, code: &str) -> Option<String> {
        let _ = code;
        None
    }

    /// Returns the compartment of the `airline` for the booking `class`.
    fn compartment(&self, airline: &str, class: &str) -> Option<Compartment> {
        let _ = (airline, class);
        None
    }
}

/// A lookup that knows no codes.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct NoLookup;

impl CodeLookup for NoLookup {}

/// A lookup backed by in-memory tables.
///
/// # Examples
///
/// ```
/// use bcbp::{CodeLookup, TableLookup};
///
/// let mut lookup = TableLookup::new();
/// lookup.add_airline("AC", "Air Canada");
/// lookup.add_airport("YUL", "Montréal");
///
/// assert_eq!(lookup.airline_name("AC").as_deref(), Some("Air Canada"));
/// assert_eq!(lookup.airport_city("FRA"), None);
/// ```
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TableLookup {
    airlines: HashMap<String, String>,
    airports: HashMap<String, String>,
    compartments: HashMap<(String, String), Compartment>,
}

impl TableLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_airline(&mut self, code: &str, name: &str) -> &mut Self {
        self.airlines.insert(code.to_owned(), name.to_owned());
        self
    }

    pub fn add_airport(&mut self, code: &str, city: &str) -> &mut Self {
        self.airports.insert(code.to_owned(), city.to_owned());
        self
    }

    pub fn add_compartment(
        &mut self,
        airline: &str,
        class: &str,
        compartment: Compartment,
    ) -> &mut Self {
        self.compartments
            .insert((airline.to_owned(), class.to_owned()), compartment);
        self
    }
}

impl CodeLookup for TableLookup {
    fn airline_name(&self, code: &str) -> Option<String> {
        self.airlines.get(code).cloned()
    }

    fn airport_city(&self, code: &str) -> Option<String> {
        self.airports.get(code).cloned()
    }

    fn compartment(&self, airline: &str, class: &str) -> Option<Compartment> {
        self.compartments
            .get(&(airline.to_owned(), class.to_owned()))
            .cloned()
    }
}
