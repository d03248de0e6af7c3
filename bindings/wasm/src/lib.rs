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

use bcbp::{BoardingPass, Compartment, TableLookup};
use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen(js_name = CodeTables)]
#[derive(Debug, Clone, Default)]
pub struct JsCodeTables {
    inner: TableLookup,
}

#[wasm_bindgen(js_class = CodeTables)]
impl JsCodeTables {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(js_name = addAirline)]
    pub fn add_airline(&mut self, code: &str, name: &str) {
        self.inner.add_airline(code, name);
    }

    #[wasm_bindgen(js_name = addAirport)]
    pub fn add_airport(&mut self, code: &str, city: &str) {
        self.inner.add_airport(code, city);
    }

    #[wasm_bindgen(js_name = addCompartment)]
    pub fn add_compartment(
        &mut self,
        airline: &str,
        class: &str,
        name: String,
        details: Option<String>,
    ) {
        self.inner
            .add_compartment(airline, class, Compartment { name, details });
    }
}

#[wasm_bindgen(js_name = BoardingPass)]
pub struct JsBoardingPass {
    inner: BoardingPass,
}

#[wasm_bindgen(js_class = BoardingPass)]
impl JsBoardingPass {
    /// Decodes the barcode data. The anchor date is the known date of the
    /// flight formatted as `YYYY-MM-DD`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        raw: &str,
        anchor_date: Option<String>,
        tables: Option<JsCodeTables>,
    ) -> Result<Self, JsError> {
        let lookup = tables.map(|tables| tables.inner);
        let mut builder = BoardingPass::builder();

        if let Some(lookup) = &lookup {
            builder.lookup(lookup);
        }

        if let Some(date) = anchor_date {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| JsError::new(&format!("invalid anchor date {date}: {e}")))?;
            builder.anchor_date(date);
        }

        Ok(Self {
            inner: builder.build(raw),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn raw(&self) -> String {
        self.inner.raw().to_string()
    }

    #[wasm_bindgen(getter, js_name = versionNumber)]
    pub fn version_number(&self) -> Option<u8> {
        self.inner.version_number()
    }

    #[wasm_bindgen(getter, js_name = legCount)]
    pub fn leg_count(&self) -> Option<u8> {
        self.inner.leg_count()
    }

    #[wasm_bindgen(getter, js_name = isFullyValid)]
    pub fn is_fully_valid(&self) -> bool {
        self.inner.is_fully_valid()
    }

    #[wasm_bindgen(getter, js_name = invalidReason)]
    pub fn invalid_reason(&self) -> Option<String> {
        self.inner.invalid_reason().map(|reason| reason.to_string())
    }

    /// The structured data with unique, repeated and unknown data.
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.inner.data())?)
    }

    /// All fields in the order of the barcode.
    #[wasm_bindgen(getter)]
    pub fn fields(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.fields())?)
    }

    pub fn field(&self, id: u16, leg: Option<usize>) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.field(id, leg))?)
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_string(&self) -> String {
        self.inner.to_string()
    }
}

impl From<JsBoardingPass> for BoardingPass {
    fn from(value: JsBoardingPass) -> Self {
        value.inner
    }
}

impl From<BoardingPass> for JsBoardingPass {
    fn from(value: BoardingPass) -> Self {
        Self { inner: value }
    }
}
