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

use crate::resolver::Layout;
use crate::schema::Schema;

/// Gives access to the raw value of fields by their item number.
#[derive(Clone, Copy, Debug)]
pub struct Extractor<'a> {
    raw: &'a str,
    schema: &'a Schema,
    layout: &'a Layout,
}

impl<'a> Extractor<'a> {
    pub fn new(raw: &'a str, schema: &'a Schema, layout: &'a Layout) -> Self {
        Self {
            raw,
            schema,
            layout,
        }
    }

    /// Returns the raw value of the field `id`.
    ///
    /// Fields of repeated groups require the `leg`. A field is cut at the end
    /// of its group and absent if its group is not present, the leg doesn't
    /// exist or the field reaches up to invalid data.
    pub fn get(&self, id: u16, leg: Option<usize>) -> Option<&'a str> {
        let def = self.schema.field(id)?;
        let cp = self.layout.control_point(def.group, leg)?;

        let start = cp.start + def.offset;
        let rest = cp.length.checked_sub(def.offset).filter(|&rest| rest > 0)?;
        let length = def.length.filter(|&length| length <= rest).unwrap_or(rest);

        if self
            .layout
            .invalid
            .is_some_and(|marker| marker.offset <= start + length)
        {
            return None;
        }

        self.raw.get(start..start + length)
    }
}
