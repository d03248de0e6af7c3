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

//! Assembles the structured data of a record from its control points.

use std::ops::Deref;

use log::trace;

use crate::field::{Field, Group};
use crate::interpret::Context;
use crate::resolver::{ControlPoint, Layout};
use crate::schema::Schema;

/// The fields of a group instance in the order of the barcode.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FieldGroup(Vec<Field>);

impl FieldGroup {
    /// Returns the field with the item number `id`.
    pub fn field(&self, id: u16) -> Option<&Field> {
        self.0.iter().find(|field| field.id == id)
    }

    /// Returns the unknown data of the group, if any.
    pub fn unknown(&self) -> Option<&Field> {
        self.0.iter().find(|field| field.is_unknown())
    }
}

impl Deref for FieldGroup {
    type Target = [Field];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The groups that appear once per boarding pass.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UniqueData {
    pub mandatory: FieldGroup,
    pub conditional: Option<FieldGroup>,
    pub security: Option<FieldGroup>,
}

/// The groups of a leg.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LegData {
    pub mandatory: FieldGroup,
    pub conditional: Option<FieldGroup>,
    pub airline: Option<FieldGroup>,
}

/// The decoded fields of a boarding pass.
///
/// If the record is invalid from its very start, there is no unique or
/// repeated data but only the unknown data.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StructuredData {
    pub unique: Option<UniqueData>,
    pub repeated: Option<Vec<LegData>>,
    /// The data from the first structural error to the end of the record.
    pub unknown: Option<Field>,
}

impl StructuredData {
    /// Returns all fields in the order of the barcode.
    pub fn fields(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = Vec::new();
        let legs = self.repeated.as_deref().unwrap_or_default();

        if let Some(unique) = &self.unique {
            fields.extend(unique.mandatory.iter());
        }

        for (i, leg) in legs.iter().enumerate() {
            fields.extend(leg.mandatory.iter());

            if i == 0 {
                let conditional = self.unique.as_ref().and_then(|u| u.conditional.as_ref());
                fields.extend(conditional.iter().flat_map(|group| group.iter()));
            }

            fields.extend(leg.conditional.iter().flat_map(|group| group.iter()));
            fields.extend(leg.airline.iter().flat_map(|group| group.iter()));
        }

        let security = self.unique.as_ref().and_then(|u| u.security.as_ref());
        fields.extend(security.iter().flat_map(|group| group.iter()));

        fields.extend(self.unknown.iter());
        fields
    }
}

pub(crate) struct Assembler<'a> {
    raw: &'a str,
    schema: &'a Schema,
    layout: &'a Layout,
    ctx: &'a Context<'a>,
}

impl<'a> Assembler<'a> {
    pub fn new(
        raw: &'a str,
        schema: &'a Schema,
        layout: &'a Layout,
        ctx: &'a Context<'a>,
    ) -> Self {
        Self {
            raw,
            schema,
            layout,
            ctx,
        }
    }

    pub fn assemble(&self) -> StructuredData {
        let unknown = self
            .layout
            .invalid
            .and_then(|marker| self.raw.get(marker.offset..))
            .filter(|rest| !rest.is_empty())
            .map(Field::unknown);

        let Some(unique_mandatory) = self.layout.unique_mandatory else {
            return StructuredData {
                unique: None,
                repeated: None,
                unknown,
            };
        };

        let unique = UniqueData {
            mandatory: self.group(Group::UniqueMandatory, None, unique_mandatory),
            conditional: self
                .layout
                .unique_conditional
                .map(|cp| self.group(Group::UniqueConditional, None, cp)),
            security: self
                .layout
                .security
                .map(|cp| self.group(Group::Security, None, cp)),
        };

        let repeated = self
            .layout
            .legs
            .iter()
            .enumerate()
            .map(|(i, leg)| LegData {
                mandatory: self.group(Group::RepeatedMandatory, Some(i), leg.mandatory),
                conditional: leg
                    .conditional
                    .map(|cp| self.group(Group::RepeatedConditional, Some(i), cp)),
                airline: leg
                    .airline
                    .map(|cp| self.group(Group::RepeatedAirlineUse, Some(i), cp)),
            })
            .collect();

        StructuredData {
            unique: Some(unique),
            repeated: Some(repeated),
            unknown,
        }
    }

    /// Assembles the fields of a group instance at the control point `cp`.
    fn group(&self, group: Group, leg: Option<usize>, cp: ControlPoint) -> FieldGroup {
        let mut fields = Vec::new();
        let mut consumed = 0;

        for def in self.schema.group(group) {
            let Some(raw) = self.ctx.extractor.get(def.id, leg) else {
                continue;
            };

            if raw.is_empty() {
                continue;
            }

            // the field was cut by the end of the group
            if def.length.is_some_and(|length| raw.len() < length) {
                trace!("{group:?} ends within field {}", def.id);
                fields.push(Field::unknown(raw));
                consumed += raw.len();
                break;
            }

            if consumed + raw.len() > cp.length {
                break;
            }

            let valid = def.is_valid(raw);
            let interpretation = def.interpreter.filter(|_| valid).and_then(|interpreter| {
                let leg = leg.filter(|_| def.is_leg_sensitive());
                interpreter.interpret(raw, leg, self.ctx)
            });

            fields.push(Field {
                id: def.id,
                description: def.description,
                raw: raw.to_owned(),
                valid,
                interpretation,
            });
            consumed += raw.len();
        }

        if consumed < cp.length {
            trace!("{} byte left in {group:?}", cp.length - consumed);
            if let Some(rest) = self.raw.get(cp.start + consumed..cp.end()) {
                fields.push(Field::unknown(rest));
            }
        }

        FieldGroup(fields)
    }
}
