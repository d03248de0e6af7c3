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

use std::error;
use std::fmt;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Error {
    InvalidFieldLength {
        expected: usize,
        actual: usize,
    },
    NotANumber {
        bytes: Vec<u8>,
    },
    NotHexadecimal {
        bytes: Vec<u8>,
    },
    DayOutOfRange {
        day: u16,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFieldLength { expected, actual } => {
                write!(f, "field should be {expected} byte long but is {actual}")
            }
            Self::NotANumber { bytes } => {
                let s = String::from_utf8_lossy(bytes);
                write!(f, "field should be a number but is \"{s}\"")
            }
            Self::NotHexadecimal { bytes } => {
                let s = String::from_utf8_lossy(bytes);
                write!(f, "field should be a hexadecimal size but is \"{s}\"")
            }
            Self::DayOutOfRange { day } => {
                write!(f, "day of year should be in 1..=366 but is {day}")
            }
        }
    }
}

impl error::Error for Error {}
