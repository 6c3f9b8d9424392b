/* This file is part of DarkFi (https://dark.fi)
 *
 * Copyright (C) 2020-2025 Dyne.org foundation
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::fmt;

use chrono::{DateTime, Local, Utc};

/// Wrapper struct to represent contract timestamps, in seconds since
/// the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Generate a `Timestamp` of the current time.
    pub fn current_time() -> Self {
        Self(Utc::now().timestamp())
    }

    /// Convert a contract `uint256` timestamp. Values past `i64::MAX`
    /// saturate.
    pub fn from_secs(secs: u64) -> Self {
        Self(i64::try_from(secs).unwrap_or(i64::MAX))
    }

    /// The UTC date this timestamp points to, if representable.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", timestamp_to_date(self.0))
    }
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS` in the local timezone.
/// Unset (non-positive) timestamps render empty.
pub fn timestamp_to_date(timestamp: i64) -> String {
    if timestamp <= 0 {
        return "".to_string()
    }

    match DateTime::from_timestamp(timestamp, 0) {
        Some(date) => date.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "".to_string(),
    }
}
