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

use crate::{Error, Result};

/// Duration a new form starts with, in minutes
pub const DEFAULT_DURATION_MINUTES: u64 = 60;

/// A form never shows fewer option fields than this
pub const MIN_OPTIONS: usize = 2;

/// Editable state of the poll creation form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollForm {
    pub question: String,
    pub options: Vec<String>,
    pub duration_minutes: u64,
}

/// Validated creation request, ready to be sent to the contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollSubmission {
    pub question: String,
    pub options: Vec<String>,
    pub duration_minutes: u64,
}

impl Default for PollForm {
    fn default() -> Self {
        Self {
            question: String::new(),
            options: vec![String::new(); MIN_OPTIONS],
            duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

impl PollForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form from already collected values, e.g. CLI arguments.
    pub fn with_values(question: &str, options: Vec<String>, duration_minutes: u64) -> Self {
        Self { question: question.to_string(), options, duration_minutes }
    }

    /// Append an empty option field.
    pub fn add_option(&mut self) {
        self.options.push(String::new());
    }

    /// Remove an option field. Refused while only [`MIN_OPTIONS`] remain
    /// or when the index is out of range.
    pub fn remove_option(&mut self, index: usize) -> bool {
        if self.options.len() <= MIN_OPTIONS || index >= self.options.len() {
            return false
        }

        self.options.remove(index);
        true
    }

    pub fn set_option(&mut self, index: usize, value: &str) {
        if let Some(option) = self.options.get_mut(index) {
            *option = value.to_string();
        }
    }

    /// Back to the state of a freshly opened form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check the form and produce the request to submit. The form itself
    /// is left untouched so it can be corrected after a rejection.
    pub fn validate(&self) -> Result<PollSubmission> {
        // Blank fields are dropped, the rest is submitted as typed
        let options: Vec<String> =
            self.options.iter().filter(|o| !o.trim().is_empty()).cloned().collect();

        let question = self.question.trim();
        if question.is_empty() {
            return Err(Error::EmptyQuestion)
        }

        if options.len() < MIN_OPTIONS {
            return Err(Error::NotEnoughOptions)
        }

        if self.duration_minutes == 0 {
            return Err(Error::InvalidDuration)
        }

        Ok(PollSubmission {
            question: question.to_string(),
            options,
            duration_minutes: self.duration_minutes,
        })
    }
}
