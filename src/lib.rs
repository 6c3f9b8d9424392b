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

pub mod error;
pub use error::{Error, ErrorCategory, Result};

/// Session state tying wallet, contract and poll snapshot together
pub mod board;

/// Polling contract bindings
pub mod contract;

/// Poll view-records and the poll creation form
pub mod poll;

/// Utility functions
pub mod util;

/// Wallet provider abstraction over an Ethereum JSON-RPC provider
pub mod wallet;

/// Description of the calling binary, taken from its Cargo manifest.
#[macro_export]
macro_rules! cli_desc {
    () => {{
        let mut desc = env!("CARGO_PKG_DESCRIPTION").to_string();
        desc.push_str(" ");
        desc.push_str(env!("CARGO_PKG_VERSION"));
        Box::leak(desc.into_boxed_str()) as &'static str
    }};
}
