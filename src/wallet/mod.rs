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

use async_trait::async_trait;
use ethers::utils::to_checksum;

pub use ethers::types::{Address, TransactionReceipt, H256};

use crate::{Error, Result};

/// [`Wallet`] backed by an Ethereum JSON-RPC provider
pub mod provider;

/// Abbreviated checksummed form used in the connection banner,
/// e.g. `0x5aAe...eAed`.
pub fn short_address(address: &Address) -> String {
    let full = to_checksum(address, None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Account-level capabilities of a wallet provider.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Accounts the provider has already authorized, without prompting.
    async fn list_accounts(&self) -> Result<Vec<Address>>;

    /// Ask the provider to authorize accounts for this client.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// The account transactions are sent from. The provider holds its keys
    /// and signs on its behalf.
    async fn signer(&self) -> Result<Address> {
        match self.list_accounts().await?.first() {
            Some(address) => Ok(*address),
            None => Err(Error::NoAuthorizedAccounts),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn short_form_is_checksummed() {
        let addr = Address::from_str("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(short_address(&addr), "0x5aAe...eAed");

        let addr = Address::from_str("0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359").unwrap();
        assert_eq!(short_address(&addr), "0xfB69...d359");
    }
}
