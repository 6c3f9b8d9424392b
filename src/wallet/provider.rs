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
use ethers::providers::{JsonRpcClient, Middleware, Provider};
use log::debug;

use super::{Address, Wallet};
use crate::{Error, Result};

#[async_trait]
impl<P: JsonRpcClient + 'static> Wallet for Provider<P> {
    async fn list_accounts(&self) -> Result<Vec<Address>> {
        let accounts = self.get_accounts().await?;
        debug!(target: "pollboard::wallet::provider", "eth_accounts: {:?}", accounts);
        Ok(accounts)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        let accounts: Vec<Address> = self.request("eth_requestAccounts", ()).await?;
        debug!(target: "pollboard::wallet::provider", "eth_requestAccounts: {:?}", accounts);

        if accounts.is_empty() {
            return Err(Error::NoAuthorizedAccounts)
        }

        Ok(accounts)
    }
}
