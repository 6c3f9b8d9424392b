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

//! Bindings to the on-chain polling contract. All poll state, vote
//! tallying and voting rules live in the contract; this module only
//! exposes its method set.
use std::sync::Arc;

use async_trait::async_trait;
use ethers::{
    contract::abigen,
    providers::Middleware,
    types::{Address, TransactionReceipt, U256, U64},
};
use log::{debug, info};

use crate::{Error, Result};

abigen!(
    PollingContract,
    r#"[
        function getPollCount() external view returns (uint256)
        function getPoll(uint256 pollId) external view returns (string, string[], uint256, uint256)
        function getPollResults(uint256 pollId) external view returns (uint256[])
        function isPollActive(uint256 pollId) external view returns (bool)
        function hasVoted(uint256 pollId, address voter) external view returns (bool)
        function getVote(uint256 pollId, address voter) external view returns (uint256)
        function createPoll(string question, string[] options, uint256 durationInMinutes) external
        function vote(uint256 pollId, uint256 optionIndex) external
    ]"#
);

/// Poll fields as returned by `getPoll`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollInfo {
    pub question: String,
    pub options: Vec<String>,
    /// Seconds since the Unix epoch
    pub start_time: u64,
    /// Seconds since the Unix epoch
    pub end_time: u64,
}

/// Method set of the polling contract.
#[async_trait]
pub trait PollContract: Send + Sync {
    /// `getPollCount()`
    async fn poll_count(&self) -> Result<u64>;

    /// `getPoll(index)`
    async fn get_poll(&self, index: u64) -> Result<PollInfo>;

    /// `getPollResults(index)`, tallies aligned with the poll options
    async fn get_poll_results(&self, index: u64) -> Result<Vec<u64>>;

    /// `isPollActive(index)`
    async fn is_poll_active(&self, index: u64) -> Result<bool>;

    /// `hasVoted(index, account)`
    async fn has_voted(&self, index: u64, account: &Address) -> Result<bool>;

    /// `getVote(index, account)`, the chosen option index
    async fn get_vote(&self, index: u64, account: &Address) -> Result<u64>;

    /// `createPoll(question, options, durationMinutes)` sent from `from`.
    /// Resolves once the transaction is mined.
    async fn create_poll(
        &self,
        from: Address,
        question: &str,
        options: &[String],
        duration_minutes: u64,
    ) -> Result<TransactionReceipt>;

    /// `vote(pollId, optionIndex)` sent from `from`. Resolves once the
    /// transaction is mined.
    async fn vote(&self, from: Address, poll_id: u64, option_index: u64)
        -> Result<TransactionReceipt>;
}

/// Narrow a contract `uint256` to `u64`.
fn to_u64(value: U256, what: &'static str) -> Result<u64> {
    if value > U256::from(u64::MAX) {
        return Err(Error::ValueOutOfRange(what))
    }

    Ok(value.as_u64())
}

/// Turn the outcome of a pending transaction into a confirmed receipt.
fn check_receipt(receipt: Option<TransactionReceipt>, what: &str) -> Result<TransactionReceipt> {
    let Some(receipt) = receipt else { return Err(Error::TransactionDropped(what.to_string())) };

    if receipt.status != Some(U64::from(1)) {
        return Err(Error::TransactionReverted(format!("{:?}", receipt.transaction_hash)))
    }

    Ok(receipt)
}

/// [`PollContract`] deployed on an EVM chain. Transactions are sent
/// unsigned; the provider behind `M` signs them for the `from` account.
pub struct EvmPollContract<M> {
    contract: PollingContract<M>,
}

impl<M: Middleware> EvmPollContract<M> {
    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self { contract: PollingContract::new(address, client) }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }
}

#[async_trait]
impl<M: Middleware + 'static> PollContract for EvmPollContract<M> {
    async fn poll_count(&self) -> Result<u64> {
        let count = self.contract.get_poll_count().call().await?;
        to_u64(count, "getPollCount")
    }

    async fn get_poll(&self, index: u64) -> Result<PollInfo> {
        debug!(target: "pollboard::contract", "getPoll({})", index);
        let (question, options, start_time, end_time) =
            self.contract.get_poll(index.into()).call().await?;

        Ok(PollInfo {
            question,
            options,
            start_time: to_u64(start_time, "getPoll.startTime")?,
            end_time: to_u64(end_time, "getPoll.endTime")?,
        })
    }

    async fn get_poll_results(&self, index: u64) -> Result<Vec<u64>> {
        let tally = self.contract.get_poll_results(index.into()).call().await?;
        tally.into_iter().map(|v| to_u64(v, "getPollResults")).collect()
    }

    async fn is_poll_active(&self, index: u64) -> Result<bool> {
        Ok(self.contract.is_poll_active(index.into()).call().await?)
    }

    async fn has_voted(&self, index: u64, account: &Address) -> Result<bool> {
        Ok(self.contract.has_voted(index.into(), *account).call().await?)
    }

    async fn get_vote(&self, index: u64, account: &Address) -> Result<u64> {
        let choice = self.contract.get_vote(index.into(), *account).call().await?;
        to_u64(choice, "getVote")
    }

    async fn create_poll(
        &self,
        from: Address,
        question: &str,
        options: &[String],
        duration_minutes: u64,
    ) -> Result<TransactionReceipt> {
        let tx = self
            .contract
            .create_poll(question.to_string(), options.to_vec(), duration_minutes.into())
            .from(from);

        let pending = tx.send().await?;
        info!(target: "pollboard::contract", "Submitted createPoll in {:?}", *pending);
        check_receipt(pending.await?, "createPoll")
    }

    async fn vote(
        &self,
        from: Address,
        poll_id: u64,
        option_index: u64,
    ) -> Result<TransactionReceipt> {
        let tx = self.contract.vote(poll_id.into(), option_index.into()).from(from);

        let pending = tx.send().await?;
        info!(target: "pollboard::contract", "Submitted vote in {:?}", *pending);
        check_receipt(pending.await?, "vote")
    }
}
