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

//! In-memory contract and wallet used by the integration tests. Every
//! call is recorded so tests can assert on the exact read sequence.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    str::FromStr,
    sync::{
        atomic::{AtomicU8, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use ethers::types::U64;

use pollboard::{
    contract::{PollContract, PollInfo},
    wallet::{Address, TransactionReceipt, Wallet, H256},
    Error, Result,
};

pub const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
pub const BOB: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

pub fn address(s: &str) -> Address {
    Address::from_str(s).unwrap()
}

fn reverted(reason: &str) -> Error {
    Error::ContractCallFailed(format!("execution reverted: {reason}"))
}

/// A call issued against [`MockContract`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    PollCount,
    GetPoll(u64),
    GetPollResults(u64),
    IsPollActive(u64),
    HasVoted(u64, Address),
    GetVote(u64, Address),
    CreatePoll { from: Address, question: String, options: Vec<String>, duration: u64 },
    Vote { from: Address, poll_id: u64, option_index: u64 },
}

impl Call {
    pub fn is_write(&self) -> bool {
        matches!(self, Self::CreatePoll { .. } | Self::Vote { .. })
    }
}

struct MockPoll {
    info: PollInfo,
    results: Vec<u64>,
    active: bool,
    votes: HashMap<Address, u64>,
}

#[derive(Default)]
pub struct MockContract {
    polls: Mutex<Vec<MockPoll>>,
    calls: Mutex<Vec<Call>>,
    fail_on: Mutex<Option<Call>>,
    tx_counter: AtomicU8,
}

impl MockContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a poll with the given tallies.
    pub fn with_poll(self, question: &str, options: &[&str], results: &[u64], active: bool) -> Self {
        let info = PollInfo {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            start_time: 1_700_000_000,
            end_time: 1_700_003_600,
        };

        self.polls.lock().unwrap().push(MockPoll {
            info,
            results: results.to_vec(),
            active,
            votes: HashMap::new(),
        });
        self
    }

    /// Record a vote directly in the contract state.
    pub fn with_vote(self, poll_id: u64, voter: Address, option: u64) -> Self {
        {
            let mut polls = self.polls.lock().unwrap();
            let poll = &mut polls[poll_id as usize];
            poll.votes.insert(voter, option);
            poll.results[option as usize] += 1;
        }
        self
    }

    /// Make the next call equal to `call` fail.
    pub fn fail_on(&self, call: Call) {
        *self.fail_on.lock().unwrap() = Some(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| f(c)).count()
    }

    pub fn poll_count_reads(&self) -> usize {
        self.count(|c| *c == Call::PollCount)
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call.clone());

        let mut fail_on = self.fail_on.lock().unwrap();
        if fail_on.as_ref() == Some(&call) {
            *fail_on = None;
            return Err(Error::ProviderError(format!("{call:?} failed")))
        }

        Ok(())
    }

    /// A mined, successful receipt for the next transaction.
    fn next_receipt(&self) -> TransactionReceipt {
        let n = self.tx_counter.fetch_add(1, Ordering::SeqCst);
        TransactionReceipt {
            transaction_hash: H256::repeat_byte(n + 1),
            block_number: Some(U64::from(1)),
            status: Some(U64::from(1)),
            ..Default::default()
        }
    }

    fn with_poll_state<T>(&self, index: u64, f: impl FnOnce(&mut MockPoll) -> T) -> Result<T> {
        let mut polls = self.polls.lock().unwrap();
        match polls.get_mut(index as usize) {
            Some(poll) => Ok(f(poll)),
            None => Err(reverted("Poll does not exist")),
        }
    }
}

#[async_trait]
impl PollContract for MockContract {
    async fn poll_count(&self) -> Result<u64> {
        self.record(Call::PollCount)?;
        Ok(self.polls.lock().unwrap().len() as u64)
    }

    async fn get_poll(&self, index: u64) -> Result<PollInfo> {
        self.record(Call::GetPoll(index))?;
        self.with_poll_state(index, |p| p.info.clone())
    }

    async fn get_poll_results(&self, index: u64) -> Result<Vec<u64>> {
        self.record(Call::GetPollResults(index))?;
        self.with_poll_state(index, |p| p.results.clone())
    }

    async fn is_poll_active(&self, index: u64) -> Result<bool> {
        self.record(Call::IsPollActive(index))?;
        self.with_poll_state(index, |p| p.active)
    }

    async fn has_voted(&self, index: u64, account: &Address) -> Result<bool> {
        self.record(Call::HasVoted(index, *account))?;
        self.with_poll_state(index, |p| p.votes.contains_key(account))
    }

    async fn get_vote(&self, index: u64, account: &Address) -> Result<u64> {
        self.record(Call::GetVote(index, *account))?;
        match self.with_poll_state(index, |p| p.votes.get(account).copied())? {
            Some(v) => Ok(v),
            None => Err(reverted("Has not voted")),
        }
    }

    async fn create_poll(
        &self,
        from: Address,
        question: &str,
        options: &[String],
        duration_minutes: u64,
    ) -> Result<TransactionReceipt> {
        self.record(Call::CreatePoll {
            from,
            question: question.to_string(),
            options: options.to_vec(),
            duration: duration_minutes,
        })?;

        let start_time = 1_700_000_000;
        self.polls.lock().unwrap().push(MockPoll {
            info: PollInfo {
                question: question.to_string(),
                options: options.to_vec(),
                start_time,
                end_time: start_time + duration_minutes * 60,
            },
            results: vec![0; options.len()],
            active: true,
            votes: HashMap::new(),
        });

        Ok(self.next_receipt())
    }

    async fn vote(
        &self,
        from: Address,
        poll_id: u64,
        option_index: u64,
    ) -> Result<TransactionReceipt> {
        self.record(Call::Vote { from, poll_id, option_index })?;

        self.with_poll_state(poll_id, |p| {
            if p.votes.contains_key(&from) {
                return Err(reverted("Already voted"))
            }
            let Some(tally) = p.results.get_mut(option_index as usize) else {
                return Err(reverted("Invalid option"))
            };
            *tally += 1;
            p.votes.insert(from, option_index);
            Ok(())
        })??;

        Ok(self.next_receipt())
    }
}

/// Wallet whose accounts become visible once authorized.
pub struct MockWallet {
    accounts: Vec<Address>,
    authorized: Mutex<bool>,
}

impl MockWallet {
    /// A wallet that has already authorized its accounts.
    pub fn authorized(accounts: &[&str]) -> Self {
        Self { accounts: accounts.iter().map(|a| address(a)).collect(), authorized: Mutex::new(true) }
    }

    /// A wallet that has to be asked first.
    pub fn locked(accounts: &[&str]) -> Self {
        Self {
            accounts: accounts.iter().map(|a| address(a)).collect(),
            authorized: Mutex::new(false),
        }
    }
}

#[async_trait]
impl Wallet for MockWallet {
    async fn list_accounts(&self) -> Result<Vec<Address>> {
        if *self.authorized.lock().unwrap() {
            return Ok(self.accounts.clone())
        }
        Ok(vec![])
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        if self.accounts.is_empty() {
            return Err(Error::NoAuthorizedAccounts)
        }
        *self.authorized.lock().unwrap() = true;
        Ok(self.accounts.clone())
    }
}
