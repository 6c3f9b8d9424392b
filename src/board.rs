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

//! A [`PollBoard`] is one client session against the polling contract:
//! the connected account, the latest poll snapshot and the flows that
//! write to the contract.
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{debug, error, info};
use smol::lock::RwLock;

use crate::{
    contract::PollContract,
    poll::{PollForm, PollView, PollViewBuilder},
    util::Timestamp,
    wallet::{Address, Wallet, H256},
    Error, Result,
};

/// Immutable result of one aggregation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollSnapshot {
    /// Polls in ascending id order
    pub polls: Vec<PollView>,
    /// Account the vote status was computed for
    pub viewer: Option<Address>,
    pub taken_at: Timestamp,
}

impl PollSnapshot {
    pub fn empty() -> Self {
        Self { polls: vec![], viewer: None, taken_at: Timestamp::current_time() }
    }

    pub fn is_empty(&self) -> bool {
        self.polls.is_empty()
    }

    pub fn poll(&self, id: u64) -> Result<&PollView> {
        self.polls.iter().find(|p| p.id == id).ok_or(Error::PollNotFound(id))
    }
}

/// Raises the loading flag until dropped.
struct Loading<'a>(&'a AtomicBool);

impl<'a> Loading<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct PollBoard {
    wallet: Arc<dyn Wallet>,
    contract: Arc<dyn PollContract>,
    /// Connected account, `None` until a wallet is connected
    account: RwLock<Option<Address>>,
    /// Latest complete snapshot, swapped as a whole on refresh
    snapshot: RwLock<Arc<PollSnapshot>>,
    loading: AtomicBool,
}

impl PollBoard {
    pub fn new(wallet: Arc<dyn Wallet>, contract: Arc<dyn PollContract>) -> Self {
        Self {
            wallet,
            contract,
            account: RwLock::new(None),
            snapshot: RwLock::new(Arc::new(PollSnapshot::empty())),
            loading: AtomicBool::new(false),
        }
    }

    /// Pick up an account the provider has already authorized, without
    /// prompting. Polls are only aggregated when such an account exists.
    pub async fn init(&self) -> Result<()> {
        let accounts = self.wallet.list_accounts().await?;
        let Some(account) = accounts.first() else {
            info!(target: "pollboard::board", "No authorized accounts, wallet not connected");
            return Ok(())
        };

        info!(target: "pollboard::board", "Found authorized account {:?}", account);
        *self.account.write().await = Some(*account);
        self.refresh().await?;
        Ok(())
    }

    /// Ask the provider for authorization and connect its signing account.
    pub async fn connect_wallet(&self) -> Result<Address> {
        self.wallet.request_accounts().await?;
        let signer = self.wallet.signer().await?;

        info!(target: "pollboard::board", "Connected account {:?}", signer);
        *self.account.write().await = Some(signer);
        self.refresh().await?;
        Ok(signer)
    }

    pub async fn account(&self) -> Option<Address> {
        *self.account.read().await
    }

    pub async fn is_connected(&self) -> bool {
        self.account.read().await.is_some()
    }

    /// Whether an aggregation or transaction flow is in progress.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// The latest complete snapshot.
    pub async fn snapshot(&self) -> Arc<PollSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// Rebuild the poll list from the contract and swap it in. On failure
    /// the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<PollSnapshot>> {
        let _loading = Loading::start(&self.loading);
        self.aggregate().await
    }

    async fn aggregate(&self) -> Result<Arc<PollSnapshot>> {
        let viewer = self.account().await;

        let polls = match PollViewBuilder::new(self.contract.as_ref()).viewer(viewer).build().await
        {
            Ok(v) => v,
            Err(e) => {
                error!(target: "pollboard::board", "Failed loading polls: {}", e);
                return Err(e)
            }
        };

        debug!(target: "pollboard::board", "Loaded {} polls", polls.len());
        let snapshot = Arc::new(PollSnapshot { polls, viewer, taken_at: Timestamp::current_time() });
        *self.snapshot.write().await = snapshot.clone();
        Ok(snapshot)
    }

    async fn signer(&self) -> Result<Address> {
        self.account().await.ok_or(Error::WalletNotConnected)
    }

    /// Validate the form and create a poll from it. The form is reset
    /// once the transaction is confirmed and left as is on any failure.
    pub async fn create_poll(&self, form: &mut PollForm) -> Result<H256> {
        let signer = self.signer().await?;
        let submission = form.validate()?;

        let _loading = Loading::start(&self.loading);
        info!(
            target: "pollboard::board",
            "Creating poll \"{}\" with {} options", submission.question, submission.options.len(),
        );

        let receipt = self
            .contract
            .create_poll(
                signer,
                &submission.question,
                &submission.options,
                submission.duration_minutes,
            )
            .await?;

        let tx = receipt.transaction_hash;
        info!(target: "pollboard::board", "Poll created in transaction {:?}", tx);
        form.reset();
        self.aggregate().await?;
        Ok(tx)
    }

    /// Vote for an option. Whether the vote is allowed is for the
    /// contract to decide.
    pub async fn cast_vote(&self, poll_id: u64, option_index: u64) -> Result<H256> {
        let signer = self.signer().await?;

        let _loading = Loading::start(&self.loading);
        info!(target: "pollboard::board", "Voting for option {} in poll {}", option_index, poll_id);

        let receipt = self.contract.vote(signer, poll_id, option_index).await?;

        let tx = receipt.transaction_hash;
        info!(target: "pollboard::board", "Vote recorded in transaction {:?}", tx);
        self.aggregate().await?;
        Ok(tx)
    }
}
