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

//! View-records are point-in-time projections of on-chain polls, built
//! fresh on every aggregation pass and never patched afterwards.
use log::{debug, warn};

use crate::{contract::PollContract, util::Timestamp, wallet::Address, Result};

/// A poll as displayed to the current viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollView {
    /// Contract-assigned poll index
    pub id: u64,
    pub question: String,
    pub options: Vec<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Per-option tallies, aligned with `options`
    pub results: Vec<u64>,
    /// Voting window status as computed by the contract
    pub is_active: bool,
    /// Whether the viewer has voted. Always `false` without a viewer.
    pub has_voted: bool,
    /// Option index the viewer chose, if they voted
    pub user_vote: Option<u64>,
}

impl PollView {
    pub fn total_votes(&self) -> u64 {
        self.results.iter().fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    /// Tally of an option; options without a tally entry count as zero.
    pub fn votes_for(&self, option: usize) -> u64 {
        self.results.get(option).copied().unwrap_or(0)
    }

    /// Share of the total vote an option received, in percent.
    pub fn percentage(&self, option: usize) -> f64 {
        let total = self.total_votes();
        if total == 0 {
            return 0.0
        }

        self.votes_for(option) as f64 / total as f64 * 100.0
    }

    pub fn is_user_vote(&self, option: usize) -> bool {
        self.user_vote == Some(option as u64)
    }

    /// Voting is offered only on active polls the connected viewer has
    /// not voted in yet. The contract enforces the rules regardless.
    pub fn can_vote(&self, connected: bool) -> bool {
        self.is_active && !self.has_voted && connected
    }
}

/// Builds the ordered list of [`PollView`]s by reading every poll from
/// the contract, one index after another.
pub struct PollViewBuilder<'a> {
    contract: &'a dyn PollContract,
    viewer: Option<Address>,
}

impl<'a> PollViewBuilder<'a> {
    pub fn new(contract: &'a dyn PollContract) -> Self {
        Self { contract, viewer: None }
    }

    /// Account whose vote status is included in the records.
    pub fn viewer(mut self, viewer: Option<Address>) -> Self {
        self.viewer = viewer;
        self
    }

    /// Run an aggregation pass. Reads are issued sequentially in
    /// ascending index order and the first failing read aborts the pass.
    pub async fn build(&self) -> Result<Vec<PollView>> {
        let count = self.contract.poll_count().await?;
        debug!(target: "pollboard::poll::view", "Aggregating {} polls", count);

        let mut polls = Vec::with_capacity(count.min(1024) as usize);
        for id in 0..count {
            polls.push(self.build_one(id).await?);
        }

        Ok(polls)
    }

    async fn build_one(&self, id: u64) -> Result<PollView> {
        let poll = self.contract.get_poll(id).await?;
        let results = self.contract.get_poll_results(id).await?;
        let is_active = self.contract.is_poll_active(id).await?;

        let mut has_voted = false;
        let mut user_vote = None;
        if let Some(viewer) = &self.viewer {
            has_voted = self.contract.has_voted(id, viewer).await?;
            if has_voted {
                user_vote = Some(self.contract.get_vote(id, viewer).await?);
            }
        }

        if results.len() != poll.options.len() {
            warn!(
                target: "pollboard::poll::view",
                "Poll {} has {} options but {} tallies", id, poll.options.len(), results.len(),
            );
        }

        Ok(PollView {
            id,
            question: poll.question,
            options: poll.options,
            start_time: Timestamp::from_secs(poll.start_time),
            end_time: Timestamp::from_secs(poll.end_time),
            results,
            is_active,
            has_voted,
            user_vote,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll(results: Vec<u64>, user_vote: Option<u64>) -> PollView {
        PollView {
            id: 0,
            question: "Lunch?".to_string(),
            options: vec!["Pizza".to_string(), "Sushi".to_string(), "Salad".to_string()],
            start_time: Timestamp(1_700_000_000),
            end_time: Timestamp(1_700_003_600),
            results,
            is_active: true,
            has_voted: user_vote.is_some(),
            user_vote,
        }
    }

    #[test]
    fn percentages() {
        let p = poll(vec![1, 3, 0], None);
        assert_eq!(p.total_votes(), 4);
        assert_eq!(p.percentage(0), 25.0);
        assert_eq!(p.percentage(1), 75.0);
        assert_eq!(p.percentage(2), 0.0);
        assert_eq!(format!("{:.1}", p.percentage(1)), "75.0");
    }

    #[test]
    fn no_votes_means_zero_percent() {
        let p = poll(vec![0, 0, 0], None);
        assert_eq!(p.total_votes(), 0);
        assert_eq!(p.percentage(0), 0.0);
    }

    #[test]
    fn short_tally_counts_as_zero() {
        let p = poll(vec![2], None);
        assert_eq!(p.votes_for(0), 2);
        assert_eq!(p.votes_for(2), 0);
        assert_eq!(p.percentage(2), 0.0);
    }

    #[test]
    fn vote_controls() {
        let fresh = poll(vec![0, 0, 0], None);
        assert!(fresh.can_vote(true));
        assert!(!fresh.can_vote(false));

        let voted = poll(vec![0, 1, 0], Some(1));
        assert!(!voted.can_vote(true));
        assert!(voted.is_user_vote(1));
        assert!(!voted.is_user_vote(0));

        let mut closed = poll(vec![0, 0, 0], None);
        closed.is_active = false;
        assert!(!closed.can_vote(true));
    }
}
