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

use prettytable::{
    cell,
    format::{FormatBuilder, LinePosition, LineSeparator},
    row, table, Cell, Row, Table,
};

use pollboard::{
    board::PollSnapshot,
    poll::PollView,
    wallet::{short_address, Address},
};

pub const NO_POLLS: &str = "No polls found. Create one to get started!";
pub const NOT_CONNECTED: &str = "Wallet not connected. Run `pollctl connect` to view polls.";

fn table_format() -> prettytable::format::TableFormat {
    FormatBuilder::new()
        .padding(1, 1)
        .separators(&[LinePosition::Title], LineSeparator::new('-', ' ', ' ', ' '))
        .build()
}

fn status(poll: &PollView) -> &'static str {
    if poll.is_active {
        "Active"
    } else {
        "Closed"
    }
}

fn votes(n: u64) -> String {
    match n {
        1 => "1 vote".to_string(),
        n => format!("{} votes", n),
    }
}

pub fn connection_banner(account: Option<&Address>) -> String {
    match account {
        Some(a) => format!("Connected: {}", short_address(a)),
        None => "Not connected".to_string(),
    }
}

/// Overview of all polls, one row each.
pub fn poll_list_table(snapshot: &PollSnapshot) -> Table {
    let mut table = Table::new();
    table.set_format(table_format());
    table.set_titles(row!["ID", "Question", "Status", "Votes", "Created", "Ends", ""]);

    for poll in &snapshot.polls {
        let style = if poll.is_active { "Fg" } else { "" };
        let voted = if poll.has_voted { "voted" } else { "" };

        table.add_row(Row::new(vec![
            Cell::new(&poll.id.to_string()),
            Cell::new(&poll.question),
            Cell::new(status(poll)).style_spec(style),
            Cell::new(&votes(poll.total_votes())),
            Cell::new(&poll.start_time.to_string()),
            Cell::new(&poll.end_time.to_string()),
            Cell::new(voted),
        ]));
    }

    table
}

/// Options of a single poll with their tallies.
pub fn poll_info_table(poll: &PollView) -> Table {
    let mut table = Table::new();
    table.set_format(table_format());
    table.set_titles(row!["#", "Option", "Votes", "%", ""]);

    for (i, option) in poll.options.iter().enumerate() {
        let mine = poll.is_user_vote(i);
        let style = if mine { "Fb" } else { "" };

        table.add_row(Row::new(vec![
            Cell::new(&i.to_string()),
            Cell::new(option).style_spec(style),
            Cell::new(&votes(poll.votes_for(i))),
            Cell::new(&format!("{:.1}%", poll.percentage(i))),
            Cell::new(if mine { "Your vote" } else { "" }),
        ]));
    }

    table
}

/// What the viewer can do with a poll.
pub fn vote_hint(poll: &PollView, connected: bool) -> String {
    if poll.can_vote(connected) {
        return format!("Vote with: pollctl vote {} <option>", poll.id)
    }

    if !connected {
        return NOT_CONNECTED.to_string()
    }

    if poll.has_voted {
        return "You have already voted in this poll".to_string()
    }

    "This poll is closed".to_string()
}

pub fn print_poll_list(snapshot: &PollSnapshot) {
    println!("{}", connection_banner(snapshot.viewer.as_ref()));

    if snapshot.viewer.is_none() {
        println!("{}", NOT_CONNECTED);
        return
    }

    if snapshot.is_empty() {
        println!("{}", NO_POLLS);
        return
    }

    poll_list_table(snapshot).printstd();
}

pub fn print_poll_info(poll: &PollView, connected: bool) {
    let mut header = table!(
        [Bd => "Poll", poll.id.to_string()],
        ["Question", &poll.question],
        [Bd => "Status", status(poll)],
        ["Created", poll.start_time.to_string()],
        [Bd => "Ends", poll.end_time.to_string()],
        ["Total", votes(poll.total_votes())]
    );
    header.set_format(table_format());
    header.printstd();

    poll_info_table(poll).printstd();
    println!("{}", vote_hint(poll, connected));
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pollboard::util::Timestamp;

    use super::*;

    fn poll(user_vote: Option<u64>, is_active: bool) -> PollView {
        PollView {
            id: 4,
            question: "Ship it?".to_string(),
            options: vec!["Yes".to_string(), "No".to_string()],
            start_time: Timestamp(1_700_000_000),
            end_time: Timestamp(1_700_003_600),
            results: vec![2, 1],
            is_active,
            has_voted: user_vote.is_some(),
            user_vote,
        }
    }

    #[test]
    fn banner() {
        let a = Address::from_str("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(connection_banner(Some(&a)), "Connected: 0x5aAe...eAed");
        assert_eq!(connection_banner(None), "Not connected");
    }

    #[test]
    fn list_rows() {
        let snapshot = PollSnapshot {
            polls: vec![poll(None, true), poll(Some(0), false)],
            viewer: None,
            taken_at: Timestamp::current_time(),
        };

        let out = poll_list_table(&snapshot).to_string();
        assert!(out.contains("Ship it?"));
        assert!(out.contains("Active"));
        assert!(out.contains("Closed"));
        assert!(out.contains("3 votes"));
        assert!(out.contains("voted"));
    }

    #[test]
    fn info_rows() {
        let out = poll_info_table(&poll(Some(1), true)).to_string();
        assert!(out.contains("66.7%"));
        assert!(out.contains("33.3%"));
        assert!(out.contains("2 votes"));
        assert!(out.contains("1 vote"));
        assert!(!out.contains("1 votes"));
        assert_eq!(out.matches("Your vote").count(), 1);
    }

    #[test]
    fn vote_counts_pluralize() {
        assert_eq!(votes(0), "0 votes");
        assert_eq!(votes(1), "1 vote");
        assert_eq!(votes(2), "2 votes");
    }

    #[test]
    fn hints() {
        assert_eq!(vote_hint(&poll(None, true), true), "Vote with: pollctl vote 4 <option>");
        assert_eq!(vote_hint(&poll(None, true), false), NOT_CONNECTED);
        assert_eq!(vote_hint(&poll(Some(0), true), true), "You have already voted in this poll");
        assert_eq!(vote_hint(&poll(None, false), true), "This poll is closed");
    }
}
