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

use std::{fs, process::exit, str::FromStr, sync::Arc, time::Duration};

use ethers::{
    providers::{Http, Provider},
    utils::to_checksum,
};
use log::{error, info};
use serde::Deserialize;
use simplelog::{ColorChoice, TermLogger, TerminalMode, WriteLogger};
use structopt::StructOpt;
use structopt_toml::StructOptToml;
use url::Url;

use pollboard::{
    board::PollBoard,
    cli_desc,
    contract::EvmPollContract,
    poll::PollForm,
    util::{
        cli::{get_log_config, get_log_level, spawn_config},
        expand_path,
        path::get_config_path,
    },
    wallet::{Address, Wallet},
    Error, ErrorCategory, Result,
};

mod view;
use view::{connection_banner, print_poll_info, print_poll_list};

const CONFIG_FILE: &str = "pollctl_config.toml";
const CONFIG_FILE_CONTENTS: &str = include_str!("../pollctl_config.toml");

#[derive(Clone, Debug, Deserialize, StructOpt, StructOptToml)]
#[serde(default)]
#[structopt(name = "pollctl", about = cli_desc!())]
struct Args {
    #[structopt(short, parse(from_occurrences))]
    /// Increase verbosity (-vv supported)
    verbose: u8,

    #[structopt(short, long)]
    /// Configuration file to use
    config: Option<String>,

    #[structopt(short, long, default_value = "http://127.0.0.1:8545")]
    /// Ethereum JSON-RPC endpoint of the wallet provider
    endpoint: Url,

    #[structopt(long, default_value = "0x4ba99aDa4650b6d19ca15e322D4660cb4DEE3ADF")]
    /// Address of the polling contract
    contract: String,

    #[structopt(long, default_value = "1")]
    /// Seconds between two checks for a transaction receipt
    receipt_interval: u64,

    #[structopt(long)]
    /// Set log file output
    log: Option<String>,

    #[structopt(subcommand)]
    command: Option<Subcmd>,
}

#[derive(Clone, Debug, Deserialize, StructOpt)]
enum Subcmd {
    /// List all polls (default)
    List,

    /// Show the accounts the wallet provider has authorized
    Accounts,

    /// Ask the wallet provider to authorize an account
    Connect,

    /// Show a poll with its per-option results
    Show {
        /// Poll ID
        poll_id: u64,
    },

    /// Create a new poll
    Create {
        #[structopt(short, long)]
        /// Poll question
        question: String,

        #[structopt(short, long = "option")]
        /// Poll option, repeat for each option
        options: Vec<String>,

        #[structopt(short, long, default_value = "60")]
        /// Voting window in minutes
        duration: u64,
    },

    /// Vote for an option of a poll
    Vote {
        /// Poll ID
        poll_id: u64,
        /// Option index, as shown by `pollctl show`
        option_index: u64,
    },
}

fn parse_args(toml: &str) -> Result<Args> {
    Args::from_args_with_toml(toml).map_err(|e| Error::ConfigInvalid(e.to_string()))
}

fn init_logger(args: &Args) -> Result<()> {
    let verbosity = args.verbose.into();
    let log_level = get_log_level(verbosity);
    let log_config = get_log_config(verbosity);

    match &args.log {
        Some(path) => {
            let file = fs::File::create(expand_path(path)?)?;
            WriteLogger::init(log_level, log_config, file)?;
        }
        None => TermLogger::init(log_level, log_config, TerminalMode::Mixed, ColorChoice::Auto)?,
    }

    Ok(())
}

async fn realmain(args: Args) -> Result<()> {
    if args.receipt_interval == 0 {
        return Err(Error::ConfigInvalid("receipt_interval must be at least 1".to_string()))
    }

    let contract_address = Address::from_str(&args.contract)
        .map_err(|_| Error::InvalidAddress(args.contract.clone()))?;
    let provider = Arc::new(
        Provider::<Http>::try_from(args.endpoint.as_str())?
            .interval(Duration::from_secs(args.receipt_interval)),
    );
    let contract = Arc::new(EvmPollContract::new(contract_address, provider.clone()));
    let board = PollBoard::new(provider.clone(), contract);

    info!(target: "pollctl", "Using polling contract {:?}", contract_address);

    match args.command.unwrap_or(Subcmd::List) {
        Subcmd::List => {
            board.init().await?;
            print_poll_list(&*board.snapshot().await);
        }

        Subcmd::Accounts => {
            let accounts = provider.list_accounts().await?;
            if accounts.is_empty() {
                println!("No authorized accounts");
            }
            for account in accounts {
                println!("{}", to_checksum(&account, None));
            }
        }

        Subcmd::Connect => {
            board.connect_wallet().await?;
            print_poll_list(&*board.snapshot().await);
        }

        Subcmd::Show { poll_id } => {
            board.init().await?;
            if !board.is_connected().await {
                return Err(Error::WalletNotConnected)
            }

            let snapshot = board.snapshot().await;
            print_poll_info(snapshot.poll(poll_id)?, true);
        }

        Subcmd::Create { question, options, duration } => {
            board.init().await?;

            let mut form = PollForm::with_values(&question, options, duration);
            let tx = board.create_poll(&mut form).await?;
            println!("Poll created in transaction {:?}", tx);
            print_poll_list(&*board.snapshot().await);
        }

        Subcmd::Vote { poll_id, option_index } => {
            board.init().await?;

            let tx = board.cast_vote(poll_id, option_index).await?;
            println!("Vote recorded in transaction {:?}", tx);

            let account = board.account().await;
            println!("{}", connection_banner(account.as_ref()));
            let snapshot = board.snapshot().await;
            print_poll_info(snapshot.poll(poll_id)?, true);
        }
    }

    Ok(())
}

/// Process exit status for each class of failure.
fn exit_code(category: ErrorCategory) -> i32 {
    match category {
        ErrorCategory::Local => 1,
        ErrorCategory::NotConnected => 2,
        ErrorCategory::Validation => 3,
        ErrorCategory::Remote => 4,
    }
}

/// Report a failed command and return the exit status for it.
fn report(e: &Error, logging_to_file: bool) -> i32 {
    let category = e.category();
    match category {
        ErrorCategory::NotConnected => {
            eprintln!("{}. Run `pollctl connect` to authorize an account.", e)
        }
        ErrorCategory::Validation => eprintln!("Invalid poll: {}", e),
        ErrorCategory::Remote => {
            error!(target: "pollctl", "Wallet provider or contract failure: {}", e);
            if logging_to_file {
                eprintln!("Error: {}", e);
            }
        }
        ErrorCategory::Local => {
            error!(target: "pollctl", "{}", e);
            if logging_to_file {
                eprintln!("Error: {}", e);
            }
        }
    }

    exit_code(category)
}

fn main() -> Result<()> {
    let args = parse_args("")?;
    let config_path = get_config_path(args.config.clone(), CONFIG_FILE)?;
    spawn_config(&config_path, CONFIG_FILE_CONTENTS.as_bytes())?;
    let args = parse_args(&fs::read_to_string(&config_path)?)?;

    init_logger(&args)?;

    // The HTTP transport runs on a tokio reactor
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    if let Err(e) = smol::block_on(realmain(args.clone())) {
        exit(report(&e, args.log.is_some()))
    }

    Ok(())
}
