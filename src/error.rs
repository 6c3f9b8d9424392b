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

use ethers::{
    contract::ContractError,
    providers::{Middleware, ProviderError},
};

// Hello developer. Please add your error to the according subsection
// that is commented, or make a new subsection. Keep it clean.

/// Main result type used throughout the codebase.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`], used to decide how a failure is
/// reported to the user.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No wallet account is connected
    NotConnected,
    /// User input was rejected before anything was submitted
    Validation,
    /// A read or write against the provider or contract failed
    Remote,
    /// Local failure (configuration, filesystem, parsing)
    Local,
}

/// General library errors used throughout the codebase.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    // ==============
    // Session errors
    // ==============
    #[error("Please connect your wallet first")]
    WalletNotConnected,

    #[error("Wallet provider returned no authorized accounts")]
    NoAuthorizedAccounts,

    // =================
    // Validation errors
    // =================
    #[error("Please enter a question")]
    EmptyQuestion,

    #[error("Please enter at least 2 options")]
    NotEnoughOptions,

    #[error("Duration must be at least one minute")]
    InvalidDuration,

    // ==============
    // Parsing errors
    // ==============
    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    // ============================
    // Provider and contract errors
    // ============================
    #[error("Provider request failed: {0}")]
    ProviderError(String),

    #[error("Contract call failed: {0}")]
    ContractCallFailed(String),

    #[error("Contract returned out of range value for {0}")]
    ValueOutOfRange(&'static str),

    #[error("Transaction {0} was dropped before confirmation")]
    TransactionDropped(String),

    #[error("Transaction {0} was reverted")]
    TransactionReverted(String),

    // ===========
    // Poll errors
    // ===========
    #[error("Poll {0} not found")]
    PollNotFound(u64),

    // ===================
    // Configuration/files
    // ===================
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(std::io::ErrorKind),

    // ==============================================
    // Catch-all errors. Please avoid using this if possible.
    // ==============================================
    #[error("Custom error: {0}")]
    Custom(String),
}

impl Error {
    /// Map the error onto the category it is reported under.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::WalletNotConnected | Self::NoAuthorizedAccounts => ErrorCategory::NotConnected,

            Self::EmptyQuestion | Self::NotEnoughOptions | Self::InvalidDuration => {
                ErrorCategory::Validation
            }

            Self::ProviderError(_) |
            Self::ContractCallFailed(_) |
            Self::ValueOutOfRange(_) |
            Self::TransactionDropped(_) |
            Self::TransactionReverted(_) => ErrorCategory::Remote,

            Self::PollNotFound(_) |
            Self::UrlParseError(_) |
            Self::InvalidAddress(_) |
            Self::ConfigInvalid(_) |
            Self::Io(_) |
            Self::Custom(_) => ErrorCategory::Local,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.kind())
    }
}

impl From<ProviderError> for Error {
    fn from(err: ProviderError) -> Self {
        Self::ProviderError(err.to_string())
    }
}

impl<M: Middleware> From<ContractError<M>> for Error {
    fn from(err: ContractError<M>) -> Self {
        Self::ContractCallFailed(err.to_string())
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(err: log::SetLoggerError) -> Self {
        Self::Custom(err.to_string())
    }
}
