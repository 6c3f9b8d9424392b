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

use std::{fs, io::Write, path::Path};

use log::info;
use simplelog::{ConfigBuilder, LevelFilter};

use crate::Result;

/// Map `-v` occurrences onto a log level.
pub fn get_log_level(verbosity_level: u64) -> LevelFilter {
    match verbosity_level {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Logger configuration shared by the binaries. Noisy HTTP client
/// internals are kept out unless tracing.
pub fn get_log_config(verbosity_level: u64) -> simplelog::Config {
    let mut cfg = ConfigBuilder::new();
    cfg.set_time_format_rfc3339();
    cfg.set_target_level(LevelFilter::Error);

    if verbosity_level < 2 {
        cfg.add_filter_ignore_str("reqwest");
        cfg.add_filter_ignore_str("hyper");
        cfg.add_filter_ignore_str("rustls");
    }

    cfg.build()
}

/// Write the default configuration to `path` if nothing is there yet.
pub fn spawn_config(path: &Path, contents: &[u8]) -> Result<()> {
    if path.exists() {
        return Ok(())
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    info!(target: "pollboard::util::cli", "Config file created in {:?}. Please review it and try again.", path);

    Ok(())
}
