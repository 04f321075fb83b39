use std::{env, path::PathBuf};

use anyhow::{Result, anyhow};

use crate::{
    catalog::SignalCatalog,
    selection::{SelectionError, SelectionKind, SelectionStore},
};

const DEFAULT_CONFIG_FILE: &str = "regime-lens.jsonc";
const USAGE: &str = "usage: regime-lens [--config <path>] [--signal <key>]... \
                     [--company <ticker>]... [--list-signals] [--health]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    ListSignals,
    Health,
    Analyze {
        signals: Vec<String>,
        companies: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// `None` means `./regime-lens.jsonc`, resolved against the working directory.
    pub config_path: Option<PathBuf>,
    pub command: CliCommand,
}

impl CliArgs {
    pub fn resolved_config_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(env::current_dir()?.join(DEFAULT_CONFIG_FILE)),
        }
    }
}

pub fn args_from_env() -> Result<CliArgs> {
    parse_args(env::args().skip(1))
}

pub fn parse_args<I, S>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut config_path = None;
    let mut signals = Vec::new();
    let mut companies = Vec::new();
    let mut list_signals = false;
    let mut health = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--signal" => signals.push(value_for(&arg, args.next())?),
            "--company" => companies.push(value_for(&arg, args.next())?),
            "--list-signals" => list_signals = true,
            "--health" => health = true,
            other => return Err(anyhow!("unexpected argument '{other}'. {USAGE}")),
        }
    }

    let command = match (list_signals, health) {
        (true, true) => {
            return Err(anyhow!(
                "--list-signals and --health cannot be combined. {USAGE}"
            ));
        }
        (true, false) => CliCommand::ListSignals,
        (false, true) => CliCommand::Health,
        (false, false) => CliCommand::Analyze { signals, companies },
    };

    Ok(CliArgs {
        config_path,
        command,
    })
}

/// Builds the selection named by `--signal`/`--company` flags. Flags select,
/// they never toggle off: repeating one, in any ticker case, keeps it selected.
pub fn selection_from_flags(
    signals: &[String],
    companies: &[String],
) -> Result<SelectionStore, SelectionError> {
    let mut store = SelectionStore::new();
    for raw in signals {
        let key = SignalCatalog.parse_key(raw)?;
        if !store.is_signal_selected(key) {
            store.toggle_signal(key);
        }
    }
    for ticker in companies {
        if !store.is_selected(SelectionKind::Company, ticker) {
            store.toggle_company(ticker)?;
        }
    }
    Ok(store)
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    value
        .filter(|value| !value.starts_with("--"))
        .ok_or_else(|| anyhow!("{flag} expects a value. {USAGE}"))
}
