//! Server configuration from CLI flags and environment.

use clap::Parser;

use crate::export::{Clipboard, CommandClipboard, HostClipboard};
use crate::schemas::BillState;

/// Splits the monthly house bills and writes a message for every tenant.
#[derive(Parser, Debug, Clone)]
#[command(name = "billsplit", version, about)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0", env = "BILLSPLIT_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = 8080, env = "BILLSPLIT_PORT")]
    pub port: u16,

    /// Origin of the browser form allowed to call the API. Any origin when unset.
    #[arg(long, env = "BILLSPLIT_ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,

    /// Program (and arguments) that receives copied text on stdin, e.g. "wl-copy".
    #[arg(long, env = "BILLSPLIT_CLIPBOARD_COMMAND")]
    pub clipboard_command: Option<String>,

    /// Start with no tenants and zero totals.
    #[arg(long)]
    pub empty: bool,
}

impl Config {
    pub fn initial_state(&self) -> BillState {
        if self.empty {
            BillState::empty()
        } else {
            BillState::default()
        }
    }

    pub fn clipboard(&self) -> Box<dyn Clipboard> {
        match self
            .clipboard_command
            .as_deref()
            .and_then(CommandClipboard::from_command_line)
        {
            Some(command) => Box::new(command),
            None => Box::new(HostClipboard),
        }
    }
}
