//! Shell completion scripts

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;
use crate::error::Result;

/// Write the completion script for `shell` to `out`.
pub fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, out);
    out.flush()?;
    Ok(())
}

/// Run the completion command
pub fn run(shell: Shell) -> Result<()> {
    write_script(shell, &mut std::io::stdout())
}
