//! Handler for the `cireport completions` command.

use std::io;

use anyhow::Result;
use cireport_config as cli;
use clap::CommandFactory;
use clap_complete::Shell;

fn target_shell(shell: cli::Shell) -> Shell {
    match shell {
        cli::Shell::Bash => Shell::Bash,
        cli::Shell::Elvish => Shell::Elvish,
        cli::Shell::Fish => Shell::Fish,
        cli::Shell::Powershell => Shell::PowerShell,
        cli::Shell::Zsh => Shell::Zsh,
    }
}

pub(crate) fn handle(args: cli::CompletionsArgs) -> Result<()> {
    let mut command = cli::Cli::command();
    let bin = command.get_name().to_string();
    clap_complete::generate(target_shell(args.shell), &mut command, bin, &mut io::stdout());
    Ok(())
}
