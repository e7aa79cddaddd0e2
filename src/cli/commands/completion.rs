use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

const BIN_NAME: &str = "merkledrop";

/// Generate shell completion scripts
///
/// The script goes to stdout so it can be piped or `eval`ed; installation
/// hints go to stderr.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());

    eprintln!("\n{}", "Installation Instructions:".bold());
    match shell {
        Shell::Bash => {
            eprintln!("  Add the following to your ~/.bashrc or ~/.bash_profile:");
            eprintln!("  {}", "eval \"$(merkledrop completion bash)\"".cyan());
        },
        Shell::Zsh => {
            eprintln!("  Save to a file in your fpath:");
            eprintln!(
                "  {}",
                "merkledrop completion zsh > ~/.local/share/zsh/site-functions/_merkledrop".cyan()
            );
        },
        Shell::Fish => {
            eprintln!("  Save the completion script:");
            eprintln!(
                "  {}",
                "merkledrop completion fish > ~/.config/fish/completions/merkledrop.fish".cyan()
            );
        },
        Shell::PowerShell => {
            eprintln!("  Add the following to your PowerShell profile:");
            eprintln!(
                "  {}",
                "Invoke-Expression (& merkledrop completion powershell)".cyan()
            );
        },
        _ => {
            eprintln!(
                "  Please refer to your shell's documentation for installing completion scripts."
            );
        },
    }

    Ok(())
}
