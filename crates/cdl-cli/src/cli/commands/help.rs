//! `cdl help [COMMAND]` – usage text or one command's description.

use clap::CommandFactory;

use crate::cli::Cli;

/// Usage for the whole CLI, or the one-line description of `command`.
pub(crate) fn help_text(command: Option<&str>) -> String {
    let mut cmd = Cli::command();
    match command {
        None => cmd.render_help().to_string(),
        Some(name) => match cmd.find_subcommand(name).and_then(|sub| sub.get_about()) {
            Some(about) => about.to_string(),
            None => format!("The command {} doesn't exist!", name),
        },
    }
}

pub fn run_help(command: Option<&str>) {
    println!("{}", help_text(command).trim_end());
}
