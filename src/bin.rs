use clap::ArgMatches;
use clap_complete::{generate, Shell};
use droidnav::prelude::*;
use droidnav::{cli, dw_hierarchy, dw_listeners, dw_wtg};
use std::io;

fn main() -> DwResult<()> {
    let args = cli::droidnav().get_matches();

    match &args.subcommand() {
        Some(("hierarchy", cmd_args)) => dw_hierarchy::run(cmd_args),
        Some(("listeners", cmd_args)) => dw_listeners::run(cmd_args),
        Some(("wtg", cmd_args)) => dw_wtg::run(cmd_args),
        Some(("gen-completions", sub_args)) => subcommand_gen_completions(sub_args),
        Some((subcommand, _)) => Err(DwError::BadArguments(format!(
            "unknown subcommand '{subcommand}'"
        ))),
        None => Err(DwError::BadArguments("missing subcommand".to_string())),
    }
}

fn subcommand_gen_completions(sub_args: &ArgMatches) -> DwResult<()> {
    let generator = *sub_args
        .get_one::<Shell>("shell")
        .ok_or_else(|| DwError::BadArguments("--shell needed".to_string()))?;
    let mut cmd = cli::droidnav();
    let cmd_name = cmd.get_name().to_string();
    generate(generator, &mut cmd, cmd_name, &mut io::stdout());
    Ok(())
}
