//! Main `DroidNav` binary command line arguments options.
//!
//! This module declares a function to build `clap` command line arguments
//! parser, so that it can be used from other places than the main binary,
//! such as from bash completion file generator.

use clap::{value_parser, Arg, ArgAction, Command};
use clap_complete::Shell;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

fn arg_debug() -> Arg {
    Arg::new("debug")
        .short('d')
        .long("debug")
        .action(ArgAction::SetTrue)
        .help("Activate debug mode")
}

fn arg_verbose() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .help("Activate verbose mode")
}

fn arg_ecslog() -> Arg {
    Arg::new("ecslog")
        .short('e')
        .long("ecslog")
        .action(ArgAction::SetTrue)
        .help("Output logs in ECS format")
}

fn arg_input() -> Arg {
    Arg::new("input")
        .short('i')
        .long("input")
        .action(ArgAction::Set)
        .required(true)
        .help("Application program model (json)")
}

fn arg_system() -> Arg {
    Arg::new("system")
        .short('s')
        .long("system")
        .action(ArgAction::Set)
        .help("Additional system/framework program model (json)")
}

fn arg_facts() -> Arg {
    Arg::new("facts")
        .short('f')
        .long("facts")
        .action(ArgAction::Set)
        .required(true)
        .help("GUI facts file (json)")
}

fn arg_output(help: &str) -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .action(ArgAction::Set)
        .help(help.to_string())
}

fn arg_filter_class() -> Arg {
    Arg::new("filter-class")
        .long("filter-class")
        .action(ArgAction::Set)
        .help("Class(es) regex filter")
}

fn arg_filter_window() -> Arg {
    Arg::new("filter-window")
        .long("filter-window")
        .action(ArgAction::Set)
        .help("Window class(es) regex filter")
}

#[must_use]
pub fn droidnav() -> Command {
    Command::new(NAME)
        .version(VERSION)
        .author(AUTHORS)
        .about(DESCRIPTION)
        .subcommand(hierarchy())
        .subcommand(listeners())
        .subcommand(wtg())
        .subcommand(
            Command::new("gen-completions")
                .about("Generates completions file")
                .arg(
                    Arg::new("shell")
                        .short('s')
                        .long("shell")
                        .action(ArgAction::Set)
                        .value_parser(value_parser!(Shell))
                        .required(true)
                        .help("Shell type for completion generation"),
                ),
        )
}

#[must_use]
pub fn hierarchy() -> Command {
    Command::new("hierarchy")
        .bin_name("dw-hierarchy")
        .version(VERSION)
        .author(AUTHORS)
        .about("Generates classes hierarchy graph")
        .arg(arg_debug())
        .arg(arg_verbose())
        .arg(arg_ecslog())
        .arg(arg_input())
        .arg(arg_system())
        .arg(arg_output("Output dot file"))
        .arg(arg_filter_class())
}

#[must_use]
pub fn listeners() -> Command {
    Command::new("listeners")
        .bin_name("dw-listeners")
        .version(VERSION)
        .author(AUTHORS)
        .about("Resolves the event handlers of listener registrations")
        .arg(arg_debug())
        .arg(arg_verbose())
        .arg(arg_ecslog())
        .arg(arg_input())
        .arg(arg_system())
        .arg(arg_facts())
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print resolved listeners as json"),
        )
}

#[must_use]
pub fn wtg() -> Command {
    Command::new("wtg")
        .bin_name("dw-wtg")
        .version(VERSION)
        .author(AUTHORS)
        .about("Builds the window transition graph")
        .arg(arg_debug())
        .arg(arg_verbose())
        .arg(arg_ecslog())
        .arg(arg_input())
        .arg(arg_system())
        .arg(arg_facts())
        .arg(arg_output("Output dot file"))
        .arg(arg_filter_window())
        .arg(
            Arg::new("no-implicit-back")
                .long("no-implicit-back")
                .action(ArgAction::SetTrue)
                .help("Do not add back button transitions"),
        )
        .arg(
            Arg::new("implicit-rotate")
                .long("implicit-rotate")
                .action(ArgAction::SetTrue)
                .help("Add screen rotation transitions"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Do not print the graph report"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_consistent() {
        droidnav().debug_assert();
        hierarchy().debug_assert();
        listeners().debug_assert();
        wtg().debug_assert();
    }

    #[test]
    fn wtg_arguments() {
        let args = wtg()
            .try_get_matches_from(["dw-wtg", "-i", "app.json", "-f", "gui.json", "--implicit-rotate"])
            .unwrap();
        assert!(args.get_flag("implicit-rotate"));
        assert!(!args.get_flag("no-implicit-back"));
        assert_eq!(args.get_one::<String>("facts").map(String::as_str), Some("gui.json"));
        assert!(wtg().try_get_matches_from(["dw-wtg", "-i", "app.json"]).is_err());
    }
}
