//! # `DroidNav`
//!
//! `droidnav` is the main crate of the `DroidNav` Android GUI analysis
//! project. It extracts, from a program model of an application and a set of
//! GUI facts, the window transition graph (WTG) of the application: which
//! windows exist, and which event handlers move the user from one window to
//! another. `droidnav` acts as entry point by reexporting important structs
//! and functions from the sub-crates, most of them within the
//! `droidnav::prelude` namespace.
//!
//! ## Library basics
//!
//! The program representation is a `Repo`, filled with serialized program
//! models (the application one, and optionally a system/framework one):
//!
//! ```rust,no_run
//! use droidnav::prelude::*;
//!
//! let mut repository = Repo::new();
//! repository.register_model(&droidnav::repo::open("framework.json")?, true)?;
//! repository.register_model(&droidnav::repo::open("app.json")?, false)?;
//! repository.close_hierarchy()?;
//! println!("classes count: {}", repository.nb_classes());
//! # Ok::<(), DwError>(())
//! ```
//!
//! The window transition graph is then built from GUI facts:
//!
//! ```rust,no_run
//! use droidnav::prelude::*;
//!
//! # let repository = Repo::new();
//! let facts = droidnav::gui::open("gui.json")?;
//! let wtg = build_wtg(&repository, &facts, WtgOptions::default())?;
//! for edge in wtg.edges() {
//!     println!("{} -> {}", edge.source_node(), edge.target_node());
//! }
//! # Ok::<(), DwError>(())
//! ```
//!
//! ## Sub-crates
//!
//!  - [`dw_repo`] contains the program representation: classes, methods and
//!    classes hierarchy,
//!  - [`dw_gui`] contains the GUI analyses: listeners event handlers
//!    resolution and window transition graph construction.

mod errors;

pub mod cli;
pub mod dw_hierarchy;
pub mod dw_listeners;
pub mod dw_wtg;

pub use dw_gui as gui;
pub use dw_repo as repo;

/// Reexport module of commonly used structures and functions from `DroidNav`
/// project sub-crates:
///
/// ```rust
/// use droidnav::prelude::*;
/// ```
pub mod prelude {
    pub use crate::errors::{DwError, DwResult};

    pub use dw_gui::build_wtg;
    pub use dw_gui::event::EventType;
    pub use dw_gui::listener::{ListenerInstance, ListenerSpecification};
    pub use dw_gui::window::{Window, WindowKind};
    pub use dw_gui::wtg::{StackOperation, Wtg, WtgBuilder, WtgOptions};

    pub use dw_repo::repo::{Class, Method, Repo};

    use clap::ArgMatches;

    pub fn init_logger(args: &ArgMatches) {
        let env = env_logger::Env::new()
            .filter_or("DW_LOG", "info")
            .write_style("DW_LOG_STYLE");

        let mut builder = env_logger::Builder::from_env(env);
        if args.get_flag("verbose") {
            builder.filter_level(log::LevelFilter::Trace);
        } else if args.get_flag("debug") {
            builder.filter_level(log::LevelFilter::Debug);
        }
        if args.get_flag("ecslog") {
            builder.format(ecs_logger::format);
        }
        builder.init();
    }

    /// Builds the closed program representation from the `--system` and
    /// `--input` program models.
    pub fn load_repo(args: &ArgMatches) -> DwResult<Repo> {
        let mut repo = Repo::new();
        if let Some(sys_fname) = args.get_one::<String>("system") {
            repo.register_model(&dw_repo::open(sys_fname)?, true)?;
        }
        let input_fname = args
            .get_one::<String>("input")
            .ok_or_else(|| DwError::BadArguments("--input needed".to_string()))?;
        repo.register_model(&dw_repo::open(input_fname)?, false)?;
        repo.close_hierarchy()?;
        log::info!(
            "{} classes and {} methods loaded",
            repo.nb_classes(),
            repo.nb_methods()
        );
        Ok(repo)
    }
}
