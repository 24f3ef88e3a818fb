//! This crate provides the GUI model analyses of the `DroidNav` project:
//! event handler resolution of listener registrations, and construction of
//! the window transition graph of an application.

pub mod errors;
pub mod event;
pub mod facts;
pub mod listener;
pub mod oracle;
pub mod window;
pub mod wtg;

#[cfg(test)]
mod testing;

use crate::errors::GuiResult;
use crate::listener::ListenerSpecification;
use crate::oracle::ProgramOracle;

pub use facts::open;

/// Builds the window transition graph of a program with the builtin
/// Android listener table.
pub fn build_wtg(
    program: &dyn ProgramOracle,
    facts: &facts::GuiFacts,
    options: wtg::WtgOptions,
) -> GuiResult<wtg::Wtg> {
    let specification = ListenerSpecification::android();
    wtg::WtgBuilder::new(program, &specification)
        .with_options(options)
        .build(facts)
}
