use droidnav::prelude::DwResult;
use droidnav::{cli, dw_hierarchy};

fn main() -> DwResult<()> {
    let args = cli::hierarchy().get_matches();
    dw_hierarchy::run(&args)
}
