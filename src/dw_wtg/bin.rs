use droidnav::prelude::DwResult;
use droidnav::{cli, dw_wtg};

fn main() -> DwResult<()> {
    let args = cli::wtg().get_matches();
    dw_wtg::run(&args)
}
