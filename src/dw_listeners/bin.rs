use droidnav::prelude::DwResult;
use droidnav::{cli, dw_listeners};

fn main() -> DwResult<()> {
    let args = cli::listeners().get_matches();
    dw_listeners::run(&args)
}
