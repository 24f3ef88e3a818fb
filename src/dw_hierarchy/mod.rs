use crate::prelude::*;
use clap::ArgMatches;
use regex::Regex;
use std::fs::File;
use std::io::Write;

pub fn run(args: &ArgMatches) -> DwResult<()> {
    init_logger(args);

    let repo = load_repo(args)?;
    let missing = repo.iter_missing_classes().count();
    if missing > 0 {
        log::info!("{} classes referenced but not defined", missing);
    }

    let class_pattern = args
        .get_one::<String>("filter-class")
        .map(|r| Regex::new(r))
        .transpose()?;
    if let Some(dot_filename) = args.get_one::<String>("output") {
        let dot = match &class_pattern {
            Some(pattern) => {
                log::debug!("filtering hierarchy on class pattern {:?}", pattern);
                repo.hierarchy()
                    .to_dot_filtered(|class| pattern.is_match(class.name()))
            }
            None => repo.hierarchy().to_dot(),
        };
        let mut file = File::create(dot_filename)?;
        file.write_all(dot.as_bytes())?;
        log::info!("dot output written in {:?}", dot_filename);
    } else {
        for class in repo.iter_classes() {
            if class_pattern
                .as_ref()
                .map_or(true, |pattern| pattern.is_match(class.name()))
            {
                let parents: Vec<&str> = repo
                    .hierarchy()
                    .all_parents(class)
                    .into_iter()
                    .filter(|parent| parent.uid() != class.uid())
                    .map(|parent| parent.name())
                    .collect();
                println!("{class}: {}", parents.join(", "));
            }
        }
    }
    Ok(())
}
