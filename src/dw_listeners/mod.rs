use crate::prelude::*;
use clap::ArgMatches;
use dw_repo::repo::MethodUid;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Serialize)]
struct ListenerReport<'a> {
    window: &'a Window,
    listener: &'a str,
    event: EventType,
    handlers: Vec<String>,
    inline_handlers: Vec<String>,
}

fn descriptors(repo: &Repo, methods: &BTreeSet<MethodUid>) -> Vec<String> {
    methods
        .iter()
        .map(|uid| {
            repo.get_method(*uid)
                .map_or_else(|| uid.to_string(), |method| method.descriptor().to_string())
        })
        .collect()
}

pub fn run(args: &ArgMatches) -> DwResult<()> {
    init_logger(args);

    let repo = load_repo(args)?;
    let facts_fname = args
        .get_one::<String>("facts")
        .ok_or_else(|| DwError::BadArguments("--facts needed".to_string()))?;
    let facts = dw_gui::open(facts_fname)?;

    let specification = ListenerSpecification::android();
    let instances = WtgBuilder::new(&repo, &specification).resolve_listeners(&facts)?;

    let reports: Vec<ListenerReport> = instances
        .iter()
        .map(|instance| ListenerReport {
            window: instance.window(),
            listener: instance.listener_class(),
            event: instance.event_type(),
            handlers: descriptors(&repo, instance.event_handler_methods()),
            inline_handlers: descriptors(&repo, instance.inline_event_handler_methods()),
        })
        .collect();

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in reports {
        println!("{} {} on {}", report.event, report.listener, report.window);
        for handler in report.handlers {
            println!("    {handler}");
        }
        for handler in report.inline_handlers {
            println!("    {handler} (inline)");
        }
    }
    Ok(())
}
