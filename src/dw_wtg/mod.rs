use crate::prelude::*;
use clap::ArgMatches;
use dw_gui::wtg::Edge;
use dw_repo::repo::MethodUid;
use nu_ansi_term::Color;
use regex::Regex;
use std::fs::File;
use std::io::Write;

fn method_name(repo: &Repo, uid: MethodUid) -> String {
    repo.get_method(uid)
        .map_or_else(|| uid.to_string(), |method| method.descriptor().to_string())
}

fn print_edge(repo: &Repo, edge: &Edge) {
    println!("edge {}", edge.id().index());
    println!("    source window: {}", edge.source_node());
    println!("    target window: {}", edge.target_node());
    println!("    event type: {}", edge.event_type());
    println!("    event handlers:");
    for handler in edge.event_handlers() {
        println!("        {}", method_name(repo, *handler));
    }
    println!("    lifecycle callbacks:");
    for callback in edge.callbacks() {
        println!(
            "        {} on {}",
            method_name(repo, callback.event_handler()),
            callback.window()
        );
    }
    println!("    stack operations:");
    for op in edge.stack_ops() {
        let line = format!("        {op}");
        if op.is_push_op() {
            println!("{}", Color::Green.paint(&line));
        } else {
            println!("{}", Color::Red.paint(&line));
        }
    }
}

fn print_report(repo: &Repo, wtg: &Wtg) {
    match wtg.launcher_node() {
        Some(launcher) => println!("launcher node: {launcher}"),
        None => println!("launcher node: none"),
    }
    for node in wtg.nodes() {
        println!("node {}", node.window());
        println!("    in edges: {}", node.in_edges().count());
        println!("    out edges: {}", node.out_edges().count());
    }
    for edge in wtg.edges() {
        print_edge(repo, &edge);
    }
}

pub fn run(args: &ArgMatches) -> DwResult<()> {
    init_logger(args);

    let repo = load_repo(args)?;
    let facts_fname = args
        .get_one::<String>("facts")
        .ok_or_else(|| DwError::BadArguments("--facts needed".to_string()))?;
    let facts = dw_gui::open(facts_fname)?;

    let options = WtgOptions {
        implicit_back: !args.get_flag("no-implicit-back"),
        implicit_rotate: args.get_flag("implicit-rotate"),
    };
    log::debug!("wtg options: {:?}", options);
    let mut wtg = build_wtg(&repo, &facts, options)?;

    if let Some(filter) = args.get_one::<String>("filter-window") {
        let pattern = Regex::new(filter)?;
        log::debug!("filtering wtg on window pattern {:?}", pattern);
        wtg = wtg.filter_windows(|window| window.is_launcher() || pattern.is_match(window.class_name()));
        log::info!(
            "filtered wtg contains {} nodes and {} edges",
            wtg.nb_nodes(),
            wtg.nb_edges()
        );
    }

    if !args.get_flag("quiet") {
        print_report(&repo, &wtg);
    }

    if let Some(dot_filename) = args.get_one::<String>("output") {
        let mut file = File::create(dot_filename)?;
        file.write_all(wtg.to_dot().as_bytes())?;
        log::info!("dot output written in {:?}", dot_filename);
    }

    Ok(())
}
