extern crate clap;
use std::time::Duration;

use clap::{App, Arg};
use log::info;
use xwords::{
    load_crossword,
    render::Rendered,
    BacktrackFiller, Filler, SolverConfig,
};

fn main() -> Result<(), String> {
    env_logger::init();

    let matches = App::new("xwords")
        .about("Fill a crossword grid from a word list")
        .arg(
            Arg::with_name("structure")
                .value_name("STRUCTURE")
                .help("Grid file: one line per row, '_' marks a fillable cell")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("words")
                .value_name("WORDS")
                .help("Word list: one word per line, or a .json array/object")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("max-steps")
                .short("s")
                .long("max-steps")
                .value_name("STEPS")
                .help("Give up after this many search steps"),
        )
        .arg(
            Arg::with_name("timeout-ms")
                .short("t")
                .long("timeout-ms")
                .value_name("MS")
                .help("Give up after this many milliseconds"),
        )
        .arg(
            Arg::with_name("no-inference")
                .long("no-inference")
                .help("Do not assign slots that propagation narrows to one word")
                .takes_value(false),
        )
        .get_matches();

    let mut config = SolverConfig::default().with_inference(!matches.is_present("no-inference"));
    if let Some(steps) = matches.value_of("max-steps") {
        let steps = steps
            .parse()
            .map_err(|e| format!("Failed to parse max-steps: {}", e))?;
        config = config.with_max_steps(steps);
    }
    if let Some(ms) = matches.value_of("timeout-ms") {
        let ms = ms
            .parse()
            .map_err(|e| format!("Failed to parse timeout-ms: {}", e))?;
        config = config.with_timeout(Duration::from_millis(ms));
    }

    let structure = matches.value_of("structure").unwrap_or_default();
    let words = matches.value_of("words").unwrap_or_default();
    let crossword = load_crossword(structure, words).map_err(|e| e.to_string())?;
    info!(
        "loaded {} slots and {} words",
        crossword.variable_count(),
        crossword.words().len()
    );

    let mut filler = BacktrackFiller::with_config(config);
    let output = filler.fill(&crossword).map_err(|e| e.to_string())?;

    match output {
        Some(assignment) => print!("{}", Rendered::new(&crossword, &assignment)),
        None => println!("No solution."),
    }

    let stats = filler.stats();
    info!(
        "{} steps, {} values tried, {} backtracks, {} revisions in {}ms",
        stats.steps,
        stats.values_tried,
        stats.backtracks,
        stats.propagation.revisions,
        stats.elapsed.as_millis()
    );
    Ok(())
}
