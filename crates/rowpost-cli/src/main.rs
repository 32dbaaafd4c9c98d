use rowpost_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible.
    logging::init_logging();

    // Parse CLI and run.
    if let Err(err) = cli::run_from_args() {
        eprintln!("rowpost error: {:#}", err);
        std::process::exit(1);
    }
}
