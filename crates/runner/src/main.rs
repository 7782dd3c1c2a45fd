use bazaar_runner::{Command, HELP, execute, init_logging, parse_args};

fn main() {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Help) => {
            eprint!("{}", HELP);
            return;
        }
        Ok(Command::Run(options)) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprint!("{}", HELP);
            std::process::exit(1);
        }
    };

    init_logging(options.verbose);
    log::info!(
        "Starting market simulation: {} agents, {} iterations, seed {:?}",
        options.market.total_agents(),
        options.market.iterations,
        options.market.seed
    );

    let stdout = std::io::stdout();
    if let Err(e) = execute(&options, &mut stdout.lock()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
