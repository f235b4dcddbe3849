use urllex::cli::CliCommand;

fn main() {
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("urllex error: {:#}", err);
        std::process::exit(1);
    }
}
