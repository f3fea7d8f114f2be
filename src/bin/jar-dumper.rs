use std::io::{stdout, BufWriter};
use std::process::ExitCode;

use jar_dumper::cli::{self, Invocation};
use jar_dumper::error::EXIT_USAGE;
use jar_dumper::pipeline;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(Invocation::Run(cli)) => cli,
        Ok(Invocation::Help) => {
            eprintln!("{}", cli::usage());
            return ExitCode::from(EXIT_USAGE);
        }
        Err(error) => {
            // clap writes usage errors to stderr
            let _ = error.print();
            return ExitCode::from(EXIT_USAGE);
        }
    };
    setup_logging(cli.verbose);
    debug!("{:?}", cli);

    let out = BufWriter::new(stdout().lock());
    match pipeline::run(&cli.archive, &cli.options(), out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            debug!("{:?}", error);
            eprintln!("error: {}", error);
            ExitCode::from(error.exit_code())
        }
    }
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
