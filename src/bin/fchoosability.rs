use std::process::ExitCode;

use clap::Parser;

use fchoosability::cli::{self, Cli};

/// Exhaustively decides f-choosability for every graph read from stdin or a
/// file, in fgraph6 format.
fn main() -> ExitCode {
    env_logger::init();

    let args = Cli::parse();
    if let Err(e) = args.validate() {
        eprintln!("error: {}", e);
        return ExitCode::from(2);
    }

    let input = match cli::read_input(args.input.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error reading input: {}", e);
            return ExitCode::from(2);
        }
    };

    let stdout = std::io::stdout();
    let mut perf_file = args
        .perf_file
        .as_deref()
        .map(|path| std::fs::File::create(path).unwrap_or_else(|e| panic!("couldn't create {}: {}", path, e)));

    let fchoosable = cli::run(
        &args,
        &input,
        stdout.lock(),
        perf_file.as_mut().map(|f| f as &mut dyn std::io::Write),
    );

    // Historical convention: 1 means the last graph was proven f-choosable.
    if fchoosable {
        ExitCode::from(1)
    } else {
        ExitCode::from(0)
    }
}
