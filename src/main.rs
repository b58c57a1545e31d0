use clap::Parser;
use j2check::cli::Cli;
use j2check::config::HarnessConfig;
use j2check::invoke::SubjectProcess;
use j2check::output::{self, ListResult, RunSummary};
use j2check::runner::{HarnessError, RunMode, Runner};

/// Exit status for configuration, discovery and spawn errors
const FATAL_EXIT: i32 = 2;

fn main() {
    // Logs go to stderr so stdout only carries the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(FATAL_EXIT);
        }
    }
}

fn run(cli: Cli) -> Result<i32, HarnessError> {
    let config = HarnessConfig::from_cli(&cli)?;
    let subject = SubjectProcess::new(&config.subject);
    let runner = Runner::new(config, subject);

    if cli.list {
        let plan = runner.plan()?;
        if cli.json {
            output::print_json(&ListResult::new(&plan));
        } else {
            print!("{}", output::render_list(&plan));
        }
        return Ok(0);
    }

    let mode = match cli.test {
        Some(path) => RunMode::Single(path),
        None => RunMode::Suite,
    };
    tracing::debug!(subject = %runner.config().subject.display(), ?mode, "starting run");

    let report = runner.run(&mode)?;
    if cli.json {
        output::print_json(&RunSummary::new(&report));
    } else {
        print!("{}", output::render_report(&report));
    }
    Ok(report.exit_code())
}
