//! passgauge - password strength estimation CLI
//!
//! Estimates the strength of passwords given as arguments, piped on stdin,
//! or typed interactively.
//!
//! # Usage
//!
//! ```bash
//! # One-shot estimates
//! passgauge 'correcthorse' 'Tr0ub4dor&3'
//!
//! # Pipe candidates through
//! cat candidates.txt | passgauge --quiet
//!
//! # Machine-readable output
//! passgauge --json 'hunter2'
//!
//! # Interactive session (empty line quits)
//! passgauge
//! ```

use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use passgauge::{feedback, Estimator, Feedback, Match};

/// Estimate password strength by decomposing passwords into recognizable
/// patterns.
#[derive(Debug, Parser)]
#[command(name = "passgauge", version, about)]
struct Cli {
    /// Passwords to estimate; reads stdin when omitted.
    passwords: Vec<String>,

    /// Emit one JSON object per password instead of text.
    #[arg(long)]
    json: bool,

    /// Print only the entropy in bits, one line per password.
    #[arg(long, conflicts_with = "json")]
    quiet: bool,

    /// Include the per-match decomposition in the report.
    #[arg(long)]
    show_matches: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    password: &'a str,
    entropy: f64,
    guesses: f64,
    crack_times: Vec<(String, String)>,
    matches: &'a [Match],
    feedback: &'a Feedback,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let estimator = Estimator::default();

    if !cli.passwords.is_empty() {
        return run_all(&estimator, &cli, cli.passwords.iter().map(String::as_str));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        run_interactive(&estimator, &cli)
    } else {
        let lines: Vec<String> = stdin.lock().lines().map_while(|line| line.ok()).collect();
        run_all(&estimator, &cli, lines.iter().map(String::as_str))
    }
}

fn run_all<'a>(
    estimator: &Estimator,
    cli: &Cli,
    passwords: impl Iterator<Item = &'a str>,
) -> ExitCode {
    let mut code = ExitCode::SUCCESS;
    for password in passwords {
        if let Err(err) = report(estimator, cli, password) {
            eprintln!("error: {err}");
            code = ExitCode::FAILURE;
        }
    }
    code
}

fn run_interactive(estimator: &Estimator, cli: &Cli) -> ExitCode {
    println!("Type a password to estimate it; an empty line quits.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
        let password = line.trim_end_matches(['\r', '\n']);
        if password.is_empty() {
            break;
        }
        if let Err(err) = report(estimator, cli, password) {
            eprintln!("error: {err}");
        }
    }
    ExitCode::SUCCESS
}

fn report(estimator: &Estimator, cli: &Cli, password: &str) -> passgauge::Result<()> {
    let estimate = estimator.estimate(password)?;

    if cli.quiet {
        println!("{:.1}", estimate.entropy());
        return Ok(());
    }

    let advice = feedback::for_estimate(&estimate);
    let crack_times = estimate.crack_times(estimator.configuration());

    if cli.json {
        let report = Report {
            password,
            entropy: estimate.entropy(),
            guesses: estimate.guesses(),
            crack_times,
            matches: estimate.matches(),
            feedback: &advice,
        };
        println!(
            "{}",
            serde_json::to_string(&report).expect("report serializes")
        );
        return Ok(());
    }

    println!("password: {password}");
    println!(
        "entropy:  {:.1} bits (~{:.3e} guesses)",
        estimate.entropy(),
        estimate.guesses()
    );
    for (scenario, time) in &crack_times {
        println!("  {scenario}: {time}");
    }
    if let Some(warning) = &advice.warning {
        println!("warning:  {warning}");
    }
    for suggestion in &advice.suggestions {
        println!("tip:      {suggestion}");
    }
    if cli.show_matches {
        for m in estimate.matches() {
            println!(
                "  [{:>2}..={:>2}] {:>5.1} bits  {:?}  {:?}",
                m.start(),
                m.end(),
                m.entropy(),
                m.token(),
                m.kind(),
            );
        }
    }
    println!();
    Ok(())
}
