use clap::Parser;
use log::{debug, info};
use minipas::utils::config::cli::{EXIT_DIAGNOSTICS, EXIT_IO_FAILURE};
use minipas::{analyze, read, Diagnostics, FrontendResult, ParseOutcome, Program, TokenRecorder};
use std::{path::PathBuf, process::ExitCode, time::Instant};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Front end for a small Pascal-like language",
    long_about = "Front end for a small Pascal-like language.\n\
                 Scans, parses and semantically checks a source file, reporting every\n\
                 lexical, syntax and semantic problem found with its position.\n\
                 \n\
                 Example usage:\n\
                 minipas input.pas                   # Check a file\n\
                 minipas input.pas --show-ast        # Print the parsed program\n\
                 minipas input.pas --tokens          # Print tokens and comments in source order\n\
                 minipas input.pas --timing          # Show per-phase timing\n\
                 minipas input.pas --analyze-broken  # Run semantic checks even after syntax errors\n\
                 \n\
                 RUST_LOG=trace shows the scanner and parser at work."
)]
struct Cli {
    // The path to the file to check
    path: PathBuf,

    // Show AST after parsing
    #[arg(long)]
    show_ast: bool,

    // Print the token stream with comments interleaved
    #[arg(long)]
    tokens: bool,

    // Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    // Show per-phase timing
    #[arg(short, long)]
    timing: bool,

    // Run semantic analysis even when the parse reported errors
    #[arg(long)]
    analyze_broken: bool,
}

#[derive(Debug, Default)]
struct CheckStats {
    parse_time: f64,
    semantic_time: Option<f64>,
    total_time: f64,
    token_count: usize,
    comment_count: usize,
    procedure_count: usize,
}

fn count_procedures(program: &Program) -> usize {
    program
        .procedures
        .iter()
        .map(|procedure| 1 + count_procedures(procedure))
        .sum()
}

// Scanning runs inside the parser, so both are timed together
fn parsing_phase(
    source: &str,
    diagnostics: &mut Diagnostics,
    recorder: &mut TokenRecorder,
    stats: &mut CheckStats,
    verbose: bool,
) -> ParseOutcome {
    let parse_start = Instant::now();
    let outcome = minipas::parse(source, diagnostics, Some(&mut *recorder));
    stats.parse_time = parse_start.elapsed().as_secs_f64();
    stats.token_count = recorder.tokens.len();
    stats.comment_count = recorder.comments.len();
    stats.procedure_count = count_procedures(&outcome.program);

    if verbose {
        println!("Parsing completed in {:.3}s", stats.parse_time);
        println!(
            "  {} tokens, {} comments, {} procedures",
            stats.token_count, stats.comment_count, stats.procedure_count
        );
    }

    outcome
}

fn semantic_phase(program: Program, diagnostics: &mut Diagnostics, stats: &mut CheckStats, verbose: bool) -> Program {
    let semantic_start = Instant::now();
    let before = diagnostics.len();
    let program = analyze(program, &mut *diagnostics);
    let elapsed = semantic_start.elapsed().as_secs_f64();
    stats.semantic_time = Some(elapsed);

    if verbose {
        println!("Semantic analysis completed in {:.3}s", elapsed);
        println!("  {} new diagnostics", diagnostics.len() - before);
    }

    program
}

fn check(args: &Cli) -> FrontendResult<(Diagnostics, CheckStats)> {
    let start_time = Instant::now();
    let mut stats = CheckStats::default();
    let mut diagnostics = Diagnostics::new();
    let mut recorder = TokenRecorder::new();

    if args.verbose {
        println!("Checking {}", args.path.display());
    }

    let source = read(&args.path)?;
    debug!("read {} bytes from {}", source.len(), args.path.display());

    let outcome = parsing_phase(&source, &mut diagnostics, &mut recorder, &mut stats, args.verbose);

    if args.tokens {
        println!("\nTokens:");
        for token in recorder.interleaved() {
            println!("  {}", token);
        }
    }

    let mut program = outcome.program;
    if !outcome.had_error || args.analyze_broken {
        program = semantic_phase(program, &mut diagnostics, &mut stats, args.verbose);
    } else {
        info!("skipping semantic analysis: the parse reported errors");
    }

    if args.show_ast {
        println!("\nAbstract Syntax Tree:");
        println!("{}", program);
        if args.verbose {
            println!("{:#?}", program);
        }
    }

    stats.total_time = start_time.elapsed().as_secs_f64();
    Ok((diagnostics, stats))
}

fn print_stats(stats: &CheckStats) {
    println!("\nTiming:");
    println!("  Scanning + parsing   {:>8.3}s", stats.parse_time);
    match stats.semantic_time {
        Some(time) => println!("  Semantic analysis    {:>8.3}s", time),
        None => println!("  Semantic analysis     skipped"),
    }
    println!("  Total                {:>8.3}s", stats.total_time);
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match check(&args) {
        Ok((diagnostics, stats)) => {
            let path = args.path.display().to_string();
            for diagnostic in diagnostics.sorted() {
                eprintln!("{}", diagnostic.render(&path));
            }

            if args.timing {
                print_stats(&stats);
            }

            if diagnostics.has_errors() {
                ExitCode::from(EXIT_DIAGNOSTICS)
            } else {
                if args.verbose {
                    println!("No errors found.");
                }
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_IO_FAILURE)
        }
    }
}
