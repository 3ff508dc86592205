use clap::Parser;
use std::io::{self, Write};
use std::process;
use treecalc::repl::{self, ReplConfig};

/// Evaluates arithmetic expressions with `+`, `-`, `*`, `/`, and parentheses, line by
/// line from standard input or once from the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Evaluate this expression and exit instead of reading lines
    #[arg(short, long)]
    eval: Option<String>,

    /// Do not print the greeting
    #[arg(short, long)]
    quiet: bool,

    /// Prompt printed before each line is read
    #[arg(long)]
    prompt: Option<String>,

    /// Line that ends the loop
    #[arg(long, default_value = "quit")]
    quit_word: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    if let Some(expr) = cli.eval {
        let result = repl::eval_line(&expr);
        repl::report(&result, &mut stdout, &mut stderr)?;
        stdout.flush()?;
        if result.is_err() {
            process::exit(1);
        }
        return Ok(());
    }

    let config = ReplConfig {
        quit_word: cli.quit_word,
        prompt: cli.prompt,
        banner: !cli.quiet,
    };
    repl::run(&config, io::stdin().lock(), &mut stdout, &mut stderr)?;
    Ok(())
}
