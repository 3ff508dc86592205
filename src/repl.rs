//! The read-evaluate-print loop behind the `treecalc` binary. It is generic over its
//! input and outputs such that it can be driven by anything that reads lines.
//!
//! ```rust
//! use std::io::Cursor;
//! use treecalc::repl::{run, ReplConfig};
//!
//! let config = ReplConfig { banner: false, ..ReplConfig::default() };
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! run(&config, Cursor::new("2 + 3 * 4\n1 / 0\nquit\n7\n"), &mut out, &mut err).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "Result: 14\n");
//! assert_eq!(String::from_utf8(err).unwrap(), "Error: division by zero\n");
//! ```
use crate::{eval_str, ExResult};
use std::io::{self, BufRead, Write};

pub const BANNER: [&str; 2] = [
    "Treecalc expression calculator",
    "Enter an expression (e.g., 2 + 3 * (4 - 1)) or 'quit' to exit.",
];

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ReplConfig {
    /// A line equal to this word ends the loop.
    pub quit_word: String,
    /// Written before each line is read.
    pub prompt: Option<String>,
    /// Whether to greet with [`BANNER`](BANNER).
    pub banner: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            quit_word: "quit".to_string(),
            prompt: None,
            banner: true,
        }
    }
}

/// Parses and evaluates one line in double precision.
pub fn eval_line(line: &str) -> ExResult<f64> {
    eval_str::<f64>(line)
}

/// Writes `Result: <value>` to `out` or `Error: <message>` to `err`.
pub fn report<W: Write, E: Write>(
    result: &ExResult<f64>,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    match result {
        Ok(x) => writeln!(out, "Result: {}", x),
        Err(e) => writeln!(err, "Error: {}", e),
    }
}

/// Reads lines until end of input or until a line equals the quit word. Parse and
/// evaluation errors are reported and the loop continues.
///
/// # Errors
///
/// Only I/O errors of the input or the outputs end the loop early.
///
pub fn run<R: BufRead, W: Write, E: Write>(
    config: &ReplConfig,
    mut input: R,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    if config.banner {
        for line in BANNER {
            writeln!(out, "{}", line)?;
        }
    }
    let mut buffer = String::new();
    loop {
        if let Some(prompt) = &config.prompt {
            out.write_all(prompt.as_bytes())?;
            out.flush()?;
        }
        buffer.clear();
        if input.read_line(&mut buffer)? == 0 {
            break;
        }
        let line = buffer.trim();
        if line == config.quit_word {
            break;
        }
        report(&eval_line(line), out, err)?;
    }
    out.flush()
}

#[cfg(test)]
mod test {
    use super::{eval_line, report, run, ReplConfig, BANNER};
    use crate::{EvalError, ExError};
    use std::io::Cursor;

    fn run_str(config: &ReplConfig, input: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(config, Cursor::new(input), &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_banner_and_prompt() {
        let (out, err) = run_str(&ReplConfig::default(), "quit\n");
        assert_eq!(out, format!("{}\n{}\n", BANNER[0], BANNER[1]));
        assert!(err.is_empty());

        let config = ReplConfig {
            prompt: Some("> ".to_string()),
            banner: false,
            ..ReplConfig::default()
        };
        let (out, _) = run_str(&config, "1+1\n");
        // the last prompt is followed by end of input
        assert_eq!(out, "> Result: 2\n> ");
    }

    #[test]
    fn test_quit_word() {
        let config = ReplConfig {
            quit_word: "exit".to_string(),
            banner: false,
            ..ReplConfig::default()
        };
        let (out, err) = run_str(&config, "0.5*4\r\n  exit  \n3\n");
        assert_eq!(out, "Result: 2\n");
        assert!(err.is_empty());
        let (out, err) = run_str(&config, "quit\n");
        assert!(out.is_empty());
        assert!(err.starts_with("Error: how to parse the beginning of quit"));
    }

    #[test]
    fn test_eval_line() {
        assert_eq!(eval_line("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(
            eval_line("5 / 0"),
            Err(ExError::Eval(EvalError::DivisionByZero))
        );
        let mut out = Vec::new();
        let mut err = Vec::new();
        report(&eval_line("   "), &mut out, &mut err).unwrap();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "Error: cannot parse empty string\n");
    }

    #[test]
    fn test_loop_continues_after_error() {
        let config = ReplConfig {
            banner: false,
            ..ReplConfig::default()
        };
        let (out, err) = run_str(&config, "1/0\n2+2\nquit\n");
        assert_eq!(err, "Error: division by zero\n");
        assert_eq!(out, "Result: 4\n");

        let too_deep = vec!["1"; 200_000].join("+");
        let (out, err) = run_str(&config, &format!("{}\n7 - 2\nquit\n", too_deep));
        assert!(err.starts_with("Error: expression is nested deeper than"));
        assert_eq!(err.lines().count(), 1);
        assert_eq!(out, "Result: 5\n");
    }
}
