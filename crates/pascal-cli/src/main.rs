//! Pascal tokenizer CLI

use clap::{Parser, Subcommand, ValueEnum};
use pascal_error::{DiagnosticRenderer, Diagnostics, SourceCache};
use pascal_lexer::{Lexer, LexerOptions, Token, TokenKind, TokenValue};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

/// How `lex` prints tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One token per line with its location (default)
    #[default]
    Table,
    /// JSON array of `{type, value}` objects
    Json,
}

#[derive(Parser)]
#[command(name = "pascal")]
#[command(author = "Guilherme Mendes")]
#[command(version = "0.1.0")]
#[command(about = "Pascal source tokenizer", long_about = None)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shows the tokens of a file
    Lex {
        /// Input file (`-` reads standard input)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit comment tokens instead of skipping them
        #[arg(long)]
        keep_comments: bool,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Reports lexical errors without printing tokens
    Check {
        /// Input file (`-` reads standard input)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("could not serialize tokens: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    // Diagnostics are rendered by the CLI itself; the lexer's warn events
    // only show up with --verbose.
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::ERROR
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(command: Commands) -> Result<ExitCode, CliError> {
    match command {
        Commands::Lex {
            input,
            keep_comments,
            format,
        } => {
            let source = read_source(&input)?;
            let options = LexerOptions {
                skip_comments: !keep_comments,
            };
            let (cache, tokens, diagnostics) = lex_file(&input, &source, options);

            match format {
                OutputFormat::Table => {
                    for token in &tokens {
                        println!("{}", format_token_line(token));
                    }
                    println!("\nTotal: {} tokens", tokens.len());
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&tokens)?);
                }
            }

            if !diagnostics.is_empty() {
                eprintln!("{}", diagnostics.render(&cache));
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { input } => {
            let source = read_source(&input)?;
            let (cache, tokens, diagnostics) = lex_file(&input, &source, LexerOptions::default());

            if diagnostics.is_empty() {
                println!("{}: no lexical errors ({} tokens)", display_name(&input), tokens.len());
                return Ok(ExitCode::SUCCESS);
            }

            let renderer = DiagnosticRenderer::new(&cache);
            for diag in diagnostics.iter() {
                eprintln!("{}", renderer.render(diag));
            }
            eprintln!("{} lexical error(s) found", diagnostics.len());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn display_name(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn read_source(path: &Path) -> Result<String, CliError> {
    let read_err = |source| CliError::Read {
        path: display_name(path),
        source,
    };

    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).map_err(read_err)?;
        Ok(source)
    } else {
        fs::read_to_string(path).map_err(read_err)
    }
}

fn lex_file(
    path: &Path,
    source: &str,
    options: LexerOptions,
) -> (SourceCache, Vec<Token>, Diagnostics) {
    let mut cache = SourceCache::new();
    let file_id = cache.add(display_name(path), source);

    let mut lexer = Lexer::new(source, file_id).with_options(options);
    let tokens = lexer.tokenize();
    let diagnostics = lexer.take_diagnostics();
    (cache, tokens, diagnostics)
}

fn format_token_line(token: &Token) -> String {
    let display = match (&token.kind, &token.value) {
        (TokenKind::Eof, _) => "EOF".to_string(),
        (TokenKind::String, TokenValue::Text(text)) => format!("{:?}", text),
        (_, value) => value.to_string(),
    };

    format!(
        "  {:4}:{:<3}  {:<22}  {}",
        token.span.start.line,
        token.span.start.column,
        token.kind.as_str(),
        display
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_token_line() {
        let (_, tokens, _) = lex_file(
            Path::new("t.pas"),
            "x := 'a b';",
            LexerOptions::default(),
        );

        assert_eq!(
            format_token_line(&tokens[0]),
            "     1:1    IDENTIFIER              x"
        );
        assert_eq!(
            format_token_line(&tokens[2]),
            "     1:6    STRING_LITERAL          \"a b\""
        );
        assert!(format_token_line(tokens.last().unwrap()).ends_with("EOF"));
    }

    #[test]
    fn test_lex_file_registers_source() {
        let (cache, _, diagnostics) =
            lex_file(Path::new("bad.pas"), "x := #;", LexerOptions::default());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(cache.get(0).map(|f| f.name.as_str()), Some("bad.pas"));
        assert!(diagnostics.render(&cache).contains("bad.pas:1:6"));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_source(Path::new("/definitely/not/here.pas")).unwrap_err();
        assert!(err.to_string().starts_with("could not read /definitely/not/here.pas"));
    }

    #[test]
    fn test_cli_parses_lex_flags() {
        let cli = Cli::try_parse_from(["pascal", "lex", "a.pas", "--keep-comments", "-f", "json"])
            .unwrap();
        match cli.command {
            Commands::Lex {
                keep_comments,
                format,
                ..
            } => {
                assert!(keep_comments);
                assert_eq!(format, OutputFormat::Json);
            }
            Commands::Check { .. } => panic!("expected lex"),
        }
    }
}
