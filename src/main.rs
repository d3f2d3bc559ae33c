//! gosyn - an incremental Go syntax highlighter for the terminal
//!
//! Reads a Go source file, classifies it line by line with lexical
//! state carried across lines, and writes the result to stdout with
//! ANSI colors.

mod config;
mod error;
mod render;
mod syntax;

use std::env;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use crossterm::tty::IsTty;

use config::Config;
use error::{GosynError, Result};
use render::Renderer;
use syntax::{DocumentHighlighter, Theme};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut config = Config::load();
    let mut file: Option<PathBuf> = None;
    let mut words_only = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            "--line-numbers" | "-n" => config.line_numbers = true,
            "--no-color" => config.color = false,
            "--words" | "-w" => words_only = true,
            "--theme" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| GosynError::Usage("--theme requires a file argument".into()))?;
                config.theme = Some(PathBuf::from(path));
            }
            arg if arg.starts_with('-') => {
                return Err(GosynError::Usage(format!("unknown option: {}", arg)));
            }
            arg => {
                if file.is_some() {
                    return Err(GosynError::Usage("only one file may be given".into()));
                }
                file = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    let path = file.ok_or_else(|| GosynError::Usage("no input file (try --help)".into()))?;

    let theme = match &config.theme {
        Some(path) => Theme::from_toml(&fs::read_to_string(path)?)?,
        None => Theme::default(),
    };

    let contents = fs::read_to_string(&path)?;
    let lines: Vec<&str> = contents.lines().collect();

    let mut document = DocumentHighlighter::new()?;
    document.refresh(&lines);

    if words_only {
        // Completion dictionary: keywords, builtins, and every word
        // the rule table matched in the file
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        for word in document.words() {
            writeln!(out, "{}", word)?;
        }
        out.flush()?;
        return Ok(());
    }

    // Color and truncation only apply when stdout is a terminal;
    // piped output stays clean
    let stdout = io::stdout();
    let is_tty = stdout.is_tty();

    let mut renderer = Renderer::new(theme, config.color && is_tty);
    if config.line_numbers {
        renderer = renderer.with_line_numbers(lines.len());
    }
    if is_tty {
        if let Ok((cols, _)) = crossterm::terminal::size() {
            renderer = renderer.with_max_width(cols as usize);
        }
    }

    let mut out = BufWriter::new(stdout.lock());
    for (idx, line) in lines.iter().enumerate() {
        renderer.render_line(&mut out, idx + 1, line, document.spans(idx))?;
    }
    out.flush()?;

    Ok(())
}

fn print_usage() {
    println!("gosyn {} - Go syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: gosyn [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -n, --line-numbers  Show a line-number gutter");
    println!("      --no-color      Disable colored output");
    println!("      --theme FILE    Load category styles from a TOML file");
    println!("  -w, --words         Print the completion word list and exit");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!();
    println!("Theme file keys: number, function, builtin, keyword, string,");
    println!("line-comment, block-comment. Values are a color name with");
    println!("optional attributes, e.g. keyword = \"blue bold\".");
    println!();
    println!("Settings may also be placed in ~/.gosyn.conf as key = value");
    println!("pairs: line-numbers, color, theme.");
}

fn print_version() {
    println!("gosyn {}", env!("CARGO_PKG_VERSION"));
}
