//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::io::{BufRead, Write};

use log::info;

use super::TextSource;
use crate::circuit::{Chain, Transfer, SEED};
use crate::codec;
use crate::config::EditorConfig;
use crate::error::{HlpError, Result};
use crate::session::{EditCommand, EditSession};

const EDIT_HELP: &str = "\
commands:
  insert N                  add a layer after layer N
  remove N                  remove the layer after layer N
  bump N side|back +|-      step a gate reference
  toggle N side|back        flip a gate between compare and subtract
  load TEXT                 replace the chain
  export                    print the chain text
  output                    print the transfer table
  json                      print the chain as JSON
  quit";

/// Resolve the chain text from an argument or a file
pub fn read_text(source: &TextSource) -> Result<String> {
    if let Some(path) = &source.file {
        if !path.exists() {
            return Err(HlpError::FileNotFound { path: path.clone() });
        }
        let text = fs::read_to_string(path)?;
        return Ok(text.trim_end_matches(&['\n', '\r'][..]).to_string());
    }
    source.text.clone().ok_or_else(|| HlpError::InvalidCommand {
        input: String::new(),
        reason: "provide chain text or --file".to_string(),
    })
}

/// Render the transfer vector as hex digits, optionally under the input row
pub fn format_table(output: &Transfer, show_inputs: bool) -> String {
    let row = |values: &Transfer| {
        values
            .iter()
            .map(|v| format!("{:X}", v))
            .collect::<Vec<_>>()
            .join(" ")
    };

    if show_inputs {
        format!("in : {}\nout: {}", row(&SEED), row(output))
    } else {
        row(output)
    }
}

fn decode_or_report(text: &str) -> Result<Chain> {
    codec::decode(text).map_err(|err| {
        println!("{} {}", err.banner(), text);
        HlpError::from(err)
    })
}

/// Print the transfer table of a chain.
pub fn eval(text: &str, config: &EditorConfig) -> Result<()> {
    info!("Evaluating: {}", text);

    let mut chain = decode_or_report(text)?;
    println!("{}", format_table(chain.output(), config.show_inputs));

    Ok(())
}

/// Print the canonical text of a chain.
pub fn normalize(text: &str) -> Result<()> {
    let chain = decode_or_report(text)?;
    println!("{}", codec::encode(&chain));
    Ok(())
}

/// Print a chain as pretty JSON.
pub fn json(text: &str) -> Result<()> {
    let chain = decode_or_report(text)?;
    println!("{}", serde_json::to_string_pretty(&chain)?);
    Ok(())
}

/// Validate candidate texts, one result line each.
///
/// Returns the number of texts that failed to decode.
pub fn check<W: Write>(texts: &[String], out: &mut W) -> Result<usize> {
    let mut failures = 0;
    for text in texts {
        match codec::decode(text) {
            Ok(chain) => writeln!(out, "ok {}", codec::encode(&chain))?,
            Err(err) => {
                failures += 1;
                writeln!(out, "{} {}", err.banner(), text)?;
            }
        }
    }
    Ok(failures)
}

/// Run the line-oriented editor until `quit` or end of input.
pub fn edit<R: BufRead, W: Write>(
    initial: Option<&str>,
    config: EditorConfig,
    input: R,
    out: &mut W,
) -> Result<()> {
    let (mut session, rejected) = EditSession::open(initial, config);
    if let (Some(err), Some(text)) = (rejected, initial) {
        writeln!(out, "{} {}", err.banner(), text)?;
    }
    let show_inputs = session.config().show_inputs;
    writeln!(out, "{}", format_table(&session.output(), show_inputs))?;

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => writeln!(out, "{}", EDIT_HELP)?,
            "export" => writeln!(out, "{}", session.export_text())?,
            "output" => writeln!(out, "{}", format_table(&session.output(), show_inputs))?,
            "json" => writeln!(out, "{}", serde_json::to_string_pretty(session.chain())?)?,
            _ => match line.parse::<EditCommand>() {
                Ok(command) => {
                    let text = match &command {
                        EditCommand::LoadFromText { text } => Some(text.clone()),
                        _ => None,
                    };
                    match session.apply(command) {
                        Ok(_) => {
                            writeln!(out, "{}", format_table(&session.output(), show_inputs))?
                        }
                        Err(err) => {
                            writeln!(out, "{} {}", err.banner(), text.unwrap_or_default())?
                        }
                    }
                }
                Err(err) => {
                    writeln!(out, "{}", err)?;
                    for hint in err.recovery_suggestions() {
                        writeln!(out, "  {}", hint)?;
                    }
                }
            },
        }
    }

    Ok(())
}
