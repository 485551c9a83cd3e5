//! Shared driver for the `sprig` command line front end.

use sprig_parser::{parse, tokenize, SyntaxError, Token};
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

/// What to print for a parsed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Emit {
    /// One token per line: byte offset and kind.
    Tokens,
    /// The syntax tree as s-expressions, one statement per line.
    Ast,
    /// The syntax tree in its JSON wire format.
    Json,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("cannot serialize syntax tree: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn read_source(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Tokenizes and parses `source`, then renders it as requested by `emit`.
/// [`Emit::Tokens`] stops after tokenizing, so it succeeds on input the parser would reject.
pub fn render(source: &str, emit: Emit) -> Result<String, Error> {
    let tokens = tokenize(source).map_err(SyntaxError::from)?;
    let program = match emit {
        Emit::Tokens => return Ok(render_tokens(&tokens)),
        Emit::Ast | Emit::Json => parse(&tokens).map_err(SyntaxError::from)?,
    };

    log::debug!("rendering {} statements as {:?}", program.statements.len(), emit);
    if emit == Emit::Json {
        Ok(serde_json::to_string_pretty(&program)?)
    } else {
        Ok(program.to_string())
    }
}

fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| format!("{}\t{}", token.offset(), token.kind))
        .collect::<Vec<_>>()
        .join("\n")
}
