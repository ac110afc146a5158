use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::Token},
    source::source::StreamSource,
    Position,
};

/// Outcome of compiling one translation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileStatus {
    CompiledOk,
    FailedWithErrors,
}

/// One compile unit: the input file and the artifacts of the phases run
/// so far. Only the lexical phase produces anything yet.
#[derive(Debug)]
pub struct CompileProcess {
    pub path: PathBuf,
    pub filename: Rc<String>,
    pub tokens: Vec<Token>,
}

impl CompileProcess {
    pub fn print_tokens(&self) {
        println!("token count: {}", self.tokens.len());
        for (i, token) in self.tokens.iter().enumerate() {
            println!("token {}: {}", i + 1, token);
        }
    }
}

/// Compiles one source file through the phases built so far.
pub fn compile_file(path: &Path) -> Result<CompileProcess, Error> {
    let filename = Rc::new(path.as_os_str().to_string_lossy().to_string());

    let file = File::open(path).map_err(|_| {
        Error::new(
            ErrorImpl::InputError {
                path: filename.to_string(),
            },
            Position::null(),
        )
    })?;

    // lexical analysis
    let mut source = StreamSource::new(BufReader::new(file));
    let tokens = tokenize(&mut source, Rc::clone(&filename))?;

    // parsing and code generation attach here once they exist

    Ok(CompileProcess {
        path: path.to_path_buf(),
        filename,
        tokens,
    })
}

/// Reduces a compile result to the status value reported to the caller.
pub fn status_of(result: &Result<CompileProcess, Error>) -> CompileStatus {
    match result {
        Ok(_) => CompileStatus::CompiledOk,
        Err(_) => CompileStatus::FailedWithErrors,
    }
}

/// Reports a non-fatal diagnostic and carries on.
pub fn compiler_warning(position: &Position, message: &str) {
    eprintln!(
        "{} on line {}, col {} in file {}",
        message, position.line, position.col, position.filename
    );
}
