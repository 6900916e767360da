//! JSON I/O handling for CLI
//!
//! - Input: one JSON document via stdin
//! - Output: one JSON object per line via stdout

use std::io::{self, Read, Write};

use serde::Serialize;
use serde_json::{json, Value};

use crate::validation::ValidationErrorMap;

use super::errors::{CliError, CliResult};

/// Read a JSON document from a reader
pub fn read_document<R: Read>(reader: &mut R) -> CliResult<Value> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(serde_json::from_str(&input)?)
}

/// Read a JSON document from stdin
pub fn read_request() -> CliResult<Value> {
    read_document(&mut io::stdin().lock())
}

/// Success line: `{"status":"ok","data":...}`
pub fn accepted_line<T: Serialize>(data: &T) -> CliResult<Value> {
    Ok(json!({
        "status": "ok",
        "data": serde_json::to_value(data)?
    }))
}

/// Rejection line: `{"status":"rejected","errors":{field: message}}`
pub fn rejected_line(errors: &ValidationErrorMap) -> CliResult<Value> {
    Ok(json!({
        "status": "rejected",
        "errors": serde_json::to_value(errors)?
    }))
}

/// Write one JSON line to stdout
pub fn write_line(line: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, line)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
