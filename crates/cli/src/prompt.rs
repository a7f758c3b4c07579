//! Interactive confirmation prompts

use inquire::{InquireError, Text};
use rightsize_lib::gate::is_yes;
use rightsize_lib::{Confirmer, GateError};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::debug;

/// Asks the operator; only a typed `yes` confirms
///
/// On a terminal the question is an inquire prompt. When stdin is piped the
/// answer is read as one plain line, so `printf 'yes\nno\n' | kube-rightsize
/// --inplace-update` works.
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&mut self, question: &str) -> Result<bool, GateError> {
        if !io::stdin().is_terminal() {
            return read_line_answer(question, &mut io::stdin().lock(), &mut io::stderr());
        }
        interpret(Text::new(question).prompt())
    }
}

fn input_error(e: io::Error) -> GateError {
    GateError::Input(e.to_string())
}

/// Write `question` to `out` and read one answer line from `input`
///
/// End of input counts as "no".
fn read_line_answer<R, W>(question: &str, input: &mut R, out: &mut W) -> Result<bool, GateError>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{}", question).map_err(input_error)?;
    out.flush().map_err(input_error)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(input_error)?;
    writeln!(out).map_err(input_error)?;

    if read == 0 {
        debug!("No answer on stdin, treating as no");
        return Ok(false);
    }
    Ok(is_yes(&line))
}

/// Map an inquire result onto the gate: Esc declines, Ctrl-C aborts the run
fn interpret(result: Result<String, InquireError>) -> Result<bool, GateError> {
    match result {
        Ok(answer) => Ok(is_yes(&answer)),
        Err(InquireError::OperationCanceled) => Ok(false),
        Err(InquireError::OperationInterrupted) => Err(GateError::Interrupted),
        Err(e) => Err(GateError::Input(e.to_string())),
    }
}
