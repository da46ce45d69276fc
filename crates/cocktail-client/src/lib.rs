//! cocktail-client
//!
//! Interactive terminal client for the cocktail tool server. Every question
//! is one stateless `tools/call` request; the streamed reply is read until
//! the first `data:` frame.
pub mod error;
pub mod sender;
pub mod stream;

use std::io::{BufRead, Write};

use tracing::debug;

pub use error::ClientError;
pub use sender::{HttpSender, QuestionSender};
pub use stream::read_answer;

/// Reads questions from `input` until `exit` or end of input, printing the
/// conversation to `output`. Request failures are reported and the loop
/// goes on; only I/O errors on the terminal itself end it early.
pub async fn run_loop<R, W, S>(input: &mut R, output: &mut W, sender: &S) -> std::io::Result<()>
where
    R: BufRead,
    W: Write + Send,
    S: QuestionSender + ?Sized,
{
    writeln!(output, "Connecting to the cocktail server (stateless mode) at: {}", sender.endpoint())?;
    writeln!(output, "Type your question or 'exit' to quit.")?;
    loop {
        write!(output, "\nYou: ")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            debug!("end of input");
            break;
        }
        let query = line.trim_end_matches(['\r', '\n']);
        if query.eq_ignore_ascii_case("exit") { break; }

        writeln!(output, "Bot is thinking...")?;
        match sender.ask(query, output).await {
            Ok(answer) => writeln!(output, "Cocktail Bot: {answer}")?,
            Err(e) => report(output, &e)?,
        }
    }
    Ok(())
}

fn report<W: Write>(output: &mut W, error: &ClientError) -> std::io::Result<()> {
    match error {
        ClientError::Status { code, body } => {
            writeln!(output, "\nERROR: The server returned HTTP error {code}")?;
            writeln!(output, "Error body: {body}")
        }
        ClientError::Connection(e) => {
            writeln!(output, "\nERROR: Could not connect to the server.")?;
            writeln!(output, "Error details: {e}")
        }
        other => writeln!(output, "\nAn unexpected error occurred: {other}"),
    }
}
