//! Interactive reader loop: read a line, build its forest, print it back.

use anyhow::Context;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use canopy::{printer, ForestBuilder, Scanner};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut editor = DefaultEditor::new().context("failed to start line editor")?;

    loop {
        match editor.readline("\u{03bb}> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                // A fatal lex or forest error aborts the whole run, not
                // just this line.
                let scanned = Scanner::new(&line)
                    .scan_tokens()
                    .context("fatal error during tokenization")?;
                let forest = ForestBuilder::new(scanned.tokens)
                    .build()
                    .context("fatal error building forest")?;
                print!("{}", printer::render(&forest));
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(err) => return Err(err).context("failed to read input line"),
        }
    }

    Ok(())
}
