//! User interaction operations (confirmation prompts).

use anyhow::Result;

use super::RealRuntime;

use std::io::{self, BufRead, Write};

/// Writes `prompt [y/N] ` to `output` and reads one answer line from `input`.
pub(crate) fn confirm_with_io<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let answer = line.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}

impl RealRuntime {
    pub(crate) fn confirm_impl(&self, prompt: &str) -> Result<bool> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stdin_lock = stdin.lock();
        confirm_with_io(prompt, &mut stdin_lock, &mut stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::confirm_with_io;
    use anyhow::Result;
    use std::io::Cursor;

    #[test]
    fn accepts_yes_answers() -> Result<()> {
        for answer in ["y\n", "Y\n", "yes\n", " YES \n"] {
            let mut input = Cursor::new(answer.as_bytes());
            let mut output = Vec::new();
            assert!(
                confirm_with_io("Delete book \"Dune\"?", &mut input, &mut output)?,
                "expected '{}' to confirm",
                answer
            );
        }
        Ok(())
    }

    #[test]
    fn anything_else_cancels() -> Result<()> {
        // EOF without a newline counts as an empty answer.
        for answer in ["n\n", "no\n", "\n", "delete\n", ""] {
            let mut input = Cursor::new(answer.as_bytes());
            let mut output = Vec::new();
            assert!(
                !confirm_with_io("Delete book \"Dune\"?", &mut input, &mut output)?,
                "expected '{}' to cancel",
                answer
            );
        }
        Ok(())
    }

    #[test]
    fn prompt_is_written_before_reading() -> Result<()> {
        let mut input = Cursor::new(b"n\n");
        let mut output = Vec::new();
        confirm_with_io("Delete book \"Dune\"?", &mut input, &mut output)?;
        assert_eq!(String::from_utf8(output)?, "Delete book \"Dune\"? [y/N] ");
        Ok(())
    }
}
