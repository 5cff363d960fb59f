use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Line-oriented terminal: prompts on the output, reads from the input
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show `<prompt> > ` and read one line without its terminator.
    /// Returns `None` at end of input.
    ///
    /// A line that is not valid UTF-8 is reported and skipped, and the prompt
    /// is shown again.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        loop {
            write!(self.output, "{prompt} > ")?;
            self.output.flush()?;

            buf.clear();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            while matches!(buf.last(), Some(b'\n' | b'\r')) {
                buf.pop();
            }

            match String::from_utf8(std::mem::take(&mut buf)) {
                Ok(line) => return Ok(Some(line)),
                Err(e) => {
                    tracing::warn!("Skipping input line: {}", e.utf8_error());
                    self.say("ERROR: input is not valid UTF-8")?;
                }
            }
        }
    }

    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
