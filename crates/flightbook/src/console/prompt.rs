//! Line-oriented prompting over any input source.

use std::io::{BufRead, Write};

use tracing::trace;

use crate::error::{Error, Result};

/// Writes prompts and reads answers one line at a time.
///
/// The input can be a terminal, a script file or an in-memory buffer.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over the given input and output.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// The output sink.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the prompter, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Read the next line without its line ending, `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        trace!(line = %line, "Read input line");
        Ok(Some(line))
    }

    /// Print `label` and return the trimmed answer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputClosed`] at end of input, or an I/O error.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        match self.read_line()? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(Error::InputClosed),
        }
    }

    /// Print `label` and return the answer as typed, without its line ending.
    ///
    /// # Errors
    ///
    /// Same as [`Self::ask`].
    pub fn ask_line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()?.ok_or(Error::InputClosed)
    }

    /// Print `label` and return the first word of the answer.
    ///
    /// # Errors
    ///
    /// Same as [`Self::ask`].
    pub fn ask_word(&mut self, label: &str) -> Result<String> {
        let answer = self.ask(label)?;
        Ok(answer
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string())
    }

    /// Print `label` and parse the first word as an integer.
    ///
    /// Returns `None` when the answer isn't a number.
    ///
    /// # Errors
    ///
    /// Same as [`Self::ask`].
    pub fn ask_number(&mut self, label: &str) -> Result<Option<i64>> {
        Ok(self.ask_word(label)?.parse().ok())
    }

    /// Ask until `accept` takes the answer.
    ///
    /// A rejected answer prints the message `accept` returns and asks again.
    /// Answers are passed on as typed. `rejections` is shared by the caller
    /// across prompts; once it reaches `max_rejections` the loop ends with
    /// [`Error::TooManyAttempts`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyAttempts`], [`Error::InputClosed`] or an I/O
    /// error.
    pub fn ask_until<T, F>(
        &mut self,
        label: &str,
        max_rejections: Option<u32>,
        rejections: &mut u32,
        mut accept: F,
    ) -> Result<T>
    where
        F: FnMut(&str) -> std::result::Result<T, String>,
    {
        loop {
            let answer = self.ask_line(label)?;
            match accept(&answer) {
                Ok(value) => return Ok(value),
                Err(message) => {
                    writeln!(self.output, "{message}")?;
                    *rejections += 1;
                    if max_rejections.is_some_and(|max| *rejections >= max) {
                        return Err(Error::TooManyAttempts {
                            prompt: label.trim_end_matches([':', ' ']).to_string(),
                            attempts: *rejections,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_read_line_strips_endings() {
        let mut p = prompter("one\r\ntwo\nthree");
        assert_eq!(p.read_line().unwrap().as_deref(), Some("one"));
        assert_eq!(p.read_line().unwrap().as_deref(), Some("two"));
        assert_eq!(p.read_line().unwrap().as_deref(), Some("three"));
        assert_eq!(p.read_line().unwrap(), None);
    }

    #[test]
    fn test_ask_writes_label_and_trims() {
        let mut p = prompter("  Ada Lovelace  \n");
        assert_eq!(p.ask("Name: ").unwrap(), "Ada Lovelace");
        assert_eq!(output(p), "Name: ");
    }

    #[test]
    fn test_ask_at_end_of_input() {
        let mut p = prompter("");
        assert!(matches!(p.ask("Name: "), Err(Error::InputClosed)));
    }

    #[test]
    fn test_ask_word() {
        let mut p = prompter("BA123 extra words\n\n");
        assert_eq!(p.ask_word("Flight: ").unwrap(), "BA123");
        assert_eq!(p.ask_word("Flight: ").unwrap(), "");
    }

    #[test]
    fn test_ask_number() {
        let mut p = prompter("3\n-1\nabc\n");
        assert_eq!(p.ask_number("n: ").unwrap(), Some(3));
        assert_eq!(p.ask_number("n: ").unwrap(), Some(-1));
        assert_eq!(p.ask_number("n: ").unwrap(), None);
    }

    #[test]
    fn test_ask_until_retries() {
        let mut p = prompter("x\ny\n7\n");
        let mut rejections = 0;
        let value = p
            .ask_until("Pick: ", None, &mut rejections, |answer| {
                answer.parse::<u32>().map_err(|_| format!("{answer}?"))
            })
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(rejections, 2);

        let text = output(p);
        assert!(text.contains("x?\n"));
        assert!(text.contains("y?\n"));
        assert_eq!(text.matches("Pick: ").count(), 3);
    }

    #[test]
    fn test_ask_until_bounded() {
        let mut p = prompter("a\nb\nc\n1\n");
        let mut rejections = 0;
        let result = p.ask_until("Pick: ", Some(2), &mut rejections, |answer| {
            answer.parse::<u32>().map_err(|_| "no".to_string())
        });
        match result {
            Err(Error::TooManyAttempts { prompt, attempts }) => {
                assert_eq!(prompt, "Pick");
                assert_eq!(attempts, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_ask_until_input_closed() {
        let mut p = prompter("bad\n");
        let mut rejections = 0;
        let result: Result<u32> =
            p.ask_until("Pick: ", None, &mut rejections, |_| Err("no".to_string()));
        assert!(matches!(result, Err(Error::InputClosed)));
    }

    #[test]
    fn test_ask_until_shares_rejections_across_prompts() {
        let mut p = prompter("x\n1\ny\n2\n");
        let mut rejections = 0;
        let parse = |answer: &str| answer.parse::<u32>().map_err(|_| "no".to_string());

        assert_eq!(p.ask_until("First: ", Some(2), &mut rejections, parse).unwrap(), 1);
        match p.ask_until("Second: ", Some(2), &mut rejections, parse) {
            Err(Error::TooManyAttempts { prompt, attempts }) => {
                assert_eq!(prompt, "Second");
                assert_eq!(attempts, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_ask_line_keeps_spacing() {
        let mut p = prompter("  12 \r\n");
        assert_eq!(p.ask_line("Seat: ").unwrap(), "  12 ");
        assert!(matches!(p.ask_line("Seat: "), Err(Error::InputClosed)));
    }
}
