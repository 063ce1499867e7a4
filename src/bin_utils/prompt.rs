use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::money::{self, AmountParseError};

/// Input ended while a prompt was waiting for an answer.
#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;

/// Line oriented question/answer exchange over any reader/writer pair.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R, W> Prompt<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{message}").context("Failed to write output")
    }

    /// Prints `label` without a newline and reads one line.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}").context("Failed to write output")?;
        self.output.flush().context("Failed to flush output")?;
        // invalid UTF-8 reads as an unparsable answer
        let mut line = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Err(InputClosed.into());
        }
        Ok(String::from_utf8_lossy(&line)
            .trim_end_matches(['\r', '\n'])
            .to_string())
    }

    /// Asks until an integer within `min..=max` is entered.
    pub fn choice(&mut self, label: &str, min: u32, max: u32) -> Result<u32> {
        let mut current = label;
        loop {
            let answer = self.ask(current)?;
            current = "";
            match answer.trim().parse::<u32>() {
                Ok(choice) if (min..=max).contains(&choice) => return Ok(choice),
                Ok(_) => self.say("Invalid choice. Please try again.")?,
                Err(_) => self.say("Invalid input. Please enter a valid number.")?,
            }
        }
    }

    /// Asks until a strictly positive amount is entered.
    pub fn amount(&mut self, label: &str) -> Result<Decimal> {
        let mut current = label;
        loop {
            let answer = self.ask(current)?;
            current = "";
            match money::parse_amount(&answer) {
                Ok(amount) => return Ok(amount),
                Err(AmountParseError::NotPositive) => {
                    self.say("Amount must be greater than zero. Please try again.")?
                }
                Err(AmountParseError::Malformed { .. }) => {
                    self.say("Invalid input. Please enter a valid amount.")?
                }
            }
        }
    }
}
