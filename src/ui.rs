/**
 * The command-line user interface for taking quiz sessions.
 */
use std::io::Write;

use colored::*;

use super::common::Result;
use super::iohelper::{prettyprint, prettyprint_colored, prompt};
use super::quiz::{Direction, QuizResult};


pub struct CmdUI {
    number: usize,
}


impl CmdUI {
    pub fn new() -> Self {
        Self { number: 0 }
    }

    pub fn next(&mut self) {
        self.number += 1;
    }

    /// Print the prompt side of a question, with a hint of which side is
    /// being asked for.
    pub fn text(&mut self, text: &str, direction: Direction) -> Result<()> {
        let hint = match direction {
            Direction::TermToMeaning => "meaning?",
            Direction::MeaningToTerm => "term?",
        };
        my_print!("\n")?;
        let prefix = format!("  ({}) ", self.number);
        prettyprint_colored(
            &format!("{} [{}]", text, hint),
            &prefix,
            None,
            Some(Color::Cyan),
        )?;
        my_print!("\n")
    }

    pub fn choices(&mut self, choices: &[&str]) -> Result<()> {
        for (letter, choice) in "abcd".chars().zip(choices.iter()) {
            let prefix = format!("     ({}) ", letter);
            prettyprint(choice, &prefix)?;
        }
        my_print!("\n")
    }

    /// Prompt for a choice letter until the response names one of the first
    /// `count` choices. Returns the zero-based choice index, or `None` on
    /// end of input.
    pub fn pick(&mut self, count: usize) -> Result<Option<usize>> {
        loop {
            let response = match prompt("Enter a letter: ")? {
                Some(response) => response,
                None => return Ok(None),
            };
            if response.len() == 1 {
                let letter = response.to_ascii_lowercase().as_bytes()[0];
                if letter >= b'a' && letter < b'a' + count as u8 {
                    return Ok(Some((letter - b'a') as usize));
                }
            }
            my_println!("Please enter a letter.")?;
        }
    }

    pub fn correct(&mut self) -> Result<()> {
        my_println!("{}", "Correct!".green())
    }

    pub fn incorrect(&mut self, answer: Option<&str>) -> Result<()> {
        if let Some(answer) = answer {
            let message = format!(
                "{} The correct answer was {}.",
                "Incorrect.".red(),
                answer.green(),
            );
            prettyprint(&message, "")
        } else {
            prettyprint(&format!("{}", "Incorrect.".red()), "")
        }
    }

    pub fn results(&mut self, results: &QuizResult) -> Result<()> {
        if results.total == 0 {
            return Ok(());
        }

        let score_as_str = format!("{:.1}%", results.accuracy());
        my_print!("\n\n")?;
        my_print!("Score: ")?;
        my_print!("{}", score_as_str.cyan())?;
        my_print!(" out of ")?;
        my_print!("{}", format!("{}", results.total).cyan())?;
        if results.total == 1 {
            my_println!(" question")?;
        } else {
            my_println!(" questions")?;
        }
        my_print!("  {}", format!("{}", results.total_correct).green())?;
        my_print!(" correct\n")?;
        my_print!("  {}", format!("{}", results.total_incorrect).red())?;
        my_print!(" incorrect\n")?;

        if !results.wrong_entries.is_empty() {
            my_println!("\nYou missed:")?;
            for entry in results.wrong_entries.iter() {
                my_println!("  {} = {}", entry.term, entry.meaning)?;
            }
        }
        Ok(())
    }
}
