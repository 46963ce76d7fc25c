/**
 * The quiz session engine: the data model for study entries and the
 * mechanics of building and asking multiple-choice questions.
 */
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::{Deserialize, Serialize};

use super::common::{Result, StudyError};
use super::persistence;
use super::ui::CmdUI;


/// One term/meaning flashcard unit belonging to a study file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    /// Assigned by the store at import time; stable for the file's lifetime.
    pub id: u32,
    pub term: String,
    pub meaning: String,
    #[serde(default)]
    pub category: String,
    /// How many times the entry has been answered incorrectly. Never goes
    /// down.
    #[serde(default)]
    pub wrong_count: u32,
    /// How many times the entry has been answered, right or wrong.
    #[serde(default)]
    pub attempt_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempted: Option<chrono::DateTime<chrono::Utc>>,
}


/// An ordered collection of entries imported from one source document.
///
/// Entries are kept in their original import order; range positions in a
/// `QuizConfig` are 1-based indices into exactly this order.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StudyFile {
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// 1-based position where the next sequential session should resume.
    pub sequence_pointer: usize,
    pub entries: Vec<Entry>,
}

impl StudyFile {
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}


/// How the entries of a session are selected from the range pool.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Sequential,
    Random,
    Mistakes,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Self, String> {
        match s {
            "sequential" => Ok(Mode::Sequential),
            "random" => Ok(Mode::Random),
            "mistakes" => Ok(Mode::Mistakes),
            _ => Err(format!("unknown mode '{}'", s)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Mode::Sequential => write!(f, "sequential"),
            Mode::Random => write!(f, "random"),
            Mode::Mistakes => write!(f, "mistakes"),
        }
    }
}


/// Controls the mix of question directions, not the content.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Self, String> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("unknown difficulty '{}'", s)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}


/// Whether a question shows the term and asks for the meaning, or the other
/// way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TermToMeaning,
    MeaningToTerm,
}


/// Caller-supplied parameters for one quiz session.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuizConfig {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub question_count: usize,
    /// 1-based inclusive positions into the file's entry order.
    pub range_start: usize,
    pub range_end: usize,
}


/// A 1-based inclusive range of entry positions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}


/// One selectable option of a multiple-choice question.
#[derive(Debug, Clone)]
pub struct Choice {
    pub text: String,
    pub correct: bool,
}


/// A single multiple-choice question, derived from an entry for the duration
/// of one session and never persisted.
#[derive(Debug, Clone)]
pub struct Question {
    /// Equals the id of the entry the question was built from.
    pub id: u32,
    pub prompt: String,
    pub direction: Direction,
    /// One correct choice plus up to three distractors, in random order.
    pub choices: Vec<Choice>,
    pub entry: Entry,
}


/// An assembled session: the ordered question list plus the range of entry
/// positions that was actually consulted.
#[derive(Debug)]
pub struct QuizSession {
    pub questions: Vec<Question>,
    pub used_range: Span,
    /// Size of the selection the questions were built from, after filtering
    /// and truncation.
    pub source_count: usize,
}


/// The outcome of taking a quiz session.
#[derive(Debug)]
pub struct QuizResult {
    pub time_finished: chrono::DateTime<chrono::Utc>,
    pub total: usize,
    pub total_correct: usize,
    pub total_incorrect: usize,
    /// The entries answered incorrectly, in the order they were missed.
    pub wrong_entries: Vec<Entry>,
    pub used_range: Span,
    pub config: QuizConfig,
    /// Size of the file's entry pool at the time of the session.
    pub total_entries: usize,
}

impl QuizResult {
    /// Percentage of questions answered correctly, out of 100.
    pub fn accuracy(&self) -> f64 {
        if self.total > 0 {
            100.0 * (self.total_correct as f64) / (self.total as f64)
        } else {
            0.0
        }
    }
}


/// Number of incorrect choices sampled for each question, pool permitting.
const MAX_DISTRACTORS: usize = 3;


/// Return the direction of the question at `index` within the selected set.
///
/// The mix is a deterministic function of the difficulty tier: easy sessions
/// always show the term, medium sessions reverse every third question and
/// hard sessions alternate.
pub fn direction_for(difficulty: Difficulty, index: usize) -> Direction {
    match difficulty {
        Difficulty::Easy => Direction::TermToMeaning,
        Difficulty::Medium => {
            if index % 3 == 0 {
                Direction::MeaningToTerm
            } else {
                Direction::TermToMeaning
            }
        }
        Difficulty::Hard => {
            if index % 2 == 0 {
                Direction::MeaningToTerm
            } else {
                Direction::TermToMeaning
            }
        }
    }
}


/// Build a multiple-choice question for `entry`, sampling distractors from
/// `pool`.
///
/// The entry itself is excluded from the sample by id, so reordering the
/// pool upstream cannot reintroduce it. A pool smaller than four entries
/// yields fewer distractors, down to a single-choice question for a pool of
/// one.
pub fn build_question(entry: &Entry, pool: &[Entry], direction: Direction) -> Question {
    let mut rng = thread_rng();

    let mut distractors: Vec<&Entry> = pool.iter().filter(|e| e.id != entry.id).collect();
    // Shuffle before truncating so we don't always pick the first three
    // entries of the pool.
    distractors.shuffle(&mut rng);
    distractors.truncate(MAX_DISTRACTORS);

    let mut choices = Vec::with_capacity(distractors.len() + 1);
    match direction {
        Direction::TermToMeaning => {
            choices.push(Choice { text: entry.meaning.clone(), correct: true });
            for distractor in distractors {
                choices.push(Choice { text: distractor.meaning.clone(), correct: false });
            }
        }
        Direction::MeaningToTerm => {
            choices.push(Choice { text: entry.term.clone(), correct: true });
            for distractor in distractors {
                choices.push(Choice { text: distractor.term.clone(), correct: false });
            }
        }
    }
    // Shuffle again so that the position of the correct choice is random.
    choices.shuffle(&mut rng);

    let prompt = match direction {
        Direction::TermToMeaning => entry.term.clone(),
        Direction::MeaningToTerm => entry.meaning.clone(),
    };

    Question {
        id: entry.id,
        prompt,
        direction,
        choices,
        entry: entry.clone(),
    }
}


/// Update an entry's statistics after it has been answered.
///
/// The attempt counter moves on every answer and the wrong counter only on a
/// miss, so `attempt_count >= wrong_count` holds at all times.
pub fn record_answer(entry: &mut Entry, correct: bool) {
    entry.attempt_count += 1;
    if !correct {
        entry.wrong_count += 1;
    }
    entry.last_attempted = Some(chrono::Utc::now());
}


impl QuizSession {
    /// Ask every question in order, recording each answer on the owning file
    /// and saving the file before moving on to the next question. Ctrl+C
    /// ends the session early; the questions answered so far still count.
    pub fn take(
        &self,
        file: &mut StudyFile,
        dir: &Path,
        config: &QuizConfig,
        ui: &mut CmdUI,
    ) -> Result<QuizResult> {
        let mut total = 0;
        let mut total_correct = 0;
        let mut wrong_entries = Vec::new();

        for question in self.questions.iter() {
            ui.next();
            ui.text(&question.prompt, question.direction)?;
            let texts: Vec<&str> = question.choices.iter().map(|c| c.text.as_str()).collect();
            ui.choices(&texts)?;

            let picked = match ui.pick(question.choices.len()) {
                Ok(Some(picked)) => picked,
                Ok(None) => break,
                Err(StudyError::ReadlineInterrupted) => break,
                Err(e) => return Err(e),
            };

            let correct = question.choices[picked].correct;
            if correct {
                total_correct += 1;
                ui.correct()?;
            } else {
                let answer = question
                    .choices
                    .iter()
                    .find(|c| c.correct)
                    .map(|c| c.text.as_str());
                ui.incorrect(answer)?;
            }

            if let Some(entry) = file.entries.iter_mut().find(|e| e.id == question.id) {
                record_answer(entry, correct);
                if !correct {
                    wrong_entries.push(entry.clone());
                }
            }
            persistence::save_file(dir, file)?;

            total += 1;
        }

        Ok(QuizResult {
            time_finished: chrono::Utc::now(),
            total,
            total_correct,
            total_incorrect: total - total_correct,
            wrong_entries,
            used_range: self.used_range,
            config: config.clone(),
            total_entries: file.entry_count(),
        })
    }
}
