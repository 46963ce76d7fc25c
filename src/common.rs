/**
 * Definitions shared by several modules: the `StudyError` type and the
 * structs that hold command-line arguments.
 */
use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use structopt::StructOpt;

use super::quiz::{Difficulty, Mode};


pub type Result<T> = ::std::result::Result<T, StudyError>;


#[derive(Debug)]
pub enum StudyError {
    /// For when the application data directory cannot be created.
    CannotMakeDataDir(PathBuf),
    /// For when the user references a study file that has not been imported.
    FileNotFound(String),
    /// For when an imported file contains no entries.
    EmptyFile(PathBuf),
    /// For JSON errors.
    Json(serde_json::Error),
    CannotWriteToFile(PathBuf),
    Io(io::Error),
    ReadlineInterrupted,
    Parse { line: usize, message: String },
}


impl fmt::Display for StudyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            StudyError::CannotMakeDataDir(ref path) => {
                write!(
                    f,
                    "unable to create data directory at {}",
                    path.to_string_lossy()
                )
            }
            StudyError::FileNotFound(ref name) => {
                write!(f, "could not find a study file named '{}'", name)
            }
            StudyError::EmptyFile(ref path) => {
                write!(f, "no entries found in '{}'", path.to_string_lossy())
            }
            StudyError::Json(ref err) => {
                write!(f, "could not parse JSON ({})", err)
            }
            StudyError::CannotWriteToFile(ref path) => {
                write!(f, "cannot write to file '{}'", path.to_string_lossy())
            }
            StudyError::Io(ref err) => {
                write!(f, "IO error ({})", err)
            }
            StudyError::ReadlineInterrupted => Ok(()),
            StudyError::Parse { line, ref message } => {
                write!(f, "{} on line {}", message, line)
            }
        }
    }
}


impl error::Error for StudyError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            StudyError::Json(ref err) => Some(err),
            StudyError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}


pub fn is_broken_pipe(e: &StudyError) -> bool {
    if let StudyError::Io(e) = e {
        if let io::ErrorKind::BrokenPipe = e.kind() {
            return true;
        }
    }
    false
}


/// Holds the command-line configuration for the application.
#[derive(StructOpt)]
#[structopt(name = "studyiq", about = "Study term/meaning flashcards from the command line.")]
pub struct Options {
    /// Keep study data in a particular directory.
    #[structopt(short = "d", long = "directory")]
    pub directory: Option<PathBuf>,
    /// Do not emit colorized output.
    #[structopt(long = "no-color")]
    pub no_color: bool,
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(StructOpt)]
pub enum Command {
    /// Take a quiz session.
    #[structopt(name = "take")]
    Take(TakeOptions),
    /// Import a term/meaning file into the study collection.
    #[structopt(name = "import")]
    Import(ImportOptions),
    /// List imported study files.
    #[structopt(name = "ls")]
    Ls,
    /// Report results of previous sessions.
    #[structopt(name = "results")]
    Results(ResultsOptions),
    /// Show per-entry answer statistics.
    #[structopt(name = "stats")]
    Stats(StatsOptions),
    /// Show the next sequential study range.
    #[structopt(name = "next")]
    Next(NextOptions),
}

#[derive(StructOpt)]
pub struct TakeOptions {
    /// Name of the study file to quiz from.
    pub name: String,
    /// Selection mode: 'sequential', 'random' or 'mistakes'.
    #[structopt(short = "m", long = "mode", default_value = "sequential")]
    pub mode: Mode,
    /// Question direction mix: 'easy', 'medium' or 'hard'.
    #[structopt(long = "difficulty", default_value = "easy")]
    pub difficulty: Difficulty,
    /// Limit the total number of questions.
    #[structopt(short = "n", default_value = "10")]
    pub num_to_ask: usize,
    /// Limit questions to a range of entry positions, e.g. '1-20'.
    #[structopt(short = "r", long = "range")]
    pub range: Option<String>,
    /// Resume from the file's sequence pointer.
    #[structopt(long = "continue")]
    pub cont: bool,
    /// Save results without prompting.
    #[structopt(long = "save")]
    pub save: bool,
}

#[derive(StructOpt)]
pub struct ImportOptions {
    /// Path of the text file to import.
    pub path: PathBuf,
    /// Store the file under this name instead of the file stem.
    #[structopt(long = "name")]
    pub name: Option<String>,
    /// Replace an existing study file without prompting.
    #[structopt(short = "f", long = "force")]
    pub force: bool,
}

#[derive(StructOpt)]
pub struct ResultsOptions {
    /// The name of the study file for which to fetch the results.
    pub name: String,
    /// Only show the last `n` results.
    #[structopt(short = "n")]
    pub num_to_show: Option<usize>,
}

#[derive(StructOpt)]
pub struct StatsOptions {
    /// The name of the study file.
    pub name: String,
    /// One of 'best' or 'worst'. Defaults to 'worst'.
    #[structopt(short = "s", long = "sort", default_value = "worst")]
    pub sort: String,
    /// Only show the first `n` entries.
    #[structopt(short = "n")]
    pub num_to_show: Option<usize>,
}

#[derive(StructOpt)]
pub struct NextOptions {
    /// The name of the study file.
    pub name: String,
    /// Size of the upcoming study window.
    #[structopt(short = "n", default_value = "10")]
    pub num_to_ask: usize,
}
