/**
 * Reading and writing study files and session history in the filesystem.
 *
 * Each study file is one JSON document under `files/` in the data directory;
 * session history is an append-only JSON array under `results/`. The data
 * directory is passed in by the caller so alternative locations (the `-d`
 * flag, scratch directories in tests) need no global state.
 */
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::common::{Result, StudyError};
use super::quiz::{QuizConfig, QuizResult, StudyFile};


/// Return the default application data directory.
pub fn default_data_dir() -> PathBuf {
    let mut dirpath = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    dirpath.push("studyiq");
    dirpath
}


/// Create the data directory and its subdirectories if they don't exist.
pub fn require_data_dir(dir: &Path) -> Result<()> {
    make_directory(dir)?;
    make_directory(&dir.join("files"))?;
    make_directory(&dir.join("results"))
}


fn make_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .or(Err(StudyError::CannotMakeDataDir(path.to_path_buf())))?;
    }
    Ok(())
}


/// Return the path where the given study file is stored.
fn get_file_path(dir: &Path, name: &str) -> PathBuf {
    dir.join("files").join(format!("{}.json", name))
}


/// Return the path of the results log for the given study file.
fn get_results_path(dir: &Path, name: &str) -> PathBuf {
    dir.join("results").join(format!("{}_results.json", name))
}


/// Load a study file by name. Entries come back in their original import
/// order, which is the order range positions index into.
pub fn load_file(dir: &Path, name: &str) -> Result<StudyFile> {
    let path = get_file_path(dir, name);
    let data = fs::read_to_string(&path)
        .or(Err(StudyError::FileNotFound(String::from(name))))?;
    serde_json::from_str(&data).map_err(StudyError::Json)
}


/// Save a study file, replacing any previous version with the same name.
pub fn save_file(dir: &Path, file: &StudyFile) -> Result<()> {
    let path = get_file_path(dir, &file.name);
    let serialized = serde_json::to_string_pretty(file).map_err(StudyError::Json)?;
    fs::write(&path, serialized).or(Err(StudyError::CannotWriteToFile(path)))
}


/// Return `true` if a study file with the given name has been imported.
pub fn file_exists(dir: &Path, name: &str) -> bool {
    get_file_path(dir, name).exists()
}


/// List the names of all imported study files, sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names = Vec::new();
    if let Ok(iter) = dir.join("files").read_dir() {
        for entry in iter {
            if let Ok(entry) = entry {
                if let Some(stem) = entry.path().file_stem() {
                    if let Some(stem) = stem.to_str() {
                        names.push(String::from(stem));
                    }
                }
            }
        }
    }
    names.sort();
    names
}


/// One line of the append-only session history.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HistoryRecord {
    pub time_finished: chrono::DateTime<chrono::Utc>,
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    /// Percentage of questions answered correctly, out of 100.
    pub accuracy: f64,
    pub config: QuizConfig,
}

impl HistoryRecord {
    pub fn from_result(result: &QuizResult) -> Self {
        HistoryRecord {
            time_finished: result.time_finished,
            total: result.total,
            correct: result.total_correct,
            wrong: result.total_incorrect,
            accuracy: result.accuracy(),
            config: result.config.clone(),
        }
    }
}


/// Append one session record to the history log for the given study file,
/// creating the log if it does not exist yet.
pub fn append_history(dir: &Path, name: &str, record: &HistoryRecord) -> Result<()> {
    let path = get_results_path(dir, name);

    // Load old records, if any exist.
    let mut records: Vec<HistoryRecord> = match fs::read_to_string(&path) {
        Ok(ref data) => serde_json::from_str(data).map_err(StudyError::Json)?,
        Err(_) => Vec::new(),
    };
    records.push(record.clone());

    let serialized = serde_json::to_string_pretty(&records).map_err(StudyError::Json)?;
    fs::write(&path, serialized).or(Err(StudyError::CannotWriteToFile(path)))
}


/// Load the full session history for a study file, oldest first.
pub fn load_history(dir: &Path, name: &str) -> Result<Vec<HistoryRecord>> {
    let path = get_results_path(dir, name);
    match fs::read_to_string(&path) {
        Ok(ref data) => serde_json::from_str(data).map_err(StudyError::Json),
        Err(_) => Ok(Vec::new()),
    }
}
