/**
 * Study term/meaning flashcards from the command line.
 */
use std::cmp;
use std::cmp::Ordering;
use std::io::Write;
use std::path::Path;

use colored::*;
use structopt::StructOpt;

use studyiq::common::{
    is_broken_pipe, Command, ImportOptions, NextOptions, Options, Result, ResultsOptions,
    StatsOptions, StudyError, TakeOptions,
};
use studyiq::iohelper::{prettyprint_colored, prompt};
use studyiq::persistence::{self, HistoryRecord};
use studyiq::quiz::{Entry, Mode, QuizConfig, Span, StudyFile};
use studyiq::ui::CmdUI;
use studyiq::{my_println, parser, selection};


fn main() {
    let options = parse_options();

    if options.no_color {
        colored::control::set_override(false);
    }

    let dir = options
        .directory
        .clone()
        .unwrap_or_else(persistence::default_data_dir);
    if let Err(e) = persistence::require_data_dir(&dir) {
        eprintln!("{}: {}", "Error".red(), e);
        ::std::process::exit(2);
    }

    let result = match options.cmd {
        Command::Take(options) => main_take(&dir, options),
        Command::Import(options) => main_import(&dir, options),
        Command::Ls => main_ls(&dir),
        Command::Results(options) => main_results(&dir, options),
        Command::Stats(options) => main_stats(&dir, options),
        Command::Next(options) => main_next(&dir, options),
    };

    if let Err(e) = result {
        if !is_broken_pipe(&e) {
            eprintln!("{}: {}", "Error".red(), e);
            ::std::process::exit(2);
        }
    }
}


/// Parse command-line arguments.
fn parse_options() -> Options {
    let options = Options::from_args();

    if let Command::Stats(options) = &options.cmd {
        let s = &options.sort;
        if s != "best" && s != "worst" {
            eprintln!("{}: unknown value `{}` for --sort.", "Error".red(), s);
            ::std::process::exit(2);
        }
    }

    options
}


/// The main function for the `take` subcommand.
fn main_take(dir: &Path, options: TakeOptions) -> Result<()> {
    let mut file = persistence::load_file(dir, &options.name)?;
    let total = file.entry_count();

    let num_to_ask = cmp::max(1, options.num_to_ask);
    let (range_start, range_end) = if options.cont {
        (file.sequence_pointer, file.sequence_pointer + num_to_ask - 1)
    } else if let Some(ref text) = options.range {
        let span = parser::parse_range(text, Span { start: 1, end: total });
        (span.start, span.end)
    } else {
        (1, total)
    };

    let config = QuizConfig {
        mode: options.mode,
        difficulty: options.difficulty,
        question_count: num_to_ask,
        range_start,
        range_end,
    };

    let session = selection::assemble(&file.entries, &config);
    if session.questions.is_empty() {
        return match config.mode {
            Mode::Mistakes => my_println!("No mistakes to review."),
            _ => my_println!("No entries to study."),
        };
    }

    let mut ui = CmdUI::new();
    let results = session.take(&mut file, dir, &config, &mut ui)?;
    ui.results(&results)?;

    // Only a finished run moves the bookmark; quitting partway leaves the
    // range to be studied again.
    if config.mode == Mode::Sequential && results.total == session.questions.len() {
        advance_sequence(dir, &mut file, results.used_range.end, config.question_count)?;
    }

    if results.total > 0 && (options.save || confirm("\nSave results? ")) {
        persistence::append_history(dir, &file.name, &HistoryRecord::from_result(&results))?;
    }
    Ok(())
}


/// Move the file's sequence pointer past the range just studied, wrapping
/// back to the start once the file has been studied all the way through.
fn advance_sequence(
    dir: &Path,
    file: &mut StudyFile,
    studied_through: usize,
    window: usize,
) -> Result<()> {
    match selection::next_sequential_range(studied_through, window, file.entry_count()) {
        Some(next) => {
            file.sequence_pointer = next.start;
            my_println!("\nNext up: entries {}-{}.", next.start, next.end)?;
        }
        None => {
            file.sequence_pointer = 1;
            my_println!(
                "\nYou have reached the end of '{}'. The sequence starts over from the beginning.",
                file.name
            )?;
        }
    }
    persistence::save_file(dir, file)
}


/// The main function for the `import` subcommand.
fn main_import(dir: &Path, options: ImportOptions) -> Result<()> {
    let parsed = parser::parse_study_file(&options.path)?;
    if parsed.pairs.is_empty() {
        return Err(StudyError::EmptyFile(options.path.clone()));
    }

    let name = match options.name {
        Some(name) => name,
        None => options
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("main")),
    };

    if persistence::file_exists(dir, &name) && !options.force {
        let message = format!("A study file named '{}' already exists. Replace it? ", name);
        if !confirm(&message) {
            return Ok(());
        }
    }

    let category = parsed.category;
    let entries: Vec<Entry> = parsed
        .pairs
        .into_iter()
        .enumerate()
        .map(|(i, (term, meaning))| Entry {
            id: (i + 1) as u32,
            term,
            meaning,
            category: category.clone(),
            wrong_count: 0,
            attempt_count: 0,
            last_attempted: None,
        })
        .collect();

    let file = StudyFile {
        name: name.clone(),
        category,
        sequence_pointer: 1,
        entries,
    };
    persistence::save_file(dir, &file)?;
    my_println!("Imported {} entries into '{}'.", file.entry_count(), name)
}


/// The main function for the `ls` subcommand.
fn main_ls(dir: &Path) -> Result<()> {
    let names = persistence::list_files(dir);
    if names.is_empty() {
        my_println!("No study files found.")
    } else {
        my_println!("Available study files:")?;
        for name in names.iter() {
            my_println!("  {}", name)?;
        }
        Ok(())
    }
}


/// The main function for the `results` subcommand.
fn main_results(dir: &Path, options: ResultsOptions) -> Result<()> {
    let mut records = persistence::load_history(dir, &options.name)?;

    if records.is_empty() {
        return my_println!("No results have been recorded for this study file.");
    }

    if let Some(n) = options.num_to_show {
        let skip = records.len().saturating_sub(n);
        records = records.split_off(skip);
    }

    for record in records.iter() {
        my_println!(
            "{}  {}  {} correct, {} wrong  ({}, {}, entries {}-{})",
            record.time_finished.format("%Y-%m-%d %H:%M"),
            format!("{:>5.1}%", record.accuracy).cyan(),
            record.correct,
            record.wrong,
            record.config.mode,
            record.config.difficulty,
            record.config.range_start,
            record.config.range_end,
        )?;
    }

    Ok(())
}


/// The main function for the `stats` subcommand.
fn main_stats(dir: &Path, options: StatsOptions) -> Result<()> {
    let file = persistence::load_file(dir, &options.name)?;

    // Entries that have never been asked have no statistics to show.
    let mut attempted: Vec<&Entry> =
        file.entries.iter().filter(|e| e.attempt_count > 0).collect();
    if attempted.is_empty() {
        return my_println!("No entries have been attempted yet.");
    }

    if options.sort == "best" {
        attempted.sort_by(cmp_entries_best);
    } else {
        attempted.sort_by(cmp_entries_worst);
    }

    if let Some(n) = options.num_to_show {
        attempted.truncate(n);
    }

    for entry in attempted.iter() {
        let first_prefix = format!(
            "{:>5.1}%  of {:>2}   ",
            entry_accuracy(entry),
            entry.attempt_count
        );
        prettyprint_colored(
            &format!("{} = {}", entry.term, entry.meaning),
            &first_prefix,
            None,
            Some(Color::Cyan),
        )?;
    }

    Ok(())
}


/// The main function for the `next` subcommand.
fn main_next(dir: &Path, options: NextOptions) -> Result<()> {
    let file = persistence::load_file(dir, &options.name)?;
    let window = cmp::max(1, options.num_to_ask);

    match selection::next_sequential_range(
        file.sequence_pointer.saturating_sub(1),
        window,
        file.entry_count(),
    ) {
        Some(next) => my_println!(
            "Next up for '{}': entries {}-{} of {}.",
            file.name,
            next.start,
            next.end,
            file.entry_count()
        ),
        None => my_println!("'{}' has been studied all the way through.", file.name),
    }
}


/// Prompt the user with a yes-no question and return `true` if they answer
/// yes.
fn confirm(message: &str) -> bool {
    match prompt(message) {
        Ok(Some(response)) => response.trim_start().to_lowercase().starts_with('y'),
        _ => false,
    }
}


/// Percentage of a single entry's answers that were correct.
fn entry_accuracy(entry: &Entry) -> f64 {
    100.0 * ((entry.attempt_count - entry.wrong_count) as f64) / (entry.attempt_count as f64)
}


/// Comparison function that sorts entries with the highest share of correct
/// answers first, breaking ties by number of attempts.
fn cmp_entries_best(a: &&Entry, b: &&Entry) -> Ordering {
    let a_score = entry_accuracy(a);
    let b_score = entry_accuracy(b);

    if a_score > b_score {
        Ordering::Less
    } else if a_score < b_score {
        Ordering::Greater
    } else {
        b.attempt_count.cmp(&a.attempt_count)
    }
}


/// Comparison function that sorts entries with the lowest share of correct
/// answers first.
fn cmp_entries_worst(a: &&Entry, b: &&Entry) -> Ordering {
    cmp_entries_best(a, b).reverse()
}
