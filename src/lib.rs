/**
 * StudyIQ: study term/meaning flashcards from the command line.
 *
 * The interesting machinery lives in `quiz` (the question builder and the
 * interactive session loop) and `selection` (range clamping, mode filtering
 * and sequential progression). Everything else is plumbing around them.
 */
#[macro_use]
pub mod iohelper;
pub mod common;
pub mod parser;
pub mod persistence;
pub mod quiz;
pub mod selection;
pub mod ui;
