/**
 * Selection of the entries that make up a quiz session: range clamping, mode
 * filtering, truncation and sequential progression.
 */
use std::cmp;

use rand::seq::SliceRandom;
use rand::thread_rng;

use super::quiz::{build_question, direction_for, Entry, Mode, QuizConfig, QuizSession, Span};


/// Return a copy of `items` in a uniformly random order. The input is never
/// mutated.
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut copy = items.to_vec();
    let mut rng = thread_rng();
    copy.shuffle(&mut rng);
    copy
}


/// Clamp a requested 1-based inclusive range against a pool of `max`
/// entries. The result always satisfies `1 <= start <= end`, and
/// `end <= max` whenever `max > 0`.
pub fn clamp_range(start: usize, end: usize, max: usize) -> (usize, usize) {
    let safe_start = cmp::max(1, start);
    let safe_end = cmp::max(safe_start, cmp::min(end, max));
    (safe_start, safe_end)
}


/// Assemble a quiz session from `entries` according to `config`.
///
/// The clamped range slice serves two roles: it is the candidate set the
/// mode filter selects questions from, and the distractor-sampling universe
/// for every question built. The two deliberately differ after filtering so
/// that a mistakes session with a single missed entry still draws its decoys
/// from the whole range.
pub fn assemble(entries: &[Entry], config: &QuizConfig) -> QuizSession {
    let (safe_start, safe_end) =
        clamp_range(config.range_start, config.range_end, entries.len());

    // Slice with saturating bounds so an empty entry list yields an empty
    // range pool instead of indexing out of range.
    let lo = cmp::min(safe_start - 1, entries.len());
    let hi = cmp::min(safe_end, entries.len());
    let range_pool = &entries[lo..hi];

    let mut selected: Vec<&Entry> = match config.mode {
        Mode::Mistakes => range_pool.iter().filter(|e| e.wrong_count > 0).collect(),
        Mode::Random => shuffled(&range_pool.iter().collect::<Vec<&Entry>>()),
        Mode::Sequential => range_pool.iter().collect(),
    };

    // Truncation comes after filtering and shuffling, e.g. a random session
    // of 10 draws from the whole range rather than shuffling the first 10.
    selected.truncate(config.question_count);

    let questions = selected
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            build_question(entry, range_pool, direction_for(config.difficulty, index))
        })
        .collect();

    QuizSession {
        questions,
        used_range: Span { start: safe_start, end: safe_end },
        source_count: selected.len(),
    }
}


/// Compute the next contiguous window to study after a sequential run over a
/// range ending at `current_end`.
///
/// Successive calls tile `[1..total]` into consecutive, non-overlapping
/// windows of up to `question_count` entries. Returns `None` once the file
/// is exhausted; the sequence never wraps around.
pub fn next_sequential_range(
    current_end: usize,
    question_count: usize,
    total: usize,
) -> Option<Span> {
    let next_start = current_end + 1;
    if next_start > total {
        return None;
    }
    let next_end = cmp::min(total, next_start + question_count - 1);
    Some(Span { start: next_start, end: next_end })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Difficulty, Direction};

    #[test]
    fn shuffling_preserves_the_multiset() {
        let items: Vec<u32> = (0..50).collect();
        for _ in 0..20 {
            let mut copy = shuffled(&items);
            copy.sort();
            assert_eq!(copy, items);
        }
    }

    #[test]
    fn shuffling_reaches_every_position() {
        // Every element should show up in the first position eventually; a
        // biased shuffle that pins elements in place fails this quickly.
        let items: Vec<u32> = (0..6).collect();
        let mut seen_first = [false; 6];
        for _ in 0..400 {
            let copy = shuffled(&items);
            seen_first[copy[0] as usize] = true;
        }
        assert!(seen_first.iter().all(|seen| *seen));
    }

    #[test]
    fn clamped_ranges_stay_in_bounds() {
        assert_eq!(clamp_range(1, 10, 10), (1, 10));
        assert_eq!(clamp_range(0, 10, 10), (1, 10));
        assert_eq!(clamp_range(3, 100, 10), (3, 10));
        assert_eq!(clamp_range(20, 30, 10), (20, 20));
        assert_eq!(clamp_range(5, 2, 10), (5, 5));
        for start in 0..12 {
            for end in 0..12 {
                for max in 1..12 {
                    let (safe_start, safe_end) = clamp_range(start, end, max);
                    assert!(1 <= safe_start);
                    assert!(safe_start <= safe_end);
                    assert!(safe_end <= cmp::max(safe_start, max));
                }
            }
        }
    }

    #[test]
    fn degenerate_range_against_an_empty_pool() {
        assert_eq!(clamp_range(1, 10, 0), (1, 1));
    }

    #[test]
    fn basic_sequential_session() {
        let entries = entries_with_wrong_counts(&[0; 10]);
        let session = assemble(&entries, &config(Mode::Sequential, 5, 1, 10));
        assert_eq!(session.questions.len(), 5);
        assert_eq!(session.source_count, 5);
        assert_eq!(session.used_range, Span { start: 1, end: 10 });
        for question in session.questions.iter() {
            assert_eq!(question.direction, Direction::TermToMeaning);
        }
    }

    #[test]
    fn sequential_sessions_preserve_entry_order() {
        let entries = entries_with_wrong_counts(&[0; 10]);
        let session = assemble(&entries, &config(Mode::Sequential, 10, 3, 7));
        let ids: Vec<u32> = session.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn random_sessions_draw_from_the_whole_range() {
        let entries = entries_with_wrong_counts(&[0; 10]);
        let session = assemble(&entries, &config(Mode::Random, 10, 1, 10));
        let mut ids: Vec<u32> = session.questions.iter().map(|q| q.id).collect();
        ids.sort();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn mistakes_sessions_only_contain_missed_entries() {
        let entries = entries_with_wrong_counts(&[0, 2, 0, 1, 0, 3]);
        let session = assemble(&entries, &config(Mode::Mistakes, 10, 1, 6));
        assert_eq!(session.questions.len(), 3);
        for question in session.questions.iter() {
            assert!(question.entry.wrong_count > 0);
        }
        let ids: Vec<u32> = session.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![2, 4, 6]);
    }

    #[test]
    fn empty_mistakes_pool_yields_an_empty_session() {
        let entries = entries_with_wrong_counts(&[0; 8]);
        let session = assemble(&entries, &config(Mode::Mistakes, 10, 1, 8));
        assert!(session.questions.is_empty());
        assert_eq!(session.source_count, 0);
        assert_eq!(session.used_range, Span { start: 1, end: 8 });
    }

    #[test]
    fn question_count_is_an_upper_bound() {
        let entries = entries_with_wrong_counts(&[0; 20]);
        let session = assemble(&entries, &config(Mode::Sequential, 7, 1, 20));
        assert_eq!(session.questions.len(), 7);

        // The whole pool when the count exceeds it.
        let session = assemble(&entries, &config(Mode::Sequential, 50, 1, 20));
        assert_eq!(session.questions.len(), 20);
    }

    #[test]
    fn requested_ranges_are_clamped_to_the_pool() {
        let entries = entries_with_wrong_counts(&[0; 5]);
        let session = assemble(&entries, &config(Mode::Sequential, 10, 1, 100));
        assert_eq!(session.used_range, Span { start: 1, end: 5 });
        assert_eq!(session.questions.len(), 5);
    }

    #[test]
    fn empty_entry_pools_are_not_an_error() {
        let session = assemble(&[], &config(Mode::Sequential, 10, 1, 10));
        assert!(session.questions.is_empty());
        assert_eq!(session.source_count, 0);
        assert_eq!(session.used_range, Span { start: 1, end: 1 });
    }

    #[test]
    fn distractors_come_from_the_range_pool_not_the_selection() {
        // One missed entry in a range of ten: the single question must still
        // carry a full set of choices drawn from the range.
        let mut wrong_counts = [0; 10];
        wrong_counts[4] = 1;
        let entries = entries_with_wrong_counts(&wrong_counts);
        let session = assemble(&entries, &config(Mode::Mistakes, 10, 1, 10));
        assert_eq!(session.questions.len(), 1);
        assert_eq!(session.questions[0].choices.len(), 4);
    }

    #[test]
    fn sequential_progression_tiles_without_gaps_or_overlap() {
        assert_eq!(
            next_sequential_range(0, 10, 25),
            Some(Span { start: 1, end: 10 })
        );
        assert_eq!(
            next_sequential_range(10, 10, 25),
            Some(Span { start: 11, end: 20 })
        );
        assert_eq!(
            next_sequential_range(20, 10, 25),
            Some(Span { start: 21, end: 25 })
        );
        assert_eq!(next_sequential_range(25, 10, 25), None);
    }

    #[test]
    fn sequential_progression_never_wraps() {
        assert_eq!(next_sequential_range(30, 10, 25), None);
        assert_eq!(next_sequential_range(0, 10, 0), None);
    }

    fn config(
        mode: Mode,
        question_count: usize,
        range_start: usize,
        range_end: usize,
    ) -> QuizConfig {
        QuizConfig {
            mode,
            difficulty: Difficulty::Easy,
            question_count,
            range_start,
            range_end,
        }
    }

    fn entries_with_wrong_counts(wrong_counts: &[u32]) -> Vec<Entry> {
        wrong_counts
            .iter()
            .enumerate()
            .map(|(i, wrong_count)| Entry {
                id: (i + 1) as u32,
                term: format!("term {}", i + 1),
                meaning: format!("meaning {}", i + 1),
                category: String::new(),
                wrong_count: *wrong_count,
                attempt_count: *wrong_count,
                last_attempted: None,
            })
            .collect()
    }
}
