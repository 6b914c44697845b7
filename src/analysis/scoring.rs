use std::collections::HashSet;

use crate::alignment::normalize::normalize;
use crate::analysis::judgments::{decode_grammar_check, decode_spell_check, GrammarMatch};
use crate::config::TargetWordMatch;
use crate::types::GrammarSpellStats;

/// Grammar-checker matches are weighted three words each.
const GRAMMAR_MATCH_WEIGHT: u64 = 3;

/// `round(numerator / denominator, 2) * 100`, rounding halves up.
fn percent(numerator: u64, denominator: u64) -> u32 {
    debug_assert!(denominator > 0);
    ((200 * numerator + denominator) / (2 * denominator)) as u32
}

/// 100 when there are no words to score; 0 once the weighted matches use up
/// every word.
pub fn grammar_score(word_count: usize, match_count: usize) -> u32 {
    if word_count == 0 {
        return 100;
    }
    let words = word_count as u64;
    let penalty = GRAMMAR_MATCH_WEIGHT * match_count as u64;
    if penalty >= words {
        return 0;
    }
    percent(words - penalty, words)
}

pub fn spelling_score(correct_count: usize, word_count: usize) -> u32 {
    if word_count == 0 {
        return 100;
    }
    if correct_count == 0 {
        return 0;
    }
    percent(correct_count as u64, word_count as u64)
}

/// Merge the topic's target words with the learner's own list (both one
/// entry per line), keeping first occurrences and dropping blanks.
pub fn collect_target_words(topic_words: &str, learner_words: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    topic_words
        .lines()
        .chain(learner_words.lines())
        .filter(|word| !word.trim().is_empty())
        .filter(|word| seen.insert(*word))
        .map(str::to_string)
        .collect()
}

fn contains_token_run(haystack: &[&str], needle: &[&str]) -> bool {
    !needle.is_empty()
        && haystack.len() >= needle.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}

/// Number of target words found in `normalized_text`.
///
/// Substring matching also finds multi-word phrases but counts "art" as used
/// in "party"; whole-token matching avoids that.
pub fn count_target_words_used(
    normalized_text: &str,
    target_words: &[String],
    policy: TargetWordMatch,
) -> usize {
    if normalized_text.is_empty() {
        return 0;
    }
    let text_tokens: Vec<&str> = normalized_text.split(' ').collect();
    target_words
        .iter()
        .filter(|word| {
            let search = normalize(word);
            if search.is_empty() {
                return false;
            }
            match policy {
                TargetWordMatch::Substring => normalized_text.contains(&search),
                TargetWordMatch::WholeToken => {
                    let needle: Vec<&str> = search.split(' ').collect();
                    contains_token_run(&text_tokens, &needle)
                }
            }
        })
        .count()
}

/// Transcript words the spell checker flagged, pairing the normalized
/// transcript word-by-word with the stored per-word flags.
pub fn spelling_errors(stats: &GrammarSpellStats, transcript: &str) -> Vec<String> {
    let normalized = normalize(transcript);
    if normalized.is_empty() {
        return Vec::new();
    }
    let Some(payload) = decode_spell_check(&stats.spelling_payload) else {
        return Vec::new();
    };
    let Some(results) = payload.results() else {
        return Vec::new();
    };

    normalized
        .split(' ')
        .zip(results)
        .filter(|(_, correct)| !**correct)
        .map(|(word, _)| word.to_string())
        .collect()
}

pub fn grammar_errors(stats: &GrammarSpellStats, transcript: &str) -> Vec<GrammarMatch> {
    if normalize(transcript).is_empty() {
        return Vec::new();
    }
    decode_grammar_check(&stats.grammar_payload)
        .map(|payload| payload.matches)
        .unwrap_or_default()
}
