use std::collections::HashSet;

use crate::alignment::normalize::normalize;
use crate::alignment::sentences::segment_sentences;
use crate::alignment::syllables::estimate_syllables;
use crate::analysis::scoring::count_target_words_used;
use crate::config::{SentenceFloor, TargetWordMatch};
use crate::pipeline::traits::Tokenizer;
use crate::types::{SentenceStats, TurnStats, WordStats};

const LONG_WORD_MIN_SYLLABLES: u32 = 3;
const LONG_WORD_MIN_CHARS: usize = 6;

fn rounded_average(total: u32, count: u32) -> u32 {
    (f64::from(total) / f64::from(count)).round() as u32
}

pub fn sentence_stats(
    text: &str,
    tokenizer: &dyn Tokenizer,
    floor: SentenceFloor,
) -> SentenceStats {
    let sentences = segment_sentences(text);
    let count = sentences.len() as u32;

    let mut longest = floor.initial();
    let mut average = floor.initial();
    let mut total = 0u32;
    for sentence in &sentences {
        let length = tokenizer.word_count(sentence) as u32;
        longest = longest.max(length);
        total += length;
    }
    if total > 0 && count > 0 {
        average = rounded_average(total, count);
    }

    SentenceStats {
        count,
        average_words: average,
        longest_words: longest,
    }
}

/// Long words are counted over distinct words: more than two estimated
/// syllables in English, more than five characters elsewhere.
pub fn word_stats(text: &str, tokenizer: &dyn Tokenizer, is_english: bool) -> WordStats {
    if text.trim().is_empty() {
        return WordStats::default();
    }
    let words = tokenizer.words(&text.to_lowercase());
    let total = words.len();

    let mut seen = HashSet::new();
    let unique: Vec<&String> = words.iter().filter(|word| seen.insert(*word)).collect();

    let long = unique
        .iter()
        .filter(|word| {
            if is_english {
                estimate_syllables(word) >= LONG_WORD_MIN_SYLLABLES
            } else {
                word.chars().count() >= LONG_WORD_MIN_CHARS
            }
        })
        .count();

    WordStats {
        total_words: total as u32,
        unique_words: unique.len() as u32,
        long_words: long as u32,
    }
}

/// Turn counts over sentences that contain at least one word, plus target
/// word coverage over the text of those turns.
pub fn turn_stats(
    text: &str,
    tokenizer: &dyn Tokenizer,
    target_words: &[String],
    policy: TargetWordMatch,
) -> TurnStats {
    let mut stats = TurnStats::default();
    if text.trim().is_empty() {
        return stats;
    }

    let mut spoken = String::new();
    for sentence in segment_sentences(text) {
        let word_count = tokenizer.word_count(sentence) as u32;
        if word_count == 0 {
            continue;
        }
        spoken.push_str(sentence);
        spoken.push(' ');
        stats.turns += 1;
        stats.words += word_count;
        stats.longest_turn = stats.longest_turn.max(word_count);
    }

    if stats.turns == 0 {
        tracing::debug!("stats: no turn with words, reporting empty turn stats");
        return stats;
    }

    stats.average_turn = rounded_average(stats.words, stats.turns);
    stats.total_target_words = target_words.len() as u32;
    stats.target_words_used =
        count_target_words_used(&normalize(&spoken), target_words, policy) as u32;
    stats
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::pipeline::defaults::{
        DelimiterTokenizer, NormalizedWordSplitter, SpaceCountingTokenizer,
    };

    fn default_tokenizer() -> DelimiterTokenizer {
        DelimiterTokenizer::new(Arc::new(NormalizedWordSplitter))
    }

    fn targets(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn sentence_stats_empty_text_uses_floor() {
        let stats = sentence_stats("", &default_tokenizer(), SentenceFloor::One);
        assert_eq!(
            stats,
            SentenceStats {
                count: 0,
                average_words: 1,
                longest_words: 1
            }
        );
        let zero = sentence_stats("", &default_tokenizer(), SentenceFloor::Zero);
        assert_eq!(zero.average_words, 0);
        assert_eq!(zero.longest_words, 0);
    }

    #[test]
    fn sentence_stats_counts_and_rounds() {
        let stats = sentence_stats(
            "I like tea. My brother likes coffee a lot! Why?",
            &default_tokenizer(),
            SentenceFloor::One,
        );
        // 3 + 6 + 1 words over 3 sentences -> 3.33
        assert_eq!(stats.count, 3);
        assert_eq!(stats.longest_words, 6);
        assert_eq!(stats.average_words, 3);
    }

    #[test]
    fn sentence_stats_rounds_half_away_from_zero() {
        let stats = sentence_stats("one two. three", &default_tokenizer(), SentenceFloor::One);
        assert_eq!(stats.average_words, 2);
    }

    #[test]
    fn word_stats_case_insensitive_uniques() {
        let stats = word_stats("The cat sat. The cat sat.", &default_tokenizer(), true);
        assert_eq!(stats.total_words, 6);
        assert_eq!(stats.unique_words, 3);
        assert_eq!(stats.long_words, 0);
    }

    #[test]
    fn word_stats_english_long_words_by_syllables() {
        let stats = word_stats(
            "Education is wonderful and education matters",
            &default_tokenizer(),
            true,
        );
        assert_eq!(stats.total_words, 6);
        assert_eq!(stats.unique_words, 5);
        // education (4), wonderful (3)
        assert_eq!(stats.long_words, 2);
    }

    #[test]
    fn word_stats_other_languages_long_words_by_length() {
        let stats = word_stats("Bonjour mes chers étudiants", &default_tokenizer(), false);
        assert_eq!(stats.long_words, 2);
    }

    #[test]
    fn word_stats_empty_text() {
        assert_eq!(
            word_stats("", &default_tokenizer(), true),
            WordStats::default()
        );
    }

    #[test]
    fn space_counting_sentence_stats() {
        let stats = sentence_stats(
            "مرحبا بالعالم. كيف حالك اليوم",
            &SpaceCountingTokenizer,
            SentenceFloor::One,
        );
        assert_eq!(stats.count, 2);
        // " كيف حالك اليوم" keeps its leading space: 3 spaces + 1
        assert_eq!(stats.longest_words, 4);
    }

    #[test]
    fn space_counting_word_stats_blank_text_is_empty() {
        assert_eq!(word_stats("", &SpaceCountingTokenizer, false), WordStats::default());
        assert_eq!(word_stats(" \n ", &SpaceCountingTokenizer, false), WordStats::default());
        assert_eq!(word_stats("كتاب جديد", &SpaceCountingTokenizer, false).total_words, 2);
    }

    #[test]
    fn turn_stats_empty_text() {
        let stats = turn_stats(
            "",
            &default_tokenizer(),
            &targets(&["x"]),
            TargetWordMatch::Substring,
        );
        assert_eq!(stats, TurnStats::default());
        assert_eq!(stats.ai_accuracy, -1);
    }

    #[test]
    fn turn_stats_skips_wordless_sentences() {
        let stats = turn_stats(
            "I am very happy today. -- ! We went to the beach.",
            &default_tokenizer(),
            &targets(&["happy", "beach", "mountain"]),
            TargetWordMatch::Substring,
        );
        assert_eq!(stats.turns, 2);
        assert_eq!(stats.words, 10);
        assert_eq!(stats.longest_turn, 5);
        assert_eq!(stats.average_turn, 5);
        assert_eq!(stats.total_target_words, 3);
        assert_eq!(stats.target_words_used, 2);
    }

    #[test]
    fn turn_stats_punctuation_only_text_has_no_turns() {
        let stats = turn_stats("?!", &default_tokenizer(), &[], TargetWordMatch::Substring);
        assert_eq!(stats.turns, 0);
        assert_eq!(stats.total_target_words, 0);
    }
}
