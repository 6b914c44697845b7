use crate::alignment::alternatives::{AlternativeSet, WildcardSet};
use crate::types::{AlignmentTag, Token};

const NO_MATCH: u8 = 0;
const EXACT_MATCH: u8 = 1;
const ALTERNATE_MATCH: u8 = 2;

#[inline(always)]
fn match_kind(
    reference: &str,
    candidate: &str,
    alternatives: &AlternativeSet,
    wildcards: &WildcardSet,
) -> u8 {
    if reference == candidate {
        EXACT_MATCH
    } else if wildcards.contains(reference)
        || wildcards.contains(candidate)
        || alternatives.are_alternatives(reference, candidate)
    {
        ALTERNATE_MATCH
    } else {
        NO_MATCH
    }
}

/// Word-level LCS alignment of `reference` against `candidate`.
///
/// Two words match when identical, when they share an alternative class, or
/// when either is a wildcard. Among maximal alignments, each reference word
/// is matched at the earliest candidate position that still allows a maximal
/// alignment of the rest, scanning references left to right. Returns one tag
/// per reference token.
pub fn align_sequences(
    reference: &[Token],
    candidate: &[Token],
    alternatives: &AlternativeSet,
    wildcards: &WildcardSet,
) -> Vec<AlignmentTag> {
    let n = reference.len();
    let m = candidate.len();
    if n == 0 {
        return Vec::new();
    }
    if m == 0 {
        return vec![AlignmentTag::Unmatched; n];
    }

    let mut kinds = vec![NO_MATCH; n * m];
    for (i, r) in reference.iter().enumerate() {
        let row = &mut kinds[i * m..(i + 1) * m];
        for (j, c) in candidate.iter().enumerate() {
            row[j] = match_kind(&r.word, &c.word, alternatives, wildcards);
        }
    }

    // suffix[i][j] = LCS length of reference[i..] and candidate[j..]
    let width = m + 1;
    let mut suffix = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            suffix[i * width + j] = if kinds[i * m + j] != NO_MATCH {
                1 + suffix[(i + 1) * width + j + 1]
            } else {
                suffix[(i + 1) * width + j].max(suffix[i * width + j + 1])
            };
        }
    }

    let mut tags = Vec::with_capacity(n);
    let mut j = 0usize;
    for i in 0..n {
        let remaining = suffix[i * width + j];
        if remaining == 0 {
            tags.push(AlignmentTag::Unmatched);
            continue;
        }

        let next_row = (i + 1) * width;
        let chosen = (j..m).find(|&k| {
            kinds[i * m + k] != NO_MATCH && 1 + suffix[next_row + k + 1] == remaining
        });
        match chosen {
            Some(k) => {
                tags.push(AlignmentTag::Matched {
                    candidate_position: k,
                    alternate: kinds[i * m + k] == ALTERNATE_MATCH,
                });
                j = k + 1;
            }
            None => tags.push(AlignmentTag::Unmatched),
        }
    }

    debug_assert_eq!(tags.len(), n, "alignment must tag every reference token");
    tracing::debug!(
        reference_len = n,
        candidate_len = m,
        matched = suffix[0],
        "alignment: lcs complete"
    );
    tags
}
