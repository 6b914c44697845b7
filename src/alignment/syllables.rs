const VOWEL_DIGRAPHS: [&str; 25] = [
    "AA", "AE", "AI", "AO", "AU", "EA", "EE", "EI", "EO", "EU", "IA", "IE", "II", "IO", "IU", "OA",
    "OE", "OI", "OO", "OU", "UA", "UE", "UI", "UO", "UU",
];

const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Rough English syllable count, used only to flag long words.
///
/// Each vowel digraph counts once (removed in table order across the whole
/// word), each remaining vowel counts once, a final `E` takes one away and a
/// final `Y` adds one. Can return 0 ("the" -> 0).
pub fn estimate_syllables(word: &str) -> u32 {
    let upper = word.to_uppercase();
    if upper.chars().count() < 2 {
        return 1;
    }

    let mut remaining = upper.clone();
    let mut count = 0u32;
    for digraph in VOWEL_DIGRAPHS {
        let before = remaining.len();
        remaining = remaining.replace(digraph, "");
        count += ((before - remaining.len()) / digraph.len()) as u32;
    }
    count += remaining.chars().filter(|c| VOWELS.contains(c)).count() as u32;

    if upper.ends_with('E') {
        count = count.saturating_sub(1);
    } else if upper.ends_with('Y') {
        count += 1;
    }
    count
}
