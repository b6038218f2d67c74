const MALE_TOKENS: [&str; 4] = ["m", "male", "garcon", "garçon"];
const FEMALE_TOKENS: [&str; 3] = ["f", "female", "fille"];
const MALE_ARABIC: &str = "ذكر";
const FEMALE_ARABIC: &str = "أنثى";

const REPEAT_TOKENS: [&str; 5] = ["1", "oui", "true", "vrai", "yes"];
const REPEAT_ARABIC: &str = "نعم";

const SCIENCE_MARKER: &str = "ST";
const LETTERS_MARKERS: [&str; 3] = ["lettres", "lit", "art"];

/// Exact match on the raw cell: Latin tokens ignore case, the Arabic token
/// does not. Missing or unrecognized text never matches.
fn token_in(value: Option<&str>, latin: &[&str], arabic: &str) -> bool {
    let Some(value) = value else {
        return false;
    };
    value == arabic || latin.contains(&value.to_lowercase().as_str())
}

pub fn is_male(sex: Option<&str>) -> bool {
    token_in(sex, &MALE_TOKENS, MALE_ARABIC)
}

pub fn is_female(sex: Option<&str>) -> bool {
    token_in(sex, &FEMALE_TOKENS, FEMALE_ARABIC)
}

pub fn is_repeat(repeat: Option<&str>) -> bool {
    token_in(repeat, &REPEAT_TOKENS, REPEAT_ARABIC)
}

/// Science/technology stream: the upper-cased branch contains `ST`.
pub fn is_science(branch: Option<&str>) -> bool {
    branch.is_some_and(|b| b.to_uppercase().contains(SCIENCE_MARKER))
}

/// Humanities/arts stream. Not exclusive with [`is_science`].
pub fn is_letters(branch: Option<&str>) -> bool {
    branch.is_some_and(|b| {
        let lower = b.to_lowercase();
        LETTERS_MARKERS.iter().any(|marker| lower.contains(marker))
    })
}
