//! Block-list profanity filter used on review names and bodies.
//!
//! Matching is a raw substring test on the lower-cased input. There is no
//! word-boundary check, so `"class"` is flagged because it contains `"ass"`.
//! Existing accept/reject decisions depend on exactly this behaviour.

/// Blocked terms, lower-case. Mixed English and Arabic.
pub const BLOCKED_WORDS: &[&str] = &[
    "fuck", "shit", "ass", "bitch", "damn", "cunt", "dick", "cock", "pussy", "whore",
    "slut", "bastard", "nigger", "nigga", "faggot", "fag", "retard", "motherfucker",
    "asshole", "bullshit", "piss", "penis", "vagina", "porn", "sex", "nude", "naked",
    "xxx", "kill", "murder", "rape", "suicide", "terrorist", "bomb", "drug",
    "كس", "طيز", "زب", "شرموط", "عرص", "متناك", "منيك", "خول", "قحبه", "نيك", "احا",
];

/// Returns `true` if the lower-cased `text` contains any blocked term.
pub fn contains_profanity(text: &str) -> bool {
    let lower = text.to_lowercase();
    BLOCKED_WORDS.iter().any(|word| lower.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_word_matches_inside_arbitrary_text() {
        for word in BLOCKED_WORDS {
            assert!(contains_profanity(word), "{word} alone");
            assert!(contains_profanity(&format!("X{word}Y")), "{word} wrapped");
            assert!(contains_profanity(&format!("hello {word}")), "{word} suffixed");
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        for word in BLOCKED_WORDS {
            assert!(contains_profanity(&word.to_uppercase()), "{word} upper");
        }
        assert!(contains_profanity("What The DaMn"));
    }

    #[test]
    fn substring_inside_unrelated_word_is_flagged() {
        assert!(contains_profanity("First class service"));
        assert!(contains_profanity("Great skills"));
    }

    #[test]
    fn clean_text_passes() {
        assert!(!contains_profanity(""));
        assert!(!contains_profanity("Amazing model, delivered on time!"));
        assert!(!contains_profanity("شكرا جزيلا"));
    }
}
