//! Catalog of the remote actions this client can call.
//!
//! Each operation is pure data: an action id embedded in the URL path and the
//! parameters that must be present. Adding an operation means adding a
//! variant and its rows in the `match` tables below.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// All pronunciations of a word.
    WordPronunciations,
    /// The top-rated pronunciation of a word.
    StandardPronunciation,
    /// Languages available on the service.
    LanguageList,
    /// Most popular languages.
    PopularLanguages,
    /// Words starting with a pattern that have at least one pronunciation.
    PronouncedWordsSearch,
    /// Words starting with a pattern, pronounced or not.
    WordsSearch,
    /// Most popular words with at least one pronunciation.
    PopularPronouncedWords,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::WordPronunciations,
        Operation::StandardPronunciation,
        Operation::LanguageList,
        Operation::PopularLanguages,
        Operation::PronouncedWordsSearch,
        Operation::WordsSearch,
        Operation::PopularPronouncedWords,
    ];

    /// Action identifier placed after `/action/` in the URL.
    pub fn action(self) -> &'static str {
        match self {
            Operation::WordPronunciations => "word-pronunciations",
            Operation::StandardPronunciation => "standard-pronunciation",
            Operation::LanguageList => "language-list",
            Operation::PopularLanguages => "language-popular",
            Operation::PronouncedWordsSearch => "pronounced-words-search",
            Operation::WordsSearch => "words-search",
            Operation::PopularPronouncedWords => "popular-pronounced-words",
        }
    }

    /// Parameters checked, in this order, before a request is built.
    pub fn required_params(self) -> &'static [&'static str] {
        match self {
            Operation::WordPronunciations | Operation::StandardPronunciation => &["word"],
            Operation::PronouncedWordsSearch | Operation::WordsSearch => &["search"],
            Operation::LanguageList
            | Operation::PopularLanguages
            | Operation::PopularPronouncedWords => &[],
        }
    }

    /// Optional parameters the service documents for this action. Anything
    /// else is still sent.
    pub fn documented_params(self) -> &'static [&'static str] {
        match self {
            Operation::WordPronunciations => &[
                "language",
                "country",
                "username",
                "sex",
                "rate",
                "order",
                "limit",
                "groupInLanguages",
            ],
            Operation::StandardPronunciation => &["language"],
            Operation::LanguageList => &["language", "order", "minPronunciations"],
            Operation::PopularLanguages => &["language", "order", "limit"],
            Operation::PronouncedWordsSearch | Operation::WordsSearch => {
                &["language", "pagesize", "page"]
            }
            Operation::PopularPronouncedWords => &["language", "limit"],
        }
    }

    /// Public camelCase name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Operation::WordPronunciations => "wordPronunciations",
            Operation::StandardPronunciation => "standardPronunciation",
            Operation::LanguageList => "languageList",
            Operation::PopularLanguages => "popularLanguages",
            Operation::PronouncedWordsSearch => "pronouncedWordsSearch",
            Operation::WordsSearch => "wordsSearch",
            Operation::PopularPronouncedWords => "popularPronouncedWords",
        }
    }

    /// Look an operation up by its public name or its action id.
    pub fn from_name(name: &str) -> Option<Operation> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == name || op.action() == name)
    }

    pub(crate) fn is_known_param(self, name: &str) -> bool {
        self.required_params().contains(&name) || self.documented_params().contains(&name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_matches_remote_actions() {
        let table: Vec<(&str, &str, &[&str])> = Operation::ALL
            .iter()
            .map(|op| (op.name(), op.action(), op.required_params()))
            .collect();
        assert_eq!(
            table,
            vec![
                ("wordPronunciations", "word-pronunciations", &["word"][..]),
                ("standardPronunciation", "standard-pronunciation", &["word"][..]),
                ("languageList", "language-list", &[][..]),
                ("popularLanguages", "language-popular", &[][..]),
                ("pronouncedWordsSearch", "pronounced-words-search", &["search"][..]),
                ("wordsSearch", "words-search", &["search"][..]),
                ("popularPronouncedWords", "popular-pronounced-words", &[][..]),
            ]
        );
    }

    #[test]
    fn from_name_accepts_name_or_action() {
        assert_eq!(Operation::from_name("wordsSearch"), Some(Operation::WordsSearch));
        assert_eq!(
            Operation::from_name("language-popular"),
            Some(Operation::PopularLanguages)
        );
        assert_eq!(Operation::from_name("popular-languages"), None);
    }

    #[test]
    fn required_params_are_known() {
        for op in Operation::ALL {
            for name in op.required_params() {
                assert!(op.is_known_param(name), "{op}: {name}");
            }
        }
        assert!(Operation::WordPronunciations.is_known_param("groupInLanguages"));
        assert!(!Operation::LanguageList.is_known_param("otherParam"));
    }
}
