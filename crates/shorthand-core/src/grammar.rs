//! Separator phrases of the directive grammar.

/// Fixed phrases used to segment a directive line.
///
/// Phrase search is a plain substring scan: a selector or action that happens
/// to contain one of these phrases will split at the wrong place. The leading
/// and trailing spaces in the defaults keep that to whole words in practice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grammar {
    /// Separates the selector from the action clause.
    pub verb: String,
    /// Separates the action clause from the interaction.
    pub preposition: String,
    /// Introduces a predicate clause (`X should be Y`).
    pub auxiliary: String,
    /// Introduces the options of a predicate clause.
    pub options: String,
    /// Joins chained actions.
    pub conjunction: String,
    /// Marks a commented-out line when found in the selector.
    pub comment: String,
    /// Interaction name meaning "run immediately".
    pub load_sentinel: String,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            verb: " should ".to_owned(),
            preposition: " on ".to_owned(),
            auxiliary: " be ".to_owned(),
            options: " with ".to_owned(),
            conjunction: " and ".to_owned(),
            comment: "//".to_owned(),
            load_sentinel: "load".to_owned(),
        }
    }
}

impl Grammar {
    /// Every phrase paired with its name, for validation and display.
    #[must_use]
    pub fn phrases(&self) -> [(&'static str, &str); 7] {
        [
            ("verb", &self.verb),
            ("preposition", &self.preposition),
            ("auxiliary", &self.auxiliary),
            ("options", &self.options),
            ("conjunction", &self.conjunction),
            ("comment", &self.comment),
            ("load_sentinel", &self.load_sentinel),
        ]
    }
}
