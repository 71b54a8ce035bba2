//! Line segmentation by fixed separator phrases.

use crate::grammar::Grammar;

/// Interaction segment of a tokenized line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerText<'a> {
    /// Text after the preposition phrase.
    Interaction(&'a str),
    /// No preposition: the predicate form, with its optional options clause.
    Predicate { options: Option<&'a str> },
}

/// Segments of a directive line, borrowed from the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tokens<'a> {
    pub selector: &'a str,
    pub action: &'a str,
    pub trigger: TriggerText<'a>,
}

/// Why a line produced no tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Blank line.
    Empty,
    /// Commented out; dropped silently.
    Comment,
    MissingVerb,
    EmptySelector,
    EmptyAction,
    EmptyInteraction,
}

/// Split a line into selector, action clause and trigger.
///
/// The verb phrase is located first; the preposition is searched only after
/// it, so a preposition inside the selector does not split the line. With no
/// preposition the remainder is a predicate clause: a leading auxiliary word
/// (`be`) is dropped and the clause is cut at the first options phrase.
///
/// Phrases are plain substrings, not word-boundary aware.
///
/// # Example
///
/// ```
/// use shorthand_core::Grammar;
/// use shorthand_core::directive::{TriggerText, tokenize};
///
/// let grammar = Grammar::default();
/// let tokens = tokenize("#a should hide next p on click", &grammar).unwrap();
///
/// assert_eq!(tokens.selector, "#a");
/// assert_eq!(tokens.action, "hide next p");
/// assert_eq!(tokens.trigger, TriggerText::Interaction("click"));
/// ```
pub fn tokenize<'a>(line: &'a str, grammar: &Grammar) -> Result<Tokens<'a>, Rejection> {
    let line = line.trim();
    if line.is_empty() {
        return Err(Rejection::Empty);
    }
    if line.starts_with(grammar.comment.as_str()) {
        return Err(Rejection::Comment);
    }

    let verb_idx = line.find(grammar.verb.as_str()).ok_or(Rejection::MissingVerb)?;
    let selector = line[..verb_idx].trim();
    if selector.contains(grammar.comment.as_str()) {
        return Err(Rejection::Comment);
    }
    if selector.is_empty() {
        return Err(Rejection::EmptySelector);
    }

    let rest = &line[verb_idx + grammar.verb.len()..];

    let (action, trigger) = if let Some(prep_idx) = rest.find(grammar.preposition.as_str()) {
        let interaction = rest[prep_idx + grammar.preposition.len()..].trim();
        if interaction.is_empty() {
            return Err(Rejection::EmptyInteraction);
        }
        (&rest[..prep_idx], TriggerText::Interaction(interaction))
    } else {
        split_predicate(rest, grammar)
    };

    let action = action.trim();
    if action.is_empty() {
        return Err(Rejection::EmptyAction);
    }

    Ok(Tokens {
        selector,
        action,
        trigger,
    })
}

/// Split a predicate clause (`be draggable with axis x`).
fn split_predicate<'a>(clause: &'a str, grammar: &Grammar) -> (&'a str, TriggerText<'a>) {
    // The verb phrase already consumed the space before the auxiliary word.
    let clause = if clause.trim() == grammar.auxiliary.trim() {
        ""
    } else {
        clause
            .strip_prefix(grammar.auxiliary.trim_start())
            .unwrap_or(clause)
    };

    match clause.find(grammar.options.as_str()) {
        Some(idx) => {
            let options = clause[idx + grammar.options.len()..].trim();
            (
                &clause[..idx],
                TriggerText::Predicate {
                    options: (!options.is_empty()).then_some(options),
                },
            )
        }
        None => (clause, TriggerText::Predicate { options: None }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tok(line: &str) -> Result<Tokens<'_>, Rejection> {
        tokenize(line, &Grammar::default())
    }

    #[test]
    fn test_event_form() {
        assert_eq!(
            tok("#a should hide self on click"),
            Ok(Tokens {
                selector: "#a",
                action: "hide self",
                trigger: TriggerText::Interaction("click"),
            })
        );
    }

    #[test]
    fn test_chained_actions_kept_whole() {
        let tokens = tok("#a should hide self and show #b on mouseenter").unwrap();
        assert_eq!(tokens.action, "hide self and show #b");
        assert_eq!(tokens.trigger, TriggerText::Interaction("mouseenter"));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let tokens = tok("   .tab   should   toggle self on click  ").unwrap();
        assert_eq!(tokens.selector, ".tab");
        assert_eq!(tokens.action, "toggle self");
    }

    #[test]
    fn test_load_interaction_is_plain_text_here() {
        let tokens = tok("#banner should hide self on load").unwrap();
        assert_eq!(tokens.trigger, TriggerText::Interaction("load"));
    }

    #[test]
    fn test_predicate_form() {
        assert_eq!(
            tok("#panel should be draggable"),
            Ok(Tokens {
                selector: "#panel",
                action: "draggable",
                trigger: TriggerText::Predicate { options: None },
            })
        );
    }

    #[test]
    fn test_predicate_with_options() {
        assert_eq!(
            tok("#panel should be draggable with axis x"),
            Ok(Tokens {
                selector: "#panel",
                action: "draggable",
                trigger: TriggerText::Predicate {
                    options: Some("axis x"),
                },
            })
        );
    }

    #[test]
    fn test_no_preposition_without_auxiliary_is_predicate() {
        let tokens = tok("#a should hide self").unwrap();
        assert_eq!(tokens.action, "hide self");
        assert_eq!(tokens.trigger, TriggerText::Predicate { options: None });
    }

    #[test]
    fn test_missing_verb() {
        assert_eq!(tok("#a hide self on click"), Err(Rejection::MissingVerb));
        assert_eq!(tok("garbage"), Err(Rejection::MissingVerb));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(tok(""), Err(Rejection::Empty));
        assert_eq!(tok("   "), Err(Rejection::Empty));
        assert_eq!(tok("// #a should hide self on click"), Err(Rejection::Comment));
        assert_eq!(tok("#a // should hide self on click"), Err(Rejection::Comment));
    }

    #[test]
    fn test_empty_segments() {
        assert_eq!(tok("should hide on click"), Err(Rejection::MissingVerb));
        assert_eq!(tok(" x should  on click"), Err(Rejection::EmptyAction));
        assert_eq!(tok("#a should be"), Err(Rejection::EmptyAction));
    }

    #[test]
    fn test_preposition_only_searched_after_verb() {
        let tokens = tok("li.on should hide self on click").unwrap();
        assert_eq!(tokens.selector, "li.on");

        let tokens = tok("#go on should hide self on click").unwrap();
        assert_eq!(tokens.selector, "#go on");
        assert_eq!(tokens.action, "hide self");
    }

    #[test]
    fn test_separator_inside_action_splits_early() {
        // Known limitation: phrases are not word-boundary aware.
        let tokens = tok("#a should load 'carry on .html' into #b on click").unwrap();
        assert_eq!(tokens.action, "load 'carry");
        assert_eq!(tokens.trigger, TriggerText::Interaction(".html' into #b on click"));
    }

    #[test]
    fn test_custom_grammar() {
        let grammar = Grammar {
            verb: " will ".to_owned(),
            preposition: " when ".to_owned(),
            ..Grammar::default()
        };
        let tokens = tokenize("#a will hide self when click", &grammar).unwrap();
        assert_eq!(tokens.selector, "#a");
        assert_eq!(tokens.action, "hide self");
        assert_eq!(tokens.trigger, TriggerText::Interaction("click"));
    }
}
