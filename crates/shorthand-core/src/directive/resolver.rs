//! Binding tokenized lines to live elements.

use tracing::debug;

use super::tokenizer::{Rejection, TriggerText, tokenize};
use super::{Directive, Trigger};
use crate::diagnostic::Diagnostic;
use crate::dom::ElementLookup;
use crate::grammar::Grammar;

/// Tokenize a line and resolve its selector against the document.
///
/// Returns `Ok(None)` for blank and commented-out lines, and a diagnostic for
/// malformed lines or selectors matching nothing. The selector is resolved
/// exactly once; later document changes are not tracked.
pub fn resolve<L>(line: &str, grammar: &Grammar, lookup: &L) -> Result<Option<Directive>, Diagnostic>
where
    L: ElementLookup + ?Sized,
{
    let raw = line.trim();
    let tokens = match tokenize(raw, grammar) {
        Ok(tokens) => tokens,
        Err(Rejection::Empty) => return Ok(None),
        Err(Rejection::Comment) => {
            debug!(line = raw, "skipping commented directive");
            return Ok(None);
        }
        Err(rejection) => return Err(rejection_diagnostic(rejection, raw)),
    };

    let bound = lookup.select(tokens.selector);
    if bound.is_empty() {
        return Err(Diagnostic::NoMatch {
            line: raw.to_owned(),
        });
    }

    let (trigger, options) = match tokens.trigger {
        TriggerText::Interaction(event) if event == grammar.load_sentinel => (Trigger::Load, None),
        TriggerText::Interaction(event) => (Trigger::Event(event.to_owned()), None),
        TriggerText::Predicate { options } => (Trigger::Predicate, options.map(str::to_owned)),
    };

    debug!(
        selector = tokens.selector,
        action = tokens.action,
        elements = bound.len(),
        "resolved directive"
    );

    Ok(Some(Directive {
        raw: raw.to_owned(),
        selector: tokens.selector.to_owned(),
        action: tokens.action.to_owned(),
        trigger,
        options,
        bound,
    }))
}

fn rejection_diagnostic(rejection: Rejection, line: &str) -> Diagnostic {
    let line = line.to_owned();
    match rejection {
        Rejection::MissingVerb => Diagnostic::MissingVerb { line },
        Rejection::EmptySelector => Diagnostic::EmptySelector { line },
        Rejection::EmptyInteraction => Diagnostic::EmptyInteraction { line },
        Rejection::EmptyAction | Rejection::Empty | Rejection::Comment => {
            Diagnostic::EmptyAction { line }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPage;
    use pretty_assertions::assert_eq;

    fn page() -> MockPage {
        MockPage::new()
            .with("button#open")
            .with("p.note")
            .with("p.note")
    }

    #[test]
    fn test_resolves_event_directive() {
        let page = page();
        let directive = resolve("#open should show .note on click", &Grammar::default(), &page)
            .unwrap()
            .unwrap();

        assert_eq!(
            directive,
            Directive {
                raw: "#open should show .note on click".to_owned(),
                selector: "#open".to_owned(),
                action: "show .note".to_owned(),
                trigger: Trigger::Event("click".to_owned()),
                options: None,
                bound: vec![page.id("open")],
            }
        );
    }

    #[test]
    fn test_binds_every_match() {
        let page = page();
        let directive = resolve(".note should hide self on click", &Grammar::default(), &page)
            .unwrap()
            .unwrap();
        assert_eq!(directive.bound.len(), 2);
    }

    #[test]
    fn test_load_sentinel() {
        let directive = resolve("#open should hide self on load", &Grammar::default(), &page())
            .unwrap()
            .unwrap();
        assert_eq!(directive.trigger, Trigger::Load);
        assert_eq!(directive.interaction(), Some("load"));
        assert!(!directive.is_event_bound());
    }

    #[test]
    fn test_predicate_keeps_options() {
        let directive = resolve(
            "#open should be draggable with axis x",
            &Grammar::default(),
            &page(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(directive.trigger, Trigger::Predicate);
        assert_eq!(directive.options.as_deref(), Some("axis x"));
        assert_eq!(directive.interaction(), None);
    }

    #[test]
    fn test_unmatched_selector_is_rejected() {
        let result = resolve("#missing should hide self on click", &Grammar::default(), &page());
        assert_eq!(
            result,
            Err(Diagnostic::NoMatch {
                line: "#missing should hide self on click".to_owned()
            })
        );
    }

    #[test]
    fn test_missing_verb_is_rejected() {
        let result = resolve("#open hides on click", &Grammar::default(), &page());
        assert!(matches!(result, Err(Diagnostic::MissingVerb { .. })));
    }

    #[test]
    fn test_comment_and_blank_skipped_silently() {
        assert_eq!(resolve("", &Grammar::default(), &page()), Ok(None));
        assert_eq!(
            resolve("// #open should hide self on click", &Grammar::default(), &page()),
            Ok(None)
        );
    }
}
