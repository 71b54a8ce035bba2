//! Editable copy of an element's attributes.

use scraper::node::Element;

/// Attributes of one element as owned `(name, value)` pairs.
///
/// Edits happen on this copy; [`Document::update`](crate::Document::update)
/// writes the result back as a fresh element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    #[must_use]
    pub fn of(element: &Element) -> Self {
        Self {
            entries: element
                .attrs()
                .map(|(name, value)| (name.to_owned(), value.to_owned()))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, name: &str, value: &str) {
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => value.clone_into(existing),
            None => self.entries.push((name.to_ascii_lowercase(), value.to_owned())),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get("class").unwrap_or_default().split_whitespace()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Append `class` unless it is already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut classes: Vec<&str> = self.classes().collect();
        classes.push(class);
        let joined = classes.join(" ");
        self.set("class", &joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let remaining = self
            .classes()
            .filter(|&c| c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set("class", &remaining);
    }

    /// Inline style declarations as `(property, value)` pairs.
    #[must_use]
    pub fn styles(&self) -> Vec<(String, String)> {
        parse_style(self.get("style").unwrap_or_default())
    }

    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.styles()
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value)
    }

    /// Set one inline style property, keeping the others in order.
    pub fn set_style(&mut self, property: &str, value: &str) {
        let mut styles = self.styles();
        match styles
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
        {
            Some((_, existing)) => value.clone_into(existing),
            None => styles.push((property.to_ascii_lowercase(), value.to_owned())),
        }
        self.write_styles(&styles);
    }

    pub fn remove_style(&mut self, property: &str) {
        let mut styles = self.styles();
        styles.retain(|(name, _)| !name.eq_ignore_ascii_case(property));
        self.write_styles(&styles);
    }

    fn write_styles(&mut self, styles: &[(String, String)]) {
        if styles.is_empty() {
            self.remove("style");
        } else {
            let style = styles
                .iter()
                .map(|(name, value)| format!("{name}: {value};"))
                .collect::<Vec<_>>()
                .join(" ");
            self.set("style", &style);
        }
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_ascii_lowercase(), value.trim().to_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attributes(pairs: &[(&str, &str)]) -> Attributes {
        let mut attrs = Attributes::default();
        for (name, value) in pairs {
            attrs.set(name, value);
        }
        attrs
    }

    #[test]
    fn test_style_updates_keep_other_properties() {
        let mut attrs = attributes(&[("style", "color: red; DISPLAY:block")]);

        attrs.set_style("display", "none");
        attrs.set_style("cursor", "pointer");

        assert_eq!(
            attrs.get("style"),
            Some("color: red; display: none; cursor: pointer;")
        );
        assert_eq!(attrs.style("Display"), Some("none".to_owned()));

        attrs.remove_style("color");
        attrs.remove_style("display");
        attrs.remove_style("cursor");
        assert_eq!(attrs.get("style"), None);
    }

    #[test]
    fn test_classes() {
        let mut attrs = attributes(&[("class", "  lead  intro ")]);

        assert_eq!(attrs.classes().collect::<Vec<_>>(), vec!["lead", "intro"]);
        assert!(attrs.has_class("intro"));
        assert!(!attrs.has_class("int"));

        attrs.add_class("intro");
        attrs.add_class("seen");
        attrs.remove_class("lead");
        assert_eq!(attrs.get("class"), Some("intro seen"));
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let mut attrs = attributes(&[("Hidden", "")]);

        assert_eq!(attrs.get("hidden"), Some(""));
        attrs.remove("HIDDEN");
        assert_eq!(attrs.iter().count(), 0);
    }
}
