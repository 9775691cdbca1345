//! Read access to the save document.
//!
//! Everything else in the crate reads raw records through [`Record`], which
//! wraps one XML element and resolves chained child lookups. A missing step
//! is data, not failure: lookups return `None` (or the caller's default).

use std::fmt;
use std::str::FromStr;

use roxmltree::Node;

/// One element of the save document, borrowed for the duration of a pass.
#[derive(Clone, Copy)]
pub struct Record<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> Record<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }

    pub fn tag(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// The `Class` attribute, which the game uses as the record kind.
    pub fn class(&self) -> Option<&'a str> {
        self.node
            .attributes()
            .find(|attr| attr.name().eq_ignore_ascii_case("class"))
            .map(|attr| attr.value())
    }

    /// Direct child element with the given tag. Deeper descendants are not searched.
    pub fn child(&self, tag: &str) -> Option<Record<'a, 'input>> {
        self.node
            .children()
            .find(|c| c.is_element() && c.tag_name().name().eq_ignore_ascii_case(tag))
            .map(Record::new)
    }

    pub fn children(&self) -> Vec<Record<'a, 'input>> {
        self.node
            .children()
            .filter(|c| c.is_element())
            .map(Record::new)
            .collect()
    }

    /// Follows `path` one direct child at a time and returns the trimmed text
    /// of the final element.
    pub fn resolve(&self, path: &[&str]) -> Option<&'a str> {
        let target = self.descend(path)?;
        let text = target.node.text()?.trim();
        if text.is_empty() { None } else { Some(text) }
    }

    pub fn get_or(&self, path: &[&str], default: &'a str) -> &'a str {
        self.resolve(path).unwrap_or(default)
    }

    /// Resolves and parses `path`. Unparseable text is logged and treated as absent.
    pub fn parse<T: FromStr>(&self, path: &[&str]) -> Option<T> {
        let raw = self.resolve(path)?;
        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::debug!(path = %path.join("/"), raw, "ignoring unparseable value");
                None
            }
        }
    }

    pub fn flag(&self, path: &[&str]) -> bool {
        self.resolve(path)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// The `li` entries of the list element found at `path`.
    pub fn list(&self, path: &[&str]) -> Vec<Record<'a, 'input>> {
        let Some(target) = self.descend(path) else {
            return Vec::new();
        };
        target
            .children()
            .into_iter()
            .filter(|c| c.tag().eq_ignore_ascii_case("li"))
            .collect()
    }

    /// Every element below this one (at any depth) with the given tag.
    pub fn descendants(&self, tag: &str) -> Vec<Record<'a, 'input>> {
        self.node
            .descendants()
            .skip(1)
            .filter(|n| n.is_element() && n.tag_name().name().eq_ignore_ascii_case(tag))
            .map(Record::new)
            .collect()
    }

    fn descend(&self, path: &[&str]) -> Option<Record<'a, 'input>> {
        path.iter().try_fold(*self, |current, field| current.child(field))
    }
}

impl fmt::Debug for Record<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("tag", &self.tag())
            .field("class", &self.class())
            .field("def", &self.resolve(&["def"]))
            .finish()
    }
}
