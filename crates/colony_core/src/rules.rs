#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
    Suffix(&'static str),
    Contains(&'static str),
}

impl Pattern {
    pub fn matches(&self, subject: &str) -> bool {
        match *self {
            Self::Exact(p) => subject == p,
            Self::Prefix(p) => subject.starts_with(p),
            Self::Suffix(p) => subject.ends_with(p),
            Self::Contains(p) => subject.contains(p),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule<T> {
    pub pattern: Pattern,
    pub outcome: T,
}

impl<T> Rule<T> {
    pub const fn new(pattern: Pattern, outcome: T) -> Self {
        Self { pattern, outcome }
    }
}

pub fn first_match<T: Copy>(rules: &[Rule<T>], subject: &str) -> Option<T> {
    rules
        .iter()
        .find(|rule| rule.pattern.matches(subject))
        .map(|rule| rule.outcome)
}

/// Every rule that matches, in table order.
pub fn all_matches<T: Copy>(rules: &[Rule<T>], subject: &str) -> Vec<T> {
    rules
        .iter()
        .filter(|rule| rule.pattern.matches(subject))
        .map(|rule| rule.outcome)
        .collect()
}
