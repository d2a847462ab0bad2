//! The variable store behind `SET` directives and `$name` references.

use std::borrow::Cow;

use indexmap::IndexMap;

/// Mapping of variable name (without the `$` sigil) to substitution text.
///
/// Iteration follows insertion order. Redefining a name replaces its value
/// but keeps its original position, so substitution order is stable for a
/// whole parse session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    values: IndexMap<String, String>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// The current value of `name`, if defined.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Replace every `$name` token in `line` with the variable's value.
    ///
    /// The line is scanned once from left to right. At each `$`, variables
    /// are tried in insertion order and the first name that prefixes the
    /// following text wins. Substituted text is never scanned again, and a
    /// `$` that matches no variable is kept as-is.
    ///
    /// ```
    /// # use easel_parser::VariableStore;
    /// let mut vars = VariableStore::new();
    /// vars.set("W", "200");
    /// assert_eq!(vars.substitute("SHAPE|A|0|0|$W|$H"), "SHAPE|A|0|0|200|$H");
    /// ```
    pub fn substitute<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if self.values.is_empty() || !line.contains('$') {
            return Cow::Borrowed(line);
        }

        let mut out = String::with_capacity(line.len());
        let mut rest = line;
        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let matched = self
                .values
                .iter()
                .find(|(name, _)| !name.is_empty() && after.starts_with(name.as_str()));

            match matched {
                Some((name, value)) => {
                    out.push_str(value);
                    rest = &after[name.len()..];
                }
                None => {
                    out.push('$');
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        Cow::Owned(out)
    }
}
