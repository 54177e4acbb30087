use std::fmt;

/// Ordered field names describing the records an operator produces.
///
/// Duplicate names are allowed. Lookup is a linear scan and always returns
/// the first matching position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Position of the first field called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve each of `names` to its position in this header.
    ///
    /// Returns the first name that cannot be found as the error value.
    pub fn positions<'a>(&self, names: &'a [String]) -> Result<Vec<usize>, &'a str> {
        names
            .iter()
            .map(|n| self.position(n).ok_or(n.as_str()))
            .collect()
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}
