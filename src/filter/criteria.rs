use std::collections::BTreeMap;

/// Sentinel value that disables a dimension.
pub const ALL: &str = "all";

/// Selected value for one filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    /// `"all"` (any case) and blank input both mean no constraint.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(ALL) {
            Self::All
        } else {
            Self::Value(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// A missing field never matches a concrete selection.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Value(wanted) => value.is_some_and(|v| v.trim().eq_ignore_ascii_case(wanted)),
        }
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Dimension name to selection. Dimensions never set behave as `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    selections: BTreeMap<String, Selection>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterCriteria::set`].
    pub fn with(mut self, dimension: &str, selection: impl Into<Selection>) -> Self {
        self.set(dimension, selection);
        self
    }

    pub fn set(&mut self, dimension: &str, selection: impl Into<Selection>) {
        match selection.into() {
            Selection::All => {
                self.selections.remove(dimension);
            }
            value => {
                self.selections.insert(dimension.to_string(), value);
            }
        }
    }

    pub fn get(&self, dimension: &str) -> &Selection {
        static UNSET: Selection = Selection::All;
        self.selections.get(dimension).unwrap_or(&UNSET)
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Active (non-`All`) selections in dimension order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &Selection)> {
        self.selections.iter().map(|(k, v)| (k.as_str(), v))
    }
}
