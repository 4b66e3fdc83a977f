//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{ListSummary, UpcomingGroup};

/// Newtype wrapper for displaying list summaries in sidebar order.
///
/// # Examples
///
/// ```rust
/// use tasqe_core::{display::ListSummaries, models::ListSummary};
///
/// let summaries = ListSummaries(vec![ListSummary::new("Week", &[], true, None)]);
/// assert!(summaries.to_string().contains("## Week ★"));
/// assert_eq!(ListSummaries(vec![]).to_string(), "No lists yet.\n");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ListSummaries(pub Vec<ListSummary>);

impl ListSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&ListSummary> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListSummary> {
        self.0.iter()
    }
}

impl Index<usize> for ListSummaries {
    type Output = ListSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for ListSummaries {
    type Item = ListSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ListSummaries {
    type Item = &'a ListSummary;
    type IntoIter = std::slice::Iter<'a, ListSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ListSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No lists yet.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// Dated tasks grouped by list and category, earliest first.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingTasks(pub Vec<UpcomingGroup>);

impl UpcomingTasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UpcomingGroup> {
        self.0.iter()
    }
}

impl Index<usize> for UpcomingTasks {
    type Output = UpcomingGroup;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for UpcomingTasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "Nothing due.")
        } else {
            for group in &self.0 {
                write!(f, "{group}")?;
            }
            Ok(())
        }
    }
}

/// Recent queries, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHistory(pub Vec<String>);

impl QueryHistory {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl fmt::Display for QueryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No recent queries.");
        }
        for (i, query) in self.0.iter().enumerate() {
            // Keep multi-line queries on one list item.
            writeln!(f, "{}. {}", i + 1, query.replace('\n', " "))?;
        }
        Ok(())
    }
}
