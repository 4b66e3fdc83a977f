//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::{
    merge::MergeReport,
    models::MergeMode,
    organizer::GenerateOutcome,
    pipeline::Rejection,
};

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.created {
            writeln!(f, "Created list '{}'.", self.list_name)
        } else {
            match self.mode {
                MergeMode::Replace => writeln!(f, "Replaced list '{}'.", self.list_name),
                MergeMode::Append => writeln!(
                    f,
                    "Appended to list '{}': {} new categories, {} tasks added to existing ones.",
                    self.list_name, self.categories_added, self.tasks_appended
                ),
            }
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl fmt::Display for GenerateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateOutcome::Merged { document, report } => {
                write!(f, "{report}")?;
                writeln!(f)?;
                write!(f, "{document}")
            }
            GenerateOutcome::Rejected(rejection) => writeln!(f, "{rejection}"),
        }
    }
}
