//! Display implementations for domain models.
//!
//! Positions are printed 1-based so they can be fed back to the task
//! commands.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Category, ListSummary, Subtask, Task, TodoDocument, TodoList, UpcomingGroup};

fn checkbox(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

impl fmt::Display for Subtask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", checkbox(self.done), self.name)?;
        if !self.time.is_empty() {
            write!(f, " ({})", self.time)?;
        }
        Ok(())
    }
}

impl Task {
    /// Single-line heading: checkbox, name, due date and estimate.
    fn fmt_heading(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} **{}**", checkbox(self.done), self.name)?;
        if let Some(date) = self.date {
            write!(f, " · due {date}")?;
        }
        if !self.time.is_empty() {
            write!(f, " · {}", self.time)?;
        }
        Ok(())
    }

    fn fmt_body(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        if let Some(descr) = &self.descr {
            writeln!(f, "{indent}*{descr}*")?;
        }
        for (i, subtask) in self.subtasks().iter().enumerate() {
            writeln!(f, "{indent}{}. {subtask}", i + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_heading(f)?;
        writeln!(f)?;
        self.fmt_body(f, "   ")
    }
}

impl Category {
    fn fmt_category(&self, f: &mut fmt::Formatter<'_>, position: Option<usize>) -> fmt::Result {
        let progress = if self.items.is_empty() {
            String::new()
        } else {
            format!(" ({}/{})", self.done_count(), self.items.len())
        };
        match position {
            Some(position) => writeln!(f, "## {position}. {}{progress}", self.name)?,
            None => writeln!(f, "## {}{progress}", self.name)?,
        }
        writeln!(f)?;

        if self.items.is_empty() {
            writeln!(f, "No tasks.")?;
        }
        for (i, task) in self.items.iter().enumerate() {
            write!(f, "{}. ", i + 1)?;
            task.fmt_heading(f)?;
            writeln!(f)?;
            task.fmt_body(f, "   ")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_category(f, None)
    }
}

impl fmt::Display for TodoDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.todo.is_empty() {
            return writeln!(f, "No categories.");
        }
        for category in &self.todo {
            write!(f, "{category}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TodoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let star = if self.favorite { " ★" } else { "" };
        writeln!(f, "# {}{star}", self.name)?;
        writeln!(f)?;
        if let Some(updated_at) = &self.updated_at {
            writeln!(f, "- Updated: {}", LocalDateTime(updated_at))?;
            writeln!(f)?;
        }

        if self.categories.is_empty() {
            return writeln!(f, "This list is empty.");
        }
        for (i, category) in self.categories.iter().enumerate() {
            category.fmt_category(f, Some(i + 1))?;
        }
        Ok(())
    }
}

impl fmt::Display for ListSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let star = if self.favorite { " ★" } else { "" };
        writeln!(
            f,
            "## {}{star} ({}/{})",
            self.name, self.done_count, self.task_count
        )?;
        writeln!(f)?;
        writeln!(f, "- **Categories**: {}", self.category_count)?;
        if let Some(updated_at) = &self.updated_at {
            writeln!(f, "- **Updated**: {}", LocalDateTime(updated_at))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for UpcomingGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} · {}", self.category_name, self.list_name)?;
        writeln!(f)?;
        for task in &self.items {
            write!(f, "- ")?;
            task.fmt_heading(f)?;
            writeln!(f)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn essay() -> Task {
        Task {
            name: "Essay".to_string(),
            descr: Some("Five pages on Keynes".to_string()),
            time: "3 hrs".to_string(),
            date: Some(date(2025, 9, 15)),
            done: false,
            subtasks: Some(vec![Subtask {
                name: "Outline".to_string(),
                time: "20 mins".to_string(),
                done: true,
            }]),
        }
    }

    #[test]
    fn test_task_display() {
        let output = essay().to_string();
        assert!(output.starts_with("[ ] **Essay** · due 2025-09-15 · 3 hrs\n"));
        assert!(output.contains("*Five pages on Keynes*"));
        assert!(output.contains("1. [x] Outline (20 mins)"));
    }

    #[test]
    fn test_list_display_numbers_positions() {
        let list = TodoList {
            name: "Week".to_string(),
            favorite: true,
            updated_at: None,
            categories: vec![
                Category::new("Academics", vec![essay(), Task::named("Reading")]),
                Category::new("Errands", vec![]),
            ],
        };
        let output = list.to_string();
        assert!(output.starts_with("# Week ★\n"));
        assert!(output.contains("## 1. Academics (0/2)"));
        assert!(output.contains("2. [ ] **Reading**\n"));
        assert!(output.contains("## 2. Errands\n\nNo tasks."));
    }

    #[test]
    fn test_empty_list_display() {
        let list = TodoList {
            name: "Blank".to_string(),
            favorite: false,
            updated_at: None,
            categories: vec![],
        };
        assert_eq!(list.to_string(), "# Blank\n\nThis list is empty.\n");
    }

    #[test]
    fn test_summary_display() {
        let summary = ListSummary::new(
            "Week",
            &[Category::new("Academics", vec![essay()])],
            false,
            None,
        );
        let output = summary.to_string();
        assert!(output.contains("## Week (0/1)"));
        assert!(output.contains("- **Categories**: 1"));
        assert!(!output.contains("Updated"));
    }
}
