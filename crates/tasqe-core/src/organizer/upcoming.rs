//! Upcoming view: dated tasks across every list.

use std::collections::BTreeMap;

use jiff::{civil::Date, ToSpan};

use super::Organizer;
use crate::{
    display::UpcomingTasks,
    error::Result,
    models::{Category, UpcomingGroup},
    params::{parse_date, Upcoming},
};

/// Days ahead covered when the selected day is today.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

impl Organizer {
    /// Dated tasks due up to the cutoff derived from the selected day.
    pub async fn upcoming(&self, params: &Upcoming) -> Result<UpcomingTasks> {
        let today = self.config.today();
        let selected = parse_date("day", params.day.as_deref())?.unwrap_or(today);
        let state = self.store.load().await?;
        Ok(UpcomingTasks(collect_upcoming(&state.lists, today, selected)))
    }
}

/// Groups dated tasks by list and category, ordered by earliest due date.
///
/// The cutoff is [`UPCOMING_WINDOW_DAYS`] after `today` when `selected` is
/// today, otherwise `selected` itself. Undone overdue tasks stay visible; done
/// tasks dated before `today` are hidden.
pub fn collect_upcoming(
    lists: &BTreeMap<String, Vec<Category>>,
    today: Date,
    selected: Date,
) -> Vec<UpcomingGroup> {
    let cutoff = if selected == today {
        today.saturating_add(UPCOMING_WINDOW_DAYS.days())
    } else {
        selected
    };

    let mut groups: Vec<UpcomingGroup> = lists
        .iter()
        .flat_map(|(list_name, categories)| {
            categories.iter().filter_map(move |category| {
                let items: Vec<_> = category
                    .items
                    .iter()
                    .filter(|task| match task.date {
                        Some(due) => !(task.done && due < today) && due <= cutoff,
                        None => false,
                    })
                    .cloned()
                    .collect();

                (!items.is_empty()).then(|| UpcomingGroup {
                    list_name: list_name.clone(),
                    category_name: category.name.clone(),
                    items,
                })
            })
        })
        .collect();

    groups.sort_by_key(UpcomingGroup::earliest);
    groups
}
