//! Instruction templates for the two model stages.
//!
//! Both templates take the current date so the model can resolve relative due
//! dates ("next Friday") into absolute ones.

use jiff::civil::Date;

const EXTRACTION_TEMPLATE: &str = r#"Today is {date}.

The user will pass in a large text blob talking about their week. Take in what the user has given and create a to-do list for them to tackle all of the items that they've talked about.

Format the list as a plain markdown bulleted outline with exactly three levels:

- Section: a broad category grouping related tasks, such as "Health", "Academics" or "Work".
  - Task: `name - due date - time estimate - description`. Resolve relative dates against today's date and write due dates as YYYY-MM-DD. Leave the due date out if none is implied.
    - Subtask: `name - time estimate`. Subtasks never have dates. Only add subtasks when a task is sufficiently complex.

Provide time estimations for every task and subtask where possible.
Output only plain markdown. Do NOT use HTML tags, emojis or decorative formatting.
Print out only the list, nothing else. Do not add extraneous text at the beginning or end, nor talk to the user."#;

const STRUCTURING_TEMPLATE: &str = r#"Today is {date}.

The user will pass in a markdown-formatted to-do list. Generate structured output based on the passed in input, following the JSON schema.

Mapping rules:
- Each top-level section becomes a category: its heading is the category `name` and its tasks are the category `items`.
- Each task line `name - due date - time estimate - description` maps to `name`, `date`, `time` and `descr`.
- `date` holds the due date as YYYY-MM-DD, or null when the task has no due date.
- `time` holds the time estimate as written, for example "45 mins" or "2 hrs".
- Each nested subtask line `name - time estimate` maps to a subtask `name` and `time`. Subtasks have no date.
- `done` is false unless the list says the item is already finished.

Infer fields if none are provided rather than failing. Use null for `subtasks` when a task has none."#;

/// Human-readable form of the date used inside the templates.
pub fn format_date(today: Date) -> String {
    today.strftime("%A, %B %d, %Y (%Y-%m-%d)").to_string()
}

/// System prompt for stage 1: prose to markdown outline.
pub fn extraction_prompt(today: Date) -> String {
    EXTRACTION_TEMPLATE.replace("{date}", &format_date(today))
}

/// System prompt for stage 2: markdown outline to structured JSON.
pub fn structuring_prompt(today: Date) -> String {
    STRUCTURING_TEMPLATE.replace("{date}", &format_date(today))
}
