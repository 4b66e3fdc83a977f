//! Generation: one query through the pipeline and into a list.

use log::info;

use super::Organizer;
use crate::{
    error::Result,
    merge::MergeReport,
    models::{MergeMode, TodoDocument},
    params::{list_or_default, GenerateTodo},
    pipeline::{PipelineOutcome, Rejection},
};

/// Result of [`Organizer::generate_todo`].
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// The document was accepted and merged into a list
    Merged {
        document: TodoDocument,
        report: MergeReport,
    },
    /// The query was rejected; nothing was merged
    Rejected(Rejection),
}

impl Organizer {
    /// Runs the pipeline for `text` without touching any list.
    ///
    /// The query is still recorded in the history when it passes the filter.
    pub async fn generate(&self, text: &str) -> Result<PipelineOutcome> {
        self.pipeline.run(text).await
    }

    /// Merges an accepted document into `list` (the default list when
    /// `None` or blank).
    pub async fn accept(
        &self,
        list: Option<&str>,
        document: TodoDocument,
        mode: MergeMode,
    ) -> Result<MergeReport> {
        let list_name = list_or_default(list);
        self.merger
            .apply(&list_name, document.into_categories(), mode)
            .await
    }

    /// Generates a document and merges it in one step.
    pub async fn generate_todo(&self, params: &GenerateTodo) -> Result<GenerateOutcome> {
        match self.generate(&params.text).await? {
            PipelineOutcome::Accepted(document) => {
                let report = self
                    .accept(params.list.as_deref(), document.clone(), params.mode)
                    .await?;
                Ok(GenerateOutcome::Merged { document, report })
            }
            PipelineOutcome::Rejected(rejection) => {
                info!("Generation rejected: {}", rejection.message());
                Ok(GenerateOutcome::Rejected(rejection))
            }
        }
    }
}
