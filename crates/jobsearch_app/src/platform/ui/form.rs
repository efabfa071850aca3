use jobsearch_core::{FilterState, Provider, TimeWindow};

use super::commands::FormEdit;

/// Draft filters edited between submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
    draft: FilterState,
}

impl FilterForm {
    pub fn new(draft: FilterState) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &FilterState {
        &self.draft
    }

    /// Applies an edit, refusing fields the provider ignores.
    pub fn apply(&mut self, edit: FormEdit, provider: Provider) -> Result<(), String> {
        if provider == Provider::Active {
            let unsupported = match &edit {
                FormEdit::Description(_) => Some("description"),
                FormEdit::Source(_) => Some("source"),
                FormEdit::Remote(_) => Some("remote"),
                FormEdit::TimeWindow(_) => Some("window"),
                _ => None,
            };
            if let Some(field) = unsupported {
                return Err(format!(
                    "{field} is not supported by Active Jobs DB (title, location and limit only)"
                ));
            }
        }

        match edit {
            FormEdit::Title(text) => self.draft.title_filter = text,
            FormEdit::Location(text) => self.draft.location_filter = text,
            FormEdit::Description(text) => self.draft.description_filter = text,
            FormEdit::Source(text) => self.draft.source = text,
            FormEdit::Remote(remote) => self.draft.remote = remote,
            FormEdit::IncludeAi(include) => self.draft.include_ai = include,
            FormEdit::TimeWindow(window) => self.draft.time_window = window,
            FormEdit::Limit(limit) => self.draft.limit = limit,
        }
        Ok(())
    }

    /// Active Jobs DB only serves the last 24 hours, so the window is pinned.
    pub fn sync_provider(&mut self, provider: Provider) {
        if provider == Provider::Active {
            self.draft.time_window = TimeWindow::Day;
        }
    }
}
