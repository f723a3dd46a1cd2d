use crate::{JobRecord, PollHealth, Resource};

/// Column headings, in display order.
pub const COLUMNS: [&str; 4] = ["Video", "Comments", "Captions", "Status"];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub endpoint: String,
    pub limit: u32,
    pub pending_lines: usize,
    pub submissions_in_flight: usize,
    pub filter: Option<String>,
    pub poll: PollHealth,
    /// Rows in the table model, before filtering.
    pub total_rows: usize,
    pub rows: Vec<JobRowView>,
    pub dirty: bool,
}

/// Display strings for one job, one per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub video: String,
    pub comments: String,
    pub captions: String,
    pub status: String,
}

impl JobRowView {
    pub fn from_record(record: &JobRecord) -> Self {
        Self {
            video: record.title_text(),
            comments: record.progress(Resource::Comments).render(),
            captions: record.progress(Resource::Captions).render(),
            status: record.status_text(),
        }
    }

    pub fn cells(&self) -> [&str; 4] {
        [
            self.video.as_str(),
            self.comments.as_str(),
            self.captions.as_str(),
            self.status.as_str(),
        ]
    }

    /// Case-insensitive substring match; `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.cells()
            .iter()
            .any(|cell| cell.to_lowercase().contains(needle))
    }
}
