use crate::view_model::{AppViewModel, JobRowView};
use crate::{Endpoint, EndpointStore, InvalidEndpoint, JobRecord};

/// Comment limit sent with each submission unless the operator changes it.
pub const DEFAULT_COMMENT_LIMIT: u32 = 1000;

/// Last snapshot of jobs reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobTable {
    rows: Vec<JobRecord>,
}

impl JobTable {
    pub fn rows(&self) -> &[JobRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replaces the whole table; rows are never merged.
    pub(crate) fn replace(&mut self, rows: Vec<JobRecord>) {
        self.rows = rows;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PollHealth {
    /// No status response yet.
    #[default]
    Waiting,
    Ok {
        at: String,
    },
    Failing {
        consecutive: u32,
        last_error: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    endpoint: EndpointStore,
    limit: u32,
    input: String,
    filter: Option<String>,
    table: JobTable,
    poll: PollHealth,
    submissions_in_flight: usize,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_endpoint(Endpoint::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self {
            endpoint: EndpointStore::new(endpoint),
            limit: DEFAULT_COMMENT_LIMIT,
            input: String::new(),
            filter: None,
            table: JobTable::default(),
            poll: PollHealth::default(),
            submissions_in_flight: 0,
            dirty: false,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        self.endpoint.get()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn table(&self) -> &JobTable {
        &self.table
    }

    pub fn poll_health(&self) -> &PollHealth {
        &self.poll
    }

    pub fn view(&self) -> AppViewModel {
        let needle = self.filter.as_deref().map(str::to_lowercase);
        let rows = self
            .table
            .rows()
            .iter()
            .map(JobRowView::from_record)
            .filter(|row| needle.as_deref().map_or(true, |n| row.matches(n)))
            .collect();

        AppViewModel {
            endpoint: self.endpoint.get().to_string(),
            limit: self.limit,
            pending_lines: self.input.lines().filter(|l| !l.trim().is_empty()).count(),
            submissions_in_flight: self.submissions_in_flight,
            filter: self.filter.clone(),
            poll: self.poll.clone(),
            total_rows: self.table.len(),
            rows,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_endpoint(&mut self, candidate: &str) -> Result<Endpoint, InvalidEndpoint> {
        let endpoint = self.endpoint.set(candidate)?;
        self.mark_dirty();
        Ok(endpoint)
    }

    pub(crate) fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
        self.mark_dirty();
    }

    pub(crate) fn append_input(&mut self, line: &str) {
        if !self.input.is_empty() {
            self.input.push('\n');
        }
        self.input.push_str(line);
        self.mark_dirty();
    }

    pub(crate) fn clear_input(&mut self) {
        if !self.input.is_empty() {
            self.input.clear();
            self.mark_dirty();
        }
    }

    pub(crate) fn set_filter(&mut self, filter: Option<String>) {
        let filter = filter
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());
        if self.filter != filter {
            self.filter = filter;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_submission(&mut self) {
        self.submissions_in_flight += 1;
        self.mark_dirty();
    }

    pub(crate) fn finish_submission(&mut self) {
        self.submissions_in_flight = self.submissions_in_flight.saturating_sub(1);
        self.mark_dirty();
    }

    pub(crate) fn apply_snapshot(&mut self, rows: Vec<JobRecord>, at: String) {
        self.table.replace(rows);
        self.poll = PollHealth::Ok { at };
        self.mark_dirty();
    }

    pub(crate) fn note_poll_ok(&mut self, at: String) {
        self.poll = PollHealth::Ok { at };
        self.mark_dirty();
    }

    pub(crate) fn note_poll_failure(&mut self, message: String) {
        let consecutive = match &self.poll {
            PollHealth::Failing { consecutive, .. } => consecutive + 1,
            _ => 1,
        };
        self.poll = PollHealth::Failing {
            consecutive,
            last_error: message,
        };
        self.mark_dirty();
    }
}
