use crate::models::ThemeSet;

/// Identifies one fetch issued by a results view
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Owns the visible state of one results view
///
/// Every fetch gets a ticket from [`begin`](Self::begin). When fetches
/// overlap (the user hits "regenerate" before the previous one resolved)
/// only the completion carrying the most recently issued ticket is applied;
/// older completions are dropped.
#[derive(Debug, Default)]
pub struct RequestCoordinator {
    issued: u64,
    latest: Option<RequestTicket>,
    loading: bool,
    themes: Option<ThemeSet>,
}

impl RequestCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, superseding any in flight
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        let ticket = RequestTicket(self.issued);
        self.latest = Some(ticket);
        self.loading = true;
        ticket
    }

    /// Apply a finished fetch; returns false when the ticket is stale
    pub fn complete(&mut self, ticket: RequestTicket, themes: ThemeSet) -> bool {
        if self.latest != Some(ticket) {
            tracing::debug!(ticket = ticket.id(), latest = ?self.latest.map(|t| t.id()), "discarding stale response");
            return false;
        }

        self.themes = Some(themes.ranked());
        self.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn themes(&self) -> Option<&ThemeSet> {
        self.themes.as_ref()
    }

    /// Whether the demo-data advisory should be shown
    pub fn showing_mock_data(&self) -> bool {
        self.themes.as_ref().is_some_and(|t| t.is_mock_data)
    }
}
