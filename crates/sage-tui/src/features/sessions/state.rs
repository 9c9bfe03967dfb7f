use sage_core::api::Session;

/// Sidebar row view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow<'a> {
    pub id: i64,
    pub title: &'a str,
    /// The session currently loaded in the transcript.
    pub active: bool,
    /// The row under the sidebar cursor.
    pub selected: bool,
}

/// Session list as last fetched, plus the current-session tracker.
#[derive(Debug, Default)]
pub struct SessionsState {
    current_id: Option<i64>,
    sessions: Vec<Session>,
    selected: usize,
}

impl SessionsState {
    pub fn current_id(&self) -> Option<i64> {
        self.current_id
    }

    pub fn set_current(&mut self, id: Option<i64>) {
        self.current_id = id;
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Replaces the visible list, keeping the cursor on the same session
    /// when it is still listed.
    pub fn render_sessions(&mut self, sessions: Vec<Session>) {
        let selected_id = self.selected_session().map(|s| s.id);
        self.sessions = sessions;
        self.selected = selected_id
            .and_then(|id| self.sessions.iter().position(|s| s.id == id))
            .unwrap_or(0);
    }

    pub fn rows(&self) -> Vec<SessionRow<'_>> {
        self.sessions
            .iter()
            .enumerate()
            .map(|(i, s)| SessionRow {
                id: s.id,
                title: &s.title,
                active: self.current_id == Some(s.id),
                selected: i == self.selected,
            })
            .collect()
    }

    pub fn selected_session(&self) -> Option<&Session> {
        self.sessions.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.sessions.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
