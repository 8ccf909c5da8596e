//! Async list-state machinery
//!
//! Every data-consuming view owns one [`ListState`] machine fed by a
//! [`feed::SentimentFeed`]. The machine has three transitions and no
//! terminal state; it is re-entered on every parameter change.

pub mod cache;
pub mod feed;

#[cfg(test)]
mod tests;

/// Async fetch phase wrapper for a list of rows.
///
/// Exactly one of loading, error, or settled-with-data describes the
/// current phase. An error keeps the previous rows visible
/// (last-known-good display policy).
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub data: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Transition applied to a [`ListState`]
#[derive(Debug, Clone)]
pub enum ListAction<T> {
    Loading,
    Success(Vec<T>),
    Error(String),
}

impl<T> ListState<T> {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn apply(&mut self, action: ListAction<T>) {
        match action {
            ListAction::Loading => {
                self.loading = true;
                self.error = None;
            }
            ListAction::Success(data) => {
                self.data = data;
                self.loading = false;
                self.error = None;
            }
            ListAction::Error(message) => {
                // Stale data stays visible alongside the error
                self.error = Some(message);
                self.loading = false;
            }
        }
    }

    /// Settled successfully: not loading, no error
    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none()
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod state_tests {
    use super::*;

    #[test]
    fn test_initial_state_is_loading() {
        let state: ListState<u32> = ListState::new();
        assert!(state.loading);
        assert!(state.error.is_none());
        assert!(state.data.is_empty());
        assert!(!state.is_ready());
    }

    #[test]
    fn test_success_replaces_data_and_clears_error() {
        let mut state = ListState::new();
        state.apply(ListAction::Error("boom".into()));
        state.apply(ListAction::Success(vec![1, 2, 3]));

        assert_eq!(state.data, vec![1, 2, 3]);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.is_ready());
    }

    #[test]
    fn test_error_retains_previous_data() {
        let mut state = ListState::new();
        state.apply(ListAction::Success(vec![7]));
        state.apply(ListAction::Error("fetch failed".into()));

        assert_eq!(state.data, vec![7]);
        assert_eq!(state.error.as_deref(), Some("fetch failed"));
        assert!(!state.loading);
    }

    #[test]
    fn test_loading_clears_error_keeps_data() {
        let mut state = ListState::new();
        state.apply(ListAction::Success(vec![7]));
        state.apply(ListAction::Error("fetch failed".into()));
        state.apply(ListAction::Loading);

        assert!(state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.data, vec![7]);
    }
}
