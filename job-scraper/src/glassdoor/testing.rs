use super::renderer::{PageRenderer, RenderedPage};
use super::{Error, Result};
use crate::types::SearchQuery;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted renderer for fetcher/scheduler tests: serves a canned
/// results page, counts every page open/close, and fails navigation for
/// configured urls without end.
pub(crate) struct MockRenderer {
    state: Arc<MockState>,
}

struct MockState {
    results_html: Option<String>,
    failing: HashSet<String>,
    navigations: Mutex<Vec<String>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

impl MockRenderer {
    pub(crate) fn new() -> Self {
        Self::with_results("<html><body></body></html>")
    }

    pub(crate) fn with_results(html: &str) -> Self {
        Self {
            state: Arc::new(MockState {
                results_html: Some(html.to_owned()),
                failing: HashSet::new(),
                navigations: Mutex::new(Vec::new()),
                opened: AtomicUsize::new(0),
                closed: AtomicUsize::new(0),
            }),
        }
    }

    /// A renderer whose results-page rendering itself fails.
    pub(crate) fn with_failing_results() -> Self {
        let mut renderer = Self::new();
        Arc::get_mut(&mut renderer.state).unwrap().results_html = None;
        renderer
    }

    /// Mark `url` as permanently unloadable.
    pub(crate) fn failing(mut self, url: &str) -> Self {
        Arc::get_mut(&mut self.state)
            .unwrap()
            .failing
            .insert(url.to_owned());
        self
    }

    /// Navigation attempts recorded for `url`.
    pub(crate) fn attempts(&self, url: &str) -> usize {
        self.state
            .navigations
            .lock()
            .unwrap()
            .iter()
            .filter(|visited| visited.as_str() == url)
            .count()
    }

    pub(crate) fn opened(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    pub(crate) fn closed(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageRenderer for MockRenderer {
    async fn render_results(&self, _query: &SearchQuery) -> Result<String> {
        self.state
            .results_html
            .clone()
            .ok_or(Error::ContentNotFound("results page"))
    }

    async fn open_page(&self) -> Result<Box<dyn RenderedPage>> {
        self.state.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockPage {
            state: self.state.clone(),
        }))
    }
}

struct MockPage {
    state: Arc<MockState>,
}

#[async_trait]
impl RenderedPage for MockPage {
    async fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<String> {
        self.state.navigations.lock().unwrap().push(url.to_owned());
        if self.state.failing.contains(url) {
            return Err(Error::ContentNotFound("scripted failure"));
        }
        Ok("<html><body><h1>Listing</h1></body></html>".to_owned())
    }

    async fn close(self: Box<Self>) {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
    }
}
