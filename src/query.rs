//! Observable state for remote reads and writes.
//!
//! A `Query` caches the last fetched value; a `Mutation` tracks one in-flight
//! write. Consumers subscribe to either through a `watch` receiver.

use std::future::Future;

use anyhow::Result;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> QueryState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, QueryState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Idle | QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Error(error) => Some(error),
            _ => None,
        }
    }
}

pub struct Query<T> {
    key: String,
    state: watch::Sender<QueryState<T>>,
}

impl<T: Clone> Query<T> {
    pub fn new(key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(QueryState::Idle);
        Self {
            key: key.into(),
            state,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.state.subscribe()
    }

    /// Runs `fetch` and stores its outcome. Cached data stays visible while a refetch is running.
    pub async fn resolve<F>(&self, fetch: F) -> QueryState<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.state.send_if_modified(|state| {
            if state.data().is_some() {
                return false;
            }
            *state = QueryState::Loading;
            true
        });
        tracing::debug!(key = %self.key, "fetching");

        let next = match fetch.await {
            Ok(value) => QueryState::Success(value),
            Err(error) => {
                tracing::warn!(key = %self.key, "query failed: {error:#}");
                QueryState::Error(format!("{error:#}"))
            }
        };
        self.state.send_replace(next.clone());
        next
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationState<T> {
    Idle,
    Pending,
    Success(T),
    Error(String),
}

pub struct Mutation<T> {
    key: String,
    state: watch::Sender<MutationState<T>>,
}

impl<T: Clone> Mutation<T> {
    pub fn new(key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(MutationState::Idle);
        Self {
            key: key.into(),
            state,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state(&self) -> MutationState<T> {
        self.state.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        matches!(*self.state.borrow(), MutationState::Pending)
    }

    pub fn subscribe(&self) -> watch::Receiver<MutationState<T>> {
        self.state.subscribe()
    }

    pub async fn run<F>(&self, write: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.state.send_replace(MutationState::Pending);
        tracing::debug!(key = %self.key, "mutation pending");

        match write.await {
            Ok(value) => {
                self.state.send_replace(MutationState::Success(value.clone()));
                Ok(value)
            }
            Err(error) => {
                self.state.send_replace(MutationState::Error(format!("{error:#}")));
                Err(error)
            }
        }
    }
}
