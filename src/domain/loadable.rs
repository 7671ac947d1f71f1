//! Explicit loading state for a dashboard data source.

use crate::error::AppError;
use std::future::Future;
use std::time::Duration;

/// State of one data source feeding the dashboard.
#[derive(Debug)]
pub enum Loadable<T> {
    /// Not resolved yet (the fetch missed its deadline).
    Loading,
    Ready(T),
    Failed(AppError),
}

impl<T> Loadable<T> {
    /// Awaits `fut` for at most `deadline`.
    ///
    /// A timeout yields [`Loadable::Loading`], an error [`Loadable::Failed`].
    pub async fn fetch<F>(deadline: Duration, fut: F) -> Self
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(deadline, fut).await {
            Ok(Ok(value)) => Loadable::Ready(value),
            Ok(Err(e)) => Loadable::Failed(e),
            Err(_) => Loadable::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Ready(value) => Loadable::Ready(f(value)),
            Loadable::Failed(e) => Loadable::Failed(e),
        }
    }

    /// Combines two sources. The first failure wins over any loading state.
    pub fn zip<U>(self, other: Loadable<U>) -> Loadable<(T, U)> {
        match (self, other) {
            (Loadable::Ready(a), Loadable::Ready(b)) => Loadable::Ready((a, b)),
            (Loadable::Failed(e), _) | (_, Loadable::Failed(e)) => Loadable::Failed(e),
            _ => Loadable::Loading,
        }
    }

    /// Combines four sources into one; ready only when all four are.
    pub fn all4<B, C, D>(
        a: Loadable<T>,
        b: Loadable<B>,
        c: Loadable<C>,
        d: Loadable<D>,
    ) -> Loadable<(T, B, C, D)> {
        a.zip(b)
            .zip(c.zip(d))
            .map(|((a, b), (c, d))| (a, b, c, d))
    }
}
