use crate::error::AppError;
use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(AppError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// A fetch owned by a view.
///
/// The fetch runs on the tokio runtime and publishes its outcome as a
/// `LoadState`. Dropping the task aborts the fetch, so nothing is published
/// after the owning view is gone.
pub struct ViewTask<T> {
    handle: JoinHandle<()>,
    state: watch::Receiver<LoadState<T>>,
}

impl<T> ViewTask<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn spawn<Fut>(fetch: Fut) -> Self
    where
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    {
        let (tx, state) = watch::channel(LoadState::Loading);
        let handle = tokio::spawn(async move {
            let outcome = match fetch.await {
                Ok(value) => LoadState::Loaded(value),
                Err(e) => LoadState::Failed(e),
            };
            let _ = tx.send(outcome);
        });
        Self { handle, state }
    }

    pub fn state(&self) -> LoadState<T> {
        self.state.borrow().clone()
    }

    /// Waits for the fetch to settle. A cancelled fetch settles as `Failed(Cancelled)`.
    pub async fn finished(&mut self) -> LoadState<T> {
        match self.state.wait_for(|s| !s.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => LoadState::Failed(AppError::Cancelled),
        }
    }

    /// Like `finished`, as a `Result`.
    pub async fn result(&mut self) -> Result<T, AppError> {
        match self.finished().await {
            LoadState::Loaded(value) => Ok(value),
            LoadState::Failed(e) => Err(e),
            LoadState::Loading => Err(AppError::Cancelled),
        }
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            tracing::debug!("Cancelling view task");
            self.handle.abort();
        }
    }
}

impl<T> Drop for ViewTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
