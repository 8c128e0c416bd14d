use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Runs `jobs` concurrently, at most `limit` at a time, and joins them.
///
/// Results come back in job order regardless of completion order. Dropping the
/// returned future aborts every job still in flight.
pub(crate) async fn join_bounded<T, Fut>(jobs: Vec<Fut>, limit: usize) -> Vec<T>
where
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let permits = Arc::new(Semaphore::new(limit.clamp(1, Semaphore::MAX_PERMITS)));
    let mut set = JoinSet::new();
    let total = jobs.len();

    for (index, job) in jobs.into_iter().enumerate() {
        let permits = Arc::clone(&permits);
        set.spawn(async move {
            let _permit = permits.acquire_owned().await;
            (index, job.await)
        });
    }

    let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, value)) => slots[index] = Some(value),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => tracing::warn!("Fan-out job cancelled: {}", e),
        }
    }

    slots.into_iter().flatten().collect()
}
