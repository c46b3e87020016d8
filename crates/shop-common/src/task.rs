//! Thin wrapper around task spawning

use std::future::Future;

use tokio::task::JoinHandle;

/// Spawns a detached asynchronous task
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(future)
}
