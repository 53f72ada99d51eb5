use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, Receiver, Sender, error::SendError};

/// Producer half of a bounded, closable job queue.
///
/// There is exactly one producer: it is not `Clone`, and dropping it (or
/// calling [`JobSender::close`]) is the "no more jobs" signal.
pub struct JobSender<T>(Sender<T>);

impl<T: Send + 'static> JobSender<T> {
    /// Enqueue a job, waiting while the queue is full.
    ///
    /// Fails only when every consumer is gone or the queue was closed from
    /// the consumer side; the job is handed back in the error.
    #[inline]
    pub async fn send(&self, job: T) -> Result<(), SendError<T>> {
        self.0.send(job).await
    }

    /// Signal that no more jobs will be sent.
    ///
    /// Consumers keep receiving whatever is already buffered, then see `None`.
    #[inline]
    pub fn close(self) {
        drop(self);
    }

    /// Returns true once the consumer side has closed the queue or gone away
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }

    /// Number of jobs currently buffered
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.max_capacity() - self.0.capacity()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.0.max_capacity()
    }
}

/// Consumer half of the job queue, shared by every worker.
///
/// Cloning yields another handle onto the same queue; each job is delivered
/// to exactly one handle.
pub struct JobReceiver<T>(Arc<Mutex<Receiver<T>>>);

impl<T> Clone for JobReceiver<T> {
    #[inline]
    fn clone(&self) -> Self {
        JobReceiver(Arc::clone(&self.0))
    }
}

impl<T: Send + 'static> JobReceiver<T> {
    /// Take the next job.
    ///
    /// Returns `None` once the queue is closed and drained.
    #[inline]
    pub async fn recv(&self) -> Option<T> {
        self.0.lock().await.recv().await
    }

    /// Close the queue from the consumer side.
    ///
    /// Further sends fail; already buffered jobs can still be received.
    pub async fn close(&self) {
        self.0.lock().await.close();
    }
}

/// Creates a bounded job queue with the specified capacity (at least 1).
#[inline]
#[must_use]
pub fn job_queue<T>(cap: usize) -> (JobSender<T>, JobReceiver<T>) {
    let (s, r) = mpsc::channel(cap.max(1));
    (JobSender(s), JobReceiver(Arc::new(Mutex::new(r))))
}

impl<T: Send + 'static> std::fmt::Debug for JobSender<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobSender")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<T> std::fmt::Debug for JobReceiver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobReceiver")
            .field("handles", &Arc::strong_count(&self.0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn drains_buffered_jobs_after_close() {
        let (tx, rx) = job_queue(4);
        tx.send(1).await.unwrap();
        tx.send(2).await.unwrap();
        tx.close();

        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn full_queue_blocks_producer() {
        let (tx, rx) = job_queue(1);
        tx.send(1).await.unwrap();

        let blocked = tokio::time::timeout(Duration::from_millis(50), tx.send(2)).await;
        assert!(blocked.is_err(), "send should wait for capacity");

        assert_eq!(rx.recv().await, Some(1));
        tx.send(3).await.unwrap();
        assert_eq!(rx.recv().await, Some(3));
    }

    #[tokio::test]
    async fn consumer_close_rejects_new_jobs() {
        let (tx, rx) = job_queue(2);
        tx.send(1).await.unwrap();
        rx.close().await;

        assert!(tx.send(2).await.is_err());
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn each_job_reaches_one_handle() {
        let (tx, rx) = job_queue(8);
        let a = rx.clone();
        let b = rx;
        for i in 0..8 {
            tx.send(i).await.unwrap();
        }
        tx.close();

        let mut seen = Vec::new();
        while let Some(v) = a.recv().await {
            seen.push(v);
            if let Some(w) = b.recv().await {
                seen.push(w);
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
    }
}
