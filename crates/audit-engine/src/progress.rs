//! Progress reporting for long analyses

/// Observer notified once per classified clause
pub trait ProgressObserver: Send + Sync {
    /// `completed` clauses out of `total` have been classified
    fn clause_classified(&self, completed: usize, total: usize);
}

/// Observer that ignores all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn clause_classified(&self, _completed: usize, _total: usize) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn clause_classified(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}
