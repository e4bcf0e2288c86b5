//! Completion barrier between the segment workers and the merge step.
//!
//! A scatter/gather over an mpsc channel: every worker owns a one-shot
//! `CompletionSignal` and the waiting side collects exactly one result per
//! partition index, in index order.

use std::sync::mpsc;

use crate::error::DownloadError;

/// Waiting side of the barrier, created for a fixed number of participants.
pub struct CompletionBarrier<T> {
    tx: mpsc::Sender<(usize, T)>,
    rx: mpsc::Receiver<(usize, T)>,
    expected: usize,
}

/// One participant's completion slot. Consumed by `complete`, so it fires at most once.
pub struct CompletionSignal<T> {
    index: usize,
    tx: mpsc::Sender<(usize, T)>,
}

impl<T> CompletionSignal<T> {
    /// 1-based partition index this signal reports for.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn complete(self, value: T) {
        // The receiver only goes away once the waiter has given up.
        let _ = self.tx.send((self.index, value));
    }
}

impl<T> CompletionBarrier<T> {
    pub fn new(expected: usize) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, expected }
    }

    /// Signals for partitions `1..=expected`.
    pub fn signals(&self) -> Vec<CompletionSignal<T>> {
        (1..=self.expected)
            .map(|index| CompletionSignal {
                index,
                tx: self.tx.clone(),
            })
            .collect()
    }

    /// Blocks until every participant has reported, then returns the results
    /// ordered by partition index.
    ///
    /// Signals dropped without completing (a panicked worker) are counted as
    /// lost rather than waited on forever.
    pub fn wait(self) -> Result<Vec<T>, DownloadError> {
        let CompletionBarrier { tx, rx, expected } = self;
        drop(tx);

        let mut slots: Vec<Option<T>> = (0..expected).map(|_| None).collect();
        let mut received = 0usize;
        while received < expected {
            match rx.recv() {
                Ok((index, value)) => {
                    if let Some(slot) = index.checked_sub(1).and_then(|i| slots.get_mut(i)) {
                        if slot.replace(value).is_none() {
                            received += 1;
                        }
                    }
                }
                Err(_) => break,
            }
        }

        if received < expected {
            return Err(DownloadError::SegmentLost {
                missing: expected - received,
                expected,
            });
        }
        Ok(slots.into_iter().flatten().collect())
    }
}
