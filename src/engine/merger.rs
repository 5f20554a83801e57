// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::errors::StageError;
use crate::observability::messages::engine::{ErrorStreamsMerged, ForwarderFailed};
use crate::observability::messages::StructuredLog;

/// Fan-in: combine any number of error streams into one bounded stream.
///
/// One forwarding task per source reads until that source closes. A final
/// task waits for every forwarder and only then drops the last sender, so the
/// merged stream closes after every drained source error has been delivered.
/// No ordering is kept across sources. With no sources the returned stream is
/// already closed.
///
/// Every task runs in the caller's current span.
pub fn merge_errors<I>(sources: I, capacity: usize) -> mpsc::Receiver<StageError>
where
    I: IntoIterator<Item = mpsc::Receiver<StageError>>,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let mut forwarders = JoinSet::new();

    for mut source in sources {
        let tx = tx.clone();
        forwarders.spawn(async move {
            let mut forwarded = 0usize;
            while let Some(error) = source.recv().await {
                if tx.send(error).await.is_err() {
                    break;
                }
                forwarded += 1;
            }
            forwarded
        }
        .instrument(tracing::Span::current()));
    }

    let sources = forwarders.len();
    tokio::spawn(async move {
        let mut forwarded = 0usize;
        while let Some(joined) = forwarders.join_next().await {
            match joined {
                Ok(count) => forwarded += count,
                Err(e) => ForwarderFailed { sources, error: &e }.log(),
            }
        }
        drop(tx);
        ErrorStreamsMerged { sources, forwarded }.log();
    }
    .instrument(tracing::Span::current()));

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::materialize;
    use std::collections::HashSet;
    use std::time::Duration;
    use tokio::time::timeout;

    async fn collect(mut rx: mpsc::Receiver<StageError>) -> Vec<StageError> {
        let mut errors = Vec::new();
        while let Some(e) = rx.recv().await {
            errors.push(e);
        }
        errors
    }

    #[tokio::test]
    async fn test_one_error_per_source_yields_k_errors() {
        let k = 8;
        let sources: Vec<_> = (0..k)
            .map(|i| materialize(vec![StageError::validation(format!("stage-{i}"), "bad")]))
            .collect();

        let merged = collect(merge_errors(sources, 2)).await;

        assert_eq!(merged.len(), k);
        let stages: HashSet<_> = merged.iter().map(|e| e.stage().to_string()).collect();
        assert_eq!(stages.len(), k);
    }

    #[tokio::test]
    async fn test_no_sources_is_closed() {
        let mut merged = merge_errors(Vec::new(), 4);
        let next = timeout(Duration::from_secs(1), merged.recv())
            .await
            .expect("empty merge should close immediately");
        assert!(next.is_none());
    }

    #[tokio::test]
    async fn test_stays_open_until_every_source_closes() {
        let (slow_tx, slow_rx) = mpsc::channel(1);
        let fast = materialize(vec![StageError::validation("fast", "first")]);

        let mut merged = merge_errors(vec![fast, slow_rx], 4);

        let first = merged.recv().await.unwrap();
        assert_eq!(first.stage(), "fast");

        // the slow source is still open, so the merged stream must be too
        assert!(timeout(Duration::from_millis(50), merged.recv()).await.is_err());

        slow_tx
            .send(StageError::validation("slow", "late"))
            .await
            .unwrap();
        drop(slow_tx);

        let late = merged.recv().await.unwrap();
        assert_eq!(late.stage(), "slow");
        assert!(merged.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_many_errors_through_small_buffer() {
        let sources: Vec<_> = (0..3)
            .map(|s| {
                materialize(
                    (0..20)
                        .map(|i| StageError::validation(format!("s{s}"), format!("e{i}")))
                        .collect(),
                )
            })
            .collect();

        let merged = collect(merge_errors(sources, 1)).await;
        assert_eq!(merged.len(), 60);
    }
}
