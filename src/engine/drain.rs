// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::RunContext;
use crate::errors::StageError;
use crate::traits::StageStreams;

/// Everything read from a pipeline's stream pair.
#[derive(Debug)]
pub struct Drained<T> {
    pub items: Vec<T>,
    pub errors: Vec<StageError>,
    /// The context was cancelled before both streams closed; `items` and
    /// `errors` hold whatever arrived until then.
    pub cancelled: bool,
}

impl<T> Drained<T> {
    pub fn is_clean(&self) -> bool {
        !self.cancelled && self.errors.is_empty()
    }
}

/// Read both streams until they close or `ctx` is cancelled.
pub async fn drain<T>(ctx: &RunContext, streams: StageStreams<T>) -> Drained<T> {
    let StageStreams {
        mut output,
        mut errors,
    } = streams;

    let mut drained = Drained {
        items: Vec::new(),
        errors: Vec::new(),
        cancelled: false,
    };
    let mut output_open = true;
    let mut errors_open = true;

    while output_open || errors_open {
        tokio::select! {
            biased;
            _ = ctx.cancelled() => {
                drained.cancelled = true;
                break;
            }
            item = output.recv(), if output_open => match item {
                Some(item) => drained.items.push(item),
                None => output_open = false,
            },
            error = errors.recv(), if errors_open => match error {
                Some(error) => drained.errors.push(error),
                None => errors_open = false,
            },
        }
    }

    drained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::materialize;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_collects_items_and_errors() {
        let ctx = RunContext::new();
        let streams = StageStreams {
            output: materialize(vec!["a", "b"]),
            errors: materialize(vec![StageError::validation("v", "nope")]),
        };

        let drained = drain(&ctx, streams).await;

        assert_eq!(drained.items, vec!["a", "b"]);
        assert_eq!(drained.errors.len(), 1);
        assert!(!drained.cancelled);
        assert!(!drained.is_clean());
    }

    #[tokio::test]
    async fn test_stops_on_cancellation() {
        let ctx = RunContext::new();
        let (_tx, output) = mpsc::channel::<u32>(1);
        let streams = StageStreams {
            output,
            errors: materialize(Vec::new()),
        };

        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let drained = drain(&ctx, streams).await;
        assert!(drained.cancelled);
        assert!(drained.items.is_empty());
    }
}
