// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tokio::sync::mpsc;

/// A stream that is already closed and will never yield an item.
pub fn closed_stream<T>() -> mpsc::Receiver<T> {
    let (_tx, rx) = mpsc::channel(1);
    rx
}

/// Snapshot `items` into a fully populated, already closed stream.
///
/// The channel is sized to hold every item so filling it never waits, and the
/// sender is dropped before returning.
pub fn materialize<T>(items: Vec<T>) -> mpsc::Receiver<T> {
    let (tx, rx) = mpsc::channel(items.len().max(1));
    for item in items {
        // capacity covers every item and `rx` is alive, so this cannot fail
        if tx.try_send(item).is_err() {
            break;
        }
    }
    rx
}
