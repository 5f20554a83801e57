// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test-only stages for exercising the runners without the user domain.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::engine::RunContext;
use crate::errors::StageError;
use crate::traits::{FnStage, ItemProcessor};

/// Forwards every item unchanged.
pub struct PassThrough {
    name: String,
}

impl PassThrough {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl<T: Send + 'static> ItemProcessor<T> for PassThrough {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, _ctx: &RunContext, item: T) -> Result<Option<T>, StageError> {
        Ok(Some(item))
    }
}

/// Rejects numbers above a limit, forwards the rest.
pub struct RejectOver {
    name: String,
    limit: u32,
}

impl RejectOver {
    pub fn new(name: impl Into<String>, limit: u32) -> Self {
        Self {
            name: name.into(),
            limit,
        }
    }
}

#[async_trait]
impl ItemProcessor<u32> for RejectOver {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, _ctx: &RunContext, item: u32) -> Result<Option<u32>, StageError> {
        if item > self.limit {
            Err(StageError::validation(
                self.name.clone(),
                format!("{} exceeds {}", item, self.limit),
            ))
        } else {
            Ok(Some(item))
        }
    }
}

/// Silently drops odd numbers.
pub struct EvenOnly;

#[async_trait]
impl ItemProcessor<u32> for EvenOnly {
    fn name(&self) -> &str {
        "even_only"
    }

    async fn process(&self, _ctx: &RunContext, item: u32) -> Result<Option<u32>, StageError> {
        Ok((item % 2 == 0).then_some(item))
    }
}

/// When a stage first saw an item and last finished one.
#[derive(Default)]
pub struct Timeline {
    first_received: Mutex<Option<Instant>>,
    last_emitted: Mutex<Option<Instant>>,
}

impl Timeline {
    pub fn first_received(&self) -> Option<Instant> {
        *self.first_received.lock().unwrap()
    }

    pub fn last_emitted(&self) -> Option<Instant> {
        *self.last_emitted.lock().unwrap()
    }

    fn received(&self) {
        self.first_received
            .lock()
            .unwrap()
            .get_or_insert_with(Instant::now);
    }

    fn emitted(&self) {
        *self.last_emitted.lock().unwrap() = Some(Instant::now());
    }
}

/// Forwards items after a delay, recording its timeline.
pub struct Instrumented {
    name: String,
    timeline: Arc<Timeline>,
    delay: Duration,
}

impl Instrumented {
    pub fn new(name: impl Into<String>, timeline: Arc<Timeline>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            timeline,
            delay,
        }
    }
}

#[async_trait]
impl<T: Send + 'static> ItemProcessor<T> for Instrumented {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, _ctx: &RunContext, item: T) -> Result<Option<T>, StageError> {
        self.timeline.received();
        tokio::time::sleep(self.delay).await;
        self.timeline.emitted();
        Ok(Some(item))
    }
}

/// Function stage that counts its invocations.
pub struct CountingFn<F> {
    name: String,
    f: F,
    calls: AtomicUsize,
}

impl<F> CountingFn<F> {
    pub fn new<T>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(T) -> Result<T, StageError>,
    {
        Self {
            name: name.into(),
            f,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T, F> FnStage<T> for CountingFn<F>
where
    T: Send + 'static,
    F: Fn(T) -> Result<T, StageError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, _ctx: &RunContext, item: T) -> Result<T, StageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.f)(item)
    }
}

/// Names of the spans a [`SpanRecorder`] was running in, one per item.
#[derive(Default)]
pub struct SeenSpans {
    names: Mutex<Vec<Option<&'static str>>>,
}

impl SeenSpans {
    pub fn names(&self) -> Vec<Option<&'static str>> {
        self.names.lock().unwrap().clone()
    }
}

/// Forwards items, noting the span current while each one is processed.
pub struct SpanRecorder {
    name: String,
    seen: Arc<SeenSpans>,
}

impl SpanRecorder {
    pub fn new(name: impl Into<String>, seen: Arc<SeenSpans>) -> Self {
        Self {
            name: name.into(),
            seen,
        }
    }
}

#[async_trait]
impl<T: Send + 'static> ItemProcessor<T> for SpanRecorder {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, _ctx: &RunContext, item: T) -> Result<Option<T>, StageError> {
        let current = tracing::Span::current().metadata().map(|m| m.name());
        self.seen.names.lock().unwrap().push(current);
        Ok(Some(item))
    }
}

/// Install a subscriber that enables every span for the current thread.
pub fn enable_spans() -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}
