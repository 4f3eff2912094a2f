//! Shared descriptor sources for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use localized_routing::descriptor::{DescriptorSource, EndpointDescriptor};
use localized_routing::routing::SourceError;

/// Counts `descriptors()` calls and holds each call open for `delay`.
pub struct CountingSource {
    descriptors: Vec<EndpointDescriptor>,
    delay: Duration,
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(descriptors: Vec<EndpointDescriptor>, delay: Duration) -> Self {
        Self {
            descriptors,
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DescriptorSource for CountingSource {
    async fn descriptors(&self) -> Result<Vec<EndpointDescriptor>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(self.descriptors.clone())
    }
}

/// Fails the first `failures` calls, then behaves like `CountingSource`.
pub struct FlakySource {
    inner: CountingSource,
    failures: usize,
}

impl FlakySource {
    pub fn new(descriptors: Vec<EndpointDescriptor>, failures: usize, delay: Duration) -> Self {
        Self {
            inner: CountingSource::new(descriptors, delay),
            failures,
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }
}

#[async_trait]
impl DescriptorSource for FlakySource {
    async fn descriptors(&self) -> Result<Vec<EndpointDescriptor>, SourceError> {
        let call = self.inner.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.inner.delay).await;
        if call < self.failures {
            return Err(SourceError::Other(format!("descriptor provider unavailable (call {})", call + 1)));
        }
        Ok(self.inner.descriptors.clone())
    }
}

/// The sample application: a localized Home controller plus an untouched endpoint.
pub fn sample_endpoints() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::new("Home", "Index")
            .controller_localized("en-US", "Home")
            .controller_localized("cs-CZ", "Domu")
            .action_localized("en-US", "Index")
            .action_localized("cs-CZ", "Uvod"),
        EndpointDescriptor::new("Home", "Privacy")
            .controller_localized("en-US", "Home")
            .controller_localized("cs-CZ", "Domu")
            .action_localized("en-US", "Privacy")
            .action_localized("cs-CZ", "Soukromi"),
        EndpointDescriptor::new("Languages", "Change"),
    ]
}
