//! Testing utilities for stream pipelines.
//!
//! - [`assert_collections_equal`]: order-dependent comparison with a readable diff
//! - [`assert_stream_yields`]: evaluate a stream and compare its output
//! - [`assert_parallel_matches_sequential`]: run one map in both modes and compare
//! - [`CallCounter`]: count invocations of caller-supplied functions
//!
//! # Quick Start
//!
//! ```
//! use ironstream::from_vec;
//! use ironstream::testing::*;
//!
//! let calls = CallCounter::new();
//! let c = calls.clone();
//! let s = from_vec(vec![1, 2, 3]).map(move |x: &i32| {
//!     c.hit();
//!     x * 2
//! });
//! assert_stream_yields(&s, &[2, 4, 6]);
//! assert_stream_yields(&s, &[2, 4, 6]);
//! assert_eq!(calls.get(), 3);
//! ```

use crate::{Element, SliceStream, from_vec};
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Assert that two collections are equal in order and content.
///
/// Reports the first diverging position, not both full collections.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    if let Some(i) = actual.iter().zip(expected).position(|(a, e)| a != e) {
        panic!(
            "stream output diverges at position {i}: got {:?}, want {:?} ({} vs {} elements)",
            actual[i],
            expected[i],
            actual.len(),
            expected.len()
        );
    }
    if actual.len() != expected.len() {
        let shorter = actual.len().min(expected.len());
        panic!(
            "stream output has {} elements, want {}; first unmatched: {:?}",
            actual.len(),
            expected.len(),
            actual.get(shorter).or(expected.get(shorter))
        );
    }
}

/// Evaluate `stream` and assert its output equals `expected`.
///
/// # Panics
///
/// Panics on any difference, or if a stage function panics.
pub fn assert_stream_yields<E: Element + Debug + PartialEq>(stream: &SliceStream<E>, expected: &[E]) {
    assert_collections_equal(stream.as_slice(), expected);
}

/// Run `f` over `data` sequentially and with each worker count, asserting
/// every parallel result matches the sequential one.
///
/// # Panics
///
/// Panics on the first worker count whose output differs.
pub fn assert_parallel_matches_sequential<E, F>(data: &[E], workers: &[usize], f: F)
where
    E: Element + Debug + PartialEq,
    F: Fn(&E) -> E + Send + Sync + Clone + 'static,
{
    let expected = from_vec(data.to_vec()).map(f.clone()).into_vec();
    for &w in workers {
        let actual = from_vec(data.to_vec()).parallel(w).map(f.clone()).into_vec();
        assert_eq!(
            actual, expected,
            "parallel({w}) diverged from sequential for input of length {}",
            data.len()
        );
    }
}

/// Thread-safe invocation counter for closures handed to a stream.
#[derive(Clone, Debug, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
