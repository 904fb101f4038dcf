//! The lazy stream value: source collection, pending stages and execution mode.

use crate::runner::{self, ExecMode};
use crate::stage::Stage;
use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Bound required of stream elements.
pub trait Element: 'static + Send + Sync + Clone {}
impl<T> Element for T where T: 'static + Send + Sync + Clone {}

type Evaluated<E> = Arc<OnceLock<Arc<Vec<E>>>>;

/// A lazily evaluated pipeline over an in-memory collection.
///
/// Chain calls record a [`Stage`] and return a new value; nothing runs until
/// a terminal call (such as [`to_vec`](Self::to_vec) or [`len`](Self::len))
/// needs the result. Evaluation happens at most once per value: the result is
/// cached and shared with clones, and becomes the source for any stage
/// chained on afterwards.
///
/// ```
/// use ironstream::from_vec;
///
/// let out = from_vec(vec![5, 3, 8, 1, 9, 2])
///     .filter(|x: &i32| *x > 2)
///     .map(|x: &i32| x * 10)
///     .sort_by(|a: &i32, b: &i32| a.cmp(b))
///     .limit(3)
///     .to_vec();
/// assert_eq!(out, vec![30, 50, 80]);
/// ```
pub struct SliceStream<E: Element> {
    pub(crate) source: Arc<Vec<E>>,
    pub(crate) stages: Vec<Stage<E>>,
    pub(crate) mode: ExecMode,
    evaluated: Evaluated<E>,
}

/// Create a stream over `data`.
pub fn from_vec<E: Element>(data: Vec<E>) -> SliceStream<E> {
    SliceStream::new(data)
}

/// Create a stream over a copy of `data`.
pub fn from_slice<E: Element>(data: &[E]) -> SliceStream<E> {
    SliceStream::new(data.to_vec())
}

impl<E: Element> SliceStream<E> {
    pub fn new(data: Vec<E>) -> Self {
        Self::from_shared(Arc::new(data), ExecMode::Sequential)
    }

    pub(crate) fn from_shared(source: Arc<Vec<E>>, mode: ExecMode) -> Self {
        SliceStream {
            source,
            stages: Vec::new(),
            mode,
            evaluated: Arc::new(OnceLock::new()),
        }
    }

    /// A stream with no pending stages over an already materialized result.
    pub(crate) fn materialized(data: Vec<E>, mode: ExecMode) -> Self {
        let data = Arc::new(data);
        SliceStream {
            source: Arc::clone(&data),
            stages: Vec::new(),
            mode,
            evaluated: Arc::new(OnceLock::from(data)),
        }
    }

    /// Append a stage. If this value was already evaluated, the cached result
    /// becomes the new source so recorded stages never run twice.
    fn push_stage(self, stage: Stage<E>) -> Self {
        let SliceStream { source, stages, mode, evaluated } = self;
        let (source, mut stages) = match evaluated.get() {
            Some(done) => (Arc::clone(done), Vec::new()),
            None => (source, stages),
        };
        stages.push(stage);
        SliceStream {
            source,
            stages,
            mode,
            evaluated: Arc::new(OnceLock::new()),
        }
    }

    // ---- intermediate operations ----

    /// Keep elements matching `pred`, in their original order.
    #[must_use]
    pub fn filter<P>(self, pred: P) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.push_stage(Stage::Filter(Arc::new(pred)))
    }

    /// Replace each element with `f(element)`.
    ///
    /// The current execution mode is captured now: a later
    /// [`parallel`](Self::parallel) or [`sequential`](Self::sequential) does
    /// not change how this stage runs. Under a parallel mode `f` is called
    /// from several threads.
    #[must_use]
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(&E) -> E + Send + Sync + 'static,
    {
        let mode = self.mode;
        self.push_stage(Stage::Map(Arc::new(f), mode))
    }

    /// Keep at most `n` leading elements. `limit(0)` yields an empty stream.
    #[must_use]
    pub fn limit(self, n: usize) -> Self {
        self.push_stage(Stage::Limit(n))
    }

    /// Stable sort with a three-way comparator. Always runs sequentially.
    #[must_use]
    pub fn sort_by<C>(self, cmp: C) -> Self
    where
        C: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    {
        self.push_stage(Stage::SortBy(Arc::new(cmp)))
    }

    /// Stable sort by an extracted key.
    #[must_use]
    pub fn sort_by_key<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&E) -> K + Send + Sync + 'static,
    {
        self.sort_by(move |a, b| key(a).cmp(&key(b)))
    }

    /// Run element-wise stages recorded from here on on `workers` concurrent
    /// tasks. Stages already recorded keep their mode.
    ///
    /// `0` and `1` disable parallelism.
    #[must_use]
    pub fn parallel(mut self, workers: usize) -> Self {
        self.mode = ExecMode::with_workers(workers);
        self
    }

    /// Parallel mode with one worker per logical CPU.
    #[must_use]
    pub fn parallel_auto(mut self) -> Self {
        self.mode = ExecMode::auto();
        self
    }

    /// Run element-wise stages recorded from here on sequentially.
    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.mode = ExecMode::Sequential;
        self
    }

    /// Visit every element with its index, then return the evaluated stream.
    ///
    /// This forces evaluation and uses the mode in effect at this call. In
    /// parallel mode the visitor is called from several tasks; indices match
    /// the sequential ones, call order does not.
    pub fn for_each<V>(self, visit: V) -> Self
    where
        V: Fn(usize, &E) + Sync,
    {
        let this = self.evaluate();
        match this.mode {
            ExecMode::Parallel { workers } => runner::for_each_indexed(&this.source, workers, &visit),
            ExecMode::Sequential => {
                for (i, e) in this.source.iter().enumerate() {
                    visit(i, e);
                }
            }
        }
        this
    }

    // ---- evaluation ----

    /// Apply all pending stages once and cache the result.
    fn run(&self) -> &Arc<Vec<E>> {
        self.evaluated.get_or_init(|| {
            if self.stages.is_empty() {
                return Arc::clone(&self.source);
            }
            tracing::debug!(
                stages = self.stages.len(),
                len = self.source.len(),
                "evaluating stream"
            );
            let mut items = Vec::clone(&self.source);
            for stage in &self.stages {
                let before = items.len();
                items = stage.apply(items);
                tracing::trace!(
                    stage = stage.kind(),
                    mode = ?stage.exec_mode(),
                    before,
                    after = items.len(),
                    "stage applied"
                );
            }
            tracing::debug!(len = items.len(), "stream evaluated");
            Arc::new(items)
        })
    }

    /// Force evaluation, returning a stream with no pending stages whose
    /// source is the materialized result. Repeating it is a no-op.
    #[must_use]
    pub fn evaluate(self) -> Self {
        let done = Arc::clone(self.run());
        SliceStream {
            source: Arc::clone(&done),
            stages: Vec::new(),
            mode: self.mode,
            evaluated: self.evaluated,
        }
    }

    /// Number of stages recorded but not yet applied.
    pub fn pending_stages(&self) -> usize {
        if self.is_evaluated() { 0 } else { self.stages.len() }
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated.get().is_some()
    }

    pub fn exec_mode(&self) -> ExecMode {
        self.mode
    }

    // ---- terminal operations ----

    /// The materialized collection.
    pub fn as_slice(&self) -> &[E] {
        self.run().as_slice()
    }

    pub fn to_vec(&self) -> Vec<E> {
        self.as_slice().to_vec()
    }

    /// Take the materialized collection, avoiding a copy when this value is
    /// its only owner.
    pub fn into_vec(self) -> Vec<E> {
        let done = Arc::clone(self.run());
        drop(self);
        Arc::try_unwrap(done).unwrap_or_else(|shared| Vec::clone(&shared))
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.as_slice().iter()
    }
}

impl<E: Element> Clone for SliceStream<E> {
    fn clone(&self) -> Self {
        SliceStream {
            source: Arc::clone(&self.source),
            stages: self.stages.clone(),
            mode: self.mode,
            evaluated: Arc::clone(&self.evaluated),
        }
    }
}

impl<E: Element> Default for SliceStream<E> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<E: Element> From<Vec<E>> for SliceStream<E> {
    fn from(data: Vec<E>) -> Self {
        Self::new(data)
    }
}

/// An absent source behaves as an empty collection.
impl<E: Element> From<Option<Vec<E>>> for SliceStream<E> {
    fn from(data: Option<Vec<E>>) -> Self {
        Self::new(data.unwrap_or_default())
    }
}

impl<E: Element> FromIterator<E> for SliceStream<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<E: Element> IntoIterator for SliceStream<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, E: Element> IntoIterator for &'a SliceStream<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Element> fmt::Debug for SliceStream<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceStream")
            .field("source_len", &self.source.len())
            .field("stages", &self.stages)
            .field("mode", &self.mode)
            .field("evaluated", &self.is_evaluated())
            .finish()
    }
}
