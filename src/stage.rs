//! Deferred stage descriptors.
//!
//! A [`Stage`] is one recorded, not-yet-applied step of a
//! [`SliceStream`](crate::SliceStream). Stages are immutable once recorded and
//! are cheap to clone: every closure sits behind an `Arc`, so copying a stage
//! list for a new chain link never copies caller state.
//!
//! Evaluation consumes the working collection by value and hands the next
//! stage its output. [`Stage::Map`] carries the [`ExecMode`] that was in
//! effect when it was recorded; the other kinds need a global view of the
//! collection and always run on the calling thread.

use crate::runner::{self, ExecMode};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

pub type Predicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;
pub type Transform<E> = Arc<dyn Fn(&E) -> E + Send + Sync>;
pub type Comparator<E> = Arc<dyn Fn(&E, &E) -> Ordering + Send + Sync>;

/// One pending transformation.
pub enum Stage<E> {
    /// Keep elements for which the predicate holds, in order.
    Filter(Predicate<E>),
    /// Replace every element with `f(element)`, positions unchanged, using
    /// the mode captured at recording time.
    Map(Transform<E>, ExecMode),
    /// Keep at most `n` leading elements.
    Limit(usize),
    /// Stable sort by a three-way comparator.
    SortBy(Comparator<E>),
}

impl<E> Clone for Stage<E> {
    fn clone(&self) -> Self {
        match self {
            Stage::Filter(p) => Stage::Filter(Arc::clone(p)),
            Stage::Map(f, mode) => Stage::Map(Arc::clone(f), *mode),
            Stage::Limit(n) => Stage::Limit(*n),
            Stage::SortBy(c) => Stage::SortBy(Arc::clone(c)),
        }
    }
}

impl<E> fmt::Debug for Stage<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Limit(n) => f.debug_tuple("Limit").field(n).finish(),
            Stage::Map(_, mode) => f.debug_tuple("Map").field(mode).finish(),
            other => f.write_str(other.kind()),
        }
    }
}

impl<E> Stage<E> {
    /// Short stage name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Stage::Filter(_) => "Filter",
            Stage::Map(..) => "Map",
            Stage::Limit(_) => "Limit",
            Stage::SortBy(_) => "SortBy",
        }
    }

    /// `true` for stages that may run on the parallel executor.
    pub fn is_element_wise(&self) -> bool {
        matches!(self, Stage::Map(..))
    }

    /// Execution mode an element-wise stage will run under.
    pub fn exec_mode(&self) -> ExecMode {
        match self {
            Stage::Map(_, mode) => *mode,
            _ => ExecMode::Sequential,
        }
    }
}

impl<E: Send + Sync> Stage<E> {
    /// Apply this stage to the working collection.
    ///
    /// Caller-supplied functions are invoked as-is; a panic inside one
    /// unwinds out of this call (and out of the parallel scope, if any).
    pub fn apply(&self, mut items: Vec<E>) -> Vec<E> {
        match self {
            Stage::Filter(pred) => {
                items.retain(|e| pred(e));
                items
            }
            Stage::Map(f, mode) => {
                match *mode {
                    ExecMode::Parallel { workers } => {
                        runner::map_in_place(&mut items, workers, f.as_ref());
                    }
                    ExecMode::Sequential => {
                        for slot in items.iter_mut() {
                            *slot = f(slot);
                        }
                    }
                }
                items
            }
            Stage::Limit(n) => {
                items.truncate(*n);
                items
            }
            Stage::SortBy(cmp) => {
                items.sort_by(|a, b| cmp(a, b));
                items
            }
        }
    }
}
