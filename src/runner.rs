//! Execution modes and the chunked parallel executor.
//!
//! A stream runs either [`ExecMode::Sequential`] or
//! [`ExecMode::Parallel`]. In parallel mode each element-wise stage splits
//! the working collection into contiguous chunks (see [`chunk_bounds`]) and
//! hands each chunk to one task inside a [`rayon::scope`]. Every task owns a
//! disjoint `&mut` sub-slice of the same buffer, so no locking is needed, and
//! the scope returning is the barrier before the next stage starts.
//!
//! Results are position-for-position identical to sequential execution; only
//! the interleaving of calls into caller functions differs.

use anyhow::{Result, anyhow};
use std::fmt::Display;
use std::mem;
use std::ops::Range;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecMode {
    #[default]
    Sequential,
    Parallel { workers: usize },
}

impl ExecMode {
    /// Build a mode from a requested worker count.
    ///
    /// Counts of 0 or 1 mean sequential execution; this is never an error.
    pub fn with_workers(workers: usize) -> Self {
        if workers <= 1 {
            tracing::debug!(workers, "worker count <= 1, running sequentially");
            ExecMode::Sequential
        } else {
            ExecMode::Parallel { workers }
        }
    }

    /// One worker per logical CPU.
    pub fn auto() -> Self {
        Self::with_workers(num_cpus::get())
    }

    /// Number of concurrent units an element-wise stage is split into.
    pub fn workers(&self) -> usize {
        match self {
            ExecMode::Sequential => 1,
            ExecMode::Parallel { workers } => *workers,
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, ExecMode::Parallel { .. })
    }
}

/// Split `0..len` into at most `workers` contiguous, near-equal ranges.
///
/// The first `len % workers` ranges get one extra element. Empty ranges
/// (more workers than elements) are omitted, so the result is empty for
/// `len == 0`. A worker count of 0 is treated as 1.
///
/// ```
/// use ironstream::runner::chunk_bounds;
/// assert_eq!(chunk_bounds(7, 3), vec![0..3, 3..5, 5..7]);
/// assert_eq!(chunk_bounds(2, 4), vec![0..1, 1..2]);
/// ```
pub fn chunk_bounds(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let base = len / workers;
    let extra = len % workers;

    let mut out = Vec::with_capacity(workers.min(len));
    let mut start = 0;
    for i in 0..workers {
        let size = base + usize::from(i < extra);
        if size == 0 {
            break;
        }
        out.push(start..start + size);
        start += size;
    }
    out
}

/// Carve `buf` into disjoint mutable chunks matching `bounds`.
fn split_chunks<'a, E>(buf: &'a mut [E], bounds: &[Range<usize>]) -> Vec<(usize, &'a mut [E])> {
    let mut rest = buf;
    let mut chunks = Vec::with_capacity(bounds.len());
    for r in bounds {
        let (chunk, tail) = mem::take(&mut rest).split_at_mut(r.len());
        chunks.push((r.start, chunk));
        rest = tail;
    }
    chunks
}

/// Replace every element with `f(element)` using one task per chunk.
pub fn map_in_place<E, F>(buf: &mut [E], workers: usize, f: &F)
where
    E: Send,
    F: Fn(&E) -> E + Sync + ?Sized,
{
    let bounds = chunk_bounds(buf.len(), workers);
    tracing::trace!(len = buf.len(), workers, chunks = bounds.len(), "parallel map");

    rayon::scope(|s| {
        for (_, chunk) in split_chunks(buf, &bounds) {
            s.spawn(move |_| {
                for slot in chunk.iter_mut() {
                    *slot = f(slot);
                }
            });
        }
    });
}

/// Call `visit(index, element)` for every element using one task per chunk.
///
/// Indices are absolute: chunk start plus local offset.
pub fn for_each_indexed<E, F>(items: &[E], workers: usize, visit: &F)
where
    E: Sync,
    F: Fn(usize, &E) + Sync + ?Sized,
{
    let bounds = chunk_bounds(items.len(), workers);
    tracing::trace!(len = items.len(), workers, chunks = bounds.len(), "parallel for_each");

    rayon::scope(|s| {
        for r in bounds {
            let chunk = &items[r.clone()];
            s.spawn(move |_| {
                for (offset, e) in chunk.iter().enumerate() {
                    visit(r.start + offset, e);
                }
            });
        }
    });
}

/// Fallible [`map_in_place`]. Each chunk stops at its first failure; the
/// error reported is the one with the lowest index, as sequential execution
/// would report.
pub fn try_map_in_place<E, X, F>(buf: &mut [E], workers: usize, f: &F) -> Result<()>
where
    E: Send,
    X: Display,
    F: Fn(&E) -> std::result::Result<E, X> + Sync + ?Sized,
{
    let bounds = chunk_bounds(buf.len(), workers);
    let mut failures: Vec<Option<anyhow::Error>> = bounds.iter().map(|_| None).collect();
    tracing::trace!(len = buf.len(), workers, chunks = bounds.len(), "parallel try_map");

    rayon::scope(|s| {
        for ((start, chunk), failure) in split_chunks(buf, &bounds).into_iter().zip(failures.iter_mut()) {
            s.spawn(move |_| {
                for (offset, slot) in chunk.iter_mut().enumerate() {
                    match f(slot) {
                        Ok(v) => *slot = v,
                        Err(e) => {
                            *failure = Some(anyhow!("element {} failed: {}", start + offset, e));
                            return;
                        }
                    }
                }
            });
        }
    });

    match failures.into_iter().flatten().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
