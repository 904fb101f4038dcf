//! # Ironstream
//!
//! Lazy, chainable stream pipelines over in-memory collections, with an
//! optional chunked parallel executor for element-wise stages.
//!
//! ## Key Features
//!
//! - **Deferred stages** - `filter`, `map`, `limit` and `sort_by` are recorded, not run
//! - **Evaluate once** - the first terminal call materializes and caches the result
//! - **Independent chain values** - cloning a stream branches it without shared stage state
//! - **Order-preserving parallel map** - contiguous chunks, one task each, disjoint writes
//! - **Capability-gated helpers** - `distinct`, `equal`, `find` for comparable elements;
//!   `sort`, `max`, `binary_search` for ordered ones
//!
//! ## Quick Start
//!
//! ```
//! use ironstream::from_vec;
//!
//! let words = from_vec(vec!["pear", "fig", "apple", "fig", "kiwi"])
//!     .filter(|w| w.len() > 2)
//!     .distinct()
//!     .sort();
//!
//! assert_eq!(words.to_vec(), vec!["apple", "fig", "kiwi", "pear"]);
//! assert_eq!(words.find(&"kiwi"), Some(2));
//! ```
//!
//! ## Core Concepts
//!
//! ### SliceStream
//!
//! A [`SliceStream<E>`] pairs a source collection with a list of pending
//! [`Stage`]s and an [`ExecMode`]. Chain calls consume the value and return
//! a new one; terminal calls borrow it and force evaluation.
//!
//! ### Stages
//!
//! - [`filter`](SliceStream::filter) - keep matching elements, in order
//! - [`map`](SliceStream::map) - transform each element in place
//! - [`limit`](SliceStream::limit) - keep a prefix
//! - [`sort_by`](SliceStream::sort_by) - stable sort by comparator
//!
//! Stages run in the order they were recorded, each consuming the previous
//! stage's output. [`for_each`](SliceStream::for_each) and
//! [`distinct`](SliceStream::distinct) evaluate eagerly and return a stream.
//!
//! ### Execution Modes
//!
//! - **Sequential** (default) - everything runs on the calling thread
//! - **Parallel** - [`parallel(workers)`](SliceStream::parallel) splits `map`
//!   stages recorded after it, and `for_each`, across `workers` rayon tasks;
//!   other stages stay sequential
//!
//! Both modes produce the same collection.
//!
//! ```
//! use ironstream::from_vec;
//!
//! let seq = from_vec((0..1000u64).collect()).map(|x: &u64| x * x).to_vec();
//! let par = from_vec((0..1000u64).collect()).parallel(8).map(|x: &u64| x * x).to_vec();
//! assert_eq!(seq, par);
//! ```
//!
//! ## Failures
//!
//! Caller-supplied functions are not wrapped: a panic in a predicate,
//! transform, comparator or visitor unwinds out of the terminal call that
//! triggered evaluation. Functions that must report errors can use
//! [`try_map`](SliceStream::try_map) and
//! [`try_for_each`](SliceStream::try_for_each), which return `anyhow::Result`.
//!
//! ## Module Overview
//!
//! - [`stream`] - `SliceStream` construction, chaining, evaluation, terminals
//! - [`stage`] - deferred stage descriptors
//! - [`runner`] - execution modes and the chunked parallel executor
//! - [`testing`] - assertion helpers for pipeline tests

pub mod runner;
pub mod stage;
pub mod stream;
pub mod testing;
mod helpers;

pub use runner::{ExecMode, chunk_bounds};
pub use stage::Stage;
pub use stream::{Element, SliceStream, from_slice, from_vec};
