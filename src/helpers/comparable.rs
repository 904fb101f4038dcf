//! Operations for element types with equality.
//!
//! ## Available operations
//! - [`SliceStream::distinct`] - drop later duplicates, keep first occurrences (`Eq + Hash`)
//! - [`SliceStream::equal`] - positional equality against a slice (`PartialEq`)
//! - [`SliceStream::find`] - index of the first matching element (`PartialEq`)
//! - [`SliceStream::contains`] - membership test (`PartialEq`)
//!
//! Every call evaluates pending stages first. The chain calls of
//! [`SliceStream`] keep the element type, so these stay available anywhere
//! in a chain whose element type satisfies the bound.
//!
//! ## Example
//! ```
//! use ironstream::from_vec;
//!
//! let s = from_vec(vec![3, 1, 2, 3, 1]).distinct();
//! assert!(s.equal(&[3, 1, 2]));
//! assert_eq!(s.find(&2), Some(2));
//! assert_eq!(s.find(&9), None);
//! ```

use crate::{Element, SliceStream};
use std::collections::HashSet;
use std::hash::Hash;

impl<E: Element + Eq + Hash> SliceStream<E> {
    /// Keep the first occurrence of each value, in traversal order.
    ///
    /// Runs eagerly and sequentially; the returned stream is evaluated and
    /// keeps this stream's execution mode.
    #[must_use]
    pub fn distinct(self) -> Self {
        let this = self.evaluate();
        if this.source.len() < 2 {
            return this;
        }

        let mut seen = HashSet::with_capacity(this.source.len());
        let unique: Vec<E> = this
            .source
            .iter()
            .filter(|e| seen.insert(*e))
            .cloned()
            .collect();
        tracing::trace!(before = this.source.len(), after = unique.len(), "distinct");
        SliceStream::materialized(unique, this.mode)
    }
}

impl<E: Element + PartialEq> SliceStream<E> {
    /// `true` when the evaluated stream has the same length as `other` and
    /// every element is equal at the same index.
    pub fn equal(&self, other: &[E]) -> bool {
        self.as_slice() == other
    }

    /// Index of the first element equal to `target`, or `None`.
    pub fn find(&self, target: &E) -> Option<usize> {
        self.as_slice().iter().position(|e| e == target)
    }

    pub fn contains(&self, target: &E) -> bool {
        self.find(target).is_some()
    }
}
