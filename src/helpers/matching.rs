//! Predicate matching and reduction terminals.
//!
//! All of these evaluate pending stages first and then walk the result on the
//! calling thread.
//!
//! ## Example
//! ```
//! use ironstream::from_vec;
//!
//! let s = from_vec(vec![2, 4, 6, 7]);
//! assert!(s.any_match(|x: &i32| x % 2 == 1));
//! assert!(!s.all_match(|x: &i32| x % 2 == 0));
//! assert_eq!(s.reduce(0, |acc, x: &i32| acc + x), 19);
//! ```

use crate::{Element, SliceStream};
use std::cmp::Ordering;

impl<E: Element> SliceStream<E> {
    pub fn count(&self) -> usize {
        self.len()
    }

    pub fn first(&self) -> Option<E> {
        self.as_slice().first().cloned()
    }

    pub fn last(&self) -> Option<E> {
        self.as_slice().last().cloned()
    }

    /// Element at `index`, or `None` past the end.
    pub fn at(&self, index: usize) -> Option<E> {
        self.as_slice().get(index).cloned()
    }

    /// `true` if every element matches. Vacuously `true` when empty.
    pub fn all_match<P: Fn(&E) -> bool>(&self, pred: P) -> bool {
        self.as_slice().iter().all(pred)
    }

    /// `true` if at least one element matches.
    pub fn any_match<P: Fn(&E) -> bool>(&self, pred: P) -> bool {
        self.as_slice().iter().any(pred)
    }

    pub fn none_match<P: Fn(&E) -> bool>(&self, pred: P) -> bool {
        !self.any_match(pred)
    }

    /// Fold the evaluated elements left to right into `init`.
    pub fn reduce<A, F>(&self, init: A, f: F) -> A
    where
        F: Fn(A, &E) -> A,
    {
        self.as_slice().iter().fold(init, f)
    }

    /// Largest element under `cmp`; the last one wins among equals.
    pub fn max_by<C>(&self, cmp: C) -> Option<E>
    where
        C: Fn(&E, &E) -> Ordering,
    {
        self.as_slice().iter().max_by(|a, b| cmp(a, b)).cloned()
    }

    /// Smallest element under `cmp`; the first one wins among equals.
    pub fn min_by<C>(&self, cmp: C) -> Option<E>
    where
        C: Fn(&E, &E) -> Ordering,
    {
        self.as_slice().iter().min_by(|a, b| cmp(a, b)).cloned()
    }
}
