//! Natural-order operations for `Ord` elements.
//!
//! [`sort`](SliceStream::sort) is deferred like any other sort stage; the rest
//! are terminals.

use crate::{Element, SliceStream};

impl<E: Element + Ord> SliceStream<E> {
    /// Stable ascending sort.
    #[must_use]
    pub fn sort(self) -> Self {
        self.sort_by(|a, b| a.cmp(b))
    }

    /// Stable descending sort. Equal elements keep their relative order.
    #[must_use]
    pub fn sort_desc(self) -> Self {
        self.sort_by(|a, b| b.cmp(a))
    }

    /// Largest element; the last one wins among equals.
    pub fn max(&self) -> Option<E> {
        self.as_slice().iter().max().cloned()
    }

    /// Smallest element; the first one wins among equals.
    pub fn min(&self) -> Option<E> {
        self.as_slice().iter().min().cloned()
    }

    pub fn is_sorted(&self) -> bool {
        self.as_slice().is_sorted()
    }

    /// Binary search over the evaluated collection, which must already be
    /// sorted ascending. Same contract as [`slice::binary_search`].
    pub fn binary_search(&self, target: &E) -> Result<usize, usize> {
        self.as_slice().binary_search(target)
    }
}
