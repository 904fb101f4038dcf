//! Fallible processing with fail-fast error reporting.
//!
//! - [`SliceStream::try_map`] - eager map whose closure may fail
//! - [`SliceStream::try_for_each`] - indexed visit that stops at the first error
//!
//! Errors come back as `anyhow::Error` naming the lowest failing index.
//!
//! ## Example
//! ```
//! use ironstream::from_vec;
//!
//! let halves = from_vec(vec![2, 4, 6])
//!     .try_map(|x: &i32| if x % 2 == 0 { Ok(x / 2) } else { Err("odd") })
//!     .unwrap();
//! assert_eq!(halves.to_vec(), vec![1, 2, 3]);
//!
//! let err = from_vec(vec![2, 3]).try_map(|x: &i32| if x % 2 == 0 { Ok(*x) } else { Err("odd") });
//! assert_eq!(err.unwrap_err().to_string(), "element 1 failed: odd");
//! ```

use crate::runner::{self, ExecMode};
use crate::{Element, SliceStream};
use anyhow::{Result, anyhow};
use std::fmt::Display;

impl<E: Element> SliceStream<E> {
    /// Eager, fail-fast map. Pending stages are evaluated first, then `f` is
    /// applied to every element (chunked across workers in parallel mode).
    ///
    /// On failure the error names the lowest failing index. In parallel mode
    /// other chunks may still have called `f` on later elements.
    pub fn try_map<X, F>(self, f: F) -> Result<Self>
    where
        X: Display,
        F: Fn(&E) -> std::result::Result<E, X> + Sync,
    {
        let this = self.evaluate();
        let mode = this.mode;
        let mut items = this.into_vec();
        match mode {
            ExecMode::Parallel { workers } => runner::try_map_in_place(&mut items, workers, &f)?,
            ExecMode::Sequential => {
                for (i, slot) in items.iter_mut().enumerate() {
                    *slot = f(slot).map_err(|e| anyhow!("element {} failed: {}", i, e))?;
                }
            }
        }
        Ok(SliceStream::materialized(items, mode))
    }

    /// Visit every element with its index, stopping at the first error.
    ///
    /// Always sequential so that "first" means lowest index.
    pub fn try_for_each<X, V>(&self, visit: V) -> Result<()>
    where
        X: Display,
        V: Fn(usize, &E) -> std::result::Result<(), X>,
    {
        for (i, e) in self.as_slice().iter().enumerate() {
            visit(i, e).map_err(|err| anyhow!("element {} failed: {}", i, err))?;
        }
        Ok(())
    }
}
