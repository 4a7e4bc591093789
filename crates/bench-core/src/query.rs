//! Benchmark query objects and their reuse pool.
//!
//! Query generation runs at very high throughput, so each generator recycles
//! a small set of query objects instead of allocating one per dispatch. The
//! discipline is acquire → fill → lend:
//!
//! 1. [`QueryPool::acquire`] hands out a reset query (recycling the one that
//!    was lent previously, if any).
//! 2. The generator fills it in place.
//! 3. [`QueryPool::lend`] parks it as the single live query and returns a
//!    shared reference to the caller.
//!
//! The live query stays valid until the next `acquire` or `release` on the
//! same pool. Because the returned reference borrows the generator, the borrow
//! checker rejects any attempt to hold it across the next dispatch.

use serde_json::Value;
use std::fmt::Debug;

/// One benchmark query for a target engine.
///
/// The payload is opaque to the generation pipeline; only the engine's
/// client interprets it.
pub trait Query: Debug {
    /// Short label grouping queries of the same kind.
    fn human_label(&self) -> &str;

    /// Label plus the concrete parameters of this instance.
    fn human_description(&self) -> &str;

    /// Clear every field so the object can be refilled.
    fn reset(&mut self);

    /// Render the query as a JSON value for the query output stream.
    fn to_json(&self) -> serde_json::Result<Value>;
}

/// Free-list of reusable query objects owned by one generator.
#[derive(Debug)]
pub struct QueryPool<Q> {
    free: Vec<Q>,
    live: Option<Q>,
    allocated: usize,
}

impl<Q: Query + Default> QueryPool<Q> {
    /// Create a pool with `preallocate` ready query objects.
    pub fn new(preallocate: usize) -> Self {
        let free = (0..preallocate).map(|_| Q::default()).collect();
        Self {
            free,
            live: None,
            allocated: preallocate,
        }
    }

    /// Take a reset query out of the pool.
    ///
    /// The previously lent query is recycled first, which ends its validity.
    pub fn acquire(&mut self) -> Q {
        self.release();
        match self.free.pop() {
            Some(q) => q,
            None => {
                self.allocated += 1;
                Q::default()
            }
        }
    }

    /// Park a filled query as the live one and hand out a reference to it.
    pub fn lend(&mut self, query: Q) -> &Q {
        self.release();
        self.live.insert(query)
    }

    /// Return the live query (if any) to the free list.
    pub fn release(&mut self) {
        if let Some(mut q) = self.live.take() {
            q.reset();
            self.free.push(q);
        }
    }

    /// The query currently lent out.
    pub fn live(&self) -> Option<&Q> {
        self.live.as_ref()
    }

    /// Number of idle objects.
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    /// Number of objects this pool has ever created.
    pub fn allocated(&self) -> usize {
        self.allocated
    }
}

impl<Q: Query + Default> Default for QueryPool<Q> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Default, Serialize)]
    struct TextQuery {
        label: String,
        text: String,
    }

    impl Query for TextQuery {
        fn human_label(&self) -> &str {
            &self.label
        }

        fn human_description(&self) -> &str {
            &self.text
        }

        fn reset(&mut self) {
            self.label.clear();
            self.text.clear();
        }

        fn to_json(&self) -> serde_json::Result<Value> {
            serde_json::to_value(self)
        }
    }

    #[test]
    fn test_acquire_reuses_preallocated() {
        let mut pool: QueryPool<TextQuery> = QueryPool::new(2);
        assert_eq!(pool.idle(), 2);

        let q = pool.acquire();
        assert_eq!(pool.idle(), 1);
        pool.lend(q);

        for _ in 0..100 {
            let q = pool.acquire();
            pool.lend(q);
        }
        assert_eq!(pool.allocated(), 2);
    }

    #[test]
    fn test_recycled_query_is_reset() {
        let mut pool: QueryPool<TextQuery> = QueryPool::new(1);

        let mut q = pool.acquire();
        q.label = "high-cpu".to_string();
        q.text = "SELECT 1".to_string();
        let lent = pool.lend(q);
        assert_eq!(lent.human_label(), "high-cpu");

        let q = pool.acquire();
        assert!(q.label.is_empty());
        assert!(q.text.is_empty());
        assert!(pool.live().is_none());
    }

    #[test]
    fn test_grows_when_empty() {
        let mut pool: QueryPool<TextQuery> = QueryPool::new(0);
        let q = pool.acquire();
        assert_eq!(pool.allocated(), 1);
        pool.lend(q);
        pool.release();
        assert_eq!(pool.idle(), 1);
        assert!(pool.live().is_none());
    }

    #[test]
    fn test_to_json() {
        let q = TextQuery {
            label: "l".to_string(),
            text: "t".to_string(),
        };
        let v = q.to_json().unwrap();
        assert_eq!(v["label"], "l");
        assert_eq!(v["text"], "t");
    }
}
