use anyhow::{Result, bail};
use std::collections::HashMap;

use super::types::FlatCollision;
use crate::config::CollisionPolicy;

/// Tracks flattened names per flat backend to catch two files sharing one
#[derive(Debug)]
pub struct CollisionTracker {
    policy: CollisionPolicy,
    /// (backend key, flattened path) → first source path
    seen: HashMap<(String, String), String>,
    collisions: Vec<FlatCollision>,
}

impl CollisionTracker {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            seen: HashMap::new(),
            collisions: Vec::new(),
        }
    }

    /// Record that `source` maps to `flattened` on the backend `key`
    pub fn record(&mut self, backend: &str, key: &str, flattened: &str, source: &str) -> Result<()> {
        let slot = (key.to_string(), flattened.to_string());
        let Some(first) = self.seen.get(&slot) else {
            self.seen.insert(slot, source.to_string());
            return Ok(());
        };

        let collision = FlatCollision {
            backend: backend.to_string(),
            flattened: flattened.to_string(),
            first: first.clone(),
            second: source.to_string(),
        };
        match self.policy {
            CollisionPolicy::Error => bail!("Flat name collision: {}", collision),
            CollisionPolicy::Warn => {
                tracing::warn!("Flat name collision: {}", collision);
                self.collisions.push(collision);
                Ok(())
            }
        }
    }

    pub fn into_collisions(self) -> Vec<FlatCollision> {
        self.collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_names_do_not_collide() {
        let mut tracker = CollisionTracker::new(CollisionPolicy::Error);
        tracker.record("Drive", "d", "a/b.txt", "a/b.txt").unwrap();
        tracker.record("Drive", "d", "a/c.txt", "a/c.txt").unwrap();
        assert!(tracker.into_collisions().is_empty());
    }

    #[test]
    fn test_same_name_on_other_backend_is_fine() {
        let mut tracker = CollisionTracker::new(CollisionPolicy::Error);
        tracker.record("One", "one", "ab/c.txt", "a b/c.txt").unwrap();
        tracker.record("Two", "two", "ab/c.txt", "a b/c.txt").unwrap();
    }

    #[test]
    fn test_warn_policy_collects() {
        let mut tracker = CollisionTracker::new(CollisionPolicy::Warn);
        tracker.record("Drive", "d", "ab/c.txt", "a b/c.txt").unwrap();
        tracker.record("Drive", "d", "ab/c.txt", "ab/c.txt").unwrap();

        let collisions = tracker.into_collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].first, "a b/c.txt");
        assert_eq!(collisions[0].second, "ab/c.txt");
        assert!(collisions[0].to_string().contains("ab/c.txt"));
    }

    #[test]
    fn test_error_policy_fails() {
        let mut tracker = CollisionTracker::new(CollisionPolicy::Error);
        tracker.record("Drive", "d", "ab/c.txt", "a b/c.txt").unwrap();
        let err = tracker.record("Drive", "d", "ab/c.txt", "ab/c.txt").unwrap_err();
        assert!(err.to_string().contains("collision"));
    }
}
