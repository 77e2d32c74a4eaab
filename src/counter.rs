//! Depth-indexed counter state for hierarchical numbering.

/// An ordered sequence of counters, one slot per depth.
///
/// Incrementing a slot zeroes every deeper slot and never touches a
/// shallower one, so a Subsection increment can never disturb its Section.
/// Each numbering scope (Part/Chapter vs. Section…Subparagraph) owns its own
/// engine; nothing here is global state.
#[derive(Debug, Clone)]
pub struct CounterEngine {
    counters: Vec<u32>,
}

impl CounterEngine {
    pub fn new(depths: usize) -> Self {
        Self {
            counters: vec![0; depths],
        }
    }

    /// Bump the counter at `level`, reset all deeper levels, and return the
    /// new value at `level`.
    pub fn increment(&mut self, level: usize) -> u32 {
        self.counters[level] += 1;
        for deeper in self.counters[level + 1..].iter_mut() {
            *deeper = 0;
        }
        self.counters[level]
    }

    pub fn get(&self, level: usize) -> u32 {
        self.counters[level]
    }

    /// Dot-joined numeral path of slots `0..=upto` ("2.1").
    pub fn snapshot(&self, upto: usize) -> String {
        self.counters[..=upto]
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::CounterEngine;

    #[test]
    fn increment_returns_new_value() {
        let mut engine = CounterEngine::new(3);
        assert_eq!(engine.increment(0), 1);
        assert_eq!(engine.increment(0), 2);
        assert_eq!(engine.increment(1), 1);
    }

    #[test]
    fn increment_resets_deeper_never_shallower() {
        let mut engine = CounterEngine::new(4);
        engine.increment(0);
        engine.increment(1);
        engine.increment(2);
        engine.increment(3);
        assert_eq!(engine.snapshot(3), "1.1.1.1");

        engine.increment(1);
        assert_eq!(engine.get(0), 1, "shallower slot untouched");
        assert_eq!(engine.get(1), 2);
        assert_eq!(engine.get(2), 0);
        assert_eq!(engine.get(3), 0);
    }

    #[test]
    fn snapshot_joins_with_dots() {
        let mut engine = CounterEngine::new(3);
        engine.increment(0);
        engine.increment(0);
        engine.increment(1);
        assert_eq!(engine.snapshot(0), "2");
        assert_eq!(engine.snapshot(1), "2.1");
    }
}
