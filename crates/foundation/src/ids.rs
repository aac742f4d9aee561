/// Monotonic id source.
///
/// Ids start at 1 and are never handed out twice, even after the entity that
/// owned an id is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    /// The id the next call to `next_id` will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::IdSequence;

    #[test]
    fn starts_at_one_and_increases() {
        let mut ids = IdSequence::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.peek(), 3);
    }
}
