use std::time::{Duration, Instant};

/// Idle time after which the search buffer starts over.
pub const TYPE_AHEAD_IDLE: Duration = Duration::from_millis(800);

/// Accumulating type-ahead buffer with a restartable idle deadline.
#[derive(Debug, Clone, Default)]
pub struct TypeAhead {
    buffer: String,
    deadline: Option<Instant>,
}

impl TypeAhead {
    /// Append `ch`, restarting the idle timer. A buffer whose timer already
    /// fired is cleared first.
    pub fn push(&mut self, ch: char, now: Instant) -> &str {
        if self.expired(now) {
            self.buffer.clear();
        }
        self.buffer.push(ch);
        self.deadline = Some(now + TYPE_AHEAD_IDLE);
        &self.buffer
    }

    pub fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Fire the timer if due. Returns true when the buffer was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.expired(now) {
            self.cancel();
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.buffer.clear();
        self.deadline = None;
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Index of the first entry whose label or code starts with `query`,
/// ignoring case.
pub fn find_prefix<'a, I>(entries: I, query: &str) -> Option<usize>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    if query.is_empty() {
        return None;
    }
    let query = query.to_lowercase();
    entries.into_iter().position(|(label, code)| {
        label.to_lowercase().starts_with(&query) || code.to_lowercase().starts_with(&query)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_accumulates_within_idle_window() {
        let start = Instant::now();
        let mut search = TypeAhead::default();
        search.push('g', start);
        search.push('e', start + Duration::from_millis(300));
        assert_eq!(search.push('r', start + Duration::from_millis(600)), "ger");
    }

    #[test]
    fn buffer_restarts_after_idle() {
        let start = Instant::now();
        let mut search = TypeAhead::default();
        search.push('g', start);
        let later = start + TYPE_AHEAD_IDLE;
        assert_eq!(search.push('u', later), "u");
    }

    #[test]
    fn tick_clears_expired_buffer() {
        let start = Instant::now();
        let mut search = TypeAhead::default();
        search.push('x', start);
        assert!(!search.tick(start + Duration::from_millis(100)));
        assert!(search.tick(start + Duration::from_millis(900)));
        assert_eq!(search.buffer(), "");
        assert!(!search.is_armed());
    }

    #[test]
    fn prefix_matches_label_or_code() {
        let entries = [("Ireland", "+353"), ("Germany", "+49")];
        assert_eq!(find_prefix(entries, "GER"), Some(1));
        assert_eq!(find_prefix(entries, "+35"), Some(0));
        assert_eq!(find_prefix(entries, "zz"), None);
        assert_eq!(find_prefix(entries, ""), None);
    }
}
