//! Cookie-keyed subscriber lists

use std::fmt;

/// Token handed out on subscription, used to unsubscribe
pub type Cookie = u32;

/// Subscribers in registration order
pub struct EventSinks<S> {
    next_cookie: Cookie,
    sinks: Vec<(Cookie, S)>,
}

impl<S> fmt::Debug for EventSinks<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSinks")
            .field("cookies", &self.sinks.iter().map(|(c, _)| *c).collect::<Vec<_>>())
            .finish()
    }
}

impl<S> Default for EventSinks<S> {
    fn default() -> Self {
        Self {
            next_cookie: 1,
            sinks: Vec::new(),
        }
    }
}

impl<S: Clone> EventSinks<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sink: S) -> Cookie {
        let cookie = self.next_cookie;
        self.next_cookie += 1;
        self.sinks.push((cookie, sink));
        cookie
    }

    /// Returns false if the cookie was unknown
    pub fn remove(&mut self, cookie: Cookie) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|(c, _)| *c != cookie);
        self.sinks.len() != before
    }

    /// Copy of the subscribers, so delivery can run without holding a lock
    pub fn snapshot(&self) -> Vec<S> {
        self.sinks.iter().map(|(_, sink)| sink.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}
