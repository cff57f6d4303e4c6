// src/crawl/frontier.rs
// =============================================================================
// The breadth-first frontier and the visited set of one crawl run.
//
// Every URL moves through unseen -> queued -> visited exactly once:
// - offer() moves unseen -> queued (and refuses anything already seen)
// - dequeue() hands out queued URLs in FIFO order and marks them visited
//
// Both sets only grow. Nothing here outlives the run.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use url::Url;

use super::scope::ScopeFilter;

#[derive(Debug)]
pub struct Frontier {
    scope: ScopeFilter,
    queue: VecDeque<Url>,
    // Queued or visited; what makes an URL "seen"
    seen: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    // Creates a frontier holding only the seed
    pub fn new(seed: Url) -> Self {
        let mut frontier = Self {
            scope: ScopeFilter::from_seed(&seed),
            queue: VecDeque::new(),
            seen: HashSet::new(),
            visited: HashSet::new(),
        };
        frontier.seen.insert(seed.to_string());
        frontier.queue.push_back(seed);
        frontier
    }

    pub fn scope(&self) -> &ScopeFilter {
        &self.scope
    }

    // Queues a discovered link if it is new, in scope and has no fragment
    //
    // Returns true if the link was enqueued
    pub fn offer(&mut self, link: &str) -> bool {
        // A fragment marks an in-page anchor, not a new resource
        if link.contains('#') {
            return false;
        }

        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(_) => return false,
        };

        if !self.scope.allows(&url) {
            return false;
        }

        // insert() returns false if it was already there
        if !self.seen.insert(url.to_string()) {
            return false;
        }

        self.queue.push_back(url);
        true
    }

    // Pops the next in-scope URL and marks it visited
    pub fn dequeue(&mut self) -> Option<Url> {
        while let Some(url) = self.queue.pop_front() {
            if !self.scope.allows(&url) {
                continue;
            }
            self.visited.insert(url.to_string());
            return Some(url);
        }
        None
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why two sets?
//    - `seen` answers "was this ever queued?", so a link found on ten pages
//      is still queued once
//    - `visited` is what actually got dequeued; it is what max_pages bounds
//
// 2. Why store String keys but queue Url values?
//    - Url already did the parsing work, so the queue keeps it
//    - Strings hash cheaply and compare exactly as the URL is written
//
// 3. HashSet::insert returns a bool
//    - true if the value was new, false if it was already present
//    - That turns "check then insert" into a single call
// -----------------------------------------------------------------------------
