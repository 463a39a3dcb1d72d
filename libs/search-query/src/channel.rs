//! Shared publication of the assembled query
//!
//! [`QueryChannel`] makes the recompute contract explicit instead of
//! relying on an ambient reactive store: it owns the criteria set and
//! the match-mode flag, re-runs [`assemble`] synchronously on every
//! mutation, and replaces the published document atomically as a whole
//! value. Readers and subscribers never observe a partially built
//! document. Mutations take `&mut self`, so one writer at a time by
//! construction.

use std::sync::RwLock;

use crate::assemble::{assemble, QueryDocument};
use crate::criterion::SearchCriterion;

type Subscriber = Box<dyn Fn(&QueryDocument) + Send + Sync>;

pub struct QueryChannel {
    criteria: Vec<SearchCriterion>,
    match_any: bool,
    published: RwLock<QueryDocument>,
    subscribers: Vec<Subscriber>,
}

impl QueryChannel {
    /// Well-known key under which the document is published.
    pub const KEY: &'static str = "searchQuery";

    pub fn new(match_any: bool) -> Self {
        Self {
            criteria: Vec::new(),
            match_any,
            published: RwLock::new(assemble(&[], match_any)),
            subscribers: Vec::new(),
        }
    }

    pub fn criteria(&self) -> &[SearchCriterion] {
        &self.criteria
    }

    pub fn match_any(&self) -> bool {
        self.match_any
    }

    /// Snapshot of the currently published document.
    pub fn document(&self) -> QueryDocument {
        self.published.read().unwrap().clone()
    }

    /// Register a subscriber. It is invoked immediately with the current
    /// document, then after every recomputation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&QueryDocument) + Send + Sync + 'static) {
        subscriber(&self.published.read().unwrap());
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn set_criteria(&mut self, criteria: Vec<SearchCriterion>) {
        self.criteria = criteria;
        self.recompute();
    }

    pub fn push_criterion(&mut self, criterion: SearchCriterion) {
        self.criteria.push(criterion);
        self.recompute();
    }

    pub fn remove_criterion(&mut self, index: usize) -> Option<SearchCriterion> {
        if index >= self.criteria.len() {
            return None;
        }
        let removed = self.criteria.remove(index);
        self.recompute();
        Some(removed)
    }

    pub fn set_match_any(&mut self, match_any: bool) {
        self.match_any = match_any;
        self.recompute();
    }

    fn recompute(&mut self) {
        let document = assemble(&self.criteria, self.match_any);
        tracing::debug!(
            criteria = self.criteria.len(),
            match_any = self.match_any,
            "recomputed {}",
            Self::KEY
        );
        *self.published.write().unwrap() = document;

        let published = self.published.read().unwrap();
        for subscriber in &self.subscribers {
            subscriber(&published);
        }
    }
}

impl Default for QueryChannel {
    fn default() -> Self {
        Self::new(false)
    }
}
