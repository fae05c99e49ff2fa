//! Memoized solves.
//!
//! The key holds the full measured text plus the exact bit patterns of
//! every float input, so a hit returns precisely what an uncached solve
//! would. A cache belongs to one measurer; do not share it between
//! measurers with different metrics.

use std::collections::HashMap;

use crate::error::FitError;
use crate::measure::Measurer;
use crate::model::{Content, SizeBounds};

use super::{FitRequest, SearchStrategy, Solution};

const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ContentKey {
    Text(String),
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FitKey {
    content: ContentKey,
    width: u64,
    height: u64,
    bounds: SizeBounds,
    line_height: u64,
    strategy: SearchStrategy,
}

impl FitKey {
    fn for_request(request: &FitRequest<'_>) -> Option<Self> {
        let content = match request.content {
            Content::Text { text } => ContentKey::Text(text.clone()),
            Content::Html { html } => ContentKey::Html(html.clone()),
            Content::Image { .. } => return None,
        };
        Some(Self {
            content,
            width: request.target.width.to_bits(),
            height: request.target.height.to_bits(),
            bounds: request.bounds.normalized(),
            line_height: request.line_height.to_bits(),
            strategy: request.strategy,
        })
    }
}

#[derive(Debug)]
pub struct FitCache {
    entries: HashMap<FitKey, Solution>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for FitCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl FitCache {
    /// A cache that is flushed whenever it would grow past `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Solve through the cache. Errors are returned but never stored.
    pub fn solve<M: Measurer + ?Sized>(
        &mut self,
        measurer: &M,
        request: &FitRequest<'_>,
    ) -> Result<Solution, FitError> {
        let Some(key) = FitKey::for_request(request) else {
            return request.solve(measurer);
        };
        if let Some(solution) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(*solution);
        }
        self.misses += 1;
        let solution = request.solve(measurer)?;
        if self.entries.len() >= self.capacity {
            tracing::debug!(entries = self.entries.len(), "fit cache full, flushing");
            self.entries.clear();
        }
        self.entries.insert(key, solution);
        Ok(solution)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
