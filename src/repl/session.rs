//! Prediction history for one chat session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::data::Record;
use crate::predict::{Prediction, StressLevel};

/// One completed questionnaire and its result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub record: Record,
    pub score: f64,
    pub level: StressLevel,
}

impl PredictionRecord {
    pub fn new(record: Record, prediction: Prediction) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            record,
            score: prediction.score,
            level: prediction.level,
        }
    }
}

/// Bounded in-memory history, oldest evicted first
pub struct SessionHistory {
    entries: VecDeque<PredictionRecord>,
    limit: usize,
    total: usize,
}

impl SessionHistory {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
            total: 0,
        }
    }

    pub fn record(&mut self, entry: PredictionRecord) {
        if self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.total += 1;
    }

    /// Newest first
    pub fn recent(&self, limit: usize) -> Vec<&PredictionRecord> {
        self.entries.iter().rev().take(limit).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Predictions made this session, evicted ones included
    pub fn total(&self) -> usize {
        self.total
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new(50)
    }
}
