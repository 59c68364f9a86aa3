use std::io::Write;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{NetError, NetResult};
use crate::train::iteration_stats::IterationStats;

/// Columns of a `TrainingHistory` row, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    TrainLoss = 0,
    TestLoss = 1,
    TrainAccuracy = 2,
    TestAccuracy = 3,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::TrainLoss,
        Column::TestLoss,
        Column::TrainAccuracy,
        Column::TestAccuracy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::TrainLoss => "train_loss",
            Column::TestLoss => "test_loss",
            Column::TrainAccuracy => "train_accuracy",
            Column::TestAccuracy => "test_accuracy",
        }
    }
}

/// Per-iteration metrics table of shape `(iterations, 4)`.
///
/// Rows are appended by the training loop in iteration order and never
/// modified afterwards. A history handed back after an early stop simply has
/// fewer rows than its capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    capacity: usize,
    rows: Vec<[f64; 4]>,
}

impl TrainingHistory {
    pub fn with_capacity(capacity: usize) -> TrainingHistory {
        TrainingHistory { capacity, rows: Vec::with_capacity(capacity) }
    }

    pub(crate) fn push(&mut self, stats: &IterationStats) -> NetResult<()> {
        if self.rows.len() >= self.capacity {
            return Err(NetError::shape("TrainingHistory rows", (self.capacity, 4), (self.rows.len() + 1, 4)));
        }
        self.rows.push([
            stats.train_loss,
            stats.test_loss,
            stats.train_accuracy,
            stats.test_accuracy,
        ]);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of iterations the run was configured for.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_complete(&self) -> bool {
        self.rows.len() == self.capacity
    }

    pub fn rows(&self) -> &[[f64; 4]] {
        &self.rows
    }

    pub fn row(&self, iteration: usize) -> Option<[f64; 4]> {
        self.rows.get(iteration).copied()
    }

    pub fn last(&self) -> Option<[f64; 4]> {
        self.rows.last().copied()
    }

    pub fn column(&self, column: Column) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[column as usize])
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> NetResult<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Writes one line per iteration, preceded by a header row.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> NetResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        let header: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
        writeln!(writer, "iteration,{}", header.join(","))?;
        for (i, row) in self.rows.iter().enumerate() {
            writeln!(writer, "{},{},{},{},{}", i + 1, row[0], row[1], row[2], row[3])?;
        }
        writer.flush()?;
        Ok(())
    }
}
