//! Result rows built in the consequent phase

use serde::Serialize;
use sqwrl_types::BuiltInArgument;

use crate::error::{EvalResult, SqwrlError};

/// Sink for result rows
pub trait ResultGenerator {
    /// Check if a row is currently open
    fn is_row_open(&self) -> bool;

    /// Open a new row
    fn open_row(&mut self) -> EvalResult<()>;

    /// Add a cell to the open row
    fn add_cell(&mut self, value: BuiltInArgument) -> EvalResult<()>;
}

/// In-memory result table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    rows: Vec<Vec<BuiltInArgument>>,
    #[serde(skip)]
    open: bool,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the open row, if any
    pub fn close_row(&mut self) {
        self.open = false;
    }

    /// All rows, including an open one
    pub fn rows(&self) -> &[Vec<BuiltInArgument>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ResultGenerator for ResultTable {
    fn is_row_open(&self) -> bool {
        self.open
    }

    fn open_row(&mut self) -> EvalResult<()> {
        if self.open {
            return Err(SqwrlError::internal("a result row is already open"));
        }
        self.rows.push(Vec::new());
        self.open = true;
        Ok(())
    }

    fn add_cell(&mut self, value: BuiltInArgument) -> EvalResult<()> {
        match self.rows.last_mut() {
            Some(row) if self.open => {
                row.push(value);
                Ok(())
            }
            _ => Err(SqwrlError::internal("no result row is open")),
        }
    }
}
