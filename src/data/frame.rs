use crate::error::PrepareError;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Column / Frame – the column-major working copy used during preparation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// Numeric column built from encoder output.
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Column::new(name, values.into_iter().map(CellValue::Float).collect())
    }
}

/// An ordered set of equally long columns.
///
/// Column names are not required to be unique; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub columns: Vec<Column>,
    n_rows: usize,
}

impl Frame {
    /// An empty frame that still knows its row count.
    pub fn empty(n_rows: usize) -> Self {
        Frame {
            columns: Vec::new(),
            n_rows,
        }
    }

    /// Build a frame; every column must hold `n_rows` values.
    pub fn new(columns: Vec<Column>, n_rows: usize) -> Result<Self, PrepareError> {
        let mut frame = Frame::empty(n_rows);
        for col in columns {
            frame.push(col)?;
        }
        Ok(frame)
    }

    /// Column-major copy of a dataset.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let columns = dataset
            .column_names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                Column::new(
                    name.clone(),
                    dataset.rows.iter().map(|row| row[idx].clone()).collect(),
                )
            })
            .collect();
        Frame {
            columns,
            n_rows: dataset.len(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append a column, checking that it is row-aligned with the frame.
    pub fn push(&mut self, column: Column) -> Result<(), PrepareError> {
        if column.values.len() != self.n_rows {
            return Err(PrepareError::RowMismatch {
                block: column.name,
                expected: self.n_rows,
                found: column.values.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Side-by-side concatenation of row-aligned blocks, in order.
    pub fn hstack(blocks: Vec<Frame>) -> Result<Frame, PrepareError> {
        let n_rows = blocks.first().map(|b| b.n_rows).unwrap_or(0);
        let mut out = Frame::empty(n_rows);
        for block in blocks {
            if block.n_rows != n_rows {
                return Err(PrepareError::RowMismatch {
                    block: block.column_names().join(","),
                    expected: n_rows,
                    found: block.n_rows,
                });
            }
            out.columns.extend(block.columns);
        }
        Ok(out)
    }

    /// Prefix every column name.
    pub fn with_prefix(mut self, prefix: &str) -> Frame {
        for col in &mut self.columns {
            col.name = format!("{prefix}{}", col.name);
        }
        self
    }

    /// Align the frame to a training column schema.
    ///
    /// Schema columns the frame lacks are added as integer zeros, then the
    /// result holds exactly the schema columns in schema order. Columns not in
    /// the schema are dropped; a name listed twice yields two copies.
    pub fn reconcile(mut self, schema: &[String]) -> Frame {
        for name in schema {
            if !self.contains(name) {
                self.columns
                    .push(Column::new(name.clone(), vec![CellValue::Integer(0); self.n_rows]));
            }
        }

        let columns = schema
            .iter()
            .filter_map(|name| self.get(name).cloned())
            .collect();

        Frame {
            columns,
            n_rows: self.n_rows,
        }
    }
}
