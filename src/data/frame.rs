use ndarray::{Array2, ArrayView1, Axis};

/// Named columns over a dense `[rows, columns]` matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct DataFrame {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl DataFrame {
    /// # Panics
    /// If the number of names differs from the number of matrix columns.
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Self {
        assert_eq!(
            columns.len(),
            values.ncols(),
            "expected one name per column"
        );
        Self { columns, values }
    }

    /// Names the columns `"0"`, `"1"`, ...
    pub fn from_values(values: Array2<f64>) -> Self {
        let columns = (0..values.ncols()).map(|i| i.to_string()).collect();
        Self { columns, values }
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_columns(&self) -> usize {
        self.values.ncols()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.values.column(index))
    }

    /// Iterates `(name, column)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ArrayView1<'_, f64>)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.columns())
    }

    /// Returns a copy without the named columns. Unknown names are ignored.
    pub fn drop_columns<S: AsRef<str>>(&self, names: &[S]) -> DataFrame {
        let keep: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !names.iter().any(|n| n.as_ref() == c.as_str()))
            .map(|(i, _)| i)
            .collect();
        DataFrame {
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            values: self.values.select(Axis(1), &keep),
        }
    }

    /// Converts the values into a feature matrix for the datasets.
    pub fn to_features(&self) -> Array2<f32> {
        self.values.mapv(|v| v as f32)
    }
}
