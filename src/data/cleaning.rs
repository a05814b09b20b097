//! Column statistics and label encoding for tabular frames.

use crate::data::DataFrame;
use ndarray::{Array2, ArrayBase, Data, Ix1, Ix2};
use num_traits::Float;
use std::cmp::Ordering;

/// Counts distinct values.
///
/// `-0.0` and `0.0` are the same value and every NaN counts as one single value.
pub fn number_of_unique_values<F, S>(column: &ArrayBase<S, Ix1>) -> usize
where
    F: Float,
    S: Data<Elem = F>,
{
    let mut has_nan = false;
    let mut values: Vec<F> = Vec::with_capacity(column.len());
    for &v in column.iter() {
        if v.is_nan() {
            has_nan = true;
        } else {
            values.push(v);
        }
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    values.dedup_by(|a, b| *a == *b);
    values.len() + has_nan as usize
}

/// A column with exactly two distinct values.
pub fn is_binary_feature<F, S>(column: &ArrayBase<S, Ix1>) -> bool
where
    F: Float,
    S: Data<Elem = F>,
{
    number_of_unique_values(column) == 2
}

pub fn unique_values_per_feature(frame: &DataFrame) -> Vec<usize> {
    frame
        .values()
        .columns()
        .into_iter()
        .map(|c| number_of_unique_values(&c))
        .collect()
}

/// Names of the columns holding a single value, which carry no information.
pub fn single_value_features(frame: &DataFrame) -> Vec<String> {
    features_where(frame, |n_unique| n_unique == 1)
}

pub fn binary_features(frame: &DataFrame) -> Vec<String> {
    features_where(frame, |n_unique| n_unique == 2)
}

fn features_where(frame: &DataFrame, keep: impl Fn(usize) -> bool) -> Vec<String> {
    frame
        .columns()
        .iter()
        .zip(unique_values_per_feature(frame))
        .filter(|(_, n_unique)| keep(*n_unique))
        .map(|(name, _)| name.clone())
        .collect()
}

/// Returns a copy of the frame without its single-valued columns.
pub fn remove_single_value_features(frame: &DataFrame) -> DataFrame {
    frame.drop_columns(&single_value_features(frame))
}

/// Drops the single-valued columns in place, returning their names.
pub fn remove_single_value_features_inplace(frame: &mut DataFrame) -> Vec<String> {
    let dropped = single_value_features(frame);
    if !dropped.is_empty() {
        *frame = frame.drop_columns(&dropped);
    }
    dropped
}

/// Whether every row is a one-hot vector: all entries are `0` or `1` and each row sums to `1`.
pub fn is_one_hot_encoded<F, S>(matrix: &ArrayBase<S, Ix2>) -> bool
where
    F: Float,
    S: Data<Elem = F>,
{
    matrix.rows().into_iter().all(|row| {
        let mut ones = 0;
        for &v in row.iter() {
            if v == F::one() {
                ones += 1;
            } else if v != F::zero() {
                return false;
            }
        }
        ones == 1
    })
}

/// Converts class ids into a dense `[labels.len(), n_classes]` one-hot matrix.
///
/// # Panics
/// If a label is not in `0..n_classes`.
pub fn classes_to_one_hot(labels: &[usize], n_classes: usize) -> Array2<f32> {
    let mut one_hot = Array2::zeros((labels.len(), n_classes));
    for (row, &label) in labels.iter().enumerate() {
        assert!(
            label < n_classes,
            "label {label} out of range for {n_classes} classes"
        );
        one_hot[[row, label]] = 1.;
    }
    one_hot
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn frame() -> DataFrame {
        DataFrame::new(
            vec!["constant".into(), "varying".into()],
            array![[7., 1.], [7., 2.], [7., 3.]],
        )
    }

    #[test]
    fn counts_unique_values() {
        assert_eq!(number_of_unique_values(&array![1., 1., 2., 3., 3.]), 3);
        assert_eq!(number_of_unique_values(&array![0.0f32, -0.0]), 1);
        assert_eq!(number_of_unique_values(&array![f64::NAN, f64::NAN, 1.]), 2);
        assert_eq!(number_of_unique_values(&ndarray::Array1::<f64>::zeros(0)), 0);
    }

    #[test]
    fn binary_features_need_exactly_two_values() {
        assert!(is_binary_feature(&array![0., 1., 0., 1., 1.]));
        assert!(!is_binary_feature(&array![0., 1., 2.]));
        assert!(!is_binary_feature(&array![1., 1.]));

        let frame = DataFrame::new(
            vec!["flag".into(), "count".into()],
            array![[0., 1.], [1., 2.], [0., 3.]],
        );
        assert_eq!(binary_features(&frame), vec!["flag".to_string()]);
    }

    #[test]
    fn unique_values_in_column_order() {
        assert_eq!(unique_values_per_feature(&frame()), vec![1, 3]);
    }

    #[test]
    fn removes_constant_column() {
        let frame = frame();
        let cleaned = remove_single_value_features(&frame);
        assert_eq!(cleaned.columns(), &["varying".to_string()]);
        assert_eq!(cleaned.values(), &array![[1.], [2.], [3.]]);
        // the source frame is untouched
        assert_eq!(frame.n_columns(), 2);
    }

    #[test]
    fn removes_constant_column_inplace() {
        let mut frame = frame();
        let dropped = remove_single_value_features_inplace(&mut frame);
        assert_eq!(dropped, vec!["constant".to_string()]);
        assert_eq!(frame.columns(), &["varying".to_string()]);
    }

    #[test]
    fn one_hot_from_classes() {
        let one_hot = classes_to_one_hot(&[0, 1, 0], 2);
        assert_eq!(one_hot, array![[1., 0.], [0., 1.], [1., 0.]]);
        assert!(is_one_hot_encoded(&one_hot));
    }

    #[test]
    fn detects_non_one_hot() {
        assert!(!is_one_hot_encoded(&array![[1., 1.], [0., 1.]]));
        assert!(!is_one_hot_encoded(&array![[0., 0.], [0., 1.]]));
        assert!(!is_one_hot_encoded(&array![[0.5, 0.5]]));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn one_hot_rejects_large_label() {
        classes_to_one_hot(&[0, 2], 2);
    }
}
