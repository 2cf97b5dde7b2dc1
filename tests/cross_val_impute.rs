use panelsplit::config::ImputationConfig;
use panelsplit::ml::{FittedImputer, Imputer, MeanImputer};
use panelsplit::{PanelSplit, PanelSplitError};
use polars::df;
use polars::prelude::*;

/// Two rows per year 2020..=2024
fn panel() -> (PanelSplit<i64>, DataFrame) {
    let years: Vec<i64> = (2020..2025).flat_map(|y| [y, y]).collect();
    let features = df! {
        "a" => &[
            Some(1.0), Some(3.0),
            None, Some(5.0),
            None, Some(7.0),
            None, Some(9.0),
            None, None,
        ],
        "b" => &[1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10],
    }
    .unwrap();
    let ps = PanelSplit::builder(years).n_splits(3).build().unwrap();
    (ps, features)
}

fn column(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

fn missing(values: &[Option<f64>], rows: &[usize]) -> usize {
    rows.iter()
        .filter(|&&row| values[row].map_or(true, f64::is_nan))
        .count()
}

#[test]
fn test_progressive_fill_forward() {
    let (ps, features) = panel();

    let result = ps
        .cross_val_impute(&MeanImputer::new(), &features, &ImputationConfig::default())
        .unwrap();
    let a = column(&result.imputed, "a");

    // fold 0 trains on 2020-21: mean(1, 3, 5) = 3
    assert_eq!(a[4], Some(3.0));
    assert_eq!(a[5], Some(7.0));
    // fold 1 sees the value filled by fold 0: mean(1, 3, 5, 3, 7) = 3.8
    assert!((a[6].unwrap() - 3.8).abs() < 1e-12);
    // fold 2: mean(1, 3, 5, 3, 7, 3.8, 9)
    let expected = (1.0 + 3.0 + 5.0 + 3.0 + 7.0 + 3.8 + 9.0) / 7.0;
    assert!((a[8].unwrap() - expected).abs() < 1e-12);
    assert!((a[9].unwrap() - expected).abs() < 1e-12);

    assert!(result.fitted_imputers.is_none());
}

#[test]
fn test_rows_outside_test_masks_untouched() {
    let (ps, features) = panel();
    let before = column(&features, "a");

    let result = ps
        .cross_val_impute(&MeanImputer::new(), &features, &ImputationConfig::default())
        .unwrap();
    let after = column(&result.imputed, "a");

    // 2021/a is train-only and keeps its hole
    assert_eq!(after[2], None);
    assert_eq!(&after[..4], &before[..4]);

    for fold in ps.split().unwrap() {
        let rows = fold.test_rows();
        assert!(missing(&after, &rows) <= missing(&before, &rows));
        assert_eq!(missing(&after, &rows), 0);
    }
}

#[test]
fn test_columns_keep_their_dtype() {
    let (ps, features) = panel();

    let result = ps
        .cross_val_impute(&MeanImputer::new(), &features, &ImputationConfig::default())
        .unwrap();

    let b = result.imputed.column("b").unwrap();
    assert_eq!(b.dtype(), &DataType::Int64);
    assert_eq!(b.as_materialized_series().i64().unwrap().get(9), Some(10));
    // the caller's frame is not modified
    assert_eq!(features.column("a").unwrap().null_count(), 5);
}

#[test]
fn test_mixed_dtypes_leave_train_only_rows_intact() {
    let (ps, numeric) = panel();
    let sectors: Vec<&str> = (0..10)
        .map(|i| if i % 2 == 0 { "tech" } else { "energy" })
        .collect();
    let listed: Vec<bool> = (0..10).map(|i| i % 3 == 0).collect();
    let mut features = numeric;
    features.with_column(Series::new("sector".into(), sectors)).unwrap();
    features.with_column(Series::new("listed".into(), listed)).unwrap();

    let result = ps
        .cross_val_impute(&MeanImputer::new(), &features, &ImputationConfig::default())
        .unwrap();
    let imputed = &result.imputed;

    // rows 0..4 (2020-21) are never in a test mask
    assert!(imputed.slice(0, 4).equals_missing(&features.slice(0, 4)));
    assert_eq!(imputed.column("sector").unwrap().dtype(), &DataType::String);
    assert_eq!(imputed.column("listed").unwrap().dtype(), &DataType::Boolean);
    assert!(imputed
        .select(["sector", "listed"])
        .unwrap()
        .equals_missing(&features.select(["sector", "listed"]).unwrap()));
    assert_eq!(missing(&column(imputed, "a"), &[4, 6, 8, 9]), 0);
}

#[test]
fn test_fitted_imputers_kept() {
    let (ps, features) = panel();

    let result = ps
        .cross_val_impute(
            &MeanImputer::new(),
            &features,
            &ImputationConfig::default().keep_imputers(),
        )
        .unwrap();

    let imputers = result.fitted_imputers.unwrap();
    assert_eq!(imputers.len(), 3);
    assert_eq!(imputers[0].statistic("a"), Some(3.0));
    assert_eq!(imputers[0].statistic("b"), Some(2.5));
}

#[test]
fn test_feature_rows_must_match() {
    let (ps, _) = panel();
    let short = df! { "a" => &[1.0, 2.0] }.unwrap();

    let result = ps.cross_val_impute(&MeanImputer::new(), &short, &ImputationConfig::default());
    assert!(matches!(result, Err(PanelSplitError::LengthMismatch { .. })));
}

/// Drops a row from its output, which the applier must reject
struct ShrinkingImputer;

struct FittedShrinking;

impl Imputer for ShrinkingImputer {
    type Fitted = FittedShrinking;

    fn fit(&self, _x: &DataFrame) -> panelsplit::Result<Self::Fitted> {
        Ok(FittedShrinking)
    }
}

impl FittedImputer for FittedShrinking {
    fn transform(&self, x: &DataFrame) -> panelsplit::Result<DataFrame> {
        Ok(x.slice(0, x.height().saturating_sub(1)))
    }
}

#[test]
fn test_shape_change_rejected() {
    let (ps, features) = panel();

    let result = ps.cross_val_impute(&ShrinkingImputer, &features, &ImputationConfig::default());
    assert!(matches!(result, Err(PanelSplitError::Estimator(_))));
}
