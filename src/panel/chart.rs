use crate::types::PeriodFold;
use std::fmt::Debug;
use std::fmt::Write;

const TRAIN: char = 'T';
const TEST: char = 'V';
const UNUSED: char = '.';

/// One line per fold, one cell per unique period
pub fn render_chart<P: PartialEq + Debug>(unique: &[P], folds: &[PeriodFold<P>]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Cross-validation splits ({} = train, {} = test, {} = unused)",
        TRAIN, TEST, UNUSED
    );

    let width = folds
        .iter()
        .map(|fold| fold.fold_num)
        .max()
        .unwrap_or(0)
        .to_string()
        .len();
    for fold in folds {
        let cells: String = unique
            .iter()
            .map(|period| {
                if fold.test.contains(period) {
                    TEST
                } else if fold.train.contains(period) {
                    TRAIN
                } else {
                    UNUSED
                }
            })
            .collect();
        let _ = writeln!(out, "fold {:>width$} | {}", fold.fold_num, cells, width = width);
    }

    match (unique.first(), unique.last()) {
        (Some(first), Some(last)) => {
            let _ = write!(out, "periods: {:?} .. {:?}", first, last);
        }
        _ => out.push_str("periods: none"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_cells() {
        let unique = vec![1, 2, 3, 4];
        let folds = vec![
            PeriodFold {
                train: vec![1, 2],
                test: vec![3],
                fold_num: 0,
            },
            PeriodFold {
                train: vec![2, 3],
                test: vec![4],
                fold_num: 2,
            },
        ];

        let chart = render_chart(&unique, &folds);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[1], "fold 0 | TTV.");
        assert_eq!(lines[2], "fold 2 | .TTV");
        assert_eq!(lines[3], "periods: 1 .. 4");
    }

    #[test]
    fn test_chart_without_folds() {
        let chart = render_chart::<i64>(&[], &[]);
        assert!(chart.ends_with("periods: none"));
    }
}
