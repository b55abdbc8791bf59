//! Property tests: expanding then collapsing keeps each row's selection set.

use std::collections::BTreeSet;

use polars::prelude::{DataFrame, NamedFrom, Series};
use proptest::prelude::*;
use tidy_model::frame::column_names;
use tidy_model::{CollapseOptions, ExpandOptions};
use tidy_reshape::{collapse_multiple_choice, expand_multiple_choice};

const TOKENS: &[&str] = &["Blue", "Green", "Red", "Yellow", "dark_blue"];

fn cell_strategy() -> impl Strategy<Value = Option<Vec<usize>>> {
    prop::option::of(prop::collection::vec(0..TOKENS.len(), 0..5))
}

fn token_set(cell: Option<&str>, separator: &str) -> Option<BTreeSet<String>> {
    let set: BTreeSet<String> = cell?
        .split(separator)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    if set.is_empty() { None } else { Some(set) }
}

proptest! {
    #[test]
    fn expand_collapse_round_trip(
        rows in prop::collection::vec(cell_strategy(), 1..20),
        separator in prop::sample::select(vec![",", ";", " | "]),
    ) {
        let cells: Vec<Option<String>> = rows
            .iter()
            .map(|row| {
                row.as_ref().map(|picks| {
                    picks.iter().map(|&idx| TOKENS[idx]).collect::<Vec<_>>().join(separator)
                })
            })
            .collect();
        let df = DataFrame::new(vec![
            Series::new("colors".into(), cells.clone()).into(),
        ])
        .unwrap();

        let expand = ExpandOptions::new().with_separator(separator);
        let expanded = expand_multiple_choice(&df, "colors", &expand).unwrap();
        prop_assert_eq!(expanded.height(), df.height());

        let indicators: Vec<String> = column_names(&expanded)
            .into_iter()
            .filter(|name| name.starts_with("colors_"))
            .collect();
        let collapse = CollapseOptions::new()
            .with_separator(separator)
            .with_prefix("colors");
        let collapsed =
            collapse_multiple_choice(&expanded, &indicators, "colors", &collapse).unwrap();

        let restored = collapsed.column("colors").unwrap().str().unwrap();
        for (idx, original) in cells.iter().enumerate() {
            prop_assert_eq!(
                token_set(restored.get(idx), separator),
                token_set(original.as_deref(), separator)
            );
        }
    }
}
