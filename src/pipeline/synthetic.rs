//! Reproducible synthetic house-sales table
//!
//! Used when the real dataset cannot be loaded. Columns are drawn one after
//! another from a single seeded generator, so a given `(rows, seed)` pair
//! always yields the same table.

use polars::prelude::{Column, DataFrame};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use tracing::debug;

use super::error::{AnalysisError, Result};

/// How a numeric column is drawn.
#[derive(Debug, Clone, Copy)]
enum Draw {
    /// Normal distribution with mean and standard deviation
    Normal(f64, f64),
    /// Uniform integer in `[low, high)`
    Uniform(i64, i64),
    /// Row number starting at 1
    Sequence,
}

const NUMERIC_COLUMNS: [(&str, Draw); 33] = [
    ("SalePrice", Draw::Normal(180_000.0, 50_000.0)),
    ("OverallQual", Draw::Uniform(1, 11)),
    ("GrLivArea", Draw::Normal(1500.0, 500.0)),
    ("GarageArea", Draw::Normal(500.0, 200.0)),
    ("GarageCars", Draw::Uniform(0, 4)),
    ("TotalBsmtSF", Draw::Normal(1000.0, 300.0)),
    ("1stFlrSF", Draw::Normal(1000.0, 300.0)),
    ("FullBath", Draw::Uniform(1, 4)),
    ("YearBuilt", Draw::Uniform(1900, 2020)),
    ("TotRmsAbvGrd", Draw::Uniform(4, 12)),
    ("WoodDeckSF", Draw::Normal(100.0, 150.0)),
    ("LotFrontage", Draw::Normal(70.0, 20.0)),
    ("BsmtFinSF1", Draw::Normal(400.0, 200.0)),
    ("2ndFlrSF", Draw::Normal(300.0, 400.0)),
    ("OpenPorchSF", Draw::Normal(50.0, 100.0)),
    ("HalfBath", Draw::Uniform(0, 3)),
    ("LotArea", Draw::Normal(10_000.0, 5000.0)),
    ("BsmtFullBath", Draw::Uniform(0, 3)),
    ("BsmtUnfSF", Draw::Normal(500.0, 300.0)),
    ("BedroomAbvGr", Draw::Uniform(1, 6)),
    ("ScreenPorch", Draw::Normal(20.0, 50.0)),
    ("PoolArea", Draw::Normal(10.0, 100.0)),
    ("MoSold", Draw::Uniform(1, 13)),
    ("3SsnPorch", Draw::Normal(5.0, 20.0)),
    ("BsmtHalfBath", Draw::Uniform(0, 2)),
    ("MiscVal", Draw::Normal(50.0, 200.0)),
    ("Id", Draw::Sequence),
    ("LowQualFinSF", Draw::Normal(10.0, 50.0)),
    ("YrSold", Draw::Uniform(2006, 2021)),
    ("OverallCond", Draw::Uniform(1, 11)),
    ("MSSubClass", Draw::Uniform(20, 200)),
    ("EnclosedPorch", Draw::Normal(20.0, 100.0)),
    ("KitchenAbvGr", Draw::Uniform(1, 3)),
];

/// Categorical columns as `(name, levels, weights)`. The final weight belongs to
/// the missing sentinel, which is stored as null.
const CATEGORICAL_COLUMNS: [(&str, &[&str], &[f64]); 5] = [
    (
        "FireplaceQu",
        &["Ex", "Gd", "TA", "Fa", "Po"],
        &[0.1, 0.2, 0.3, 0.2, 0.1, 0.1],
    ),
    (
        "Fence",
        &["GdPrv", "MnPrv", "GdWo", "MnWw"],
        &[0.05, 0.1, 0.05, 0.1, 0.7],
    ),
    ("Alley", &["Grvl", "Pave"], &[0.05, 0.05, 0.9]),
    (
        "MiscFeature",
        &["Elev", "Gar2", "Othr", "Shed", "TenC"],
        &[0.01, 0.02, 0.02, 0.03, 0.01, 0.91],
    ),
    ("PoolQC", &["Ex", "Fa", "Gd"], &[0.02, 0.02, 0.02, 0.94]),
];

/// Physical sizes and prices that must not be negative.
pub const NON_NEGATIVE_COLUMNS: [&str; 4] = ["SalePrice", "GrLivArea", "GarageArea", "TotalBsmtSF"];

/// Generate the synthetic table: 33 numeric columns followed by 5 categoricals.
///
/// Normal draws of the [`NON_NEGATIVE_COLUMNS`] are folded to their absolute
/// value.
pub fn generate_synthetic_table(rows: usize, seed: u64) -> Result<DataFrame> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut columns: Vec<Column> = Vec::with_capacity(NUMERIC_COLUMNS.len() + CATEGORICAL_COLUMNS.len());

    for (name, draw) in NUMERIC_COLUMNS {
        let column = match draw {
            Draw::Normal(mean, std) => {
                let dist = Normal::new(mean, std)
                    .map_err(|e| AnalysisError::Synthetic(format!("{}: {}", name, e)))?;
                let fold = NON_NEGATIVE_COLUMNS.contains(&name);
                let values: Vec<f64> = (0..rows)
                    .map(|_| {
                        let v = dist.sample(&mut rng);
                        if fold {
                            v.abs()
                        } else {
                            v
                        }
                    })
                    .collect();
                Column::new(name.into(), values)
            }
            Draw::Uniform(low, high) => {
                let values: Vec<i64> = (0..rows).map(|_| rng.gen_range(low..high)).collect();
                Column::new(name.into(), values)
            }
            Draw::Sequence => {
                let values: Vec<i64> = (1..=rows as i64).collect();
                Column::new(name.into(), values)
            }
        };
        columns.push(column);
    }

    for (name, levels, weights) in CATEGORICAL_COLUMNS {
        let dist = WeightedIndex::new(weights)
            .map_err(|e| AnalysisError::Synthetic(format!("{}: {}", name, e)))?;
        let values: Vec<Option<&str>> = (0..rows)
            .map(|_| levels.get(dist.sample(&mut rng)).copied())
            .collect();
        columns.push(Column::new(name.into(), values));
    }

    let df = DataFrame::new(columns)?;
    debug!(
        rows = df.height(),
        columns = df.width(),
        seed,
        "Generated synthetic dataset"
    );

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_weights_cover_sentinel() {
        for (name, levels, weights) in CATEGORICAL_COLUMNS {
            assert_eq!(
                weights.len(),
                levels.len() + 1,
                "{} needs one weight per level plus the missing sentinel",
                name
            );
            let total: f64 = weights.iter().sum();
            assert!((total - 1.0).abs() < 1e-9, "{} weights sum to {}", name, total);
        }
    }

    #[test]
    fn test_small_table_shape() {
        let df = generate_synthetic_table(25, 1).unwrap();
        assert_eq!(df.shape(), (25, 38));
    }
}
