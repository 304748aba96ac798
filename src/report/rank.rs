/// How many rows a section keeps after sorting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RankMode {
    #[default]
    All,
    Top(usize),
}

impl RankMode {
    /// `None` shows everything.
    pub fn from_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(n) => RankMode::Top(n),
            None => RankMode::All,
        }
    }

    pub fn apply<T>(self, mut rows: Vec<T>) -> Vec<T> {
        if let RankMode::Top(n) = self {
            rows.truncate(n);
        }
        rows
    }

    /// Header qualifier, e.g. `all` or `top 10`.
    pub fn label(self) -> String {
        match self {
            RankMode::All => "all".to_string(),
            RankMode::Top(n) => format!("top {n}"),
        }
    }
}

/// Sorts by `key` descending, then keeps what `mode` allows.
pub fn rank_by<T, F>(mut rows: Vec<T>, key: F, mode: RankMode) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    rows.sort_by(|a, b| key(b).total_cmp(&key(a)));
    mode.apply(rows)
}

/// Sorts by `name` ascending, ignoring case, then keeps what `mode` allows.
pub fn order_by_name<T, F>(mut rows: Vec<T>, name: F, mode: RankMode) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    rows.sort_by_cached_key(|row| name(row).to_lowercase());
    mode.apply(rows)
}
