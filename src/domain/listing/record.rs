use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

/// `Sync` when the `parallel` feature sorts across threads, no bound otherwise.
#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "parallel")]
impl<T: Sync> MaybeSync for T {}

#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}
#[cfg(not(feature = "parallel"))]
impl<T> MaybeSync for T {}

/// A value a record exposes for ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl SortValue<'_> {
    /// Numbers order numerically (IEEE total order, so NaN sorts above infinity), text
    /// case-insensitively.
    /// A number and a text value never share a field, numbers go first if they do.
    pub fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl From<f64> for SortValue<'_> {
    fn from(value: f64) -> Self {
        SortValue::Number(value)
    }
}

impl<'a> From<&'a str> for SortValue<'a> {
    fn from(value: &'a str) -> Self {
        SortValue::Text(value)
    }
}

/// Missing values order below every present value.
pub fn compare_optional(a: Option<SortValue<'_>>, b: Option<SortValue<'_>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// One listable entity: a market asset, a news article or a portfolio holding.
pub trait Record: MaybeSync {
    type Id: Clone + Eq + Hash + Debug;
    /// Page-specific filter key. `Default` must be the "show everything" key.
    type Filter: Clone + Default + PartialEq + Debug;
    type SortField: Copy + PartialEq + Debug + MaybeSync;

    fn id(&self) -> &Self::Id;

    fn matches_filter(&self, filter: &Self::Filter) -> bool;

    fn sort_value(&self, field: Self::SortField) -> Option<SortValue<'_>>;

    /// Text the free-text search looks into.
    fn search_fields(&self) -> Vec<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_comparison_ignores_case() {
        assert_eq!(SortValue::Text("bitcoin").compare(&SortValue::Text("Bitcoin")), Ordering::Equal);
        assert_eq!(SortValue::Text("aave").compare(&SortValue::Text("BNB")), Ordering::Less);
    }

    #[test]
    fn nan_has_a_fixed_place() {
        let nan = SortValue::Number(f64::NAN);
        assert_eq!(nan.compare(&SortValue::Number(f64::INFINITY)), Ordering::Greater);
        assert_eq!(SortValue::Number(1.0).compare(&nan), Ordering::Less);
        assert_eq!(nan.compare(&nan), Ordering::Equal);
    }

    #[test]
    fn missing_value_is_lowest() {
        assert_eq!(compare_optional(None, Some(SortValue::Number(-1e12))), Ordering::Less);
        assert_eq!(compare_optional(None, None), Ordering::Equal);
    }
}
