use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortSpec<S> {
    pub field: S,
    pub direction: SortDirection,
}

impl<S> SortSpec<S> {
    pub fn new(field: S, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: S) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: S) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

impl<S: std::str::FromStr> SortSpec<S> {
    /// Parses `<field>_<asc|desc>` keys such as `market_cap_desc`.
    /// A bare field name sorts ascending. Unknown fields yield `None`, which means "keep order".
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        if let Some((field, direction)) = key.rsplit_once('_') {
            if let Ok(direction) = direction.parse::<SortDirection>() {
                return field.parse::<S>().ok().map(|field| Self::new(field, direction));
            }
        }
        key.parse::<S>().ok().map(Self::asc)
    }
}

/// Transient per-page UI selection. Owned by one page controller, reset on load.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<F, S> {
    pub filter: F,
    pub sort: Option<SortSpec<S>>,
    pub query: String,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl<F: Default, S> ViewState<F, S> {
    pub fn new(page_size: usize) -> Self {
        Self { filter: F::default(), sort: None, query: String::new(), page: 1, page_size }
    }

    pub fn with_sort(mut self, sort: SortSpec<S>) -> Self {
        self.sort = Some(sort);
        self
    }
}

impl<F: Default, S> Default for ViewState<F, S> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
