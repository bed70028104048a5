use crate::domain::errors::DataResult;
use futures::future::{self, LocalBoxFuture};

/// Supplies a full collection snapshot on demand, or fails.
pub trait DataSource<R> {
    fn fetch(&mut self) -> DataResult<Vec<R>>;

    /// Post-processes every snapshot (e.g. annotating records from local state).
    fn map_records<F>(self, map: F) -> MapRecords<Self, F>
    where
        Self: Sized,
        F: FnMut(Vec<R>) -> Vec<R>,
    {
        MapRecords { source: self, map }
    }
}

/// Asynchronous flavour for sources backed by real network requests.
///
/// The returned future owns everything it needs, so the source is free again as soon as
/// the request has been issued and overlapping requests are possible.
pub trait AsyncDataSource<R> {
    fn fetch_async(&mut self) -> LocalBoxFuture<'static, DataResult<Vec<R>>>;
}

impl<R: 'static, T: DataSource<R>> AsyncDataSource<R> for T {
    fn fetch_async(&mut self) -> LocalBoxFuture<'static, DataResult<Vec<R>>> {
        Box::pin(future::ready(self.fetch()))
    }
}

pub struct MapRecords<S, F> {
    source: S,
    map: F,
}

impl<R, S, F> DataSource<R> for MapRecords<S, F>
where
    S: DataSource<R>,
    F: FnMut(Vec<R>) -> Vec<R>,
{
    fn fetch(&mut self) -> DataResult<Vec<R>> {
        self.source.fetch().map(&mut self.map)
    }
}
