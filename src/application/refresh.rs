use super::data_source::AsyncDataSource;
use super::page_controller::{PageController, RefreshOutcome};
use crate::domain::listing::Record;
use std::cell::RefCell;
use std::rc::Rc;

/// Fetches through an async source without holding either borrow across the await.
///
/// The ticket is taken before the request goes out, so when two refreshes overlap only the
/// one started last can update the page, whatever order the responses arrive in.
pub async fn refresh_shared<R, S>(
    controller: &Rc<RefCell<PageController<R>>>,
    source: &Rc<RefCell<S>>,
) -> RefreshOutcome
where
    R: Record + 'static,
    S: AsyncDataSource<R> + ?Sized,
{
    let ticket = controller.borrow_mut().begin_refresh();
    let pending = source.borrow_mut().fetch_async();
    let result = pending.await;
    controller.borrow_mut().complete_refresh(ticket, result)
}
