use std::future::Future;

use rosterbox_core::ClientResult;
use tracing::debug;

use crate::policy::PagingPolicy;

/// Reads a whole offset/limit collection.
///
/// Asks for `bulk_limit` records first. A shorter answer is the complete
/// collection. A full answer means the backend may have truncated it, so
/// pages of `page_size` follow from the number of records received until a
/// page comes back with fewer records than asked for. A page that exactly
/// fills `page_size` always triggers one more request.
pub async fn collect_all<T, F, Fut>(policy: PagingPolicy, mut fetch_page: F) -> ClientResult<Vec<T>>
where
    F: FnMut(u64, u64) -> Fut,
    Fut: Future<Output = ClientResult<Vec<T>>>,
{
    let mut records = fetch_page(0, policy.bulk_limit).await?;
    if (records.len() as u64) < policy.bulk_limit {
        return Ok(records);
    }

    // An empty page must end the walk even for a zero page size.
    let page_size = policy.page_size.max(1);
    debug!(
        received = records.len(),
        page_size, "bulk request came back full, paging"
    );
    loop {
        let page = fetch_page(records.len() as u64, page_size).await?;
        let exhausted = (page.len() as u64) < page_size;
        records.extend(page);
        if exhausted {
            break;
        }
    }
    Ok(records)
}
