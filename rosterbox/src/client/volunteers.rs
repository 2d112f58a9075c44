use rosterbox_core::{
    ApiRequest, CacheKey, ClientResult, Transport, Volunteer, VolunteerUpdate, decode_list,
};
use serde_json::json;

use super::RosterClient;
use crate::aggregate::collect_all;

/// Volunteer collection endpoint.
pub const VOLUNTEERS_PATH: &str = "/api/v1/volunteers";

/// Volunteer operations. Page and record reads are memoized per client.
pub struct Volunteers<'a, T> {
    client: &'a RosterClient<T>,
}

impl<'a, T> Volunteers<'a, T>
where
    T: Transport + 'static,
{
    pub(crate) fn new(client: &'a RosterClient<T>) -> Self {
        Self { client }
    }

    /// Returns one page of volunteers in server order.
    ///
    /// Each distinct `(offset, limit)` pair goes over the network at most
    /// once per client. Concurrent calls for the same pair share a request.
    /// Failures are not memoized. A reply without a body reads as an empty
    /// page and is fetched again on the next call; an empty array is kept.
    pub async fn list(&self, offset: u64, limit: u64) -> ClientResult<Vec<Volunteer>> {
        let client = self.client.clone();
        let page = self
            .client
            .inner()
            .pages
            .get_or_fetch(CacheKey::page(offset, limit), move || async move {
                client.volunteers().fetch_page(offset, limit).await
            })
            .await?;
        Ok(page.unwrap_or_default())
    }

    /// Returns every volunteer, paging past backend truncation when needed.
    pub async fn all(&self) -> ClientResult<Vec<Volunteer>> {
        collect_all(self.client.policy().paging, move |offset, limit| {
            self.list(offset, limit)
        })
        .await
    }

    /// Returns one volunteer, `None` when the backend answers with an empty
    /// body.
    ///
    /// Memoized per id like [`Volunteers::list`]. Whether a memoized `None`
    /// is served or fetched again depends on the client's
    /// [`RecordHitPolicy`](crate::RecordHitPolicy).
    pub async fn get(&self, id: u64) -> ClientResult<Option<Volunteer>> {
        let client = self.client.clone();
        self.client
            .inner()
            .records
            .get_or_fetch(CacheKey::record(id), move || async move {
                client.volunteers().fetch_record(id).await
            })
            .await
    }

    /// Updates a volunteer and returns the stored result.
    ///
    /// The memoized record for `id` is dropped. Memoized pages are kept.
    pub async fn update(&self, id: u64, update: &VolunteerUpdate) -> ClientResult<Volunteer> {
        let request = ApiRequest::put(format!("{VOLUNTEERS_PATH}/{id}")).json(update)?;
        let body = self.client.send_json(request).await;
        self.client.inner().records.invalidate(&CacheKey::record(id));
        // A 204 carries no record.
        let raw = body?.unwrap_or_else(|| json!({ "id": id }));
        Ok(Volunteer::from_backend(raw))
    }

    /// Deletes a volunteer. The memoized record for `id` is dropped.
    pub async fn delete(&self, id: u64) -> ClientResult<()> {
        let result = self
            .client
            .send_json(ApiRequest::delete(format!("{VOLUNTEERS_PATH}/{id}")))
            .await;
        self.client.inner().records.invalidate(&CacheKey::record(id));
        result.map(|_| ())
    }

    async fn fetch_page(&self, offset: u64, limit: u64) -> ClientResult<Option<Vec<Volunteer>>> {
        let request = ApiRequest::get(VOLUNTEERS_PATH)
            .query("skip", offset)
            .query("limit", limit);
        let Some(body) = self.client.send_json(request).await? else {
            return Ok(None);
        };
        Ok(Some(
            decode_list(body)?
                .into_iter()
                .map(Volunteer::from_backend)
                .collect(),
        ))
    }

    async fn fetch_record(&self, id: u64) -> ClientResult<Option<Volunteer>> {
        let request = ApiRequest::get(format!("{VOLUNTEERS_PATH}/{id}"));
        Ok(self
            .client
            .send_json(request)
            .await?
            .map(Volunteer::from_backend))
    }
}
