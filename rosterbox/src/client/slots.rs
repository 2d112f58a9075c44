use rosterbox_core::{
    ApiRequest, ClientError, ClientResult, NewSlot, NotificationReceipt, Slot, SlotUpdate,
    Transport, decode_list, decode_record,
};
use serde_json::Value;
use tracing::debug;

use super::RosterClient;
use crate::resolver::first_success;

/// Slot collection endpoint.
pub const SLOTS_PATH: &str = "/api/slots";

/// Slot operations. Nothing here is memoized.
pub struct Slots<'a, T> {
    client: &'a RosterClient<T>,
}

impl<'a, T> Slots<'a, T>
where
    T: Transport + 'static,
{
    pub(crate) fn new(client: &'a RosterClient<T>) -> Self {
        Self { client }
    }

    fn enabled(&self) -> bool {
        let enabled = self.client.policy().slots.enabled;
        if !enabled {
            debug!("slot reads disabled, returning an empty list");
        }
        enabled
    }

    /// Returns every slot.
    pub async fn list(&self) -> ClientResult<Vec<Slot>> {
        if !self.enabled() {
            return Ok(Vec::new());
        }
        match self.client.send_json(ApiRequest::get(SLOTS_PATH)).await? {
            Some(body) => slots_from(body),
            None => Ok(Vec::new()),
        }
    }

    /// Returns the slots of one volunteer.
    ///
    /// Tries the configured endpoint candidates in order and returns the
    /// first list any of them yields. A recognized list ends the search even
    /// when its records are incomplete. When all of them fail, the error of
    /// the last one is returned.
    pub async fn for_volunteer(&self, volunteer_id: u64) -> ClientResult<Vec<Slot>> {
        if !self.enabled() {
            return Ok(Vec::new());
        }
        let candidates = &self.client.policy().slots.endpoints;
        first_success(candidates.render(volunteer_id), move |path| self.probe(path)).await
    }

    async fn probe(&self, path: String) -> ClientResult<Vec<Slot>> {
        debug!(%path, "trying slot endpoint");
        let response = self.client.send(ApiRequest::get(path)).await?;
        if !response.is_success() {
            let text = response.text();
            let message = if text.is_empty() {
                format!("HTTP {}", response.status.as_u16())
            } else {
                text
            };
            return Err(ClientError::Http {
                status: response.status,
                message,
            });
        }
        let body = response
            .into_json()?
            .ok_or_else(|| ClientError::Shape("empty body".to_owned()))?;
        slots_from(body)
    }

    pub async fn get(&self, id: u64) -> ClientResult<Slot> {
        let body = self
            .client
            .send_json(ApiRequest::get(format!("{SLOTS_PATH}/{id}")))
            .await?;
        decode_record(body)
    }

    pub async fn create(&self, slot: &NewSlot) -> ClientResult<Slot> {
        let request = ApiRequest::post(SLOTS_PATH).json(slot)?;
        decode_record(self.client.send_json(request).await?)
    }

    pub async fn update(&self, id: u64, update: &SlotUpdate) -> ClientResult<Slot> {
        let request = ApiRequest::put(format!("{SLOTS_PATH}/{id}")).json(update)?;
        decode_record(self.client.send_json(request).await?)
    }

    pub async fn delete(&self, id: u64) -> ClientResult<()> {
        self.client
            .send_json(ApiRequest::delete(format!("{SLOTS_PATH}/{id}")))
            .await
            .map(|_| ())
    }

    /// Sends a WhatsApp reminder for the slot.
    pub async fn send_whatsapp(&self, id: u64) -> ClientResult<NotificationReceipt> {
        self.notify(id, "send-whatsapp").await
    }

    /// Sends an e-mail reminder for the slot.
    pub async fn send_email(&self, id: u64) -> ClientResult<NotificationReceipt> {
        self.notify(id, "send-email").await
    }

    async fn notify(&self, id: u64, action: &str) -> ClientResult<NotificationReceipt> {
        let request = ApiRequest::post(format!("{SLOTS_PATH}/{id}/{action}"));
        decode_record(self.client.send_json(request).await?)
    }
}

/// Maps a list body record by record. Only the list shape can fail.
fn slots_from(body: Value) -> ClientResult<Vec<Slot>> {
    Ok(decode_list(body)?.into_iter().map(Slot::from_backend).collect())
}
