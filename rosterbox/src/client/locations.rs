use rosterbox_core::{ApiRequest, ClientResult, Location, Transport, decode_list_as};

use super::RosterClient;

pub const LOCATIONS_PATH: &str = "/api/v1/locations";

pub struct Locations<'a, T> {
    client: &'a RosterClient<T>,
}

impl<'a, T> Locations<'a, T>
where
    T: Transport + 'static,
{
    pub(crate) fn new(client: &'a RosterClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Location>> {
        match self.client.send_json(ApiRequest::get(LOCATIONS_PATH)).await? {
            Some(body) => decode_list_as(body),
            None => Ok(Vec::new()),
        }
    }
}
