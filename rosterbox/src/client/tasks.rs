use rosterbox_core::{
    ApiRequest, ClientResult, EmailTemplate, Publication, TaskManager, TaskTemplate,
    TaskTemplateDraft, Transport, decode_list_as, decode_record,
};
use serde_json::json;

use super::RosterClient;

/// Task template collection endpoint.
pub const TASK_TEMPLATES_PATH: &str = "/api/v1/task-templates";

/// Task template operations, including the publication, e-mail template and
/// manager sub-resources.
pub struct TaskTemplates<'a, T> {
    client: &'a RosterClient<T>,
}

impl<'a, T> TaskTemplates<'a, T>
where
    T: Transport + 'static,
{
    pub(crate) fn new(client: &'a RosterClient<T>) -> Self {
        Self { client }
    }

    fn path(id: u64, rest: &str) -> String {
        format!("{TASK_TEMPLATES_PATH}/{id}{rest}")
    }

    pub async fn list(&self) -> ClientResult<Vec<TaskTemplate>> {
        match self
            .client
            .send_json(ApiRequest::get(TASK_TEMPLATES_PATH))
            .await?
        {
            Some(body) => decode_list_as(body),
            None => Ok(Vec::new()),
        }
    }

    pub async fn get(&self, id: u64) -> ClientResult<TaskTemplate> {
        let body = self.client.send_json(ApiRequest::get(Self::path(id, ""))).await?;
        decode_record(body)
    }

    pub async fn create(&self, draft: &TaskTemplateDraft) -> ClientResult<TaskTemplate> {
        let request = ApiRequest::post(TASK_TEMPLATES_PATH).json(draft)?;
        decode_record(self.client.send_json(request).await?)
    }

    pub async fn update(&self, id: u64, draft: &TaskTemplateDraft) -> ClientResult<TaskTemplate> {
        let request = ApiRequest::put(Self::path(id, "")).json(draft)?;
        decode_record(self.client.send_json(request).await?)
    }

    pub async fn delete(&self, id: u64) -> ClientResult<()> {
        self.client
            .send_json(ApiRequest::delete(Self::path(id, "")))
            .await
            .map(|_| ())
    }

    /// Replaces the publication flags and returns the updated template.
    pub async fn update_publication(
        &self,
        id: u64,
        publication: &Publication,
    ) -> ClientResult<TaskTemplate> {
        let request = ApiRequest::put(Self::path(id, "/publication")).json(publication)?;
        decode_record(self.client.send_json(request).await?)
    }

    /// Returns the reminder e-mail, or the default one when none is stored.
    pub async fn email_template(&self, id: u64) -> ClientResult<EmailTemplate> {
        let body = self
            .client
            .send_json(ApiRequest::get(Self::path(id, "/email-template")))
            .await?;
        match body {
            Some(body) => decode_record(Some(body)),
            None => Ok(EmailTemplate::default()),
        }
    }

    pub async fn update_email_template(
        &self,
        id: u64,
        template: &EmailTemplate,
    ) -> ClientResult<EmailTemplate> {
        let request = ApiRequest::put(Self::path(id, "/email-template")).json(template)?;
        let body = self.client.send_json(request).await?;
        Ok(match body {
            Some(body) => decode_record(Some(body))?,
            None => template.clone(),
        })
    }

    pub async fn managers(&self, id: u64) -> ClientResult<Vec<TaskManager>> {
        match self
            .client
            .send_json(ApiRequest::get(Self::path(id, "/managers")))
            .await?
        {
            Some(body) => decode_list_as(body),
            None => Ok(Vec::new()),
        }
    }

    pub async fn add_manager(&self, id: u64, user_id: u64) -> ClientResult<()> {
        let request =
            ApiRequest::post(Self::path(id, "/managers")).json(&json!({ "user_id": user_id }))?;
        self.client.send_json(request).await.map(|_| ())
    }

    pub async fn remove_manager(&self, id: u64, user_id: u64) -> ClientResult<()> {
        let request = ApiRequest::delete(Self::path(id, &format!("/managers/{user_id}")));
        self.client.send_json(request).await.map(|_| ())
    }
}
