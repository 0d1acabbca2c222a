use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::model::query::ListQuery;
use crate::model::task::Task;

use super::store::{StoreError, TaskService};

/// HTTP task store at `{base_url}/tasks`
pub struct HttpRemote {
    client: Client,
    tasks_url: String,
}

impl HttpRemote {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpRemote {
            client,
            tasks_url: format!("{}/tasks", base_url.trim_end_matches('/')),
        })
    }

    pub fn tasks_url(&self) -> &str {
        &self.tasks_url
    }

    fn task_url(&self, id: u64) -> String {
        format!("{}/{}", self.tasks_url, id)
    }
}

/// Turn non-2xx responses into `StoreError::Status`
fn check(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(StoreError::Status {
            status: status.as_u16(),
        })
    }
}

fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, StoreError> {
    resp.json::<T>().map_err(|e| {
        if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else {
            StoreError::Transport(e)
        }
    })
}

impl TaskService for HttpRemote {
    fn list(&self, query: &ListQuery) -> Result<Vec<Task>, StoreError> {
        let params = query.params();
        tracing::debug!(url = %self.tasks_url, ?params, "GET tasks");
        let resp = self.client.get(&self.tasks_url).query(&params).send()?;
        decode(check(resp)?)
    }

    fn create(&self, task: &Task) -> Result<Task, StoreError> {
        tracing::debug!(url = %self.tasks_url, title = %task.title, "POST task");
        let resp = self.client.post(&self.tasks_url).json(task).send()?;
        decode(check(resp)?)
    }

    fn update(&self, id: u64, task: &Task) -> Result<Task, StoreError> {
        let url = self.task_url(id);
        tracing::debug!(%url, "PUT task");
        let resp = self.client.put(&url).json(task).send()?;
        decode(check(resp)?)
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        let url = self.task_url(id);
        tracing::debug!(%url, "DELETE task");
        let resp = self.client.delete(&url).send()?;
        check(resp)?;
        Ok(())
    }
}
