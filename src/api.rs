use std::time::Duration;

use crate::models::{Task, TaskDraft, TaskId};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum ApiError {
    Http(reqwest::Error),
    Status { status: u16, body: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http(err) => write!(f, "request error: {err}"),
            ApiError::Status { status, body } => {
                write!(f, "backend returned http {status}: {body}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Http(value)
    }
}

/// The backend seam the controller operations are written against. Tests
/// substitute an in-memory implementation; the application uses [`ApiClient`].
#[allow(async_fn_in_trait)]
pub trait TaskBackend {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;
    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError>;
    async fn update_task(&self, task: &Task) -> Result<Task, ApiError>;
    async fn delete_task(&self, task_id: TaskId) -> Result<(), ApiError>;
}

/// REST client for the documented backend contract. Fire-and-wait: one fixed
/// timeout, no retries, no backoff.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn task_url(&self, task_id: TaskId) -> String {
        format!("{}/api/tasks/{task_id}", self.base_url)
    }
}

async fn checked(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

impl TaskBackend for ApiClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.client.get(self.tasks_url()).send().await?;
        Ok(checked(response).await?.json::<Vec<Task>>().await?)
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let response = self.client.post(self.tasks_url()).json(draft).send().await?;
        Ok(checked(response).await?.json::<Task>().await?)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, ApiError> {
        let response = self
            .client
            .put(self.task_url(task.id))
            .json(task)
            .send()
            .await?;
        Ok(checked(response).await?.json::<Task>().await?)
    }

    async fn delete_task(&self, task_id: TaskId) -> Result<(), ApiError> {
        let response = self.client.delete(self.task_url(task_id)).send().await?;
        // The backend answers with a plain-text confirmation; only the status matters.
        checked(response).await?;
        Ok(())
    }
}
