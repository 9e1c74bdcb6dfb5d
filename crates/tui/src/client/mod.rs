use api_types::{
    ApiResponse,
    balance::{Balance, BalanceList},
    error::ErrorBody,
    expense::{Expense, ExpenseList, ExpenseNew},
    settlement::{Settlement, SettlementList},
};
use reqwest::{Method, Url, header};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::error::{AppError, Result};

#[derive(Debug, Error)]
pub enum ClientError {
    /// No response at all (connection refused, DNS, timeout...).
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
    /// Non-2xx response; `message` is the server detail when present.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 2xx response whose body does not match the contract.
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

impl ClientError {
    /// Text shown to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::BaseUrl(format!("{base_url} cannot be a base")));
        }
        // Endpoints are joined relative to the API root, which needs a trailing slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder().build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Liveness probe against the API root; any 2xx counts.
    pub async fn ping(&self) -> std::result::Result<(), ClientError> {
        self.send::<()>(Method::GET, "", None).await.map(|_| ())
    }

    pub async fn expenses(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        self.call::<(), ApiResponse<ExpenseList>>(Method::GET, "expenses", None)
            .await
            .map(|res| res.data.expenses)
    }

    /// Posts a new expense. Any 2xx counts as stored; the echoed record is
    /// returned only when it matches the envelope.
    pub async fn expense_create(
        &self,
        payload: &ExpenseNew,
    ) -> std::result::Result<Option<Expense>, ClientError> {
        let res = self.send(Method::POST, "expenses", Some(payload)).await?;
        match res.json::<ApiResponse<Expense>>().await {
            Ok(body) => Ok(Some(body.data)),
            Err(err) => {
                tracing::debug!("created expense body not understood: {err}");
                Ok(None)
            }
        }
    }

    pub async fn expense_delete(&self, id: &str) -> std::result::Result<(), ClientError> {
        self.send::<()>(Method::DELETE, &format!("expenses/{id}"), None)
            .await
            .map(|_| ())
    }

    pub async fn balances(&self) -> std::result::Result<Vec<Balance>, ClientError> {
        self.call::<(), ApiResponse<BalanceList>>(Method::GET, "balances", None)
            .await
            .map(|res| res.data.balances)
    }

    pub async fn settlements(&self) -> std::result::Result<Vec<Settlement>, ClientError> {
        self.call::<(), ApiResponse<SettlementList>>(Method::GET, "settlements", None)
            .await
            .map(|res| res.data.settlements)
    }

    /// Sends a JSON request and decodes the JSON body of a successful response.
    pub async fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> std::result::Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.send(method, path, body).await?;
        res.json::<T>()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> std::result::Result<reqwest::Response, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let endpoint = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ClientError::Endpoint(format!("{path}: {err}")))?;

        let mut request = self
            .http
            .request(method.clone(), endpoint)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let res = match request.send().await {
            Ok(res) => res,
            Err(err) => {
                tracing::debug!(%method, path, "request failed: {err}");
                return Err(ClientError::Transport(err));
            }
        };

        if res.status().is_success() {
            return Ok(res);
        }

        let status = res.status().as_u16();
        let message = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message())
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        tracing::debug!(%method, path, status, "request rejected: {message}");

        Err(ClientError::Status { status, message })
    }
}
