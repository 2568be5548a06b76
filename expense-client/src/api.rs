use std::time::Duration;

use reqwest::Method;
use reqwest::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::ClientError;
use crate::models::DeleteResponse;
use crate::models::Expense;
use crate::models::NewExpense;
use crate::models::RegisterResponse;
use crate::models::TokenResponse;
use crate::store::StoredTokens;
use crate::store::TokenStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed client for the expense service.
///
/// Tokens live in the [`TokenStore`] handed to [`ApiClient::new`]. Expense
/// calls attach the stored access token; when the service rejects it with a
/// 401, the client refreshes once and replays the request. A failed refresh
/// propagates as-is so the caller knows a fresh login is needed.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    store: TokenStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: TokenStore) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
            store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Whether a token pair is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.store.tokens().is_some()
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<RegisterResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/register"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Log in and persist the returned pair.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;
        let tokens: TokenResponse = Self::parse_response(response).await?;
        self.save_pair(&tokens)?;
        Ok(tokens)
    }

    /// Exchange the stored refresh token for a fresh access token.
    pub async fn refresh(&mut self) -> Result<TokenResponse, ClientError> {
        let refresh_token = self
            .store
            .refresh_token()
            .ok_or(ClientError::NotLoggedIn)?
            .to_string();

        let response = self
            .http
            .post(self.url("/refresh"))
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        let tokens: TokenResponse = Self::parse_response(response).await?;
        self.save_pair(&tokens)?;
        Ok(tokens)
    }

    /// Forget the stored pair. The server keeps its session row; the next
    /// login within the access window hands the same pair back.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.store.clear()
    }

    pub async fn list_expenses(&mut self) -> Result<Vec<Expense>, ClientError> {
        self.authenticated_request::<(), _>(Method::GET, "/expenses/", None)
            .await
    }

    pub async fn add_expense(&mut self, expense: &NewExpense) -> Result<Expense, ClientError> {
        self.authenticated_request(Method::POST, "/expenses/", Some(expense))
            .await
    }

    pub async fn update_expense(
        &mut self,
        expense_id: i64,
        expense: &NewExpense,
    ) -> Result<Expense, ClientError> {
        let path = format!("/expenses/{}", expense_id);
        self.authenticated_request(Method::PUT, &path, Some(expense))
            .await
    }

    pub async fn delete_expense(&mut self, expense_id: i64) -> Result<DeleteResponse, ClientError> {
        let path = format!("/expenses/{}", expense_id);
        self.authenticated_request::<(), _>(Method::DELETE, &path, None)
            .await
    }

    fn save_pair(&mut self, tokens: &TokenResponse) -> Result<(), ClientError> {
        self.store.save(StoredTokens {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
        })
    }

    /// Send an authenticated request, refreshing and replaying once on 401.
    async fn authenticated_request<B, T>(
        &mut self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let access = self
            .store
            .access_token()
            .ok_or(ClientError::NotLoggedIn)?
            .to_string();

        let response = self
            .send_with_token(method.clone(), path, body, &access)
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::parse_response(response).await;
        }

        tracing::debug!(path, "Access token rejected, attempting refresh");
        let tokens = self.refresh().await?;
        let response = self
            .send_with_token(method, path, body, &tokens.access_token)
            .await?;
        Self::parse_response(response).await
    }

    async fn send_with_token<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: &str,
    ) -> Result<Response, ClientError> {
        let mut request = self.http.request(method, self.url(path)).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Decode a success body, or surface the server's error message.
    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => body["error"]
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| body.to_string()),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
