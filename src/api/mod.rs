// HTTP client for the API being seeded

pub mod identity;

use reqwest::StatusCode;
use serde::Serialize;
use url::Url;

use crate::config;
use crate::domain::{Post, Query, UserId, UserSpec};
use crate::error::Result;

pub const SIGNUP_PATH: &str = "auth/signup";
pub const LOGIN_PATH: &str = "auth/login";
pub const ADD_POST_PATH: &str = "posts/add_post";
pub const ADD_QUERY_PATH: &str = "query/add_query";
pub const SEND_MESSAGE_PATH: &str = "messages/send";

#[derive(Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct AddPostRequest<'a> {
    title: &'a str,
    content: &'a str,
    user_id: &'a UserId,
}

#[derive(Serialize)]
struct AddQueryRequest<'a> {
    text: &'a str,
    department: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    sender_id: &'a UserId,
    receiver_id: &'a UserId,
    content: &'a str,
}

/// Status and raw body of an API call that reached the server
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Thin JSON client over the seeded API's endpoints.
///
/// Non-2xx answers are returned as `Ok` so callers can decide on fallbacks;
/// only transport failures are errors.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn signup(&self, user: &UserSpec) -> Result<ApiResponse> {
        self.post_json(
            SIGNUP_PATH,
            &SignupRequest {
                email: user.email,
                password: user.password,
                name: user.name,
            },
        )
        .await
    }

    pub async fn login(&self, user: &UserSpec) -> Result<ApiResponse> {
        self.post_json(
            LOGIN_PATH,
            &LoginRequest {
                email: user.email,
                password: user.password,
            },
        )
        .await
    }

    pub async fn add_post(&self, post: &Post, user_id: &UserId) -> Result<ApiResponse> {
        self.post_json(
            ADD_POST_PATH,
            &AddPostRequest {
                title: &post.title,
                content: &post.content,
                user_id,
            },
        )
        .await
    }

    pub async fn add_query(&self, query: &Query) -> Result<ApiResponse> {
        self.post_json(
            ADD_QUERY_PATH,
            &AddQueryRequest {
                text: &query.text,
                department: &query.department,
                email: &query.user_mail,
            },
        )
        .await
    }

    pub async fn send_message(
        &self,
        sender_id: &UserId,
        receiver_id: &UserId,
        content: &str,
    ) -> Result<ApiResponse> {
        self.post_json(
            SEND_MESSAGE_PATH,
            &SendMessageRequest {
                sender_id,
                receiver_id,
                content,
            },
        )
        .await
    }

    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<ApiResponse> {
        let url = config::join(&self.base_url, path)?;
        tracing::debug!("POST {}", url);

        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}
