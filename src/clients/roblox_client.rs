/// Roblox API 客户端
///
/// 封装用户名查询、头像缩略图查询和图片下载三个请求
use crate::config::Config;
use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 缩略图固定参数
const HEADSHOT_SIZE: &str = "420x420";
const HEADSHOT_FORMAT: &str = "Png";
const HEADSHOT_CIRCULAR: &str = "false";

#[derive(Debug, Deserialize)]
struct DataList<T> {
    #[serde(default)]
    data: Option<Vec<T>>,
}

#[derive(Debug, Default, Deserialize)]
struct UserEntry {
    id: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThumbnailEntry {
    image_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct UsernamesRequest<'a> {
    usernames: [&'a str; 1],
}

/// Roblox API 客户端
///
/// 内部的 `reqwest::Client` 可以廉价 clone，多个服务共用同一个连接池
#[derive(Clone)]
pub struct RobloxClient {
    http: reqwest::Client,
    users_api_url: String,
    thumbnails_api_url: String,
}

impl RobloxClient {
    /// 创建新的客户端，所有请求共用配置中的超时
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|source| ApiError::ClientInitFailed { source })?;

        Ok(Self {
            http,
            users_api_url: config.users_api_url.clone(),
            thumbnails_api_url: config.thumbnails_api_url.clone(),
        })
    }

    /// 查询用户名对应的用户 ID
    ///
    /// # 返回
    /// `data` 为空或首个结果没有 `id` 时返回 `Ok(None)`
    pub async fn lookup_user_id(&self, username: &str) -> Result<Option<u64>, ApiError> {
        let body = UsernamesRequest {
            usernames: [username],
        };
        debug!("查询用户 ID: {}", username);

        let response = self
            .http
            .post(&self.users_api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(&self.users_api_url, e))?;

        let result: DataList<UserEntry> = self.read_json(&self.users_api_url, response).await?;

        Ok(result
            .data
            .and_then(|data| data.into_iter().next())
            .and_then(|user| user.id))
    }

    /// 查询头像缩略图的下载地址
    pub async fn fetch_headshot_url(&self, user_id: u64) -> Result<String, ApiError> {
        let endpoint = &self.thumbnails_api_url;
        let user_ids = user_id.to_string();

        let response = self
            .http
            .get(endpoint)
            .query(&[
                ("userIds", user_ids.as_str()),
                ("size", HEADSHOT_SIZE),
                ("format", HEADSHOT_FORMAT),
                ("isCircular", HEADSHOT_CIRCULAR),
            ])
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        let result: DataList<ThumbnailEntry> = self.read_json(endpoint, response).await?;

        let first = result
            .data
            .and_then(|data| data.into_iter().next())
            .ok_or_else(|| ApiError::EmptyResponse {
                endpoint: endpoint.clone(),
            })?;

        first
            .image_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ApiError::missing_field(endpoint, "imageUrl"))
    }

    /// 下载原始图片字节
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(url, e))?;

        let response = check_status(url, response)?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::request_failed(url, e))?;

        debug!("下载完成: {} ({} 字节)", url, bytes.len());
        Ok(bytes.to_vec())
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = check_status(endpoint, response)?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        serde_json::from_slice(&bytes).map_err(|source| ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

fn check_status(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::BadStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RobloxClient {
        let config = Config {
            users_api_url: format!("{}/v1/usernames/users", server.uri()),
            thumbnails_api_url: format!("{}/v1/users/avatar-headshot", server.uri()),
            ..Config::default()
        };
        RobloxClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_posts_username_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/usernames/users"))
            .and(body_json(json!({ "usernames": ["janedoe"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "requestedUsername": "janedoe", "id": 123, "name": "janedoe" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let id = client_for(&server).lookup_user_id("janedoe").await.unwrap();
        assert_eq!(id, Some(123));
    }

    #[tokio::test]
    async fn test_lookup_empty_or_null_data_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
            .mount(&server)
            .await;

        let id = client_for(&server).lookup_user_id("ghost").await.unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn test_headshot_query_uses_fixed_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/users/avatar-headshot"))
            .and(query_param("userIds", "123"))
            .and(query_param("size", "420x420"))
            .and(query_param("format", "Png"))
            .and(query_param("isCircular", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "targetId": 123, "state": "Completed", "imageUrl": "https://cdn/x.png" }]
            })))
            .mount(&server)
            .await;

        let url = client_for(&server).fetch_headshot_url(123).await.unwrap();
        assert_eq!(url, "https://cdn/x.png");
    }

    #[tokio::test]
    async fn test_headshot_errors_are_distinguished() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("userIds", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("userIds", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "state": "Blocked", "imageUrl": null }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("userIds", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("userIds", "4"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.fetch_headshot_url(1).await,
            Err(ApiError::EmptyResponse { .. })
        ));
        assert!(matches!(
            client.fetch_headshot_url(2).await,
            Err(ApiError::MissingField { field: "imageUrl", .. })
        ));
        assert!(matches!(
            client.fetch_headshot_url(3).await,
            Err(ApiError::JsonParseFailed { .. })
        ));
        assert!(matches!(
            client.fetch_headshot_url(4).await,
            Err(ApiError::BadStatus { status: 503, .. })
        ));
    }
}
