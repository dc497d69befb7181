//! 身份解析服务 - 业务能力层
//!
//! 只负责"用户名 → 用户 ID"，失败一律当作查无此人

use crate::clients::RobloxClient;
use tracing::error;

/// 身份解析服务
///
/// 职责：
/// - 查询单个用户名对应的 Roblox 用户 ID
/// - 网络错误、解析错误、超时都只记录日志，返回 `None`
/// - 不重试
pub struct IdentityResolver {
    client: RobloxClient,
}

impl IdentityResolver {
    pub fn new(client: RobloxClient) -> Self {
        Self { client }
    }

    /// 解析用户名
    ///
    /// # 返回
    /// 找到时返回用户 ID；空用户名、查无此人或请求失败时返回 `None`
    pub async fn resolve(&self, username: &str) -> Option<u64> {
        if username.is_empty() {
            return None;
        }

        match self.client.lookup_user_id(username).await {
            Ok(id) => id,
            Err(e) => {
                error!("  ❌ 查询用户 ID 失败: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver_for(server: &MockServer, http_timeout_secs: u64) -> IdentityResolver {
        let config = Config {
            users_api_url: format!("{}/v1/usernames/users", server.uri()),
            http_timeout_secs,
            ..Config::default()
        };
        IdentityResolver::new(RobloxClient::new(&config).unwrap())
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "id": 42 }] })),
            )
            .mount(&server)
            .await;

        assert_eq!(resolver_for(&server, 30).resolve("builderman").await, Some(42));
    }

    #[tokio::test]
    async fn test_empty_username_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert_eq!(resolver_for(&server, 30).resolve("").await, None);
    }

    #[tokio::test]
    async fn test_failures_collapse_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert_eq!(resolver_for(&server, 30).resolve("janedoe").await, None);
    }

    #[tokio::test]
    async fn test_malformed_body_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert_eq!(resolver_for(&server, 30).resolve("janedoe").await, None);
    }

    #[tokio::test]
    async fn test_timeout_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": [{ "id": 1 }] }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        assert_eq!(resolver_for(&server, 1).resolve("slowpoke").await, None);
    }
}
