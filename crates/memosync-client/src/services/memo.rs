// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memo endpoints.

use memosync_core::{AccessToken, CategoryId, Memo, MemoDetail, MemoError, MemoId, MemoPayload};
use reqwest::Method;

use crate::transport::{HttpTransport, RequestOptions};

/// `GET /memo?category_id={id}`
pub async fn list_memos(
    transport: &HttpTransport,
    token: &AccessToken,
    category_id: CategoryId,
) -> Result<Vec<Memo>, MemoError> {
    transport
        .request(
            &format!("/memo?category_id={category_id}"),
            RequestOptions::new(Method::GET).authorized(token),
        )
        .await
}

/// `GET /memo/{id}`
pub async fn get_memo(
    transport: &HttpTransport,
    token: &AccessToken,
    memo_id: MemoId,
) -> Result<MemoDetail, MemoError> {
    transport
        .request(
            &format!("/memo/{memo_id}"),
            RequestOptions::new(Method::GET).authorized(token),
        )
        .await
}

/// `POST /memo`
pub async fn create_memo(
    transport: &HttpTransport,
    token: &AccessToken,
    payload: &MemoPayload,
) -> Result<MemoDetail, MemoError> {
    let options = RequestOptions::new(Method::POST)
        .authorized(token)
        .with_json(payload)?;
    transport.request("/memo", options).await
}

/// `PUT /memo/{id}`
pub async fn update_memo(
    transport: &HttpTransport,
    token: &AccessToken,
    memo_id: MemoId,
    payload: &MemoPayload,
) -> Result<MemoDetail, MemoError> {
    let options = RequestOptions::new(Method::PUT)
        .authorized(token)
        .with_json(payload)?;
    transport.request(&format!("/memo/{memo_id}"), options).await
}

/// `DELETE /memo/{id}`
pub async fn delete_memo(
    transport: &HttpTransport,
    token: &AccessToken,
    memo_id: MemoId,
) -> Result<(), MemoError> {
    transport
        .request(
            &format!("/memo/{memo_id}"),
            RequestOptions::new(Method::DELETE).authorized(token),
        )
        .await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn token() -> AccessToken {
        AccessToken::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap()
    }

    fn transport(server: &MockServer) -> HttpTransport {
        HttpTransport::with_base_url(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn detail_json(id: i64, title: &str) -> serde_json::Value {
        serde_json::json!({"id": id, "title": title, "category_id": 3, "content": "body"})
    }

    #[tokio::test]
    async fn list_memos_passes_category_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/memo"))
            .and(query_param("category_id", "3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"id": 10, "title": "a"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let memos = list_memos(&transport(&server), &token(), CategoryId(3)).await.unwrap();
        assert_eq!(memos, vec![Memo { id: MemoId(10), title: "a".into() }]);
    }

    #[tokio::test]
    async fn get_memo_decodes_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/memo/10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(10, "a")))
            .mount(&server)
            .await;

        let detail = get_memo(&transport(&server), &token(), MemoId(10)).await.unwrap();
        assert_eq!(detail.category_id, CategoryId(3));
        assert_eq!(detail.content, "body");
    }

    #[tokio::test]
    async fn create_memo_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/memo"))
            .and(body_json(serde_json::json!({"category_id": 3, "title": "new", "content": ""})))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(11, "new")))
            .expect(1)
            .mount(&server)
            .await;

        let payload = MemoPayload {
            category_id: CategoryId(3),
            title: "new".into(),
            content: String::new(),
        };
        let created = create_memo(&transport(&server), &token(), &payload).await.unwrap();
        assert_eq!(created.id, MemoId(11));
    }

    #[tokio::test]
    async fn update_memo_resends_category_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/memo/11"))
            .and(body_json(serde_json::json!({"category_id": 3, "title": "Updated", "content": "x"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(11, "Updated")))
            .expect(1)
            .mount(&server)
            .await;

        let payload = MemoPayload {
            category_id: CategoryId(3),
            title: "Updated".into(),
            content: "x".into(),
        };
        let updated = update_memo(&transport(&server), &token(), MemoId(11), &payload)
            .await
            .unwrap();
        assert_eq!(updated.title, "Updated");
    }

    #[tokio::test]
    async fn delete_memo_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/memo/11"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        delete_memo(&transport(&server), &token(), MemoId(11)).await.unwrap();
    }

    #[tokio::test]
    async fn delete_missing_memo_is_not_found_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = delete_memo(&transport(&server), &token(), MemoId(99)).await.unwrap_err();
        assert_eq!(err.to_string(), "Not Found.");
    }
}
