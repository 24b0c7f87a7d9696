#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::error::ClientError;
    use crate::traits::{CatalogApi, SessionProvider};
    use cinema_models::{ActivityKind, Collection, FilterState, Flag};
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn test_client(server: &Server, token: Option<&str>) -> CatalogClient {
        CatalogClient::new(&server.url(), "authjs.session-token", token, None).unwrap()
    }

    fn titles_response() -> serde_json::Value {
        json!({
            "titles": [
                {
                    "id": "t1",
                    "title": "Heat",
                    "synopsis": "Cops and robbers",
                    "released": 1995,
                    "genre": "Drama",
                    "favorited": false,
                    "watchLater": true,
                    "image": null
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_list_titles_sends_filters_and_cookie() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/titles")
            .match_query(Matcher::Exact("page=2&search=heat&minYear=1990".to_string()))
            .match_header("cookie", "authjs.session-token=tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(titles_response().to_string())
            .create_async()
            .await;

        let client = test_client(&server, Some("tok"));
        let mut filters = FilterState::new().with_page(2);
        filters.set_search("heat");
        filters.set_min_year(Some(1990));

        let titles = client.list(Collection::Titles, &filters).await.unwrap();
        mock.assert_async().await;

        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].description, "Cops and robbers");
        assert_eq!(titles[0].year, Some(1995));
        assert!(titles[0].watch_later);
        assert_eq!(titles[0].image, "/images/t1.webp");
    }

    #[tokio::test]
    async fn test_list_favorites_page_only() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/favorites")
            .match_query(Matcher::Exact("page=1".to_string()))
            .with_status(200)
            .with_body(json!({"favorites": [{"id": "f1", "title": "Up"}]}).to_string())
            .create_async()
            .await;

        let client = test_client(&server, Some("tok"));
        let mut filters = FilterState::new();
        filters.set_search("ignored");

        let titles = client.list(Collection::Favorites, &filters).await.unwrap();
        mock.assert_async().await;
        assert!(titles[0].favorited);
        assert_eq!(titles[0].image, "/placeholder.jpg");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/titles")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let client = test_client(&server, None);
        let err = client.list(Collection::Titles, &FilterState::new()).await.unwrap_err();
        assert!(err.is_unauthorized());
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "unauthorized");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/watch-later")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = test_client(&server, Some("tok"));
        let err = client.list(Collection::WatchLater, &FilterState::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_set_flag_methods() {
        let mut server = Server::new_async().await;
        let add = server
            .mock("POST", "/api/favorites/t1")
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;
        let remove = server
            .mock("DELETE", "/api/watch-later/t1")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = test_client(&server, Some("tok"));
        client.set_flag(Flag::Favorite, "t1", true).await.unwrap();
        client.set_flag(Flag::WatchLater, "t1", false).await.unwrap();

        add.assert_async().await;
        remove.assert_async().await;
    }

    #[tokio::test]
    async fn test_activities() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/activities")
            .with_status(200)
            .with_body(
                json!({
                    "activities": [
                        {"id": "a1", "timestamp": "2024-01-15T10:00:00Z", "activity": "WATCH_LATER", "title": "Heat"}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(&server, Some("tok"));
        let activities = client.activities().await.unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].kind, ActivityKind::WatchLater);
    }

    #[tokio::test]
    async fn test_session_present_and_absent() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/auth/session")
            .match_header("cookie", "authjs.session-token=good")
            .with_status(200)
            .with_body(json!({"user": {"email": "ada@example.com"}}).to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/api/auth/session")
            .match_header("cookie", "authjs.session-token=stale")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let session = test_client(&server, Some("good")).session().await.unwrap();
        assert_eq!(session.unwrap().email.as_deref(), Some("ada@example.com"));

        let session = test_client(&server, Some("stale")).session().await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_session_without_token_skips_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/auth/session")
            .expect(0)
            .create_async()
            .await;

        let session = test_client(&server, None).session().await.unwrap();
        assert!(session.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_base_url() {
        let result = CatalogClient::new("ftp://nope", "c", None, None);
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn test_image_url() {
        let client = CatalogClient::new("https://cinema.example.com/", "c", None, None).unwrap();
        assert_eq!(client.image_url("/images/t1.webp"), "https://cinema.example.com/images/t1.webp");
        assert_eq!(client.image_url("https://cdn.example.com/x.jpg"), "https://cdn.example.com/x.jpg");
    }
}
