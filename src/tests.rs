//! Integration tests for the community service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::db::{init_database, Repository};
use crate::models::{ForumTopic, TopicCategory, TopicStatus};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    repo: Arc<Repository>,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        let state = AppState { repo: repo.clone() };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            repo,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    /// Seed a forum with a pinned rules topic and three regular topics.
    async fn seed_forum(&self) {
        let now = Utc::now();
        let topics = [
            seed_topic("rules", "Regras da comunidade", true, TopicStatus::Open, None, &[], now - Duration::days(40), 0),
            seed_topic("wifi", "Wifi lento", false, TopicStatus::Open, Some(("internet", "Internet")), &["rede", "roteador"], now - Duration::days(3), 4),
            seed_topic("tela", "Tela quebrada", false, TopicStatus::Resolved, Some(("celular", "Celular")), &["tela"], now - Duration::days(2), 9),
            seed_topic("pneu", "Pneu furado", false, TopicStatus::Open, Some(("carro", "Carro")), &["rede"], now - Duration::days(1), 1),
        ];
        for topic in &topics {
            self.repo.insert_topic(topic).await.unwrap();
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_topic(
    id: &str,
    title: &str,
    pinned: bool,
    status: TopicStatus,
    category: Option<(&str, &str)>,
    tags: &[&str],
    created_at: chrono::DateTime<Utc>,
    answers: u32,
) -> ForumTopic {
    ForumTopic {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("Discussão sobre {}", title.to_lowercase()),
        author_name: None,
        category: category.map(|(id, name)| TopicCategory {
            id: id.to_string(),
            name: name.to_string(),
        }),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        status,
        is_pinned: pinned,
        created_at,
        last_activity_at: None,
        answer_count: answers,
        view_count: None,
    }
}

fn topic_ids(body: &Value) -> Vec<String> {
    body["data"]["topics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_categories_listed() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/categories").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let categories = body["data"].as_array().unwrap();
    assert_eq!(categories.len(), 8);
    assert_eq!(categories[0], json!({ "id": "aplicativos", "name": "Aplicativos" }));
}

#[tokio::test]
async fn test_empty_forum_invites_first_post() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/topics").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["total"], 0);
    assert_eq!(body["data"]["countLabel"], "0 tópicos encontrados");
    assert_eq!(body["data"]["hasActiveFilters"], false);
    assert_eq!(
        body["data"]["emptyState"]["message"],
        "Seja o primeiro a iniciar uma discussão!"
    );
    assert_eq!(body["data"]["emptyState"]["action"]["kind"], "createTopic");
    assert_eq!(
        body["data"]["emptyState"]["action"]["href"],
        "/comunidade/novo-topico"
    );
}

#[tokio::test]
async fn test_listing_pins_first_and_sorts() {
    let fixture = TestFixture::new().await;
    fixture.seed_forum().await;

    let (_, recent) = fixture.get_json("/api/topics").await;
    assert_eq!(topic_ids(&recent), ["rules", "pneu", "tela", "wifi"]);
    assert_eq!(recent["data"]["tags"], json!(["rede", "roteador", "tela"]));
    assert_eq!(recent["data"]["categories"].as_array().unwrap().len(), 8);
    assert_eq!(recent["data"]["homeHref"], "/comunidade");
    assert!(recent["data"]["emptyState"].is_null());
    assert!(recent["data"]["searchLabel"].is_null());

    let (_, popular) = fixture.get_json("/api/topics?sort=popular").await;
    assert_eq!(topic_ids(&popular), ["rules", "tela", "wifi", "pneu"]);

    let (_, oldest) = fixture.get_json("/api/topics?sort=oldest").await;
    assert_eq!(topic_ids(&oldest), ["rules", "wifi", "tela", "pneu"]);
}

#[tokio::test]
async fn test_upstream_filters() {
    let fixture = TestFixture::new().await;
    fixture.seed_forum().await;

    let (_, resolved) = fixture.get_json("/api/topics?status=resolved").await;
    assert_eq!(topic_ids(&resolved), ["tela"]);
    assert_eq!(resolved["data"]["hasActiveFilters"], true);
    assert_eq!(resolved["data"]["countLabel"], "1 tópico encontrado");

    let (_, carro) = fixture.get_json("/api/topics?categoryId=carro").await;
    assert_eq!(topic_ids(&carro), ["pneu"]);

    let (_, all) = fixture.get_json("/api/topics?categoryId=all").await;
    assert_eq!(all["data"]["total"], 4);
    assert_eq!(all["data"]["hasActiveFilters"], false);

    let (_, rede) = fixture.get_json("/api/topics?tag=rede").await;
    assert_eq!(topic_ids(&rede), ["pneu", "wifi"]);
    assert_eq!(rede["data"]["tags"], json!(["rede", "roteador"]));
}

#[tokio::test]
async fn test_search_and_clear_filters_state() {
    let fixture = TestFixture::new().await;
    fixture.seed_forum().await;

    let (_, found) = fixture.get_json("/api/topics?q=WIFI").await;
    assert_eq!(topic_ids(&found), ["wifi"]);
    assert_eq!(found["data"]["searchLabel"], "1 resultado para \"WIFI\"");
    // Tag options come from the whole fetched set, not just search hits
    assert_eq!(found["data"]["tags"], json!(["rede", "roteador", "tela"]));

    let (_, missing) = fixture.get_json("/api/topics?q=wi-fi").await;
    assert_eq!(missing["data"]["total"], 0);
    assert_eq!(
        missing["data"]["emptyState"]["message"],
        "Tente ajustar os filtros ou limpar a busca"
    );
    assert_eq!(missing["data"]["emptyState"]["action"]["kind"], "clearFilters");
}

#[tokio::test]
async fn test_invalid_status_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/topics?status=archived"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_topic_create_and_get() {
    let fixture = TestFixture::new().await;

    let create_resp = fixture
        .client
        .post(fixture.url("/api/topics"))
        .json(&json!({
            "title": "Celular não carrega",
            "description": "O cabo parece estar bom",
            "categoryId": "celular",
            "tags": ["bateria"]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(create_resp.status(), 200);
    let create_body: Value = create_resp.json().await.unwrap();
    assert_eq!(create_body["success"], true);
    let topic_id = create_body["data"]["id"].as_str().unwrap();
    assert_eq!(create_body["data"]["status"], "open");

    let (status, get_body) = fixture
        .get_json(&format!("/api/topics/{}", topic_id))
        .await;
    assert_eq!(status, 200);
    assert_eq!(get_body["data"]["title"], "Celular não carrega");
    assert_eq!(get_body["data"]["category"]["name"], "Celular");

    let (_, listing) = fixture.get_json("/api/topics").await;
    let card = &listing["data"]["topics"][0];
    assert_eq!(card["author"], "Anônimo");
    assert_eq!(card["activity"], "agora");
    assert_eq!(card["href"], format!("/comunidade/topico/{}", topic_id));
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/topics"))
        .json(&json!({ "title": "  ", "description": "algo" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let resp2 = fixture
        .client
        .post(fixture.url("/api/topics"))
        .json(&json!({ "title": "Algo", "description": "x", "categoryId": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp2.status(), 400);
}

#[tokio::test]
async fn test_not_found_errors() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/topics/non-existent-id").await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
