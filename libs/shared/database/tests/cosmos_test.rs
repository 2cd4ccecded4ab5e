use assert_matches::assert_matches;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_database::{CosmosClient, DatabaseError, DocumentQuery, Filter};

const KEY: &str = "aG9saXN0aWMtZml0bmVzcy10ZXN0LWtleQ==";
const DOCS_PATH: &str = "/dbs/HolisticFitness/colls/AppointmentMaster/docs";

#[derive(Debug, Deserialize)]
struct Doc {
    id: String,
}

fn client_for(server: &MockServer) -> CosmosClient {
    let connection = format!("AccountEndpoint={}/;AccountKey={};", server.uri(), KEY);
    CosmosClient::from_connection_string(&connection, "HolisticFitness", 2).unwrap()
}

fn active_filter() -> Filter {
    Filter::eq("isActive", true)
}

#[tokio::test]
async fn test_query_request_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCS_PATH))
        .and(header("content-type", "application/query+json"))
        .and(header("x-ms-documentdb-isquery", "True"))
        .and(header("x-ms-documentdb-query-enablecrosspartition", "True"))
        .and(header("x-ms-max-item-count", "2"))
        .and(header("x-ms-version", "2018-12-31"))
        .and(header_exists("x-ms-date"))
        .and(header_exists("authorization"))
        .and(body_json(json!({
            "query": r#"SELECT * FROM c WHERE c["isActive"] = @p0"#,
            "parameters": [{ "name": "@p0", "value": true }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_rid": "x1==",
            "Documents": [{ "id": "a1", "_etag": "\"1\"" }],
            "_count": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let docs = DocumentQuery::<Doc>::new(&client, "AppointmentMaster", active_filter())
        .drain()
        .await
        .unwrap();

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "a1");
}

#[tokio::test]
async fn test_follows_continuation_tokens() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCS_PATH))
        .and(header("x-ms-continuation", "page-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Documents": [{ "id": "a5" }, { "id": "a6" }]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(DOCS_PATH))
        .and(header("x-ms-continuation", "page-2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ms-continuation", "page-3")
                .set_body_json(json!({ "Documents": [{ "id": "a3" }, { "id": "a4" }] })),
        )
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(DOCS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ms-continuation", "page-2")
                .set_body_json(json!({ "Documents": [{ "id": "a1" }, { "id": "a2" }] })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let docs = DocumentQuery::<Doc>::new(&client, "AppointmentMaster", active_filter())
        .drain()
        .await
        .unwrap();

    let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "a3", "a4", "a5", "a6"]);
}

#[tokio::test]
async fn test_http_error_is_a_query_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "Unauthorized",
            "message": "The input authorization token can't serve the request."
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = DocumentQuery::<Doc>::new(&client, "AppointmentMaster", active_filter())
        .drain()
        .await;

    assert_matches!(
        result,
        Err(DatabaseError::QueryFailed { status: 401, ref collection, .. }) if collection == "AppointmentMaster"
    );
}

#[tokio::test]
async fn test_unreachable_database() {
    let connection = format!("AccountEndpoint=http://127.0.0.1:9/;AccountKey={};", KEY);
    let client = CosmosClient::from_connection_string(&connection, "HolisticFitness", 2).unwrap();

    let result = DocumentQuery::<Doc>::new(&client, "AppointmentMaster", active_filter())
        .drain()
        .await;

    assert_matches!(result, Err(DatabaseError::Request(_)));
}
