//! Integration tests driving the full router against a mocked scheduler.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gateway::config::{GatewayConfig, StaticToken};
use gateway::routes::build_router;
use gateway::state::AppState;

const DEV_TOKEN: &str = "dev-token";

/// Router wired to one mock server playing both the scheduler and the
/// mesos master.
fn router_for(upstream: &MockServer) -> Router {
    let mut config = GatewayConfig::default();
    config.upstream.marathon_addresses = vec![upstream.uri()];
    config.cluster.master_addresses = vec![upstream.uri()];
    config.cluster.agent_timeout_secs = 1;
    config.auth.static_tokens = vec![StaticToken {
        token: DEV_TOKEN.to_string(),
        user: "dev@corp".to_string(),
        namespace: "dev".to_string(),
    }];
    config.validate().unwrap();
    build_router(AppState::new(config).unwrap())
}

fn authed(request: axum::http::request::Builder) -> axum::http::request::Builder {
    request.header(header::AUTHORIZATION, format!("JWT {DEV_TOKEN}"))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn deployment_fixture() -> Value {
    json!([
        {
            "id": "97c136bf-5a28-4821-9d94-480d9fbb01c8",
            "affectedApps": ["/foo"],
            "currentActions": [{
                "action": "ScaleApplication",
                "app": "/foo",
                "apps": null,
                "pod": null,
                "type": null,
                "readinessCheckResults": [{
                    "taskId": "foo.c9de6033",
                    "lastResponse": {"body": "{}", "contentType": "application/json", "status": 500},
                    "name": "myReadyCheck",
                    "ready": false
                }]
            }],
            "currentStep": 2,
            "steps": [
                {"actions": [{"action": "StartApplication", "app": "/foo", "apps": null, "pod": null, "type": null, "readinessCheckResults": null}]},
                {"actions": [{"action": "ScaleApplication", "app": "/foo", "apps": null, "pod": null, "type": null, "readinessCheckResults": null}]}
            ],
            "totalSteps": 2,
            "version": "2015-09-30T09:09:17.614Z"
        },
        {
            "id": "2d8e3b9f-1111-4a61-0000-21b680597e6c",
            "affectedApps": ["/infra/logstash"],
            "currentStep": 1,
            "steps": [],
            "totalSteps": 1,
            "version": "2015-09-30T09:10:00.000Z"
        }
    ])
}

#[tokio::test]
async fn deployments_listing_is_narrowed_to_the_namespace() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deployment_fixture()))
        .mount(&upstream)
        .await;

    let response = router_for(&upstream)
        .oneshot(
            authed(Request::builder().uri("/v2/deployments"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let visible = body.as_array().unwrap();
    assert_eq!(visible.len(), 1);
    // The surviving deployment is byte-for-byte the upstream one.
    assert_eq!(visible[0], deployment_fixture()[0]);
}

#[tokio::test]
async fn deleting_a_deployment_bypasses_the_response_filters() {
    let upstream = MockServer::start().await;
    // A body the visibility filter would have dropped for namespace "dev":
    // its surviving verbatim proves no filter ran.
    let fixture = json!([{"id": "d-1", "affectedApps": ["/infra/logstash"]}]);
    let upstream_bytes = serde_json::to_vec(&fixture).unwrap();
    Mock::given(method("DELETE"))
        .and(path("/v2/deployments/d-1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(upstream_bytes.clone(), "application/json"))
        .expect(1)
        .mount(&upstream)
        .await;

    let response = router_for(&upstream)
        .oneshot(
            authed(
                Request::builder()
                    .method("DELETE")
                    .uri("/v2/deployments/d-1"),
            )
            .body(Body::empty())
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), upstream_bytes.as_slice());
}

#[tokio::test]
async fn app_writes_carry_the_ownership_label_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/apps/foo"))
        .and(body_string_contains("hollowman.appname=/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deploymentId": "d-9"})))
        .expect(1)
        .mount(&upstream)
        .await;

    let body = json!({
        "id": "/foo",
        "container": {"docker": {
            "image": "alpine:3.4",
            "parameters": [{"key": "label", "value": "hollowman.appname=/my/other/app/name"}]
        }}
    });

    let response = router_for(&upstream)
        .oneshot(
            authed(
                Request::builder()
                    .method("PUT")
                    .uri("/v2/apps/foo")
                    .header(header::CONTENT_TYPE, "application/json"),
            )
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn relayed_responses_never_gain_a_content_encoding() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"apps": []})))
        .mount(&upstream)
        .await;

    let response = router_for(&upstream)
        .oneshot(
            authed(Request::builder().uri("/v2/apps"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    assert!(response.headers().get(header::TRANSFER_ENCODING).is_none());
}

#[tokio::test]
async fn missing_token_is_rejected_before_any_upstream_call() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&upstream)
        .await;

    let router = router_for(&upstream);

    let bare = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v2/deployments")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(bare.status(), StatusCode::UNAUTHORIZED);

    let unknown = router
        .oneshot(
            Request::builder()
                .uri("/v2/deployments")
                .header(header::AUTHORIZATION, "JWT nobody")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn healthcheck_passes_the_upstream_status_through() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;

    let response = router_for(&upstream)
        .oneshot(
            Request::builder()
                .uri("/healthcheck")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn index_redirects_to_the_apps_listing() {
    let upstream = MockServer::start().await;
    let response = router_for(&upstream)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/v2/apps"
    );
}

#[tokio::test]
async fn agents_listing_is_scoped_and_isolates_agent_failures() {
    let upstream = MockServer::start().await;
    // Master is its own leader.
    Mock::given(method("GET"))
        .and(path("/redirect"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&upstream)
        .await;
    // One owned agent whose introspection endpoint refuses connections.
    Mock::given(method("GET"))
        .and(path("/slaves"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"slaves": [
            {
                "id": "S0",
                "hostname": "127.0.0.1",
                "port": 1,
                "active": true,
                "version": "1.4.1",
                "attributes": {"owner": "dev"},
                "resources": {"cpus": 4.0, "mem": 1024.0, "disk": 0.0},
                "used_resources": {"cpus": 1.0, "mem": 256.0, "disk": 0.0}
            },
            {
                "id": "S1",
                "hostname": "127.0.0.1",
                "port": 1,
                "attributes": {"owner": "infra"},
                "resources": {"cpus": 4.0, "mem": 1024.0, "disk": 0.0},
                "used_resources": {"cpus": 1.0, "mem": 256.0, "disk": 0.0}
            }
        ]})))
        .mount(&upstream)
        .await;

    let response = router_for(&upstream)
        .oneshot(
            authed(Request::builder().uri("/agents"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let agents = body["agents"].as_array().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0]["id"], "S0");
    assert_eq!(agents[0]["errors"]["applications"], "unavailable");
    assert_eq!(agents[0]["stats"]["cpu_pct"], "25.00");
}
