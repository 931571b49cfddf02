//! Endpoint tests against a mock agent.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{
    body_json, body_string, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use consul_client::api::agent::{Check, ServiceRegistration};
use consul_client::api::health::HealthState;
use consul_client::api::kv::KvPair;
use consul_client::api::session::SessionRequest;
use consul_client::api::txn::KvOp;
use consul_client::{ClientConfig, Consul, ConsulError, QueryOptions};

async fn client(server: &MockServer) -> Consul {
    Consul::new(ClientConfig::new(&server.uri())).unwrap()
}

fn kv_entry(key: &str, value_b64: &str, modify_index: u64) -> serde_json::Value {
    json!({
        "CreateIndex": 100,
        "ModifyIndex": modify_index,
        "LockIndex": 0,
        "Key": key,
        "Flags": 0,
        "Value": value_b64
    })
}

#[tokio::test]
async fn kv_get_decodes_value_and_index() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/foo"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Consul-Index", "200")
                .set_body_json(json!([kv_entry("foo", "YmFy", 200)])),
        )
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let entry = consul.kv().get("foo", &QueryOptions::new()).await.unwrap();

    assert_eq!(entry.index, 200);
    let pair = entry.body.unwrap();
    assert_eq!(pair.value_str(), Some("bar"));
    assert_eq!(pair.modify_index, 200);
}

#[tokio::test]
async fn kv_get_missing_key_keeps_index() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/missing"))
        .respond_with(ResponseTemplate::new(404).insert_header("X-Consul-Index", "41"))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let entry = consul
        .kv()
        .get("missing", &QueryOptions::new())
        .await
        .unwrap();

    assert_eq!(entry.index, 41);
    assert!(entry.body.is_none());
}

#[tokio::test]
async fn kv_get_without_index_header_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([kv_entry("foo", "YmFy", 1)])))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let err = consul
        .kv()
        .get("foo", &QueryOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ConsulError::MissingIndex));
}

#[tokio::test]
async fn kv_put_sends_cas_and_flags() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/kv/foo"))
        .and(query_param("cas", "7"))
        .and(query_param("flags", "42"))
        .and(body_string("bar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let options = consul_client::kv::KvPutOptions {
        cas: Some(7),
        flags: Some(42),
        ..Default::default()
    };
    let committed = consul
        .kv()
        .put("foo", b"bar".to_vec(), &options)
        .await
        .unwrap();
    assert!(committed);
}

#[tokio::test]
async fn kv_put_cas_conflict_returns_false() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/kv/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(false)))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let committed = consul
        .kv()
        .put("foo", b"bar".to_vec(), &consul_client::kv::KvPutOptions::cas(9))
        .await
        .unwrap();
    assert!(!committed);
}

#[tokio::test]
async fn kv_rejects_leading_slash() {
    let server = MockServer::start().await;
    let consul = client(&server).await;

    let err = consul
        .kv()
        .get("/bad", &QueryOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ConsulError::InvalidInput(_)));
}

#[tokio::test]
async fn kv_keys_sends_separator() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/app/"))
        .and(query_param("keys", "1"))
        .and(query_param("separator", "/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Consul-Index", "12")
                .set_body_json(json!(["app/a/", "app/b"])),
        )
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let keys = consul
        .kv()
        .keys("app/", Some("/"), &QueryOptions::new())
        .await
        .unwrap();
    assert_eq!(keys.body, vec!["app/a/".to_string(), "app/b".to_string()]);
}

#[tokio::test]
async fn blocking_query_sends_index_and_wait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/health/service/redis"))
        .and(query_param("index", "4"))
        .and(query_param("wait", "10s"))
        .and(query_param("passing", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Consul-Index", "5")
                .set_body_json(json!([{
                    "Node": {"Node": "n1", "Address": "10.0.0.1"},
                    "Service": {"ID": "redis", "Service": "redis", "Port": 8000, "Address": ""},
                    "Checks": []
                }])),
        )
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let options = QueryOptions::new()
        .with_index(4)
        .with_wait(Duration::from_secs(10));
    let entries = consul
        .health()
        .service("redis", None, true, &options)
        .await
        .unwrap();

    assert_eq!(entries.index, 5);
    assert_eq!(entries.body.len(), 1);
    assert_eq!(entries.body[0].service.service, "redis");
}

#[tokio::test]
async fn stale_consistency_is_a_bare_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/catalog/nodes"))
        .and(query_param("stale", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Consul-Index", "9")
                .set_body_json(json!([{"Node": "n1", "Address": "10.0.0.1"}])),
        )
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let options = QueryOptions::new().with_consistency(consul_client::Consistency::Stale);
    let nodes = consul.catalog().nodes(&options).await.unwrap();
    assert_eq!(nodes.body[0].node, "n1");
}

#[tokio::test]
async fn token_override_sent_as_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/secret"))
        .and(header("X-Consul-Token", "per-request"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Consul-Index", "3")
                .set_body_json(json!([kv_entry("secret", "eA==", 3)])),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri()).with_token("default-token");
    let consul = Consul::new(config).unwrap();
    let options = QueryOptions::new().with_token("per-request");
    let entry = consul.kv().get("secret", &options).await.unwrap();
    assert!(entry.body.is_some());
}

#[tokio::test]
async fn error_statuses_map_to_variants() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/bad"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad index"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/acl/create"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/status/leader"))
        .respond_with(ResponseTemplate::new(500).set_body_string("leader unknown"))
        .mount(&server)
        .await;

    let consul = client(&server).await;

    let err = consul
        .kv()
        .get("bad", &QueryOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ConsulError::BadRequest(_)));

    let err = consul
        .acl()
        .create(&Default::default(), &QueryOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ConsulError::PermissionDenied(_)));

    let err = consul.status().leader().await.unwrap_err();
    assert!(matches!(err, ConsulError::Server { status: 500, .. }));
}

#[tokio::test]
async fn agent_service_registration_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/agent/service/register"))
        .and(body_json(json!({
            "Name": "web",
            "Port": 8080,
            "Check": {"HTTP": "http://localhost:8080/health", "Interval": "10s"}
        })))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/agent/service/deregister/web"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let mut registration = ServiceRegistration::new("web");
    registration.port = Some(8080);
    registration.check = Some(Check::http("http://localhost:8080/health", "10s"));

    consul
        .agent()
        .register_service(&registration, None)
        .await
        .unwrap();
    consul.agent().deregister_service("web").await.unwrap();
}

#[tokio::test]
async fn agent_registration_token_overrides_default() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/agent/service/register"))
        .and(header("X-Consul-Token", "svc-token"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/agent/check/register"))
        .and(header("X-Consul-Token", "svc-token"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri()).with_token("default-token");
    let consul = Consul::new(config).unwrap();

    consul
        .agent()
        .register_service(&ServiceRegistration::new("web"), Some("svc-token"))
        .await
        .unwrap();
    consul
        .agent()
        .register_check(
            &consul_client::api::agent::CheckRegistration::new("db", Check::ttl("30s")),
            Some("svc-token"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn agent_check_ttl_update_sends_note() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/agent/check/pass/db"))
        .and(query_param("note", "all good"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    consul
        .agent()
        .check_pass("db", Some("all good"))
        .await
        .unwrap();
}

#[tokio::test]
async fn session_create_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/session/create"))
        .and(body_json(json!({"Name": "lock", "TTL": "30s"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ID": "adf4238a-882b-9ddc-4a9d-5b6758e4159e"
        })))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let request = SessionRequest {
        name: Some("lock".to_string()),
        ttl: Some(Duration::from_secs(30)),
        ..Default::default()
    };
    let id = consul
        .session()
        .create(&request, &QueryOptions::new())
        .await
        .unwrap();
    assert_eq!(id, "adf4238a-882b-9ddc-4a9d-5b6758e4159e");
}

#[tokio::test]
async fn session_ttl_out_of_range_rejected_client_side() {
    let server = MockServer::start().await;
    let consul = client(&server).await;

    let request = SessionRequest {
        ttl: Some(Duration::from_secs(5)),
        ..Default::default()
    };
    let err = consul
        .session()
        .create(&request, &QueryOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ConsulError::InvalidInput(_)));
}

#[tokio::test]
async fn session_renew_gone_session_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/session/renew/dead"))
        .respond_with(ResponseTemplate::new(404).set_body_string("session expired"))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let err = consul
        .session()
        .renew("dead", &QueryOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ConsulError::NotFound(_)));
}

#[tokio::test]
async fn event_fire_sends_raw_payload() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/event/fire/deploy"))
        .and(body_string("build-77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ID": "b54fe110-7af5-cafc-d1fb-afc8ba432b1c",
            "Name": "deploy",
            "Payload": "YnVpbGQtNzc=",
            "Version": 1,
            "LTime": 0
        })))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let event = consul
        .event()
        .fire(
            "deploy",
            Some(b"build-77".to_vec()),
            &Default::default(),
            &QueryOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(event.payload_str(), Some("build-77"));
}

#[tokio::test]
async fn event_fire_drops_blocking_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/event/fire/deploy"))
        .and(query_param("dc", "dc9"))
        .and(query_param_is_missing("index"))
        .and(query_param_is_missing("wait"))
        .and(query_param_is_missing("consistent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ID": "b54fe110-7af5-cafc-d1fb-afc8ba432b1c",
            "Name": "deploy",
            "Payload": null
        })))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let options = QueryOptions::new()
        .with_datacenter("dc9")
        .with_index(7)
        .with_wait(Duration::from_secs(10))
        .with_consistency(consul_client::Consistency::Consistent);
    let event = consul
        .event()
        .fire("deploy", None, &Default::default(), &options)
        .await
        .unwrap();
    assert_eq!(event.name, "deploy");
}

#[tokio::test]
async fn connect_failures_back_off_for_the_configured_attempts() {
    // Bind then drop to get a local port with nothing listening.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let config = ClientConfig::new(&format!("http://{addr}")).with_retries(2, 50);
    let consul = Consul::new(config).unwrap();

    let started = std::time::Instant::now();
    let err = consul.status().leader().await.unwrap_err();
    assert!(matches!(err, ConsulError::Http(_)));
    // Two retries back off 50ms then 100ms before the error surfaces.
    assert!(
        started.elapsed() >= Duration::from_millis(150),
        "gave up after {:?}",
        started.elapsed()
    );

    let config = ClientConfig::new(&format!("http://{addr}")).with_retries(0, 50);
    let consul = Consul::new(config).unwrap();
    let started = std::time::Instant::now();
    consul.status().leader().await.unwrap_err();
    assert!(
        started.elapsed() < Duration::from_millis(50),
        "retried despite retries=0"
    );
}

#[tokio::test]
async fn txn_sends_base64_operations() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/txn"))
        .and(body_json(json!([
            {"KV": {"Verb": "cas", "Key": "k", "Value": "dg==", "Index": 3}}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Results": [{"KV": {
                "Key": "k", "Value": null, "Flags": 0,
                "CreateIndex": 1, "ModifyIndex": 4, "LockIndex": 0
            }}],
            "Errors": null
        })))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let response = consul
        .txn()
        .put(
            vec![KvOp::cas("k", b"v".to_vec(), 3).into()],
            &QueryOptions::new(),
        )
        .await
        .unwrap();
    assert_eq!(response.results.len(), 1);
    assert!(response.errors.is_empty());
}

#[tokio::test]
async fn txn_rollback_surfaces_errors() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/txn"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "Results": null,
            "Errors": [{"OpIndex": 0, "What": "index mismatch"}]
        })))
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let response = consul
        .txn()
        .put(
            vec![KvOp::cas("k", b"v".to_vec(), 3).into()],
            &QueryOptions::new(),
        )
        .await
        .unwrap();
    assert!(response.results.is_empty());
    assert_eq!(response.errors[0].what, "index mismatch");
}

#[tokio::test]
async fn health_state_any_lists_all_checks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/health/state/any"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Consul-Index", "7")
                .set_body_json(json!([{
                    "Node": "n1",
                    "CheckID": "serfHealth",
                    "Name": "Serf Health Status",
                    "Status": "passing"
                }])),
        )
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let checks = consul
        .health()
        .state(HealthState::Any, &QueryOptions::new())
        .await
        .unwrap();
    assert_eq!(checks.body[0].check_id, "serfHealth");
}

#[tokio::test]
async fn status_endpoints_decode_plain_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/status/leader"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("10.1.10.12:8300")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/status/peers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!(["10.1.10.12:8300", "10.1.10.13:8300"])),
        )
        .mount(&server)
        .await;

    let consul = client(&server).await;
    assert_eq!(consul.status().leader().await.unwrap(), "10.1.10.12:8300");
    assert_eq!(consul.status().peers().await.unwrap().len(), 2);
}

#[tokio::test]
async fn datacenter_default_applies_to_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/session/list"))
        .and(query_param("dc", "dc2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Consul-Index", "2")
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri()).with_datacenter("dc2");
    let consul = Consul::new(config).unwrap();
    let sessions = consul.session().list(&QueryOptions::new()).await.unwrap();
    assert!(sessions.body.is_empty());
}

#[tokio::test]
async fn catalog_services_null_body_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/catalog/service/ghost"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Consul-Index", "6")
                .set_body_json(json!(null)),
        )
        .mount(&server)
        .await;

    let consul = client(&server).await;
    let services = consul
        .catalog()
        .service("ghost", None, &QueryOptions::new())
        .await
        .unwrap();
    assert!(services.body.is_empty());
}

#[tokio::test]
async fn blocking_facade_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/foo"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Consul-Index", "20")
                .set_body_json(json!([kv_entry("foo", "YmFy", 20)])),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let entry: consul_client::Indexed<Option<KvPair>> = tokio::task::spawn_blocking(move || {
        let consul = consul_client::blocking::Consul::new(ClientConfig::new(&uri)).unwrap();
        consul.kv().get("foo", &QueryOptions::new())
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(entry.index, 20);
    assert_eq!(entry.body.unwrap().value_str(), Some("bar"));
}
