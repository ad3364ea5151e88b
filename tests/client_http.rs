//! HTTP level tests against a local mock server through the reqwest transport.

use inspector_client::client::{probe_api_versions, ReqwestTransport};
use inspector_client::v1::ClientV1;
use inspector_client::{ApiVersion, ClientConfig, InspectorClient, InspectorError};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::time::Duration;

const VERSION: &str = "X-OpenStack-Ironic-Inspector-API-Version";
const MIN_VERSION: &str = "X-OpenStack-Ironic-Inspector-API-Minimum-Version";
const MAX_VERSION: &str = "X-OpenStack-Ironic-Inspector-API-Maximum-Version";

fn mock_root(server: &mut ServerGuard, min: &str, max: &str) -> mockito::Mock {
    server
        .mock("GET", "/")
        .with_status(200)
        .with_header(MIN_VERSION, min)
        .with_header(MAX_VERSION, max)
        .create()
}

fn config(server: &ServerGuard) -> ClientConfig {
    ClientConfig::default().with_url(server.url())
}

#[test]
fn test_negotiation_and_version_header() -> anyhow::Result<()> {
    let mut server = Server::new();
    let root = mock_root(&mut server, "1.0", "1.5");
    let status = server
        .mock("GET", "/v1/introspection/node1")
        .match_header(VERSION, "1.2")
        .with_status(200)
        .with_body(r#"{"uuid": "node1", "finished": true, "error": null}"#)
        .create();

    let client = ClientV1::new(config(&server).with_api_version("1.2"))?;
    assert_eq!(client.api_version(), ApiVersion::new(1, 2));

    let result = client.get_status("node1")?;
    assert!(result.finished);

    root.assert();
    status.assert();
    Ok(())
}

#[test]
fn test_legacy_server() -> anyhow::Result<()> {
    let mut server = Server::new();
    server.mock("GET", "/").with_status(404).create();

    let client = InspectorClient::new(config(&server))?;
    assert_eq!(client.api_version(), ApiVersion::new(1, 0));

    let err = InspectorClient::new(config(&server).with_api_version("1.1")).unwrap_err();
    assert!(matches!(err, InspectorError::VersionNotSupported { .. }));
    Ok(())
}

#[test]
fn test_probe_server_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/")
        .with_status(500)
        .with_body(r#"{"error": {"message": "database is down"}}"#)
        .create();

    let err = InspectorClient::new(config(&server)).unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "database is down");
}

#[test]
fn test_error_bodies() -> anyhow::Result<()> {
    let mut server = Server::new();
    mock_root(&mut server, "1.0", "1.0");
    server
        .mock("GET", "/v1/introspection/json")
        .with_status(404)
        .with_body(r#"{"error": {"message": "boom"}}"#)
        .create();
    server
        .mock("GET", "/v1/introspection/text")
        .with_status(400)
        .with_body("boom")
        .create();
    server
        .mock("GET", "/v1/introspection/ironic")
        .with_status(400)
        .with_body(r#"{"error_message": "{\"faultstring\": \"wrong service\"}"}"#)
        .create();

    let client = ClientV1::new(config(&server))?;

    let err = client.get_status("json").unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "boom");

    let err = client.get_status("text").unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "boom");

    let err = client.get_status("ironic").unwrap_err();
    assert!(err.to_string().contains("Ironic-style response"));
    match err {
        InspectorError::Remote(remote) => assert!(!remote.body.is_empty()),
        other => panic!("unexpected {:?}", other),
    }
    Ok(())
}

#[test]
fn test_auth_token_and_manage_boot() -> anyhow::Result<()> {
    let mut server = Server::new();
    mock_root(&mut server, "1.0", "1.13");
    let introspect = server
        .mock("POST", "/v1/introspection/node1")
        .match_header("X-Auth-Token", "token")
        .match_query(Matcher::UrlEncoded("manage_boot".into(), "0".into()))
        .with_status(202)
        .create();

    let client = ClientV1::new(config(&server).with_auth_token("token"))?;
    client.introspect("node1", Some(false))?;

    introspect.assert();
    Ok(())
}

#[test]
fn test_wait_for_finish() -> anyhow::Result<()> {
    let mut server = Server::new();
    mock_root(&mut server, "1.0", "1.13");
    let done = server
        .mock("GET", "/v1/introspection/done")
        .with_status(200)
        .with_body(r#"{"finished": true, "error": null}"#)
        .expect(1)
        .create();
    let pending = server
        .mock("GET", "/v1/introspection/pending")
        .with_status(200)
        .with_body(r#"{"finished": false}"#)
        .expect(3)
        .create();

    let client = ClientV1::new(config(&server))?;
    let mut sleeps = Vec::new();
    let err = client
        .wait_for_finish(&["done", "pending"], Duration::from_millis(5), 2, |d| {
            sleeps.push(d)
        })
        .unwrap_err();

    match err {
        InspectorError::WaitTimeout { remaining } => assert_eq!(remaining, vec!["pending"]),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(sleeps.len(), 2);
    done.assert();
    pending.assert();
    Ok(())
}

#[test]
fn test_rules() -> anyhow::Result<()> {
    let mut server = Server::new();
    mock_root(&mut server, "1.0", "1.13");
    let create = server
        .mock("POST", "/v1/rules")
        .match_body(Matcher::PartialJson(json!({
            "uuid": "r1",
            "conditions": [{"op": "eq", "field": "local_gb", "value": 0}],
        })))
        .with_status(201)
        .with_body(r#"{"uuid": "r1"}"#)
        .create();
    let list = server
        .mock("GET", "/v1/rules")
        .with_status(200)
        .with_body(r#"{"rules": [{"uuid": "r1", "description": null}]}"#)
        .create();
    let delete = server.mock("DELETE", "/v1/rules/r1").with_status(204).create();

    let client = ClientV1::new(config(&server))?;
    let rules = client.rules();

    let created = rules.create(
        vec![json!({"op": "eq", "field": "local_gb", "value": 0})],
        vec![json!({"action": "fail", "message": "no disks"})],
        Some("r1"),
        None,
    )?;
    assert_eq!(created["uuid"], "r1");
    assert_eq!(rules.get_all()?.len(), 1);
    rules.delete("r1")?;

    create.assert();
    list.assert();
    delete.assert();
    Ok(())
}

#[test]
fn test_interface_data() -> anyhow::Result<()> {
    let mut server = Server::new();
    mock_root(&mut server, "1.0", "1.13");
    server
        .mock("GET", "/v1/introspection/node1/data")
        .with_status(200)
        .with_body(
            json!({
                "all_interfaces": {
                    "eth0": {
                        "mac": "52:54:00:00:00:01",
                        "lldp_processed": {
                            "switch_port_id": "Ethernet1/1",
                            "switch_port_vlans": [{"id": 100}]
                        }
                    }
                }
            })
            .to_string(),
        )
        .create();

    let client = ClientV1::new(config(&server))?;
    let data = client.get_interface_data("node1", "eth0", &["mac", "switch_port_id"])?;
    assert_eq!(data.get("switch_port_id"), Some(&json!("Ethernet1/1")));

    let err = client
        .get_interface_data("node1", "eth9", &["mac"])
        .unwrap_err();
    assert!(matches!(err, InspectorError::InterfaceNotFound(_)));
    Ok(())
}

#[test]
fn test_probe_without_negotiation() -> anyhow::Result<()> {
    let mut server = Server::new();
    mock_root(&mut server, "1.1", "1.42");

    let transport = ReqwestTransport::new()?;
    let range = probe_api_versions(&config(&server), &transport, None)?;
    assert_eq!(range.minimum, ApiVersion::new(1, 1));
    assert_eq!(range.maximum, ApiVersion::new(1, 42));
    Ok(())
}

#[test]
fn test_connection_refused_passes_through() {
    // nothing listens on the discard port
    let err = InspectorClient::new(ClientConfig::default().with_url("http://127.0.0.1:9"))
        .unwrap_err();
    assert!(matches!(err, InspectorError::Transport(_)));
}

#[test]
fn test_shorthand_helpers() -> anyhow::Result<()> {
    let mut server = Server::new();
    mock_root(&mut server, "1.0", "1.13");
    let start = server
        .mock("POST", "/v1/introspection/node1")
        .with_status(202)
        .create();
    server
        .mock("GET", "/v1/introspection/node1")
        .with_status(200)
        .with_body(r#"{"uuid": "node1", "finished": false}"#)
        .create();

    let range = inspector_client::v1::server_api_versions(&config(&server))?;
    assert_eq!(range.maximum, ApiVersion::new(1, 13));

    inspector_client::v1::introspect(config(&server), "node1", None)?;
    let status = inspector_client::v1::get_status(config(&server), "node1")?;
    assert!(!status.finished);

    start.assert();
    Ok(())
}
