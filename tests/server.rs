//! End-to-end tests against a running server.

use ocs_response::OcsServiceConfig;

mod common;

#[tokio::test]
async fn test_config_endpoint_over_tcp() {
    let server = common::start_server(OcsServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .get(server.url("/ocs/v1.php/config?format=json"))
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/json");

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["ocs"]["meta"]["status"], "ok");
    assert_eq!(body["ocs"]["meta"]["statuscode"], 100);
    assert_eq!(body["ocs"]["data"]["version"], "1.7");

    server.stop().await;
}

#[tokio::test]
async fn test_xml_is_the_default_format() {
    let mut config = OcsServiceConfig::default();
    config.ocs.host = "cloud.example.org".to_string();
    let server = common::start_server(config).await;
    let client = common::client();

    let res = client
        .get(server.url("/ocs/v1.php/config?format=yaml"))
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/xml");

    let body = res.text().await.unwrap();
    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?><ocs><meta>"));
    assert!(body.contains("<host>cloud.example.org</host>"));

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_route_maps_to_404() {
    let server = common::start_server(OcsServiceConfig::default()).await;
    let client = common::client();

    for format in ["json", "xml"] {
        let res = client
            .get(server.url(&format!("/ocs/v1.php/apps/files_sharing/api/v1/nope?format={format}")))
            .send()
            .await
            .expect("server unreachable");

        assert_eq!(res.status(), 404);
        let body = res.text().await.unwrap();
        assert!(body.contains("998"), "missing OCS code in {body}");
    }

    server.stop().await;
}
