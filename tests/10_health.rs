mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server.client.get(format!("{}/health", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_lists_api_endpoints() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let body: Value = server.client.get(&server.base_url).send().await?.json().await?;
    assert_eq!(body["name"], "HBnB API");
    assert!(body["endpoints"]["amenities"].as_str().unwrap().starts_with("/api/v1/amenities"));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server.client.get(server.url("/bookings")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
