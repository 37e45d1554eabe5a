mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn creates_and_updates_amenity() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let res = server
        .client
        .post(server.url("/amenities/"))
        .json(&json!({ "name": "Wi-Fi" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["name"], "Wi-Fi");
    let id = created["id"].as_str().unwrap().to_string();

    let res = server
        .client
        .put(server.url(&format!("/amenities/{}", id)))
        .json(&json!({ "name": "Fast Wi-Fi" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Amenity updated successfully");

    let shown: Value = server
        .client
        .get(server.url(&format!("/amenities/{}", id)))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(shown["name"], "Fast Wi-Fi");
    Ok(())
}

#[tokio::test]
async fn listing_is_public_and_trailing_slash_agnostic() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.amenity("Pool").await?;
    server.amenity("Parking").await?;

    for path in ["/amenities", "/amenities/"] {
        let res = server.client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::OK, "GET {}", path);
        let list: Vec<Value> = res.json().await?;
        let names: Vec<&str> = list.iter().filter_map(|a| a["name"].as_str()).collect();
        assert_eq!(names, vec!["Pool", "Parking"]);
    }
    Ok(())
}

#[tokio::test]
async fn amenity_writes_need_no_token() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/amenities"))
        .json(&json!({ "name": "Sauna" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = common::id_of(res).await?;

    let res = server
        .client
        .put(server.url(&format!("/amenities/{}", id)))
        .json(&json!({ "name": "Steam Room" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn update_rejects_unknown_and_invalid_amenities() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let id = server.amenity("Gym").await?;

    let res = server
        .client
        .put(server.url("/amenities/does-not-exist"))
        .json(&json!({ "name": "Spa" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .client
        .put(server.url(&format!("/amenities/{}", id)))
        .json(&json!({ "name": "x".repeat(51) }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn invalid_and_missing_amenities() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/amenities"))
        .json(&json!({ "name": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::error_of(res).await?, "Invalid input data");

    let res = server.client.get(server.url("/amenities/does-not-exist")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::error_of(res).await?, "Amenity not found");
    Ok(())
}
