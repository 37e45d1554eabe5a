mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn guest_reviews_place_once() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let owner = server.user("owner@hbnb.io").await?;
    let guest = server.user("guest@hbnb.io").await?;
    let place_id = server.place(&owner, &[]).await?;
    let token = server.token_for(&guest)?;

    let review = json!({
        "text": "Great stay",
        "rating": 5,
        "user_id": guest.base.id,
        "place_id": place_id,
    });

    let res = server.client.post(server.url("/reviews/")).bearer_auth(&token).json(&review).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["rating"], 5);
    assert_eq!(created["place_id"], place_id.as_str());

    let res = server.client.post(server.url("/reviews")).bearer_auth(&token).json(&review).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::error_of(res).await?, "You have already reviewed this place");

    let by_place: Vec<Value> = server
        .client
        .get(server.url(&format!("/places/{}/reviews", place_id)))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(by_place.len(), 1);
    assert_eq!(by_place[0]["text"], "Great stay");
    Ok(())
}

#[tokio::test]
async fn owner_cannot_review_own_place() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let owner = server.user("owner@hbnb.io").await?;
    let place_id = server.place(&owner, &[]).await?;

    let res = server
        .client
        .post(server.url("/reviews"))
        .bearer_auth(server.token_for(&owner)?)
        .json(&json!({ "text": "Mine is best", "rating": 5, "user_id": owner.base.id, "place_id": place_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::error_of(res).await?, "You cannot review your own place");
    Ok(())
}

#[tokio::test]
async fn review_validation_errors() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let owner = server.user("owner@hbnb.io").await?;
    let guest = server.user("guest@hbnb.io").await?;
    let place_id = server.place(&owner, &[]).await?;
    let token = server.token_for(&guest)?;

    let res = server
        .client
        .post(server.url("/reviews"))
        .bearer_auth(&token)
        .json(&json!({ "text": "Too good", "rating": 6, "user_id": guest.base.id, "place_id": place_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::error_of(res).await?, "Rating must be between 0 and 5");

    let res = server
        .client
        .post(server.url("/reviews"))
        .bearer_auth(&token)
        .json(&json!({ "text": "x".repeat(1025), "rating": 3, "user_id": guest.base.id, "place_id": place_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::error_of(res).await?, "Text length exceeds 1024 characters");

    // Posting on behalf of someone else
    let res = server
        .client
        .post(server.url("/reviews"))
        .bearer_auth(&token)
        .json(&json!({ "text": "Fake", "rating": 1, "user_id": owner.base.id, "place_id": place_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn author_updates_and_deletes_review() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let owner = server.user("owner@hbnb.io").await?;
    let guest = server.user("guest@hbnb.io").await?;
    let place_id = server.place(&owner, &[]).await?;
    let token = server.token_for(&guest)?;

    let res = server
        .client
        .post(server.url("/reviews"))
        .bearer_auth(&token)
        .json(&json!({ "text": "Fine", "rating": 3, "user_id": guest.base.id, "place_id": place_id }))
        .send()
        .await?;
    let review_id = common::id_of(res).await?;
    let url = server.url(&format!("/reviews/{}", review_id));

    // The place owner is not the author
    let res = server
        .client
        .put(&url)
        .bearer_auth(server.token_for(&owner)?)
        .json(&json!({ "rating": 1 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.client.put(&url).bearer_auth(&token).json(&json!({ "rating": 4 })).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Review updated successfully");

    let shown: Value = server.client.get(&url).send().await?.json().await?;
    assert_eq!(shown["rating"], 4);
    assert_eq!(shown["text"], "Fine");

    let res = server.client.delete(&url).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.client.get(&url).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::error_of(res).await?, "Review not found");
    Ok(())
}

#[tokio::test]
async fn admin_deletes_any_review() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let owner = server.user("owner@hbnb.io").await?;
    let guest = server.user("guest@hbnb.io").await?;
    let place_id = server.place(&owner, &[]).await?;

    let res = server
        .client
        .post(server.url("/reviews"))
        .bearer_auth(server.token_for(&guest)?)
        .json(&json!({ "text": "Meh", "rating": 2, "user_id": guest.base.id, "place_id": place_id }))
        .send()
        .await?;
    let review_id = common::id_of(res).await?;

    let res = server
        .client
        .delete(server.url(&format!("/reviews/{}", review_id)))
        .bearer_auth(server.admin_token().await?)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let remaining: Vec<Value> = server.client.get(server.url("/reviews")).send().await?.json().await?;
    assert!(remaining.is_empty());
    Ok(())
}
