mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_ticket_defaults_to_open() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let alice = server.create_user("alice", "alice@example.com").await?;

    let (status, body) = server
        .post_json(
            "/api/tickets",
            json!({ "title": "Printer", "description": "Paper jam on floor 2", "user_id": alice }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Ticket created successfully" }));

    let (status, tickets) = server.get_json("/api/tickets").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        tickets,
        json!([{
            "id": 1,
            "title": "Printer",
            "description": "Paper jam on floor 2",
            "status": "Open",
            "user_id": alice
        }])
    );

    Ok(())
}

#[tokio::test]
async fn missing_description_is_rejected() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let alice = server.create_user("alice", "alice@example.com").await?;

    let (status, body) = server
        .post_json("/api/tickets", json!({ "title": "Printer", "user_id": alice }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing data" }));

    let (_, tickets) = server.get_json("/api/tickets").await?;
    assert_eq!(tickets, json!([]));

    Ok(())
}

#[tokio::test]
async fn unknown_user_id_fails_without_row() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let (status, body) = server
        .post_json(
            "/api/tickets",
            json!({ "title": "Printer", "description": "Jammed", "user_id": 42 }),
        )
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to create ticket" }));

    let (_, tickets) = server.get_json("/api/tickets").await?;
    assert_eq!(tickets, json!([]));

    Ok(())
}

#[tokio::test]
async fn non_numeric_user_id_fails_create() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.create_user("alice", "alice@example.com").await?;

    let (status, body) = server
        .post_json(
            "/api/tickets",
            json!({ "title": "Printer", "description": "Jammed", "user_id": "abc" }),
        )
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to create ticket" }));

    Ok(())
}

#[tokio::test]
async fn integral_float_user_id_is_accepted() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let alice = server.create_user("alice", "alice@example.com").await?;

    let (status, _) = server
        .post_json(
            "/api/tickets",
            json!({ "title": "Printer", "description": "Jammed", "user_id": alice as f64 }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, tickets) = server.get_json("/api/tickets").await?;
    assert_eq!(tickets[0]["user_id"], alice);

    Ok(())
}

#[tokio::test]
async fn delete_ticket_removes_it() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let alice = server.create_user("alice", "alice@example.com").await?;
    let keep = server.create_ticket("Keep", alice).await?;
    let gone = server.create_ticket("Gone", alice).await?;

    let (status, body) = server.delete(&format!("/api/tickets/{}", gone)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Ticket deleted successfully" }));

    let (_, tickets) = server.get_json("/api/tickets").await?;
    let ids: Vec<i64> = tickets
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![keep]);

    let (status, body) = server.delete(&format!("/api/tickets/{}", gone)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Ticket not found" }));

    Ok(())
}

#[tokio::test]
async fn update_status_is_reflected_in_list() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let alice = server.create_user("alice", "alice@example.com").await?;
    let id = server.create_ticket("VPN", alice).await?;

    let (status, body) = server
        .put_json(&format!("/api/tickets/{}", id), json!({ "status": "Closed" }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Ticket status updated successfully" }));

    let (_, tickets) = server.get_json("/api/tickets").await?;
    assert_eq!(tickets[0]["status"], "Closed");

    let (status, body) = server
        .put_json("/api/tickets/999", json!({ "status": "Closed" }))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Ticket not found" }));

    Ok(())
}

#[tokio::test]
async fn update_without_status_is_rejected() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let alice = server.create_user("alice", "alice@example.com").await?;
    let id = server.create_ticket("VPN", alice).await?;

    let (status, body) = server.put_json(&format!("/api/tickets/{}", id), json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing data" }));

    let (_, tickets) = server.get_json("/api/tickets").await?;
    assert_eq!(tickets[0]["status"], "Open");

    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_not_found_whatever_the_body() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    for body in [json!({}), json!({ "status": "" }), json!({ "status": "Closed" })] {
        let (status, resp) = server.put_json("/api/tickets/999", body.clone()).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "body {}", body);
        assert_eq!(resp, json!({ "error": "Ticket not found" }));
    }

    Ok(())
}

#[tokio::test]
async fn non_integer_id_is_not_found() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let (status, body) = server.delete("/api/tickets/abc").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Ticket not found" }));

    Ok(())
}

#[tokio::test]
async fn root_and_health_respond() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let (status, body) = server.get_json("/").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Helpdesk API");

    let (status, body) = server.get_json("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    Ok(())
}
