use std::net::SocketAddr;
use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use service::expense::repository::{memory::InMemoryExpenseRepository, ExpenseRepository};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::auth::{Claims, ServerAuthConfig};
use server::startup::build_app;

const SECRET: &str = "e2e-secret";

struct TestApp {
    base_url: String,
}

/// Serve the app on an ephemeral port. Uses Postgres when DATABASE_URL is set, memory otherwise.
async fn start_server() -> anyhow::Result<TestApp> {
    let repo = repository().await?;
    let app = build_app(repo, ServerAuthConfig { jwt_secret: SECRET.into() });

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn repository() -> anyhow::Result<Arc<dyn ExpenseRepository>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(Arc::new(InMemoryExpenseRepository::new()));
    }
    use migration::MigratorTrait;
    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await { eprintln!("migrations notice: {}", e); }
    Ok(Arc::new(service::expense::repo::seaorm::SeaOrmExpenseRepository { db }))
}

fn token_for(user: Uuid) -> anyhow::Result<String> {
    let now = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH)?.as_secs() as usize;
    let claims = Claims { uid: None, sub: Some(user.to_string()), exp: now + 600, iat: Some(now) };
    Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes()))?)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_expired_token_unauthorized() -> anyhow::Result<()> {
    let app = start_server().await?;
    let now = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH)?.as_secs() as usize;
    let claims = Claims { uid: Some(Uuid::new_v4().to_string()), sub: None, exp: now.saturating_sub(3600), iat: Some(now.saturating_sub(7200)) };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes()))?;

    let res = reqwest::Client::new()
        .get(format!("{}/api/expenses", app.base_url))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn e2e_expense_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let me = token_for(Uuid::new_v4())?;
    let url = format!("{}/api/expenses", app.base_url);

    // Create
    let res = c.post(&url)
        .bearer_auth(&me)
        .json(&json!({"description": "Cinema", "amount": 12.0, "category": "Entertainment"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["data"]["id"].as_str().unwrap_or_default().to_string();

    // List
    let res = c.get(&url).bearer_auth(&me).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let listed = res.json::<serde_json::Value>().await?;
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["data"][0]["id"], id.as_str());

    // Someone else cannot delete it
    let other = token_for(Uuid::new_v4())?;
    let res = c.delete(format!("{url}/{id}")).bearer_auth(&other).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    // Owner can
    let res = c.delete(format!("{url}/{id}")).bearer_auth(&me).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.delete(format!("{url}/{id}")).bearer_auth(&me).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
