use std::sync::Arc;
use std::time::Duration;

use autoservice_auth::{AuthUser, Role, Session, SessionHandle, UserMetadata, UserProfile};
use autoservice_core::{TenantId, UserId};
use autoservice_data::{Workshop, fixtures};
use autoservice_web::{AppConfig, InMemorySessionProvider};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    provider: Arc<InMemorySessionProvider>,
    tenant_id: TenantId,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with_wait(Duration::from_millis(50)).await
    }

    async fn spawn_with_wait(loading_wait: Duration) -> Self {
        let config = AppConfig {
            loading_wait,
            ..AppConfig::default()
        };
        let provider = Arc::new(InMemorySessionProvider::new());
        let workshop = Workshop::in_memory();
        let tenant_id = TenantId::new();
        fixtures::seed_demo(&workshop, tenant_id).expect("seed demo data");

        // Same router as prod, bound to an ephemeral port.
        let app = autoservice_web::app::build_app(&config, provider.clone(), workshop);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Guards answer with redirects; the tests inspect them directly.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            base_url: format!("http://{}", addr),
            provider,
            tenant_id,
            client,
            handle,
        }
    }

    fn sign_in(&self, token: &str, role: Role, must_change_password: bool) -> SessionHandle {
        self.sign_in_to(token, role, Some(self.tenant_id), must_change_password)
    }

    fn sign_in_to(
        &self,
        token: &str,
        role: Role,
        tenant_id: Option<TenantId>,
        must_change_password: bool,
    ) -> SessionHandle {
        let session = Session::authenticated(user(must_change_password))
            .with_profile(UserProfile { role, tenant_id });
        self.provider.register(token, session)
    }

    async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut req = self.client.get(format!("{}{}", self.base_url, path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req.send().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn user(must_change_password: bool) -> AuthUser {
    AuthUser {
        id: UserId::new(),
        email: "someone@shop.example".into(),
        metadata: UserMetadata {
            must_change_password,
        },
    }
}

fn location(res: &reqwest::Response) -> &str {
    res.headers()
        .get(reqwest::header::LOCATION)
        .expect("location header")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn public_pages_need_no_session() {
    let srv = TestServer::spawn().await;

    assert_eq!(srv.get("/health", None).await.status(), StatusCode::OK);

    let res = srv.get("/login?from=%2Fcustomers", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["return_to"], "/customers");
}

#[tokio::test]
async fn unknown_paths_are_not_found_rather_than_guarded() {
    let srv = TestServer::spawn().await;
    srv.sign_in("admin", Role::ADMIN, false);

    for (path, token) in [
        ("/does-not-exist", None),
        ("/customerz", None),
        ("/admin/nothing-here", Some("admin")),
    ] {
        let res = srv.get(path, token).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path}");
        assert!(res.headers().get(reqwest::header::LOCATION).is_none(), "{path}");
    }
}

#[tokio::test]
async fn anonymous_is_sent_to_login_with_origin() {
    let srv = TestServer::spawn().await;

    let res = srv.get("/customers?page=2", None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login?from=%2Fcustomers%3Fpage%3D2");

    let res = srv.get("/dashboard", Some("unknown-token")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login?from=%2Fdashboard");
}

#[tokio::test]
async fn member_sees_only_own_tenant_data() {
    let srv = TestServer::spawn().await;
    srv.sign_in("tech", Role::TECHNICIAN, false);
    srv.sign_in_to("stranger", Role::ADMIN, Some(TenantId::new()), false);

    let res = srv.get("/customers", Some("tech")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items
        .iter()
        .all(|c| c["tenant_id"] == srv.tenant_id.to_string()));

    let customer_id = items[0]["id"].as_str().unwrap().to_string();

    let res = srv.get("/customers", Some("stranger")).await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());

    // Another tenant's customer id is not found, not forbidden.
    let res = srv
        .get(&format!("/customers/{customer_id}/vehicles"), Some("stranger"))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = srv
        .get(&format!("/customers/{customer_id}/vehicles"), Some("tech"))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn profile_without_tenant_is_unauthorized() {
    let srv = TestServer::spawn().await;
    srv.sign_in_to("orphan", Role::ADMIN, None, false);

    let res = srv.get("/dashboard", Some("orphan")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/unauthorized");
}

#[tokio::test]
async fn role_restricted_routes() {
    let srv = TestServer::spawn().await;
    srv.sign_in("tech", Role::TECHNICIAN, false);
    srv.sign_in("consultant", Role::CONSULTANT, false);
    srv.sign_in("admin", Role::ADMIN, false);

    let res = srv.get("/personnel", Some("tech")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/unauthorized");

    let res = srv.get("/personnel", Some("consultant")).await;
    assert_eq!(location(&res), "/unauthorized");

    assert_eq!(srv.get("/personnel", Some("admin")).await.status(), StatusCode::OK);

    let res = srv.get("/reports/technicians", Some("consultant")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["technicians"].as_array().unwrap().len(), 2);

    let res = srv.get("/reports/technicians", Some("tech")).await;
    assert_eq!(location(&res), "/unauthorized");
}

#[tokio::test]
async fn pending_password_change_is_enforced_until_completed() {
    let srv = TestServer::spawn().await;
    srv.sign_in("new-hire", Role::TECHNICIAN, true);

    let res = srv.get("/inventory", Some("new-hire")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/change-password");

    let res = srv.get("/change-password", Some("new-hire")).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv
        .client
        .post(format!("{}/change-password", srv.base_url))
        .bearer_auth("new-hire")
        .json(&json!({ "new_password": "short" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = srv
        .client
        .post(format!("{}/change-password", srv.base_url))
        .bearer_auth("new-hire")
        .json(&json!({ "new_password": "a much better passphrase" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(srv.get("/inventory", Some("new-hire")).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn loading_session_answers_loading_then_resolves() {
    let srv = TestServer::spawn_with_wait(Duration::from_millis(20)).await;
    let handle = srv.provider.register("slow", Session::loading());

    let res = srv.get("/dashboard", Some("slow")).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        res.headers().get(reqwest::header::RETRY_AFTER).unwrap(),
        "1"
    );
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "loading");

    // Authenticated but profile not fetched: still undecidable.
    handle.publish(Session::authenticated(user(false)));
    let res = srv.get("/dashboard", Some("slow")).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    handle.update(|s| {
        s.profile = Some(UserProfile {
            role: Role::CONSULTANT,
            tenant_id: Some(srv.tenant_id),
        })
    });
    let res = srv.get("/dashboard", Some("slow")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["role"], "consultant");
    assert_eq!(body["customers"], 3);
}

#[tokio::test]
async fn request_waits_for_session_resolving_in_time() {
    let srv = TestServer::spawn_with_wait(Duration::from_secs(5)).await;
    let handle = srv.provider.register("resolving", Session::loading());
    let tenant_id = srv.tenant_id;

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.publish(
            Session::authenticated(user(false)).with_profile(UserProfile {
                role: Role::ADMIN,
                tenant_id: Some(tenant_id),
            }),
        );
    });

    assert_eq!(srv.get("/dashboard", Some("resolving")).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn superadmin_routes() {
    let srv = TestServer::spawn().await;
    srv.sign_in_to("root", Role::SUPERADMIN, None, false);
    srv.sign_in("admin", Role::ADMIN, false);

    let res = srv.get("/admin/tenants", Some("root")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"][0]["tenant_id"], srv.tenant_id.to_string());

    let res = srv.get("/admin/tenants", Some("admin")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/unauthorized");

    let res = srv.get("/admin/tenants", None).await;
    assert_eq!(location(&res), "/unauthorized");
}

#[tokio::test]
async fn inventory_adjustments_respect_stock_invariant() {
    let srv = TestServer::spawn().await;
    srv.sign_in("desk", Role::CONSULTANT, false);

    let res = srv.get("/inventory/low-stock", Some("desk")).await;
    let body: serde_json::Value = res.json().await.unwrap();
    let low = body["items"].as_array().unwrap();
    assert_eq!(low.len(), 2);
    let empty_part = low
        .iter()
        .find(|p| p["quantity_on_hand"] == 0)
        .expect("a part with no stock");
    let id = empty_part["id"].as_str().unwrap();

    let res = srv
        .client
        .post(format!("{}/inventory/{id}/adjust", srv.base_url))
        .bearer_auth("desk")
        .json(&json!({ "delta": -1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = srv
        .client
        .post(format!("{}/inventory/{id}/adjust", srv.base_url))
        .bearer_auth("desk")
        .json(&json!({ "delta": 20 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let part: serde_json::Value = res.json().await.unwrap();
    assert_eq!(part["quantity_on_hand"], 20);

    let res = srv.get("/inventory/low-stock", Some("desk")).await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_customer_and_vehicle() {
    let srv = TestServer::spawn().await;
    srv.sign_in("desk", Role::CONSULTANT, false);

    let res = srv
        .client
        .post(format!("{}/customers", srv.base_url))
        .bearer_auth("desk")
        .json(&json!({ "name": "Lena Park", "email": "lena@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let customer: serde_json::Value = res.json().await.unwrap();
    let customer_id = customer["id"].as_str().unwrap();

    let res = srv
        .client
        .post(format!("{}/vehicles", srv.base_url))
        .bearer_auth("desk")
        .json(&json!({
            "customer_id": customer_id,
            "vin": "WVWZZZ1JZXW000001",
            "make": "Volkswagen",
            "model": "Golf",
            "year": 1999,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = srv
        .client
        .post(format!("{}/vehicles", srv.base_url))
        .bearer_auth("desk")
        .json(&json!({
            "customer_id": customer_id,
            "vin": "NOT-A-VIN",
            "make": "Volkswagen",
            "model": "Golf",
            "year": 1999,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = srv
        .get(&format!("/customers/{customer_id}/vehicles"), Some("desk"))
        .await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}
