use std::sync::Arc;

use anyhow::Context;

use autoservice_auth::{AuthUser, Role, Session, UserMetadata, UserProfile};
use autoservice_core::{TenantId, UserId};
use autoservice_data::{Workshop, fixtures};
use autoservice_web::{AppConfig, InMemorySessionProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    autoservice_observability::init_with_filter(config.log_filter.as_deref());

    let provider = Arc::new(InMemorySessionProvider::new());
    let workshop = Workshop::in_memory();

    if config.seed_demo {
        let tenant_id = TenantId::new();
        fixtures::seed_demo(&workshop, tenant_id).context("seeding demo data")?;
        register_dev_sessions(&provider, tenant_id);
    } else {
        tracing::warn!("no identity provider configured; every request is anonymous");
    }

    let app = autoservice_web::app::build_app(&config, provider, workshop);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Fixed bearer tokens for trying the demo tenant from a terminal.
fn register_dev_sessions(provider: &InMemorySessionProvider, tenant_id: TenantId) {
    for (token, role, must_change_password) in [
        ("dev-admin", Role::ADMIN, false),
        ("dev-consultant", Role::CONSULTANT, false),
        ("dev-technician", Role::TECHNICIAN, true),
        ("dev-superadmin", Role::SUPERADMIN, false),
    ] {
        let user = AuthUser {
            id: UserId::new(),
            email: format!("{token}@demo.example"),
            metadata: UserMetadata {
                must_change_password,
            },
        };
        let tenant_id = (!role.is_superadmin()).then_some(tenant_id);
        let session = Session::authenticated(user).with_profile(UserProfile { role, tenant_id });
        provider.register(token, session);
        tracing::info!(token, "dev session registered");
    }
}
