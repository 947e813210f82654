use sessionkv::{Session, Storage, StorageConfig, CURRENT_SESSION_KEY};
use tracing::info;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("SessionKV demo starting...");

    let config = StorageConfig::default();
    let storage = Storage::open(&config).await;
    info!("Selected backend: {}", storage.backend_kind());

    // Mirror the app startup flow: restore the saved session if there is one,
    // otherwise store a fresh snapshot as a signed-in app would.
    match storage.get::<Session>(CURRENT_SESSION_KEY).await {
        Some(session) => {
            info!(
                "Restored session: uid={} email={}",
                session.uid,
                session.email.as_deref().unwrap_or("<none>")
            );
        }
        None => {
            info!("No saved session; storing a sample one");
            let session = Session::new("u1", Some("a@b.com".to_string()));
            storage.set(CURRENT_SESSION_KEY, &session).await;
            info!("Session stored for uid={}", session.uid);
        }
    }
}
