use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use sightline::application::ports::{BlobStore, Notifier, UsageLog};
use sightline::application::services::{Dispatcher, FrameSampler, ProcessService};
use sightline::infrastructure::media::FfmpegFrameDecoder;
use sightline::infrastructure::notification::{SmtpConfig, SmtpNotifier};
use sightline::infrastructure::observability::{TracingConfig, init_tracing};
use sightline::infrastructure::persistence::{
    InMemoryUsageLog, PgUsageLog, create_pool, run_migrations,
};
use sightline::infrastructure::storage::BlobStoreFactory;
use sightline::infrastructure::vision::BackendFactory;
use sightline::presentation::config::{
    DatabaseSettings, EmailSettings, StorageProviderSetting, StorageSettings,
};
use sightline::presentation::{AppState, Environment, Settings, create_router};

async fn build_usage_log(settings: &DatabaseSettings) -> anyhow::Result<Arc<dyn UsageLog>> {
    match &settings.url {
        Some(url) => {
            let pool = create_pool(url, settings.max_connections).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgUsageLog::new(pool)))
        }
        None => {
            tracing::warn!("No database configured; usage records are kept in memory");
            Ok(Arc::new(InMemoryUsageLog::new()))
        }
    }
}

fn build_notifier(settings: &EmailSettings) -> anyhow::Result<Option<Arc<dyn Notifier>>> {
    let Some(host) = &settings.smtp_host else {
        tracing::info!("SMTP host not configured; result emails disabled");
        return Ok(None);
    };
    let notifier = SmtpNotifier::new(SmtpConfig {
        host: host.clone(),
        port: settings.smtp_port,
        from_address: settings.from_address.clone(),
        username: settings.username.clone(),
        password: settings.password.clone(),
    })?;
    Ok(Some(Arc::new(notifier)))
}

fn build_blob_store(settings: &StorageSettings) -> anyhow::Result<Arc<dyn BlobStore>> {
    BlobStoreFactory::create(settings).context("failed to initialise blob store")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging))?;

    let upstream_timeout = Duration::from_secs(settings.timeouts.upstream_secs);
    let sampling_timeout = Duration::from_secs(settings.timeouts.sampling_secs);

    let registry = BackendFactory::create(&settings.providers, upstream_timeout).await?;
    tracing::info!(providers = ?registry.providers(), "Vision backends ready");

    let decoder = Arc::new(FfmpegFrameDecoder::new(settings.scratch.ffmpeg_binary.clone()));
    let sampler = FrameSampler::new(decoder, sampling_timeout);
    let dispatcher = Arc::new(Dispatcher::new(registry, sampler, upstream_timeout));

    let process_service = Arc::new(ProcessService::new(
        dispatcher,
        build_blob_store(&settings.storage)?,
        build_usage_log(&settings.database).await?,
        build_notifier(&settings.email)?,
        settings.scratch.root.clone(),
    ));

    let media_dir = (settings.storage.provider == StorageProviderSetting::Local)
        .then(|| settings.storage.local_path.clone());

    let state = AppState {
        process_service,
        max_upload_bytes: settings.server.max_upload_mb * 1024 * 1024,
        media_dir,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
