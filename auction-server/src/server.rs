use {
    crate::{
        auction::service::Service,
        config::{
            self,
            Config,
            MigrateOptions,
            RunOptions,
        },
        kernel::db::DB,
    },
    anyhow::anyhow,
    sqlx::postgres::PgPoolOptions,
    std::{
        sync::atomic::{
            AtomicBool,
            Ordering,
        },
        time::Duration,
    },
};

async fn connect_db(options: &config::DatabaseOptions) -> anyhow::Result<DB> {
    PgPoolOptions::new()
        .max_connections(options.database_max_connections)
        .connect(&options.database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to database: {:?}", err))
}

async fn migrate(pool: &DB) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|err| anyhow!("Failed to run migrations: {:?}", err))
}

pub async fn run_migrations(migrate_options: MigrateOptions) -> anyhow::Result<()> {
    let pool = connect_db(&migrate_options.database).await?;
    migrate(&pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?err, "Failed to listen for shutdown signal");
        }
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let config = Config::load(&run_options.config.config).map_err(|err| {
        anyhow!(
            "Failed to load config from file({path}): {:?}",
            err,
            path = run_options.config.config
        )
    })?;

    let pool = connect_db(&run_options.database).await?;
    migrate(&pool).await?;

    let service = Service::new(pool, config.auction.into());
    service
        .load_auctions()
        .await
        .map_err(|err| anyhow!("Failed to restore auctions: {}", err))?;

    let cleanup_loop = tokio::spawn({
        let service = service.clone();
        async move { service.run_lock_cleanup_loop().await }
    });
    cleanup_loop
        .await
        .map_err(|err| anyhow!("Lock cleanup task failed: {:?}", err))??;
    tracing::info!("Auction room server stopped");
    Ok(())
}

// Set once a shutdown signal arrives. Background loops poll it every `EXIT_CHECK_INTERVAL`.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
