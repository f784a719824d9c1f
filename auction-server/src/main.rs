use {
    anyhow::Result,
    auction_room_server::{
        config,
        server::{
            run_migrations,
            start_server,
        },
    },
    clap::Parser,
    std::io::IsTerminal,
    tracing_subscriber::filter::LevelFilter,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize a Tracing Subscriber
    let fmt_builder = tracing_subscriber::fmt()
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal());

    // Use the compact formatter if we're in a terminal, otherwise use the JSON formatter.
    if std::io::stderr().is_terminal() {
        tracing::subscriber::set_global_default(fmt_builder.compact().finish())?;
    } else {
        tracing::subscriber::set_global_default(fmt_builder.json().finish())?;
    }

    // Exits on `--help` or invalid arguments.
    match config::Options::parse() {
        config::Options::Run(opts) => start_server(opts).await,
        config::Options::Migrate(opts) => run_migrations(opts).await,
    }
}
