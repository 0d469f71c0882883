use kernel::interface::store::{CatalogStore, DependOnCatalogStore};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::error::StackTrace;
use crate::handler::AppModule;
use crate::session::Session;

mod command;
mod error;
mod handler;
mod session;

fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "ledger.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| "cli=warn,driver=info".into()),
            )),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let module = AppModule::init();
    let catalog = module.catalog_store().load()?;
    let mut session = Session::new(module, catalog);
    session.run()?;

    Ok(())
}
