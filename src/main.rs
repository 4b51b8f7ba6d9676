use std::net::{Ipv4Addr, SocketAddr};
use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use onboarding_backend::configuration::get_static_configuration;
use onboarding_backend::error::Result;
use onboarding_backend::telemetry::{get_subscriber, init_subscriber};
use onboarding_backend::uploads::UploadDirectory;
use onboarding_backend::{run, store, AppState};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let subscriber = get_subscriber(String::from("onboarding-backend"), "info", std::io::stdout);
    if let Err(err) = init_subscriber(subscriber) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match serve().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "onboarding server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn serve() -> Result<()> {
    let configuration = get_static_configuration()?;
    let mongo_uri = configuration.mongo_uri()?;

    let uploads = UploadDirectory::create(&configuration.uploads_directory).await?;
    let store = store::connect(mongo_uri, configuration.database_name.as_deref()).await?;
    info!(database = store.database().name(), "mongodb connected");

    let listener =
        TcpListener::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, configuration.port))).await?;
    info!("Starting server at port {}...", configuration.port);

    run(listener, AppState::new(Arc::new(store), uploads)).await?;
    Ok(())
}
