use database::{DatabaseConnectionInfo, SqliteDatabase};
use tracing_subscriber::EnvFilter;
use web::{start_web_server, WebConfig, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    // request spans of the http layer; `log` records keep going through env_logger
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("could not install tracing subscriber.");

    // database
    let database = SqliteDatabase::connect(DatabaseConnectionInfo::from_env())
        .await
        .expect("could not connect to database.");

    // web server
    start_web_server(WebState::new(database), WebConfig::from_env())
        .await
        .expect("web server failed.");
}
