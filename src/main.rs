use std::error::Error;

use nutrivision::{
    web::{self, AppState},
    ApiKey, GenerativeModel, MealAnalyzer, Settings,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "nutrivision=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::load()?;

    let app = match ApiKey::from_env() {
        Ok(api_key) => {
            let model = GenerativeModel::new(api_key, settings.model_params());
            let analyzer = MealAnalyzer::new(model).with_max_image_bytes(settings.max_image_bytes);
            info!(model = %settings.model, "Gemini client configured");
            web::router(AppState::new(analyzer))
        }
        Err(e) => {
            error!("{e}");
            web::unconfigured_router()
        }
    };

    let listener = tokio::net::TcpListener::bind(settings.listen_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
