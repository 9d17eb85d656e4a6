use anyhow::Context;
use tracing_subscriber::EnvFilter;

use house_estimator::{
    blueprint::Fonts, config::AppConfig, features::FeatureVector, model, router, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = AppConfig::from_env();

    let mdl = model::load_model(&cfg.model_path)
        .with_context(|| format!("cannot start without a model ({})", cfg.model_path.display()))?;
    // Warmup so a broken artifact fails here rather than on the first request
    let warm = model::predict_one(mdl.as_ref(), &FeatureVector::zeros())?;
    tracing::info!(
        "loaded model {}; warmup forward ok ({:.2})",
        cfg.model_path.display(),
        warm
    );

    let fonts = Fonts::load(&cfg.fonts);
    tracing::info!(
        "label fonts: regular={} bold={}",
        if fonts.regular.is_builtin() { "bundled" } else { "system" },
        if fonts.bold.is_builtin() { "bundled" } else { "system" }
    );

    let mut state = AppState::new(mdl, fonts);
    state.log_predictions = cfg.log_predictions;

    let app = router(state);

    let addr = cfg.addr();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
