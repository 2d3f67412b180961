mod views;

use hearth::config::Config;
use hearth::http::handler::handler;
use hearth::routing::{Route, Router};
use hearth::server;
use hearth::static_files::StaticFiles;

fn build_router(cfg: &Config) -> anyhow::Result<Router> {
    let routes = vec![
        Route::new("/now", handler(views::now))?,
        Route::new("/show_request", handler(views::show_request))?,
        Route::new("/parameters", handler(views::parameters))?,
        Route::new(r"/user/(?P<user_id>\d+)/profile", handler(views::user_profile))?,
        Route::new("/set_cookie", handler(views::set_cookie))?,
        Route::new("/login", handler(views::login))?,
        Route::new("/welcome", handler(views::welcome))?,
    ];

    let fallback = StaticFiles::new(&cfg.static_files.root).into_handler();

    Ok(Router::new(routes, fallback))
}

#[tokio::main]
async fn main() -> anyhow::Result<()>{
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();
    let router = build_router(&cfg)?;

    tracing::info!(
        routes = router.routes().len(),
        static_root = %cfg.static_files.root.display(),
        "Routes loaded"
    );

    tokio::select! {
        res = server::listener::run(&cfg, router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
