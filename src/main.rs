use stanton::server::{config::Config, model::app::AppState, router, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            std::process::exit(1);
        }
    };

    let app_db = startup::connect_to_app_database(&config.database_url)
        .await
        .expect("Failed to connect to the app database");
    let auth_db = startup::connect_to_auth_database(&config.auth_database_url)
        .await
        .expect("Failed to connect to the auth database");

    startup::seed_default_admin(&config, &auth_db)
        .await
        .expect("Failed to seed the default admin");

    let sc_client = startup::build_sc_client(&config).expect("Failed to build the SC API client");
    let discord =
        startup::build_discord_client(&config).expect("Failed to build the Discord client");

    let state = AppState {
        app_db,
        auth_db,
        sc_client,
        discord,
        jwt: stanton::server::model::auth::JwtKeys::new(
            &config.jwt_secret,
            config.jwt_expiration_days,
        ),
        frontend_url: config.frontend_url.clone(),
    };

    let router = router::routes()
        .with_state(state)
        .layer(startup::session_layer())
        .layer(startup::cors_layer(&config));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!(addr = %config.listen_addr, "starting server");

    axum::serve(listener, router)
        .await
        .expect("Server terminated unexpectedly");
}
