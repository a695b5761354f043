pub mod report;
pub mod visit;

/// Builds the routed app over an in-memory store for handler tests.
#[cfg(test)]
macro_rules! test_app {
    ($store:expr) => {{
        let store = $store;
        let config = crate::config::Config::for_tests();
        let state = crate::state::AppState::new(
            &config,
            store.clone(),
            store.clone(),
            store.clone(),
            store,
        );
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(state))
                .app_data(actix_web::web::Data::new(config.clone()))
                .configure(|cfg| crate::routes::configure(cfg, &config)),
        )
        .await
    }};
}
#[cfg(test)]
pub(crate) use test_app;
