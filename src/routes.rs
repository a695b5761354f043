use crate::api::{report, visit};
use crate::auth::middleware::auth_middleware;
use crate::config::Config;
use actix_governor::{Governor, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_governor::governor::middleware::NoOpMiddleware;
use actix_web::{middleware::from_fn, web};

/// Per-IP limiter allowing `requests_per_min` with an equal burst.
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("per_millisecond and burst_size are non-zero");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .service(
                web::scope("/reports")
                    .wrap(build_limiter(config.rate_reports_per_min))
                    // /reports/monthly/{user_id}
                    .service(
                        web::resource("/monthly/{user_id}")
                            .route(web::get().to(report::monthly_report)),
                    )
                    .service(web::resource("/fleet").route(web::get().to(report::fleet_report)))
                    .service(
                        web::resource("/attendance-summary")
                            .route(web::get().to(report::attendance_summary)),
                    )
                    .service(
                        web::resource("/working-days").route(web::get().to(report::working_days)),
                    ),
            )
            .service(
                web::scope("/visits")
                    .wrap(build_limiter(config.rate_tracking_per_min))
                    .service(web::resource("/track").route(web::post().to(visit::track_movement)))
                    .service(
                        web::resource("/distance-summary/{user_id}")
                            .route(web::get().to(visit::distance_summary)),
                    )
                    .service(
                        web::resource("/{visit_id}/start").route(web::post().to(visit::start_visit)),
                    )
                    .service(
                        web::resource("/{visit_id}/route")
                            .route(web::post().to(visit::update_route)),
                    )
                    .service(
                        web::resource("/{visit_id}/complete")
                            .route(web::post().to(visit::complete_visit)),
                    ),
            ),
    );
}
