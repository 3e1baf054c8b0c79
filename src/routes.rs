use crate::{
    api::{members, projects, reload, tools},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap_or_default();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope(&config.api_prefix)
            // /overview
            .service(web::resource("/overview").route(web::get().to(projects::overview)))
            // /projects?status=&tool=
            .service(web::resource("/projects").route(web::get().to(projects::list_projects)))
            // /project/{project_id}
            .service(
                web::resource("/project/{project_id}")
                    .route(web::get().to(projects::project_details)),
            )
            // /tool/{tool_name}
            .service(
                web::resource("/tool/{tool_name}").route(web::get().to(tools::tool_dashboard)),
            )
            // /member/{employee_id}
            .service(
                web::resource("/member/{employee_id}")
                    .route(web::get().to(members::member_profile)),
            )
            // /reload
            .service(
                web::resource("/reload")
                    .wrap(build_limiter(config.rate_reload_per_min))
                    .route(web::post().to(reload::reload_data))
                    .route(web::get().to(reload::reload_data)),
            ),
    );
}
