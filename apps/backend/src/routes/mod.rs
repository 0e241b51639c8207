use actix_web::web;

pub mod todos;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes)
        .service(web::scope("/api/todos").configure(todos::configure_routes));
}
