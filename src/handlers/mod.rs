pub mod health_handler;
pub mod parse_handler;
pub mod recipe_handler;

use actix_web::web;

pub use health_handler::health_check;
pub use parse_handler::{ingest_text, parse_text};
pub use recipe_handler::{
    archive_recipe, assemble_collection, create_recipe, execute_recipe, get_recipe,
    get_trivia_set, preview_recipe, update_recipe,
};

/// Registers every REST route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(parse_text)
        .service(ingest_text)
        .service(create_recipe)
        .service(get_recipe)
        .service(update_recipe)
        .service(archive_recipe)
        .service(preview_recipe)
        .service(execute_recipe)
        .service(assemble_collection)
        .service(get_trivia_set);
}
