pub mod auth;
pub mod health;
pub mod task_lists;
pub mod todos;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::sign_up)
            .service(auth::sign_in),
    )
    .service(
        web::scope("/task-lists")
            .service(task_lists::my_task_lists)
            .service(task_lists::create_task_list)
            .service(task_lists::get_task_list)
            .service(task_lists::update_task_list)
            .service(task_lists::delete_task_list)
            .service(task_lists::add_user_to_task_list),
    )
    .service(
        web::scope("/todos")
            .service(todos::create_todo)
            .service(todos::get_todo)
            .service(todos::update_todo)
            .service(todos::delete_todo),
    );
}
