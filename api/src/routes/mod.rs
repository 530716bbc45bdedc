//! Route table for everything under `/api`.
//!
//! Only `POST /auth/warehouse-login` is public; every other group is wrapped
//! in [`JwtAuth`].

pub mod auth;
pub mod batches;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod sales;

use actix_web::web;

use crate::middleware::JwtAuth;

pub fn configure(cfg: &mut web::ServiceConfig, jwt: JwtAuth) {
    cfg.service(
        web::scope("/auth")
            .route("/warehouse-login", web::post().to(auth::login))
            .service(
                web::resource("/me")
                    .wrap(jwt.clone())
                    .route(web::get().to(auth::me)),
            ),
    )
    .service(
        web::scope("/categories")
            .wrap(jwt.clone())
            .route("", web::get().to(categories::list))
            .route("", web::post().to(categories::create))
            .route("/{id}", web::get().to(categories::get))
            .route("/{id}", web::put().to(categories::update))
            .route("/{id}", web::delete().to(categories::delete)),
    )
    .service(
        web::scope("/cable-batches")
            .wrap(jwt.clone())
            .route("", web::get().to(batches::list))
            .route("", web::post().to(batches::create))
            .route("/{id}", web::get().to(batches::get)),
    )
    .service(
        web::resource("/products-available")
            .wrap(jwt.clone())
            .route(web::get().to(products::available)),
    )
    .service(
        web::resource("/products-by-batch/{batch_id}")
            .wrap(jwt.clone())
            .route(web::get().to(products::by_batch)),
    )
    .service(
        web::scope("/products")
            .wrap(jwt.clone())
            .route("/imei/{imei}", web::get().to(products::by_imei))
            .route("/{id}", web::get().to(products::get)),
    )
    .service(
        web::scope("/sales")
            .wrap(jwt.clone())
            .route("", web::get().to(sales::list))
            .route("", web::post().to(sales::create))
            .route("/{id}", web::get().to(sales::get)),
    )
    .service(
        web::scope("/dashboard")
            .wrap(jwt)
            .route("", web::get().to(dashboard::overview))
            .route("/batches", web::get().to(dashboard::batches))
            .route("/revenue-chart", web::get().to(dashboard::revenue_chart)),
    );
}
