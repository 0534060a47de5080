use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::context::RequestContext;

/// Hands the caller context resolved by `AuthMiddleware` to a handler.
///
/// Routes outside the middleware, or requests it did not touch, get the
/// anonymous context; the service then decides whether identity is required.
impl FromRequest for RequestContext {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let context = req
            .extensions()
            .get::<RequestContext>()
            .copied()
            .unwrap_or_default();
        ready(Ok(context))
    }
}
