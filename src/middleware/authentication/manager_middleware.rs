use crate::helpers::JsonResponse;
use crate::middleware::authentication::method::{self, AuthError};
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse},
    Error, HttpMessage,
};
use futures::{
    future::{FutureExt, LocalBoxFuture},
    task::{Context, Poll},
};
use std::rc::Rc;

pub struct ManagerMiddleware<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ManagerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = S::Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        async move {
            let session = method::try_cookies(&req)?;
            req.extensions_mut().insert(session);

            Ok::<_, AuthError>(req)
        }
        .then(|req: Result<ServiceRequest, AuthError>| async move {
            match req {
                Ok(req) => service.call(req).await,
                Err(AuthError::Rejected(msg)) => {
                    Err(JsonResponse::<()>::build().unauthorized(msg))
                }
                Err(AuthError::Misconfigured) => {
                    Err(JsonResponse::<()>::build().internal_server_error(""))
                }
            }
        })
        .boxed_local()
    }
}
