/*!
 * 基于角色的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用：从请求扩展中读取 `AuthUser`，
 * 角色不在允许列表中时返回 403。
 *
 * ```rust,ignore
 * web::scope("/api/v1/feedback-forms")
 *     .wrap(RequireJWT)
 *     .service(
 *         web::resource("/{id}/summary")
 *             .wrap(RequireRole::new_any(UserRole::faculty_roles()))
 *             .route(web::get().to(get_summary)),
 *     )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{AuthUser, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Rc<Vec<UserRole>>,
}

impl RequireRole {
    /// 只允许单一角色
    pub fn new(role: &UserRole) -> Self {
        Self::new_any(&[role])
    }

    /// 允许任一角色
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed_roles: Rc::new(roles.iter().map(|r| (*r).clone()).collect()),
        }
    }

    fn permits(allowed_roles: &[UserRole], user: &AuthUser) -> bool {
        allowed_roles.contains(&user.role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Rc<Vec<UserRole>>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            let user = req.extensions().get::<AuthUser>().cloned();

            let (status, code, message) = match user {
                Some(user) if RequireRole::permits(&allowed_roles, &user) => {
                    return Ok(srv.call(req).await?.map_into_left_body());
                }
                Some(user) => {
                    info!(
                        "Access denied for user {} (role: {}) on {}. Allowed roles: {:?}",
                        user.id,
                        user.role,
                        req.path(),
                        allowed_roles
                    );
                    (StatusCode::FORBIDDEN, ErrorCode::Forbidden, "Access denied.")
                }
                None => {
                    info!(
                        "Role check failed: no authenticated user in request. Make sure RequireJWT middleware is applied first."
                    );
                    (
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                }
            };

            Ok(req.into_response(
                create_error_response(status, code, message).map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permits_only_listed_roles() {
        let faculty = RequireRole::new_any(UserRole::faculty_roles());
        let student = AuthUser {
            id: 1,
            role: UserRole::Student,
        };
        let admin = AuthUser {
            id: 2,
            role: UserRole::Admin,
        };
        assert!(!RequireRole::permits(&faculty.allowed_roles, &student));
        assert!(RequireRole::permits(&faculty.allowed_roles, &admin));

        let only_students = RequireRole::new(&UserRole::Student);
        assert!(RequireRole::permits(&only_students.allowed_roles, &student));
        assert!(!RequireRole::permits(&only_students.allowed_roles, &admin));
    }
}
