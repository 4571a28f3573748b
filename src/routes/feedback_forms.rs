use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::feedback_forms::requests::{
    CreateFeedbackFormRequest, SubmitFeedbackRequest, UpdateFeedbackFormRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::FeedbackFormService;
use crate::utils::{SafeEventIdI64, SafeIDI64, SafeStudentIdI64};

// 懒加载的全局 FeedbackFormService 实例
static FEEDBACK_FORM_SERVICE: Lazy<FeedbackFormService> =
    Lazy::new(FeedbackFormService::new_lazy);

// 创建反馈表
pub async fn create_feedback_form(
    req: HttpRequest,
    body: web::Json<CreateFeedbackFormRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_FORM_SERVICE
        .create_form(&req, body.into_inner())
        .await
}

// 根据活动获取反馈表
pub async fn get_feedback_form_by_event(
    req: HttpRequest,
    path: SafeEventIdI64,
) -> ActixResult<HttpResponse> {
    FEEDBACK_FORM_SERVICE.get_form_by_event(&req, path.0).await
}

// 更新反馈表
pub async fn update_feedback_form(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateFeedbackFormRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_FORM_SERVICE
        .update_form(&req, path.0, body.into_inner())
        .await
}

// 删除反馈表
pub async fn delete_feedback_form(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    FEEDBACK_FORM_SERVICE.delete_form(&req, path.0).await
}

// 提交反馈
pub async fn submit_feedback(
    req: HttpRequest,
    body: web::Json<SubmitFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_FORM_SERVICE
        .submit_response(&req, body.into_inner())
        .await
}

// 查询学生是否已提交
pub async fn check_feedback_status(
    req: HttpRequest,
    event: SafeEventIdI64,
    student: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    FEEDBACK_FORM_SERVICE
        .check_status(&req, event.0, student.0)
        .await
}

// 表单的全部提交
pub async fn list_form_responses(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    FEEDBACK_FORM_SERVICE.list_form_responses(&req, path.0).await
}

// 活动的全部提交
pub async fn list_event_responses(
    req: HttpRequest,
    path: SafeEventIdI64,
) -> ActixResult<HttpResponse> {
    FEEDBACK_FORM_SERVICE
        .list_event_responses(&req, path.0)
        .await
}

// 表单统计
pub async fn get_feedback_summary(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    FEEDBACK_FORM_SERVICE.get_summary(&req, path.0).await
}

// 配置路由
pub fn configure_feedback_form_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/feedback-forms")
            .wrap(middlewares::RequireJWT)
            // 创建反馈表 - 仅教师和管理员
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_feedback_form)
                        .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                ),
            )
            // 提交反馈 - 仅学生
            .service(
                web::resource("/responses").route(
                    web::post()
                        .to(submit_feedback)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            // 获取活动的反馈表 - 所有登录用户可访问
            .service(
                web::resource("/event/{event_id}").route(web::get().to(get_feedback_form_by_event)),
            )
            // 提交状态 - 学生只能查询自己（业务层校验）
            .service(
                web::resource("/check/{event_id}/{student_id}")
                    .route(web::get().to(check_feedback_status)),
            )
            // 活动的全部提交 - 仅教师和管理员
            .service(
                web::resource("/responses/event/{event_id}")
                    .route(web::get().to(list_event_responses))
                    .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
            )
            .service(
                web::resource("/{id}")
                    // 更新反馈表 - 仅教师和管理员
                    .route(
                        web::put()
                            .to(update_feedback_form)
                            .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                    )
                    // 删除反馈表 - 仅教师和管理员
                    .route(
                        web::delete()
                            .to(delete_feedback_form)
                            .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
                    ),
            )
            // 表单的全部提交 - 仅教师和管理员
            .service(
                web::resource("/{id}/responses")
                    .route(web::get().to(list_form_responses))
                    .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
            )
            // 表单统计 - 仅教师和管理员
            .service(
                web::resource("/{id}/summary")
                    .route(web::get().to(get_feedback_summary))
                    .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles())),
            ),
    );
}
