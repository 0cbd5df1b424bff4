use actix_web::{get, post, web, Responder};
use common::enums::Actor;
use common::error::AppError;
use common::models::req::SetCompensationReq;
use common::response::R;

use crate::state::AppState;

// 奖金比例配置 API

#[get("/api/compensation")]
pub async fn current(
    state: web::Data<AppState>,
    _actor: Actor,
) -> Result<impl Responder, AppError> {
    let setting = state.compensation_service.current().await?;
    R::success(setting)
}

#[post("/api/compensation")]
pub async fn set_compensation(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<SetCompensationReq>,
) -> Result<impl Responder, AppError> {
    let setting = state
        .compensation_service
        .set_compensation(&actor, req.into_inner())
        .await?;
    R::success(setting)
}
