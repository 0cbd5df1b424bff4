use actix_web::{get, post, web, Responder};
use common::enums::Actor;
use common::error::AppError;
use common::models::req::PlacementReq;
use common::response::R;

use crate::state::AppState;

// 族谱 API: 安置 + 只读查询

#[post("/api/genealogy/place")]
pub async fn place_member(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<PlacementReq>,
) -> Result<impl Responder, AppError> {
    let result = state
        .placement_service
        .place_member(&actor, req.into_inner())
        .await?;
    R::success(result)
}

#[get("/api/genealogy/{account_id}/downlines")]
pub async fn direct_downlines(
    state: web::Data<AppState>,
    _actor: Actor,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let nodes = state
        .genealogy_service
        .direct_downlines(path.into_inner())
        .await?;
    R::success(nodes)
}

#[get("/api/genealogy/{account_id}/upline")]
pub async fn upline(
    state: web::Data<AppState>,
    _actor: Actor,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let accounts = state.genealogy_service.upline_of(path.into_inner()).await?;
    R::success(accounts)
}
