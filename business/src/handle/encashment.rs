use actix_web::{get, post, web, Responder};
use common::enums::Actor;
use common::error::AppError;
use common::models::req::{
    CreateEncashmentReq, ProcessEncashmentReq, RejectEncashmentReq, ReleaseEncashmentReq,
};
use common::response::R;
use serde::Deserialize;

use crate::state::AppState;

// 提现审批 API

#[derive(Debug, Deserialize)]
pub struct ApproveReq {
    pub admin_notes: Option<String>,
}

#[post("/api/encashment")]
pub async fn create(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<CreateEncashmentReq>,
) -> Result<impl Responder, AppError> {
    let encashment = state
        .encashment_service
        .create(&actor, req.into_inner())
        .await?;
    R::success(encashment)
}

#[post("/api/encashment/{id}/approve")]
pub async fn approve(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<i64>,
    req: web::Json<ApproveReq>,
) -> Result<impl Responder, AppError> {
    let encashment = state
        .encashment_service
        .approve(&actor, path.into_inner(), req.into_inner().admin_notes)
        .await?;
    R::success(encashment)
}

#[post("/api/encashment/{id}/reject")]
pub async fn reject(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<i64>,
    req: web::Json<RejectEncashmentReq>,
) -> Result<impl Responder, AppError> {
    let encashment = state
        .encashment_service
        .reject(&actor, path.into_inner(), req.into_inner())
        .await?;
    R::success(encashment)
}

#[post("/api/encashment/{id}/process")]
pub async fn process(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<i64>,
    req: web::Json<ProcessEncashmentReq>,
) -> Result<impl Responder, AppError> {
    let encashment = state
        .encashment_service
        .process(&actor, path.into_inner(), req.into_inner())
        .await?;
    R::success(encashment)
}

#[post("/api/encashment/{id}/release")]
pub async fn release(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<i64>,
    req: web::Json<ReleaseEncashmentReq>,
) -> Result<impl Responder, AppError> {
    let encashment = state
        .encashment_service
        .release(&actor, path.into_inner(), req.into_inner())
        .await?;
    R::success(encashment)
}

#[get("/api/encashment/member/{member_id}")]
pub async fn list_for_member(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let list = state
        .encashment_service
        .list_for_member(&actor, path.into_inner())
        .await?;
    R::success(list)
}
