use actix_web::{post, web, Responder};
use common::enums::Actor;
use common::error::AppError;
use common::models::req::{BulkPurchaseReq, CreatePurchaseReq, MarkPaidReq, ReleasePurchaseReq};
use common::response::R;

use crate::state::AppState;

// 销售订单 API

#[post("/api/purchase")]
pub async fn create_purchase(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<CreatePurchaseReq>,
) -> Result<impl Responder, AppError> {
    let purchase = state
        .purchase_service
        .create_purchase(&actor, req.into_inner())
        .await?;
    R::success(purchase)
}

#[post("/api/purchase/{id}/to-payment")]
pub async fn move_to_payment(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let purchase = state
        .purchase_service
        .move_to_payment(&actor, path.into_inner())
        .await?;
    R::success(purchase)
}

#[post("/api/purchase/{id}/mark-paid")]
pub async fn mark_as_paid(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<i64>,
    req: web::Json<MarkPaidReq>,
) -> Result<impl Responder, AppError> {
    let purchase = state
        .purchase_service
        .mark_as_paid(&actor, path.into_inner(), req.into_inner())
        .await?;
    R::success(purchase)
}

#[post("/api/purchase/{id}/release")]
pub async fn mark_as_released(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<i64>,
    req: web::Json<ReleasePurchaseReq>,
) -> Result<impl Responder, AppError> {
    let purchase = state
        .purchase_service
        .mark_as_released(&actor, path.into_inner(), req.into_inner())
        .await?;
    R::success(purchase)
}

#[post("/api/purchase/{id}/cancel")]
pub async fn cancel(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let purchase = state
        .purchase_service
        .cancel(&actor, path.into_inner())
        .await?;
    R::success(purchase)
}

#[post("/api/purchase/bulk/mark-paid")]
pub async fn bulk_mark_as_paid(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<BulkPurchaseReq>,
) -> Result<impl Responder, AppError> {
    let result = state
        .purchase_service
        .bulk_mark_as_paid(&actor, req.into_inner())
        .await?;
    R::success(result)
}

#[post("/api/purchase/bulk/release")]
pub async fn bulk_mark_as_released(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<BulkPurchaseReq>,
) -> Result<impl Responder, AppError> {
    let result = state
        .purchase_service
        .bulk_mark_as_released(&actor, req.into_inner())
        .await?;
    R::success(result)
}

#[post("/api/purchase/bulk/cancel")]
pub async fn bulk_cancel(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<BulkPurchaseReq>,
) -> Result<impl Responder, AppError> {
    let result = state
        .purchase_service
        .bulk_cancel(&actor, req.into_inner())
        .await?;
    R::success(result)
}
