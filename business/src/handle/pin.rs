use actix_web::{post, web, Responder};
use common::enums::Actor;
use common::error::AppError;
use common::models::req::IssuePinReq;
use common::response::R;

use crate::state::AppState;

// 注册 pin 发放 API

#[post("/api/pin/issue")]
pub async fn issue_pin(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<IssuePinReq>,
) -> Result<impl Responder, AppError> {
    let pin = state.pin_service.issue_pin(&actor, req.into_inner()).await?;
    R::success(pin)
}
