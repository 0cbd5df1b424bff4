use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::constants::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
use crate::enums::{Actor, Role};
use crate::error::AppError;

/// 从网关注入的请求头提取当前操作者
///
/// 认证/会话由上游网关负责, 本服务只消费 id + 角色作为状态机门禁输入
impl FromRequest for Actor {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_actor(req))
    }
}

fn extract_actor(req: &HttpRequest) -> Result<Actor, AppError> {
    let id = req
        .headers()
        .get(ACTOR_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| AppError::auth("error.missing_actor"))?;

    let role = req
        .headers()
        .get(ACTOR_ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(Role::from_code)
        .ok_or_else(|| AppError::auth("error.missing_actor_role"))?;

    Ok(Actor::new(id, role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_actor() {
        let req = TestRequest::default()
            .insert_header((ACTOR_ID_HEADER, "42"))
            .insert_header((ACTOR_ROLE_HEADER, "cashier"))
            .to_http_request();
        let actor = extract_actor(&req).unwrap();
        assert_eq!(actor.id, 42);
        assert_eq!(actor.role, Role::Cashier);
    }

    #[test]
    fn test_missing_role_rejected() {
        let req = TestRequest::default()
            .insert_header((ACTOR_ID_HEADER, "42"))
            .to_http_request();
        assert!(extract_actor(&req).is_err());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let req = TestRequest::default()
            .insert_header((ACTOR_ID_HEADER, "42"))
            .insert_header((ACTOR_ROLE_HEADER, "root"))
            .to_http_request();
        assert!(extract_actor(&req).is_err());
    }
}
