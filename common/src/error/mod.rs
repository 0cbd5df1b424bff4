// 错误处理模块
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::response::R;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("Redis错误: {0}")]
    RedisError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("验证错误: {0}")]
    ValidationError(String),

    #[error("未授权: {0}")]
    Unauthorized(String),

    #[error("禁止访问: {0}")]
    Forbidden(String),

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("业务错误: {0}")]
    BusinessError(String),

    #[error("内部服务器错误: {0}")]
    InternalServerError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// 验证错误 (请求未通过参数校验, 不产生任何副作用)
    pub fn validation(reason: impl Into<String>) -> Self {
        AppError::ValidationError(reason.into())
    }

    /// 业务/状态冲突错误 (例如: pin 已被使用、状态机非法流转、余额不足)
    pub fn business(reason: impl Into<String>) -> Self {
        AppError::BusinessError(reason.into())
    }

    /// 认证错误
    pub fn auth(reason: impl Into<String>) -> Self {
        AppError::Unauthorized(reason.into())
    }

    /// 权限错误 (角色不符)
    pub fn forbidden(reason: impl Into<String>) -> Self {
        AppError::Forbidden(reason.into())
    }

    /// 资源不存在
    pub fn not_found(reason: impl Into<String>) -> Self {
        AppError::NotFound(reason.into())
    }

    pub fn database_error(msg: impl Into<String>) -> Self {
        AppError::DatabaseError(msg.into())
    }

    /// 未知内部错误
    pub fn unknown(reason: impl Into<String>) -> Self {
        AppError::InternalServerError(reason.into())
    }


    /// 稳定的机器可读错误原因 (响应体 msg 字段)
    pub fn reason(&self) -> &str {
        match self {
            AppError::DatabaseError(r)
            | AppError::RedisError(r)
            | AppError::ConfigError(r)
            | AppError::ValidationError(r)
            | AppError::Unauthorized(r)
            | AppError::Forbidden(r)
            | AppError::NotFound(r)
            | AppError::BusinessError(r)
            | AppError::InternalServerError(r) => r,
        }
    }
}

// 从 rbatis 错误转换 (rbatis::Error 包含了 rbdc::Error)
impl From<rbatis::Error> for AppError {
    fn from(err: rbatis::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

// 从 redis 错误转换
impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::RedisError(err.to_string())
    }
}

// 统一错误响应: 所有 handler 直接返回 Result<_, AppError>
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BusinessError(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("内部错误: {}", self);
        }
        let body: R<()> = R::error(status.as_u16(), self.reason().to_string());
        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_is_stable() {
        let e = AppError::business("error.pin_already_used");
        assert_eq!(e.reason(), "error.pin_already_used");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::validation("validation.amount").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::business("error.not_approvable").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::forbidden("error.role").status_code(),
            StatusCode::FORBIDDEN
        );
    }
}
