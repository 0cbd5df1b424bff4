use std::sync::Arc;

use common::enums::{Actor, PinStatus, Role};
use common::error::{AppError, AppResult};
use common::models::req::IssuePinReq;
use common::utils::sequence_util;
use orm::entities::{AppMember, AppMemberAccount, AppMemberPin};
use rbatis::rbdc::datetime::DateTime;
use rbatis::RBatis;

/// 注册 pin 发放服务
///
/// pin 是一次性安置凭证: 发放时绑定预注册会员信息,
/// 推荐人账户可先不指定, 安置时回填
#[derive(Clone)]
pub struct PinService {
    rb: Arc<RBatis>,
}

impl PinService {
    pub fn new(rb: Arc<RBatis>) -> Self {
        Self { rb }
    }

    pub async fn issue_pin(&self, actor: &Actor, req: IssuePinReq) -> AppResult<AppMemberPin> {
        if !(actor.role == Role::Cashier || actor.role.is_admin()) {
            return Err(AppError::forbidden("error.cashier_only"));
        }
        let email = req.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("validation.email"));
        }

        AppMember::select_by_id(self.rb.as_ref(), req.member_id)
            .await?
            .ok_or_else(|| AppError::not_found("error.member_not_found"))?;

        if let Some(sponsor_account_id) = req.sponsor_account_id {
            AppMemberAccount::select_by_id(self.rb.as_ref(), sponsor_account_id)
                .await?
                .ok_or_else(|| AppError::not_found("error.sponsor_account_not_found"))?;
        }

        let mut pin = AppMemberPin {
            id: None,
            sponsor_account_id: req.sponsor_account_id,
            transaction_no: Some(sequence_util::generate_transaction_no("PIN")),
            payment_method: Some(req.payment_method),
            member_id: Some(req.member_id),
            email: Some(email),
            pin_code: sequence_util::generate_pin_code(),
            status: Some(PinStatus::Unused.get_code()),
            used_time: None,
            create_time: Some(DateTime::now()),
        };
        let ret = AppMemberPin::insert(self.rb.as_ref(), &pin).await?;
        pin.id = ret.last_insert_id.as_i64();

        log::info!("🎫 发放注册 pin {:?} 给会员 {}", pin.id, req.member_id);
        Ok(pin)
    }
}
