use std::sync::Arc;

use common::constants::{sequence_kinds, MIN_ENCASHMENT_AMOUNT};
use common::enums::{Actor, EncashmentStatus, PaymentType, Role};
use common::error::{AppError, AppResult};
use common::models::req::{
    CreateEncashmentReq, ProcessEncashmentReq, RejectEncashmentReq, ReleaseEncashmentReq,
};
use common::mq::{Message, MessageQueue};
use common::utils::sequence_util;
use orm::entities::{AppEncashment, AppMember, AppSequenceCounter};
use rbatis::executor::RBatisTxExecutorGuard;
use rbatis::rbdc::datetime::DateTime;
use rbatis::RBatis;
use rust_decimal::Decimal;

use crate::service::balance_service::BalanceService;

/// 提现审批服务
///
/// pending → approved → processed → released, rejected 仅从 pending 进入;
/// 每次流转单独一个事务, 行锁 + 状态复查, 非法流转不落任何数据
#[derive(Clone)]
pub struct EncashmentService {
    rb: Arc<RBatis>,
    mq: Arc<MessageQueue>,
}

impl EncashmentService {
    pub fn new(rb: Arc<RBatis>, mq: Arc<MessageQueue>) -> Self {
        Self { rb, mq }
    }

    /// 会员发起提现申请
    ///
    /// 余额校验在事务内完成: 先锁会员行串行化同一会员的并发申请,
    /// 再读余额, 防止两笔同时通过校验导致超提
    pub async fn create(&self, actor: &Actor, req: CreateEncashmentReq) -> AppResult<AppEncashment> {
        if actor.role != Role::Member {
            return Err(AppError::forbidden("error.member_only"));
        }
        if req.amount < MIN_ENCASHMENT_AMOUNT {
            return Err(AppError::validation("validation.amount_below_minimum"));
        }
        let payment_type = PaymentType::from_code(&req.payment_type)
            .ok_or_else(|| AppError::validation("validation.payment_type"))?;

        let tx = self.rb.acquire_begin().await?;
        let mut tx = tx.defer_async(|mut tx| async move {
            if !tx.done() {
                let _ = tx.rollback().await;
                log::warn!("提现申请事务未提交, 已回滚");
            }
        });

        let _member = tx
            .query_decode::<Option<AppMember>>(
                "select * from app_member where id = ? for update",
                vec![rbs::value!(actor.id)],
            )
            .await?
            .ok_or_else(|| AppError::not_found("error.member_not_found"))?;

        let available = BalanceService::available_balance(&tx, actor.id).await?;
        Self::ensure_amount_covered(req.amount, available)?;

        let (year, month, seq) = Self::next_sequence(&mut tx, sequence_kinds::ENCASHMENT).await?;
        let mut encashment = AppEncashment {
            id: None,
            member_id: actor.id,
            encashment_no: Some(sequence_util::format_encashment_no(year, month, seq)),
            amount: req.amount,
            status: Some(EncashmentStatus::Pending.get_code()),
            member_notes: req.member_notes,
            admin_notes: None,
            accounting_notes: None,
            cashier_notes: None,
            voucher_no: None,
            payment_type: Some(payment_type.as_ref().to_string()),
            approved_by: None,
            approved_time: None,
            processed_by: None,
            processed_time: None,
            released_by: None,
            released_time: None,
            received_by_name: None,
            received_time: None,
            rejected_by: None,
            rejected_time: None,
            rejection_reason: None,
            create_time: Some(DateTime::now()),
        };
        let ret = AppEncashment::insert(&tx, &encashment).await?;
        encashment.id = ret.last_insert_id.as_i64();

        tx.commit().await?;
        log::info!(
            "💵 会员 {} 提现申请 {}, 金额 {}",
            actor.id,
            encashment.encashment_no.as_deref().unwrap_or("-"),
            req.amount
        );

        self.publish_status_changed(&encashment, None, EncashmentStatus::Pending)
            .await;
        Ok(encashment)
    }

    /// 审批通过 (管理员): pending → approved
    pub async fn approve(
        &self,
        actor: &Actor,
        encashment_id: i64,
        admin_notes: Option<String>,
    ) -> AppResult<AppEncashment> {
        if !actor.role.is_admin() {
            return Err(AppError::forbidden("error.admin_only"));
        }
        self.transition(
            encashment_id,
            EncashmentStatus::Approved,
            "error.not_approvable",
            |e| {
                e.approved_by = Some(actor.id);
                e.approved_time = Some(DateTime::now());
                if admin_notes.is_some() {
                    e.admin_notes = admin_notes;
                }
                Ok(())
            },
        )
        .await
    }

    /// 驳回 (管理员): pending → rejected, 原因必填
    pub async fn reject(
        &self,
        actor: &Actor,
        encashment_id: i64,
        req: RejectEncashmentReq,
    ) -> AppResult<AppEncashment> {
        if !actor.role.is_admin() {
            return Err(AppError::forbidden("error.admin_only"));
        }
        let reason = req.reason.trim().to_string();
        if reason.is_empty() {
            return Err(AppError::validation("validation.rejection_reason_empty"));
        }
        self.transition(
            encashment_id,
            EncashmentStatus::Rejected,
            "error.not_rejectable",
            |e| {
                e.rejected_by = Some(actor.id);
                e.rejected_time = Some(DateTime::now());
                e.rejection_reason = Some(reason);
                if req.admin_notes.is_some() {
                    e.admin_notes = req.admin_notes;
                }
                Ok(())
            },
        )
        .await
    }

    /// 财务处理 (会计): approved → processed, 生成付款凭证号
    pub async fn process(
        &self,
        actor: &Actor,
        encashment_id: i64,
        req: ProcessEncashmentReq,
    ) -> AppResult<AppEncashment> {
        if !actor.role.can_process_encashment() {
            return Err(AppError::forbidden("error.accounting_only"));
        }
        let override_type = match req.payment_type.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => Some(
                PaymentType::from_code(code)
                    .ok_or_else(|| AppError::validation("validation.payment_type"))?,
            ),
            _ => None,
        };

        let tx = self.rb.acquire_begin().await?;
        let mut tx = tx.defer_async(|mut tx| async move {
            if !tx.done() {
                let _ = tx.rollback().await;
                log::warn!("提现处理事务未提交, 已回滚");
            }
        });

        let mut encashment = Self::lock_by_id(&mut tx, encashment_id).await?;
        let from = Self::status_of(&encashment)?;
        if !from.can_transition(EncashmentStatus::Processed) {
            return Err(AppError::business("error.not_processable"));
        }

        let (year, month, seq) = Self::next_sequence(&mut tx, sequence_kinds::VOUCHER).await?;
        encashment.status = Some(EncashmentStatus::Processed.get_code());
        encashment.voucher_no = Some(sequence_util::format_voucher_no(year, month, seq));
        encashment.processed_by = Some(actor.id);
        encashment.processed_time = Some(DateTime::now());
        if let Some(payment_type) = override_type {
            encashment.payment_type = Some(payment_type.as_ref().to_string());
        }
        if req.accounting_notes.is_some() {
            encashment.accounting_notes = req.accounting_notes;
        }
        AppEncashment::update_by_map(&tx, &encashment, rbs::value! {"id": encashment_id}).await?;
        tx.commit().await?;

        self.publish_status_changed(&encashment, Some(from), EncashmentStatus::Processed)
            .await;
        Ok(encashment)
    }

    /// 放款 (柜台/管理员): processed → released, 领款人必填
    pub async fn release(
        &self,
        actor: &Actor,
        encashment_id: i64,
        req: ReleaseEncashmentReq,
    ) -> AppResult<AppEncashment> {
        if !actor.role.can_release_encashment() {
            return Err(AppError::forbidden("error.cannot_release"));
        }
        let received_by = req.received_by_name.trim().to_string();
        if received_by.is_empty() {
            return Err(AppError::validation("validation.received_by_empty"));
        }
        self.transition(
            encashment_id,
            EncashmentStatus::Released,
            "error.not_releasable",
            |e| {
                e.released_by = Some(actor.id);
                e.released_time = Some(DateTime::now());
                e.received_by_name = Some(received_by);
                e.received_time = Some(DateTime::now());
                if req.cashier_notes.is_some() {
                    e.cashier_notes = req.cashier_notes;
                }
                Ok(())
            },
        )
        .await
    }

    /// 会员自己的提现申请列表
    pub async fn list_for_member(&self, actor: &Actor, member_id: i64) -> AppResult<Vec<AppEncashment>> {
        if actor.role == Role::Member && actor.id != member_id {
            return Err(AppError::forbidden("error.not_own_encashment"));
        }
        Ok(AppEncashment::select_by_member_id(self.rb.as_ref(), member_id).await?)
    }

    /// 通用流转: 行锁 + 状态复查 + 字段修改 + 事件
    async fn transition(
        &self,
        encashment_id: i64,
        to: EncashmentStatus,
        conflict_reason: &str,
        apply: impl FnOnce(&mut AppEncashment) -> AppResult<()>,
    ) -> AppResult<AppEncashment> {
        let tx = self.rb.acquire_begin().await?;
        let mut tx = tx.defer_async(|mut tx| async move {
            if !tx.done() {
                let _ = tx.rollback().await;
                log::warn!("提现流转事务未提交, 已回滚");
            }
        });

        let mut encashment = Self::lock_by_id(&mut tx, encashment_id).await?;
        let from = Self::status_of(&encashment)?;
        if !from.can_transition(to) {
            return Err(AppError::business(conflict_reason));
        }
        encashment.status = Some(to.get_code());
        apply(&mut encashment)?;
        AppEncashment::update_by_map(&tx, &encashment, rbs::value! {"id": encashment_id}).await?;
        tx.commit().await?;

        self.publish_status_changed(&encashment, Some(from), to).await;
        Ok(encashment)
    }

    async fn lock_by_id(tx: &mut RBatisTxExecutorGuard, id: i64) -> AppResult<AppEncashment> {
        tx.query_decode::<Option<AppEncashment>>(
            "select * from app_encashment where id = ? for update",
            vec![rbs::value!(id)],
        )
        .await?
        .ok_or_else(|| AppError::not_found("error.encashment_not_found"))
    }

    /// 申请金额不得超过锁定会员行后读到的可提余额
    fn ensure_amount_covered(amount: Decimal, available: Decimal) -> AppResult<()> {
        if amount > available {
            return Err(AppError::business("error.insufficient_balance"));
        }
        Ok(())
    }

    fn status_of(encashment: &AppEncashment) -> AppResult<EncashmentStatus> {
        encashment
            .status
            .and_then(EncashmentStatus::from_code)
            .ok_or_else(|| AppError::unknown("error.encashment_status_corrupt"))
    }

    /// 单号序列: (kind, 年, 月) 一行, FOR UPDATE 串行递增
    ///
    /// 当月首号走插入, (kind, year, month) 唯一约束兜底并发首插
    async fn next_sequence(
        tx: &mut RBatisTxExecutorGuard,
        kind: &str,
    ) -> AppResult<(i32, u32, i64)> {
        let (year, month) = sequence_util::current_year_month();
        let row = tx
            .query_decode::<Option<AppSequenceCounter>>(
                "select * from app_sequence_counter \
                 where kind = ? and year = ? and month = ? for update",
                vec![
                    rbs::value!(kind),
                    rbs::value!(year),
                    rbs::value!(month as i32),
                ],
            )
            .await?;

        let next = match row {
            Some(mut counter) => {
                counter.value += 1;
                AppSequenceCounter::update_by_map(tx, &counter, rbs::value! {"id": counter.id})
                    .await?;
                counter.value
            }
            None => {
                let counter = AppSequenceCounter {
                    id: None,
                    kind: kind.to_string(),
                    year,
                    month: month as i32,
                    value: 1,
                };
                AppSequenceCounter::insert(tx, &counter).await?;
                1
            }
        };
        Ok((year, month, next))
    }

    async fn publish_status_changed(
        &self,
        encashment: &AppEncashment,
        from: Option<EncashmentStatus>,
        to: EncashmentStatus,
    ) {
        let message = Message::new(
            "encashment.status_changed",
            serde_json::json!({
                "encashment_id": encashment.id,
                "encashment_no": encashment.encashment_no,
                "member_id": encashment.member_id,
                "from": from.map(|s| s.as_ref().to_string()),
                "to": to.as_ref(),
            }),
        );
        if let Err(e) = self.mq.publish(&message).await {
            log::warn!(
                "提现状态事件发布失败 encashment_id={:?}: {}",
                encashment.id,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_over_available_rejected() {
        let err = EncashmentService::ensure_amount_covered(
            Decimal::from(501),
            Decimal::from(500),
        )
        .unwrap_err();
        assert_eq!(err.reason(), "error.insufficient_balance");
    }

    #[test]
    fn test_amount_within_available_passes() {
        // 恰好等于可提余额允许通过
        assert!(EncashmentService::ensure_amount_covered(
            Decimal::from(500),
            Decimal::from(500)
        )
        .is_ok());
        assert!(EncashmentService::ensure_amount_covered(
            Decimal::new(49950, 2),
            Decimal::from(500)
        )
        .is_ok());
    }
}
