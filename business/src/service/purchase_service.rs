use std::sync::Arc;

use common::enums::{Actor, PurchaseStatus, Role};
use common::error::{AppError, AppResult};
use common::models::dto::{BulkItemResult, BulkOpResult};
use common::models::req::{BulkPurchaseReq, CreatePurchaseReq, MarkPaidReq, ReleasePurchaseReq};
use common::mq::{Message, MessageQueue};
use common::utils::sequence_util;
use orm::entities::{AppMemberAccount, AppPurchase, AppPurchaseItem};
use rbatis::executor::RBatisTxExecutorGuard;
use rbatis::rbdc::datetime::DateTime;
use rbatis::RBatis;
use rust_decimal::Decimal;

use crate::service::compensation_service::CompensationService;
use crate::service::unilevel_service::UnilevelService;

/// 销售订单服务
///
/// 状态只前进不后退; 每次流转单独一个事务, 行锁 + 状态复查,
/// 提交后发布尽力而为的状态变更事件
#[derive(Clone)]
pub struct PurchaseService {
    rb: Arc<RBatis>,
    mq: Arc<MessageQueue>,
    compensation: CompensationService,
}

impl PurchaseService {
    pub fn new(rb: Arc<RBatis>, mq: Arc<MessageQueue>, compensation: CompensationService) -> Self {
        Self { rb, mq, compensation }
    }

    /// POS 下单: 校验明细、计算总额、生成交易号
    pub async fn create_purchase(
        &self,
        actor: &Actor,
        req: CreatePurchaseReq,
    ) -> AppResult<AppPurchase> {
        if !(actor.role == Role::Cashier || actor.role.is_admin()) {
            return Err(AppError::forbidden("error.cashier_only"));
        }
        if req.items.is_empty() {
            return Err(AppError::validation("validation.items_empty"));
        }
        for item in &req.items {
            if item.quantity < 1 {
                return Err(AppError::validation("validation.quantity_min"));
            }
            if item.unit_price < Decimal::ZERO {
                return Err(AppError::validation("validation.unit_price_negative"));
            }
        }

        AppMemberAccount::select_by_id(self.rb.as_ref(), req.buyer_account_id)
            .await?
            .ok_or_else(|| AppError::not_found("error.buyer_account_not_found"))?;

        let total_amount: Decimal = req
            .items
            .iter()
            .map(|i| i.unit_price * Decimal::from(i.quantity))
            .sum();

        let tx = self.rb.acquire_begin().await?;
        let mut tx = tx.defer_async(|mut tx| async move {
            if !tx.done() {
                let _ = tx.rollback().await;
                log::warn!("下单事务未提交, 已回滚");
            }
        });

        let purchase = AppPurchase {
            id: None,
            transaction_no: Some(sequence_util::generate_transaction_no("PUR")),
            cashier_id: Some(actor.id),
            buyer_account_id: req.buyer_account_id,
            total_amount,
            payment_method: Some(req.payment_method),
            status: Some(PurchaseStatus::Pending.get_code()),
            paid_time: None,
            released_time: None,
            received_by: None,
            source: Some(req.source),
            create_time: Some(DateTime::now()),
        };
        let ret = AppPurchase::insert(&tx, &purchase).await?;
        let purchase_id = ret
            .last_insert_id
            .as_i64()
            .ok_or_else(|| AppError::unknown("error.db_insert_id"))?;

        for item in &req.items {
            let row = AppPurchaseItem {
                id: None,
                purchase_id,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
                subtotal: item.unit_price * Decimal::from(item.quantity),
                create_time: Some(DateTime::now()),
            };
            AppPurchaseItem::insert(&tx, &row).await?;
        }

        tx.commit().await?;
        log::info!("🧾 订单 {} 创建, 金额 {}", purchase_id, total_amount);

        let mut created = purchase;
        created.id = Some(purchase_id);
        Ok(created)
    }

    /// pending → for_payment
    pub async fn move_to_payment(&self, actor: &Actor, purchase_id: i64) -> AppResult<AppPurchase> {
        self.transition(actor, purchase_id, PurchaseStatus::ForPayment, |p| {
            Self::guard_owner(actor, p)
        })
        .await
    }

    /// 确认付款: pending / for_payment → for_release, 同事务内分发层级佣金
    pub async fn mark_as_paid(
        &self,
        actor: &Actor,
        purchase_id: i64,
        req: MarkPaidReq,
    ) -> AppResult<AppPurchase> {
        let percents = self.compensation.percent_map().await?;

        let tx = self.rb.acquire_begin().await?;
        let mut tx = tx.defer_async(|mut tx| async move {
            if !tx.done() {
                let _ = tx.rollback().await;
                log::warn!("付款事务未提交, 已回滚");
            }
        });

        let mut purchase = Self::lock_purchase(&mut tx, purchase_id).await?;
        Self::guard_owner(actor, &purchase)?;
        let from = Self::status_of(&purchase)?;
        if !from.can_transition(PurchaseStatus::ForRelease) {
            return Err(AppError::business("error.status_conflict"));
        }

        purchase.status = Some(PurchaseStatus::ForRelease.get_code());
        purchase.paid_time = Some(DateTime::now());
        if let Some(method) = req.payment_method.filter(|m| !m.trim().is_empty()) {
            purchase.payment_method = Some(method);
        }
        AppPurchase::update_by_map(&tx, &purchase, rbs::value! {"id": purchase_id}).await?;

        UnilevelService::distribute_for_purchase(&mut tx, &purchase, &percents).await?;

        tx.commit().await?;
        self.publish_status_changed(purchase_id, from, PurchaseStatus::ForRelease)
            .await;
        Ok(purchase)
    }

    /// 放货完成: for_release → completed, 必须记录收货人
    pub async fn mark_as_released(
        &self,
        actor: &Actor,
        purchase_id: i64,
        req: ReleasePurchaseReq,
    ) -> AppResult<AppPurchase> {
        if !actor.role.can_release() {
            return Err(AppError::forbidden("error.cannot_release"));
        }
        let received_by = req.received_by.trim().to_string();
        if received_by.is_empty() {
            return Err(AppError::validation("validation.received_by_empty"));
        }

        self.transition_with(actor, purchase_id, PurchaseStatus::Completed, move |p| {
            p.released_time = Some(DateTime::now());
            p.received_by = Some(received_by.clone());
        })
        .await
    }

    /// 取消: 任意非终态 → cancelled
    pub async fn cancel(&self, actor: &Actor, purchase_id: i64) -> AppResult<AppPurchase> {
        self.transition(actor, purchase_id, PurchaseStatus::Cancelled, |p| {
            Self::guard_owner(actor, p)
        })
        .await
    }

    /// 批量确认付款, 逐单独立处理
    pub async fn bulk_mark_as_paid(
        &self,
        actor: &Actor,
        req: BulkPurchaseReq,
    ) -> AppResult<BulkOpResult> {
        let mut items = Vec::with_capacity(req.purchase_ids.len());
        for id in &req.purchase_ids {
            let result = self
                .mark_as_paid(actor, *id, MarkPaidReq { payment_method: req.payment_method.clone() })
                .await;
            items.push(Self::bulk_item(*id, result));
        }
        Ok(BulkOpResult::from_items(items))
    }

    /// 批量放货, 逐单独立处理
    pub async fn bulk_mark_as_released(
        &self,
        actor: &Actor,
        req: BulkPurchaseReq,
    ) -> AppResult<BulkOpResult> {
        let received_by = req
            .received_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::validation("validation.received_by_empty"))?
            .to_string();

        let mut items = Vec::with_capacity(req.purchase_ids.len());
        for id in &req.purchase_ids {
            let result = self
                .mark_as_released(
                    actor,
                    *id,
                    ReleasePurchaseReq { received_by: received_by.clone() },
                )
                .await;
            items.push(Self::bulk_item(*id, result));
        }
        Ok(BulkOpResult::from_items(items))
    }

    /// 批量取消, 逐单独立处理
    pub async fn bulk_cancel(&self, actor: &Actor, req: BulkPurchaseReq) -> AppResult<BulkOpResult> {
        let mut items = Vec::with_capacity(req.purchase_ids.len());
        for id in &req.purchase_ids {
            let result = self.cancel(actor, *id).await;
            items.push(Self::bulk_item(*id, result));
        }
        Ok(BulkOpResult::from_items(items))
    }

    fn bulk_item(id: i64, result: AppResult<AppPurchase>) -> BulkItemResult {
        match result {
            Ok(_) => BulkItemResult { id, success: true, reason: None },
            Err(e) => BulkItemResult {
                id,
                success: false,
                reason: Some(e.reason().to_string()),
            },
        }
    }

    /// 通用流转: 行锁 + 门禁 + 状态复查 + 更新 + 事件
    async fn transition(
        &self,
        actor: &Actor,
        purchase_id: i64,
        to: PurchaseStatus,
        guard: impl Fn(&AppPurchase) -> AppResult<()>,
    ) -> AppResult<AppPurchase> {
        let tx = self.rb.acquire_begin().await?;
        let mut tx = tx.defer_async(|mut tx| async move {
            if !tx.done() {
                let _ = tx.rollback().await;
                log::warn!("订单流转事务未提交, 已回滚");
            }
        });

        let mut purchase = Self::lock_purchase(&mut tx, purchase_id).await?;
        guard(&purchase)?;
        let from = Self::status_of(&purchase)?;
        if !from.can_transition(to) {
            return Err(AppError::business("error.status_conflict"));
        }
        purchase.status = Some(to.get_code());
        AppPurchase::update_by_map(&tx, &purchase, rbs::value! {"id": purchase_id}).await?;
        tx.commit().await?;

        self.publish_status_changed(purchase_id, from, to).await;
        Ok(purchase)
    }

    /// 放货专用流转: 校验已在入口完成, 附带字段修改
    async fn transition_with(
        &self,
        _actor: &Actor,
        purchase_id: i64,
        to: PurchaseStatus,
        apply: impl FnOnce(&mut AppPurchase),
    ) -> AppResult<AppPurchase> {
        let tx = self.rb.acquire_begin().await?;
        let mut tx = tx.defer_async(|mut tx| async move {
            if !tx.done() {
                let _ = tx.rollback().await;
                log::warn!("订单流转事务未提交, 已回滚");
            }
        });

        let mut purchase = Self::lock_purchase(&mut tx, purchase_id).await?;
        let from = Self::status_of(&purchase)?;
        if !from.can_transition(to) {
            return Err(AppError::business("error.status_conflict"));
        }
        purchase.status = Some(to.get_code());
        apply(&mut purchase);
        AppPurchase::update_by_map(&tx, &purchase, rbs::value! {"id": purchase_id}).await?;
        tx.commit().await?;

        self.publish_status_changed(purchase_id, from, to).await;
        Ok(purchase)
    }

    async fn lock_purchase(tx: &mut RBatisTxExecutorGuard, id: i64) -> AppResult<AppPurchase> {
        tx.query_decode::<Option<AppPurchase>>(
            "select * from app_purchase where id = ? for update",
            vec![rbs::value!(id)],
        )
        .await?
        .ok_or_else(|| AppError::not_found("error.purchase_not_found"))
    }

    fn status_of(purchase: &AppPurchase) -> AppResult<PurchaseStatus> {
        purchase
            .status
            .and_then(PurchaseStatus::from_code)
            .ok_or_else(|| AppError::unknown("error.purchase_status_corrupt"))
    }

    /// 订单归属门禁: 下单收银员本人或管理员
    fn guard_owner(actor: &Actor, purchase: &AppPurchase) -> AppResult<()> {
        if actor.role.is_admin() || purchase.cashier_id == Some(actor.id) {
            Ok(())
        } else {
            Err(AppError::forbidden("error.not_purchase_owner"))
        }
    }

    async fn publish_status_changed(&self, purchase_id: i64, from: PurchaseStatus, to: PurchaseStatus) {
        let message = Message::new(
            "purchase.status_changed",
            serde_json::json!({
                "purchase_id": purchase_id,
                "from": from.as_ref(),
                "to": to.as_ref(),
            }),
        );
        if let Err(e) = self.mq.publish(&message).await {
            log::warn!("订单状态事件发布失败 purchase_id={}: {}", purchase_id, e);
        }
    }
}
