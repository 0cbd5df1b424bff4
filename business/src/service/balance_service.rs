use common::enums::EncashmentStatus;
use common::error::AppResult;
use rbatis::executor::Executor;
use rust_decimal::Decimal;

/// 会员余额服务
///
/// 余额是派生量: 配对收益 + 层级佣金 - 已占用的提现金额,
/// 不单独落库; 提现余额校验在提现事务内调用保证读到锁内一致快照
pub struct BalanceService;

impl BalanceService {
    /// 累计收益 = 配对收益 + 层级佣金 (会员名下全部账户)
    pub async fn total_income(executor: &dyn Executor, member_id: i64) -> AppResult<Decimal> {
        let pairing: Decimal = Self::sum(
            executor,
            "select coalesce(sum(h.amount), 0) as total from app_income_history h \
             join app_member_account a on a.id = h.member_account_id \
             where a.member_id = ?",
            member_id,
        )
        .await?;

        let unilevel: Decimal = Self::sum(
            executor,
            "select coalesce(sum(c.amount), 0) as total from app_commission c \
             join app_member_account a on a.id = c.member_account_id \
             where a.member_id = ?",
            member_id,
        )
        .await?;

        Ok(pairing + unilevel)
    }

    /// 已占用的提现金额 (驳回/取消的申请不占余额)
    pub async fn total_encashed(executor: &dyn Executor, member_id: i64) -> AppResult<Decimal> {
        let v = executor
            .query(
                "select coalesce(sum(amount), 0) as total from app_encashment \
                 where member_id = ? and status not in (?, ?)",
                vec![
                    rbs::value!(member_id),
                    rbs::value!(EncashmentStatus::Rejected.get_code()),
                    rbs::value!(EncashmentStatus::Cancelled.get_code()),
                ],
            )
            .await?;
        Ok(rbatis::decode(v)?)
    }

    /// 可提现余额
    pub async fn available_balance(executor: &dyn Executor, member_id: i64) -> AppResult<Decimal> {
        let income = Self::total_income(executor, member_id).await?;
        let encashed = Self::total_encashed(executor, member_id).await?;
        Ok(income - encashed)
    }

    async fn sum(executor: &dyn Executor, sql: &str, member_id: i64) -> AppResult<Decimal> {
        let v = executor.query(sql, vec![rbs::value!(member_id)]).await?;
        Ok(rbatis::decode(v)?)
    }
}
