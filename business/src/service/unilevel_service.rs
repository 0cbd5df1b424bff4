use std::collections::BTreeMap;

use common::constants::MAX_UNILEVEL_DEPTH;
use common::enums::IncomeSource;
use common::error::{AppError, AppResult};
use orm::entities::{AppCommission, AppMemberAccount, AppPurchase};
use rbatis::executor::RBatisTxExecutorGuard;
use rbatis::rbdc::datetime::DateTime;
use rust_decimal::Decimal;

/// 层级佣金引擎
///
/// 订单确认付款时在同一事务内触发一次; 同一订单重复触发通过
/// 已有佣金行检测直接跳过 (存储层唯一约束兜底)
pub struct UnilevelService;

/// 单层佣金计算结果: (受益账户, 层距, 比例, 金额)
pub type CascadeRow = (i64, i32, Decimal, Decimal);

impl UnilevelService {
    /// 纯计算: 订单金额按层级比例沿祖先链分摊
    ///
    /// ancestors 下标 0 为买家直接父账户; 比例为 0 或缺失的层级跳过
    pub fn cascade(
        total: Decimal,
        percents: &BTreeMap<i32, Decimal>,
        ancestors: &[i64],
    ) -> Vec<CascadeRow> {
        let hundred = Decimal::from(100);
        let mut rows = Vec::new();
        for (idx, account_id) in ancestors.iter().copied().enumerate() {
            let level = idx as i32 + 1;
            if level > MAX_UNILEVEL_DEPTH {
                break;
            }
            let percent = percents.get(&level).copied().unwrap_or(Decimal::ZERO);
            if percent <= Decimal::ZERO {
                continue;
            }
            rows.push((account_id, level, percent, total * percent / hundred));
        }
        rows
    }

    /// 至多一次判定: 订单名下已有任何佣金行即视为分发过
    pub fn already_distributed(existing: &[AppCommission]) -> bool {
        !existing.is_empty()
    }

    /// 为订单分发层级佣金, 返回写入的佣金行数
    pub async fn distribute_for_purchase(
        tx: &mut RBatisTxExecutorGuard,
        purchase: &AppPurchase,
        percents: &BTreeMap<i32, Decimal>,
    ) -> AppResult<usize> {
        let purchase_id = purchase
            .id
            .ok_or_else(|| AppError::unknown("error.purchase_id_missing"))?;

        let existing = AppCommission::select_by_purchase_id(tx, purchase_id).await?;
        if Self::already_distributed(&existing) {
            log::warn!("订单 {} 佣金已分发过, 跳过", purchase_id);
            return Ok(0);
        }

        let buyer = AppMemberAccount::select_by_id(tx, purchase.buyer_account_id)
            .await?
            .ok_or_else(|| AppError::not_found("error.buyer_account_not_found"))?;

        // 买家无祖先 (树根) 时产出 0 行, 不报错
        let rows = Self::cascade(purchase.total_amount, percents, &buyer.upper_node_ids());
        for (account_id, level, percent, amount) in &rows {
            let commission = AppCommission {
                id: None,
                member_account_id: *account_id,
                source: Some(IncomeSource::Unilevel.as_ref().to_string()),
                amount: Some(*amount),
                level: Some(*level),
                percent: Some(*percent),
                purchase_id,
                description: purchase.transaction_no.clone(),
                create_time: Some(DateTime::now()),
            };
            AppCommission::insert(tx, &commission).await?;
        }

        if !rows.is_empty() {
            log::info!("订单 {} 分发层级佣金 {} 行", purchase_id, rows.len());
        }
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percents(pairs: &[(i32, i64)]) -> BTreeMap<i32, Decimal> {
        pairs.iter().map(|(l, p)| (*l, Decimal::from(*p))).collect()
    }

    #[test]
    fn test_cascade_example() {
        // 1000 × {1:10, 2:5, 3:2} → 100 / 50 / 20
        let rows = UnilevelService::cascade(
            Decimal::from(1000),
            &percents(&[(1, 10), (2, 5), (3, 2)]),
            &[11, 22, 33],
        );
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], (11, 1, Decimal::from(10), Decimal::from(100)));
        assert_eq!(rows[1], (22, 2, Decimal::from(5), Decimal::from(50)));
        assert_eq!(rows[2], (33, 3, Decimal::from(2), Decimal::from(20)));
    }

    #[test]
    fn test_cascade_skips_zero_percent_levels() {
        let rows = UnilevelService::cascade(
            Decimal::from(1000),
            &percents(&[(1, 10), (3, 2)]),
            &[11, 22, 33],
        );
        // 第2层无比例: 跳过该层但不中断后续层级
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1, 1);
        assert_eq!(rows[1].1, 3);
    }

    #[test]
    fn test_cascade_shorter_chain_than_table() {
        let rows = UnilevelService::cascade(
            Decimal::from(500),
            &percents(&[(1, 10), (2, 5), (3, 2)]),
            &[11],
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].3, Decimal::from(50));
    }

    #[test]
    fn test_cascade_no_ancestors() {
        let rows = UnilevelService::cascade(
            Decimal::from(500),
            &percents(&[(1, 10)]),
            &[],
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn test_distribution_runs_at_most_once() {
        assert!(!UnilevelService::already_distributed(&[]));
        // 同一订单第二次触发时已有佣金行, 必须跳过
        let row = AppCommission {
            id: Some(1),
            member_account_id: 11,
            source: Some(IncomeSource::Unilevel.as_ref().to_string()),
            amount: Some(Decimal::from(100)),
            level: Some(1),
            percent: Some(Decimal::from(10)),
            purchase_id: 7,
            description: None,
            create_time: None,
        };
        assert!(UnilevelService::already_distributed(&[row]));
    }

    #[test]
    fn test_cascade_depth_bounded() {
        let chain: Vec<i64> = (1..=15).collect();
        let table: BTreeMap<i32, Decimal> =
            (1..=15).map(|l| (l, Decimal::from(1))).collect();
        let rows = UnilevelService::cascade(Decimal::from(100), &table, &chain);
        assert_eq!(rows.len(), MAX_UNILEVEL_DEPTH as usize);
    }
}
