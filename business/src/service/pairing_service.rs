use common::constants::{PAIRING_UNIT, PAIR_VALUE_BASE, PAIR_VALUE_DECAY};
use common::enums::{IncomeSource, Position};
use common::error::{AppError, AppResult};
use orm::entities::{AppGenealogyNode, AppIncomeHistory};
use rbatis::executor::RBatisTxExecutorGuard;
use rbatis::rbdc::datetime::DateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 双轨配对引擎
///
/// 安置事务内同步执行: 新节点的配对积分沿祖先链逐层入账,
/// 每个祖先行锁后更新左右区累积, 满一个配对单位即产生配对奖金
pub struct PairingService;

impl PairingService {
    /// 新节点入树时的配对积分, 随层级线性衰减, 最低为 0
    pub fn pair_value_for_level(level: i32) -> Decimal {
        let value = PAIR_VALUE_BASE - i64::from(level - 1) * PAIR_VALUE_DECAY;
        Decimal::from(value.max(0))
    }

    /// 配对结算: 返回 (配对次数, 结算后左区, 结算后右区)
    ///
    /// 两侧各消耗 pairs × 配对单位, 已消耗积分不再参与后续配对
    pub fn settle_pairs(left: Decimal, right: Decimal) -> (i64, Decimal, Decimal) {
        let unit = Decimal::from(PAIRING_UNIT);
        let matched = left.min(right);
        let pairs = (matched / unit).floor().to_i64().unwrap_or(0);
        let consumed = unit * Decimal::from(pairs);
        (pairs, left - consumed, right - consumed)
    }

    /// 将新节点的配对积分沿祖先链入账并结算
    ///
    /// upper_ids 下标 0 为直接父账户; 任一步出错则整个安置事务回滚
    pub async fn handle_new_placement(
        tx: &mut RBatisTxExecutorGuard,
        new_node: &AppGenealogyNode,
        upper_ids: &[i64],
        pairing_bonus: Decimal,
    ) -> AppResult<()> {
        let value = new_node.pair_value;
        if value <= Decimal::ZERO {
            return Ok(());
        }

        // 第一个祖先的路径子节点是新节点本身, 往上则是上一个祖先
        let mut path_position = new_node.position.clone();

        for (idx, ancestor_account_id) in upper_ids.iter().copied().enumerate() {
            let mut node = tx
                .query_decode::<Option<AppGenealogyNode>>(
                    "select * from app_genealogy_node where member_account_id = ? for update",
                    vec![rbs::value!(ancestor_account_id)],
                )
                .await?
                .ok_or_else(|| AppError::unknown("error.genealogy_node_missing"))?;

            let side = path_position
                .as_deref()
                .and_then(Position::from_code)
                .ok_or_else(|| AppError::unknown("error.genealogy_position_missing"))?;
            match side {
                Position::Left => node.left_carry += value,
                Position::Right => node.right_carry += value,
            }

            let (pairs, left_rest, right_rest) = Self::settle_pairs(node.left_carry, node.right_carry);
            node.left_carry = left_rest;
            node.right_carry = right_rest;
            AppGenealogyNode::update_by_map(
                tx,
                &node,
                rbs::value! {"member_account_id": ancestor_account_id},
            )
            .await?;

            if pairs > 0 && pairing_bonus > Decimal::ZERO {
                let income = AppIncomeHistory {
                    id: None,
                    member_account_id: ancestor_account_id,
                    source: Some(IncomeSource::Pairing.as_ref().to_string()),
                    amount: Some(pairing_bonus * Decimal::from(pairs)),
                    level: Some(idx as i32 + 1),
                    node_id: new_node.id,
                    description: Some(format!("配对奖金 x{}", pairs)),
                    create_time: Some(DateTime::now()),
                };
                AppIncomeHistory::insert(tx, &income).await?;
                log::info!(
                    "💰 账户 {} 触发 {} 次配对, 层距 {}",
                    ancestor_account_id,
                    pairs,
                    idx + 1
                );
            }

            path_position = node.position.clone();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_value_decay() {
        assert_eq!(PairingService::pair_value_for_level(1), Decimal::from(300));
        assert_eq!(PairingService::pair_value_for_level(2), Decimal::from(270));
        assert_eq!(PairingService::pair_value_for_level(5), Decimal::from(180));
        assert_eq!(PairingService::pair_value_for_level(11), Decimal::from(0));
        // 超过衰减边界后不会出现负积分
        assert_eq!(PairingService::pair_value_for_level(20), Decimal::from(0));
    }

    #[test]
    fn test_settle_no_pair_below_unit() {
        let (pairs, left, right) =
            PairingService::settle_pairs(Decimal::from(299), Decimal::from(900));
        assert_eq!(pairs, 0);
        assert_eq!(left, Decimal::from(299));
        assert_eq!(right, Decimal::from(900));
    }

    #[test]
    fn test_settle_single_pair() {
        let (pairs, left, right) =
            PairingService::settle_pairs(Decimal::from(300), Decimal::from(450));
        assert_eq!(pairs, 1);
        assert_eq!(left, Decimal::from(0));
        assert_eq!(right, Decimal::from(150));
    }

    #[test]
    fn test_settle_multiple_pairs() {
        let (pairs, left, right) =
            PairingService::settle_pairs(Decimal::from(950), Decimal::from(620));
        assert_eq!(pairs, 2);
        assert_eq!(left, Decimal::from(350));
        assert_eq!(right, Decimal::from(20));
    }

    #[test]
    fn test_settled_points_never_pair_twice() {
        // 结算后的剩余积分再次结算不产生新配对
        let (pairs, left, right) =
            PairingService::settle_pairs(Decimal::from(600), Decimal::from(600));
        assert_eq!(pairs, 2);
        let (again, _, _) = PairingService::settle_pairs(left, right);
        assert_eq!(again, 0);
    }
}
