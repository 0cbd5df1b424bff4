use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use common::enums::{Actor, PinStatus, Position};
use common::error::{AppError, AppResult};
use common::models::dto::PlacementResult;
use common::models::req::PlacementReq;
use common::mq::{Message, MessageQueue};
use orm::entities::{AppGenealogyNode, AppMember, AppMemberAccount, AppMemberPin};
use rbatis::executor::RBatisTxExecutorGuard;
use rbatis::rbdc::datetime::DateTime;
use rbatis::RBatis;
use rust_decimal::Decimal;

use crate::service::compensation_service::CompensationService;
use crate::service::pairing_service::PairingService;

/// 找空位时的遍历节点数上限 (防御数据异常导致的环)
const MAX_SLOT_SEARCH_NODES: usize = 1 << 20;

/// 某账户节点下左右子账户占用情况
#[derive(Debug, Clone, Default)]
pub struct SlotChildren {
    pub left: Option<i64>,
    pub right: Option<i64>,
}

/// 双轨树子节点查询抽象
///
/// actix worker 内单线程执行, 不要求 Send (事务执行器跨 await 持有)
#[async_trait(?Send)]
pub trait GenealogyLookup {
    async fn children_of(&self, account_id: i64) -> AppResult<SlotChildren>;
}

/// 空位: 安置父账户 + 槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSlot {
    pub parent_account_id: i64,
    pub position: Position,
}

/// 从起点账户往下逐层找第一个空位, 同层恒先左后右
///
/// 同一棵树同一起点的结果是确定的: 广度优先队列按 (层序, 左右) 出队
pub async fn find_open_slot(
    lookup: &dyn GenealogyLookup,
    start_account_id: i64,
) -> AppResult<OpenSlot> {
    let mut queue = VecDeque::from([start_account_id]);
    let mut visited = 0usize;

    while let Some(account_id) = queue.pop_front() {
        visited += 1;
        if visited > MAX_SLOT_SEARCH_NODES {
            break;
        }

        let children = lookup.children_of(account_id).await?;
        let (left, right) = match (children.left, children.right) {
            (None, _) => {
                return Ok(OpenSlot {
                    parent_account_id: account_id,
                    position: Position::Left,
                })
            }
            (Some(_), None) => {
                return Ok(OpenSlot {
                    parent_account_id: account_id,
                    position: Position::Right,
                })
            }
            (Some(left), Some(right)) => (left, right),
        };
        queue.push_back(left);
        queue.push_back(right);
    }

    Err(AppError::business("error.no_available_slot"))
}

/// 事务内的子节点查询 (安置事务使用)
struct TxGenealogyLookup<'a> {
    tx: &'a RBatisTxExecutorGuard,
}

#[async_trait(?Send)]
impl<'a> GenealogyLookup for TxGenealogyLookup<'a> {
    async fn children_of(&self, account_id: i64) -> AppResult<SlotChildren> {
        let rows = AppGenealogyNode::select_children(self.tx, account_id).await?;
        let mut children = SlotChildren::default();
        for row in rows {
            match row.position.as_deref().and_then(Position::from_code) {
                Some(Position::Left) => children.left = Some(row.member_account_id),
                Some(Position::Right) => children.right = Some(row.member_account_id),
                None => {
                    return Err(AppError::unknown("error.genealogy_position_missing"));
                }
            }
        }
        Ok(children)
    }
}

/// 安置服务
///
/// 消费一次性注册 pin, 将预注册会员安置进双轨树,
/// 账户/节点创建、会员激活、pin 消费、配对入账在同一事务内完成
#[derive(Clone)]
pub struct PlacementService {
    rb: Arc<RBatis>,
    mq: Arc<MessageQueue>,
    compensation: CompensationService,
}

impl PlacementService {
    pub fn new(rb: Arc<RBatis>, mq: Arc<MessageQueue>, compensation: CompensationService) -> Self {
        Self { rb, mq, compensation }
    }

    pub async fn place_member(
        &self,
        actor: &Actor,
        req: PlacementReq,
    ) -> AppResult<PlacementResult> {
        let account_name = req.account_name.trim();
        if account_name.is_empty() {
            return Err(AppError::validation("validation.account_name_empty"));
        }

        // 推荐人必须已在树内
        let sponsor_account = AppMemberAccount::select_by_id(self.rb.as_ref(), req.sponsor_account_id)
            .await?
            .ok_or_else(|| AppError::not_found("error.sponsor_account_not_found"))?;
        AppGenealogyNode::select_by_account_id(self.rb.as_ref(), req.sponsor_account_id)
            .await?
            .ok_or_else(|| AppError::business("error.sponsor_not_placed"))?;

        if AppMemberAccount::select_by_account_name(self.rb.as_ref(), account_name)
            .await?
            .is_some()
        {
            return Err(AppError::validation("validation.account_name_taken"));
        }

        let pairing_bonus = self.compensation.pairing_bonus().await?;

        let tx = self.rb.acquire_begin().await?;
        let mut tx = tx.defer_async(|mut tx| async move {
            if !tx.done() {
                let _ = tx.rollback().await;
                log::warn!("安置事务未提交, 已回滚");
            }
        });

        // pin 行锁 + 状态复查: unused → used 只允许发生一次
        let mut pin = tx
            .query_decode::<Option<AppMemberPin>>(
                "select * from app_member_pin where id = ? for update",
                vec![rbs::value!(req.pin_id)],
            )
            .await?
            .ok_or_else(|| AppError::not_found("error.pin_not_found"))?;
        Self::ensure_pin_unused(&pin)?;

        // pin 归属校验: 已归属的 pin 只能由同一会员名下的推荐账户消费
        if let Some(pin_sponsor_id) = pin.sponsor_account_id {
            let pin_sponsor = AppMemberAccount::select_by_id(&tx, pin_sponsor_id)
                .await?
                .ok_or_else(|| AppError::business("error.pin_not_authorized"))?;
            if pin_sponsor.member_id != sponsor_account.member_id {
                return Err(AppError::business("error.pin_not_authorized"));
            }
        }

        let member_id = pin
            .member_id
            .ok_or_else(|| AppError::business("error.incomplete_member_profile"))?;
        let mut member = AppMember::select_by_id(&tx, member_id)
            .await?
            .ok_or_else(|| AppError::business("error.incomplete_member_profile"))?;
        if member.full_name.as_deref().unwrap_or("").trim().is_empty() {
            return Err(AppError::business("error.incomplete_member_profile"));
        }

        let lookup = TxGenealogyLookup { tx: &tx };
        let slot = find_open_slot(&lookup, sponsor_account.id.unwrap_or(req.sponsor_account_id))
            .await?;

        let parent_account = if slot.parent_account_id == req.sponsor_account_id {
            sponsor_account.clone()
        } else {
            AppMemberAccount::select_by_id(&tx, slot.parent_account_id)
                .await?
                .ok_or_else(|| AppError::unknown("error.placement_parent_missing"))?
        };
        let parent_node = AppGenealogyNode::select_by_account_id(&tx, slot.parent_account_id)
            .await?
            .ok_or_else(|| AppError::unknown("error.genealogy_node_missing"))?;
        let level = parent_node.level + 1;

        // 祖先链头插: [安置父, ...安置父的祖先]
        let mut upper_ids = vec![slot.parent_account_id];
        upper_ids.extend(parent_account.upper_node_ids());

        let account = AppMemberAccount {
            id: None,
            member_id,
            account_name: account_name.to_string(),
            sponsor_id: Some(req.sponsor_account_id),
            under_account_id: Some(slot.parent_account_id),
            node_label: Some(format!("L{}", level)),
            upper_nodes: Some(AppMemberAccount::encode_upper_nodes(&upper_ids)),
            member_type: Some(
                (if req.is_extension { "extension" } else { "regular" }).to_string(),
            ),
            package_type: pin.payment_method.clone(),
            create_time: Some(DateTime::now()),
        };
        let ret = AppMemberAccount::insert(&tx, &account).await?;
        let account_id = ret
            .last_insert_id
            .as_i64()
            .ok_or_else(|| AppError::unknown("error.db_insert_id"))?;

        let node = AppGenealogyNode {
            id: None,
            user_id: member.user_id,
            member_id,
            member_account_id: account_id,
            parent_account_id: Some(slot.parent_account_id),
            position: Some(slot.position.as_ref().to_string()),
            level,
            pair_value: PairingService::pair_value_for_level(level),
            left_carry: Decimal::ZERO,
            right_carry: Decimal::ZERO,
            create_time: Some(DateTime::now()),
        };
        let ret = AppGenealogyNode::insert(&tx, &node).await?;
        let node_id = ret
            .last_insert_id
            .as_i64()
            .ok_or_else(|| AppError::unknown("error.db_insert_id"))?;
        let node = AppGenealogyNode { id: Some(node_id), ..node };

        // 会员激活 (扩展账户的会员本就是激活态, 置位幂等)
        member.status = Some(AppMember::STATUS_ACTIVE);
        AppMember::update_by_map(&tx, &member, rbs::value! {"id": member_id}).await?;

        // pin 消费: 置已用, 未归属的回填实际安置父账户
        pin.status = Some(PinStatus::Used.get_code());
        pin.used_time = Some(DateTime::now());
        if pin.sponsor_account_id.is_none() {
            pin.sponsor_account_id = Some(slot.parent_account_id);
        }
        AppMemberPin::update_by_map(&tx, &pin, rbs::value! {"id": req.pin_id}).await?;

        PairingService::handle_new_placement(&mut tx, &node, &upper_ids, pairing_bonus).await?;

        tx.commit().await?;

        let message = Message::new(
            "genealogy.placed",
            serde_json::json!({
                "account_id": account_id,
                "node_id": node_id,
                "parent_account_id": slot.parent_account_id,
                "position": slot.position.as_ref(),
                "level": level,
                "operator_id": actor.id,
            }),
        );
        if let Err(e) = self.mq.publish(&message).await {
            log::warn!("安置事件发布失败 account_id={}: {}", account_id, e);
        }

        log::info!(
            "🌳 账户 {} 安置于 {} 的 {} 位, 层级 {}",
            account_id,
            slot.parent_account_id,
            slot.position.as_ref(),
            level
        );

        Ok(PlacementResult {
            genealogy_node_id: node_id,
            account_id,
            position: slot.position.as_ref().to_string(),
            level,
        })
    }

    /// 行锁后的状态复查: 只有 unused 的 pin 才能被消费
    fn ensure_pin_unused(pin: &AppMemberPin) -> AppResult<()> {
        if pin.status != Some(PinStatus::Unused.get_code()) {
            return Err(AppError::business("error.pin_already_used"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapLookup(HashMap<i64, SlotChildren>);

    #[async_trait(?Send)]
    impl GenealogyLookup for MapLookup {
        async fn children_of(&self, account_id: i64) -> AppResult<SlotChildren> {
            Ok(self.0.get(&account_id).cloned().unwrap_or_default())
        }
    }

    fn tree(entries: &[(i64, Option<i64>, Option<i64>)]) -> MapLookup {
        MapLookup(
            entries
                .iter()
                .map(|(id, l, r)| (*id, SlotChildren { left: *l, right: *r }))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_empty_start_takes_left() {
        let lookup = tree(&[]);
        let slot = find_open_slot(&lookup, 1).await.unwrap();
        assert_eq!(slot, OpenSlot { parent_account_id: 1, position: Position::Left });
    }

    #[tokio::test]
    async fn test_right_before_descending() {
        // 左子已占: 先补本节点右位, 不下探
        let lookup = tree(&[(1, Some(2), None)]);
        let slot = find_open_slot(&lookup, 1).await.unwrap();
        assert_eq!(slot, OpenSlot { parent_account_id: 1, position: Position::Right });
    }

    #[tokio::test]
    async fn test_level_order_left_subtree_first() {
        // 两子已满: 下一层从左子的左位开始
        let lookup = tree(&[(1, Some(2), Some(3))]);
        let slot = find_open_slot(&lookup, 1).await.unwrap();
        assert_eq!(slot, OpenSlot { parent_account_id: 2, position: Position::Left });
    }

    #[tokio::test]
    async fn test_level_order_crosses_siblings() {
        // 左子树满两位后轮到右兄弟, 而不是左子树继续下探
        let lookup = tree(&[(1, Some(2), Some(3)), (2, Some(4), Some(5))]);
        let slot = find_open_slot(&lookup, 1).await.unwrap();
        assert_eq!(slot, OpenSlot { parent_account_id: 3, position: Position::Left });
    }

    #[test]
    fn test_pin_consumable_only_while_unused() {
        let mut pin = AppMemberPin {
            id: Some(1),
            sponsor_account_id: Some(10),
            transaction_no: None,
            payment_method: None,
            member_id: Some(5),
            email: None,
            pin_code: "PIN123".to_string(),
            status: Some(PinStatus::Unused.get_code()),
            used_time: None,
            create_time: None,
        };
        assert!(PlacementService::ensure_pin_unused(&pin).is_ok());

        // 已消费的 pin 第二次安置必须被拒
        pin.status = Some(PinStatus::Used.get_code());
        let err = PlacementService::ensure_pin_unused(&pin).unwrap_err();
        assert_eq!(err.reason(), "error.pin_already_used");

        // 状态缺失视同不可用
        pin.status = None;
        assert!(PlacementService::ensure_pin_unused(&pin).is_err());
    }

    #[tokio::test]
    async fn test_deterministic_for_same_tree() {
        let entries = [(1, Some(2), Some(3)), (2, Some(4), None), (3, None, None)];
        let first = find_open_slot(&tree(&entries), 1).await.unwrap();
        let second = find_open_slot(&tree(&entries), 1).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, OpenSlot { parent_account_id: 2, position: Position::Right });
    }
}
