use std::sync::Arc;

use common::mq::message_queue::MessageQueue;
use common::utils::redis_util::RedisUtil;
use rbatis::RBatis;

use crate::service::{
    CompensationService, EncashmentService, GenealogyService, PinService, PlacementService,
    PurchaseService,
};

/// 应用状态: 连接池与领域服务的装配
#[derive(Clone)]
pub struct AppState {
    pub rb: Arc<RBatis>,
    pub redis: Arc<RedisUtil>,
    pub mq: Arc<MessageQueue>,
    pub compensation_service: CompensationService,
    pub placement_service: PlacementService,
    pub purchase_service: PurchaseService,
    pub encashment_service: EncashmentService,
    pub pin_service: PinService,
    pub genealogy_service: GenealogyService,
}

impl AppState {
    pub fn new(rb: Arc<RBatis>, redis: Arc<RedisUtil>, mq: Arc<MessageQueue>) -> Self {
        let compensation_service = CompensationService::new(rb.clone(), redis.clone());
        let placement_service =
            PlacementService::new(rb.clone(), mq.clone(), compensation_service.clone());
        let purchase_service =
            PurchaseService::new(rb.clone(), mq.clone(), compensation_service.clone());
        let encashment_service = EncashmentService::new(rb.clone(), mq.clone());
        let pin_service = PinService::new(rb.clone());
        let genealogy_service = GenealogyService::new(rb.clone());

        Self {
            rb,
            redis,
            mq,
            compensation_service,
            placement_service,
            purchase_service,
            encashment_service,
            pin_service,
            genealogy_service,
        }
    }
}
