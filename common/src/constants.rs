/// 应用常量定义
use rust_decimal::Decimal;

/// 新节点基础配对积分 (第1层)
pub const PAIR_VALUE_BASE: i64 = 300;

/// 配对积分每层递减值
pub const PAIR_VALUE_DECAY: i64 = 30;

/// 一个配对单位: 左右区各累积满该积分触发一次配对
pub const PAIRING_UNIT: i64 = 300;

/// 层级佣金最大层数
pub const MAX_UNILEVEL_DEPTH: i32 = 10;

/// 提现最小金额
pub const MIN_ENCASHMENT_AMOUNT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// 网关注入的操作者请求头
pub const ACTOR_ID_HEADER: &str = "X-Actor-Id";
pub const ACTOR_ROLE_HEADER: &str = "X-Actor-Role";

/// Redis Keys
pub mod redis_keys {
    /// 奖金比例配置缓存
    pub const COMPENSATION_CACHE_KEY: &str = "compensation_setting";

    /// 奖金比例配置缓存时长 (秒, 短TTL避免比例更新后长期陈旧)
    pub const COMPENSATION_CACHE_TTL: i64 = 60;
}

/// 单号前缀
pub mod sequence_kinds {
    /// 提现单号 ENC{yyyy}{mm}{seq6}
    pub const ENCASHMENT: &str = "encashment";

    /// 付款凭证号 VCH{yyyy}{mm}{seq6}
    pub const VOUCHER: &str = "voucher";
}
