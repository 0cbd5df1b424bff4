use std::collections::BTreeMap;
use std::sync::Arc;

use common::constants::{redis_keys, MAX_UNILEVEL_DEPTH};
use common::enums::Actor;
use common::error::{AppError, AppResult};
use common::models::req::SetCompensationReq;
use common::utils::redis_util::RedisUtil;
use orm::entities::AppCompensationSetting;
use rbatis::rbdc::datetime::DateTime;
use rbatis::RBatis;
use rust_decimal::Decimal;

/// 奖金比例配置服务
///
/// 配置读多写少, 走 Redis 短TTL缓存, 更新后主动失效;
/// 不做进程级单例缓存, 避免多实例间长期不一致
#[derive(Clone)]
pub struct CompensationService {
    rb: Arc<RBatis>,
    redis: Arc<RedisUtil>,
}

impl CompensationService {
    pub fn new(rb: Arc<RBatis>, redis: Arc<RedisUtil>) -> Self {
        Self { rb, redis }
    }

    /// 读取当前生效配置
    ///
    /// 缓存未命中时读库回填; 库中无配置行等价于全部比例为 0
    pub async fn current(&self) -> AppResult<AppCompensationSetting> {
        if let Ok(Some(cached)) = self.redis.get(redis_keys::COMPENSATION_CACHE_KEY).await {
            if let Ok(setting) = serde_json::from_str::<AppCompensationSetting>(&cached) {
                return Ok(setting);
            }
        }

        let setting = AppCompensationSetting::select_current(self.rb.as_ref())
            .await?
            .unwrap_or_else(Self::empty_setting);

        if let Ok(json) = serde_json::to_string(&setting) {
            if let Err(e) = self
                .redis
                .set_ex(
                    redis_keys::COMPENSATION_CACHE_KEY,
                    &json,
                    redis_keys::COMPENSATION_CACHE_TTL,
                )
                .await
            {
                log::warn!("奖金配置缓存回填失败: {}", e);
            }
        }

        Ok(setting)
    }

    /// 层级比例映射 (缺失层级视为 0)
    pub async fn percent_map(&self) -> AppResult<BTreeMap<i32, Decimal>> {
        Ok(self.current().await?.percent_map())
    }

    /// 指定层级的佣金比例
    pub async fn percent_for_level(&self, level: i32) -> AppResult<Decimal> {
        Ok(self
            .percent_map()
            .await?
            .get(&level)
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    /// 单次配对奖金
    pub async fn pairing_bonus(&self) -> AppResult<Decimal> {
        Ok(self.current().await?.pairing_bonus.unwrap_or(Decimal::ZERO))
    }

    /// 更新奖金比例配置 (管理员), 追加新行作为当前生效配置
    pub async fn set_compensation(
        &self,
        actor: &Actor,
        req: SetCompensationReq,
    ) -> AppResult<AppCompensationSetting> {
        if !actor.role.is_admin() {
            return Err(AppError::forbidden("error.admin_only"));
        }
        for (level, percent) in &req.unilevel_percents {
            if !(1..=MAX_UNILEVEL_DEPTH).contains(level) {
                return Err(AppError::validation("validation.unilevel_level_range"));
            }
            if *percent < Decimal::ZERO {
                return Err(AppError::validation("validation.percent_negative"));
            }
        }
        if req.pairing_bonus < Decimal::ZERO {
            return Err(AppError::validation("validation.pairing_bonus_negative"));
        }

        let mut setting = AppCompensationSetting {
            id: None,
            unilevel_percents: Some(AppCompensationSetting::encode_percents(&req.unilevel_percents)),
            pairing_bonus: Some(req.pairing_bonus),
            remark: req.remark,
            update_by: Some(actor.id.to_string()),
            update_time: Some(DateTime::now()),
        };
        let ret = AppCompensationSetting::insert(self.rb.as_ref(), &setting).await?;
        setting.id = ret.last_insert_id.as_i64();

        self.invalidate_cache().await?;
        log::info!("奖金比例配置已更新, 操作者: {}", actor.id);
        Ok(setting)
    }

    /// 主动失效配置缓存
    pub async fn invalidate_cache(&self) -> AppResult<()> {
        self.redis.del(redis_keys::COMPENSATION_CACHE_KEY).await?;
        Ok(())
    }

    fn empty_setting() -> AppCompensationSetting {
        AppCompensationSetting {
            id: None,
            unilevel_percents: None,
            pairing_bonus: None,
            remark: None,
            update_by: None,
            update_time: None,
        }
    }
}
