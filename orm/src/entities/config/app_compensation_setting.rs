use rbatis::rbdc::datetime::DateTime;
use rbatis::{crud, impl_select};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 奖金比例配置表 (单行生效)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppCompensationSetting {
    pub id: Option<i64>,
    /// 层级 → 百分比 映射, JSON 对象字符串, 例如 {"1":"10","2":"5"}
    pub unilevel_percents: Option<String>,
    /// 单次配对奖金
    pub pairing_bonus: Option<Decimal>,
    pub remark: Option<String>,
    pub update_by: Option<String>,
    pub update_time: Option<DateTime>,
}

crud!(AppCompensationSetting {}, "app_compensation_setting");
impl_select!(AppCompensationSetting{select_current() -> Option => "`order by id desc LIMIT 1`"});

impl AppCompensationSetting {
    pub const TABLE_NAME: &'static str = "app_compensation_setting";

    /// 解析层级比例映射, 缺失或解析失败返回空表 (等价于全部 0)
    pub fn percent_map(&self) -> BTreeMap<i32, Decimal> {
        self.unilevel_percents
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }

    /// 编码层级比例映射
    pub fn encode_percents(map: &BTreeMap<i32, Decimal>) -> String {
        serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_percent_map_roundtrip() {
        let mut map = BTreeMap::new();
        map.insert(1, Decimal::from(10));
        map.insert(2, Decimal::from(5));

        let setting = AppCompensationSetting {
            id: Some(1),
            unilevel_percents: Some(AppCompensationSetting::encode_percents(&map)),
            pairing_bonus: Some(Decimal::from(100)),
            remark: None,
            update_by: None,
            update_time: None,
        };
        assert_eq!(setting.percent_map(), map);
    }

    #[test]
    fn test_percent_map_missing_is_empty() {
        let setting = AppCompensationSetting {
            id: None,
            unilevel_percents: None,
            pairing_bonus: None,
            remark: None,
            update_by: None,
            update_time: None,
        };
        assert!(setting.percent_map().is_empty());
    }
}
