use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 操作者角色枚举
///
/// 角色由外部认证网关给出, 本服务只做状态机的角色门禁判断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
pub enum Role {
    #[strum(to_string = "member")]
    Member,
    #[strum(to_string = "cashier")]
    Cashier,
    #[strum(to_string = "admin")]
    Admin,
    #[strum(to_string = "super_admin")]
    SuperAdmin,
    #[strum(to_string = "accounting")]
    Accounting,
    #[strum(to_string = "releasing_personnel")]
    ReleasingPersonnel,
}

impl Role {
    /// 从字符串编码转换
    pub fn from_code(value: &str) -> Option<Self> {
        Self::iter().find(|e| e.as_ref() == value)
    }

    /// 管理员 (含超管)
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    /// 可执行订单放货
    pub fn can_release(self) -> bool {
        matches!(
            self,
            Role::Cashier | Role::Admin | Role::SuperAdmin | Role::ReleasingPersonnel
        )
    }

    /// 可执行提现财务处理 (仅会计)
    pub fn can_process_encashment(self) -> bool {
        matches!(self, Role::Accounting)
    }

    /// 可执行提现放款 (柜台与管理员, 放货专员只管订单)
    pub fn can_release_encashment(self) -> bool {
        matches!(self, Role::Cashier | Role::Admin | Role::SuperAdmin)
    }
}

/// 当前操作者 (由网关注入请求头, 见 middleware::actor)
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: i64,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Role::from_code("accounting"), Some(Role::Accounting));
        assert_eq!(Role::from_code("super_admin"), Some(Role::SuperAdmin));
        assert_eq!(Role::from_code("root"), None);
    }

    #[test]
    fn test_release_roles() {
        assert!(Role::Cashier.can_release());
        assert!(Role::ReleasingPersonnel.can_release());
        assert!(!Role::Member.can_release());
        assert!(!Role::Accounting.can_release());
    }

    #[test]
    fn test_encashment_process_accounting_only() {
        assert!(Role::Accounting.can_process_encashment());
        assert!(!Role::Admin.can_process_encashment());
        assert!(!Role::SuperAdmin.can_process_encashment());
        assert!(!Role::Cashier.can_process_encashment());
    }

    #[test]
    fn test_encashment_release_excludes_releasing_personnel() {
        assert!(Role::Cashier.can_release_encashment());
        assert!(Role::Admin.can_release_encashment());
        assert!(Role::SuperAdmin.can_release_encashment());
        // 放货专员只参与订单放货, 不碰提现
        assert!(!Role::ReleasingPersonnel.can_release_encashment());
        assert!(!Role::Accounting.can_release_encashment());
        assert!(!Role::Member.can_release_encashment());
    }
}
