// 单号与编码生成
use chrono::{Datelike, Local};

/// pin 码字符表 (去除易混淆字符, 顺序打乱防止顺推)
const SEED: [char; 32] = [
    'E', '5', 'F', 'C', 'D', 'G', '3', 'H', 'Q', 'A', '4', 'B', 'N', 'P', '2', 'R', 'S', 'T', 'U',
    'V', '6', '7', 'M', 'W', 'X', '8', '9', 'K', 'L', 'Y', 'Z', 'J',
];

/// 提现单号: ENC{yyyy}{mm}{seq6}
pub fn format_encashment_no(year: i32, month: u32, seq: i64) -> String {
    format!("ENC{:04}{:02}{:06}", year, month, seq)
}

/// 付款凭证号: VCH{yyyy}{mm}{seq6}
pub fn format_voucher_no(year: i32, month: u32, seq: i64) -> String {
    format!("VCH{:04}{:02}{:06}", year, month, seq)
}

/// 当前本地 (年, 月), 用于单号序列的作用域
pub fn current_year_month() -> (i32, u32) {
    let now = Local::now();
    (now.year(), now.month())
}

/// 根据 id 生成编码 (pin 码 / 交易号后缀)
pub fn generate_for_id(id: i64) -> String {
    let mut num = id + 10000;
    let mut code = String::new();

    while num > 0 {
        let mod_val = num % SEED.len() as i64;
        num = (num - mod_val) / SEED.len() as i64;
        code.insert(0, SEED[mod_val as usize]);
    }

    while code.len() < 4 {
        code.insert(0, '0');
    }

    code
}

/// 生成 pin 码: 毫秒时间戳混合随机量编码, 12 位以上
pub fn generate_pin_code() -> String {
    let millis = Local::now().timestamp_millis();
    // uuid 低 32 位作为盐, 与时间戳拼接后编码
    let salt = (uuid::Uuid::new_v4().as_u128() & 0xFFFF_FFFF) as i64;
    format!("{}{}", generate_for_id(millis), generate_for_id(salt))
}

/// 生成交易号: {前缀}{yyyyMMddHHmmss}{4位编码}
pub fn generate_transaction_no(prefix: &str) -> String {
    let now = Local::now();
    let salt = (uuid::Uuid::new_v4().as_u128() & 0xFF_FFFF) as i64;
    format!("{}{}{}", prefix, now.format("%Y%m%d%H%M%S"), generate_for_id(salt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encashment_no_format() {
        assert_eq!(format_encashment_no(2025, 3, 1), "ENC202503000001");
        assert_eq!(format_encashment_no(2025, 12, 123456), "ENC202512123456");
    }

    #[test]
    fn test_voucher_no_format() {
        assert_eq!(format_voucher_no(2025, 3, 42), "VCH202503000042");
    }

    #[test]
    fn test_sequence_uniqueness_in_month() {
        // 同月内序号不同 => 单号必然不同
        let numbers: Vec<String> = (1..=100).map(|i| format_encashment_no(2025, 6, i)).collect();
        let mut deduped = numbers.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(numbers.len(), deduped.len());
    }

    #[test]
    fn test_generate_for_id() {
        let code = generate_for_id(10000);
        assert!(!code.is_empty());
        assert!(code.len() >= 4);
        // 同一 id 生成结果稳定
        assert_eq!(code, generate_for_id(10000));
    }

    #[test]
    fn test_pin_codes_distinct() {
        let a = generate_pin_code();
        let b = generate_pin_code();
        assert_ne!(a, b);
    }
}
