/// 用户记录缓存键前缀
pub const USER_PREFIX: &str = "user:";

/// 生成用户记录缓存键
pub fn user_key(user_id: i32) -> String {
    format!("{}{}", USER_PREFIX, user_id)
}

#[cfg(test)]
mod tests {
    use super::user_key;

    #[test]
    fn key_is_prefix_plus_decimal_id() {
        assert_eq!(user_key(42), "user:42");
        assert_eq!(user_key(7), user_key(7));
        assert_ne!(user_key(1), user_key(11));
    }
}
