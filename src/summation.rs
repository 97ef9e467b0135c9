//! 求和 1..=n 的三种实现
//!
//! 三个函数对 `n <= 0` 都返回 `Some(0)`，结果超出 i64 范围时返回 `None`。

/// 循环累加，O(n) 时间，O(1) 空间
pub fn sum_to_n_iterative(n: i64) -> Option<i64> {
    (1..=n).try_fold(0i64, |sum, i| sum.checked_add(i))
}

/// 高斯公式，O(1)
pub fn sum_to_n_formula(n: i64) -> Option<i64> {
    if n <= 0 {
        return Some(0);
    }
    // 先用 i128 计算，避免 n * (n + 1) 在除 2 之前溢出
    let n = n as i128;
    i64::try_from(n * (n + 1) / 2).ok()
}

/// 递归实现，调用栈深度为 n
pub fn sum_to_n_recursive(n: i64) -> Option<i64> {
    match n {
        n if n <= 0 => Some(0),
        1 => Some(1),
        n => sum_to_n_recursive(n - 1)?.checked_add(n),
    }
}
