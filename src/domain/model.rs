use std::collections::BTreeSet;

/// 從輸入檔收集到的整數集合：限定範圍、自動去重、升冪迭代
#[derive(Debug, Clone, Default)]
pub struct IntegerSet {
    values: BTreeSet<i64>,
}

impl IntegerSet {
    /// 集合接受的最小值
    pub const MIN_VALUE: i64 = -1023;
    /// 集合接受的最大值
    pub const MAX_VALUE: i64 = 1023;

    pub fn new() -> Self {
        Self::default()
    }

    /// 掃描每一行，只保留「整行恰好一個整數 token 且落在範圍內」的值。
    /// 其餘行一律靜默略過，不記錄、不計數。
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = Self::new();
        for line in lines {
            if let Some(value) = parse_single_integer(line) {
                set.insert(value);
            }
        }
        set
    }

    /// Inserts `value` when it lies within `[MIN_VALUE, MAX_VALUE]`.
    /// Returns whether the range filter accepted the value; re-inserting a
    /// present value is a no-op and still counts as accepted.
    pub fn insert(&mut self, value: i64) -> bool {
        if (Self::MIN_VALUE..=Self::MAX_VALUE).contains(&value) {
            self.values.insert(value);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.values.contains(&value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 依數值升冪回傳所有成員
    pub fn sorted_values(&self) -> Vec<i64> {
        self.values.iter().copied().collect()
    }
}

/// Classifies one input line. Yields the value only when the line holds
/// exactly one whitespace-delimited token that parses as a base-10 `i64`;
/// empty, multi-token, non-numeric and overflowing lines yield `None`.
pub fn parse_single_integer(line: &str) -> Option<i64> {
    let mut tokens = line.split_whitespace();
    let token = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    token.parse().ok()
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub values: Vec<i64>,
    pub output_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accepts_values_inside_range() {
        let mut set = IntegerSet::new();
        assert!(set.insert(0));
        assert!(set.insert(IntegerSet::MIN_VALUE));
        assert!(set.insert(IntegerSet::MAX_VALUE));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_insert_rejects_values_outside_range() {
        let mut set = IntegerSet::new();
        assert!(!set.insert(1024));
        assert!(!set.insert(-1024));
        assert!(!set.insert(i64::MAX));
        assert!(set.is_empty());
    }

    #[test]
    fn test_insert_collapses_duplicates() {
        let mut set = IntegerSet::new();
        assert!(set.insert(7));
        assert!(set.insert(7));
        assert_eq!(set.len(), 1);
        assert!(set.contains(7));
    }

    #[test]
    fn test_sorted_values_are_ascending() {
        let mut set = IntegerSet::new();
        for value in [512, -9, 0, 1023, -1023, 3] {
            set.insert(value);
        }
        assert_eq!(set.sorted_values(), vec![-1023, -9, 0, 3, 512, 1023]);
    }

    #[test]
    fn test_parse_single_integer_trims_whitespace() {
        assert_eq!(parse_single_integer("  10  "), Some(10));
        assert_eq!(parse_single_integer("\t-3\t"), Some(-3));
    }

    #[test]
    fn test_parse_single_integer_accepts_signs_and_leading_zeros() {
        assert_eq!(parse_single_integer("+5"), Some(5));
        assert_eq!(parse_single_integer("-5"), Some(-5));
        assert_eq!(parse_single_integer("007"), Some(7));
    }

    #[test]
    fn test_parse_single_integer_rejects_empty_lines() {
        assert_eq!(parse_single_integer(""), None);
        assert_eq!(parse_single_integer("   "), None);
    }

    #[test]
    fn test_parse_single_integer_rejects_multi_token_lines() {
        assert_eq!(parse_single_integer("1 2"), None);
        assert_eq!(parse_single_integer("5 6 7"), None);
        assert_eq!(parse_single_integer("5 abc"), None);
    }

    #[test]
    fn test_parse_single_integer_rejects_non_numeric_tokens() {
        assert_eq!(parse_single_integer("bad"), None);
        assert_eq!(parse_single_integer("5.0"), None);
        assert_eq!(parse_single_integer("12a"), None);
    }

    #[test]
    fn test_parse_single_integer_rejects_overflow() {
        assert_eq!(parse_single_integer("99999999999999999999999"), None);
    }

    #[test]
    fn test_from_lines_mixed_input() {
        let lines = ["5", "5", "-3", "  10  ", "bad", "1 2", "1023", "1024"];
        let set = IntegerSet::from_lines(lines);
        assert_eq!(set.sorted_values(), vec![-3, 5, 10, 1023]);
    }
}
