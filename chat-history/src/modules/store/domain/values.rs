use std::collections::BTreeMap;

/// 哈希记录的字段映射（字段名 → 原始值）
pub type FieldMap = BTreeMap<String, String>;

/// 读取整张哈希的结果
///
/// 不存在的哈希与空映射在类型上区分
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashLookup {
    Found(FieldMap),
    NotFound,
}

impl HashLookup {
    /// 由字段映射构造，空映射视为不存在
    pub fn from_fields(fields: FieldMap) -> Self {
        if fields.is_empty() {
            HashLookup::NotFound
        } else {
            HashLookup::Found(fields)
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, HashLookup::Found(_))
    }

    pub fn into_option(self) -> Option<FieldMap> {
        match self {
            HashLookup::Found(fields) => Some(fields),
            HashLookup::NotFound => None,
        }
    }
}

/// 有序集合写入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreUpdate {
    /// 新成员已插入，或已有成员的分数已改变
    Changed,
    /// 成员已存在且分数相同
    Unchanged,
}

impl ScoreUpdate {
    pub fn from_changed_count(count: u64) -> Self {
        if count > 0 {
            ScoreUpdate::Changed
        } else {
            ScoreUpdate::Unchanged
        }
    }
}

/// 排名区间（0 起始，两端包含，负数从末尾计）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankRange {
    pub start: i64,
    pub stop: i64,
    pub reverse: bool,
}

impl RankRange {
    pub fn new(start: i64, stop: i64) -> Self {
        Self {
            start,
            stop,
            reverse: false,
        }
    }

    /// 整个集合
    pub fn all() -> Self {
        Self::new(0, -1)
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// 按集合长度解析为具体下标区间，越界或空区间返回 None
    pub fn resolve(&self, len: usize) -> Option<(usize, usize)> {
        if len == 0 {
            return None;
        }
        let len = len as i64;
        let normalize = |i: i64| if i < 0 { len + i } else { i };

        let start = normalize(self.start).max(0);
        let stop = normalize(self.stop).min(len - 1);

        if start > stop || start >= len {
            None
        } else {
            Some((start as usize, stop as usize))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_is_not_found() {
        assert_eq!(HashLookup::from_fields(FieldMap::new()), HashLookup::NotFound);
    }

    #[test]
    fn test_score_update_from_count() {
        assert_eq!(ScoreUpdate::from_changed_count(1), ScoreUpdate::Changed);
        assert_eq!(ScoreUpdate::from_changed_count(0), ScoreUpdate::Unchanged);
    }

    #[test]
    fn test_resolve_full_range() {
        assert_eq!(RankRange::all().resolve(3), Some((0, 2)));
    }

    #[test]
    fn test_resolve_negative_indices() {
        assert_eq!(RankRange::new(-2, -1).resolve(5), Some((3, 4)));
        assert_eq!(RankRange::new(-10, 1).resolve(5), Some((0, 1)));
    }

    #[test]
    fn test_resolve_out_of_bounds() {
        assert_eq!(RankRange::new(5, 10).resolve(5), None);
        assert_eq!(RankRange::new(3, 1).resolve(5), None);
        assert_eq!(RankRange::all().resolve(0), None);
    }
}
