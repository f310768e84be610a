use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// --- 構造体定義 ---

/// マージ対象となるメタデータフィールド。
///
/// Adobe Bridge などのカタログツールがキーワードを保存する3つのフィールドです。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataField {
    Keyword,
    Subject,
    HierarchicalSubject,
}

impl MetadataField {
    /// すべてのフィールド（出力順を安定させるため固定順）。
    pub const ALL: [MetadataField; 3] = [
        MetadataField::Keyword,
        MetadataField::Subject,
        MetadataField::HierarchicalSubject,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetadataField::Keyword => "Keyword",
            MetadataField::Subject => "Subject",
            MetadataField::HierarchicalSubject => "HierarchicalSubject",
        }
    }

    /// exiftool でのタグ名。IPTC のキーワードは複数形の `Keywords` になる。
    pub fn exiftool_tag(self) -> &'static str {
        match self {
            MetadataField::Keyword => "Keywords",
            MetadataField::Subject => "Subject",
            MetadataField::HierarchicalSubject => "HierarchicalSubject",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// フィールドごとの値の集合。
///
/// 値は書かれたとおり（前後の空白も含めて）重複なく、辞書順で保持されます。
/// 空白だけの値は捨てられ、値が1つもないフィールドはエントリを持ちません。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFieldSet {
    fields: BTreeMap<MetadataField, BTreeSet<String>>,
}

// --- 実装ブロック ---

impl MetadataFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を1つ追加します。空白だけの値は無視されます。
    pub fn insert(&mut self, field: MetadataField, value: impl AsRef<str>) {
        let value = value.as_ref();
        if value.trim().is_empty() {
            return;
        }
        self.fields
            .entry(field)
            .or_default()
            .insert(value.to_string());
    }

    /// 値をまとめて追加するビルダー形式のヘルパー。
    pub fn with_values<I, S>(mut self, field: MetadataField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.insert(field, value);
        }
        self
    }

    /// 指定フィールドの値。値がなければ空集合を返す。
    pub fn values(&self, field: MetadataField) -> impl Iterator<Item = &str> + '_ {
        self.fields
            .get(&field)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }

    pub fn contains_field(&self, field: MetadataField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = MetadataField> + '_ {
        self.fields.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 2つの集合の和集合をフィールドごとに計算します。
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (field, values) in &other.fields {
            merged
                .fields
                .entry(*field)
                .or_default()
                .extend(values.iter().cloned());
        }
        merged
    }

    /// `self` を和集合とみなし、`current` に欠けている値を持つフィールドだけを返します。
    ///
    /// 返される集合の各フィールドは、`current` に書き込むべき完全な値リストです。
    /// 空の集合が返れば書き込みは不要です。
    pub fn missing_from(&self, current: &Self) -> Self {
        let fields = self
            .fields
            .iter()
            .filter(|(field, values)| current.fields.get(*field) != Some(*values))
            .map(|(field, values)| (*field, values.clone()))
            .collect();
        Self { fields }
    }
}

impl fmt::Display for MetadataFieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, values) in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            let joined: Vec<&str> = values.iter().map(String::as_str).collect();
            write!(f, "{}=[{}]", field, joined.join(", "))?;
        }
        Ok(())
    }
}

// --- テストモジュール ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_deduplicates_and_drops_blank_values() {
        let set = MetadataFieldSet::new().with_values(
            MetadataField::Keyword,
            ["B", "A", "B", "", "   "],
        );
        let values: Vec<&str> = set.values(MetadataField::Keyword).collect();
        assert_eq!(values, vec!["A", "B"]);
        assert_eq!(set.values(MetadataField::Subject).count(), 0);
    }

    /// 空白の違いも別の値として扱い、両方のファイルに同じ生の値がそろうことを確認
    #[test]
    fn values_differing_only_in_whitespace_are_kept_apart() {
        let padded = MetadataFieldSet::new().with_values(MetadataField::Keyword, [" A"]);
        let plain = MetadataFieldSet::new().with_values(MetadataField::Keyword, ["A"]);

        let union = padded.union(&plain);
        assert_eq!(
            union.values(MetadataField::Keyword).collect::<Vec<_>>(),
            vec![" A", "A"]
        );
        assert!(!union.missing_from(&padded).is_empty());
        assert!(!union.missing_from(&plain).is_empty());
    }

    #[test]
    fn empty_values_do_not_create_field_entries() {
        let set = MetadataFieldSet::new().with_values(MetadataField::Subject, [" "]);
        assert!(set.is_empty());
        assert_eq!(set, MetadataFieldSet::new());
    }

    #[test]
    fn union_is_per_field_and_symmetric() {
        let a = MetadataFieldSet::new()
            .with_values(MetadataField::Keyword, ["A", "B"])
            .with_values(MetadataField::HierarchicalSubject, ["Places|Berlin"]);
        let b = MetadataFieldSet::new()
            .with_values(MetadataField::Keyword, ["B", "C"])
            .with_values(MetadataField::Subject, ["Berlin"]);

        let union = a.union(&b);
        assert_eq!(union, b.union(&a));
        assert_eq!(
            union.values(MetadataField::Keyword).collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
        assert_eq!(
            union.values(MetadataField::Subject).collect::<Vec<_>>(),
            vec!["Berlin"]
        );
        assert_eq!(
            union
                .values(MetadataField::HierarchicalSubject)
                .collect::<Vec<_>>(),
            vec!["Places|Berlin"]
        );
    }

    #[test]
    fn missing_from_returns_only_deficient_fields() {
        let current = MetadataFieldSet::new()
            .with_values(MetadataField::Keyword, ["A", "B", "C"])
            .with_values(MetadataField::Subject, ["A"]);
        let union = current
            .clone()
            .with_values(MetadataField::Subject, ["B"]);

        let missing = union.missing_from(&current);
        assert_eq!(missing.fields().collect::<Vec<_>>(), vec![MetadataField::Subject]);
        assert_eq!(
            missing.values(MetadataField::Subject).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert!(union.missing_from(&union).is_empty());
    }

    #[test]
    fn display_lists_fields_in_fixed_order() {
        let set = MetadataFieldSet::new()
            .with_values(MetadataField::HierarchicalSubject, ["x|y"])
            .with_values(MetadataField::Keyword, ["b", "a"]);
        assert_eq!(set.to_string(), "Keyword=[a, b]; HierarchicalSubject=[x|y]");
    }

    #[test]
    fn exiftool_tag_uses_plural_keywords() {
        assert_eq!(MetadataField::Keyword.exiftool_tag(), "Keywords");
        assert_eq!(MetadataField::Keyword.name(), "Keyword");
        assert_eq!(
            MetadataField::ALL.iter().map(|f| f.exiftool_tag()).collect::<Vec<_>>(),
            vec!["Keywords", "Subject", "HierarchicalSubject"]
        );
    }
}
