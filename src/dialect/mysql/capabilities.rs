//! MySQL capability tables.

use once_cell::sync::Lazy;

use crate::model::{
    CharsetInfo, CollationInfo, ColumnTypeInfo, DefaultValueInfo, IndexKind, IndexTypeInfo,
    TableMeta,
};

pub(super) static TABLE_META: Lazy<TableMeta> = Lazy::new(|| TableMeta {
    column_types: COLUMN_TYPES.iter().map(column_type).collect(),
    charsets: CHARSETS
        .iter()
        .map(|(name, collation)| CharsetInfo {
            charset_name: name.to_string(),
            default_collation_name: collation.to_string(),
        })
        .collect(),
    collations: COLLATIONS
        .iter()
        .map(|name| CollationInfo {
            collation_name: name.to_string(),
        })
        .collect(),
    index_types: INDEX_TYPES
        .iter()
        .map(|(kind, name, keyword)| IndexTypeInfo {
            kind: *kind,
            name: name.to_string(),
            keyword: keyword.to_string(),
        })
        .collect(),
    default_values: DEFAULT_VALUES
        .iter()
        .map(|(name, expression)| DefaultValueInfo {
            name: name.to_string(),
            expression: expression.to_string(),
        })
        .collect(),
});

// Flag bits for COLUMN_TYPES.
const LEN: u16 = 1 << 0;
const SCALE: u16 = 1 << 1;
const NULL: u16 = 1 << 2;
const AUTO: u16 = 1 << 3;
const CHARSET: u16 = 1 << 4;
const COLLATE: u16 = 1 << 5;
const COMMENT: u16 = 1 << 6;
const DEFAULT: u16 = 1 << 7;
const VALUES: u16 = 1 << 8;

const INTEGER: u16 = NULL | AUTO | COMMENT | DEFAULT;
const DECIMAL: u16 = LEN | SCALE | NULL | COMMENT | DEFAULT;
const TEMPORAL: u16 = LEN | NULL | COMMENT | DEFAULT;
const STRING: u16 = LEN | NULL | CHARSET | COLLATE | COMMENT | DEFAULT;
const BINARY: u16 = LEN | NULL | COMMENT | DEFAULT;
const LOB: u16 = NULL | COMMENT;
const TEXT: u16 = NULL | CHARSET | COLLATE | COMMENT;
const ENUMERATED: u16 = NULL | CHARSET | COLLATE | COMMENT | DEFAULT | VALUES;

const COLUMN_TYPES: &[(&str, u16)] = &[
    ("BIT", LEN | NULL | COMMENT | DEFAULT),
    ("TINYINT", INTEGER),
    ("SMALLINT", INTEGER),
    ("MEDIUMINT", INTEGER),
    ("INT", INTEGER),
    ("BIGINT", INTEGER),
    ("DECIMAL", DECIMAL),
    ("FLOAT", DECIMAL),
    ("DOUBLE", DECIMAL),
    ("DATE", NULL | COMMENT | DEFAULT),
    ("DATETIME", TEMPORAL),
    ("TIMESTAMP", TEMPORAL),
    ("TIME", TEMPORAL),
    ("YEAR", NULL | COMMENT | DEFAULT),
    ("CHAR", STRING),
    ("VARCHAR", STRING),
    ("BINARY", BINARY),
    ("VARBINARY", BINARY),
    ("TINYBLOB", LOB),
    ("BLOB", LOB),
    ("MEDIUMBLOB", LOB),
    ("LONGBLOB", LOB),
    ("TINYTEXT", TEXT),
    ("TEXT", TEXT),
    ("MEDIUMTEXT", TEXT),
    ("LONGTEXT", TEXT),
    ("ENUM", ENUMERATED),
    ("SET", ENUMERATED),
    ("JSON", LOB),
    ("GEOMETRY", LOB),
    ("POINT", LOB),
    ("LINESTRING", LOB),
    ("POLYGON", LOB),
    ("MULTIPOINT", LOB),
    ("MULTILINESTRING", LOB),
    ("MULTIPOLYGON", LOB),
    ("GEOMETRYCOLLECTION", LOB),
];

fn column_type(&(name, flags): &(&str, u16)) -> ColumnTypeInfo {
    let has = |bit: u16| flags & bit != 0;
    ColumnTypeInfo {
        type_name: name.to_string(),
        support_length: has(LEN),
        support_scale: has(SCALE),
        support_nullable: has(NULL),
        support_auto_increment: has(AUTO),
        support_charset: has(CHARSET),
        support_collation: has(COLLATE),
        support_comments: has(COMMENT),
        support_default_value: has(DEFAULT),
        support_values: has(VALUES),
    }
}

const CHARSETS: &[(&str, &str)] = &[
    ("armscii8", "armscii8_general_ci"),
    ("ascii", "ascii_general_ci"),
    ("big5", "big5_chinese_ci"),
    ("binary", "binary"),
    ("cp1250", "cp1250_general_ci"),
    ("cp1251", "cp1251_general_ci"),
    ("cp1256", "cp1256_general_ci"),
    ("cp1257", "cp1257_general_ci"),
    ("cp850", "cp850_general_ci"),
    ("cp852", "cp852_general_ci"),
    ("cp866", "cp866_general_ci"),
    ("cp932", "cp932_japanese_ci"),
    ("dec8", "dec8_swedish_ci"),
    ("eucjpms", "eucjpms_japanese_ci"),
    ("euckr", "euckr_korean_ci"),
    ("gb18030", "gb18030_chinese_ci"),
    ("gb2312", "gb2312_chinese_ci"),
    ("gbk", "gbk_chinese_ci"),
    ("geostd8", "geostd8_general_ci"),
    ("greek", "greek_general_ci"),
    ("hebrew", "hebrew_general_ci"),
    ("hp8", "hp8_english_ci"),
    ("keybcs2", "keybcs2_general_ci"),
    ("koi8r", "koi8r_general_ci"),
    ("koi8u", "koi8u_general_ci"),
    ("latin1", "latin1_swedish_ci"),
    ("latin2", "latin2_general_ci"),
    ("latin5", "latin5_turkish_ci"),
    ("latin7", "latin7_general_ci"),
    ("macce", "macce_general_ci"),
    ("macroman", "macroman_general_ci"),
    ("sjis", "sjis_japanese_ci"),
    ("swe7", "swe7_swedish_ci"),
    ("tis620", "tis620_thai_ci"),
    ("ucs2", "ucs2_general_ci"),
    ("ujis", "ujis_japanese_ci"),
    ("utf16", "utf16_general_ci"),
    ("utf16le", "utf16le_general_ci"),
    ("utf32", "utf32_general_ci"),
    ("utf8mb3", "utf8mb3_general_ci"),
    ("utf8mb4", "utf8mb4_0900_ai_ci"),
];

const COLLATIONS: &[&str] = &[
    "ascii_bin",
    "ascii_general_ci",
    "big5_bin",
    "big5_chinese_ci",
    "binary",
    "gb18030_bin",
    "gb18030_chinese_ci",
    "gbk_bin",
    "gbk_chinese_ci",
    "latin1_bin",
    "latin1_general_ci",
    "latin1_general_cs",
    "latin1_swedish_ci",
    "utf8mb3_bin",
    "utf8mb3_general_ci",
    "utf8mb3_unicode_ci",
    "utf8mb4_0900_ai_ci",
    "utf8mb4_0900_as_ci",
    "utf8mb4_0900_as_cs",
    "utf8mb4_0900_bin",
    "utf8mb4_bin",
    "utf8mb4_general_ci",
    "utf8mb4_unicode_520_ci",
    "utf8mb4_unicode_ci",
    "utf16_bin",
    "utf16_general_ci",
    "utf32_bin",
    "utf32_general_ci",
];

const INDEX_TYPES: &[(IndexKind, &str, &str)] = &[
    (IndexKind::PrimaryKey, "Primary", "PRIMARY KEY"),
    (IndexKind::Normal, "Normal", "INDEX"),
    (IndexKind::Unique, "Unique", "UNIQUE INDEX"),
    (IndexKind::Fulltext, "Fulltext", "FULLTEXT INDEX"),
    (IndexKind::Spatial, "Spatial", "SPATIAL INDEX"),
];

const DEFAULT_VALUES: &[(&str, &str)] = &[
    ("EMPTY_STRING", "''"),
    ("NULL", "NULL"),
    ("CURRENT_TIMESTAMP", "CURRENT_TIMESTAMP"),
];
