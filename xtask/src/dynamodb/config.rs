//! Table configuration types (Functional Core - pure data).

/// Default entries table name.
pub const DEFAULT_ENTRIES_TABLE: &str = "hacky-skills-data";

/// Default tags table name.
pub const DEFAULT_TAGS_TABLE: &str = "hacky-skills-tags";

/// Default partition key of the entries table.
pub const DEFAULT_ENTRIES_KEY: &str = "skill-entry-key";

/// Default partition key of the tags table.
pub const DEFAULT_TAGS_KEY: &str = "skill-tag-key";

/// Schema of one table: a single string partition key, on-demand billing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: String,
}

impl TableConfig {
    pub fn new(table_name: &str, partition_key: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            partition_key: partition_key.to_string(),
        }
    }
}

/// Both tables the API needs, entries first.
pub fn skills_tracker_tables(
    entries_table: &str,
    entries_key: &str,
    tags_table: &str,
    tags_key: &str,
) -> Vec<TableConfig> {
    vec![
        TableConfig::new(entries_table, entries_key),
        TableConfig::new(tags_table, tags_key),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_existing_tables() {
        let tables = skills_tracker_tables(
            DEFAULT_ENTRIES_TABLE,
            DEFAULT_ENTRIES_KEY,
            DEFAULT_TAGS_TABLE,
            DEFAULT_TAGS_KEY,
        );

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].table_name, "hacky-skills-data");
        assert_eq!(tables[0].partition_key, "skill-entry-key");
        assert_eq!(tables[1].table_name, "hacky-skills-tags");
        assert_eq!(tables[1].partition_key, "skill-tag-key");
    }
}
