//! SQL dialect differences: placeholders and identifier quoting.

/// Target SQL dialect for a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// PostgreSQL uses $1, $2, ... placeholders and double-quoted identifiers.
    PostgreSQL,
    /// MySQL uses ? placeholders and backtick-quoted identifiers.
    MySQL,
    /// SQLite uses ? placeholders and double-quoted identifiers.
    SQLite,
}

impl Dialect {
    /// Get the parameter placeholder for the given 1-based index.
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Self::PostgreSQL => format!("${index}"),
            Self::MySQL | Self::SQLite => "?".to_string(),
        }
    }

    /// Quote an identifier if it needs quoting in this dialect.
    pub fn quote_identifier(&self, name: &str) -> String {
        if !needs_quoting(name) {
            return name.to_string();
        }
        match self {
            Self::MySQL => format!("`{}`", name.replace('`', "``")),
            Self::PostgreSQL | Self::SQLite => format!("\"{}\"", name.replace('"', "\"\"")),
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::PostgreSQL
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::PostgreSQL => "postgresql",
            Self::MySQL => "mysql",
            Self::SQLite => "sqlite",
        };
        f.write_str(name)
    }
}

/// Check if an identifier needs quoting.
///
/// Reserved keywords and names with characters outside `[A-Za-z0-9_]` need
/// quoting; the keyword list covers the words that commonly collide with
/// column names rather than the full grammar of any one engine.
pub fn needs_quoting(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "all", "and", "as", "between", "case", "check", "default", "delete", "distinct", "else",
        "end", "from", "group", "having", "in", "index", "insert", "into", "is", "join", "key",
        "like", "limit", "not", "null", "offset", "on", "or", "order", "primary", "select", "set",
        "table", "then", "union", "update", "user", "values", "when", "where",
    ];

    if RESERVED.contains(&name.to_lowercase().as_str()) {
        return true;
    }
    !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') || name.is_empty()
}
