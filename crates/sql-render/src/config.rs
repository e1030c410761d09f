use crate::dialect::{Dialect, Hive, MySql, Oracle, Postgres, Standard};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    Standard,
    Hive,
    Postgres,
    Oracle,
    MySql,
}

impl DialectKind {
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            DialectKind::Standard => &Standard,
            DialectKind::Hive => &Hive,
            DialectKind::Postgres => &Postgres,
            DialectKind::Oracle => &Oracle,
            DialectKind::MySql => &MySql,
        }
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "ansi" => Ok(DialectKind::Standard),
            "hive" => Ok(DialectKind::Hive),
            "postgres" | "postgresql" | "pg" => Ok(DialectKind::Postgres),
            "oracle" => Ok(DialectKind::Oracle),
            "mysql" => Ok(DialectKind::MySql),
            other => Err(format!("unknown dialect: {other}")),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dialect().name())
    }
}

/// Options for one render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub dialect: DialectKind,
    /// Print keywords upper-case. Identifiers and literals are never re-cased.
    pub uppercase: bool,
    /// Break clauses onto indented lines; compact mode uses single spaces.
    pub pretty: bool,
    /// Replace literals with placeholders and collect their values.
    pub parameterized: bool,
    pub indent_unit: String,
    pub max_depth: usize,
    /// Upper bound on the rendered text in bytes.
    pub max_output: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            dialect: DialectKind::Standard,
            uppercase: true,
            pretty: true,
            parameterized: false,
            indent_unit: "\t".to_string(),
            max_depth: 256,
            max_output: None,
        }
    }
}

impl RenderConfig {
    pub fn new(dialect: DialectKind) -> Self {
        RenderConfig {
            dialect,
            ..Default::default()
        }
    }

    pub fn with_dialect(mut self, dialect: DialectKind) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_parameterized(mut self, parameterized: bool) -> Self {
        self.parameterized = parameterized;
        self
    }

    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = Some(max_output);
        self
    }
}
