// Query composition as an ordered list of SQL text and bound values. Stores render the
// list in order (the SQLite store through `sqlx::QueryBuilder::push_bind`), so a value
// always lands on the placeholder written next to it.

use super::{BucketWidth, TimeRange};

/// Positional parameter bound to one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    Text(String),
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Sql(&'static str),
    Bind(Param),
}

/// Finished query. Only `SelectBuilder` makes these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    fragments: Vec<Fragment>,
}

impl SelectQuery {
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Bound values in placeholder order.
    pub fn params(&self) -> Vec<&Param> {
        self.fragments
            .iter()
            .filter_map(|f| match f {
                Fragment::Bind(p) => Some(p),
                Fragment::Sql(_) => None,
            })
            .collect()
    }

    /// Query text with `?` placeholders, for logs and tests.
    pub fn sql(&self) -> String {
        self.fragments
            .iter()
            .map(|f| match f {
                Fragment::Sql(s) => *s,
                Fragment::Bind(_) => "?",
            })
            .collect()
    }
}

/// Predicate over `log_event` (optionally joined with `probes`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = ?`
    Equals { column: &'static str, value: Param },
    /// Store time is seconds; the range is compared in ms, bounds inclusive.
    RecordTimeMs(TimeRange),
}

impl Filter {
    pub fn equals(column: &'static str, value: impl Into<Param>) -> Self {
        Filter::Equals {
            column,
            value: value.into(),
        }
    }
}

pub struct SelectBuilder {
    fragments: Vec<Fragment>,
    has_where: bool,
}

impl SelectBuilder {
    pub fn new(init: &'static str) -> Self {
        Self {
            fragments: vec![Fragment::Sql(init)],
            has_where: false,
        }
    }

    pub fn push(&mut self, sql: &'static str) -> &mut Self {
        self.fragments.push(Fragment::Sql(sql));
        self
    }

    pub fn push_bind(&mut self, value: impl Into<Param>) -> &mut Self {
        self.fragments.push(Fragment::Bind(value.into()));
        self
    }

    /// Start of the floored bucket in seconds. SQLite `%` truncates toward zero, so the
    /// remainder is shifted into `[0, width)` before subtracting.
    fn push_bucket_start(&mut self, secs: i64) -> &mut Self {
        self.push("(log_event.record_time - (((log_event.record_time % ")
            .push_bind(secs)
            .push(") + ")
            .push_bind(secs)
            .push(") % ")
            .push_bind(secs)
            .push("))")
    }

    /// `floor(record_time / width)` as `bucket` and the bucket start in ms as `timestamp`.
    pub fn push_bucket_columns(&mut self, width: BucketWidth) -> &mut Self {
        let secs = i64::from(width.secs());
        self.push_bucket_start(secs)
            .push(" / ")
            .push_bind(secs)
            .push(" AS bucket, ")
            .push_bucket_start(secs)
            .push(" * 1000 AS timestamp, ")
    }

    /// Adds `filter` to the WHERE clause (first call opens it, later calls AND onto it).
    pub fn filter(&mut self, filter: &Filter) -> &mut Self {
        self.push(if self.has_where { " AND " } else { " WHERE " });
        self.has_where = true;
        match filter {
            Filter::Equals { column, value } => {
                self.push(*column).push(" = ").push_bind(value.clone())
            }
            Filter::RecordTimeMs(range) => self
                .push("log_event.record_time * 1000 BETWEEN ")
                .push_bind(range.from_ms())
                .push(" AND ")
                .push_bind(range.to_ms()),
        }
    }

    pub fn filters<'a>(&mut self, filters: impl IntoIterator<Item = &'a Filter>) -> &mut Self {
        for f in filters {
            self.filter(f);
        }
        self
    }

    pub fn build(self) -> SelectQuery {
        SelectQuery {
            fragments: self.fragments,
        }
    }
}
