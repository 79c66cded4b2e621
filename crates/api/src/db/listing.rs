//! Filtered, paginated listing shared by every repository.
//!
//! A [`Filter`] collects conjunctive predicates. Predicates built from absent
//! or empty inputs are dropped, so an empty parameter bag lists everything.
//! [`fetch_page`] runs the count and the page query against the same filter.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use backoffice_core::PageRequest;

/// One `WHERE` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    /// `column::text = ANY($n)`.
    AnyOf {
        column: &'static str,
        values: Vec<String>,
    },
    /// `(a ILIKE $n OR b ILIKE $m ...)` with the needle wrapped in `%`.
    Contains {
        columns: &'static [&'static str],
        pattern: String,
    },
    /// `column = $n`.
    Equals { column: &'static str, value: bool },
}

/// Conjunction of predicates for a list query.
///
/// ```
/// use backoffice_api::db::Filter;
///
/// let filter = Filter::new()
///     .any_of("status", &["active", "invited"])
///     .any_of("role", &[] as &[&str])
///     .contains(&["username"], Some(""));
///
/// // Empty inputs add nothing.
/// assert_eq!(filter, Filter::new().any_of("status", &["active", "invited"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Match rows whose `column` is one of `values`; skipped when `values` is empty.
    ///
    /// The column is compared as text so enum columns accept plain labels.
    #[must_use]
    pub fn any_of<T: AsRef<str>>(mut self, column: &'static str, values: &[T]) -> Self {
        if !values.is_empty() {
            self.predicates.push(Predicate::AnyOf {
                column,
                values: values.iter().map(|v| v.as_ref().to_owned()).collect(),
            });
        }
        self
    }

    /// Case-insensitive substring match on any of `columns`; skipped when the
    /// needle is absent or empty.
    #[must_use]
    pub fn contains(mut self, columns: &'static [&'static str], needle: Option<&str>) -> Self {
        if let Some(needle) = needle.filter(|n| !n.is_empty())
            && !columns.is_empty()
        {
            self.predicates.push(Predicate::Contains {
                columns,
                pattern: format!("%{}%", escape_like(needle)),
            });
        }
        self
    }

    /// Exact match on a boolean column; skipped when `value` is `None`.
    #[must_use]
    pub fn equals(mut self, column: &'static str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self.predicates.push(Predicate::Equals { column, value });
        }
        self
    }

    /// Append ` WHERE ...` to `qb`, or nothing when the filter is empty.
    pub fn push_where<'args>(&self, qb: &mut QueryBuilder<'args, Postgres>) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            match predicate {
                Predicate::AnyOf { column, values } => {
                    qb.push(*column)
                        .push("::text = ANY(")
                        .push_bind(values.clone())
                        .push(")");
                }
                Predicate::Contains { columns, pattern } => {
                    qb.push("(");
                    for (j, column) in columns.iter().enumerate() {
                        if j > 0 {
                            qb.push(" OR ");
                        }
                        qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
                    }
                    qb.push(")");
                }
                Predicate::Equals { column, value } => {
                    qb.push(*column).push(" = ").push_bind(*value);
                }
            }
        }
    }
}

/// Escape `LIKE` metacharacters so the needle matches literally.
#[must_use]
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Static parts of a list query.
#[derive(Debug, Clone, Copy)]
pub struct ListQuery {
    /// Comma-separated select list.
    pub columns: &'static str,
    pub table: &'static str,
    /// `ORDER BY` clause body; must be deterministic.
    pub order_by: &'static str,
}

/// Build the count query for `filter`.
#[must_use]
pub fn count_query<'args>(query: &ListQuery, filter: &Filter) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM ");
    qb.push(query.table);
    filter.push_where(&mut qb);
    qb
}

/// Build the page query for `filter` with an explicit order.
#[must_use]
pub fn page_query<'args>(
    query: &ListQuery,
    order_by: &str,
    filter: &Filter,
    page: PageRequest,
) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(query.columns).push(" FROM ").push(query.table);
    filter.push_where(&mut qb);
    qb.push(" ORDER BY ")
        .push(order_by)
        .push(" LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());
    qb
}

/// Count matching rows, then fetch one page of them.
///
/// The two statements are not run in a transaction.
///
/// # Errors
///
/// Returns `sqlx::Error` if either query fails.
pub async fn fetch_page<R>(
    pool: &PgPool,
    query: &ListQuery,
    order_by: Option<&str>,
    filter: &Filter,
    page: PageRequest,
) -> Result<(Vec<R>, i64), sqlx::Error>
where
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let total: i64 = count_query(query, filter)
        .build_query_scalar()
        .fetch_one(pool)
        .await?;

    let rows = page_query(query, order_by.unwrap_or(query.order_by), filter, page)
        .build_query_as::<R>()
        .fetch_all(pool)
        .await?;

    Ok((rows, total))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const USERS: ListQuery = ListQuery {
        columns: "id, username",
        table: "users",
        order_by: "created_at DESC, id",
    };

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\tmp"), "c:\\\\tmp");
    }

    #[test]
    fn test_empty_inputs_are_skipped() {
        let filter = Filter::new()
            .any_of::<&str>("status", &[])
            .contains(&["username"], None)
            .contains(&["username"], Some(""))
            .equals("connected", None);
        assert_eq!(filter, Filter::new());

        let qb = count_query(&USERS, &filter);
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM users");
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let filter = Filter::new()
            .any_of("status", &["active"])
            .any_of("role", &["admin", "manager"])
            .contains(&["username"], Some("jo"));

        let qb = count_query(&USERS, &filter);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM users WHERE status::text = ANY($1) \
             AND role::text = ANY($2) AND (username ILIKE $3)"
        );
    }

    #[test]
    fn test_contains_ors_columns() {
        let filter = Filter::new().contains(&["title", "id"], Some("login"));
        let qb = count_query(&USERS, &filter);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM users WHERE (title ILIKE $1 OR id ILIKE $2)"
        );
    }

    #[test]
    fn test_page_query_orders_and_limits() {
        let filter = Filter::new().equals("connected", Some(true));
        let page = PageRequest::new(Some(2), Some(5)).unwrap();
        let qb = page_query(&USERS, USERS.order_by, &filter, page);
        assert_eq!(
            qb.sql(),
            "SELECT id, username FROM users WHERE connected = $1 \
             ORDER BY created_at DESC, id LIMIT $2 OFFSET $3"
        );
    }
}
