//! Filter-operator structs → `sea_orm::Condition` lowering.
//!
//! Shared by every entity repository. Entity filter DTOs are lowered
//! field-by-field with the helpers here; AND/OR/NOT sub-trees recurse in
//! the per-entity `*_condition` functions that call them.
//!
//! JSON operators compile to sqlite `json1` expressions
//! (`json_extract` / `json_each`); the column name is always a static
//! identifier from the entity definition, only values are bound.

use sea_orm::sea_query::{Condition, Expr, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Value};

use crate::query::{
    BoolFilter, DateTimeFilter, EnumFilter, FloatFilter, IntFilter, JsonFilter, StringFilter,
};
use crate::shared::{StoreError, StoreResult};

/// Escape LIKE wildcards in user input.
fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c => out.push(c),
        }
    }
    out
}

fn like_contains(s: &str) -> String {
    format!("%{}%", like_escape(s))
}

fn like_starts(s: &str) -> String {
    format!("{}%", like_escape(s))
}

fn like_ends(s: &str) -> String {
    format!("%{}", like_escape(s))
}

/// `IN ()` matches nothing; `NOT IN ()` matches everything.
fn never() -> SimpleExpr {
    Expr::cust("1=0")
}

pub fn string_condition<C: ColumnTrait>(col: C, f: &StringFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(v) = &f.equals {
        cond = cond.add(col.eq(v.clone()));
    }
    if let Some(vs) = &f.r#in {
        cond = cond.add(if vs.is_empty() {
            never()
        } else {
            col.is_in(vs.clone())
        });
    }
    if let Some(vs) = &f.not_in {
        if !vs.is_empty() {
            cond = cond.add(col.is_not_in(vs.clone()));
        }
    }
    if let Some(v) = &f.lt {
        cond = cond.add(col.lt(v.clone()));
    }
    if let Some(v) = &f.lte {
        cond = cond.add(col.lte(v.clone()));
    }
    if let Some(v) = &f.gt {
        cond = cond.add(col.gt(v.clone()));
    }
    if let Some(v) = &f.gte {
        cond = cond.add(col.gte(v.clone()));
    }
    // sqlite has no default LIKE escape character, so it is always
    // declared explicitly.
    if let Some(v) = &f.contains {
        cond = cond.add(col.like(LikeExpr::new(like_contains(v)).escape('\\')));
    }
    if let Some(v) = &f.starts_with {
        cond = cond.add(col.like(LikeExpr::new(like_starts(v)).escape('\\')));
    }
    if let Some(v) = &f.ends_with {
        cond = cond.add(col.like(LikeExpr::new(like_ends(v)).escape('\\')));
    }
    cond
}

pub fn int_condition<C: ColumnTrait>(col: C, f: &IntFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(v) = f.equals {
        cond = cond.add(col.eq(v));
    }
    if let Some(vs) = &f.r#in {
        cond = cond.add(if vs.is_empty() {
            never()
        } else {
            col.is_in(vs.clone())
        });
    }
    if let Some(vs) = &f.not_in {
        if !vs.is_empty() {
            cond = cond.add(col.is_not_in(vs.clone()));
        }
    }
    if let Some(v) = f.lt {
        cond = cond.add(col.lt(v));
    }
    if let Some(v) = f.lte {
        cond = cond.add(col.lte(v));
    }
    if let Some(v) = f.gt {
        cond = cond.add(col.gt(v));
    }
    if let Some(v) = f.gte {
        cond = cond.add(col.gte(v));
    }
    cond
}

pub fn float_condition<C: ColumnTrait>(col: C, f: &FloatFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(v) = f.equals {
        cond = cond.add(col.eq(v));
    }
    if let Some(vs) = &f.r#in {
        cond = cond.add(if vs.is_empty() {
            never()
        } else {
            col.is_in(vs.clone())
        });
    }
    if let Some(vs) = &f.not_in {
        if !vs.is_empty() {
            cond = cond.add(col.is_not_in(vs.clone()));
        }
    }
    if let Some(v) = f.lt {
        cond = cond.add(col.lt(v));
    }
    if let Some(v) = f.lte {
        cond = cond.add(col.lte(v));
    }
    if let Some(v) = f.gt {
        cond = cond.add(col.gt(v));
    }
    if let Some(v) = f.gte {
        cond = cond.add(col.gte(v));
    }
    cond
}

pub fn bool_condition<C: ColumnTrait>(col: C, f: &BoolFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(v) = f.equals {
        cond = cond.add(col.eq(v));
    }
    cond
}

pub fn datetime_condition<C: ColumnTrait>(col: C, f: &DateTimeFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(v) = f.equals {
        cond = cond.add(col.eq(v));
    }
    if let Some(vs) = &f.r#in {
        cond = cond.add(if vs.is_empty() {
            never()
        } else {
            col.is_in(vs.clone())
        });
    }
    if let Some(vs) = &f.not_in {
        if !vs.is_empty() {
            cond = cond.add(col.is_not_in(vs.clone()));
        }
    }
    if let Some(v) = f.lt {
        cond = cond.add(col.lt(v));
    }
    if let Some(v) = f.lte {
        cond = cond.add(col.lte(v));
    }
    if let Some(v) = f.gt {
        cond = cond.add(col.gt(v));
    }
    if let Some(v) = f.gte {
        cond = cond.add(col.gte(v));
    }
    cond
}

/// Lowering for closed enum columns. `conv` maps the domain enum to the
/// entity ActiveEnum (which binds as its string value).
pub fn enum_condition<C, T, V>(col: C, f: &EnumFilter<T>, conv: impl Fn(&T) -> V) -> Condition
where
    C: ColumnTrait,
    V: Into<Value>,
{
    let mut cond = Condition::all();
    if let Some(v) = &f.equals {
        cond = cond.add(col.eq(conv(v)));
    }
    if let Some(vs) = &f.r#in {
        cond = cond.add(if vs.is_empty() {
            never()
        } else {
            col.is_in(vs.iter().map(&conv))
        });
    }
    if let Some(vs) = &f.not_in {
        if !vs.is_empty() {
            cond = cond.add(col.is_not_in(vs.iter().map(&conv)));
        }
    }
    cond
}

/// `$`-rooted json path from filter segments. Rejects empty paths and
/// segments that would escape the quoted path literal.
fn json_path(segments: &[String]) -> StoreResult<String> {
    if segments.is_empty() {
        return Err(StoreError::Validation(
            "json filter requires a non-empty path".to_string(),
        ));
    }
    let mut path = String::from("$");
    for seg in segments {
        if seg.is_empty() || seg.contains('"') || seg.contains('\'') {
            return Err(StoreError::Validation(format!(
                "invalid json path segment: {:?}",
                seg
            )));
        }
        path.push('.');
        path.push_str(seg);
    }
    Ok(path)
}

/// Scalar JSON values bind directly; `None` means the value needs the
/// `json(?)` canonical-text comparison instead.
fn json_scalar(v: &serde_json::Value) -> Option<Value> {
    match v {
        serde_json::Value::String(s) => Some(s.clone().into()),
        serde_json::Value::Bool(b) => Some((*b).into()),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.into())
            } else {
                n.as_f64().map(Into::into)
            }
        }
        _ => None,
    }
}

pub fn json_condition<C: ColumnTrait>(col: C, f: &JsonFilter) -> StoreResult<Condition> {
    let path = json_path(&f.path)?;
    let col_name = col.as_str();
    let mut cond = Condition::all();

    if let Some(v) = &f.equals {
        cond = cond.add(match v {
            serde_json::Value::Null => {
                Expr::cust_with_values(format!("json_extract({}, ?) IS NULL", col_name), [
                    Value::from(path.clone()),
                ])
            }
            other => match json_scalar(other) {
                Some(bound) => Expr::cust_with_values(
                    format!("json_extract({}, ?) = ?", col_name),
                    [Value::from(path.clone()), bound],
                ),
                None => Expr::cust_with_values(
                    format!("json_extract({}, ?) = json(?)", col_name),
                    [Value::from(path.clone()), Value::from(other.to_string())],
                ),
            },
        });
    }

    if let Some(s) = &f.string_contains {
        cond = cond.add(Expr::cust_with_values(
            format!("json_extract({}, ?) LIKE ? ESCAPE '\\'", col_name),
            [Value::from(path.clone()), Value::from(like_contains(s))],
        ));
    }

    if let Some(v) = &f.array_contains {
        cond = cond.add(match json_scalar(v) {
            Some(bound) => Expr::cust_with_values(
                format!(
                    "EXISTS (SELECT 1 FROM json_each({}, ?) WHERE json_each.value = ?)",
                    col_name
                ),
                [Value::from(path), bound],
            ),
            None => Expr::cust_with_values(
                format!(
                    "EXISTS (SELECT 1 FROM json_each({}, ?) WHERE json_each.value = json(?))",
                    col_name
                ),
                [Value::from(path), Value::from(v.to_string())],
            ),
        });
    }

    Ok(cond)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::entities::user;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql_of(cond: Condition) -> String {
        user::Entity::find()
            .filter(cond)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn contains_escapes_wildcards() {
        let sql = sql_of(string_condition(
            user::Column::Username,
            &StringFilter::contains("50%"),
        ));
        assert!(sql.contains(r"%50\%%"), "{sql}");
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        let f = StringFilter {
            r#in: Some(vec![]),
            ..Default::default()
        };
        let sql = sql_of(string_condition(user::Column::Username, &f));
        assert!(sql.contains("1=0"), "{sql}");
    }

    #[test]
    fn json_filter_requires_path() {
        let err = json_condition(user::Column::CurrentPosition, &JsonFilter::default())
            .expect_err("empty path must be rejected");
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn json_equals_compiles_to_json_extract() {
        let cond = json_condition(
            user::Column::CurrentPosition,
            &JsonFilter::at(&["lat"]).equals(6.45),
        )
        .unwrap();
        let sql = sql_of(cond);
        assert!(sql.contains("json_extract(current_position"), "{sql}");
    }
}
