use chrono::NaiveDate;
use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};

use crate::employee::DATE_FORMAT;

/// Backend-neutral parameter / result cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

pub type Row = Vec<SqlValue>;

impl SqlValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// SQLite hands dates back as text, PostgreSQL as a typed DATE.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).ok(),
            _ => None,
        }
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for SqlValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::Owned(Value::Null),
            Self::Int(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            Self::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Self::Date(d) => ToSqlOutput::Owned(Value::Text(d.format(DATE_FORMAT).to_string())),
        })
    }
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(v: ValueRef<'_>) -> Self {
        match v {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(i) => Self::Int(i),
            ValueRef::Real(f) => Self::Text(f.to_string()),
            ValueRef::Text(b) | ValueRef::Blob(b) => Self::Text(String::from_utf8_lossy(b).into_owned()),
        }
    }
}

#[cfg(feature = "postgres")]
pub(crate) mod pg {
    use super::SqlValue;
    use chrono::NaiveDate;
    use postgres::types::{ToSql, Type};

    pub type BoxedParam = Box<dyn ToSql + Sync>;

    pub fn to_params(values: &[SqlValue]) -> Vec<BoxedParam> {
        values
            .iter()
            .map(|v| -> BoxedParam {
                match v {
                    SqlValue::Null => Box::new(Option::<String>::None),
                    SqlValue::Int(i) => Box::new(*i),
                    SqlValue::Text(s) => Box::new(s.clone()),
                    SqlValue::Date(d) => Box::new(*d),
                }
            })
            .collect()
    }

    pub fn as_refs(params: &[BoxedParam]) -> Vec<&(dyn ToSql + Sync)> {
        params.iter().map(|p| p.as_ref() as &(dyn ToSql + Sync)).collect()
    }

    pub fn from_row(row: &postgres::Row) -> Result<Vec<SqlValue>, postgres::Error> {
        let mut out = Vec::with_capacity(row.len());
        for (i, col) in row.columns().iter().enumerate() {
            let ty = col.type_();
            let cell = if *ty == Type::INT2 {
                row.try_get::<_, Option<i16>>(i)?.map(|v| SqlValue::Int(i64::from(v)))
            } else if *ty == Type::INT4 {
                row.try_get::<_, Option<i32>>(i)?.map(|v| SqlValue::Int(i64::from(v)))
            } else if *ty == Type::INT8 {
                row.try_get::<_, Option<i64>>(i)?.map(SqlValue::Int)
            } else if *ty == Type::DATE {
                row.try_get::<_, Option<NaiveDate>>(i)?.map(SqlValue::Date)
            } else {
                row.try_get::<_, Option<String>>(i)?.map(SqlValue::Text)
            };
            out.push(cell.unwrap_or(SqlValue::Null));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_read_back_from_text() {
        let d = NaiveDate::from_ymd_opt(1990, 1, 15).unwrap();
        assert_eq!(SqlValue::Text("1990-01-15".into()).as_date(), Some(d));
        assert_eq!(SqlValue::Date(d).as_date(), Some(d));
        assert_eq!(SqlValue::Int(3).as_date(), None);
    }

    #[test]
    fn sqlite_value_refs_convert() {
        assert_eq!(SqlValue::from(ValueRef::Integer(7)), SqlValue::Int(7));
        assert_eq!(SqlValue::from(ValueRef::Text(b"Male")), SqlValue::Text("Male".into()));
        assert_eq!(SqlValue::from(ValueRef::Null), SqlValue::Null);
    }
}
