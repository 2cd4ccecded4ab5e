use serde::Serialize;
use serde_json::Value;

/// Boolean predicate over top-level document fields.
///
/// The same value drives the Cosmos DB SQL text sent over the wire and the
/// in-memory evaluation used by tests, so both agree on what matches.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq { field: String, value: Value },
    Contains { field: String, needle: String },
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlParameter {
    pub name: String,
    pub value: Value,
}

/// Body of a Cosmos DB query request (`application/query+json`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlQuery {
    pub query: String,
    pub parameters: Vec<SqlParameter>,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn and(self, other: Filter) -> Self {
        match self {
            Filter::And(mut clauses) => {
                clauses.push(other);
                Filter::And(clauses)
            }
            first => Filter::And(vec![first, other]),
        }
    }

    pub fn or(self, other: Filter) -> Self {
        match self {
            Filter::Or(mut clauses) => {
                clauses.push(other);
                Filter::Or(clauses)
            }
            first => Filter::Or(vec![first, other]),
        }
    }

    pub fn to_query(&self) -> SqlQuery {
        let mut parameters = Vec::new();
        let predicate = self.render(&mut parameters);

        SqlQuery {
            query: format!("SELECT * FROM c WHERE {}", predicate),
            parameters,
        }
    }

    fn render(&self, parameters: &mut Vec<SqlParameter>) -> String {
        match self {
            Filter::Eq { field, value } => {
                let name = push_parameter(parameters, value.clone());
                format!("{} = {}", field_ref(field), name)
            }
            Filter::Contains { field, needle } => {
                let name = push_parameter(parameters, Value::String(needle.clone()));
                format!("CONTAINS({}, {})", field_ref(field), name)
            }
            Filter::And(clauses) => render_group(clauses, " AND ", "true", parameters),
            Filter::Or(clauses) => render_group(clauses, " OR ", "false", parameters),
        }
    }

    /// Evaluates the predicate against one document. A missing field never
    /// matches, mirroring how the database treats `undefined`.
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Filter::Eq { field, value } => document.get(field) == Some(value),
            Filter::Contains { field, needle } => document
                .get(field)
                .and_then(Value::as_str)
                .map(|haystack| haystack.contains(needle.as_str()))
                .unwrap_or(false),
            Filter::And(clauses) => clauses.iter().all(|clause| clause.matches(document)),
            Filter::Or(clauses) => clauses.iter().any(|clause| clause.matches(document)),
        }
    }
}

fn push_parameter(parameters: &mut Vec<SqlParameter>, value: Value) -> String {
    let name = format!("@p{}", parameters.len());
    parameters.push(SqlParameter {
        name: name.clone(),
        value,
    });
    name
}

fn field_ref(field: &str) -> String {
    // Bracket notation keeps names like `date` or `from` clear of SQL keywords
    format!("c[\"{}\"]", field.replace('\\', "\\\\").replace('"', "\\\""))
}

fn render_group(
    clauses: &[Filter],
    separator: &str,
    empty: &str,
    parameters: &mut Vec<SqlParameter>,
) -> String {
    if clauses.is_empty() {
        return empty.to_string();
    }

    let rendered = clauses
        .iter()
        .map(|clause| clause.render(parameters))
        .collect::<Vec<_>>();

    format!("({})", rendered.join(separator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn appointment_filter() -> Filter {
        Filter::eq("date", "6/10/2024")
            .and(Filter::eq("isActive", true))
            .and(Filter::eq("isAvailable", false))
    }

    #[test]
    fn test_and_chain_flattens() {
        match appointment_filter() {
            Filter::And(clauses) => assert_eq!(clauses.len(), 3),
            other => panic!("expected a flat AND, got {:?}", other),
        }
    }

    #[test]
    fn test_renders_parameterised_sql() {
        let query = appointment_filter().to_query();

        assert_eq!(
            query.query,
            r#"SELECT * FROM c WHERE (c["date"] = @p0 AND c["isActive"] = @p1 AND c["isAvailable"] = @p2)"#
        );
        assert_eq!(query.parameters[0].name, "@p0");
        assert_eq!(query.parameters[0].value, json!("6/10/2024"));
        assert_eq!(query.parameters[1].value, json!(true));
        assert_eq!(query.parameters[2].value, json!(false));
    }

    #[test]
    fn test_renders_nested_or_with_contains() {
        let filter = Filter::contains("dateOfBirth", "6/10")
            .or(Filter::contains("dateOfBirth", "-06-10"))
            .and(Filter::eq("isActive", true));

        let query = filter.to_query();

        assert_eq!(
            query.query,
            r#"SELECT * FROM c WHERE ((CONTAINS(c["dateOfBirth"], @p0) OR CONTAINS(c["dateOfBirth"], @p1)) AND c["isActive"] = @p2)"#
        );
        assert_eq!(query.parameters.len(), 3);
    }

    #[test]
    fn test_serialises_as_query_body() {
        let body = serde_json::to_value(Filter::eq("isActive", true).to_query()).unwrap();

        assert_eq!(
            body,
            json!({
                "query": r#"SELECT * FROM c WHERE c["isActive"] = @p0"#,
                "parameters": [{ "name": "@p0", "value": true }]
            })
        );
    }

    #[test]
    fn test_matches_documents() {
        let filter = appointment_filter();

        let booked = json!({ "date": "6/10/2024", "isActive": true, "isAvailable": false });
        let open_slot = json!({ "date": "6/10/2024", "isActive": true, "isAvailable": true });
        let other_day = json!({ "date": "6/11/2024", "isActive": true, "isAvailable": false });
        let no_flags = json!({ "date": "6/10/2024" });

        assert!(filter.matches(&booked));
        assert!(!filter.matches(&open_slot));
        assert!(!filter.matches(&other_day));
        assert!(!filter.matches(&no_flags));
    }

    #[test]
    fn test_contains_only_matches_strings() {
        let filter = Filter::contains("dateOfBirth", "6/10");

        assert!(filter.matches(&json!({ "dateOfBirth": "6/10/1990" })));
        assert!(!filter.matches(&json!({ "dateOfBirth": 610 })));
        assert!(!filter.matches(&json!({ "dateOfBirth": null })));
        assert!(!filter.matches(&json!({})));
    }
}
