//! Query model unit tests

#[cfg(test)]
mod tests {
    use crate::query_builder::{
        values, Action, FilterValue, Query, QueryBuilder, QueryFilter, QueryOperator,
        SortDirection, SortSpec, SqlGenerator, ValueMap,
    };
    use type_mapping::ScalarValue;

    // ========================================
    // QueryFilter construction
    // ========================================

    #[test]
    fn test_filter_constructors_pair_operator_and_shape() {
        let filters = [
            (QueryFilter::eq("a", 1), QueryOperator::Equals),
            (QueryFilter::ne("a", 1), QueryOperator::NotEquals),
            (QueryFilter::like("a", "%x%"), QueryOperator::Like),
            (QueryFilter::gt("a", 1), QueryOperator::GreaterThan),
            (QueryFilter::lt("a", 1), QueryOperator::LessThan),
            (QueryFilter::in_set("a", [1, 2]), QueryOperator::InSet),
        ];

        for (filter, operator) in filters {
            assert_eq!(filter.operator(), operator);
            assert!(filter.is_well_formed());
        }
    }

    #[test]
    fn test_filter_special_characters_stay_in_args() {
        let filter = QueryFilter::eq("name", "'; DROP TABLE users; --");
        let mut args = Vec::new();
        let sql = SqlGenerator::build_filter_sql(&filter, &mut args);

        assert_eq!(sql, "name = ?");
        assert_eq!(args, vec![ScalarValue::from("'; DROP TABLE users; --")]);
    }

    #[test]
    fn test_filter_operators_sql() {
        let cases = [
            (QueryFilter::eq("age", 1), "age = ?"),
            (QueryFilter::ne("age", 1), "age != ?"),
            (QueryFilter::like("title", "%a%"), "title LIKE ?"),
            (QueryFilter::gt("age", 1), "age > ?"),
            (QueryFilter::lt("age", 1), "age < ?"),
            (QueryFilter::in_set("age", [1, 2, 3]), "age IN (?, ?, ?)"),
        ];

        for (filter, expected) in cases {
            let mut args = Vec::new();
            assert_eq!(SqlGenerator::build_filter_sql(&filter, &mut args), expected);
        }
    }

    // ========================================
    // Empty-set and mismatch safety
    // ========================================

    #[test]
    fn test_empty_in_set_is_always_false() {
        let query = QueryBuilder::new()
            .filter(QueryFilter::in_set("status", Vec::<String>::new()))
            .select_from("t");
        let compiled = query.compile();

        assert_eq!(compiled.sql, "SELECT * FROM t WHERE 1=0");
        assert!(compiled.args.is_empty());
        assert!(!compiled.sql.contains("()"));
    }

    #[test]
    fn test_mismatched_filter_degrades_to_false() {
        // only reachable through deserialization
        let filter: QueryFilter = serde_json::from_str(
            r#"{"field":"age","operator":"Equals","value":{"Multiple":[{"Integer":1}]}}"#,
        )
        .unwrap();
        assert!(!filter.is_well_formed());

        let compiled = QueryBuilder::new()
            .filter(filter)
            .filter(QueryFilter::eq("name", "x"))
            .select_from("t")
            .compile();

        assert_eq!(compiled.sql, "SELECT * FROM t WHERE 1=0 AND name = ?");
        assert_eq!(compiled.args, vec![ScalarValue::from("x")]);
    }

    #[test]
    fn test_in_set_with_single_value_degrades_to_false() {
        let filter: QueryFilter = serde_json::from_str(
            r#"{"field":"id","operator":"InSet","value":{"Single":{"Integer":7}}}"#,
        )
        .unwrap();
        assert!(matches!(filter.value(), FilterValue::Single(_)));

        let mut args = Vec::new();
        assert_eq!(SqlGenerator::build_filter_sql(&filter, &mut args), "1=0");
        assert!(args.is_empty());
    }

    // ========================================
    // Select
    // ========================================

    #[test]
    fn test_select_all_clauses_in_fixed_order() {
        let compiled = QueryBuilder::new()
            .fields(&["id", "title"])
            .filter(QueryFilter::gt("age", 18))
            .filter(QueryFilter::in_set("status", ["a", "b"]))
            .order_by("createdAt", SortDirection::Descending)
            .order_by("id", SortDirection::Ascending)
            .limit(10)
            .offset(20)
            .select_from("note")
            .compile();

        assert_eq!(
            compiled.sql,
            "SELECT id, title FROM note WHERE age > ? AND status IN (?, ?) ORDER BY createdAt DESC, id ASC LIMIT 10 OFFSET 20"
        );
        assert_eq!(
            compiled.args,
            vec![
                ScalarValue::Integer(18),
                ScalarValue::from("a"),
                ScalarValue::from("b")
            ]
        );
    }

    #[test]
    fn test_select_without_anything() {
        let compiled = QueryBuilder::new().select_from("note").compile();
        assert_eq!(compiled.sql, "SELECT * FROM note");
        assert!(compiled.args.is_empty());
    }

    #[test]
    fn test_limit_and_offset_clauses() {
        assert_eq!(SqlGenerator::build_limit_clause(Some(5), None), "LIMIT 5");
        assert_eq!(
            SqlGenerator::build_limit_clause(None, Some(5)),
            "LIMIT -1 OFFSET 5"
        );
        assert_eq!(SqlGenerator::build_limit_clause(None, None), "");
    }

    // ========================================
    // Insert / InsertMany
    // ========================================

    #[test]
    fn test_insert_columns_sorted() {
        let query = Query::new("t", Action::insert(values([("b", 1), ("a", 2)])));
        let compiled = query.compile();

        assert_eq!(compiled.sql, "INSERT INTO t (a, b) VALUES (?, ?)");
        assert_eq!(
            compiled.args,
            vec![ScalarValue::Integer(2), ScalarValue::Integer(1)]
        );
    }

    #[test]
    fn test_insert_empty_map_uses_default_values() {
        let compiled = Query::new("t", Action::insert(values(Vec::<(&str, i64)>::new()))).compile();
        assert_eq!(compiled.sql, "INSERT INTO t DEFAULT VALUES");
        assert!(!compiled.is_noop());
    }

    #[test]
    fn test_insert_null_value_is_bound() {
        let compiled = Query::new(
            "t",
            Action::insert(values([("a", ScalarValue::Null), ("b", ScalarValue::from(1))])),
        )
        .compile();

        assert_eq!(compiled.args, vec![ScalarValue::Null, ScalarValue::Integer(1)]);
    }

    #[test]
    fn test_insert_many_fills_missing_keys_with_null() {
        let rows = vec![
            values([("b", 1), ("a", 2)]),
            values([("c", 3)]),
        ];
        let compiled = Query::new("t", Action::insert_many(rows)).compile();

        assert_eq!(
            compiled.sql,
            "INSERT INTO t (a, b, c) VALUES (?, ?, ?), (?, ?, ?)"
        );
        assert_eq!(
            compiled.args,
            vec![
                ScalarValue::Integer(2),
                ScalarValue::Integer(1),
                ScalarValue::Null,
                ScalarValue::Null,
                ScalarValue::Null,
                ScalarValue::Integer(3),
            ]
        );
    }

    #[test]
    fn test_insert_many_without_rows_is_noop() {
        let compiled = Query::new("t", Action::insert_many(Vec::new())).compile();
        assert!(compiled.is_noop());
        assert!(compiled.args.is_empty());
    }

    #[test]
    fn test_insert_many_of_empty_rows_is_noop() {
        let rows = vec![ValueMap::new(), ValueMap::new()];
        let compiled = Query::new("t", Action::insert_many(rows)).compile();
        assert!(compiled.is_noop());
        assert!(compiled.args.is_empty());
    }

    // ========================================
    // Update / Delete
    // ========================================

    #[test]
    fn test_update_set_args_precede_filter_args() {
        let compiled = Query::new(
            "t",
            Action::update(
                values([("name", "x"), ("city", "y")]),
                vec![QueryFilter::eq("id", 9)],
            ),
        )
        .compile();

        assert_eq!(compiled.sql, "UPDATE t SET city = ?, name = ? WHERE id = ?");
        assert_eq!(
            compiled.args,
            vec![
                ScalarValue::from("y"),
                ScalarValue::from("x"),
                ScalarValue::Integer(9)
            ]
        );
    }

    #[test]
    fn test_update_with_no_values_is_noop() {
        let compiled = Query::new(
            "t",
            Action::update(values(Vec::<(&str, i64)>::new()), vec![QueryFilter::eq("id", 1)]),
        )
        .compile();
        assert!(compiled.is_noop());
    }

    #[test]
    fn test_delete_with_and_without_filters() {
        let all = Query::new("t", Action::delete(Vec::new())).compile();
        assert_eq!(all.sql, "DELETE FROM t");

        let some = Query::new("t", Action::delete(vec![QueryFilter::lt("age", 3)])).compile();
        assert_eq!(some.sql, "DELETE FROM t WHERE age < ?");
        assert_eq!(some.args, vec![ScalarValue::Integer(3)]);
    }

    #[test]
    fn test_delete_many_preserves_id_order() {
        let compiled = Query::new("t", Action::delete_many("id", [3, 1, 2])).compile();

        assert_eq!(compiled.sql, "DELETE FROM t WHERE id IN (?, ?, ?)");
        assert_eq!(
            compiled.args,
            vec![
                ScalarValue::Integer(3),
                ScalarValue::Integer(1),
                ScalarValue::Integer(2)
            ]
        );
    }

    #[test]
    fn test_delete_many_empty_ids() {
        let compiled = Query::new("t", Action::delete_many("id", Vec::<i64>::new())).compile();
        assert_eq!(compiled.sql, "DELETE FROM t WHERE 1=0");
        assert!(compiled.args.is_empty());
    }

    // ========================================
    // Upsert
    // ========================================

    #[test]
    fn test_upsert_default_refresh_set() {
        let compiled = Query::new(
            "t",
            Action::upsert(
                values([
                    ("id", ScalarValue::from(1)),
                    ("name", ScalarValue::from("x")),
                    ("age", ScalarValue::from(2)),
                ]),
                &["id"],
            ),
        )
        .compile();

        assert_eq!(
            compiled.sql,
            "INSERT INTO t (age, id, name) VALUES (?, ?, ?) ON CONFLICT (id) DO UPDATE SET age = excluded.age, name = excluded.name"
        );
        assert_eq!(
            compiled.args,
            vec![
                ScalarValue::Integer(2),
                ScalarValue::Integer(1),
                ScalarValue::from("x")
            ]
        );
    }

    #[test]
    fn test_upsert_explicit_fields_keep_author_order() {
        let compiled = Query::new(
            "t",
            Action::upsert(values([("b", 1), ("a", 2), ("k2", 3), ("k1", 4)]), &["k2", "k1"])
                .with_update_fields(&["b", "a"]),
        )
        .compile();

        assert!(compiled
            .sql
            .ends_with("ON CONFLICT (k2, k1) DO UPDATE SET b = excluded.b, a = excluded.a"));
    }

    #[test]
    fn test_upsert_degenerate_cases() {
        let only_key = Query::new("t", Action::upsert(values([("id", 1)]), &["id"])).compile();
        assert_eq!(
            only_key.sql,
            "INSERT INTO t (id) VALUES (?) ON CONFLICT (id) DO NOTHING"
        );

        let no_target = Query::new("t", Action::upsert(values([("id", 1)]), &[])).compile();
        assert_eq!(
            no_target.sql,
            "INSERT INTO t (id) VALUES (?) ON CONFLICT DO NOTHING"
        );

        let empty = Query::new("t", Action::upsert(values(Vec::<(&str, i64)>::new()), &["id"]))
            .compile();
        assert!(empty.is_noop());
    }

    #[test]
    fn test_with_update_fields_ignored_by_other_actions() {
        let action = Action::delete(Vec::new()).with_update_fields(&["a"]);
        assert_eq!(action, Action::delete(Vec::new()));
    }

    // ========================================
    // Ordering helpers
    // ========================================

    #[test]
    fn test_order_clause() {
        assert_eq!(SqlGenerator::build_order_clause(&[]), "");
        assert_eq!(
            SqlGenerator::build_order_clause(&[SortSpec::asc("a"), SortSpec::desc("b")]),
            "ORDER BY a ASC, b DESC"
        );
    }

    #[test]
    fn test_action_verbs() {
        assert_eq!(Action::insert_many(Vec::new()).verb(), "insert_many");
        assert!(QueryBuilder::new().into_action().is_read());
        assert!(!Action::delete(Vec::new()).is_read());
    }
}
