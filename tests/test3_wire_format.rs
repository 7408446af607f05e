use websql_bridge::prelude::*;

fn scratch_registry() -> (tempfile::TempDir, StoreRegistry) {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = StoreRegistry::new(dir.path());
    (dir, registry)
}

#[test]
fn executed_batch_encodes_to_the_expected_wire_string() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, registry) = scratch_registry();
    let result = execute_batch(
        &registry,
        &BatchRequest::new(
            "wire",
            vec![
                QueryAndParams::new_without_params("CREATE TABLE t (a INTEGER, b TEXT)"),
                QueryAndParams::new(
                    "INSERT INTO t VALUES (?1, ?2)",
                    vec![WireValue::Int(1), WireValue::Text("x".into())],
                ),
                QueryAndParams::new_without_params("SELECT a, b FROM t"),
                QueryAndParams::new_without_params("garbage sql"),
            ],
            false,
        ),
    )?;
    let wire = encode_batch_result(&result)?;

    // The failure message is driver text; check everything around it exactly.
    assert!(wire.starts_with(
        r#"[[null,0,0,[],[]],[null,1,1,[],[]],[null,0,0,["a","b"],[[1,"x"]]],[""#
    ));
    assert!(wire.ends_with(r#"",0,0,[],[]]]"#));
    Ok(())
}

#[test]
fn wire_output_parses_as_plain_json() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, registry) = scratch_registry();
    let result = execute_batch(
        &registry,
        &BatchRequest::new(
            "parse",
            vec![
                QueryAndParams::new_without_params("CREATE TABLE p (f REAL, t TEXT, n INTEGER)"),
                QueryAndParams::new(
                    "INSERT INTO p VALUES (?1, ?2, ?3)",
                    vec![
                        WireValue::Float(2.5),
                        WireValue::Text("say \"hi\"".into()),
                        WireValue::Null,
                    ],
                ),
                QueryAndParams::new_without_params("SELECT f, t, n FROM p"),
            ],
            false,
        ),
    )?;
    let wire = encode_batch_result(&result)?;
    let parsed: serde_json::Value = serde_json::from_str(&wire)?;

    let entries = parsed.as_array().expect("outer array");
    assert_eq!(entries.len(), 3);
    for entry in entries {
        assert_eq!(entry.as_array().expect("quintuple").len(), 5);
    }

    let select = entries[2].as_array().unwrap();
    assert!(select[0].is_null());
    assert_eq!(select[3], serde_json::json!(["f", "t", "n"]));
    assert_eq!(select[4], serde_json::json!([[2.5, "say \"hi\"", null]]));
    Ok(())
}

#[test]
fn select_yielding_no_rows_encodes_empty_arrays() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, registry) = scratch_registry();
    let result = execute_batch(
        &registry,
        &BatchRequest::new(
            "void",
            vec![
                QueryAndParams::new_without_params("CREATE TABLE v (a INTEGER)"),
                QueryAndParams::new_without_params("SELECT a FROM v"),
            ],
            false,
        ),
    )?;
    let wire = encode_batch_result(&result)?;
    assert_eq!(wire, "[[null,0,0,[],[]],[null,0,0,[],[]]]");
    Ok(())
}

#[test]
fn read_only_failure_is_spelled_exactly_on_the_wire() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, registry) = scratch_registry();
    let result = execute_batch(
        &registry,
        &BatchRequest::new(
            "guard",
            vec![QueryAndParams::new_without_params("DROP TABLE anything")],
            true,
        ),
    )?;
    let wire = encode_batch_result(&result)?;
    assert_eq!(
        wire,
        r#"[["could not prepare statement (23 not authorized)",0,0,[],[]]]"#
    );
    Ok(())
}

#[test]
fn integer_and_float_cells_keep_distinct_spellings() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, registry) = scratch_registry();
    let result = execute_batch(
        &registry,
        &BatchRequest::new(
            "nums",
            vec![
                QueryAndParams::new_without_params("CREATE TABLE n (i INTEGER, r REAL)"),
                QueryAndParams::new_without_params("INSERT INTO n VALUES (1, 1.0)"),
                QueryAndParams::new_without_params("SELECT i, r FROM n"),
            ],
            false,
        ),
    )?;
    let wire = encode_batch_result(&result)?;
    // 1 stays an integer literal; 1.0 keeps its fraction.
    assert!(wire.contains(r#"[[1,1.0]]"#), "got {wire}");
    Ok(())
}
