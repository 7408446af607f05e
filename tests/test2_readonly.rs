use websql_bridge::prelude::*;

const READ_ONLY_MESSAGE: &str = "could not prepare statement (23 not authorized)";

fn scratch_registry() -> (tempfile::TempDir, StoreRegistry) {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = StoreRegistry::new(dir.path());
    (dir, registry)
}

#[test]
fn read_only_rejects_every_non_select() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, registry) = scratch_registry();
    let result = execute_batch(
        &registry,
        &BatchRequest::new(
            "ro",
            vec![
                QueryAndParams::new_without_params("CREATE TABLE t (a INTEGER)"),
                QueryAndParams::new_without_params("INSERT INTO t VALUES (1)"),
                QueryAndParams::new_without_params("SELECT * FROM t"),
                QueryAndParams::new_without_params("garbage sql"),
            ],
            true,
        ),
    )?;

    assert_eq!(result.len(), 4);
    assert_eq!(result.outcomes[0].failure_message(), Some(READ_ONLY_MESSAGE));
    assert_eq!(result.outcomes[1].failure_message(), Some(READ_ONLY_MESSAGE));
    // The select ran and failed on its own terms: the table never existed.
    let select_message = result.outcomes[2].failure_message().expect("failure");
    assert!(select_message.contains("no such table"), "got {select_message:?}");
    // Garbage classifies as Other, so the gate rejects it before the driver
    // ever sees the syntax error.
    assert_eq!(result.outcomes[3].failure_message(), Some(READ_ONLY_MESSAGE));
    Ok(())
}

#[test]
fn read_only_leaves_no_side_effects() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, registry) = scratch_registry();
    execute_batch(
        &registry,
        &BatchRequest::new(
            "effects",
            vec![QueryAndParams::new_without_params("CREATE TABLE guard (x)")],
            true,
        ),
    )?;

    let probe = execute_batch(
        &registry,
        &BatchRequest::new(
            "effects",
            vec![QueryAndParams::new_without_params("SELECT * FROM guard")],
            false,
        ),
    )?;
    let message = probe.outcomes[0].failure_message().expect("failure");
    assert!(message.contains("no such table"), "got {message:?}");
    Ok(())
}

#[test]
fn read_only_selects_still_return_rows() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, registry) = scratch_registry();
    execute_batch(
        &registry,
        &BatchRequest::new(
            "mixed_ro",
            vec![
                QueryAndParams::new_without_params("CREATE TABLE t (v INTEGER)"),
                QueryAndParams::new_without_params("INSERT INTO t VALUES (9)"),
            ],
            false,
        ),
    )?;

    let result = execute_batch(
        &registry,
        &BatchRequest::new(
            "mixed_ro",
            vec![
                QueryAndParams::new_without_params("DELETE FROM t"),
                QueryAndParams::new("SELECT v FROM t WHERE v = ?1", vec![WireValue::Int(9)]),
            ],
            true,
        ),
    )?;
    assert_eq!(result.outcomes[0].failure_message(), Some(READ_ONLY_MESSAGE));
    let rows = result.outcomes[1].as_rows().expect("rows");
    assert_eq!(rows.rows, vec![vec![WireValue::Int(9)]]);

    // The delete was rejected, so the row survives for read-write callers.
    let check = execute_batch(
        &registry,
        &BatchRequest::new(
            "mixed_ro",
            vec![QueryAndParams::new_without_params(
                "SELECT COUNT(*) AS cnt FROM t",
            )],
            false,
        ),
    )?;
    let rows = check.outcomes[0].as_rows().expect("rows");
    assert_eq!(rows.value(0, "cnt"), Some(&WireValue::Int(1)));
    Ok(())
}

#[test]
fn leading_whitespace_select_passes_the_gate() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, registry) = scratch_registry();
    let result = execute_batch(
        &registry,
        &BatchRequest::new(
            "ws",
            vec![QueryAndParams::new_without_params("   \n\tSELECT 1 AS one")],
            true,
        ),
    )?;
    let rows = result.outcomes[0].as_rows().expect("rows");
    assert_eq!(rows.value(0, "one"), Some(&WireValue::Int(1)));
    Ok(())
}
