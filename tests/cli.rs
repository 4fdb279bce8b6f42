use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BLOG: &str = r#"{
  "version": 1,
  "schemas": [
    { "id": "s1", "name": "public" },
    { "id": "s2", "name": "content" }
  ],
  "tables": [
    {
      "id": "t2", "schemaId": "s2", "name": "posts",
      "columns": [
        { "id": "c3", "name": "id", "type": "uuid", "nullable": false, "isPrimaryKey": true },
        { "id": "c4", "name": "author_id", "type": "uuid", "nullable": false, "isIndexed": true }
      ],
      "foreignKeys": [
        { "id": "f1", "name": "fk_posts_author", "fromColumnId": "c4",
          "toTableId": "t1", "toColumnId": "c1", "onDelete": "CASCADE" }
      ]
    },
    {
      "id": "t1", "schemaId": "s1", "name": "users",
      "columns": [
        { "id": "c1", "name": "id", "type": "uuid", "nullable": false, "isPrimaryKey": true },
        { "id": "c2", "name": "email", "type": "text", "nullable": false, "isUnique": true }
      ]
    }
  ],
  "types": [
    { "id": "e1", "schemaId": "s1", "name": "mood", "values": ["happy", "sad"] }
  ]
}"#;

const DANGLING: &str = r#"{
  "schemas": [{ "id": "s1", "name": "public" }],
  "tables": [
    {
      "id": "t1", "schemaId": "s1", "name": "orders",
      "columns": [
        { "id": "c1", "name": "id", "type": "uuid", "nullable": false, "isPrimaryKey": true },
        { "id": "c2", "name": "customer_id", "type": "uuid" }
      ],
      "foreignKeys": [
        { "id": "f1", "name": "fk_orders_customer", "fromColumnId": "c2",
          "toTableId": "gone", "toColumnId": "gone" }
      ]
    }
  ]
}"#;

fn write_model(dir: &TempDir, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, json).unwrap();
    path
}

fn ddlforge() -> Command {
    Command::cargo_bin("ddlforge").unwrap()
}

#[test]
fn test_generate_prints_ordered_ddl() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, "blog.json", BLOG);

    let output = ddlforge().arg("generate").arg(&model).output().unwrap();
    assert!(output.status.success());

    let sql = String::from_utf8(output.stdout).unwrap();
    assert!(sql.starts_with("CREATE SCHEMA IF NOT EXISTS \"content\";"));
    assert!(sql.contains("CREATE TYPE \"public\".\"mood\" AS ENUM ('happy', 'sad');"));
    let users = sql.find("CREATE TABLE \"public\".\"users\"").unwrap();
    let posts = sql.find("CREATE TABLE \"content\".\"posts\"").unwrap();
    assert!(users < posts);
    assert!(sql.contains("REFERENCES \"public\".\"users\" (\"id\") ON DELETE CASCADE"));
    assert!(sql.contains("CREATE INDEX \"idx_posts_author_id\""));
}

#[test]
fn test_generate_to_file_with_flags() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, "blog.json", BLOG);
    let out = dir.path().join("schema.sql");

    ddlforge()
        .args(["generate", "--no-indexes", "--default-schema", "content", "--output"])
        .arg(&out)
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let sql = fs::read_to_string(&out).unwrap();
    assert!(sql.starts_with("CREATE SCHEMA IF NOT EXISTS \"public\";"));
    assert!(!sql.contains("CREATE INDEX"));
}

#[test]
fn test_generate_sanitizes_and_skips_nothing_afterwards() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, "dangling.json", DANGLING);

    ddlforge()
        .arg("generate")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE \"public\".\"orders\""))
        .stdout(predicate::str::contains("FOREIGN KEY").not())
        .stderr(predicate::str::contains("1 repair(s) applied"));
}

#[test]
fn test_validate_valid_model() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, "blog.json", BLOG);

    ddlforge()
        .arg("validate")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 table(s), 1 foreign key(s)"));
}

#[test]
fn test_validate_reports_errors_and_saves_repair() {
    let dir = TempDir::new().unwrap();
    let model = write_model(&dir, "dangling.json", DANGLING);
    let fixed = dir.path().join("fixed.json");

    ddlforge()
        .arg("validate")
        .arg(&model)
        .arg("--sanitized-output")
        .arg(&fixed)
        .assert()
        .failure()
        .stdout(predicate::str::contains("dangling_foreign_key_target"))
        .stderr(predicate::str::contains("1 error(s)"));

    ddlforge().arg("validate").arg(&fixed).assert().success();
}

#[test]
fn test_missing_file_fails() {
    ddlforge()
        .args(["generate", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not load model"));
}
