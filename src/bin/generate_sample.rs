use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use caseload::{get_test_data, DataConfig, FormatHint};

/// Canonical login cases: (username, password, description, expected_result).
const CASES: [[&str; 4]; 6] = [
    ["jkcsdw", "123456", "valid credentials", "success"],
    ["invalid_user", "password123", "invalid username", "failure"],
    ["testuser", "wrong_password", "wrong password", "failure"],
    ["", "password123", "empty username", "failure"],
    ["testuser", "", "empty password", "failure"],
    ["", "", "empty credentials", "failure"],
];

const HEADERS: [&str; 4] = ["username", "password", "description", "expected_result"];

fn main() -> Result<()> {
    env_logger::init();

    let config = DataConfig::from_env();
    let out_dir = config.primary_dir();
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    write_csv(&out_dir.join("login_test_data.csv"))?;
    write_json(&out_dir.join("login_test_data.json"))?;

    // Read the fixtures back through the normal pipeline as a smoke check.
    let cases = get_test_data(&config, "login", FormatHint::Auto)?;
    println!(
        "Wrote {} login cases to {}, {} read back",
        CASES.len(),
        out_dir.display(),
        cases.len()
    );
    Ok(())
}

fn write_csv(path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(HEADERS)?;
    for case in &CASES {
        writer.write_record(case)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(path: &Path) -> Result<()> {
    let rows: Vec<_> = CASES
        .iter()
        .map(|case| {
            json!({
                "username": case[0],
                "password": case[1],
                "description": case[2],
                "expected_result": case[3],
            })
        })
        .collect();
    let doc = json!({ "login_test_data": rows });

    fs::write(path, serde_json::to_string_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
