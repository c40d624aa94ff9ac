//! Exit codes and the small commands, driven through the binary.

use std::process::Command;

use tempfile::TempDir;

fn ccstab() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ccstab"))
}

#[test]
fn test_missing_input_is_a_usage_error() {
    let output = ccstab().arg("process").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("required"));
}

#[test]
fn test_unknown_subcommand_is_a_usage_error() {
    let output = ccstab().arg("frobnicate").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_base_url_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.tsv");
    std::fs::write(&input, "cas\n50-00-0\n").unwrap();

    let output = ccstab()
        .arg("process")
        .arg(&input)
        .arg("--pubchem-base")
        .arg("not a url")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--pubchem-base"));
}

#[test]
fn test_scramble_emits_starred_password() {
    let output = ccstab().arg("scramble").arg("dav").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "*cbu\n");
}

#[test]
fn test_auth_set_status_clear_round_trip() {
    let home = TempDir::new().unwrap();

    let run = |args: &[&str]| {
        let output = ccstab()
            .args(args)
            .env("HOME", home.path())
            .env_remove("XDG_CONFIG_HOME")
            .output()
            .unwrap();
        assert_eq!(
            output.status.code(),
            Some(0),
            "args {:?} stderr: {}",
            args,
            String::from_utf8_lossy(&output.stderr),
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    };

    assert!(run(&["auth", "status"]).contains("no stored credentials"));

    // Token carries the scramble marker and must be decoded before storage
    run(&["auth", "set", "--user", "ada", "--token", "*cbu"]);
    assert!(home
        .path()
        .join(".config")
        .join("ccstab")
        .join("auth.json")
        .exists());
    assert!(run(&["auth", "status"]).contains("authenticated as ada"));

    let stored =
        std::fs::read_to_string(home.path().join(".config/ccstab/auth.json")).unwrap();
    assert!(stored.contains("\"dav\""));

    run(&["auth", "clear"]);
    assert!(run(&["auth", "status"]).contains("no stored credentials"));
}

#[test]
fn test_agilent_renders_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("table.tsv");
    std::fs::write(
        &input,
        "Neutral Name\tkegg\tcid\tcas\tformula\tmass\tmPlusHCCS\tmPlusNaCCS\tmMinusHCCS\n\
         Hydroxyproline\tC01157\t5810\t51-35-4\tC5H9NO3\t131.0582\t133.6\tN/A\t\n",
    )
    .unwrap();

    let output = ccstab().arg("agilent").arg(&input).output().unwrap();
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("###Formula\tMass\tCompound name"));
    assert!(stdout.contains("\tpositive\t(M+H)+\t133.6\t\tN2\t\t"));
    // The N/A and empty adduct cells emit nothing
    assert!(!stdout.contains("(M+Na)+"));
    assert!(!stdout.contains("(M-H)-"));
}

#[test]
fn test_agilent_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("table.tsv");
    std::fs::write(
        &input,
        "Neutral Name\tkegg\tcid\tcas\tformula\tmass\tmPlusHCCS\tmPlusNaCCS\tmMinusHCCS\n\
         Hydroxyproline\tC01157\t5810\t51-35-4\tC5H9NO3\t131.0582\t133.6\t\t\n",
    )
    .unwrap();
    let out = dir.path().join("agilent.tsv");

    let output = ccstab()
        .arg("agilent")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("(M+H)+"));
}

#[test]
fn test_agilent_missing_adduct_columns_is_a_schema_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("table.tsv");
    std::fs::write(
        &input,
        "Neutral Name\tkegg\tcid\tcas\tformula\tmass\nValine\tC00183\t6287\t72-18-4\tC5H11NO2\t117.079\n",
    )
    .unwrap();

    let output = ccstab().arg("agilent").arg(&input).output().unwrap();
    assert_eq!(output.status.code(), Some(12));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"));
}
