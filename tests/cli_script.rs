use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const VALID_ENTRY: &str =
    "entry PANCA WISANTA|123456|1234567890123456789|12345678901234|Tanpa Iterasi|Ne Detur";

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("resep_core_cli").unwrap();
    cmd.env("RESEP_CORE_CLI_SCRIPT", "1")
        .env("RESEP_CORE_HOME", home.path());
    cmd
}

#[test]
fn script_mode_saves_an_entry() {
    let home = TempDir::new().unwrap();
    let input = format!("{VALID_ENTRY}\nstatus\nexit\n");

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Data Saved! ID: 1"))
        .stdout(contains("Jumlah data: 1"));

    let workbook = home.path().join("workbooks").join("resep.json");
    let data = std::fs::read_to_string(workbook).unwrap();
    assert!(data.contains("12345678901234"));
    assert!(data.contains("PANCA WISANTA"));
}

#[test]
fn script_mode_rejects_a_duplicate_prescription_number() {
    let home = TempDir::new().unwrap();
    let input = format!("{VALID_ENTRY}\n{VALID_ENTRY}\nexit\n");

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Data Saved! ID: 1"))
        .stdout(contains("DATA GANDA: Nomor Resep 12345678901234 sudah ada!"));
}

#[test]
fn script_mode_reports_every_validation_message() {
    let home = TempDir::new().unwrap();
    let input = "entry |12345|123|123|Tanpa Iterasi|Ne Detur\nexit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Nama Pasien wajib diisi."))
        .stdout(contains("Nomor RM harus tepat 6 angka."))
        .stdout(contains("Nomor SEP harus tepat 19 karakter."))
        .stdout(contains("Nomor Resep harus tepat 14 angka."));
}

#[test]
fn script_mode_suggests_the_nearest_command() {
    let home = TempDir::new().unwrap();

    script_command(&home)
        .write_stdin("entyr\nexit\n")
        .assert()
        .success()
        .stdout(contains("Maksud Anda `entry`?"));
}
