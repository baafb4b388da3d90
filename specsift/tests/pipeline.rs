use std::fs;
use std::path::Path;

use specsift::data_sources::read_spectra;
use specsift::models::ScreenParams;
use specsift::scoring::{
    MatchTableWriter,
    Screener,
};
use tempfile::TempDir;

fn params(theta: f64, precursor_tolerance: f64, fragment_tolerance: f64) -> ScreenParams {
    ScreenParams {
        significance_height: theta,
        precursor_mass_tolerance: precursor_tolerance,
        fragment_mass_tolerance: fragment_tolerance,
    }
}

fn screen_to_table(queries_path: &Path, background_path: &Path, params: ScreenParams) -> String {
    let queries = read_spectra(queries_path).unwrap();
    let background = read_spectra(background_path).unwrap();
    let screener = Screener::new(background, params);
    let rows = screener.screen_iter(&queries);

    let mut buf = Vec::new();
    {
        let mut writer = MatchTableWriter::new(&mut buf);
        writer.write_all(&rows).unwrap();
        writer.flush().unwrap();
    }
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_dta_screen_end_to_end() {
    let dir = TempDir::new().unwrap();
    let queries_dir = dir.path().join("queries");
    let background_dir = dir.path().join("background");
    fs::create_dir(&queries_dir).unwrap();
    fs::create_dir(&background_dir).unwrap();

    // Scores 48/137 against b1, worked through by hand in the scoring tests.
    fs::write(
        queries_dir.join("q1.dta"),
        "1000.0 2\n300.0 50.0\n920.0 80.0\n1050.0 30.0\n",
    )
    .unwrap();
    // No background scan shares this charge.
    fs::write(queries_dir.join("q2.dta"), "800.0 3\n200.0 10.0\n").unwrap();
    fs::write(
        background_dir.join("b1.dta"),
        "1000.0 2\n300.1 60.0\n1050.4 40.0\n",
    )
    .unwrap();

    let table = screen_to_table(&queries_dir, &background_dir, params(0.1, 2.5, 0.5));
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 2, "table was: {:?}", table);

    let hit: Vec<&str> = lines[0].split('\t').collect();
    assert_eq!(hit.len(), 7);
    assert!(hit[0].ends_with("q1.dta"));
    assert!(hit[1].ends_with("b1.dta"));
    assert_eq!(hit[2], "1000");
    assert_eq!(hit[3], "1000");
    assert_eq!(hit[4], "2");
    assert_eq!(hit[5], "2");
    assert_eq!(hit[6], "0.3504");

    let marker: Vec<&str> = lines[1].split('\t').collect();
    assert_eq!(marker.len(), 7);
    assert!(marker[0].ends_with("q2.dta"));
    assert_eq!(marker[1], "no_bckgr_spectra_with_same_precursor_mass");
    assert_eq!(marker[2], "800");
    assert_eq!(marker[3], "not_found");
    assert_eq!(marker[4], "3");
    assert_eq!(marker[5], "not_found");
    assert_eq!(marker[6], "1.00");
}

#[test]
fn test_mgf_queries_against_dta_background() {
    let dir = TempDir::new().unwrap();
    let queries_path = dir.path().join("queries.mgf");
    let background_dir = dir.path().join("background");
    fs::create_dir(&background_dir).unwrap();

    // Charge 2 at m/z 500.5039125 sits at MH+ 1000.0, next to the
    // background scan below.
    fs::write(
        &queries_path,
        "BEGIN IONS\n\
         TITLE=sample.0001.0001.2\n\
         PEPMASS=500.5039125\n\
         CHARGE=2+\n\
         300.0 50.0\n\
         920.0 80.0\n\
         END IONS\n",
    )
    .unwrap();
    fs::write(
        background_dir.join("b1.dta"),
        "1000.0 2\n300.0 50.0\n920.0 80.0\n",
    )
    .unwrap();

    let table = screen_to_table(&queries_path, &background_dir, params(0.05, 2.5, 0.5));
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 1, "table was: {:?}", table);

    let hit: Vec<&str> = lines[0].split('\t').collect();
    assert_eq!(hit.len(), 7);
    assert_eq!(hit[0], "sample.0001.0001.2");
    assert!(hit[1].ends_with("b1.dta"));
    // Identical peak lists score 0.
    assert_eq!(hit[6], "0.0000");
}
