// tests/sysfs.rs

use std::fs;

use tempfile::TempDir;
use temperature_rs::core::app::App;
use temperature_rs::core::config::Config;
use temperature_rs::core::report::Outcome;

#[test]
fn linux_tree_via_config_file() {
    let td = TempDir::new().unwrap();
    let zone = td.path().join("thermal").join("thermal_zone0");
    fs::create_dir_all(&zone).unwrap();
    fs::write(zone.join("temp"), "42000\n").unwrap();
    fs::create_dir_all(td.path().join("cpu")).unwrap();

    let config_file = td.path().join("config.toml");
    fs::write(
        &config_file,
        format!(
            "source = \"sysfs\"\n\n[sysfs]\nthermal_base = {:?}\nhwmon_base = {:?}\ncpu_base = {:?}\n",
            td.path().join("thermal"),
            td.path().join("hwmon"),
            td.path().join("cpu"),
        ),
    )
    .unwrap();

    let cfg = Config::load_from(&config_file).unwrap();
    let app = App::with_config(cfg);
    // prints "42°" to the real stdout
    assert_eq!(app.run(["temperature"]).unwrap(), Outcome::Success);
}
