//! Integration tests for the JSON file store and cat management

mod common;

use common::{day, healthy_sheet, TestApp};
use happy_kitty_app::error::AppError;
use happy_kitty_app::services::{CatService, CheckInService, ExportService, GoalService, WeightService};
use happy_kitty_shared::validation::{GoalInput, LogWeightInput, NewCat};
use happy_kitty_shared::{CatUpdate, WeightUnit};
use std::fs;

#[test]
fn test_records_survive_reopen() {
    let mut app = TestApp::on_disk();
    let cat = app.add_cat();
    app.check_in(cat.id, day(2024, 7, 1), &healthy_sheet());
    let input = LogWeightInput { weight: 9.0, unit: WeightUnit::Lbs, date: day(2024, 7, 1) };
    WeightService::log_weight(app.repo(), cat.id, input).unwrap();

    app.reopen();

    assert_eq!(CatService::list(&*app.repo).unwrap(), vec![cat.clone()]);
    assert_eq!(CatService::resolve(&*app.repo, None).unwrap().id, cat.id);
    assert_eq!(CheckInService::records(&*app.repo, cat.id).unwrap().len(), 1);
    assert_eq!(WeightService::preferred_unit(&*app.repo).unwrap(), WeightUnit::Lbs);
    assert_eq!(WeightService::list(&*app.repo, cat.id).unwrap()[0].weight, 9.0);
}

#[test]
fn test_store_file_is_camel_case_json() {
    let mut app = TestApp::on_disk();
    let cat = app.add_cat();
    app.check_in(cat.id, day(2024, 7, 1), &healthy_sheet());

    let raw = fs::read_to_string(app.store_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["selectedCatId"], cat.id.to_string());
    assert_eq!(json["healthRecords"][0]["date"], "2024-07-01");
    assert_eq!(json["healthRecords"][0]["percentage"], 100);
}

#[test]
fn test_corrupt_file_opens_as_empty_store() {
    let mut app = TestApp::on_disk();
    app.add_cat();

    fs::write(app.store_path(), "{ this is not json").unwrap();
    app.reopen();

    assert!(CatService::list(&*app.repo).unwrap().is_empty());
    assert!(matches!(CatService::resolve(&*app.repo, None), Err(AppError::NotFound(_))));
}

#[test]
fn test_default_unit_for_new_store() {
    let app = TestApp::on_disk_with_unit(WeightUnit::Lbs);
    assert_eq!(WeightService::preferred_unit(&*app.repo).unwrap(), WeightUnit::Lbs);
}

#[test]
fn test_delete_cat_cascades() {
    let mut app = TestApp::on_disk();
    let keep = app.add_cat();
    let gone = app.add_cat();

    for cat_id in [keep.id, gone.id] {
        app.check_in(cat_id, day(2024, 7, 1), &healthy_sheet());
        let input = LogWeightInput { weight: 4.0, unit: WeightUnit::Kg, date: day(2024, 7, 1) };
        WeightService::log_weight(app.repo(), cat_id, input).unwrap();
        let goal = GoalInput { min_weight: 3.5, max_weight: 5.5, unit: WeightUnit::Kg };
        GoalService::set_goal(app.repo(), cat_id, goal).unwrap();
    }

    CatService::delete(app.repo(), gone.id).unwrap();
    app.reopen();

    assert!(CheckInService::records(&*app.repo, gone.id).unwrap().is_empty());
    assert!(WeightService::list(&*app.repo, gone.id).unwrap().is_empty());
    assert!(GoalService::get_goal(&*app.repo, gone.id).unwrap().is_none());
    // the deleted cat was selected
    assert!(CatService::resolve(&*app.repo, None).is_err());

    assert_eq!(CheckInService::records(&*app.repo, keep.id).unwrap().len(), 1);
    assert!(GoalService::get_goal(&*app.repo, keep.id).unwrap().is_some());
    assert_eq!(CatService::resolve(&*app.repo, Some(keep.id)).unwrap().id, keep.id);
}

#[test]
fn test_cat_edit_and_select() {
    let mut app = TestApp::in_memory();
    let first = app.add_cat();
    let second = app.add_cat();
    assert_eq!(CatService::resolve(&*app.repo, None).unwrap().id, second.id);

    CatService::select(app.repo(), first.id).unwrap();
    assert_eq!(CatService::resolve(&*app.repo, None).unwrap().id, first.id);

    let update = CatUpdate { name: Some("  Mochi  ".to_string()), photo: Some(Some("mochi.png".to_string())) };
    let cat = CatService::update(app.repo(), first.id, update).unwrap();
    assert_eq!(cat.name, "Mochi");
    assert_eq!(cat.photo.as_deref(), Some("mochi.png"));

    let update = CatUpdate { name: Some("   ".to_string()), photo: None };
    assert!(matches!(
        CatService::update(app.repo(), first.id, update),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn test_cat_name_limits() {
    let mut app = TestApp::in_memory();
    assert!(CatService::add(app.repo(), NewCat::new("", None)).is_err());
    assert!(CatService::add(app.repo(), NewCat::new(&"x".repeat(51), None)).is_err());
    assert!(CatService::add(app.repo(), NewCat::new(&"x".repeat(50), None)).is_ok());
}

#[test]
fn test_export_from_file_store() {
    let mut app = TestApp::on_disk();
    let cat = CatService::add(app.repo(), NewCat::new("Miss Whiskers", None)).unwrap();
    app.check_in(cat.id, day(2024, 7, 1), &healthy_sheet());
    app.check_in(cat.id, day(2024, 7, 2), &healthy_sheet());

    let report = ExportService::build_report(&*app.repo, cat, day(2024, 7, 3), 30).unwrap();
    let out = tempfile::tempdir().unwrap();
    let paths = ExportService::write_files(&report, out.path()).unwrap();

    assert!(paths.report.ends_with("Miss_Whiskers_health_report_2024-07-03.json"));
    let health = fs::read_to_string(&paths.health_csv).unwrap();
    assert_eq!(health.lines().count(), 3);
    assert!(health.contains("2024-07-02,80,100,Excellent,All normal"));

    let weight = fs::read_to_string(&paths.weight_csv).unwrap();
    assert_eq!(weight, "date,weight,unit\n");
}
