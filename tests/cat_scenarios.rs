use std::fs;

use approx::assert_relative_eq;
use glam::Vec2;

use catfriends::assets::procedural;
use catfriends::{
    Activity, AssetSource, Assets, Cat, CatConfig, CatError, DirAssets, InitialState,
    MemoryAssets, SaveRecord,
};

fn spawn(initial: InitialState, assets: &mut Assets) -> Cat {
    Cat::new(
        &initial,
        Vec2::new(400.0, 300.0),
        CatConfig::default(),
        assets,
        fastrand::Rng::with_seed(2024),
    )
    .unwrap()
}

#[test]
fn feeding_then_idling() {
    let mut assets = Assets::new(procedural::cat_assets("shorthair"));
    let mut cat = spawn(
        InitialState {
            hunger: Some(10.0),
            happiness: Some(50.0),
            ..InitialState::default()
        },
        &mut assets,
    );

    cat.feed();
    assert_relative_eq!(cat.hunger(), 35.0);

    for _ in 0..1000 {
        cat.update(0.1);
    }
    assert_relative_eq!(cat.hunger(), 30.0, epsilon = 1e-2);
    assert_relative_eq!(cat.happiness(), 45.0, epsilon = 1e-2);
    assert_relative_eq!(cat.energy(), 90.0, epsilon = 1e-2);
    assert!(!cat.is_sleeping());
}

#[test]
fn exhausted_cat_sleeps_in_bed_and_wakes_rested() {
    let mut assets = Assets::new(procedural::cat_assets("shorthair"));
    let mut cat = spawn(
        InitialState {
            energy: Some(0.0),
            happiness: Some(80.0),
            ..InitialState::default()
        },
        &mut assets,
    );
    cat.set_bed(100.0, 500.0);
    cat.move_to(700.0, 300.0);

    cat.update(0.1);
    assert!(cat.is_sleeping());
    assert_eq!(cat.activity(), Activity::Sleeping);
    assert_eq!(cat.position(), Vec2::new(100.0, 500.0));
    assert!(cat.target().is_none());

    let mut elapsed = 0.1_f32;
    while cat.is_sleeping() && elapsed < 120.0 {
        cat.update(0.1);
        elapsed += 0.1;
    }
    assert!(!cat.is_sleeping(), "cat never woke up");
    assert_relative_eq!(cat.energy(), 100.0);
    // About 50 s of sleep at 2 energy/s; only ordinary decay, no wake penalty.
    assert!((45.0..56.0).contains(&elapsed));
    assert_relative_eq!(cat.happiness(), 80.0 - 0.05 * elapsed, epsilon = 0.05);
}

#[test]
fn saved_cat_restores_exactly() {
    let mut assets = Assets::new(procedural::cat_assets("shorthair"));
    let json = r#"{
        "cat_id": "mochi",
        "hunger": 55.5,
        "happiness": 12,
        "energy": 30,
        "customization": { "base_color": [60, 60, 60], "pattern_color": null },
        "accessories": { "head": "hat1", "body": "collar1" },
        "is_sleeping": true
    }"#;
    let cat = spawn(InitialState::from_json(json).unwrap(), &mut assets);
    assert_eq!(cat.id(), "mochi");
    assert!(cat.is_sleeping());
    assert_eq!(cat.customization().pattern_color, None);
    assert_eq!(cat.accessory_placements().len(), 2);

    let record = cat.to_record();
    let text = record.to_json().unwrap();
    let back: SaveRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(back, record);
    assert_relative_eq!(back.hunger, 55.5);
    assert!(back.is_sleeping);
}

#[test]
fn templates_load_from_a_directory() {
    let root = std::env::temp_dir().join(format!("catfriends-assets-{}", std::process::id()));
    let painted = procedural::cat_assets("tabby");
    let prefix = "images/cats/custom/tabby";
    for dir in ["base/idle", "base/pet", "base/eat", "base/sleep", "patterns/idle", "eyes/idle", "mouth/idle", "mouth/eat"] {
        fs::create_dir_all(root.join(prefix).join(dir)).unwrap();
        for path in painted.frames_in(&format!("{prefix}/{dir}")) {
            painted.read(&path).unwrap().save(root.join(&path)).unwrap();
        }
    }
    let shade = format!("{prefix}/base/shade.png");
    painted.read(&shade).unwrap().save(root.join(&shade)).unwrap();

    let disk = DirAssets::new(&root);
    assert_eq!(disk.frames_in(&format!("{prefix}/base/idle")).len(), 4);
    assert!(matches!(
        disk.read("images/nothing.png"),
        Err(CatError::MissingAsset { .. })
    ));

    let mut from_disk = Assets::new(disk);
    let mut in_memory = Assets::new(painted);
    let tabby = InitialState::from_json(r#"{ "customization": { "body_type": "tabby" } }"#).unwrap();
    let a = spawn(tabby.clone(), &mut from_disk);
    let b = spawn(tabby, &mut in_memory);
    assert_eq!(**a.image(), **b.image());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_body_is_fatal() {
    let mut assets = Assets::new(MemoryAssets::new());
    let res = Cat::new(
        &InitialState::default(),
        Vec2::ZERO,
        CatConfig::default(),
        &mut assets,
        fastrand::Rng::with_seed(1),
    );
    assert!(matches!(res, Err(CatError::NoBaseFrames { .. })));
}
