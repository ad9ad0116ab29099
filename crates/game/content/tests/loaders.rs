use std::fs;
use std::path::PathBuf;

use tactics_content::{CardLoader, ConfigLoader, ContentFactory, ItemLoader};
use tactics_core::{
    CardId, EffectKind, EquipmentSlot, GameConfig, ItemId, SaveData, StatKind, TurnPhase,
    UnitClass,
};
use tempfile::TempDir;

fn bundled_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "initial_hand_size = 3\npoison_damage = 2\n");

    let config = ConfigLoader::load(&path).unwrap();
    assert_eq!(config.initial_hand_size, 3);
    assert_eq!(config.poison_damage, 2);
    assert_eq!(config.base_action_points, GameConfig::DEFAULT_BASE_ACTION_POINTS);
    assert_eq!(config.shield_decay, 100);
}

#[test]
fn malformed_config_reports_parse_failure() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "initial_hand_size = \"many\"");

    let error = ConfigLoader::load(&path).unwrap_err().to_string();
    assert!(error.contains("Failed to parse config TOML"));
}

#[test]
fn card_catalog_keeps_effect_order() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "cards.ron",
        r#"(cards: [(
            id: CardId(9),
            name: "Double Tap",
            left: [(kind: Attack, value: 3, range: 1), (kind: Attack, value: 5, range: 2)],
        )])"#,
    );

    let cards = CardLoader::load(&path).unwrap();
    assert_eq!(cards.len(), 1);
    let values: Vec<u32> = cards[0].left.iter().map(|effect| effect.value).collect();
    assert_eq!(values, vec![3, 5]);
    assert!(cards[0].right.is_empty());
    assert_eq!(cards[0].mana_cost, 0);
}

#[test]
fn duplicate_ids_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "items.ron",
        r#"(items: [
            (id: ItemId(1), name: "A", slot: Head),
            (id: ItemId(1), name: "B", slot: Torso),
        ])"#,
    );

    let error = ItemLoader::load(&path).unwrap_err().to_string();
    assert!(error.contains("Duplicate item#1"));
}

#[test]
fn bundled_catalogs_parse() {
    let factory = ContentFactory::new(bundled_data());

    let cards = factory.load_cards().unwrap();
    assert!(cards.iter().any(|card| {
        card.always
            .iter()
            .any(|effect| effect.kind == EffectKind::Poison)
    }));

    let items = factory.load_items().unwrap();
    let bow = items.iter().find(|item| item.id == ItemId(2)).unwrap();
    assert_eq!(bow.slot, EquipmentSlot::Weapon);
    assert_eq!(bow.bonus(StatKind::MovementSpeed, UnitClass::Rogue), 1);
    assert_eq!(bow.bonus(StatKind::MovementSpeed, UnitClass::Mage), 0);
}

#[test]
fn bundled_level_builds_a_ready_game() {
    let factory = ContentFactory::new(bundled_data());
    let core = factory.build_game("crypt", None).unwrap();

    assert_eq!(core.phase(), TurnPhase::START);
    assert_eq!(core.hand().len(), 5);
    assert_eq!(core.enemies().len(), 3);
    // The third enemy sleeps in another room.
    assert_eq!(core.enemy_order().len(), 2);
    assert!(core.equipment().get(EquipmentSlot::Weapon).is_some());
}

#[test]
fn restored_save_overrides_level_equipment() {
    let factory = ContentFactory::new(bundled_data());
    let save = SaveData {
        current_health: 9,
        extra_health_slots: 2,
        exhaustion: 1,
        equipped: [(EquipmentSlot::Shoes, ItemId(5))].into_iter().collect(),
    };

    let core = factory.build_game("crypt", Some(save.clone())).unwrap();
    assert_eq!(core.player().health, 9);
    assert!(core.equipment().get(EquipmentSlot::Weapon).is_none());
    // Base two plus the boots' extra point.
    assert_eq!(core.action_points().current(), 3);
    assert_eq!(core.snapshot(), save);
}

#[test]
fn level_with_unknown_card_fails_setup() {
    let dir = TempDir::new().unwrap();
    write(&dir, "config.toml", "");
    write(&dir, "cards.ron", "(cards: [])");
    write(&dir, "items.ron", "(items: [])");
    write(
        &dir,
        "levels/bad.ron",
        "(dimensions: (2, 2), player: (position: (0, 0)), deck: [7])",
    );

    let factory = ContentFactory::new(dir.path());
    let error = factory.build_game("bad", None).unwrap_err().to_string();
    assert!(error.contains(&CardId(7).to_string()));
}
