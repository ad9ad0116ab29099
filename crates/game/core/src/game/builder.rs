use std::collections::{HashMap, HashSet};

use crate::card::{CardData, CardId, Deck, EffectCache};
use crate::config::GameConfig;
use crate::equipment::{EquipmentSet, ItemDefinition, ItemId};
use crate::error::{ErrorSeverity, GameError};
use crate::hex::{GridError, HexCoord, HexGrid};
use crate::save::SaveData;
use crate::turn::{ActionPoints, TurnPhase};
use crate::unit::{CombatUnit, EnemyProfile, UnitClass, UnitFlags, UnitId};

use super::GameCore;

/// Errors raised while assembling a [`GameCore`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("no player was placed")]
    MissingPlayer,

    #[error("deck references unknown {0}")]
    UnknownCard(CardId),

    #[error("equipment references unknown {0}")]
    UnknownItem(ItemId),

    #[error("failed to place a unit: {0}")]
    Placement(#[from] GridError),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingPlayer => "SETUP_MISSING_PLAYER",
            Self::UnknownCard(_) => "SETUP_UNKNOWN_CARD",
            Self::UnknownItem(_) => "SETUP_UNKNOWN_ITEM",
            Self::Placement(_) => "SETUP_PLACEMENT",
        }
    }
}

/// Explicit, ordered construction of a ready [`GameCore`].
///
/// `build` places every unit, wakes the enemies sharing the player's room,
/// applies the restored save (if any) and opens the first player turn with
/// the opening hand drawn.
#[derive(Clone, Debug)]
pub struct GameCoreBuilder {
    config: GameConfig,
    grid: HexGrid,
    player: Option<(UnitClass, HexCoord)>,
    enemies: Vec<(HexCoord, u32, EnemyProfile)>,
    cards: Vec<CardData>,
    deck: Vec<CardId>,
    items: Vec<ItemDefinition>,
    equipped: Vec<ItemId>,
    restore: Option<SaveData>,
    seed: u64,
}

impl GameCoreBuilder {
    pub fn new(config: GameConfig) -> Self {
        let grid = HexGrid::new(config.terrain_costs, config.layout);
        Self {
            config,
            grid,
            player: None,
            enemies: Vec::new(),
            cards: Vec::new(),
            deck: Vec::new(),
            items: Vec::new(),
            equipped: Vec::new(),
            restore: None,
            seed: 0,
        }
    }

    /// Level tiles. Units are placed during `build`.
    pub fn grid(mut self, grid: HexGrid) -> Self {
        self.grid = grid;
        self
    }

    pub fn player(mut self, class: UnitClass, position: HexCoord) -> Self {
        self.player = Some((class, position));
        self
    }

    /// Registers an enemy. Ids are handed out in registration order from 1.
    pub fn enemy(mut self, position: HexCoord, max_health: u32, profile: EnemyProfile) -> Self {
        self.enemies.push((position, max_health, profile));
        self
    }

    /// Card catalog used to resolve card ids.
    pub fn cards(mut self, cards: impl IntoIterator<Item = CardData>) -> Self {
        self.cards.extend(cards);
        self
    }

    /// Cards making up the draw pile.
    pub fn deck(mut self, deck: impl IntoIterator<Item = CardId>) -> Self {
        self.deck.extend(deck);
        self
    }

    /// Item catalog used to resolve equipped item ids.
    pub fn items(mut self, items: impl IntoIterator<Item = ItemDefinition>) -> Self {
        self.items.extend(items);
        self
    }

    /// Equips an item from the catalog at setup.
    pub fn equip(mut self, item: ItemId) -> Self {
        self.equipped.push(item);
        self
    }

    /// Restores health, slots, exhaustion and equipment from a save.
    ///
    /// The save's equipment replaces anything given through `equip`.
    pub fn restore(mut self, save: SaveData) -> Self {
        self.restore = Some(save);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<GameCore, SetupError> {
        let Self {
            config,
            mut grid,
            player,
            enemies,
            cards,
            deck,
            items,
            equipped,
            restore,
            seed,
        } = self;

        let cards: HashMap<CardId, CardData> =
            cards.into_iter().map(|card| (card.id, card)).collect();
        if let Some(unknown) = deck.iter().find(|id| !cards.contains_key(id)) {
            return Err(SetupError::UnknownCard(*unknown));
        }
        let items: HashMap<ItemId, ItemDefinition> =
            items.into_iter().map(|item| (item.id, item)).collect();

        let (class, position) = player.ok_or(SetupError::MissingPlayer)?;
        grid.place_unit(position, UnitId::PLAYER)?;
        let start_room = grid.tile(position).map(|tile| tile.room).unwrap_or_default();
        let mut player =
            CombatUnit::player(class, position, config.base_max_health).with_room(start_room);

        let mut roster = Vec::with_capacity(enemies.len());
        for (index, (position, max_health, profile)) in enemies.into_iter().enumerate() {
            let id = UnitId(index as u32 + 1);
            grid.place_enemy(position, id)?;
            let room = grid.tile(position).map(|tile| tile.room).unwrap_or_default();
            let mut enemy = CombatUnit::enemy(id, position, max_health, profile).with_room(room);
            if room == start_room {
                enemy.flags.insert(UnitFlags::ACTIVE);
            }
            roster.push(enemy);
        }

        let loadout: Vec<ItemId> = match &restore {
            Some(save) => save.equipped.values().copied().collect(),
            None => equipped,
        };
        let mut equipment = EquipmentSet::empty();
        for id in loadout {
            let item = items.get(&id).cloned().ok_or(SetupError::UnknownItem(id))?;
            equipment.equip(item);
        }

        let (extra_health_slots, exhaustion) = restore
            .as_ref()
            .map(|save| (save.extra_health_slots, save.exhaustion))
            .unwrap_or_default();

        let mut core = GameCore {
            action_points: ActionPoints::new(config.action_point_slots),
            deck: Deck::new(deck, seed),
            config,
            grid,
            player: player.clone(),
            enemies: roster,
            cards,
            items,
            cache: EffectCache::new(),
            equipment,
            carried_action_points: 0,
            pending_attack: None,
            highlighted: HashSet::new(),
            phase: TurnPhase::START,
            turn: 0,
            extra_health_slots,
            exhaustion,
        };

        let max_health = core.player_max_health();
        player.health = match &restore {
            Some(save) => save.current_health.min(max_health),
            None => max_health,
        };
        core.player = player;

        core.begin_player_turn();
        Ok(core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardEffect;
    use crate::equipment::{EquipmentSlot, ItemStats};
    use crate::hex::grid::tests::open_grid;
    use crate::hex::{RoomId, TerrainKind, Tile};
    use crate::turn::PlayerPhase;

    fn cards() -> Vec<CardData> {
        (1..=6)
            .map(|id| CardData::new(CardId(id), "filler").with_left([CardEffect::attack(1, 1)]))
            .collect()
    }

    fn armor() -> ItemDefinition {
        ItemDefinition::new(ItemId(7), "Plate", EquipmentSlot::Torso).with_stats(ItemStats {
            max_health: 10,
            ..ItemStats::default()
        })
    }

    #[test]
    fn build_opens_first_turn_with_hand() {
        let core = GameCore::builder(GameConfig::default())
            .grid(open_grid(3, 3))
            .player(UnitClass::Mage, HexCoord::flat(1, 1))
            .cards(cards())
            .deck((1..=6).map(CardId))
            .build()
            .unwrap();

        assert_eq!(core.phase(), TurnPhase::PlayerTurn(PlayerPhase::AwaitingAction));
        assert_eq!(core.hand().len(), 5);
        assert_eq!(core.action_points().current(), 2);
        assert_eq!(core.turn(), 1);
        assert_eq!(
            core.grid().tile(HexCoord::flat(1, 1)).unwrap().occupancy.unit,
            Some(UnitId::PLAYER)
        );
    }

    #[test]
    fn only_starting_room_enemies_wake_up() {
        let mut grid = open_grid(3, 1);
        grid.insert(Tile::new(HexCoord::flat(3, 0), TerrainKind::Default, RoomId(1)))
            .unwrap();
        let core = GameCore::builder(GameConfig::default())
            .grid(grid)
            .player(UnitClass::Warrior, HexCoord::flat(0, 0))
            .enemy(HexCoord::flat(2, 0), 5, EnemyProfile::default())
            .enemy(HexCoord::flat(3, 0), 5, EnemyProfile::default())
            .build()
            .unwrap();

        assert_eq!(core.enemy_order(), vec![UnitId(1)]);
    }

    #[test]
    fn restore_applies_save() {
        let save = SaveData {
            current_health: 12,
            extra_health_slots: 1,
            exhaustion: 2,
            equipped: [(EquipmentSlot::Torso, ItemId(7))].into_iter().collect(),
        };
        let core = GameCore::builder(GameConfig::default())
            .grid(open_grid(2, 2))
            .player(UnitClass::Warrior, HexCoord::ORIGIN)
            .items([armor()])
            .restore(save.clone())
            .build()
            .unwrap();

        assert_eq!(core.player_max_health(), 20 + 5 + 10);
        assert_eq!(core.snapshot(), save);
    }

    #[test]
    fn unknown_ids_fail_setup() {
        let missing_card = GameCore::builder(GameConfig::default())
            .grid(open_grid(2, 2))
            .player(UnitClass::Warrior, HexCoord::ORIGIN)
            .deck([CardId(42)])
            .build();
        assert_eq!(missing_card.err(), Some(SetupError::UnknownCard(CardId(42))));

        let missing_item = GameCore::builder(GameConfig::default())
            .grid(open_grid(2, 2))
            .player(UnitClass::Warrior, HexCoord::ORIGIN)
            .equip(ItemId(3))
            .build();
        assert_eq!(missing_item.err(), Some(SetupError::UnknownItem(ItemId(3))));
    }

    #[test]
    fn player_must_be_placed_on_an_open_tile() {
        let result = GameCore::builder(GameConfig::default())
            .grid(open_grid(2, 2))
            .build();
        assert_eq!(result.err(), Some(SetupError::MissingPlayer));

        let result = GameCore::builder(GameConfig::default())
            .grid(open_grid(2, 2))
            .player(UnitClass::Warrior, HexCoord::flat(9, 9))
            .build();
        assert_eq!(
            result.err(),
            Some(SetupError::Placement(GridError::MissingTile(HexCoord::flat(9, 9))))
        );
    }
}
