//! Shop catalog and the player's owned items
//!
//! Birds and weapons are bought from the wallet once their unlock
//! requirement is met. Purchased items can then be selected for play.

use serde::{Deserialize, Serialize};

use super::Progress;
use super::achievements::Requirement;
use crate::error::GameError;

pub const DEFAULT_BIRD: &str = "classic";
pub const DEFAULT_WEAPON: &str = "basic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Bird,
    Weapon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ItemKind,
    /// Coins debited from the wallet
    pub price: u64,
    /// Must be met before the item can be bought (only score, kills or coins)
    pub unlock: Option<Requirement>,
}

const fn bird(
    id: &'static str,
    name: &'static str,
    price: u64,
    unlock: Option<Requirement>,
) -> ShopItem {
    ShopItem {
        id,
        name,
        kind: ItemKind::Bird,
        price,
        unlock,
    }
}

const fn weapon(
    id: &'static str,
    name: &'static str,
    price: u64,
    unlock: Option<Requirement>,
) -> ShopItem {
    ShopItem {
        id,
        name,
        kind: ItemKind::Weapon,
        price,
        unlock,
    }
}

pub const SHOP_BIRDS: &[ShopItem] = &[
    bird(DEFAULT_BIRD, "Classic Bird", 0, None),
    bird("phoenix", "Phoenix", 2500, Some(Requirement::Score(50))),
    bird("ice", "Ice Bird", 3750, Some(Requirement::Score(50))),
    bird("shadow", "Shadow Bird", 5000, Some(Requirement::Kills(100))),
    bird("golden", "Golden Bird", 7500, Some(Requirement::Coins(5000))),
    bird("cyber", "Cyber Bird", 10_000, Some(Requirement::Score(100))),
    bird("dragon", "Dragon Bird", 15_000, Some(Requirement::Score(150))),
    bird("cosmic", "Cosmic Bird", 20_000, Some(Requirement::Kills(250))),
    bird("royal", "Royal Bird", 30_000, Some(Requirement::Score(200))),
];

pub const SHOP_WEAPONS: &[ShopItem] = &[
    weapon(DEFAULT_WEAPON, "Basic Gun", 0, None),
    weapon("rapid", "Rapid Fire", 2000, Some(Requirement::Score(25))),
    weapon("plasma", "Plasma Gun", 4000, Some(Requirement::Kills(50))),
    weapon("laser", "Laser Beam", 6000, Some(Requirement::Kills(75))),
    weapon("thunder", "Thunder Cannon", 9000, Some(Requirement::Score(75))),
    weapon("inferno", "Inferno Blaster", 12_500, Some(Requirement::Kills(150))),
    weapon("omega", "Omega Destroyer", 20_000, Some(Requirement::Score(100))),
];

/// Look up a bird or weapon by id
pub fn find(id: &str) -> Option<&'static ShopItem> {
    SHOP_BIRDS.iter().chain(SHOP_WEAPONS).find(|item| item.id == id)
}

/// Owned items and the current selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub owned_birds: Vec<String>,
    pub owned_weapons: Vec<String>,
    pub selected_bird: String,
    pub selected_weapon: String,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            owned_birds: vec![DEFAULT_BIRD.to_string()],
            owned_weapons: vec![DEFAULT_WEAPON.to_string()],
            selected_bird: DEFAULT_BIRD.to_string(),
            selected_weapon: DEFAULT_WEAPON.to_string(),
        }
    }
}

impl Inventory {
    fn owned(&self, kind: ItemKind) -> &Vec<String> {
        match kind {
            ItemKind::Bird => &self.owned_birds,
            ItemKind::Weapon => &self.owned_weapons,
        }
    }

    pub fn owns(&self, item: &ShopItem) -> bool {
        self.owned(item.kind).iter().any(|id| id == item.id)
    }

    pub fn selected(&self, kind: ItemKind) -> &str {
        match kind {
            ItemKind::Bird => &self.selected_bird,
            ItemKind::Weapon => &self.selected_weapon,
        }
    }
}

impl Progress {
    /// Whether the item's unlock requirement is met
    ///
    /// Coin requirements count lifetime coins collected, not the wallet.
    pub fn is_unlocked(&self, item: &ShopItem) -> bool {
        item.unlock.is_none_or(|req| self.achievements.meets(req))
    }

    /// Buy an item, debiting its price from the wallet
    pub fn purchase(&mut self, id: &str) -> Result<&'static ShopItem, GameError> {
        let item = find(id).ok_or_else(|| GameError::UnknownItem(id.to_string()))?;
        if self.inventory.owns(item) {
            return Err(GameError::AlreadyOwned(id.to_string()));
        }
        if !self.is_unlocked(item) {
            return Err(GameError::ItemLocked(id.to_string()));
        }
        if self.wallet < item.price {
            return Err(GameError::InsufficientCoins {
                price: item.price,
                wallet: self.wallet,
            });
        }

        self.wallet -= item.price;
        let owned = match item.kind {
            ItemKind::Bird => &mut self.inventory.owned_birds,
            ItemKind::Weapon => &mut self.inventory.owned_weapons,
        };
        owned.push(item.id.to_string());
        log::info!("Purchased {} for {} (wallet {})", item.name, item.price, self.wallet);
        Ok(item)
    }

    /// Make an owned item the active bird or weapon
    pub fn select(&mut self, id: &str) -> Result<(), GameError> {
        let item = find(id).ok_or_else(|| GameError::UnknownItem(id.to_string()))?;
        if !self.inventory.owns(item) {
            return Err(GameError::NotOwned(id.to_string()));
        }
        let slot = match item.kind {
            ItemKind::Bird => &mut self.inventory.selected_bird,
            ItemKind::Weapon => &mut self.inventory.selected_weapon,
        };
        *slot = item.id.to_string();
        log::debug!("Selected {:?} {}", item.kind, item.id);
        Ok(())
    }
}
