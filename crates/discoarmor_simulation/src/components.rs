//! Базовые ECS компоненты: игроки, permissions, armor слоты
//!
//! Архитектура: Required Components (Bevy 0.16)
//! - Player требует ArmorSlots + Permissions автоматически
//! - Equipment slots — derived state, не персистится (теряется на respawn/restart)

use bevy::prelude::*;
use std::collections::HashSet;

use crate::color::Rgb;

/// Игрок (interactive principal), подключённый к серверу
///
/// Автоматически добавляет ArmorSlots и Permissions через Required Components.
/// Наличие entity = живая сессия; disconnect → despawn на стороне хоста.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(ArmorSlots, Permissions)]
pub struct Player {
    /// Display name (для chat/логов)
    pub name: String,
}

impl Player {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Выданные permission nodes игрока
///
/// Принципал без нужного node молча игнорируется командами
/// (команда при этом всё равно подтверждается диспетчеру).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Permissions {
    granted: HashSet<String>,
}

impl Permissions {
    /// Builder: выдать permission node
    pub fn grant(mut self, node: impl Into<String>) -> Self {
        self.granted.insert(node.into());
        self
    }

    pub fn has(&self, node: &str) -> bool {
        self.granted.contains(node)
    }
}

/// Armor slot identifier (четыре фиксированные позиции)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ArmorSlot {
    Feet,
    Legs,
    Chest,
    Head,
}

impl ArmorSlot {
    pub const ALL: [ArmorSlot; 4] = [
        ArmorSlot::Feet,
        ArmorSlot::Legs,
        ArmorSlot::Chest,
        ArmorSlot::Head,
    ];

    /// Convert slot → index (0-3)
    pub fn to_index(self) -> u8 {
        match self {
            ArmorSlot::Feet => 0,
            ArmorSlot::Legs => 1,
            ArmorSlot::Chest => 2,
            ArmorSlot::Head => 3,
        }
    }

    /// Convert index → slot
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(ArmorSlot::Feet),
            1 => Some(ArmorSlot::Legs),
            2 => Some(ArmorSlot::Chest),
            3 => Some(ArmorSlot::Head),
            _ => None,
        }
    }

    /// Кожаный материал, который disco эффект надевает в этот слот
    pub fn leather_material(self) -> ArmorMaterial {
        match self {
            ArmorSlot::Feet => ArmorMaterial::LeatherBoots,
            ArmorSlot::Legs => ArmorMaterial::LeatherLeggings,
            ArmorSlot::Chest => ArmorMaterial::LeatherChestplate,
            ArmorSlot::Head => ArmorMaterial::LeatherHelmet,
        }
    }
}

/// Материал брони (красится только кожа)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ArmorMaterial {
    LeatherBoots,
    LeatherLeggings,
    LeatherChestplate,
    LeatherHelmet,
}

/// Экземпляр надетой брони (материал + покрасочный цвет)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct ArmorItem {
    pub material: ArmorMaterial,
    pub color: Rgb,
}

/// Четыре equipment слота игрока
///
/// `None` = пустой слот ("air"). Изменения становятся видимыми клиенту
/// только после явного `InventoryRefresh` события.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ArmorSlots {
    pub feet: Option<ArmorItem>,
    pub legs: Option<ArmorItem>,
    pub chest: Option<ArmorItem>,
    pub head: Option<ArmorItem>,
}

impl ArmorSlots {
    pub fn slot(&self, slot: ArmorSlot) -> Option<ArmorItem> {
        match slot {
            ArmorSlot::Feet => self.feet,
            ArmorSlot::Legs => self.legs,
            ArmorSlot::Chest => self.chest,
            ArmorSlot::Head => self.head,
        }
    }

    pub fn slot_mut(&mut self, slot: ArmorSlot) -> &mut Option<ArmorItem> {
        match slot {
            ArmorSlot::Feet => &mut self.feet,
            ArmorSlot::Legs => &mut self.legs,
            ArmorSlot::Chest => &mut self.chest,
            ArmorSlot::Head => &mut self.head,
        }
    }

    /// Очистить все четыре слота ("air" во все позиции)
    pub fn clear(&mut self) {
        for slot in ArmorSlot::ALL {
            *self.slot_mut(slot) = None;
        }
    }

    /// Надеть полный кожаный комплект одного цвета
    pub fn dress_all(&mut self, color: Rgb) {
        for slot in ArmorSlot::ALL {
            *self.slot_mut(slot) = Some(ArmorItem {
                material: slot.leather_material(),
                color,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        ArmorSlot::ALL.iter().all(|&slot| self.slot(slot).is_none())
    }
}
