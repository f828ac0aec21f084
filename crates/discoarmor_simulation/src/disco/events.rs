//! Disco armor events
//!
//! # Architecture
//!
//! **Command flow:**
//! - `ChatCommand` → сырая команда от хоста (principal + name + args)
//! - `DiscoToggleIntent` → распознанный toggle запрос
//!
//! **Host notifications:**
//! - `PlayerDisconnected` → сессия игрока закончилась
//! - `ChatMessage` / `InventoryRefresh` → исходящие сигналы хосту

use bevy::prelude::*;

/// Отправитель команды: typed principal вместо
/// dynamic instance-of проверки на sender
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandSource {
    /// Серверная консоль — не interactive, эффект не применим
    Console,
    /// Подключённый игрок (entity живой сессии)
    Player(Entity),
}

/// Сырая команда чата, как её доставил command registry хоста
///
/// Диспетчер всегда получает подтверждение ("success") независимо
/// от того, была ли команда распознана или проигнорирована.
#[derive(Event, Clone, Debug)]
pub struct ChatCommand {
    pub source: CommandSource,
    /// Raw command label без слэша ("discoarmor", "da", ...)
    pub name: String,
    pub args: Vec<String>,
}

/// Запрос на toggle disco armor от конкретного принципала
#[derive(Event, Clone, Copy, Debug)]
pub struct DiscoToggleIntent {
    pub source: CommandSource,
}

/// Уведомление хоста: сессия игрока завершена
///
/// Entity может быть уже despawned к моменту обработки —
/// handler это терпит.
#[derive(Event, Clone, Copy, Debug)]
pub struct PlayerDisconnected {
    pub entity: Entity,
}

/// Confirmation message игроку (доставляет host/chat layer)
#[derive(Event, Clone, Debug)]
pub struct ChatMessage {
    pub entity: Entity,
    pub text: String,
}

impl ChatMessage {
    pub fn new(entity: Entity, text: impl Into<String>) -> Self {
        Self {
            entity,
            text: text.into(),
        }
    }
}

/// Явный запрос на синхронизацию инвентаря с клиентом
///
/// Изменения ArmorSlots не видны игроку, пока host не обработает refresh.
#[derive(Event, Clone, Copy, Debug)]
pub struct InventoryRefresh {
    pub entity: Entity,
}
