//! Disco armor module (периодический cosmetic эффект)
//!
//! ECS ответственность:
//! - State: `DiscoState` (участники + фаза цвета)
//! - Rules: toggle по команде, очистка на disconnect, перекраска каждый тик
//! - Events: ChatCommand → DiscoToggleIntent, ChatMessage, InventoryRefresh
//!
//! Host ответственность:
//! - Доставка ChatCommand / PlayerDisconnected событий
//! - Рендер брони и доставка ChatMessage клиенту

use bevy::prelude::*;
use std::collections::HashSet;

pub mod events;
pub mod systems;

// Re-export основных типов
pub use events::{
    ChatCommand, ChatMessage, CommandSource, DiscoToggleIntent, InventoryRefresh,
    PlayerDisconnected,
};
pub use systems::{
    apply_disconnects, apply_toggle_intents, dispatch_command, drive_disco_armor,
    route_chat_commands, MSG_DISABLED, MSG_ENABLED,
};

/// Permission node, требуемый для toggle команды
pub const DISCO_ARMOR_PERMISSION: &str = "discoarmor.use";

/// Шаг фазы за тик: полный цикл за 40 тиков (2 секунды при 20 TPS)
pub const HUE_STEP: f64 = 0.025;

/// Состояние disco armor контроллера (один instance на сервер)
///
/// Создаётся пустым при старте, не персистится — теряется на restart.
#[derive(Resource, Debug)]
pub struct DiscoState {
    /// Игроки с включённым эффектом
    pub participants: HashSet<Entity>,
    /// Позиция в цветовом цикле
    ///
    /// Инвариант после каждого advance: 0.0 ≤ phase < 1.0.
    /// Стартует с 1.0 — первый же advance wrap'ает её ровно в 0.0.
    phase: f64,
}

impl Default for DiscoState {
    fn default() -> Self {
        Self {
            participants: HashSet::new(),
            phase: 1.0,
        }
    }
}

impl DiscoState {
    pub fn is_participant(&self, entity: Entity) -> bool {
        self.participants.contains(&entity)
    }

    /// Hue текущего тика, всегда pre-wrapped в [0, 1)
    ///
    /// Начальное значение 1.0 семантически означает "wrapped to 0",
    /// поэтому hue_to_rgb никогда не видит саму единицу.
    pub fn current_hue(&self) -> f64 {
        if self.phase >= 1.0 {
            0.0
        } else {
            self.phase
        }
    }

    /// Сдвинуть фазу на один тик.
    ///
    /// Wrap при достижении 1.0 — ровно в 0.0, НЕ в дробный остаток.
    /// Из-за этого длина цикла может гулять на тик от float drift;
    /// это задокументированное поведение, не баг.
    pub fn advance_phase(&mut self) {
        self.phase += HUE_STEP;
        if self.phase >= 1.0 {
            self.phase = 0.0;
        }
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> f64 {
        self.phase
    }
}

/// Disco Armor Plugin
///
/// Регистрирует события и системы в FixedUpdate.
///
/// Порядок выполнения (chained — host вызывает handlers строго серийно,
/// поэтому внутренних локов на DiscoState нет):
/// 1. drive_disco_armor — перекраска участников + advance фазы
/// 2. route_chat_commands — "/discoarmor" | "/da" → DiscoToggleIntent
/// 3. apply_toggle_intents — flip membership, очистка/сообщения
/// 4. apply_disconnects — безусловное снятие эффекта с ушедших
///
/// Driver идёт первым: включённый этим тиком эффект красит броню
/// только со СЛЕДУЮЩЕГО тика (toggle сам брони не надевает).
pub struct DiscoArmorPlugin;

impl Plugin for DiscoArmorPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<ChatCommand>()
            .add_event::<DiscoToggleIntent>()
            .add_event::<PlayerDisconnected>()
            .add_event::<ChatMessage>()
            .add_event::<InventoryRefresh>();

        // Controller state (init при старте, умирает вместе с процессом)
        app.insert_resource(DiscoState::default());

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                drive_disco_armor,
                route_chat_commands,
                apply_toggle_intents,
                apply_disconnects,
            )
                .chain(), // Последовательное выполнение
        );
    }
}
