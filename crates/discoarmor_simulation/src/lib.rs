//! DiscoArmor Simulation Core
//!
//! ECS-симуляция server-side disco armor эффекта на Bevy 0.16:
//! игрок toggle'ит цветную кожаную броню, сервер каждый тик
//! перекрашивает все четыре слота по вращающемуся hue.
//!
//! Архитектура:
//! - Host runtime = headless Bevy App (events, fixed-tick scheduler)
//! - Controller state = один `DiscoState` resource (никаких глобалов)
//! - Все handlers — обычные системы, тестируются без живого сервера

use bevy::prelude::*;

// Публичные модули
pub mod color;
pub mod components;
pub mod disco;
pub mod logger;

// Re-export базовых типов для удобства
pub use color::{hue_to_rgb, Rgb};
pub use components::{ArmorItem, ArmorMaterial, ArmorSlot, ArmorSlots, Permissions, Player};
pub use disco::{
    dispatch_command, ChatCommand, ChatMessage, CommandSource, DiscoArmorPlugin, DiscoState,
    DiscoToggleIntent, InventoryRefresh, PlayerDisconnected, DISCO_ARMOR_PERMISSION,
};

/// Server tick rate (20 Hz — базовая гранулярность хоста)
pub const TICK_RATE_HZ: f64 = 20.0;

/// Главный plugin симуляции (fixed timestep + disco armor подсистема)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 20Hz для server tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .add_plugins(DiscoArmorPlugin);
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ));

    app
}

/// Прогоняет ровно один серверный тик.
///
/// Headless тесты и демо не могут полагаться на real-time аккумуляцию
/// `Time<Fixed>` (tight loop почти не запускает FixedUpdate), поэтому
/// тик запускается вручную: сначала double-buffer update событий
/// (то, что в полном App делает `event_update_system`), затем FixedUpdate.
pub fn run_server_tick(app: &mut App) {
    let world = app.world_mut();
    world.resource_mut::<Events<ChatCommand>>().update();
    world.resource_mut::<Events<DiscoToggleIntent>>().update();
    world.resource_mut::<Events<PlayerDisconnected>>().update();
    world.resource_mut::<Events<ChatMessage>>().update();
    world.resource_mut::<Events<InventoryRefresh>>().update();
    world.run_schedule(FixedUpdate);
}
