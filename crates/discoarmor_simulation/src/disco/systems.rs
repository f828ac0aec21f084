//! Disco armor system implementations
//!
//! # Systems
//!
//! - `route_chat_commands` — распознавание "/discoarmor" | "/da"
//! - `apply_toggle_intents` — flip membership + очистка/сообщения
//! - `apply_disconnects` — безусловное снятие эффекта
//! - `drive_disco_armor` — per-tick перекраска + advance фазы

use bevy::prelude::*;

use crate::color::hue_to_rgb;
use crate::components::{ArmorSlots, Permissions, Player};
use crate::disco::events::*;
use crate::disco::{DiscoState, DISCO_ARMOR_PERMISSION};
use crate::logger::{log_debug, log_info};

/// Confirmation тексты (как в оригинальном чат-сообщении игроку)
pub const MSG_ENABLED: &str = "Look at your beautiful disco armor";
pub const MSG_DISABLED: &str = "You have successfully removed your disco armor";

/// Command labels, на которые откликается модуль
const COMMAND_LABELS: [&str; 2] = ["discoarmor", "da"];

/// Отправить команду в диспетчер.
///
/// Возвращает acknowledgment для command registry хоста — этот модуль
/// подтверждает ЛЮБУЮ инвокацию ("success"), даже если команда будет
/// молча проигнорирована (консоль, нет permission).
pub fn dispatch_command(
    world: &mut World,
    source: CommandSource,
    name: &str,
    args: &[&str],
) -> bool {
    world.send_event(ChatCommand {
        source,
        name: name.to_string(),
        args: args.iter().map(|s| s.to_string()).collect(),
    });
    true
}

/// Route raw chat commands → DiscoToggleIntent
///
/// Label матчится case-insensitive (оба алиаса). Аргументы команда
/// не принимает — лишние молча игнорируются.
pub fn route_chat_commands(
    mut commands: EventReader<ChatCommand>,
    mut intents: EventWriter<DiscoToggleIntent>,
) {
    for command in commands.read() {
        let label = command.name.to_ascii_lowercase();
        if !COMMAND_LABELS.contains(&label.as_str()) {
            continue;
        }

        log_debug(&format!("Command /{} from {:?}", label, command.source));
        intents.write(DiscoToggleIntent {
            source: command.source,
        });
    }
}

/// Process toggle intents: flip membership принципала
///
/// # Flow
/// - Консоль или не-игрок → no-op (команда уже подтверждена диспетчером)
/// - Нет permission "discoarmor.use" → no-op
/// - Участник → снять: remove из set, очистить 4 слота, сообщение, refresh
/// - Не участник → надеть: insert в set, сообщение; броня появится
///   на следующем тике
pub fn apply_toggle_intents(
    mut intents: EventReader<DiscoToggleIntent>,
    mut state: ResMut<DiscoState>,
    mut players: Query<(&Player, &Permissions, &mut ArmorSlots)>,
    mut chat: EventWriter<ChatMessage>,
    mut refresh: EventWriter<InventoryRefresh>,
) {
    for intent in intents.read() {
        // Guard: консоль — не interactive principal
        let CommandSource::Player(entity) = intent.source else {
            continue;
        };

        // Guard: сессия могла умереть между dispatch и обработкой
        let Ok((player, permissions, mut armor)) = players.get_mut(entity) else {
            continue;
        };

        // Guard: нет capability
        if !permissions.has(DISCO_ARMOR_PERMISSION) {
            continue;
        }

        if state.participants.remove(&entity) {
            // Снять disco armor: все слоты в "air" + немедленный refresh
            armor.clear();
            chat.write(ChatMessage::new(entity, MSG_DISABLED));
            refresh.write(InventoryRefresh { entity });
            log_info(&format!("🗑️ Disco armor disabled for {}", player.name));
        } else {
            // Надеть disco armor: только membership, красим на следующем тике
            state.participants.insert(entity);
            chat.write(ChatMessage::new(entity, MSG_ENABLED));
            log_info(&format!("✅ Disco armor enabled for {}", player.name));
        }
    }
}

/// Process disconnect notifications
///
/// Безусловно убирает участника (no-op если эффект не был включён)
/// и чистит его слоты, чтобы stale state не пережил сессию и тикам
/// не приходилось работать по offline игроку.
pub fn apply_disconnects(
    mut disconnects: EventReader<PlayerDisconnected>,
    mut state: ResMut<DiscoState>,
    mut players: Query<&mut ArmorSlots, With<Player>>,
    mut refresh: EventWriter<InventoryRefresh>,
) {
    for disconnect in disconnects.read() {
        state.participants.remove(&disconnect.entity);

        // Entity может быть уже despawned — тогда чистить нечего
        let Ok(mut armor) = players.get_mut(disconnect.entity) else {
            continue;
        };

        armor.clear();
        refresh.write(InventoryRefresh {
            entity: disconnect.entity,
        });
        log_debug(&format!("Disco armor cleared on disconnect: {:?}", disconnect.entity));
    }
}

/// Per-tick driver: перекрасить всех участников, затем сдвинуть фазу
///
/// # Flow
/// 1. Для каждого участника: resolve entity → живой игрок;
///    не нашёлся (гонка с disconnect) → молча skip.
///    Нашёлся → четыре кожаных piece'а ОДНОГО цвета + refresh.
/// 2. advance фазы — ровно один раз за тик, даже без участников.
pub fn drive_disco_armor(
    mut state: ResMut<DiscoState>,
    mut players: Query<&mut ArmorSlots, With<Player>>,
    mut refresh: EventWriter<InventoryRefresh>,
) {
    let color = hue_to_rgb(state.current_hue());

    for &entity in state.participants.iter() {
        let Ok(mut armor) = players.get_mut(entity) else {
            continue;
        };

        armor.dress_all(color);
        refresh.write(InventoryRefresh { entity });
    }

    state.advance_phase();
}
