//! Disco armor integration tests
//!
//! Headless App + ручной прогон тиков. Проверяем:
//! - Toggle семантику (идемпотентная пара, permissions, консоль)
//! - Per-tick перекраску и 40-тиковый цветовой цикл
//! - Disconnect очистку и гонку с despawn

use bevy::prelude::*;
use discoarmor_simulation::*;

/// Helper: headless App с disco armor подсистемой
fn create_disco_app() -> App {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);
    app
}

/// Helper: spawn игрока с permission
fn spawn_player(app: &mut App, name: &str) -> Entity {
    app.world_mut()
        .spawn((
            Player::named(name),
            Permissions::default().grant(DISCO_ARMOR_PERMISSION),
        ))
        .id()
}

/// Helper: spawn игрока без permissions
fn spawn_player_unprivileged(app: &mut App, name: &str) -> Entity {
    app.world_mut().spawn(Player::named(name)).id()
}

fn toggle(app: &mut App, entity: Entity) -> bool {
    dispatch_command(
        app.world_mut(),
        CommandSource::Player(entity),
        "discoarmor",
        &[],
    )
}

fn is_participant(app: &App, entity: Entity) -> bool {
    app.world().resource::<DiscoState>().is_participant(entity)
}

fn armor(app: &App, entity: Entity) -> ArmorSlots {
    app.world()
        .get::<ArmorSlots>(entity)
        .expect("player must have armor slots")
        .clone()
}

/// Сообщения, отправленные в ПОСЛЕДНИЙ прогнанный тик
fn chat_messages(app: &App) -> Vec<String> {
    app.world()
        .resource::<Events<ChatMessage>>()
        .iter_current_update_events()
        .map(|msg| msg.text.clone())
        .collect()
}

/// Refresh'ы, отправленные в ПОСЛЕДНИЙ прогнанный тик
fn refreshes(app: &App) -> Vec<Entity> {
    app.world()
        .resource::<Events<InventoryRefresh>>()
        .iter_current_update_events()
        .map(|refresh| refresh.entity)
        .collect()
}

#[test]
fn test_enable_sends_message_without_immediate_equipment() {
    let mut app = create_disco_app();
    let alice = spawn_player(&mut app, "alice");

    assert!(toggle(&mut app, alice)); // диспетчер подтверждает
    run_server_tick(&mut app);

    assert!(is_participant(&app, alice));
    assert_eq!(chat_messages(&app), vec!["Look at your beautiful disco armor"]);
    // Броня появится только на следующем тике
    assert!(armor(&app, alice).is_empty());
    assert!(refreshes(&app).is_empty());
}

#[test]
fn test_toggle_pair_is_idempotent() {
    let mut app = create_disco_app();
    let alice = spawn_player(&mut app, "alice");
    assert!(!is_participant(&app, alice));

    // Первый toggle: ACTIVE
    toggle(&mut app, alice);
    run_server_tick(&mut app);
    assert!(is_participant(&app, alice));

    // Тик перекраски, чтобы второй toggle реально что-то снимал
    run_server_tick(&mut app);
    assert!(!armor(&app, alice).is_empty());

    // Второй toggle: обратно INACTIVE, слоты в "air", немедленный refresh
    toggle(&mut app, alice);
    run_server_tick(&mut app);
    assert!(!is_participant(&app, alice));
    assert!(armor(&app, alice).is_empty());
    assert!(refreshes(&app).contains(&alice));
    assert_eq!(
        chat_messages(&app),
        vec!["You have successfully removed your disco armor"]
    );
}

#[test]
fn test_toggle_without_permission_ignored_but_acknowledged() {
    let mut app = create_disco_app();
    let bob = spawn_player_unprivileged(&mut app, "bob");

    // Команда подтверждается несмотря на отсутствие permission
    assert!(toggle(&mut app, bob));
    run_server_tick(&mut app);

    assert!(!is_participant(&app, bob));
    assert!(chat_messages(&app).is_empty());
}

#[test]
fn test_console_toggle_is_ignored() {
    let mut app = create_disco_app();

    assert!(dispatch_command(
        app.world_mut(),
        CommandSource::Console,
        "discoarmor",
        &[],
    ));
    run_server_tick(&mut app);

    assert!(app.world().resource::<DiscoState>().participants.is_empty());
}

#[test]
fn test_unknown_command_is_not_routed() {
    let mut app = create_disco_app();
    let alice = spawn_player(&mut app, "alice");

    dispatch_command(app.world_mut(), CommandSource::Player(alice), "armor", &[]);
    run_server_tick(&mut app);

    assert!(!is_participant(&app, alice));
}

#[test]
fn test_command_alias_and_case_insensitive_labels() {
    let mut app = create_disco_app();
    let alice = spawn_player(&mut app, "alice");

    dispatch_command(app.world_mut(), CommandSource::Player(alice), "DA", &[]);
    run_server_tick(&mut app);
    assert!(is_participant(&app, alice));

    dispatch_command(app.world_mut(), CommandSource::Player(alice), "DiscoArmor", &[]);
    run_server_tick(&mut app);
    assert!(!is_participant(&app, alice));
}

#[test]
fn test_tick_dresses_four_slots_identically() {
    let mut app = create_disco_app();
    let alice = spawn_player(&mut app, "alice");

    toggle(&mut app, alice);
    run_server_tick(&mut app); // enable
    run_server_tick(&mut app); // первая перекраска

    let armor = armor(&app, alice);
    // Первый цвет цикла — чистый красный (hue 0)
    let red = Rgb::new(255, 0, 0);
    for slot in ArmorSlot::ALL {
        let item = armor.slot(slot).expect("slot must be dressed");
        assert_eq!(item.color, red);
        assert_eq!(item.material, slot.leather_material());
    }
    assert_eq!(refreshes(&app), vec![alice]);
}

#[test]
fn test_full_color_cycle_over_40_ticks() {
    let mut app = create_disco_app();
    let alice = spawn_player(&mut app, "alice");

    toggle(&mut app, alice);
    run_server_tick(&mut app); // тик 1: enable, фаза wrap'нулась в 0.0

    // Тик 2: первая перекраска, hue 0.0 → красный
    run_server_tick(&mut app);
    assert_eq!(armor(&app, alice).chest.unwrap().color, Rgb::new(255, 0, 0));

    // Тики 3..22: полцикла, hue 0.5 → cyan
    for _ in 0..20 {
        run_server_tick(&mut app);
        // Ровно одна перекраска (один refresh) на тик
        assert_eq!(refreshes(&app), vec![alice]);
    }
    assert_eq!(armor(&app, alice).chest.unwrap().color, Rgb::new(0, 255, 255));

    // Тики 23..42: вторая половина, цикл замыкается на красном
    for _ in 0..20 {
        run_server_tick(&mut app);
    }
    assert_eq!(armor(&app, alice).chest.unwrap().color, Rgb::new(255, 0, 0));
}

#[test]
fn test_phase_returns_to_exact_zero_each_cycle() {
    let mut app = create_disco_app();

    // Фаза двигается ровно раз за тик даже без участников.
    // Первый advance: 1.0 → ровно 0.0
    run_server_tick(&mut app);
    assert_eq!(app.world().resource::<DiscoState>().current_hue(), 0.0);

    // Полный цикл: через 40 тиков снова ровно 0.0 (не 1.0)
    for _ in 0..40 {
        run_server_tick(&mut app);
    }
    assert_eq!(app.world().resource::<DiscoState>().current_hue(), 0.0);
}

#[test]
fn test_phase_advances_without_participants() {
    let mut app = create_disco_app();

    // 21 тик: wrap + 20 шагов по 0.025 = 0.5
    for _ in 0..21 {
        run_server_tick(&mut app);
    }
    let hue = app.world().resource::<DiscoState>().current_hue();
    assert!((hue - 0.5).abs() < 1e-9, "hue = {hue}");
}

#[test]
fn test_disconnect_clears_active_participant() {
    let mut app = create_disco_app();
    let alice = spawn_player(&mut app, "alice");

    toggle(&mut app, alice);
    run_server_tick(&mut app);
    run_server_tick(&mut app);
    assert!(!armor(&app, alice).is_empty());

    app.world_mut().send_event(PlayerDisconnected { entity: alice });
    run_server_tick(&mut app);

    assert!(!is_participant(&app, alice));
    assert!(armor(&app, alice).is_empty());
    assert!(refreshes(&app).contains(&alice));
}

#[test]
fn test_disconnect_is_noop_for_inactive_player() {
    let mut app = create_disco_app();
    let alice = spawn_player(&mut app, "alice");

    app.world_mut().send_event(PlayerDisconnected { entity: alice });
    run_server_tick(&mut app);

    assert!(!is_participant(&app, alice));
    assert!(armor(&app, alice).is_empty());
}

#[test]
fn test_despawned_participant_is_skipped_silently() {
    let mut app = create_disco_app();
    let alice = spawn_player(&mut app, "alice");

    toggle(&mut app, alice);
    run_server_tick(&mut app);

    // Гонка: entity умерла без disconnect события
    app.world_mut().despawn(alice);

    // Тик не паникует, фаза продолжает двигаться
    for _ in 0..20 {
        run_server_tick(&mut app);
    }
    let hue = app.world().resource::<DiscoState>().current_hue();
    assert!((hue - 0.5).abs() < 1e-9, "hue = {hue}");
}

#[test]
fn test_two_players_share_one_color() {
    let mut app = create_disco_app();
    let alice = spawn_player(&mut app, "alice");
    let carol = spawn_player(&mut app, "carol");

    toggle(&mut app, alice);
    toggle(&mut app, carol);
    run_server_tick(&mut app);

    for _ in 0..7 {
        run_server_tick(&mut app);
    }

    // Все участники красятся одним цветом в пределах тика
    let a = armor(&app, alice).chest.unwrap().color;
    let c = armor(&app, carol).chest.unwrap().color;
    assert_eq!(a, c);
}
