//! Headless симуляция disco armor
//!
//! Запускает Bevy App без рендера: два игрока, toggle команды,
//! 80 тиков перекраски, затем disconnect.

use bevy::prelude::*;
use discoarmor_simulation::*;

fn main() {
    println!("Starting disco armor headless simulation");

    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);

    // Alice имеет permission, Bob — нет
    let alice = app
        .world_mut()
        .spawn((
            Player::named("alice"),
            Permissions::default().grant(DISCO_ARMOR_PERMISSION),
        ))
        .id();
    let bob = app.world_mut().spawn(Player::named("bob")).id();

    // Оба пробуют /discoarmor — диспетчер подтверждает обоих,
    // но эффект включится только у Alice
    let ack = dispatch_command(app.world_mut(), CommandSource::Player(alice), "discoarmor", &[]);
    assert!(ack);
    let ack = dispatch_command(app.world_mut(), CommandSource::Player(bob), "da", &[]);
    assert!(ack);

    for tick in 0..80 {
        run_server_tick(&mut app);

        if tick % 20 == 0 {
            report_armor(&app, alice, "alice");
            report_armor(&app, bob, "bob");
        }
    }

    // Disconnect: эффект снимается, слоты чистятся
    app.world_mut().send_event(PlayerDisconnected { entity: alice });
    run_server_tick(&mut app);
    report_armor(&app, alice, "alice");

    println!("Simulation complete!");
}

fn report_armor(app: &App, entity: Entity, name: &str) {
    let Some(armor) = app.world().get::<ArmorSlots>(entity) else {
        println!("{}: <despawned>", name);
        return;
    };

    match armor.chest {
        Some(item) => println!(
            "{}: chest color = ({}, {}, {})",
            name, item.color.r, item.color.g, item.color.b
        ),
        None => println!("{}: no armor", name),
    }
}
