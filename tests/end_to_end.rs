mod common;

use common::{ethernet, populated, ScriptedSource};
use net_tui::app::App;
use net_tui::display::{render_text, Theme};
use net_tui::event::AppEvent;
use net_tui::input::Command;
use net_tui::normalize::normalize;
use net_tui::poller::Poller;
use net_tui::state::{Dashboard, Tab};
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Duration;

fn frame(dash: &Dashboard) -> Vec<String> {
    render_text(dash, &Theme::monochrome(), "00:00:00")
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

fn sized(width: u16, height: u16) -> Dashboard {
    let mut dash = Dashboard::new();
    dash.resize(width, height);
    dash
}

#[test]
fn test_empty_connections_render_header_and_zero_footer() {
    let mut dash = sized(100, 12);
    dash.apply_snapshot(normalize(&ScriptedSource::default()));

    let lines = frame(&dash);
    assert!(lines[2].starts_with("PROTO"));
    assert!(lines[3..10].iter().all(|l| l.is_empty()), "no data rows");
    assert_eq!(lines[10], "0 connections");
    assert_eq!(dash.nav.cursor, 0);

    dash.handle_command(Command::MoveDown);
    dash.handle_command(Command::JumpEnd);
    assert_eq!(dash.nav.cursor, 0);
}

#[test]
fn test_connection_failure_does_not_blank_interfaces() {
    let source = ScriptedSource {
        connections: populated().connections,
        interfaces: vec![ethernet("eth0", true)],
        fail_connections: true,
        ..Default::default()
    };

    let mut dash = sized(100, 12);
    dash.apply_snapshot(normalize(&source));
    assert_eq!(dash.list_len(Tab::Connections), 0);
    assert_eq!(dash.list_len(Tab::Ports), 0);
    assert_eq!(dash.list_len(Tab::Interfaces), 1);

    dash.handle_command(Command::SelectTab(Tab::Interfaces));
    let lines = frame(&dash);
    assert!(lines[3].starts_with("eth0"));
    assert!(lines[3].contains("192.168.1.20/24"));
    assert_eq!(lines[10], "1 interfaces");
}

#[test]
fn test_populated_tabs() {
    let mut dash = sized(100, 14);
    dash.apply_snapshot(normalize(&populated()));

    let lines = frame(&dash);
    assert_eq!(lines[12], "6 connections");
    assert!(lines[3].starts_with("tcp     0.0.0.0:80"));
    assert!(lines[3].ends_with("nginx"));
    assert!(lines[8].starts_with("udp     0.0.0.0:68"));

    dash.handle_command(Command::NextTab);
    let lines = frame(&dash);
    // 0.0.0.0:22 and [::]:22 are one dual-stack listener
    assert_eq!(lines[12], "2 listening ports");
    assert_eq!(lines[3], "22      tcp     *                22       sshd");
    assert_eq!(lines[4], "80      tcp     *                80       nginx");
    assert!(lines[5].is_empty());

    dash.handle_command(Command::NextTab);
    let lines = frame(&dash);
    assert_eq!(lines[12], "2 interfaces");
    assert!(lines[3].contains("1.0 MB"));
    assert!(lines[3].ends_with("1023 B"));
    assert!(lines[4].starts_with("wlan0        down"));
}

#[test]
fn test_delivery_order_is_the_only_nondeterminism() {
    let data = normalize(&populated());

    let mut key_first = sized(80, 8);
    key_first.handle_command(Command::JumpEnd);
    key_first.apply_snapshot(data.clone());

    let mut data_first = sized(80, 8);
    data_first.apply_snapshot(data);
    data_first.handle_command(Command::JumpEnd);

    // both orders satisfy the invariants, with different (deterministic) results
    for dash in [&key_first, &data_first] {
        let nav = dash.nav;
        assert!(nav.cursor <= dash.active_len().saturating_sub(1));
        assert!(nav.offset <= nav.cursor && nav.cursor < nav.offset + nav.page_size());
    }
    assert_eq!(key_first.nav.cursor, 0);
    assert_eq!(data_first.nav.cursor, 5);
    assert_eq!(data_first.nav.offset, 3);
}

#[test]
fn test_hung_pass_delays_refresh_without_corrupting_state() {
    let (release, gate) = mpsc::channel();
    let source = ScriptedSource {
        gate: Some(Mutex::new(gate)),
        ..populated()
    };
    let (tx, rx) = mpsc::channel();
    let poller = Poller::spawn(Box::new(source), tx).unwrap();
    let mut app = App::new(poller, Theme::monochrome());

    app.handle(AppEvent::Resize {
        width: 80,
        height: 12,
    });
    app.start();
    assert!(app.poller().is_busy());

    // input keeps flowing while the pass is stuck
    app.handle(AppEvent::Input(Command::NextTab));
    app.handle(AppEvent::Input(Command::MoveDown));
    app.handle(AppEvent::Tick);
    app.handle(AppEvent::Tick);
    assert_eq!(app.dashboard().nav.tab, Tab::Ports);
    assert_eq!(app.dashboard().nav.cursor, 0);
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

    release.send(()).unwrap();
    let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    app.handle(event);
    assert!(!app.poller().is_busy());
    assert_eq!(app.dashboard().list_len(Tab::Ports), 2);

    app.handle(AppEvent::Input(Command::MoveDown));
    assert_eq!(app.dashboard().nav.cursor, 1);

    // ticks during the stall were skipped, not queued
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}
