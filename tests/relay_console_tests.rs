//! Relay board and the line command loop driving it

mod common;

use std::io::Cursor;
use std::time::Duration;

use common::{output_text, BrokenPin, RecordingPin};
use relaykit::{LineCommandLoop, Polarity, RelayBoard, RelayCommand};

fn board(relay: &RecordingPin, led: &RecordingPin) -> RelayBoard<RecordingPin, RecordingPin> {
    let mut sink = Vec::new();
    RelayBoard::new(relay.clone(), led.clone(), Polarity::ActiveLow, &mut sink).unwrap()
}

fn run_lines(input: &str) -> (RecordingPin, RecordingPin, String, RelayBoard<RecordingPin, RecordingPin>) {
    let relay = RecordingPin::new();
    let led = RecordingPin::new();
    let board = board(&relay, &led);

    let mut console = LineCommandLoop::new(Cursor::new(input.to_string()), Vec::new(), board)
        .with_pause(Duration::ZERO);
    console.run().unwrap();

    let (_, out, board) = console.into_parts();
    (relay, led, output_text(&out), board)
}

#[test]
fn test_initial_state_is_off() {
    let relay = RecordingPin::new();
    let led = RecordingPin::new();
    let mut out = Vec::new();
    let board = RelayBoard::new(relay.clone(), led.clone(), Polarity::ActiveLow, &mut out).unwrap();

    assert_eq!(output_text(&out), "Setting initial state: Relay OFF\n");
    assert!(!board.relay().is_energized());
    assert!(!board.indicator().is_lit());
    // active-low: released means the pin sits high
    assert_eq!(relay.last(), Some(true));
    assert_eq!(led.last(), Some(false));
}

#[test]
fn test_on_energizes_and_lights() {
    let (relay, led, out, board) = run_lines("ON\n");

    assert!(board.relay().is_energized());
    assert!(board.indicator().is_lit());
    assert_eq!(relay.last(), Some(false));
    assert_eq!(led.last(), Some(true));
    assert_eq!(out, "Received command: ON\n");
}

#[test]
fn test_off_releases_and_extinguishes() {
    let (relay, led, out, board) = run_lines("on\noff");

    assert!(!board.relay().is_energized());
    assert!(!board.indicator().is_lit());
    assert_eq!(relay.last(), Some(true));
    assert_eq!(led.last(), Some(false));
    assert_eq!(out, "Received command: ON\nReceived command: OFF\n");
}

#[test]
fn test_unknown_input_is_silently_ignored() {
    let (relay, led, out, board) = run_lines("on\ntoggle\n\n  \nhelp me\n");

    assert!(board.relay().is_energized());
    assert!(board.indicator().is_lit());
    // only the initial write and the "on" write
    assert_eq!(relay.writes(), 2);
    assert_eq!(led.writes(), 2);
    assert_eq!(out, "Received command: ON\n");
}

#[test]
fn test_indicator_always_mirrors_relay() {
    let relay = RecordingPin::new();
    let led = RecordingPin::new();
    let board = board(&relay, &led);
    let input = "On\n OFF \nbogus\noN\r\nOff\t\nON\nxyz\n";

    let mut console =
        LineCommandLoop::new(Cursor::new(input), Vec::new(), board).with_pause(Duration::ZERO);
    while console.step().unwrap() {
        let board = console.handler();
        assert_eq!(board.relay().is_energized(), board.indicator().is_lit());
    }
    assert!(console.handler().relay().is_energized());
}

#[test]
fn test_step_reports_exhausted_input() {
    let relay = RecordingPin::new();
    let led = RecordingPin::new();
    let mut console = LineCommandLoop::new(Cursor::new(""), Vec::new(), board(&relay, &led));

    assert!(!console.step().unwrap());
}

#[test]
fn test_active_high_polarity() {
    let relay = RecordingPin::new();
    let led = RecordingPin::new();
    let mut sink = Vec::new();
    let mut board =
        RelayBoard::new(relay.clone(), led.clone(), Polarity::ActiveHigh, &mut sink).unwrap();
    assert_eq!(relay.last(), Some(false));

    board.apply(RelayCommand::On).unwrap();
    assert_eq!(relay.last(), Some(true));
    assert_eq!(led.last(), Some(true));
}

#[test]
fn test_pin_failure_does_not_stop_the_loop() {
    let led = RecordingPin::new();
    let mut sink = Vec::new();
    let result = RelayBoard::new(BrokenPin, led, Polarity::ActiveLow, &mut sink);
    assert!(result.is_err());

    // LED works for the initial write only
    let relay = RecordingPin::new();
    let led = FlakyPin { writes_left: 1 };
    let board = RelayBoard::new(relay.clone(), led, Polarity::ActiveLow, &mut sink).unwrap();

    let mut console = LineCommandLoop::new(Cursor::new("on\noff\n"), Vec::new(), board)
        .with_pause(Duration::ZERO);
    console.run().unwrap();

    let (_, out, board) = console.into_parts();
    // nothing acknowledged, both lines were still consumed
    assert_eq!(output_text(&out), "");
    assert_eq!(board.relay().is_energized(), board.indicator().is_lit());
    assert!(!board.relay().is_energized());
    // initial, then drive + restore for each command
    assert_eq!(relay.writes(), 5);
    assert_eq!(relay.last(), Some(true));
}

#[test]
fn test_failed_indicator_restores_relay() {
    let relay = RecordingPin::new();
    let led = FlakyPin { writes_left: 2 };
    let mut sink = Vec::new();
    let mut board = RelayBoard::new(relay.clone(), led, Polarity::ActiveLow, &mut sink).unwrap();

    board.apply(RelayCommand::On).unwrap();
    assert!(board.relay().is_energized());
    assert!(board.indicator().is_lit());

    // LED is gone now: the relay must stay energized to match it
    assert!(board.apply(RelayCommand::Off).is_err());
    assert!(board.relay().is_energized());
    assert!(board.indicator().is_lit());
    assert_eq!(relay.last(), Some(false));
}

#[test]
fn test_invalid_utf8_line_is_ignored() {
    let relay = RecordingPin::new();
    let led = RecordingPin::new();
    let board = board(&relay, &led);

    let input: &[u8] = b"\xff\xfe\non\n";
    let mut console =
        LineCommandLoop::new(Cursor::new(input), Vec::new(), board).with_pause(Duration::ZERO);
    console.run().unwrap();

    let (_, out, board) = console.into_parts();
    assert!(board.relay().is_energized());
    assert!(board.indicator().is_lit());
    assert_eq!(output_text(&out), "Received command: ON\n");
}

#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    use relaykit::LineSource;

    let mut input = Cursor::new(&b"o\xffn\n"[..]);
    assert_eq!(input.next_line().unwrap(), Some("o\u{fffd}n\n".to_string()));
    assert_eq!(input.next_line().unwrap(), None);
}

struct FlakyPin {
    writes_left: usize,
}

impl relaykit::DigitalOutput for FlakyPin {
    fn set_level(&mut self, _high: bool) -> anyhow::Result<()> {
        if self.writes_left == 0 {
            anyhow::bail!("led driver gone");
        }
        self.writes_left -= 1;
        Ok(())
    }
}

#[test]
fn test_banner() {
    let mut out = Vec::new();
    relaykit::peripheral::write_banner(&mut out).unwrap();
    let text = output_text(&out);
    assert!(text.contains("Relay Control is Ready!"));
    assert!(text.contains("Enter 'on' or 'off' and press Enter."));
}
