use std::sync::mpsc;

use zhutype::config::TypistConfig;
use zhutype::controller::{Controller, Status};
use zhutype::injector::Transcript;

#[test]
fn stop_during_countdown_types_nothing() {
    let controller = Controller::new();
    let transcript = Transcript::new();
    let io = transcript.clone();

    let (tx, rx) = mpsc::channel();
    let started = controller.start(
        "should never be typed".to_string(),
        TypistConfig::default(),
        Some(1),
        move || Ok((io.injector(), io.clipboard())),
        tx,
    );
    assert!(started);
    controller.request_stop();

    let statuses: Vec<Status> = rx.iter().collect();
    controller.join();

    let terminal = statuses.last().expect("at least one status");
    assert_eq!(*terminal, Status::Stopped);
    assert!(statuses.iter().all(|s| !matches!(s, Status::Typing)));
    assert!(
        transcript.actions().is_empty(),
        "no injection may happen once a stop lands during the countdown"
    );
    assert!(!controller.is_running(), "flags must reset after the run");
}

#[test]
fn second_start_is_rejected_while_running() {
    let controller = Controller::new();
    let transcript = Transcript::new();
    let io = transcript.clone();

    let (tx, rx) = mpsc::channel();
    assert!(controller.start(
        "first".to_string(),
        TypistConfig::default(),
        Some(1),
        move || Ok((io.injector(), io.clipboard())),
        tx,
    ));

    let io = transcript.clone();
    let (tx2, _rx2) = mpsc::channel();
    assert!(
        !controller.start(
            "second".to_string(),
            TypistConfig::default(),
            Some(1),
            move || Ok((io.injector(), io.clipboard())),
            tx2,
        ),
        "a second start must be rejected while the first run is active"
    );

    controller.request_stop();
    for _ in rx {}
    controller.join();
    assert!(!controller.is_running());
}

#[test]
fn failed_io_reports_failure_and_resets() {
    let controller = Controller::new();

    let (tx, rx) = mpsc::channel();
    assert!(controller.start(
        "text".to_string(),
        TypistConfig::default(),
        Some(1),
        || -> anyhow::Result<(
            zhutype::injector::RecordingInjector,
            zhutype::injector::RecordingClipboard,
        )> { Err(anyhow::anyhow!("no display")) },
        tx,
    ));

    let statuses: Vec<Status> = rx.iter().collect();
    controller.join();

    assert!(
        matches!(statuses.last(), Some(Status::Failed(msg)) if msg.contains("no display")),
        "expected a failure terminal status, got {:?}",
        statuses.last()
    );
    assert!(!controller.is_running());
}
