use ekko::core::config::Config;
use ekko::core::log_sink::LogSink;
use ekko::core::views::{
    LoadState, ViewController, ViewState, ANSIBLE_VIEW, GIT_VIEW, SCRIBE_VIEW, STATUS_VIEW,
};
use ekko::EkkoError;

fn controller() -> ViewController {
    let config = Config {
        load_delay_ms: 20,
        ..Default::default()
    };
    ViewController::with_default_views(&config)
}

#[test]
fn test_starts_on_status_view() {
    let views = controller();
    assert_eq!(views.state(), &ViewState::Active(STATUS_VIEW.to_string()));
    assert_eq!(views.visible().unwrap().id, STATUS_VIEW);
    assert_eq!(views.view_id_for_key(4), Some(ANSIBLE_VIEW));
}

#[test]
fn test_unknown_view_is_logged_and_ignored() {
    let mut views = controller();
    let mut log = LogSink::new();

    let err = views.request_show("nope-view", &mut log).unwrap_err();

    assert!(matches!(err, EkkoError::UnknownView(_)));
    assert_eq!(views.visible().unwrap().id, STATUS_VIEW);
    assert!(log.last().unwrap().contains("nope-view"));
}

#[tokio::test]
async fn test_completed_load_logs_label() {
    let mut views = controller();
    let mut log = LogSink::new();

    let task = views.request_show(GIT_VIEW, &mut log).unwrap();
    assert!(views.is_loading());

    let outcome = task.run().await;
    assert_eq!(outcome.state, LoadState::Completed);
    assert!(views.finish(outcome, &mut log));

    assert_eq!(views.state(), &ViewState::Active(GIT_VIEW.to_string()));
    assert_eq!(log.last(), Some("OK: loaded Git"));
}

#[tokio::test]
async fn test_superseded_load_is_cancelled_and_silent() {
    let mut views = controller();
    let mut log = LogSink::new();

    let first = views.request_show(GIT_VIEW, &mut log).unwrap();
    let second = views.request_show(SCRIBE_VIEW, &mut log).unwrap();

    let (first, second) = tokio::join!(first.run(), second.run());
    assert_eq!(first.state, LoadState::Cancelled);

    assert!(!views.finish(first, &mut log));
    assert!(views.finish(second, &mut log));

    let ok_lines: Vec<_> = log.lines().filter(|l| l.starts_with("OK:")).collect();
    assert_eq!(ok_lines, vec!["OK: loaded Scribe"]);
    assert_eq!(views.visible().unwrap().id, SCRIBE_VIEW);
}
