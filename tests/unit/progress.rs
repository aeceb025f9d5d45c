use super::*;

#[test]
fn bar_progress_tracks_position_and_clears() {
    let mut progress = BarProgress::with_target(ProgressDrawTarget::hidden());
    assert!(progress.bar().is_none());

    progress.start(6);
    let bar = progress.bar().unwrap().clone();
    assert_eq!(bar.length(), Some(6));
    assert_eq!(bar.position(), 0);

    progress.advance(1, 6);
    progress.advance(4, 6);
    assert_eq!(bar.position(), 4);

    progress.finish();
    assert!(bar.is_finished());
}

#[test]
fn bar_progress_ignores_advance_before_start() {
    let mut progress = BarProgress::with_target(ProgressDrawTarget::hidden());
    progress.advance(3, 5);
    progress.finish();
    assert!(progress.bar().is_none());
}

#[test]
fn log_progress_interval_is_at_least_one() {
    let mut progress = LogProgress::every(0);
    progress.start(3);
    for done in 1..=3 {
        progress.advance(done, 3);
    }
    progress.finish();
    assert_eq!(progress.every, 1);
    assert!(progress.started.is_none());
}

#[test]
fn fn_progress_forwards_counts() {
    let mut seen = Vec::new();
    {
        let mut progress = FnProgress(|done: usize, total: usize| seen.push((done, total)));
        progress.start(2);
        progress.advance(1, 2);
        progress.advance(2, 2);
        progress.finish();
    }
    assert_eq!(seen, vec![(1, 2), (2, 2)]);
}
