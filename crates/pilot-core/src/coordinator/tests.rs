use std::{sync::Arc, thread};

use super::*;
use crate::{
    error::PilotError,
    executor::ExecutorError,
    models::Action,
    store::MemoryStore,
};

fn steps() -> Vec<Step> {
    vec![
        Step::new("aaa1111", "A", Action::Pick),
        Step::new("bbb2222", "B", Action::Pick),
        Step::new("ccc3333", "C", Action::Pick),
    ]
}

fn setup() -> (Arc<MemoryStore>, Arc<InteractiveCoordinator>) {
    let store = Arc::new(MemoryStore::rebasing(steps()));
    let coordinator = Arc::new(InteractiveCoordinator::new(store.clone()));
    (store, coordinator)
}

fn spawn_prepare(
    coordinator: &Arc<InteractiveCoordinator>,
) -> thread::JoinHandle<PrepareOutcome> {
    coordinator.job_started();
    let coordinator = Arc::clone(coordinator);
    thread::spawn(move || {
        let outcome = coordinator.prepare_steps(steps());
        coordinator.finish_job(InteractiveResult::Terminal {
            status: RebaseStatus::Ok,
        });
        outcome
    })
}

#[test]
fn test_prepare_returns_edited_list() {
    let (store, coordinator) = setup();
    let worker = spawn_prepare(&coordinator);

    match coordinator.next_result() {
        Some(InteractiveResult::Prepare { steps: offered }) => assert_eq!(offered, steps()),
        other => panic!("expected a prepare request, got {other:?}"),
    }
    assert!(coordinator.is_waiting());

    let mut edited = steps();
    edited[2].action = Some(Action::Squash);
    store.write_steps(&edited).unwrap();
    coordinator.force_update_last_step_list_to_current().unwrap();
    assert!(coordinator.continue_decision(true).unwrap());

    match worker.join().unwrap() {
        PrepareOutcome::Proceed(list) => assert_eq!(list, edited),
        PrepareOutcome::Aborted => panic!("prepare should proceed"),
    }
    assert!(matches!(
        coordinator.next_result(),
        Some(InteractiveResult::Terminal { status: RebaseStatus::Ok })
    ));
    assert!(coordinator.next_result().is_none());
}

#[test]
fn test_continue_detects_foreign_edit() {
    let (store, coordinator) = setup();
    let worker = spawn_prepare(&coordinator);
    assert!(matches!(
        coordinator.next_result(),
        Some(InteractiveResult::Prepare { .. })
    ));

    let mut foreign = steps();
    foreign.swap(0, 1);
    store.write_steps(&foreign).unwrap();

    let err = coordinator.continue_decision(true).unwrap_err();
    match &err {
        PilotError::StepListChanged { steps } => assert_eq!(steps, &foreign),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_step_list_changed());
    assert!(coordinator.is_waiting());

    assert!(coordinator.continue_decision(false).unwrap());
    match worker.join().unwrap() {
        PrepareOutcome::Proceed(list) => assert_eq!(list, foreign),
        PrepareOutcome::Aborted => panic!("prepare should proceed"),
    }
}

#[test]
fn test_abort_while_preparing() {
    let (_store, coordinator) = setup();
    let worker = spawn_prepare(&coordinator);
    assert!(matches!(
        coordinator.next_result(),
        Some(InteractiveResult::Prepare { .. })
    ));

    assert!(coordinator.request_abort());
    assert!(matches!(worker.join().unwrap(), PrepareOutcome::Aborted));

    // The worker's own terminal result is not an abort, so it is filtered.
    assert!(coordinator.next_result().is_none());
}

#[test]
fn test_prepare_after_abort_does_not_block() {
    let (_store, coordinator) = setup();
    assert!(!coordinator.request_abort());

    assert!(matches!(
        coordinator.prepare_steps(steps()),
        PrepareOutcome::Aborted
    ));
    assert!(matches!(
        coordinator.modify_commit_message("msg"),
        RewordOutcome::Abort
    ));
    assert!(!coordinator.is_waiting());
}

#[test]
fn test_start_operation_clears_abort() {
    let (_store, coordinator) = setup();
    coordinator.request_abort();
    coordinator.start_operation();

    assert!(!coordinator.is_abort_requested());
    coordinator.job_started();
    coordinator.finish_job(InteractiveResult::Terminal {
        status: RebaseStatus::Ok,
    });
    assert!(matches!(
        coordinator.next_result(),
        Some(InteractiveResult::Terminal { status: RebaseStatus::Ok })
    ));
}

#[test]
fn test_reword_uses_supplied_message() {
    let (_store, coordinator) = setup();
    coordinator.job_started();
    let worker = {
        let coordinator = Arc::clone(&coordinator);
        thread::spawn(move || coordinator.modify_commit_message("Old message"))
    };

    match coordinator.next_result() {
        Some(InteractiveResult::Reword { commit_message }) => {
            assert_eq!(commit_message, "Old message");
        }
        other => panic!("expected a reword request, got {other:?}"),
    }
    assert_eq!(coordinator.last_step_list(), Some(steps()));
    coordinator.supply_commit_message("New message");
    assert!(coordinator.continue_decision(true).unwrap());

    match worker.join().unwrap() {
        RewordOutcome::Message(message) => assert_eq!(message, "New message"),
        RewordOutcome::Abort => panic!("reword should not abort"),
    }
    coordinator.queue().job_finished();
}

#[test]
fn test_reword_without_message_keeps_original() {
    let (_store, coordinator) = setup();
    coordinator.job_started();
    let worker = {
        let coordinator = Arc::clone(&coordinator);
        thread::spawn(move || coordinator.modify_commit_message("Original"))
    };

    assert!(matches!(
        coordinator.next_result(),
        Some(InteractiveResult::Reword { .. })
    ));
    coordinator.continue_decision(false).unwrap();

    match worker.join().unwrap() {
        RewordOutcome::Message(message) => assert_eq!(message, "Original"),
        RewordOutcome::Abort => panic!("reword should not abort"),
    }
    coordinator.queue().job_finished();
}

#[test]
fn test_abort_filters_until_aborted_result() {
    let (_store, coordinator) = setup();
    coordinator.request_abort();

    let queue = coordinator.queue();
    queue.push(InteractiveResult::Prepare { steps: steps() });
    queue.push(InteractiveResult::Terminal {
        status: RebaseStatus::Stopped,
    });
    queue.push(InteractiveResult::Terminal {
        status: RebaseStatus::Aborted,
    });
    queue.push(InteractiveResult::Terminal {
        status: RebaseStatus::Ok,
    });

    assert!(matches!(
        coordinator.next_result(),
        Some(InteractiveResult::Terminal { status: RebaseStatus::Aborted })
    ));
    // Filtering ends once the abort has surfaced.
    assert!(matches!(
        coordinator.next_result(),
        Some(InteractiveResult::Terminal { status: RebaseStatus::Ok })
    ));
}

#[test]
fn test_exception_surfaces_during_abort() {
    let (_store, coordinator) = setup();
    coordinator.request_abort();

    coordinator.queue().push(InteractiveResult::Exception {
        error: ExecutorError::NoHead,
    });
    assert!(matches!(
        coordinator.next_result(),
        Some(InteractiveResult::Exception {
            error: ExecutorError::NoHead
        })
    ));
}
