use super::*;
use std::cell::RefCell;

#[test]
fn enqueue_requests_a_single_tick_until_drained() {
    let scheduler = Rc::new(TestScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    runtime.enqueue_task(|| {});
    runtime.enqueue_task(|| {});
    assert_eq!(scheduler.ticks.get(), 1);
    assert!(runtime.needs_tick());
    assert!(runtime.has_pending_tasks());

    assert_eq!(runtime.drain_tasks(), 2);
    assert!(!runtime.needs_tick());
    assert!(!runtime.has_pending_tasks());

    runtime.enqueue_task(|| {});
    assert_eq!(scheduler.ticks.get(), 2);
}

#[test]
fn tasks_run_in_order_including_ones_enqueued_while_draining() {
    let runtime = TestRuntime::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let handle = runtime.handle();

    let first_log = Rc::clone(&log);
    let nested_log = Rc::clone(&log);
    runtime.runtime().enqueue_task(move || {
        first_log.borrow_mut().push("first");
        handle.enqueue_task(move || nested_log.borrow_mut().push("nested"));
    });
    let second_log = Rc::clone(&log);
    runtime
        .runtime()
        .enqueue_task(move || second_log.borrow_mut().push("second"));

    assert_eq!(runtime.drain(), 3);
    assert_eq!(*log.borrow(), vec!["first", "second", "nested"]);
}

#[test]
fn handle_runs_inline_once_runtime_is_gone() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    assert!(handle.is_alive());
    drop(runtime);
    assert!(!handle.is_alive());

    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);
    handle.enqueue_task(move || flag.set(true));
    assert!(ran.get());
}
