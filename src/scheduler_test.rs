use std::rc::Rc;

use super::*;

fn counter() -> (Rc<Cell<usize>>, impl Fn() -> FrameTask) {
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    let make = move || -> FrameTask {
        let c = Rc::clone(&c);
        Box::new(move || c.set(c.get() + 1))
    };
    (count, make)
}

#[test]
fn tasks_do_not_run_until_flush() {
    let scheduler = ManualScheduler::new();
    let (count, task) = counter();
    scheduler.schedule_once(task());
    assert_eq!(count.get(), 0);
    assert_eq!(scheduler.pending(), 1);

    assert_eq!(scheduler.flush(), 1);
    assert_eq!(count.get(), 1);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn tasks_run_once() {
    let scheduler = ManualScheduler::new();
    let (count, task) = counter();
    scheduler.schedule_once(task());
    scheduler.flush();
    scheduler.flush();
    assert_eq!(count.get(), 1);
}

#[test]
fn cancel_removes_only_that_task() {
    let scheduler = ManualScheduler::new();
    let (count, task) = counter();
    let first = scheduler.schedule_once(task());
    scheduler.schedule_once(task());
    scheduler.cancel(first);

    assert_eq!(scheduler.flush(), 1);
    assert_eq!(count.get(), 1);
}

#[test]
fn cancel_after_run_is_noop() {
    let scheduler = ManualScheduler::new();
    let (count, task) = counter();
    let handle = scheduler.schedule_once(task());
    scheduler.flush();
    scheduler.cancel(handle);
    assert_eq!(count.get(), 1);
}

#[test]
fn handles_are_unique() {
    let scheduler = ManualScheduler::new();
    let a = scheduler.schedule_once(Box::new(|| {}));
    let b = scheduler.schedule_once(Box::new(|| {}));
    assert_ne!(a, b);
}

#[test]
fn task_scheduled_during_flush_waits_for_next_frame() {
    let scheduler = Rc::new(ManualScheduler::new());
    let (count, task) = counter();
    let inner = task();
    let s = Rc::clone(&scheduler);
    scheduler.schedule_once(Box::new(move || {
        s.schedule_once(inner);
    }));

    assert_eq!(scheduler.flush(), 1);
    assert_eq!(count.get(), 0);
    assert_eq!(scheduler.pending(), 1);

    scheduler.flush();
    assert_eq!(count.get(), 1);
}
