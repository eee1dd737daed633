use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tailor::{installed_interceptions, Class, DispatchKind};

#[derive(Default)]
struct Probe {
    log: Vec<&'static str>,
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn directly_defined_operations_exchange_in_place() {
    init_logging();

    let cls: Arc<Class<Probe>> = Class::root("probe");
    cls.define_instance("ping", |_, view: &mut Probe, _| view.log.push("ping"));
    cls.define_instance("pong", |_, view: &mut Probe, _| view.log.push("pong"));

    cls.swap("ping", "pong", DispatchKind::Instance);

    let mut probe = Probe::default();
    cls.send(&mut probe, "ping", None);
    cls.send(&mut probe, "pong", None);

    assert_eq!(probe.log, vec!["pong", "ping"]);
}

#[test]
fn inherited_original_binds_without_touching_the_parent() {
    init_logging();

    let base: Arc<Class<Probe>> = Class::root("base");
    base.define_instance("greet", |_, view: &mut Probe, _| view.log.push("base-greet"));

    let sub = Class::subclass("sub", &base);
    sub.define_instance("wrapped_greet", |cls, view: &mut Probe, new_parent| {
        // Post-swap, calling our own name reaches the true base behavior
        cls.send(view, "wrapped_greet", new_parent);
        view.log.push("sub-wrap");
    });

    sub.swap("greet", "wrapped_greet", DispatchKind::Instance);

    let mut probe = Probe::default();
    sub.send(&mut probe, "greet", None);
    assert_eq!(probe.log, vec!["base-greet", "sub-wrap"]);

    // base dispatch is untouched
    let mut other = Probe::default();
    base.send(&mut other, "greet", None);
    assert_eq!(other.log, vec!["base-greet"]);

    // the wrapped name resolves to the true base behavior
    let mut direct = Probe::default();
    sub.send(&mut direct, "wrapped_greet", None);
    assert_eq!(direct.log, vec!["base-greet"]);
}

#[test]
fn class_operations_swap_too() {
    init_logging();

    let cls: Arc<Class<Probe>> = Class::root("meta");

    let plain = Arc::new(AtomicUsize::new(0));
    let wrapped = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&plain);
    cls.define_class("refresh", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let counter = Arc::clone(&wrapped);
    cls.define_class("logged_refresh", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    cls.swap("refresh", "logged_refresh", DispatchKind::Class);
    cls.send_class("refresh");

    assert_eq!(plain.load(Ordering::SeqCst), 0);
    assert_eq!(wrapped.load(Ordering::SeqCst), 1);

    cls.send_class("logged_refresh");
    assert_eq!(plain.load(Ordering::SeqCst), 1);
}

#[test]
fn subclasses_resolve_through_the_parent_chain() {
    let base: Arc<Class<Probe>> = Class::root("widget");
    base.define_instance("layout", |_, view: &mut Probe, _| view.log.push("layout"));

    let sub = Class::subclass("button", &base);
    assert!(sub.responds_to("layout", DispatchKind::Instance));
    assert!(!sub.responds_to("paint", DispatchKind::Instance));

    let mut probe = Probe::default();
    sub.send(&mut probe, "layout", None);
    assert_eq!(probe.log, vec!["layout"]);
}

#[test]
fn swaps_are_recorded() {
    init_logging();

    let cls: Arc<Class<Probe>> = Class::root("recorded");
    cls.define_instance("show", |_, _, _| {});
    cls.define_instance("traced_show", |_, _, _| {});

    cls.swap("show", "traced_show", DispatchKind::Instance);

    let records = installed_interceptions();
    assert!(records.iter().any(|r| {
        r.class == "recorded"
            && r.original == "show"
            && r.replacement == "traced_show"
            && r.kind == DispatchKind::Instance
    }));
}

#[test]
fn same_named_classes_keep_separate_records() {
    init_logging();

    let first: Arc<Class<Probe>> = Class::root("twin");
    let second: Arc<Class<Probe>> = Class::root("twin");

    for cls in [&first, &second] {
        cls.define_instance("blink", |_, _, _| {});
        cls.define_instance("quiet_blink", |_, _, _| {});
        cls.swap("blink", "quiet_blink", DispatchKind::Instance);
    }

    let records = installed_interceptions()
        .into_iter()
        .filter(|r| r.class == "twin" && r.original == "blink")
        .count();
    assert_eq!(records, 2);
}

#[test]
#[should_panic(expected = "Operation already defined on class strict")]
fn redefining_an_operation_panics() {
    let cls: Arc<Class<Probe>> = Class::root("strict");
    cls.define_instance("show", |_, _, _| {});
    cls.define_instance("show", |_, _, _| {});
}

#[test]
#[should_panic(expected = "Cannot swap unknown instance operation 'missing'")]
fn swapping_unknown_original_panics() {
    let cls: Arc<Class<Probe>> = Class::root("broken");
    cls.define_instance("real", |_, _, _| {});

    cls.swap("missing", "real", DispatchKind::Instance);
}

#[test]
#[should_panic(expected = "Cannot swap unknown instance operation 'absent'")]
fn swapping_unknown_replacement_panics() {
    let cls: Arc<Class<Probe>> = Class::root("misconfigured");
    cls.define_instance("real", |_, _, _| {});

    cls.swap("real", "absent", DispatchKind::Instance);
}

#[test]
#[should_panic(expected = "No instance operation 'vanish'")]
fn sending_unknown_operation_panics() {
    let cls: Arc<Class<Probe>> = Class::root("empty");

    let mut probe = Probe::default();
    cls.send(&mut probe, "vanish", None);
}
