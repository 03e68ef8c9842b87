/// DSL macro for building test schedules.
///
/// Produces `Schedule<&'static str>` with id 1. Operation times count up
/// from 1 in the order written.
///
/// # Syntax
///
/// ```ignore
/// schedule![R(1, x), W(2, x), W(1, x), C(1), C(2)]
/// ```
///
/// - `R(t, var)` → `Operation::read(time, t, "var")`
/// - `W(t, var)` → `Operation::write(time, t, "var")`
/// - `C(t)`      → `Operation::commit(time, t)`
///
/// Build a single Operation.
#[macro_export]
macro_rules! op {
    ($time:expr; R($tid:literal, $attr:ident)) => {
        schedcheck_core::Operation::<&'static str>::read($time, $tid, stringify!($attr))
    };
    ($time:expr; W($tid:literal, $attr:ident)) => {
        schedcheck_core::Operation::<&'static str>::write($time, $tid, stringify!($attr))
    };
    ($time:expr; C($tid:literal)) => {
        schedcheck_core::Operation::<&'static str>::commit($time, $tid)
    };
}

/// Build a Schedule from operations.
#[macro_export]
macro_rules! schedule {
    ($($kind:ident($($args:tt)*)),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut schedule = schedcheck_core::Schedule::<&'static str>::new(1);
        #[allow(unused_mut, unused_variables)]
        let mut time: u64 = 0;
        $(
            time += 1;
            schedule
                .push($crate::op!(time; $kind($($args)*)))
                .expect("unbounded schedule");
        )*
        schedule
    }};
}

/// Build a list of transaction ids.
#[macro_export]
macro_rules! tids {
    ($($tid:literal),* $(,)?) => {
        vec![$(schedcheck_core::TransactionId($tid)),*]
    };
}
