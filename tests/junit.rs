use std::{fs, io::Read as _};

use cucumber_junit::{
    event::{Event, Failure, Feature, HookType, Scenario, Status, Step, TestResult},
    Cli, JUnit, ReportInitError, Writer as _,
};
use tempfile::NamedTempFile;

fn run(events: Vec<Event>) -> String {
    let mut file = NamedTempFile::new().unwrap();
    let mut junit = JUnit::from_path(file.path()).unwrap();
    for ev in events {
        junit.handle_event(ev).unwrap();
    }
    drop(junit);

    let mut buffer = String::new();
    file.read_to_string(&mut buffer).unwrap();
    buffer
}

fn scenario(name: &str, steps: &[(&str, TestResult)]) -> Vec<Event> {
    let mut events = vec![Event::Scenario(Scenario::new(name))];
    events.extend(
        steps
            .iter()
            .map(|(text, _)| Event::Step(Step::new("Given ", *text))),
    );
    events.extend(steps.iter().map(|(_, res)| Event::Result(res.clone())));
    events
}

#[test]
fn writes_report_into_file() {
    let mut events = vec![Event::Feature(
        Feature::new("Café orders").tagged("@orders").tagged("@Fast-Lane"),
    )];
    events.extend(scenario(
        "Order a latte",
        &[
            ("a barista", TestResult::passed(1_000_000_000)),
            ("I order a latte", TestResult::passed(500_000_000)),
        ],
    ));
    events.extend(scenario(
        "Order something odd",
        &[
            ("a barista", TestResult::passed(0)),
            (
                "I order tea",
                TestResult::failed(
                    0,
                    Failure::new("no tea", "Error: no tea\n\tat counter:1"),
                ),
            ),
        ],
    ));
    events.extend(scenario(
        "Order later",
        &[("a barista", TestResult::new(Status::Pending))],
    ));
    events.push(Event::Done);

    let xml = run(events);

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains(
        "<testsuite package=\"orders.fast_lane\" name=\"CafeOrders\" \
         tests=\"3\" failures=\"1\">",
    ));
    assert!(xml.contains(
        "<testcase classname=\"CafeOrders\" name=\"orderALatte\" time=\"1.5\">",
    ));
    assert!(xml.contains("<failure message=\"no tea\">"));
    assert!(xml.contains("StackTrace:\nError: no tea\n\tat counter:1"));
    assert_eq!(xml.matches("<testcase ").count(), 3);
    assert_eq!(xml.matches("<skipped>").count(), 1);
    assert_eq!(xml.matches("<system-out>").count(), 1);
}

#[test]
fn step_log_has_fixed_width() {
    let xml = run([
        scenario("Padded", &[("short", TestResult::passed(0))]),
        vec![Event::Done],
    ]
    .concat());

    let line = format!("Given short{}passed\n", ".".repeat(140 - 11));
    assert!(xml.contains(&format!("<![CDATA[{line}]]>")), "{xml}");
}

#[test]
fn hook_failure_shifts_results_past_steps() {
    let mut events = vec![
        Event::Feature(Feature::new("Hooked")),
        Event::Hook(HookType::Before, TestResult::passed(1)),
        Event::Hook(
            HookType::Before,
            TestResult::failed(0, Failure::new("setup failed", "")),
        ),
    ];
    events.extend(scenario(
        "Uses setup",
        &[("a step", TestResult::new(Status::Skipped))],
    ));
    events.push(Event::Done);

    let xml = run(events);

    assert!(xml.contains("<testsuite tests=\"1\" failures=\"0\"/>"), "{xml}");
}

#[test]
fn cli_opens_file_destination() {
    let file = NamedTempFile::new().unwrap();
    let mut junit = Cli::with_out(file.path()).open().unwrap();
    junit.done().unwrap();
    drop(junit);

    let xml = fs::read_to_string(file.path()).unwrap();
    assert!(xml.contains("<testsuite tests=\"0\" failures=\"0\"/>"));
}

#[test]
fn cli_without_destination_fails() {
    assert!(matches!(
        Cli::default().open(),
        Err(ReportInitError::MissingDestination),
    ));
}
