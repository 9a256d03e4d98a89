use serde_json::{json, Value};
use uiflow_core::{callback, payload, Hook, InMemoryTestRegistry, StepBuilder, StepError, StepType};

fn ok() -> impl std::future::Future<Output = Result<(), StepError>> + Send + 'static {
    async { Ok::<(), StepError>(()) }
}

#[tokio::test]
async fn step_count_and_order_follow_chain_calls() {
    let registry = InMemoryTestRegistry::<Value>::new();
    let mut scenario = StepBuilder::new("tests/order.rs", &registry);
    let mut expected = Vec::new();

    for i in 0..25 {
        let (step_type, next) = match i % 5 {
            0 => (StepType::Given, scenario.given(format!("step {i}"), payload(json!(i)))),
            1 => (StepType::When, scenario.when(format!("step {i}"), callback(ok))),
            2 => (StepType::Expect, scenario.expect(format!("step {i}"), ())),
            3 => (StepType::Before, scenario.before(Hook::action(format!("step {i}"), None))),
            _ => (StepType::After, scenario.after(Hook::function(ok))),
        };
        scenario = next;
        expected.push(step_type);
    }

    scenario.settle().await.expect("hooks ok");
    let steps = scenario.steps();
    assert_eq!(steps.len(), 25);
    assert_eq!(steps.iter().map(|s| s.step_type()).collect::<Vec<_>>(), expected);
    for (i, s) in steps.iter().enumerate().filter(|(i, _)| i % 5 < 4) {
        assert_eq!(s.description(), format!("step {i}"));
    }
}

#[test]
fn duplicate_steps_are_kept() {
    let registry = InMemoryTestRegistry::<Value>::new();
    let scenario = StepBuilder::new("p", &registry).given("same", ()).given("same", ()).given("same", ());
    assert_eq!(scenario.step_count(), 3);
}

#[test]
fn falsy_json_payloads_are_kept() {
    let registry = InMemoryTestRegistry::<Value>::new();
    let steps = StepBuilder::new("p", &registry).given("zero", payload(json!(0)))
                                               .given("empty", payload(json!("")))
                                               .given("false", payload(json!(false)))
                                               .given("null", payload(Value::Null))
                                               .steps();
    let payloads: Vec<_> = steps.iter().map(|s| s.payload().cloned()).collect();
    assert_eq!(payloads, vec![Some(json!(0)), Some(json!("")), Some(json!(false)), Some(Value::Null)]);
}
