use cmdgen::{
    bind_object, load_schema, parse_argv, parse_line, BindError, Bridge, BridgeError, GeneratorConfig,
    HandlerError, Invocation, ParseException, RunHandler, Schema, Slot, SortOrder, Value,
};
use serde_json::json;

const COMMANDS: &str = include_str!("../../compiler/tests/fixtures/commands.yml");

fn ticket_schema() -> Schema {
    load_schema(COMMANDS, &GeneratorConfig::default()).expect("load_schema failed")
}

fn login_schema() -> Schema {
    let text = "login:\n  --username: string username\n  --password: string password\n";
    load_schema(text, &GeneratorConfig::default()).unwrap()
}

fn strings(items: &[&str]) -> Value {
    Value::Array(items.iter().map(|s| Value::String(s.to_string())).collect())
}

#[test]
fn test_login_scenario() {
    let schema = login_schema();

    let invocation = parse_argv(&schema, &["login", "--username", "u", "--password", "p"]).unwrap();
    assert_eq!(invocation.record.name, "Login");
    assert_eq!(invocation.record.value("username"), Some(&Value::String("u".to_string())));
    assert_eq!(invocation.record.value("password"), Some(&Value::String("p".to_string())));

    let err = parse_argv(&schema, &["login", "--username", "u"]).unwrap_err();
    assert_eq!(
        err,
        ParseException::MissingFields { command: "login".to_string(), fields: vec!["password".to_string()] }
    );

    let invocation = bind_object(&schema, "login", &json!({ "username": "u", "password": "p" })).unwrap();
    assert_eq!(invocation.command, "login");
    assert_eq!(invocation.record.value("password"), Some(&Value::String("p".to_string())));
}

#[test]
fn test_zero_field_commands() {
    let schema = ticket_schema();
    for name in ["clean", "exit"] {
        let invocation = parse_argv(&schema, &[name]).unwrap();
        assert_eq!(invocation.command, name);
        assert!(invocation.record.is_empty());
    }
}

#[test]
fn test_mandatory_flags_are_required() {
    let schema = ticket_schema();
    assert!(matches!(
        parse_argv(&schema, &["query_profile"]),
        Err(ParseException::MissingFields { .. })
    ));
    assert!(matches!(
        parse_line(&schema, "refund_ticket -n 2"),
        Err(ParseException::MissingFields { ref fields, .. }) if fields == &["currentUser".to_string()]
    ));
    // Optional and defaulted flags may be left out.
    let invocation = parse_line(&schema, "refund_ticket -u alice").unwrap();
    assert_eq!(invocation.record.get("index"), Some(&Slot::Default("1".to_string())));
}

#[test]
fn test_rejections() {
    let schema = ticket_schema();
    let empty: [&str; 0] = [];
    assert_eq!(parse_argv(&schema, &empty), Err(ParseException::Empty));
    assert_eq!(parse_line(&schema, ""), Err(ParseException::Empty));
    assert_eq!(
        parse_line(&schema, "fly -u a"),
        Err(ParseException::UnknownCommand("fly".to_string()))
    );
    assert_eq!(
        parse_line(&schema, "login -u a -x b"),
        Err(ParseException::UnknownFlag { command: "login".to_string(), flag: "-x".to_string() })
    );
    assert_eq!(
        parse_line(&schema, "login -u a -p"),
        Err(ParseException::MissingValue { command: "login".to_string(), flag: "-p".to_string() })
    );
    // Command names match exactly.
    assert!(matches!(parse_line(&schema, "Login -u a -p b"), Err(ParseException::UnknownCommand(_))));
}

#[test]
fn test_add_train_arrays() {
    let schema = ticket_schema();
    let line = "add_train -i G1 -n 3 -m 100 -s a|b|c -p 10|20 -x 08:00 -t 60|70 -o 5 -d 06-01|08-17 -y G";
    let record = parse_line(&schema, line).unwrap().record;

    assert_eq!(record.value("stations"), Some(&strings(&["a", "b", "c"])));
    assert_eq!(record.value("prices"), Some(&Value::Array(vec![Value::Int(10), Value::Int(20)])));
    assert_eq!(
        record.value("durations"),
        Some(&Value::Array(vec![Value::Duration(60), Value::Duration(70)]))
    );
    assert_eq!(record.value("stopoverTimes"), Some(&Value::Array(vec![Value::Duration(5)])));
    assert_eq!(
        record.value("dates"),
        Some(&Value::Array(vec![Value::Date("06-01".to_string()), Value::Date("08-17".to_string())]))
    );
    assert_eq!(record.value("departure"), Some(&Value::Instant("08:00".to_string())));
    assert_eq!(record.value("type"), Some(&Value::Char('G')));
    assert_eq!(record.value("stops"), Some(&Value::Int(3)));
}

#[test]
fn test_repeated_flag_last_write_wins() {
    let schema = ticket_schema();
    let record = parse_line(&schema, "query_ticket -s a -t b -d 06-01 -p cost -s x -p time")
        .unwrap()
        .record;
    assert_eq!(record.value("from"), Some(&Value::String("x".to_string())));
    assert_eq!(record.value("sort"), Some(&Value::Sort(SortOrder::Time)));

    let record = parse_line(&schema, "add_train -i G1 -n 2 -m 5 -s a|b -p 1 -x 08:00 -t 1 -o 1 -d 06-01 -y G -p 7|8")
        .unwrap()
        .record;
    assert_eq!(record.value("prices"), Some(&Value::Array(vec![Value::Int(7), Value::Int(8)])));
}

#[test]
fn test_bind_defaults_and_overrides() {
    let schema = ticket_schema();
    let base = json!({
        "currentUser": "alice",
        "train": "G1",
        "date": "06-01",
        "seats": 2,
        "from": "a",
        "to": "b"
    });

    let record = bind_object(&schema, "buyTicket", &base).unwrap().record;
    assert_eq!(record.get("queue"), Some(&Slot::Default("false".to_string())));

    let mut with_queue = base.clone();
    with_queue["queue"] = json!(true);
    let record = bind_object(&schema, "buyTicket", &with_queue).unwrap().record;
    assert_eq!(record.value("queue"), Some(&Value::Bool(true)));

    let mut with_null = base.clone();
    with_null["queue"] = json!(null);
    let record = bind_object(&schema, "buyTicket", &with_null).unwrap().record;
    assert_eq!(record.get("queue"), Some(&Slot::Default("false".to_string())));

    let record = bind_object(&schema, "addUser", &json!({
        "username": "u", "password": "p", "name": "n", "email": "e"
    }))
    .unwrap()
    .record;
    assert_eq!(record.get("privilege"), Some(&Slot::Unset));
    assert_eq!(record.get("currentUser"), Some(&Slot::Unset));
}

#[test]
fn test_bind_arrays_and_missing_fields() {
    let schema = ticket_schema();
    let train = json!({
        "id": "G1", "stops": 2, "seats": 5,
        "stations": ["a", "b"], "prices": [10], "departure": "08:00",
        "durations": [30], "stopoverTimes": [], "dates": ["06-01"], "type": "G"
    });
    let record = bind_object(&schema, "addTrain", &train).unwrap().record;
    assert_eq!(record.value("stations"), Some(&strings(&["a", "b"])));
    assert_eq!(record.value("durations"), Some(&Value::Array(vec![Value::Duration(30)])));
    assert_eq!(record.value("type"), Some(&Value::Char('G')));

    let mut missing = train.clone();
    missing.as_object_mut().unwrap().remove("stations");
    assert_eq!(
        bind_object(&schema, "addTrain", &missing),
        Err(BridgeError::Bind(BindError::MissingField("stations".to_string())))
    );

    // Bridge keys are member names, never flags.
    assert_eq!(
        bind_object(&schema, "login", &json!({ "-u": "a", "-p": "b" })),
        Err(BridgeError::Bind(BindError::MissingField("username".to_string())))
    );
}

/// Records every invocation and fails on `rollback`.
#[derive(Default)]
struct Recorder {
    calls: Vec<Invocation>,
}

impl RunHandler for Recorder {
    type Response = String;

    fn run(&mut self, invocation: &Invocation) -> Result<String, HandlerError> {
        self.calls.push(invocation.clone());
        if invocation.command == "rollback" {
            return Err("rollback is not supported".into());
        }
        Ok(format!("ran {}", invocation.record.name))
    }
}

#[test]
fn test_bridge_dispatch() {
    let mut bridge = Bridge::new(ticket_schema(), Recorder::default());
    assert_eq!(bridge.exports().len(), 16);
    assert_eq!(bridge.exports()[0], "addUser");
    assert_eq!(bridge.exports()[15], "exit");

    assert_eq!(bridge.call("queryOrder", &json!({ "currentUser": "a" })), Ok("ran QueryOrder".to_string()));
    assert_eq!(bridge.call("clean", &json!(null)), Ok("ran Clean".to_string()));

    let err = bridge.call("rollback", &json!({ "timestamp": 3 })).unwrap_err();
    assert_eq!(err, BridgeError::Handler(HandlerError("rollback is not supported".to_string())));
    assert_eq!(err.to_string(), "Error: rollback is not supported");

    assert_eq!(
        bridge.call("query_order", &json!({})),
        Err(BridgeError::UnknownExport("query_order".to_string()))
    );
    assert_eq!(bridge.handler().calls.len(), 3);
    assert_eq!(bridge.handler().calls[2].record.value("timestamp"), Some(&Value::Int(3)));
}

#[test]
fn test_invocation_json() {
    let schema = ticket_schema();
    let invocation = parse_line(&schema, "query_ticket -s a -t b -d 06-01").unwrap();
    assert_eq!(
        serde_json::to_value(&invocation).unwrap(),
        json!({
            "command": "query_ticket",
            "record": { "from": "a", "to": "b", "date": "06-01", "sort": { "default": "kTime" } }
        })
    );
}
