use treeson::{parse, Format, Value};

fn main() {
    println!("=== treeson demo ===\n");

    // Test 1: Parse a document and read it back
    println!("Test 1: Parse and inspect");
    let root = parse(r#"{"name":"orbiter","mass_kg":1250.5,"active":true,"crew":null}"#).unwrap();
    println!("  name:    {:?}", root["name"].as_str().unwrap());
    println!("  mass_kg: {}", root["mass_kg"].as_number().unwrap());
    println!("  active:  {}", root["active"].as_bool().unwrap());
    println!("  crew is null: {}\n", root["crew"].is_null());

    // Test 2: Build a tree by assignment
    println!("Test 2: Build by assignment");
    let mut config = Value::Null;
    config["server"]["host"] = Value::from("127.0.0.1");
    config["server"]["port"] = Value::from(8080);
    config["retries"] = Value::from([1, 2, 5]);
    println!("  minimized: {}\n", config.to_json(Format::Minimized));

    // Test 3: Pretty printing
    println!("Test 3: Pretty printing");
    println!("{}\n", config.to_json(Format::Pretty));

    // Test 4: Round trip
    println!("Test 4: Round trip");
    let text = config.to_json(Format::Minimized);
    let reparsed = parse(&text).unwrap();
    println!("  round-trip equal: {}\n", reparsed == config);

    // Test 5: Caret diagnostics
    println!("Test 5: Diagnostics");
    match parse("[1, 2, ,3]") {
        Ok(_) => unreachable!(),
        Err(e) => println!("{e}"),
    }
}
